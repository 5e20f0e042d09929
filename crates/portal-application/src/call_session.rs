//! Timer-driven call overlay.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use portal_core::call::CallState;
use portal_core::config::CallConfig;
use portal_core::contact::Contact;
use tokio::time::{Instant, interval_at, sleep};
use tokio_util::sync::CancellationToken;

use crate::lock;

struct CallInner {
    state: CallState,
    /// Bumped on every start and end; timers from an older call are ignored.
    generation: u64,
}

/// Drives [`CallState`] with one cancellable ring delay and one cancellable tick.
///
/// Must be used inside a tokio runtime.
pub struct CallSession {
    inner: Arc<Mutex<CallInner>>,
    timer: Mutex<Option<CancellationToken>>,
    ring_delay: Duration,
    tick_interval: Duration,
}

impl CallSession {
    pub fn new(config: CallConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CallInner {
                state: CallState::default(),
                generation: 0,
            })),
            timer: Mutex::new(None),
            ring_delay: Duration::from_millis(config.ring_delay_ms),
            tick_interval: Duration::from_millis(config.tick_interval_ms),
        }
    }

    pub fn snapshot(&self) -> CallState {
        lock(&self.inner).state.clone()
    }

    /// Starts ringing `contact`, replacing any call in progress.
    pub fn start_call(&self, contact: Contact) {
        tracing::info!("[Call] Calling {}", contact.name);
        let generation = {
            let mut inner = lock(&self.inner);
            inner.state.start(contact);
            inner.generation += 1;
            inner.generation
        };

        let token = CancellationToken::new();
        if let Some(previous) = lock(&self.timer).replace(token.clone()) {
            previous.cancel();
        }
        tokio::spawn(drive_call(
            Arc::clone(&self.inner),
            generation,
            token,
            self.ring_delay,
            self.tick_interval,
        ));
    }

    /// Hangs up from any state and cancels pending timers.
    pub fn end_call(&self) {
        if let Some(token) = lock(&self.timer).take() {
            token.cancel();
        }
        let mut inner = lock(&self.inner);
        if inner.state.is_active() {
            tracing::info!("[Call] Ended after {}s", inner.state.duration_secs());
        }
        inner.state.end();
        inner.generation += 1;
    }
}

impl Drop for CallSession {
    fn drop(&mut self) {
        if let Some(token) = lock(&self.timer).take() {
            token.cancel();
        }
    }
}

async fn drive_call(
    inner: Arc<Mutex<CallInner>>,
    generation: u64,
    token: CancellationToken,
    ring_delay: Duration,
    tick_interval: Duration,
) {
    tokio::select! {
        _ = token.cancelled() => return,
        _ = sleep(ring_delay) => {}
    }

    {
        let mut guard = lock(&inner);
        if guard.generation != generation || !guard.state.connect() {
            return;
        }
        tracing::debug!("[Call] Connected");
    }

    let mut ticker = interval_at(Instant::now() + tick_interval, tick_interval);
    loop {
        tokio::select! {
            _ = token.cancelled() => return,
            _ = ticker.tick() => {
                let mut guard = lock(&inner);
                if guard.generation != generation || !guard.state.tick() {
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::call::CallStatus;
    use portal_core::contact::ContactDirectory;

    fn contact(id: &str) -> Contact {
        ContactDirectory::default().find(id).unwrap().clone()
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_connect_then_tick() {
        let call = CallSession::new(CallConfig::default());
        call.start_call(contact("igor"));

        sleep(ms(1999)).await;
        let state = call.snapshot();
        assert_eq!(state.status(), CallStatus::Ringing);
        assert_eq!(state.status_label(), "Calling...");

        sleep(ms(2)).await;
        let state = call.snapshot();
        assert_eq!(state.status(), CallStatus::Connected);
        assert_eq!(state.duration_secs(), 0);

        sleep(ms(3000)).await;
        let state = call.snapshot();
        assert_eq!(state.duration_secs(), 3);
        assert_eq!(state.status_label(), "00:03");
        assert_eq!(state.contact().map(|c| c.id.as_str()), Some("igor"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_while_ringing_never_connects() {
        let call = CallSession::new(CallConfig::default());
        call.start_call(contact("oleg"));
        sleep(ms(500)).await;
        call.end_call();

        sleep(ms(10_000)).await;
        let state = call.snapshot();
        assert_eq!(state.status(), CallStatus::Idle);
        assert!(state.contact().is_none());
        assert_eq!(state.duration_secs(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_connected_call_stops_ticking() {
        let call = CallSession::new(CallConfig::default());
        call.start_call(contact("andrey"));
        sleep(ms(4500)).await;
        assert_eq!(call.snapshot().duration_secs(), 2);

        call.end_call();
        sleep(ms(5000)).await;
        assert_eq!(call.snapshot().status(), CallStatus::Idle);
        assert_eq!(call.snapshot().duration_secs(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_uses_new_ring_delay() {
        let call = CallSession::new(CallConfig::default());
        call.start_call(contact("igor"));
        sleep(ms(1500)).await;
        call.start_call(contact("artem"));

        // The first call's delay would have fired here.
        sleep(ms(1000)).await;
        assert_eq!(call.snapshot().status(), CallStatus::Ringing);

        sleep(ms(1001)).await;
        let state = call.snapshot();
        assert_eq!(state.status(), CallStatus::Connected);
        assert_eq!(state.contact().map(|c| c.id.as_str()), Some("artem"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_configured_delays() {
        let call = CallSession::new(CallConfig {
            ring_delay_ms: 100,
            tick_interval_ms: 50,
        });
        call.start_call(contact("igor"));
        sleep(ms(101)).await;
        assert_eq!(call.snapshot().status(), CallStatus::Connected);
        sleep(ms(100)).await;
        assert_eq!(call.snapshot().duration_secs(), 2);
    }
}
