//! Application layer for the portal shell.
//!
//! Composes the synchronous reducers of `portal-core` into services that own
//! timers and completion calls:
//!
//! - [`Shell`]: navigation, layout, search, notifications, contacts
//! - [`CallSession`]: ring delay and duration tick
//! - [`MessengerService`]: optimistic sends and AI replies
//! - [`AdvisoryFlow`] / [`AdvisoryService`]: the four advisory tools
//! - [`PortalApp`]: all of the above behind one navigation entry point

mod advisory_service;
mod app;
mod call_session;
mod messenger_service;
pub mod prompts;
mod shell;

use std::sync::{Mutex, MutexGuard, PoisonError};

pub use advisory_service::{AdvisoryFlow, AdvisoryService};
pub use app::PortalApp;
pub use call_session::CallSession;
pub use messenger_service::{EMPTY_REPLY, MessengerService, UNAVAILABLE_NOTICE};
pub use prompts::PromptRenderer;
pub use shell::{SearchBox, Shell};

/// Locks `mutex`, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
