//! Core domain of the portal intranet shell.
//!
//! Everything here is synchronous and free of I/O. Persistence, completion
//! backends and timers are plugged in by the outer crates through the
//! [`layout::PreferenceStore`] and [`completion::CompletionAgent`] traits.

pub mod advisory;
pub mod call;
pub mod completion;
pub mod config;
pub mod contact;
pub mod error;
pub mod layout;
pub mod messenger;
pub mod navigation;
pub mod notification;
pub mod search;
pub mod view;

pub use error::{PortalError, Result};
