//! # aura-notify
//!
//! Ephemeral toast notifications.
//!
//! A [`NotificationCenter`] owns the set of active [`Toast`]s. Every
//! enqueued toast schedules exactly one deferred removal; an explicit
//! dismiss turns that removal into a no-op. Nothing in this crate returns
//! an error.

pub mod center;
pub mod toast;

pub use center::{NotificationCenter, ToastConfig, ToastEvent};
pub use toast::{Toast, ToastKind};
