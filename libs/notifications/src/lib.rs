//! Best-effort notifications for registration and contact events.
//!
//! Nothing here may fail the operation that triggered it: [`dispatch`] runs
//! the sink on a separate task and only logs failures.
//!
//! ```ignore
//! use notifications::{dispatch, LogNotifier, Notification, SharedNotifier};
//!
//! let notifier: SharedNotifier = Arc::new(LogNotifier);
//! dispatch(notifier.clone(), Notification::RegistrationConfirmed { .. });
//! ```

mod models;
mod notifier;

pub use models::Notification;
pub use notifier::{LogNotifier, Notifier, RecordingNotifier, SharedNotifier, dispatch};
