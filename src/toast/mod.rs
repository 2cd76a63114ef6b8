// SPDX-License-Identifier: MPL-2.0
//! Toast notification queue for user feedback.
//!
//! Toasts appear temporarily to inform users about actions (save success,
//! errors, etc.) and leave on their own after a display duration, so a
//! frontend only has to render the latest queue snapshot.
//!
//! # Components
//!
//! - `entry` - [`Toast`] builder plus the queued [`ToastEntry`] with identity and timing
//! - `manager` - [`ToastManager`] handle over the driver task that owns the queue
//!
//! # Usage
//!
//! ```
//! use statekit::config::ToastConfig;
//! use statekit::toast::{Toast, ToastManager};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let toasts = ToastManager::new(ToastConfig::default());
//!
//! let id = toasts.push(Toast::success("Image saved").message("lens-01.png"));
//! toasts.push(Toast::error("Upload failed").sticky());
//!
//! // Render whatever the latest snapshot holds.
//! let mut updates = toasts.subscribe();
//! updates.changed().await.unwrap();
//!
//! toasts.dismiss(id);
//! # }
//! ```
//!
//! # Design Considerations
//!
//! - Queue order is first-in-first-out; expiry never reorders survivors
//! - Every non-sticky entry gets its own expiry timer; dismissal cancels it
//! - Ids come from a process-wide counter and are never reused
//! - Sticky toasts stay until dismissed or cleared

mod entry;
mod manager;

pub use entry::{Toast, ToastEntry, ToastId, ToastKind};
pub use manager::ToastManager;
