// SPDX-License-Identifier: MPL-2.0
//! `statekit` provides the client-side state coordination primitives behind
//! an interactive dashboard: toast notifications, debounced input, filter
//! state, sorting, and pagination.
//!
//! The timed pieces (toasts, debouncing) run as small driver tasks on a
//! Tokio runtime and publish state snapshots over watch channels. The rest
//! (filters, sorting, pagination) are plain values that compose into a
//! list pipeline. Nothing here renders; frontends subscribe to snapshots
//! and draw whatever they contain.

#![doc(html_root_url = "https://docs.rs/statekit/0.1.0")]

pub mod config;
pub mod debounce;
pub mod error;
pub mod filter;
pub mod pagination;
pub mod sort;
pub mod toast;
