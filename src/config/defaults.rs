// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Toast**: Expiry delay applied when a toast carries no explicit duration
//! - **Debounce**: Quiet-period length before a value settles
//! - **Pagination**: Page window size bounds

// ==========================================================================
// Toast Defaults
// ==========================================================================

/// Default expiry delay for toasts without an explicit duration (in milliseconds).
pub const DEFAULT_TOAST_DURATION_MS: u64 = 3000;

// ==========================================================================
// Debounce Defaults
// ==========================================================================

/// Default quiet-period length before a debounced value settles (in milliseconds).
pub const DEFAULT_DEBOUNCE_DELAY_MS: u64 = 300;

// ==========================================================================
// Pagination Defaults
// ==========================================================================

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Minimum allowed page size. Page arithmetic divides by the page size,
/// so zero is never representable.
pub const MIN_PAGE_SIZE: usize = 1;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Toast validation
    assert!(DEFAULT_TOAST_DURATION_MS > 0);

    // Debounce validation
    assert!(DEFAULT_DEBOUNCE_DELAY_MS > 0);

    // Pagination validation
    assert!(MIN_PAGE_SIZE >= 1);
    assert!(DEFAULT_PAGE_SIZE >= MIN_PAGE_SIZE);
};
