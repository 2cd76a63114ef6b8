// SPDX-License-Identifier: MPL-2.0
//! Construction-time configuration for the stateful components.
//!
//! Each timer-bearing component takes its configuration struct once, at
//! construction. The structs derive serde so host applications can embed
//! them in their own settings files; this crate performs no file I/O of
//! its own.

pub mod defaults;

pub use defaults::*;

use serde::{Deserialize, Serialize};
use std::time::Duration;

// =============================================================================
// Toast Manager
// =============================================================================

/// Configuration for [`ToastManager`](crate::toast::ToastManager).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToastConfig {
    /// Expiry delay in milliseconds applied when a toast carries no
    /// explicit duration.
    #[serde(default = "default_toast_duration_ms")]
    pub default_duration_ms: u64,
}

impl ToastConfig {
    /// Returns the default expiry delay as a [`Duration`].
    #[must_use]
    pub fn default_duration(&self) -> Duration {
        Duration::from_millis(self.default_duration_ms)
    }
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: DEFAULT_TOAST_DURATION_MS,
        }
    }
}

fn default_toast_duration_ms() -> u64 {
    DEFAULT_TOAST_DURATION_MS
}

// =============================================================================
// Debounce Controller
// =============================================================================

/// Configuration for [`Debouncer`](crate::debounce::Debouncer).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DebounceConfig {
    /// Quiet-period length in milliseconds before a value settles.
    #[serde(default = "default_debounce_delay_ms")]
    pub delay_ms: u64,
}

impl DebounceConfig {
    /// Returns the quiet-period length as a [`Duration`].
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_DEBOUNCE_DELAY_MS,
        }
    }
}

fn default_debounce_delay_ms() -> u64 {
    DEFAULT_DEBOUNCE_DELAY_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_config_default_uses_constant() {
        let config = ToastConfig::default();
        assert_eq!(config.default_duration_ms, DEFAULT_TOAST_DURATION_MS);
    }

    #[test]
    fn toast_config_converts_to_duration() {
        let config = ToastConfig {
            default_duration_ms: 250,
        };
        assert_eq!(config.default_duration(), Duration::from_millis(250));
    }

    #[test]
    fn debounce_config_default_uses_constant() {
        let config = DebounceConfig::default();
        assert_eq!(config.delay_ms, DEFAULT_DEBOUNCE_DELAY_MS);
    }

    #[test]
    fn debounce_config_converts_to_duration() {
        let config = DebounceConfig { delay_ms: 75 };
        assert_eq!(config.delay(), Duration::from_millis(75));
    }
}
