// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    /// A command was issued against a component whose driver task has
    /// already stopped. Carries the component name.
    Closed(String),
    /// Strict sorting referenced a comparator name that was never
    /// registered. Carries the requested name.
    UnknownComparator(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Closed(e) => write!(f, "Closed: {}", e),
            Error::UnknownComparator(e) => write!(f, "Unknown Comparator: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
