//! Interning-table error types.

use std::error::Error;
use std::fmt;

use crate::config::Instrumentation;

/// Errors reported by the global interning table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SidError {
    /// [`init`](crate::init) was called after the table already existed,
    /// either from an earlier `init` or from lazy first use.
    AlreadyInitialized {
        /// Mode the existing table runs in.
        active: Instrumentation,
    },
}

impl fmt::Display for SidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyInitialized { active } => {
                write!(
                    f,
                    "string table already initialised (instrumentation {active})"
                )
            }
        }
    }
}

impl Error for SidError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_active_mode() {
        let err = SidError::AlreadyInitialized {
            active: Instrumentation::Disabled,
        };
        assert_eq!(
            err.to_string(),
            "string table already initialised (instrumentation disabled)"
        );
    }
}
