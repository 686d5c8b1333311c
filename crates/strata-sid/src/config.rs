//! Interning-table configuration.

use std::fmt;

/// Environment variable that overrides the build-profile default.
pub const INSTRUMENTATION_ENV: &str = "STRATA_SID_INSTRUMENTATION";

/// Whether the interning table records text for reverse lookup.
///
/// Forward hashing works in both modes. With instrumentation disabled
/// nothing is stored and every [`resolve`](crate::resolve) reports
/// not-found.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Instrumentation {
    /// Store the text of every id on first intern.
    Enabled,
    /// Hash only; no reverse lookup.
    Disabled,
}

impl Instrumentation {
    /// Enabled in debug builds, disabled in release builds.
    pub fn default_for_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }

    /// Read [`INSTRUMENTATION_ENV`], falling back to
    /// [`Instrumentation::default_for_build`] when unset or unrecognised.
    pub fn from_env() -> Self {
        std::env::var(INSTRUMENTATION_ENV)
            .ok()
            .and_then(|value| Self::parse(&value))
            .unwrap_or_else(Self::default_for_build)
    }

    /// Parse `on`/`off`, `1`/`0` or `true`/`false`, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "on" | "1" | "true" => Some(Self::Enabled),
            "off" | "0" | "false" => Some(Self::Disabled),
            _ => None,
        }
    }

    /// Whether reverse lookup is available.
    pub fn is_enabled(self) -> bool {
        self == Self::Enabled
    }
}

impl Default for Instrumentation {
    fn default() -> Self {
        Self::default_for_build()
    }
}

impl fmt::Display for Instrumentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enabled => write!(f, "enabled"),
            Self::Disabled => write!(f, "disabled"),
        }
    }
}

/// Configuration for the process-wide interning table.
///
/// Passed to [`init`](crate::init) at startup. When the table is created
/// lazily instead, [`SidConfig::from_env`] is used.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SidConfig {
    /// Reverse-lookup mode.
    pub instrumentation: Instrumentation,
}

impl SidConfig {
    /// Config with an explicit instrumentation mode.
    pub fn new(instrumentation: Instrumentation) -> Self {
        Self { instrumentation }
    }

    /// Build-profile default, overridden by [`INSTRUMENTATION_ENV`].
    pub fn from_env() -> Self {
        Self::new(Instrumentation::from_env())
    }
}
