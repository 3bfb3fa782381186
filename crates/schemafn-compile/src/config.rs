//! # Compile Configuration
//!
//! Definition-time switches that feed the validation decision.
//!
//! - `instrument` — the global switch. When off, untagged functions are
//!   compiled without any validating wrapper. Read from
//!   `SCHEMAFN_INSTRUMENT`; anything other than `"false"` keeps it on.
//! - `assertions` — whether host assertions are enabled. Defaults to
//!   `cfg!(debug_assertions)`; `SCHEMAFN_ASSERTIONS=true|false` overrides.
//!   Also gates inlined pre/post conditions.

/// Env var for the global instrumentation switch.
pub const INSTRUMENT_ENV: &str = "SCHEMAFN_INSTRUMENT";

/// Env var overriding whether assertions are enabled.
pub const ASSERTIONS_ENV: &str = "SCHEMAFN_ASSERTIONS";

/// Definition-time configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileConfig {
    /// Global switch for generating validating wrappers.
    pub instrument: bool,
    /// Whether host assertions are enabled.
    pub assertions: bool,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            instrument: true,
            assertions: cfg!(debug_assertions),
        }
    }
}

impl CompileConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let instrument = lookup(INSTRUMENT_ENV)
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(defaults.instrument);
        let assertions = match lookup(ASSERTIONS_ENV).map(|v| v.to_lowercase()).as_deref() {
            Some("true") => true,
            Some("false") => false,
            _ => defaults.assertions,
        };
        Self {
            instrument,
            assertions,
        }
    }

    /// Everything on, regardless of build profile.
    pub fn enabled() -> Self {
        Self {
            instrument: true,
            assertions: true,
        }
    }
}
