//! # Validation Decision
//!
//! Whether a function's wrapper validates is settled once, at definition
//! time, from the function's tags and the compile configuration. The result
//! is frozen into the compiled function.
//!
//! | never tag | always tag | instrument && assertions | decision |
//! |-----------|------------|--------------------------|----------|
//! | yes       | no         | any                      | `Off` |
//! | no        | yes        | any                      | `Always` |
//! | no        | no         | true                     | `Conditional` |
//! | no        | no         | false                    | `Off` |
//!
//! Both tags at once are rejected.

use std::fmt;

use crate::config::CompileConfig;
use crate::error::DefinitionError;

/// Per-function validation tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FunctionOptions {
    /// Never validate. No validating wrapper is generated at all.
    pub never_validate: bool,
    /// Always validate, ignoring the runtime toggle.
    pub always_validate: bool,
}

/// Frozen per-function validation behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationDecision {
    /// The implementation is called directly.
    Off,
    /// Every call is validated.
    Always,
    /// Calls are validated while the runtime toggle is on.
    Conditional,
}

impl ValidationDecision {
    /// Decide from the function's tags and the compile configuration.
    ///
    /// # Errors
    ///
    /// Returns `DefinitionError::ConflictingTags` if both tags are set.
    pub fn decide(
        options: FunctionOptions,
        config: &CompileConfig,
    ) -> Result<Self, DefinitionError> {
        match (options.never_validate, options.always_validate) {
            (true, true) => Err(DefinitionError::ConflictingTags),
            (true, false) => Ok(Self::Off),
            (false, true) => Ok(Self::Always),
            (false, false) if config.instrument && config.assertions => Ok(Self::Conditional),
            (false, false) => Ok(Self::Off),
        }
    }

    /// Whether a validating wrapper is generated.
    pub fn validates(&self) -> bool {
        !matches!(self, Self::Off)
    }
}

impl fmt::Display for ValidationDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Off => "off",
            Self::Always => "always",
            Self::Conditional => "conditional",
        };
        f.write_str(s)
    }
}
