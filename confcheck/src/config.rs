//! Run configuration.
//!
//! Built once at startup from externally supplied settings and threaded
//! read-only into the validator. Nothing in this crate reads the process
//! environment; that belongs to the binary.

use std::fmt;

use crate::error::ConfigError;
use crate::pattern::IncludePattern;

/// Include pattern used when none is configured.
pub const DEFAULT_INCLUDE: &str = "**/*.{json,yml,yaml,toml,hcl,ini}";

/// Immutable validation settings.
#[derive(Clone)]
pub struct Configuration {
    token: String,
    newline: bool,
    include: IncludePattern,
}

impl Configuration {
    /// Build a configuration from raw settings.
    ///
    /// A blank `include` falls back to [`DEFAULT_INCLUDE`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingToken` if `token` is absent or blank, and
    /// `ConfigError::InvalidPattern` if the include pattern does not compile.
    pub fn new(
        token: Option<String>,
        newline: bool,
        include: Option<String>,
    ) -> Result<Self, ConfigError> {
        let token = token
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let include = include
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_INCLUDE);
        let include = IncludePattern::new(include)?;

        Ok(Self {
            token,
            newline,
            include,
        })
    }

    /// Credential for the host. Opaque to the engine.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Whether files must end with a newline.
    #[must_use]
    pub fn newline(&self) -> bool {
        self.newline
    }

    #[must_use]
    pub fn include(&self) -> &IncludePattern {
        &self.include
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("token", &"<redacted>")
            .field("newline", &self.newline)
            .field("include", &self.include.as_str())
            .finish()
    }
}
