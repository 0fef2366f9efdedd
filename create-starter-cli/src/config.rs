//! Configuration management
//!
//! Configuration is loaded with clear precedence:
//!
//! 1. Command-line flags (applied by the caller)
//! 2. Environment variables (`CREATE_STARTER_` prefix)
//! 3. Hardcoded defaults
//!
//! # Environment
//!
//! ```bash
//! CREATE_STARTER_TEMPLATES_DIR=/opt/starter-templates
//! CREATE_STARTER_DEFAULT_PROJECT_NAME=my-project
//! CREATE_STARTER_MANIFEST_FILE=package.json
//! ```

use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Result;
use crate::materialize::MANIFEST_FILE;

/// Scaffolding configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Template root searched before the built-in locations
    pub templates_dir: Option<PathBuf>,

    /// Directory name offered when none is given
    pub default_project_name: String,

    /// Manifest file rewritten in every template package
    pub manifest_file: String,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            templates_dir: None,
            default_project_name: "vite-project".to_string(),
            manifest_file: MANIFEST_FILE.to_string(),
        }
    }
}

impl ScaffoldConfig {
    /// Environment variable prefix
    pub const ENV_PREFIX: &'static str = "CREATE_STARTER_";

    /// Provider chain: defaults, then environment
    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default())).merge(Env::prefixed(Self::ENV_PREFIX))
    }

    /// Load configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns [`crate::ScaffoldError::Config`] if a variable has the wrong shape.
    pub fn load() -> Result<Self> {
        let config = Self::figment().extract::<Self>().map_err(Box::new)?;
        Ok(config)
    }

    /// Apply a command-line templates directory on top of the loaded value
    #[must_use]
    pub fn with_templates_dir(mut self, templates_dir: Option<PathBuf>) -> Self {
        if templates_dir.is_some() {
            self.templates_dir = templates_dir;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = ScaffoldConfig::default();
        assert!(config.templates_dir.is_none());
        assert_eq!(config.default_project_name, "vite-project");
        assert_eq!(config.manifest_file, "package.json");
    }

    #[test]
    fn test_env_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.set_env("CREATE_STARTER_DEFAULT_PROJECT_NAME", "starter");
            jail.set_env("CREATE_STARTER_TEMPLATES_DIR", "/opt/templates");

            let config: ScaffoldConfig = ScaffoldConfig::figment().extract()?;
            assert_eq!(config.default_project_name, "starter");
            assert_eq!(config.templates_dir, Some(PathBuf::from("/opt/templates")));
            assert_eq!(config.manifest_file, "package.json");
            Ok(())
        });
    }

    #[test]
    fn test_flag_wins_over_env() {
        Jail::expect_with(|jail| {
            jail.set_env("CREATE_STARTER_TEMPLATES_DIR", "/from/env");
            let config = ScaffoldConfig::load()
                .map_err(|e| e.to_string())?
                .with_templates_dir(Some(PathBuf::from("/from/flag")));
            assert_eq!(config.templates_dir, Some(PathBuf::from("/from/flag")));
            Ok(())
        });
    }

    #[test]
    fn test_missing_flag_keeps_env() {
        let config = ScaffoldConfig {
            templates_dir: Some(PathBuf::from("/from/env")),
            ..ScaffoldConfig::default()
        }
        .with_templates_dir(None);
        assert_eq!(config.templates_dir, Some(PathBuf::from("/from/env")));
    }
}
