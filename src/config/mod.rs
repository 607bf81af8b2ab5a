//! Configuration module.
//!
//! Precedence: defaults → config file → environment → CLI flags.

pub mod loader;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, ConfigError, ConfigFile,
    ResolvedConfig, CONFIG_ENV_VAR, ROOT_KEY_ENV_VAR,
};

use crate::factory::{Factory, FactoryBuilder, FactoryError};

impl ResolvedConfig {
    /// Built-in factory configured with this config's default kind and
    /// cache capacity.
    pub fn build_factory(&self) -> Result<Factory, FactoryError> {
        FactoryBuilder::with_builtins()
            .default_kind(self.default_kind.clone())
            .cache_capacity(self.cache_capacity)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Component;

    #[test]
    fn default_config_builds_list_defaulting_factory() {
        let factory = ResolvedConfig::default()
            .build_factory()
            .expect("list is built in");
        assert_eq!(factory.default_kind(), "list");
        assert_eq!(factory.resolve(Component::new("??", "x")).kind(), "list");
    }

    #[test]
    fn unknown_default_kind_is_rejected() {
        let config = ResolvedConfig {
            default_kind: "carousel".to_string(),
            ..ResolvedConfig::default()
        };
        assert_eq!(
            config.build_factory().err(),
            Some(FactoryError::MissingDefaultKind {
                kind: "carousel".to_string()
            })
        );
    }

    #[test]
    fn cache_capacity_reaches_spots() {
        let config = ResolvedConfig {
            cache_capacity: 5,
            ..ResolvedConfig::default()
        };
        let factory = config.build_factory().expect("valid");
        let spot = factory.resolve(Component::new("grid", "g"));
        assert_eq!(spot.views().cache_capacity(), 5);
    }
}
