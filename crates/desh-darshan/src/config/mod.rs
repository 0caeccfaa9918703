use std::time::Duration;

use crate::{
    bookmarks::BOOKMARKS_KEY,
    error::DeshDarshanError,
    favorites::FAVORITES_KEY,
    suggest::{DEFAULT_DEBOUNCE, DEFAULT_SUGGESTION_LIMIT},
};

/// Settings for an [`Explorer`](crate::Explorer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerConfig {
    /// Maximum number of type-ahead suggestions
    pub suggestion_limit: usize,
    /// Quiet period before suggestions are recomputed
    pub debounce: Duration,
    /// Storage key holding favorite ids
    pub favorites_key: String,
    /// Storage key holding page bookmarks
    pub bookmarks_key: String,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            debounce: DEFAULT_DEBOUNCE,
            favorites_key: FAVORITES_KEY.to_string(),
            bookmarks_key: BOOKMARKS_KEY.to_string(),
        }
    }
}

/// Builder for explorer configurations with ergonomic defaults
#[derive(Debug, Clone, Default)]
pub struct ExplorerConfigBuilder {
    config: ExplorerConfig,
}

impl ExplorerConfigBuilder {
    /// Create a new builder with the default settings
    pub fn new() -> Self {
        Self {
            config: ExplorerConfig::default(),
        }
    }

    /// Shorter quiet period, for fast input devices
    pub fn responsive() -> Self {
        let mut builder = Self::new();
        builder.config.debounce = Duration::from_millis(150);
        builder
    }

    /// Longer quiet period and a few more suggestions, for slow devices
    pub fn relaxed() -> Self {
        let mut builder = Self::new();
        builder.config.debounce = Duration::from_millis(500);
        builder.config.suggestion_limit = 8;
        builder
    }

    /// Set the maximum number of suggestions
    pub fn suggestion_limit(mut self, limit: usize) -> Self {
        self.config.suggestion_limit = limit;
        self
    }

    /// Set the debounce quiet period
    pub fn debounce(mut self, quiet: Duration) -> Self {
        self.config.debounce = quiet;
        self
    }

    pub fn favorites_key(mut self, key: impl Into<String>) -> Self {
        self.config.favorites_key = key.into();
        self
    }

    pub fn bookmarks_key(mut self, key: impl Into<String>) -> Self {
        self.config.bookmarks_key = key.into();
        self
    }

    /// Validate and build the final configuration
    pub fn build(self) -> Result<ExplorerConfig, DeshDarshanError> {
        let config = self.config;
        if config.suggestion_limit == 0 {
            return Err(DeshDarshanError::ConfigError(
                "Suggestion limit must be at least 1".to_string(),
            ));
        }
        if config.favorites_key.is_empty() || config.bookmarks_key.is_empty() {
            return Err(DeshDarshanError::ConfigError(
                "Storage keys must not be empty".to_string(),
            ));
        }
        if config.favorites_key == config.bookmarks_key {
            return Err(DeshDarshanError::ConfigError(format!(
                "Favorites and bookmarks cannot share the storage key {:?}",
                config.favorites_key
            )));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_builder() {
        let config = ExplorerConfigBuilder::new().build().unwrap();
        assert_eq!(config.suggestion_limit, 5);
        assert_eq!(config.debounce, Duration::from_millis(300));
        assert_eq!(config.favorites_key, "favorites");
        assert_eq!(config.bookmarks_key, "bookmarks");
        assert_eq!(config, ExplorerConfig::default());
    }

    #[test]
    fn test_presets() {
        let responsive = ExplorerConfigBuilder::responsive().build().unwrap();
        assert_eq!(responsive.debounce, Duration::from_millis(150));
        assert_eq!(responsive.suggestion_limit, 5);

        let relaxed = ExplorerConfigBuilder::relaxed().build().unwrap();
        assert_eq!(relaxed.debounce, Duration::from_millis(500));
        assert_eq!(relaxed.suggestion_limit, 8);
    }

    #[test]
    fn test_override_presets() {
        let config = ExplorerConfigBuilder::relaxed()
            .suggestion_limit(3)
            .favorites_key("fav_v2")
            .build()
            .unwrap();
        assert_eq!(config.suggestion_limit, 3);
        assert_eq!(config.debounce, Duration::from_millis(500));
        assert_eq!(config.favorites_key, "fav_v2");
    }

    #[test]
    fn test_validation() {
        assert!(ExplorerConfigBuilder::new().suggestion_limit(0).build().is_err());
        assert!(ExplorerConfigBuilder::new().bookmarks_key("").build().is_err());

        let err = ExplorerConfigBuilder::new()
            .bookmarks_key("favorites")
            .build()
            .unwrap_err();
        assert!(matches!(err, DeshDarshanError::ConfigError(_)));
    }
}
