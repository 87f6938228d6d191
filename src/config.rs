use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;
use crate::game::{Piece, COLS, ROWS};

/// Deepest search that makes sense: one ply per cell.
pub const MAX_SEARCH_DEPTH: u32 = (ROWS * COLS) as u32;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub duel: DuelConfig,
}

/// Settings for the two search agents.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Depth of the fixed-depth minimax agent.
    pub fixed_depth: u32,
    /// Maximum depth of the iterative-deepening agent.
    pub max_depth: u32,
    /// Optional wall-clock budget for iterative deepening, checked between depths.
    pub time_budget_ms: Option<u64>,
    /// Disable to search the full tree (same moves, slower).
    pub alpha_beta: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            fixed_depth: 5,
            max_depth: 5,
            time_budget_ms: None,
            alpha_beta: true,
        }
    }
}

impl SearchConfig {
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }
}

/// Settings for the game loop.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DuelConfig {
    /// Seed for every random choice. Unset means seeded from the OS.
    pub seed: Option<u64>,
    /// Force the starting piece instead of picking one at random.
    pub first: Option<Piece>,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.fixed_depth == 0 || self.search.fixed_depth > MAX_SEARCH_DEPTH {
            return Err(ConfigError::Validation(format!(
                "search.fixed_depth must be in [1, {MAX_SEARCH_DEPTH}]"
            )));
        }
        if self.search.max_depth == 0 || self.search.max_depth > MAX_SEARCH_DEPTH {
            return Err(ConfigError::Validation(format!(
                "search.max_depth must be in [1, {MAX_SEARCH_DEPTH}]"
            )));
        }
        if self.search.time_budget_ms == Some(0) {
            return Err(ConfigError::Validation(
                "search.time_budget_ms must be > 0 when set".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.search.fixed_depth, 5);
        assert_eq!(config.search.max_depth, 5);
        assert!(config.search.alpha_beta);
        assert_eq!(config.search.time_budget(), None);
        assert_eq!(config.duel.first, None);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[search]
max_depth = 7
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.search.max_depth, 7);
        assert_eq!(config.search.fixed_depth, 5);
        assert_eq!(config.duel.seed, None);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_duel_section_parses_piece() {
        let toml_str = r#"
[duel]
seed = 17
first = "minimax"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.duel.seed, Some(17));
        assert_eq!(config.duel.first, Some(Piece::Minimax));
    }

    #[test]
    fn test_unknown_piece_is_rejected() {
        let toml_str = r#"
[duel]
first = "human"
"#;
        assert!(toml::from_str::<AppConfig>(toml_str).is_err());
    }

    #[test]
    fn test_validation_rejects_zero_depths() {
        let mut config = AppConfig::default();
        config.search.fixed_depth = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.search.max_depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_excessive_depth() {
        let mut config = AppConfig::default();
        config.search.max_depth = MAX_SEARCH_DEPTH + 1;
        assert!(config.validate().is_err());

        config.search.max_depth = MAX_SEARCH_DEPTH;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_budget() {
        let mut config = AppConfig::default();
        config.search.time_budget_ms = Some(0);
        assert!(config.validate().is_err());

        config.search.time_budget_ms = Some(250);
        assert!(config.validate().is_ok());
        assert_eq!(config.search.time_budget(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("duel.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[search]
fixed_depth = 3
time_budget_ms = 500
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.search.fixed_depth, 3);
        assert_eq!(config.search.time_budget_ms, Some(500));
        assert_eq!(config.search.max_depth, 5);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[search]\nfixed_depth = 0\n").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
