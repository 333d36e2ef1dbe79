//! Engine configuration.
//!
//! Loaded from an optional JSON file; every field has a default so a
//! partial file (or `{}`) is valid. Command-line flags override the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::eval::{EvalWeights, DEFAULT_TARGET_BONUS};
use crate::search::{SearchPolicy, INFINITY};

/// Default search depth in plies.
pub const DEFAULT_DEPTH: u8 = 8;

/// Opening book looked up in the working directory when none is configured.
pub const DEFAULT_BOOK: &str = "opening.txt";

/// Errors that can occur while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(
        "evaluation weights out of range: target_bonus {target_bonus}, disc_weight {disc_weight} \
         can reach {magnitude}, limit is {limit}"
    )]
    WeightsOutOfRange {
        target_bonus: i32,
        disc_weight: i32,
        magnitude: i64,
        limit: i32,
    },
}

/// Tunable engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Search depth in plies.
    pub depth: u8,
    pub policy: SearchPolicy,
    /// Evaluation value of a disc on a target square.
    pub target_bonus: i32,
    /// Evaluation value of each disc of material advantage.
    pub disc_weight: i32,
    /// Opening book file, one continuation per line. A missing file only
    /// disables the book.
    pub book_path: Option<PathBuf>,
    /// Seed for the opening book's random choice (0 = entropy).
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            depth: DEFAULT_DEPTH,
            policy: SearchPolicy::default(),
            target_bonus: DEFAULT_TARGET_BONUS,
            disc_weight: 0,
            book_path: Some(PathBuf::from(DEFAULT_BOOK)),
            seed: 0,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that no evaluation can reach the search window sentinel.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let magnitude = self.eval_weights().max_magnitude();
        if magnitude >= i64::from(INFINITY) {
            return Err(ConfigError::WeightsOutOfRange {
                target_bonus: self.target_bonus,
                disc_weight: self.disc_weight,
                magnitude,
                limit: INFINITY,
            });
        }
        Ok(())
    }

    /// The evaluation terms this configuration selects.
    pub fn eval_weights(&self) -> EvalWeights {
        EvalWeights {
            target_bonus: self.target_bonus,
            disc_weight: self.disc_weight,
        }
    }
}

/// Loads a configuration from a JSON file at the given path.
pub fn load_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    EngineConfig::from_json_str(&data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, EngineConfig::default());
        assert_eq!(cfg.depth, 8);
        assert_eq!(cfg.policy, SearchPolicy::NegaScout);
        assert_eq!(cfg.eval_weights(), EvalWeights::default());
    }

    #[test]
    fn partial_override() {
        let cfg = EngineConfig::from_json_str(
            r#"{ "depth": 4, "policy": "negamax", "target_bonus": 10, "book_path": "opening.txt" }"#,
        )
        .unwrap();
        assert_eq!(cfg.depth, 4);
        assert_eq!(cfg.policy, SearchPolicy::Negamax);
        assert_eq!(cfg.eval_weights().target_bonus, 10);
        assert_eq!(cfg.eval_weights().disc_weight, 0);
        assert_eq!(cfg.book_path, Some(PathBuf::from("opening.txt")));
        assert_eq!(cfg.seed, 0);
    }

    #[test]
    fn roundtrip_through_json() {
        let cfg = EngineConfig {
            depth: 6,
            disc_weight: 2,
            seed: 99,
            ..EngineConfig::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(EngineConfig::from_json_str(&json).unwrap(), cfg);
    }

    #[test]
    fn default_book_is_opening_txt() {
        assert_eq!(
            EngineConfig::default().book_path,
            Some(PathBuf::from("opening.txt"))
        );
        let cfg = EngineConfig::from_json_str(r#"{ "book_path": null }"#).unwrap();
        assert_eq!(cfg.book_path, None);
    }

    #[test]
    fn rejects_weights_that_reach_the_window() {
        for json in [
            r#"{ "depth": 1, "disc_weight": 1000000 }"#,
            r#"{ "target_bonus": -20000 }"#,
            r#"{ "target_bonus": 2147483647, "disc_weight": -2147483648 }"#,
        ] {
            assert!(
                matches!(
                    EngineConfig::from_json_str(json),
                    Err(ConfigError::WeightsOutOfRange { .. })
                ),
                "{}",
                json
            );
        }
        // 64 * 15000 + 64 * 600 stays below the limit.
        let cfg = EngineConfig::from_json_str(r#"{ "target_bonus": 15000, "disc_weight": 600 }"#).unwrap();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn bad_json_and_missing_file() {
        assert!(matches!(
            EngineConfig::from_json_str(r#"{ "depth": "deep" }"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            load_config(Path::new("/nonexistent/reverso.json")),
            Err(ConfigError::Io { .. })
        ));
    }
}
