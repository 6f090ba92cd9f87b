use crate::core::{DEFAULT_COLUMNS, DEFAULT_ROWS};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "engine_config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub version: String,
    pub board: BoardConfig,
    pub search: SearchConfig,
    pub farm: FarmConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub columns: usize,
    pub rows: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub depth: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmConfig {
    pub workers: usize,
    /// None = wait for workers forever
    pub worker_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub engine_first: bool,
    /// 棋譜の保存先 (None なら保存しない)
    pub record_dir: Option<String>,
}

impl EngineConfig {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|_| Self::default())
    }

    pub fn worker_timeout(&self) -> Option<Duration> {
        self.farm.worker_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);

        EngineConfig {
            version: "1.0".to_string(),
            board: BoardConfig {
                columns: DEFAULT_COLUMNS,
                rows: DEFAULT_ROWS,
            },
            search: SearchConfig {
                depth: super::predict::DEFAULT_DEPTH,
            },
            farm: FarmConfig {
                workers,
                worker_timeout_ms: Some(30_000),
            },
            game: GameConfig {
                engine_first: true,
                record_dir: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trips_through_json() {
        let mut config = EngineConfig::default();
        config.farm.worker_timeout_ms = None;
        config.game.record_dir = Some("records".to_string());

        let path = std::env::temp_dir().join(format!(
            "four_farm_config_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();
        let loaded = EngineConfig::load_from(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.board.columns, 7);
        assert_eq!(loaded.search.depth, 4);
        assert_eq!(loaded.worker_timeout(), None);
        assert_eq!(loaded.game.record_dir.as_deref(), Some("records"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(EngineConfig::load_from("/nonexistent/engine_config.json").is_err());
    }
}
