pub mod config;
pub mod evaluator;
pub mod predict;

pub use config::EngineConfig;
pub use evaluator::{DepthSearch, Evaluator};
pub use predict::{predict, DEFAULT_DEPTH};
