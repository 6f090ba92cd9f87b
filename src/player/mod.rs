pub mod ai;
pub mod controller;
pub mod engine;
pub mod scripted;
pub mod tui;

pub use controller::PlayerController;
pub use engine::EngineController;
pub use scripted::ScriptedController;
pub use tui::TuiController;
