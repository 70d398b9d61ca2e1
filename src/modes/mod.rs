pub mod demo;
pub mod human;

pub use demo::{DemoConfig, DemoMode, GameSummary, MoveReport};
pub use human::HumanMode;
