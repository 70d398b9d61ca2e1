//! Snake - a grid Snake game
//!
//! This library provides:
//! - Core game logic (game module): snake, food, collisions, scoring and the engine state machine
//! - Key translation for terminal input (input module)
//! - TUI rendering of engine snapshots (render module)
//! - Session play-time tracking (metrics module)
//! - Execution modes: interactive terminal play and headless scripted demo (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
