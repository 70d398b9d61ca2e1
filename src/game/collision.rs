//! Collision predicates.
//!
//! All functions are pure; a collision is a game outcome, never an error.

use serde::{Deserialize, Serialize};

use super::position::Position;

/// Type of collision that ends a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    /// Snake left the grid
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// True iff `position` lies outside `[0, width) x [0, height)`
pub fn wall_collision(position: Position, width: usize, height: usize) -> bool {
    !position.is_within(width, height)
}

/// True iff `head` appears in `body`, ignoring `body[0]`
pub fn self_collision(head: Position, body: &[Position]) -> bool {
    body.get(1..).is_some_and(|rest| rest.contains(&head))
}

pub fn food_collision(head: Position, food: Position) -> bool {
    head == food
}

/// Wall or self collision
pub fn any_collision(head: Position, body: &[Position], width: usize, height: usize) -> bool {
    detect(head, body, width, height).is_some()
}

/// Classify the collision at `head`, walls first
pub fn detect(head: Position, body: &[Position], width: usize, height: usize) -> Option<CollisionKind> {
    if wall_collision(head, width, height) {
        Some(CollisionKind::Wall)
    } else if self_collision(head, body) {
        Some(CollisionKind::SelfCollision)
    } else {
        None
    }
}
