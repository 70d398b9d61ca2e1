use super::{direction::Direction, position::Position};

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<Position>,
    /// Direction the next move will take
    direction: Direction,
    /// Direction of the last completed move
    heading: Direction,
    grow_pending: bool,
}

impl Snake {
    /// Create a new snake with given head position and direction.
    ///
    /// The body extends behind the head, opposite to `direction`.
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = Vec::with_capacity(length.max(1));
        body.push(head);

        let back = direction.opposite();
        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_in_direction(back));
        }

        Self {
            body,
            direction,
            heading: direction,
            grow_pending: false,
        }
    }

    /// Snake of `length` cells centered on a `width` x `height` grid, facing right
    pub fn centered(width: usize, height: usize, length: usize) -> Self {
        let head = Position::new((width / 2) as i32, (height / 2) as i32);
        Self::new(head, Direction::Right, length)
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// All occupied cells, head first
    pub fn body(&self) -> &[Position] {
        &self.body
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_grow_pending(&self) -> bool {
        self.grow_pending
    }

    /// Where the head will be after the next move
    pub fn next_head(&self) -> Position {
        self.head().moved_in_direction(self.direction)
    }

    /// Request a new direction, effective on the next move.
    ///
    /// Reversals are rejected once the snake has a neck. Only the last
    /// completed move counts, so a pending turn can still be replaced.
    pub fn change_direction(&mut self, new_direction: Direction) -> bool {
        if self.body.len() >= 2 && self.heading.is_opposite(new_direction) {
            return false;
        }

        self.direction = new_direction;
        true
    }

    /// Mark the snake to grow on its next move
    pub fn grow(&mut self) {
        self.grow_pending = true;
    }

    /// Move one cell in the current direction, keeping the tail if growth is pending
    pub fn advance(&mut self) {
        let new_head = self.next_head();
        self.body.insert(0, new_head);

        if self.grow_pending {
            self.grow_pending = false;
        } else {
            self.body.pop();
        }

        self.heading = self.direction;
    }

    /// Check if the head overlaps any other segment
    pub fn has_self_collision(&self) -> bool {
        self.body_segments().contains(&self.head())
    }

    /// Check if position is part of the snake, head included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
