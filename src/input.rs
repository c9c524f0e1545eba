//! Input queries the game loop makes each frame.
//!
//! The front end implements [`InputSource`]; pointer positions arrive
//! already unprojected into world coordinates.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

pub trait InputSource {
    fn is_direction_pressed(&self, direction: Direction) -> bool;

    fn is_pointer_active(&self) -> bool;

    /// Only meaningful while [`InputSource::is_pointer_active`] is true.
    fn pointer_world_position(&self) -> (f32, f32);
}

/// A snapshot of held directions and pointer state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub pointer: Option<(f32, f32)>,
}

impl InputState {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn holding(direction: Direction) -> Self {
        let mut input = Self::default();
        input.set(direction, true);
        input
    }

    pub fn pointing_at(x: f32, y: f32) -> Self {
        Self {
            pointer: Some((x, y)),
            ..Self::default()
        }
    }

    pub fn set(&mut self, direction: Direction, pressed: bool) {
        match direction {
            Direction::Up => self.up = pressed,
            Direction::Down => self.down = pressed,
            Direction::Left => self.left = pressed,
            Direction::Right => self.right = pressed,
        }
    }
}

impl InputSource for InputState {
    fn is_direction_pressed(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    fn is_pointer_active(&self) -> bool {
        self.pointer.is_some()
    }

    fn pointer_world_position(&self) -> (f32, f32) {
        self.pointer.unwrap_or((0.0, 0.0))
    }
}
