use std::collections::HashMap;

use super::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    W,
    A,
    S,
    D,
    Escape,
    Enter,
    Tab,
    Digit(u8),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub const fn arrow_key(self) -> Key {
        match self {
            Direction::Up => Key::ArrowUp,
            Direction::Down => Key::ArrowDown,
            Direction::Left => Key::ArrowLeft,
            Direction::Right => Key::ArrowRight,
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl Key {
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Key::ArrowUp | Key::W => Some(Direction::Up),
            Key::ArrowDown | Key::S => Some(Direction::Down),
            Key::ArrowLeft | Key::A => Some(Direction::Left),
            Key::ArrowRight | Key::D => Some(Direction::Right),
            _ => None,
        }
    }

    pub const fn is_movement(self) -> bool {
        self.direction().is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    PointerDown(Vec2),
    PointerMove(Vec2),
    TouchStart { position: Vec2, touch_count: u32 },
    TouchMove { position: Vec2, touch_count: u32 },
    TouchEnd,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldKeys {
    down: HashMap<Key, bool>,
}

impl HeldKeys {
    pub fn set(&mut self, key: Key, is_down: bool) {
        self.down.insert(key, is_down);
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.down.get(&key).copied().unwrap_or(false)
    }

    pub fn direction_down(&self, direction: Direction) -> bool {
        self.down
            .iter()
            .any(|(key, is_down)| *is_down && key.direction() == Some(direction))
    }

    pub fn any_direction_down(&self) -> bool {
        Direction::ALL
            .iter()
            .any(|direction| self.direction_down(*direction))
    }

    pub fn release_arrows(&mut self) {
        for direction in Direction::ALL {
            self.set(direction.arrow_key(), false);
        }
    }
}
