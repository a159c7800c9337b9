//! Input snapshots
//!
//! Hosts report raw key and mouse events as they arrive; the latch folds them
//! into one snapshot per frame so the simulation only sees edges at frame
//! boundaries.

use super::InputSource;
use crate::sim::TickInput;

/// Input state for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Held
    pub left: bool,
    /// Held
    pub right: bool,
    /// Pressed since the last snapshot
    pub jump_pressed: bool,
    /// Released since the last snapshot
    pub jump_released: bool,
    /// Clicked since the last snapshot
    pub restart_clicked: bool,
}

impl InputSnapshot {
    pub fn to_tick_input(&self) -> TickInput {
        let move_x = match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        TickInput {
            move_x,
            jump: self.jump_pressed,
            restart: self.restart_clicked,
        }
    }
}

/// Game actions a key can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    Jump,
}

impl Action {
    /// Default bindings: arrows or WASD
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "left" | "a" => Some(Action::Left),
            "right" | "d" => Some(Action::Right),
            "up" | "w" => Some(Action::Jump),
            _ => None,
        }
    }
}

/// Collects events between frames
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    left_held: bool,
    right_held: bool,
    jump_held: bool,
    jump_pressed: bool,
    jump_released: bool,
    restart_clicked: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, action: Action) {
        match action {
            Action::Left => self.left_held = true,
            Action::Right => self.right_held = true,
            Action::Jump => {
                // Key repeat while held does not jump again
                if !self.jump_held {
                    self.jump_held = true;
                    self.jump_pressed = true;
                }
            }
        }
    }

    pub fn release(&mut self, action: Action) {
        match action {
            Action::Left => self.left_held = false,
            Action::Right => self.right_held = false,
            Action::Jump => {
                self.jump_held = false;
                self.jump_released = true;
            }
        }
    }

    pub fn click(&mut self) {
        self.restart_clicked = true;
    }

    /// Snapshot the current frame and clear the edges
    pub fn take(&mut self) -> InputSnapshot {
        let snapshot = InputSnapshot {
            left: self.left_held,
            right: self.right_held,
            jump_pressed: self.jump_pressed,
            jump_released: self.jump_released,
            restart_clicked: self.restart_clicked,
        };
        self.jump_pressed = false;
        self.jump_released = false;
        self.restart_clicked = false;
        snapshot
    }
}

impl InputSource for InputLatch {
    fn poll_input(&mut self) -> InputSnapshot {
        self.take()
    }
}

/// Replays input from a function of the frame number
pub struct ScriptedInput<F> {
    frame: u64,
    script: F,
}

impl<F: FnMut(u64) -> InputSnapshot> ScriptedInput<F> {
    pub fn new(script: F) -> Self {
        Self { frame: 0, script }
    }
}

impl<F: FnMut(u64) -> InputSnapshot> InputSource for ScriptedInput<F> {
    fn poll_input(&mut self) -> InputSnapshot {
        let snapshot = (self.script)(self.frame);
        self.frame += 1;
        snapshot
    }
}
