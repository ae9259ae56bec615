//! Headless surface that records draw calls
//!
//! Used by the native demo and by tests to observe what a tick drew and at
//! which opacity.

use glam::Vec2;

use super::{Color, Surface};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fade {
        color: Color,
        alpha: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        /// Global alpha in effect when the circle was drawn
        alpha: f32,
    },
}

/// Records draw calls for the current frame
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    pub width: f32,
    pub height: f32,
    alpha: f32,
    stack: Vec<f32>,
    commands: Vec<DrawCommand>,
    /// Keep at most this many commands (0 = unlimited)
    capacity: usize,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            alpha: 1.0,
            stack: Vec::new(),
            commands: Vec::new(),
            capacity: 0,
        }
    }

    /// Only retain the most recent frame's worth of commands
    pub fn with_capacity_limit(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Global alpha currently in effect
    pub fn global_alpha(&self) -> f32 {
        self.alpha
    }

    /// Unbalanced saves
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }

    /// Forget recorded commands; draw state is kept
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of circles drawn since the last clear
    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    fn record(&mut self, command: DrawCommand) {
        if self.capacity > 0 && self.commands.len() >= self.capacity {
            self.commands.clear();
        }
        self.commands.push(command);
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    fn fade(&mut self, color: Color, alpha: f32) {
        self.record(DrawCommand::Fade { color, alpha });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let alpha = self.alpha;
        self.record(DrawCommand::Circle {
            center,
            radius,
            color,
            alpha,
        });
    }

    fn save(&mut self) {
        self.stack.push(self.alpha);
    }

    fn restore(&mut self) {
        if let Some(alpha) = self.stack.pop() {
            self.alpha = alpha;
        }
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }
}
