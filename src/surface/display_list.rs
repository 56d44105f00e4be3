//! Recording surface.
//!
//! Stores calls as [`DrawCommand`]s instead of rasterising them. Hosts that
//! own a real canvas elsewhere (a browser, a GPU painter) can replay the
//! list; tests use it to assert exactly what was drawn.
//!
//! A `Clear` makes every earlier drawing command dead, so the list only keeps
//! surface state plus the frame being drawn. Its length stays bounded however
//! many frames run.

use super::Surface;
use crate::field::Hsla;
use serde::{Deserialize, Serialize};

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Resize {
        backing_width: u32,
        backing_height: u32,
        display_width: f32,
        display_height: f32,
    },
    SetScale {
        scale: f32,
    },
    Clear {
        width: f32,
        height: f32,
    },
    FillCircle {
        x: f32,
        y: f32,
        radius: f32,
        color: Hsla,
    },
    StrokeLine {
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
        color: Hsla,
    },
}

impl DrawCommand {
    /// Whether the command changes pixels (as opposed to surface state).
    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            Self::Clear { .. } | Self::FillCircle { .. } | Self::StrokeLine { .. }
        )
    }
}

/// Surface that records commands.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
    unavailable: bool,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface that reports no 2D context, for exercising the inert path.
    pub fn without_context() -> Self {
        Self {
            commands: Vec::new(),
            unavailable: true,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of pixel-changing commands currently recorded.
    pub fn draw_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_draw()).count()
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeLine { .. }))
    }

    /// Drain the recorded commands, leaving the list empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Commands recorded since the most recent `Clear`, i.e. the last frame.
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear { .. }))
            .unwrap_or(0);
        &self.commands[start..]
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.commands)
    }
}

impl Surface for DisplayList {
    fn has_context_2d(&self) -> bool {
        !self.unavailable
    }

    fn resize(&mut self, backing: (u32, u32), display: (f32, f32)) {
        self.commands.push(DrawCommand::Resize {
            backing_width: backing.0,
            backing_height: backing.1,
            display_width: display.0,
            display_height: display.1,
        });
    }

    fn set_scale(&mut self, scale: f32) {
        self.commands.push(DrawCommand::SetScale { scale });
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.commands.retain(|c| !c.is_draw());
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Hsla) {
        self.commands.push(DrawCommand::FillCircle { x, y, radius, color });
    }

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Hsla) {
        self.commands.push(DrawCommand::StrokeLine { from, to, width, color });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_commands_are_not_draws() {
        let mut list = DisplayList::new();
        list.resize((1600, 1200), (800.0, 600.0));
        list.set_scale(2.0);
        assert_eq!(list.commands().len(), 2);
        assert_eq!(list.draw_count(), 0);

        list.clear(800.0, 600.0);
        list.fill_circle(1.0, 2.0, 1.0, Hsla::new(0.0, 80.0, 70.0, 0.8));
        assert_eq!(list.draw_count(), 2);
        assert_eq!(list.circles().count(), 1);
        assert_eq!(list.lines().count(), 0);
    }

    #[test]
    fn test_last_frame_starts_at_latest_clear() {
        let mut list = DisplayList::new();
        let color = Hsla::new(10.0, 80.0, 60.0, 1.0);
        list.clear(10.0, 10.0);
        list.fill_circle(1.0, 1.0, 1.0, color);
        list.fill_circle(2.0, 2.0, 1.0, color);
        list.clear(10.0, 10.0);
        list.stroke_line((0.0, 0.0), (1.0, 1.0), 0.8, color);

        let frame = list.last_frame();
        assert_eq!(frame.len(), 2);
        assert!(matches!(frame[0], DrawCommand::Clear { .. }));
    }

    #[test]
    fn test_clear_drops_previous_frame_but_keeps_state() {
        let mut list = DisplayList::new();
        let color = Hsla::new(10.0, 80.0, 60.0, 1.0);
        list.resize((20, 20), (10.0, 10.0));
        list.set_scale(2.0);

        for _ in 0..100 {
            list.clear(10.0, 10.0);
            list.fill_circle(1.0, 1.0, 1.0, color);
            list.stroke_line((0.0, 0.0), (1.0, 1.0), 0.8, color);
        }

        assert_eq!(list.commands().len(), 5);
        assert!(matches!(list.commands()[0], DrawCommand::Resize { .. }));
        assert!(matches!(list.commands()[1], DrawCommand::SetScale { .. }));
        assert_eq!(list.draw_count(), 3);
        assert_eq!(list.last_frame().len(), 3);
    }

    #[test]
    fn test_without_context() {
        assert!(!DisplayList::without_context().has_context_2d());
        assert!(DisplayList::new().has_context_2d());
    }

    #[test]
    fn test_json_is_tagged() {
        let mut list = DisplayList::new();
        list.set_scale(1.5);
        let json = list.to_json().unwrap();
        assert_eq!(json, r#"[{"op":"set_scale","scale":1.5}]"#);

        let parsed: Vec<DrawCommand> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, list.take());
        assert!(list.commands().is_empty());
    }
}
