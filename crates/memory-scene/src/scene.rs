//! Terminal scene: the view the presenter paints into, plus the elevator.

use memory_core::{Color, PairValue, SceneView, TileIndex, TileLayout, TILE_COUNT};
use tracing::{debug, info};

/// Lowest resting height of the platform
const ELEVATOR_BOTTOM: f32 = 1.5;
/// Height at which the platform turns around
const ELEVATOR_TOP: f32 = 15.0;
/// Units per second
const ELEVATOR_SPEED: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Platform that shuttles up and down once unlocked
#[derive(Debug, Clone, PartialEq)]
pub struct Elevator {
    active: bool,
    height: f32,
    direction: Direction,
}

impl Default for Elevator {
    fn default() -> Self {
        Self {
            active: false,
            height: ELEVATOR_BOTTOM,
            direction: Direction::Up,
        }
    }
}

impl Elevator {
    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Move the platform for one frame
    pub fn animate(&mut self, dt: f32) {
        if !self.active {
            return;
        }

        match self.direction {
            Direction::Up => {
                self.height += ELEVATOR_SPEED * dt;
                if self.height >= ELEVATOR_TOP {
                    self.direction = Direction::Down;
                }
            }
            Direction::Down => {
                self.height -= ELEVATOR_SPEED * dt;
                if self.height <= ELEVATOR_BOTTOM {
                    self.height = ELEVATOR_BOTTOM;
                    self.direction = Direction::Up;
                }
            }
        }
    }
}

/// Text-mode stand-in for the 3D scene
#[derive(Debug, Clone)]
pub struct TerminalScene {
    layout: TileLayout,
    colors: [Color; TILE_COUNT],
    status: Option<String>,
    elevator: Elevator,
}

impl Default for TerminalScene {
    fn default() -> Self {
        Self {
            layout: TileLayout::default(),
            colors: [Color::NEUTRAL; TILE_COUNT],
            status: None,
            elevator: Elevator::default(),
        }
    }
}

impl TerminalScene {
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn elevator(&self) -> &Elevator {
        &self.elevator
    }

    /// Per-frame scene animation
    pub fn animate(&mut self, dt: f32) {
        let before = self.elevator.direction();
        self.elevator.animate(dt);
        if self.elevator.direction() != before {
            debug!(
                height = self.elevator.height(),
                direction = ?self.elevator.direction(),
                "elevator turned"
            );
        }
    }

    /// Draw the grid as rows of symbols; `.` marks a neutral tile
    pub fn render(&self) -> String {
        let mut rows = vec![String::new(); TILE_COUNT.div_ceil(self.layout.columns)];
        for (index, color) in self.colors.iter().enumerate() {
            let (row, col) = self.layout.cell(index);
            if col > 0 {
                rows[row].push(' ');
            }
            rows[row].push(glyph(*color));
        }
        rows.join("\n")
    }
}

/// Symbol for a painted color
fn glyph(color: Color) -> char {
    PairValue::ALL
        .iter()
        .find(|v| v.color() == color)
        .map(|v| v.symbol())
        .unwrap_or('.')
}

impl SceneView for TerminalScene {
    fn paint_tile(&mut self, index: TileIndex, color: Color) {
        if let Some(slot) = self.colors.get_mut(index) {
            *slot = color;
            debug!(index, position = ?self.layout.position(index), "tile painted");
        }
    }

    fn show_status(&mut self, text: &str) {
        info!("{}", text);
        self.status = Some(text.to_string());
    }

    fn activate_effect(&mut self) {
        info!("Elevator activated");
        self.elevator.activate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elevator_idle_until_activated() {
        let mut elevator = Elevator::default();
        elevator.animate(1.0);
        assert_eq!(elevator.height(), ELEVATOR_BOTTOM);
        assert!(!elevator.is_active());
    }

    #[test]
    fn test_elevator_bounces() {
        let mut elevator = Elevator::default();
        elevator.activate();

        elevator.animate(1.0);
        assert_eq!(elevator.height(), 3.0);
        assert_eq!(elevator.direction(), Direction::Up);

        // 1.5 -> 15.0 takes 9 seconds
        for _ in 0..8 {
            elevator.animate(1.0);
        }
        assert!(elevator.height() >= ELEVATOR_TOP);
        assert_eq!(elevator.direction(), Direction::Down);

        for _ in 0..20 {
            elevator.animate(1.0);
            if elevator.direction() == Direction::Up {
                break;
            }
        }
        assert_eq!(elevator.height(), ELEVATOR_BOTTOM);
        assert_eq!(elevator.direction(), Direction::Up);
        assert!(elevator.is_active());
    }

    #[test]
    fn test_render_grid() {
        let mut scene = TerminalScene::default();
        assert_eq!(scene.render(), ". . . . . . . .\n. . . . . . . .");

        scene.paint_tile(0, PairValue::Red.color());
        scene.paint_tile(15, PairValue::Teal.color());
        scene.paint_tile(99, PairValue::Teal.color());
        assert_eq!(scene.render(), "R . . . . . . .\n. . . . . . . T");
    }

    #[test]
    fn test_sinks() {
        let mut scene = TerminalScene::default();
        scene.show_status("Pairs found: 1/8");
        scene.activate_effect();

        assert_eq!(scene.status(), Some("Pairs found: 1/8"));
        assert!(scene.elevator().is_active());
    }
}
