//! Presentation adapter between a scene and the game.
//!
//! The presenter forwards pointer input and frame ticks into [`MemoryGame`]
//! and replays the resulting events onto a [`SceneView`]. It makes no
//! decisions of its own.

use crate::actions::GameEvent;
use crate::game::MemoryGame;
use crate::tile::{Color, TileIndex, TILE_COUNT};

/// Hint shown when hovering a tile that can be picked
pub const HOVER_TEXT: &str = "Reveal";

/// Sinks the presenter drives.
pub trait SceneView {
    /// Set the displayed color of a tile
    fn paint_tile(&mut self, index: TileIndex, color: Color);

    /// Replace the status text
    fn show_status(&mut self, text: &str);

    /// Start the effect unlocked by winning. Called at most once.
    fn activate_effect(&mut self);
}

/// Owns a game and the view it is rendered to
pub struct Presenter<V: SceneView> {
    game: MemoryGame,
    view: V,
}

impl<V: SceneView> Presenter<V> {
    /// Wrap a game and paint every tile neutral
    pub fn new(game: MemoryGame, mut view: V) -> Self {
        for index in 0..TILE_COUNT {
            view.paint_tile(index, Color::NEUTRAL);
        }
        Self { game, view }
    }

    pub fn game(&self) -> &MemoryGame {
        &self.game
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// A pointer went down on a tile
    pub fn on_pointer_down(&mut self, index: TileIndex) -> Vec<GameEvent> {
        let events = self.game.select_tile(index);
        self.present(&events);
        events
    }

    /// A frame elapsed
    pub fn on_frame(&mut self, dt: f64) -> Vec<GameEvent> {
        let events = self.game.advance(dt);
        self.present(&events);
        events
    }

    /// Hover hint for a tile, if picking it would do anything
    pub fn hover_text(&self, index: TileIndex) -> Option<&'static str> {
        self.game.is_selectable(index).then_some(HOVER_TEXT)
    }

    fn present(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::TileRevealed { index, value } => {
                    self.view.paint_tile(*index, value.color());
                }
                GameEvent::TileConcealed { index } => {
                    self.view.paint_tile(*index, Color::NEUTRAL);
                }
                GameEvent::StatusChanged { text } => self.view.show_status(text),
                GameEvent::Victory => self.view.activate_effect(),
                GameEvent::PairMatched { .. } | GameEvent::Mismatched { .. } => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::tile::PairValue;

    #[derive(Default)]
    struct RecordingView {
        colors: Vec<Color>,
        status: Option<String>,
        activations: u32,
    }

    impl SceneView for RecordingView {
        fn paint_tile(&mut self, index: TileIndex, color: Color) {
            if self.colors.len() <= index {
                self.colors.resize(index + 1, Color::NEUTRAL);
            }
            self.colors[index] = color;
        }

        fn show_status(&mut self, text: &str) {
            self.status = Some(text.to_string());
        }

        fn activate_effect(&mut self) {
            self.activations += 1;
        }
    }

    fn presenter() -> Presenter<RecordingView> {
        let mut values = [PairValue::Red; TILE_COUNT];
        for (i, v) in values.iter_mut().enumerate() {
            *v = PairValue::ALL[i / 2];
        }
        let game = MemoryGame::with_board(Board::from_layout(values).unwrap());
        Presenter::new(game, RecordingView::default())
    }

    #[test]
    fn test_starts_all_neutral() {
        let p = presenter();
        assert_eq!(p.view().colors, vec![Color::NEUTRAL; TILE_COUNT]);
        assert_eq!(p.view().status, None);
    }

    #[test]
    fn test_reveal_then_conceal() {
        let mut p = presenter();
        p.on_pointer_down(0);
        p.on_pointer_down(2);

        assert_eq!(p.view().colors[0], PairValue::Red.color());
        assert_eq!(p.view().colors[2], PairValue::Blue.color());

        p.on_frame(0.25);
        assert_eq!(p.view().colors[0], PairValue::Red.color());

        p.on_frame(0.25);
        assert_eq!(p.view().colors[0], Color::NEUTRAL);
        assert_eq!(p.view().colors[2], Color::NEUTRAL);
    }

    #[test]
    fn test_match_updates_status() {
        let mut p = presenter();
        p.on_pointer_down(4);
        p.on_pointer_down(5);

        assert_eq!(p.view().status.as_deref(), Some("Pairs found: 1/8"));
        assert_eq!(p.view().colors[4], PairValue::Green.color());
        assert_eq!(p.view().colors[5], PairValue::Green.color());
        assert_eq!(p.view().activations, 0);
    }

    #[test]
    fn test_hover_follows_selectability() {
        let mut p = presenter();
        assert_eq!(p.hover_text(0), Some(HOVER_TEXT));

        p.on_pointer_down(0);
        assert_eq!(p.hover_text(0), None);
        assert_eq!(p.hover_text(1), Some(HOVER_TEXT));

        p.on_pointer_down(2);
        assert_eq!(p.hover_text(1), None, "input is gated during a mismatch");
        assert_eq!(p.hover_text(99), None);
    }
}
