//! Autoplayer for demos and soak tests.
//!
//! Difficulty controls how much of what it has seen the bot remembers:
//! - Easy: nothing, every pick is random
//! - Medium: each reveal is remembered with even odds
//! - Hard: perfect memory
//!
//! The bot only learns values from events it is shown; it never reads
//! face-down tiles.

use crate::actions::{GameAction, GameEvent};
use crate::game::MemoryGame;
use crate::tile::{PairValue, TileIndex, TILE_COUNT};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Bot difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotDifficulty {
    Easy,
    Medium,
    Hard,
}

impl FromStr for BotDifficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(BotDifficulty::Easy),
            "medium" => Ok(BotDifficulty::Medium),
            "hard" => Ok(BotDifficulty::Hard),
            other => Err(format!("unknown difficulty '{}'", other)),
        }
    }
}

/// A bot player that picks tiles
pub struct Bot {
    pub difficulty: BotDifficulty,
    /// Values seen on tiles that are still in play
    memory: BTreeMap<TileIndex, PairValue>,
    rng: StdRng,
}

impl Bot {
    pub fn new(difficulty: BotDifficulty) -> Self {
        Self {
            difficulty,
            memory: BTreeMap::new(),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(difficulty: BotDifficulty, seed: u64) -> Self {
        Self {
            difficulty,
            memory: BTreeMap::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Number of tiles the bot currently remembers
    pub fn remembered(&self) -> usize {
        self.memory.len()
    }

    /// Learn from events produced by the game
    pub fn observe(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::TileRevealed { index, value } => {
                    let keep = match self.difficulty {
                        BotDifficulty::Easy => false,
                        BotDifficulty::Medium => self.rng.gen_bool(0.5),
                        BotDifficulty::Hard => true,
                    };
                    if keep {
                        self.memory.insert(*index, *value);
                    }
                }
                GameEvent::PairMatched { first, second, .. } => {
                    self.memory.remove(first);
                    self.memory.remove(second);
                }
                _ => {}
            }
        }
    }

    /// Choose the next tile to select, or None if nothing can be picked now
    pub fn choose_action(&mut self, game: &MemoryGame) -> Option<GameAction> {
        let candidates: Vec<TileIndex> = (0..TILE_COUNT)
            .filter(|i| game.is_selectable(*i))
            .collect();
        if candidates.is_empty() {
            return None;
        }

        let pick = match self.difficulty {
            BotDifficulty::Easy => self.choose_random(&candidates),
            BotDifficulty::Medium | BotDifficulty::Hard => self.choose_informed(game, &candidates),
        };

        pick.map(GameAction::SelectTile)
    }

    fn choose_random(&mut self, candidates: &[TileIndex]) -> Option<TileIndex> {
        candidates.choose(&mut self.rng).copied()
    }

    fn choose_informed(
        &mut self,
        game: &MemoryGame,
        candidates: &[TileIndex],
    ) -> Option<TileIndex> {
        match game.first_selection() {
            Some(first) => {
                // The first pick is face up, so its value is visible
                let visible = game.snapshot().tiles.get(first).and_then(|t| t.value);
                if let Some(value) = visible {
                    if let Some(partner) = self.recall(value, first, candidates) {
                        return Some(partner);
                    }
                }
            }
            None => {
                if let Some((a, _)) = self.known_pair(candidates) {
                    return Some(a);
                }
            }
        }

        let unseen: Vec<TileIndex> = candidates
            .iter()
            .copied()
            .filter(|i| !self.memory.contains_key(i))
            .collect();
        if unseen.is_empty() {
            self.choose_random(candidates)
        } else {
            self.choose_random(&unseen)
        }
    }

    /// A remembered selectable tile carrying `value`, other than `exclude`
    fn recall(
        &self,
        value: PairValue,
        exclude: TileIndex,
        candidates: &[TileIndex],
    ) -> Option<TileIndex> {
        self.memory
            .iter()
            .find(|(i, v)| **v == value && **i != exclude && candidates.contains(*i))
            .map(|(i, _)| *i)
    }

    /// Two remembered selectable tiles with the same value
    fn known_pair(&self, candidates: &[TileIndex]) -> Option<(TileIndex, TileIndex)> {
        for (&a, &value) in &self.memory {
            if !candidates.contains(&a) {
                continue;
            }
            if let Some(b) = self.recall(value, a, candidates) {
                return Some((a, b));
            }
        }
        None
    }
}
