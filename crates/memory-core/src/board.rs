//! Board representation: the sixteen tiles and their pair assignment.
//!
//! The assignment of pair values to indices is fixed when the board is
//! built. Afterwards only the per-tile lock flag changes.

use crate::tile::{PairValue, Tile, TileIndex, PAIR_COUNT, TILE_COUNT};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from building a board out of an explicit layout
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum BoardError {
    #[error("Pair value {value:?} appears {count} times, expected 2")]
    UnbalancedPair { value: PairValue, count: usize },

    #[error("Tile {index} is locked but its partner is not")]
    HalfLockedPair { index: TileIndex },
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr")]
pub struct Board {
    tiles: [Tile; TILE_COUNT],
}

/// Wire form of a board, checked before it becomes a [`Board`]
#[derive(Deserialize)]
struct BoardRepr {
    tiles: [Tile; TILE_COUNT],
}

impl TryFrom<BoardRepr> for Board {
    type Error = BoardError;

    fn try_from(repr: BoardRepr) -> Result<Self, Self::Error> {
        let mut board = Self::from_layout(repr.tiles.map(|t| t.pair_value))?;
        board.tiles = repr.tiles;

        // Pairs lock together
        for index in 0..TILE_COUNT {
            let partner = board.partner_of(index);
            if board.is_locked(index) && !partner.is_some_and(|p| board.is_locked(p)) {
                return Err(BoardError::HalfLockedPair { index });
            }
        }
        Ok(board)
    }
}

impl Board {
    /// Create a board with a randomized pair assignment
    pub fn shuffled() -> Self {
        let mut rng = rand::thread_rng();
        Self::shuffled_with_rng(&mut rng)
    }

    /// Create a board with a provided RNG
    /// This allows for deterministic board generation when needed
    pub fn shuffled_with_rng<R: Rng>(rng: &mut R) -> Self {
        let mut values = Self::ordered_values();
        fisher_yates(&mut values, rng);
        Self::from_values(values)
    }

    /// Create a board from an explicit assignment.
    ///
    /// Fails unless every pair value appears exactly twice.
    pub fn from_layout(values: [PairValue; TILE_COUNT]) -> Result<Self, BoardError> {
        for value in PairValue::ALL {
            let count = values.iter().filter(|v| **v == value).count();
            if count != 2 {
                return Err(BoardError::UnbalancedPair { value, count });
            }
        }
        Ok(Self::from_values(values))
    }

    /// Every pair value twice, in palette order
    fn ordered_values() -> [PairValue; TILE_COUNT] {
        let mut values = [PairValue::Red; TILE_COUNT];
        for (i, value) in values.iter_mut().enumerate() {
            *value = PairValue::ALL[i % PAIR_COUNT];
        }
        values
    }

    fn from_values(values: [PairValue; TILE_COUNT]) -> Self {
        Self {
            tiles: values.map(Tile::new),
        }
    }

    /// Get a tile by index
    pub fn tile(&self, index: TileIndex) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// All tiles in index order
    pub fn tiles(&self) -> &[Tile; TILE_COUNT] {
        &self.tiles
    }

    /// Pair value of a tile
    pub fn pair_value(&self, index: TileIndex) -> Option<PairValue> {
        self.tile(index).map(|t| t.pair_value)
    }

    /// Check whether a tile has been matched
    pub fn is_locked(&self, index: TileIndex) -> bool {
        self.tile(index).is_some_and(|t| t.locked)
    }

    /// Permanently lock a tile
    pub(crate) fn lock(&mut self, index: TileIndex) {
        if let Some(tile) = self.tiles.get_mut(index) {
            tile.locked = true;
        }
    }

    /// Number of locked tiles
    pub fn locked_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.locked).count()
    }

    /// Indices of tiles still in play
    pub fn unlocked_indices(&self) -> impl Iterator<Item = TileIndex> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.locked)
            .map(|(i, _)| i)
    }

    /// Index of the other tile carrying the same value
    pub fn partner_of(&self, index: TileIndex) -> Option<TileIndex> {
        let value = self.pair_value(index)?;
        self.tiles
            .iter()
            .enumerate()
            .find(|(i, t)| *i != index && t.pair_value == value)
            .map(|(i, _)| i)
    }
}

/// Uniform in-place shuffle, walking from the back.
fn fisher_yates<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn count_values(board: &Board) -> [usize; PAIR_COUNT] {
        let mut counts = [0; PAIR_COUNT];
        for tile in board.tiles() {
            let slot = PairValue::ALL
                .iter()
                .position(|v| *v == tile.pair_value)
                .unwrap();
            counts[slot] += 1;
        }
        counts
    }

    #[test]
    fn test_shuffled_board_has_every_pair_twice() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let board = Board::shuffled_with_rng(&mut rng);
            assert_eq!(count_values(&board), [2; PAIR_COUNT], "seed {}", seed);
            assert_eq!(board.locked_count(), 0);
        }
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = Board::shuffled_with_rng(&mut StdRng::seed_from_u64(7));
        let b = Board::shuffled_with_rng(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_actually_permutes() {
        let ordered = Board::from_values(Board::ordered_values());
        let differs = (0..20).any(|seed| {
            Board::shuffled_with_rng(&mut StdRng::seed_from_u64(seed)) != ordered
        });
        assert!(differs);
    }

    #[test]
    fn test_fisher_yates_reaches_every_position() {
        // Element 0 should land in every slot across enough seeds
        let mut seen = [false; 4];
        for seed in 0..200 {
            let mut items = [0, 1, 2, 3];
            fisher_yates(&mut items, &mut StdRng::seed_from_u64(seed));
            let pos = items.iter().position(|x| *x == 0).unwrap();
            seen[pos] = true;
        }
        assert_eq!(seen, [true; 4]);
    }

    #[test]
    fn test_from_layout_rejects_unbalanced() {
        let mut values = Board::ordered_values();
        values[0] = PairValue::Blue;

        assert_eq!(
            Board::from_layout(values),
            Err(BoardError::UnbalancedPair {
                value: PairValue::Red,
                count: 1
            })
        );
    }

    #[test]
    fn test_deserialize_validates_layout() {
        let mut board = Board::from_layout(Board::ordered_values()).unwrap();
        board.lock(0);
        board.lock(8);

        let json = serde_json::to_string(&board).unwrap();
        let restored: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, board);

        let mut value = serde_json::to_value(&board).unwrap();
        value["tiles"][1]["pair_value"] = "Red".into();
        assert!(serde_json::from_value::<Board>(value).is_err());

        let mut value = serde_json::to_value(&board).unwrap();
        value["tiles"][8]["locked"] = false.into();
        let err = serde_json::from_value::<Board>(value).unwrap_err();
        assert!(err.to_string().contains("Tile 0 is locked"));
    }

    #[test]
    fn test_partner_and_locking() {
        let mut board = Board::from_layout(Board::ordered_values()).unwrap();

        assert_eq!(board.partner_of(0), Some(8));
        assert_eq!(board.partner_of(15), Some(7));
        assert_eq!(board.partner_of(16), None);

        board.lock(0);
        board.lock(8);
        assert!(board.is_locked(0));
        assert!(!board.is_locked(1));
        assert!(!board.is_locked(99));
        assert_eq!(board.locked_count(), 2);
        assert_eq!(board.unlocked_indices().count(), TILE_COUNT - 2);
    }
}
