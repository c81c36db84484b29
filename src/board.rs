use rand::Rng;
use serde::Serialize;

pub const GRID_WIDTH: usize = 3;
pub const TILE_COUNT: usize = GRID_WIDTH * GRID_WIDTH;

/// Position -> required tile number (1-based) of the only accepted layout.
pub const TARGET_ARRANGEMENT: [u8; TILE_COUNT] = [1, 2, 3, 7, 9, 8, 4, 6, 5];

/// Identity of a tile, which is also the index of its image slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TileId(u8);

impl TileId {
    pub fn new(id: u8) -> Option<Self> {
        ((id as usize) < TILE_COUNT).then_some(Self(id))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub id: TileId,
    pub current_position: u8,
    pub correct_position: u8,
}

impl Tile {
    fn new(id: TileId) -> Self {
        Self {
            id,
            current_position: id.get(),
            correct_position: id.get(),
        }
    }

    /// Row/column of the image slice this tile shows. Never changes.
    pub fn slice(&self) -> (u8, u8) {
        pos_to_row_col(self.correct_position)
    }

    /// Row/column of the grid cell the tile currently sits in.
    pub fn cell(&self) -> (u8, u8) {
        pos_to_row_col(self.current_position)
    }
}

/// 3x3 swap puzzle. Tiles are stored in creation order (index == id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    tiles: [Tile; TILE_COUNT],
}

impl Board {
    /// Creates the identity layout: every tile on its own slice position.
    pub fn new() -> Self {
        Self {
            tiles: std::array::from_fn(|idx| Tile::new(TileId(idx as u8))),
        }
    }

    pub fn tiles(&self) -> &[Tile; TILE_COUNT] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> &Tile {
        &self.tiles[id.index()]
    }

    /// Returns the tile occupying `position`, if the position is on the grid.
    pub fn tile_at(&self, position: u8) -> Option<&Tile> {
        self.tiles
            .iter()
            .find(|tile| tile.current_position == position)
    }

    /// Exchanges the grid positions of two tiles.
    pub fn swap(&mut self, a: TileId, b: TileId) {
        let pa = self.tiles[a.index()].current_position;
        let pb = self.tiles[b.index()].current_position;
        self.tiles[a.index()].current_position = pb;
        self.tiles[b.index()].current_position = pa;
    }

    /// Assigns a fresh uniformly random layout.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let positions = shuffled_positions(rng);
        for (tile, position) in self.tiles.iter_mut().zip(positions) {
            tile.current_position = position;
        }
        debug_assert!(self.is_permutation());
    }

    /// Position -> 1-based tile number.
    pub fn arrangement(&self) -> [u8; TILE_COUNT] {
        let mut out = [0u8; TILE_COUNT];
        for tile in &self.tiles {
            out[tile.current_position as usize] = tile.id.get() + 1;
        }
        out
    }

    pub fn matches_target(&self) -> bool {
        self.arrangement() == TARGET_ARRANGEMENT
    }

    /// `true` when the current positions cover every cell exactly once.
    pub fn is_permutation(&self) -> bool {
        let mut seen = 0u16;
        for tile in &self.tiles {
            let position = tile.current_position as usize;
            if position >= TILE_COUNT || seen & (1 << position) != 0 {
                return false;
            }
            seen |= 1 << position;
        }
        true
    }

    /// Builds a board from the position of each tile, in id order.
    /// Returns `None` unless `positions` is a permutation of `0..9`.
    pub fn from_positions(positions: [u8; TILE_COUNT]) -> Option<Self> {
        let mut board = Self::new();
        for (tile, position) in board.tiles.iter_mut().zip(positions) {
            tile.current_position = position;
        }
        board.is_permutation().then_some(board)
    }

    /// Builds a board from a position -> 1-based tile number layout.
    pub fn from_arrangement(arrangement: [u8; TILE_COUNT]) -> Option<Self> {
        let mut positions = [u8::MAX; TILE_COUNT];
        for (position, &number) in arrangement.iter().enumerate() {
            let idx = (number as usize).checked_sub(1)?;
            *positions.get_mut(idx)? = position as u8;
        }
        Self::from_positions(positions)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Fisher-Yates over `0..9`, walking `i` from the last index down to 1.
pub fn shuffled_positions<R: Rng + ?Sized>(rng: &mut R) -> [u8; TILE_COUNT] {
    let mut positions: [u8; TILE_COUNT] = std::array::from_fn(|idx| idx as u8);
    for i in (1..TILE_COUNT).rev() {
        let j = rng.gen_range(0..=i);
        positions.swap(i, j);
    }
    positions
}

pub fn pos_to_row_col(pos: u8) -> (u8, u8) {
    (pos / GRID_WIDTH as u8, pos % GRID_WIDTH as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn id(raw: u8) -> TileId {
        TileId::new(raw).unwrap()
    }

    fn positions(board: &Board) -> Vec<u8> {
        board.tiles().iter().map(|t| t.current_position).collect()
    }

    #[test]
    fn t01_new_board_is_identity_and_not_the_target() {
        let board = Board::new();

        for tile in board.tiles() {
            assert_eq!(tile.current_position, tile.id.get());
            assert_eq!(tile.correct_position, tile.id.get());
        }
        assert_eq!(board.arrangement(), [1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert!(!board.matches_target());
    }

    #[test]
    fn tile_id_rejects_out_of_range() {
        assert!(TileId::new(8).is_some());
        assert!(TileId::new(9).is_none());
        assert!(TileId::new(255).is_none());
    }

    #[test]
    fn swap_exchanges_exactly_two_positions() {
        let mut board = Board::new();

        board.swap(id(2), id(7));

        assert_eq!(positions(&board), vec![0, 1, 7, 3, 4, 5, 6, 2, 8]);
        assert_eq!(board.tile_at(7).map(|t| t.id), Some(id(2)));
    }

    #[test]
    fn random_swap_sequences_keep_positions_a_permutation() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut board = Board::new();

        for _ in 0..5_000 {
            let a = id(rng.gen_range(0..TILE_COUNT as u8));
            let b = id(rng.gen_range(0..TILE_COUNT as u8));
            board.swap(a, b);
            assert!(board.is_permutation());
        }

        let mut sorted = positions(&board);
        sorted.sort_unstable();
        assert_eq!(sorted, (0..TILE_COUNT as u8).collect::<Vec<_>>());
    }

    #[test]
    fn shuffle_assigns_positions_in_creation_order() {
        let mut expected_rng = ChaCha8Rng::seed_from_u64(42);
        let expected = shuffled_positions(&mut expected_rng);

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut board = Board::new();
        board.shuffle(&mut rng);

        assert_eq!(positions(&board), expected.to_vec());
        assert!(board.is_permutation());
    }

    #[test]
    fn shuffle_is_close_to_uniform_per_tile_and_position() {
        const ROUNDS: usize = 90_000;
        let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
        let mut counts = [[0usize; TILE_COUNT]; TILE_COUNT];

        for _ in 0..ROUNDS {
            let perm = shuffled_positions(&mut rng);
            for (tile, &position) in perm.iter().enumerate() {
                counts[tile][position as usize] += 1;
            }
        }

        // Expected 10_000 per cell, standard deviation about 94.
        let expected = ROUNDS / TILE_COUNT;
        for row in counts {
            for count in row {
                assert!(count.abs_diff(expected) < 600, "count {count} too far from {expected}");
            }
        }
    }

    #[test]
    fn shuffle_reaches_many_distinct_permutations() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..2_000 {
            seen.insert(shuffled_positions(&mut rng));
        }

        // 2000 draws from 362_880 outcomes collide only a handful of times.
        assert!(seen.len() > 1_980, "only {} distinct permutations", seen.len());
    }

    #[test]
    fn target_matches_only_the_exact_arrangement() {
        let solved = Board::from_arrangement(TARGET_ARRANGEMENT).unwrap();
        assert!(solved.matches_target());
        assert_eq!(solved.arrangement(), TARGET_ARRANGEMENT);

        for a in 0..TILE_COUNT as u8 {
            for b in (a + 1)..TILE_COUNT as u8 {
                let mut board = solved.clone();
                board.swap(id(a), id(b));
                assert!(!board.matches_target(), "swap {a}<->{b} still matched");
            }
        }
    }

    #[test]
    fn from_positions_rejects_duplicates() {
        assert!(Board::from_positions([0, 0, 2, 3, 4, 5, 6, 7, 8]).is_none());
        assert!(Board::from_positions([0, 1, 2, 3, 4, 5, 6, 7, 9]).is_none());
        assert!(Board::from_arrangement([0, 2, 3, 7, 9, 8, 4, 6, 5]).is_none());
    }

    #[test]
    fn slice_follows_identity_while_cell_follows_position() {
        let mut board = Board::new();
        board.swap(id(0), id(8));

        let tile = board.tile(id(0));
        assert_eq!(tile.slice(), (0, 0));
        assert_eq!(tile.cell(), (2, 2));
    }
}
