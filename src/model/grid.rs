use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use super::{Cell, GridSize};
use crate::error::{GameError, Result};

/// Result of revealing a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellReveal {
    pub already_revealed: bool,
    pub has_bomb: bool,
}

/// Square field of cells hiding exactly one bomb. Cells are stored row-major.
#[derive(Clone, PartialEq)]
pub struct Grid {
    size: GridSize,
    cells: Vec<Cell>,
    bomb: (usize, usize),
    seed: Option<u64>,
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        for row in self.rows() {
            writeln!(f, "{}", row.iter().map(Cell::to_char).join(""))?;
        }
        Ok(())
    }
}

impl Grid {
    /// Builds a grid with the bomb placed from `seed`, or from fresh entropy when no seed is given.
    pub fn new(size: GridSize, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().next_u64());
        let mut rng = StdRng::seed_from_u64(seed);
        let mut grid = Self::generate(size, &mut rng);
        grid.seed = Some(seed);
        grid
    }

    /// Places the bomb uniformly at random using the supplied source.
    pub fn generate<R: Rng>(size: GridSize, rng: &mut R) -> Self {
        let bomb_row = rng.random_range(0..size.get());
        let bomb_col = rng.random_range(0..size.get());
        Self::build(size, (bomb_row, bomb_col))
    }

    pub fn with_bomb_at(size: GridSize, (row, col): (usize, usize)) -> Result<Self> {
        let n = size.get();
        if row >= n || col >= n {
            return Err(GameError::OutOfRangeAccess { row, col, size: n });
        }
        Ok(Self::build(size, (row, col)))
    }

    fn build(size: GridSize, bomb: (usize, usize)) -> Self {
        let n = size.get();
        let cells = (0..n)
            .cartesian_product(0..n)
            .map(|(row, col)| Cell::new(row, col, (row, col) == bomb))
            .collect();
        Self {
            size,
            cells,
            bomb,
            seed: None,
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Seed the bomb position was drawn from, if the grid was built by `Grid::new`.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn bomb_position(&self) -> (usize, usize) {
        self.bomb
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<&Cell> {
        let index = self.index_of(row, col)?;
        Ok(&self.cells[index])
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.get())
    }

    pub fn revealed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_revealed()).count()
    }

    pub fn reveal(&mut self, row: usize, col: usize) -> Result<CellReveal> {
        let index = self.index_of(row, col)?;
        let cell = &mut self.cells[index];
        let already_revealed = !cell.reveal();
        Ok(CellReveal {
            already_revealed,
            has_bomb: cell.has_bomb,
        })
    }

    fn index_of(&self, row: usize, col: usize) -> Result<usize> {
        let n = self.size.get();
        if row < n && col < n {
            Ok(row * n + col)
        } else {
            Err(GameError::OutOfRangeAccess { row, col, size: n })
        }
    }

    #[cfg(test)]
    /// Parse a grid from rows of `.` (hidden), `o` (revealed), `B` (bomb) and `X` (revealed bomb).
    pub fn parse(input: &str) -> Self {
        let rows: Vec<&str> = input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let size = GridSize::new(rows.len()).unwrap();
        let mut bomb = None;
        let mut revealed = vec![];
        for (row, line) in rows.iter().enumerate() {
            assert_eq!(line.chars().count(), size.get(), "row {} has wrong width", row);
            for (col, c) in line.chars().enumerate() {
                match c {
                    '.' => {}
                    'o' => revealed.push((row, col)),
                    'B' | 'X' => {
                        assert!(bomb.is_none(), "grid must hold exactly one bomb");
                        bomb = Some((row, col));
                        if c == 'X' {
                            revealed.push((row, col));
                        }
                    }
                    other => panic!("unexpected grid character {:?}", other),
                }
            }
        }
        let mut grid = Self::build(size, bomb.expect("grid must hold exactly one bomb"));
        for (row, col) in revealed {
            grid.reveal(row, col).unwrap();
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MAX_GRID_SIZE, MIN_GRID_SIZE};

    fn size(n: usize) -> GridSize {
        GridSize::new(n).unwrap()
    }

    #[test]
    fn test_every_size_has_exactly_one_bomb() {
        for n in MIN_GRID_SIZE..=MAX_GRID_SIZE {
            let grid = Grid::new(size(n), None);
            let bombs = grid.cells().filter(|cell| cell.has_bomb).count();
            let safe = grid.cells().filter(|cell| !cell.has_bomb).count();
            assert_eq!(bombs, 1, "size {}", n);
            assert_eq!(safe, n * n - 1, "size {}", n);
            assert_eq!(grid.revealed_count(), 0);
        }
    }

    #[test]
    fn test_same_seed_places_bomb_identically() {
        let first = Grid::new(size(10), Some(42));
        let second = Grid::new(size(10), Some(42));
        assert_eq!(first.bomb_position(), second.bomb_position());
        assert_eq!(first.seed(), Some(42));
    }

    #[test]
    fn test_injected_rng_controls_placement() {
        let mut rng = StdRng::seed_from_u64(7);
        let expected = (rng.random_range(0..4), rng.random_range(0..4));

        let mut rng = StdRng::seed_from_u64(7);
        let grid = Grid::generate(size(4), &mut rng);

        assert_eq!(grid.bomb_position(), expected);
        assert!(grid.cell(expected.0, expected.1).unwrap().has_bomb);
        assert_eq!(grid.seed(), None);
    }

    #[test]
    fn test_bomb_lands_on_every_cell_eventually() {
        let mut seen = std::collections::HashSet::new();
        for seed in 0..500 {
            seen.insert(Grid::new(size(3), Some(seed)).bomb_position());
        }
        assert_eq!(seen.len(), 9);
    }

    #[test]
    fn test_cells_know_their_coordinates() {
        let grid = Grid::with_bomb_at(size(4), (2, 3)).unwrap();
        for cell in grid.cells() {
            assert_eq!(grid.cell(cell.row, cell.col).unwrap(), cell);
            assert_eq!(cell.has_bomb, (cell.row, cell.col) == (2, 3));
        }
    }

    #[test]
    fn test_reveal_safe_cell_then_again() {
        let mut grid = Grid::with_bomb_at(size(3), (1, 1)).unwrap();

        let first = grid.reveal(0, 0).unwrap();
        assert_eq!(
            first,
            CellReveal {
                already_revealed: false,
                has_bomb: false
            }
        );
        assert!(grid.cell(0, 0).unwrap().is_revealed());

        let second = grid.reveal(0, 0).unwrap();
        assert!(second.already_revealed);
        assert!(!second.has_bomb);
        assert_eq!(grid.revealed_count(), 1);
    }

    #[test]
    fn test_reveal_bomb_reports_it() {
        let mut grid = Grid::with_bomb_at(size(3), (1, 1)).unwrap();
        let reveal = grid.reveal(1, 1).unwrap();
        assert!(reveal.has_bomb);
        assert!(!reveal.already_revealed);
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let mut grid = Grid::with_bomb_at(size(3), (0, 0)).unwrap();
        assert!(matches!(
            grid.reveal(3, 0),
            Err(GameError::OutOfRangeAccess {
                row: 3,
                col: 0,
                size: 3
            })
        ));
        assert!(grid.cell(0, 5).is_err());
        assert!(Grid::with_bomb_at(size(3), (0, 3)).is_err());
        assert_eq!(grid.revealed_count(), 0);
    }

    #[test]
    fn test_parse_and_debug_round_trip() {
        let input = "\
            o..
            .B.
            ..o";
        let grid = Grid::parse(input);

        assert_eq!(grid.bomb_position(), (1, 1));
        assert_eq!(grid.revealed_count(), 2);
        assert_eq!(format!("{:?}", grid), "\no..\n.B.\n..o\n");
    }
}
