//! Board module - manages the grid of colored cells
//!
//! The board is stored as one stack per column, bottom row first.
//! Coordinates: (column, row) where column ranges 0..width (left to right) and
//! row counts up from the bottom of the column.
//!
//! Removing cells leaves holes in their stacks until [`Board::reindex_column`]
//! compacts them, so callers can interleave removal, insertion and compaction.
//! New cells are always appended above the current stack, holes included.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result, SelectionFault};
use crate::rng::SimpleRng;
use crate::types::{Color, Coord, Tier};

/// A cell as seen from outside the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub column: u16,
    pub row: u16,
    pub color: Color,
    pub tier: Tier,
}

impl Cell {
    pub fn coord(&self) -> Coord {
        Coord::new(self.column, self.row)
    }
}

/// A cell moved from one row to another inside its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowMove {
    pub from: u16,
    pub to: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    color: Color,
    tier: Tier,
}

impl Slot {
    fn new(color: Color) -> Self {
        Self {
            color,
            tier: Tier::Default,
        }
    }

    fn into_cell(self, column: u16, row: u16) -> Cell {
        Cell {
            column,
            row,
            color: self.color,
            tier: self.tier,
        }
    }
}

/// The game board - `width` column stacks of optional cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u16,
    /// Visible rows. Stacks may temporarily grow past this while refilling.
    height: u16,
    color_count: u8,
    /// `columns[x][y]`, y = 0 is the bottom. `None` is a removed, not yet compacted cell.
    columns: Vec<Vec<Option<Slot>>>,
}

impl Board {
    /// Fill a `width` x `height` board with random colors.
    pub fn populate(width: u16, height: u16, color_count: u8, rng: &mut SimpleRng) -> Result<Self> {
        if width == 0 || height == 0 || color_count == 0 {
            return Err(BoardError::InvalidConfiguration(format!(
                "board needs positive dimensions and colors (got {}x{} with {} colors)",
                width, height, color_count
            )));
        }

        let mut columns: Vec<Vec<Option<Slot>>> = (0..width)
            .map(|_| Vec::with_capacity(height as usize))
            .collect();

        // Row by row, left to right: the order cells appear in a fresh game.
        for _ in 0..height {
            for stack in columns.iter_mut() {
                stack.push(Some(Slot::new(rng.next_color(color_count))));
            }
        }

        Ok(Self {
            width,
            height,
            color_count,
            columns,
        })
    }

    /// Build a board from explicit colors, one `Vec` per column, bottom row first.
    ///
    /// Columns may have different lengths; the visible height is the longest one.
    pub fn from_columns(color_count: u8, columns: Vec<Vec<Color>>) -> Result<Self> {
        if color_count == 0 {
            return Err(BoardError::InvalidConfiguration(
                "color count must be positive".into(),
            ));
        }
        let width = u16::try_from(columns.len())
            .map_err(|_| BoardError::InvalidConfiguration("too many columns".into()))?;
        let tallest = columns.iter().map(Vec::len).max().unwrap_or(0);
        if width == 0 || tallest == 0 {
            return Err(BoardError::InvalidConfiguration(
                "board must contain at least one cell".into(),
            ));
        }
        let height = u16::try_from(tallest)
            .map_err(|_| BoardError::InvalidConfiguration("column too tall".into()))?;

        let mut stacks = Vec::with_capacity(columns.len());
        for column in columns {
            let mut stack = Vec::with_capacity(column.len());
            for color in column {
                if color.index() >= color_count {
                    return Err(BoardError::InvalidColor {
                        color: color.index(),
                        color_count,
                    });
                }
                stack.push(Some(Slot::new(color)));
            }
            stacks.push(stack);
        }

        Ok(Self {
            width,
            height,
            color_count,
            columns: stacks,
        })
    }

    /// Get width of the board
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Get visible height of the board
    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn color_count(&self) -> u8 {
        self.color_count
    }

    /// Number of cells currently on the board.
    pub fn len(&self) -> usize {
        self.columns
            .iter()
            .map(|stack| stack.iter().filter(|slot| slot.is_some()).count())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stack length of a column, holes included.
    /// Returns None if the column is out of range.
    pub fn column_len(&self, column: u16) -> Option<usize> {
        self.columns.get(column as usize).map(Vec::len)
    }

    #[inline(always)]
    fn slot(&self, coord: Coord) -> Option<Slot> {
        self.columns
            .get(coord.column as usize)?
            .get(coord.row as usize)
            .copied()
            .flatten()
    }

    /// Get the cell at `coord`, if any.
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.slot(coord)
            .map(|slot| slot.into_cell(coord.column, coord.row))
    }

    /// All cells in column-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.columns.iter().enumerate().flat_map(|(x, stack)| {
            stack
                .iter()
                .enumerate()
                .filter_map(move |(y, slot)| slot.map(|s| s.into_cell(x as u16, y as u16)))
        })
    }

    /// Occupied orthogonal neighbors of `coord`. Diagonals are never adjacent.
    pub fn neighbors(&self, coord: Coord) -> ArrayVec<Coord, 4> {
        let Coord { column, row } = coord;
        let candidates = [
            row.checked_add(1).map(|r| Coord::new(column, r)),
            row.checked_sub(1).map(|r| Coord::new(column, r)),
            column.checked_sub(1).map(|c| Coord::new(c, row)),
            column.checked_add(1).map(|c| Coord::new(c, row)),
        ];

        let mut out = ArrayVec::new();
        for c in candidates.into_iter().flatten() {
            if self.slot(c).is_some() {
                out.push(c);
            }
        }
        out
    }

    /// Worklist flood fill from `start` over same-colored neighbors.
    ///
    /// Appends the component to `out` unless `start` was already visited.
    /// `visited` may be shared across calls so a full scan touches each cell once.
    fn flood(
        &self,
        start: Coord,
        visited: &mut Visited,
        stack: &mut Vec<Coord>,
        out: &mut Vec<Coord>,
    ) {
        let Some(color) = self.slot(start).map(|s| s.color) else {
            return;
        };
        if !visited.insert(start) {
            return;
        }

        stack.clear();
        stack.push(start);
        while let Some(c) = stack.pop() {
            out.push(c);
            for n in self.neighbors(c) {
                if self.slot(n).map(|s| s.color) == Some(color) && visited.insert(n) {
                    stack.push(n);
                }
            }
        }
    }

    /// The maximal same-color group containing `coord`, sorted column-major.
    pub fn group_of(&self, coord: Coord) -> Result<Vec<Coord>> {
        if self.slot(coord).is_none() {
            return Err(BoardError::InvalidSelection(SelectionFault::Missing(coord)));
        }
        let mut visited = Visited::new(self);
        let mut group = Vec::new();
        self.flood(coord, &mut visited, &mut Vec::new(), &mut group);
        group.sort_unstable();
        Ok(group)
    }

    /// Partition every cell into its group.
    ///
    /// Groups appear in column-major order of their lowest member.
    pub fn groups(&self) -> Vec<Vec<Coord>> {
        let mut visited = Visited::new(self);
        let mut stack = Vec::new();
        let mut groups = Vec::new();

        for cell in self.cells() {
            let mut group = Vec::new();
            self.flood(cell.coord(), &mut visited, &mut stack, &mut group);
            if !group.is_empty() {
                group.sort_unstable();
                groups.push(group);
            }
        }
        groups
    }

    /// True if some group has more than one cell (the board is playable).
    pub fn has_any_removable_group(&self) -> bool {
        let mut visited = Visited::new(self);
        let mut stack = Vec::new();
        let mut group = Vec::new();

        for cell in self.cells() {
            group.clear();
            self.flood(cell.coord(), &mut visited, &mut stack, &mut group);
            if group.len() > 1 {
                return true;
            }
        }
        false
    }

    /// True if every group is a singleton.
    pub fn is_deadlocked(&self) -> bool {
        !self.has_any_removable_group()
    }

    /// Delete the given cells, leaving holes in their columns.
    ///
    /// The whole selection is validated before anything is removed.
    /// Returns the emptied coordinates in column-major order.
    pub fn remove_group(&mut self, cells: &[Coord]) -> Result<Vec<Coord>> {
        if cells.is_empty() {
            return Err(BoardError::InvalidSelection(SelectionFault::Empty));
        }

        let mut sorted = cells.to_vec();
        sorted.sort_unstable();
        if let Some(pair) = sorted.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(BoardError::InvalidSelection(SelectionFault::Duplicate(
                pair[0],
            )));
        }
        if let Some(&missing) = sorted.iter().find(|&&c| self.slot(c).is_none()) {
            return Err(BoardError::InvalidSelection(SelectionFault::Missing(
                missing,
            )));
        }

        for c in &sorted {
            self.columns[c.column as usize][c.row as usize] = None;
        }
        Ok(sorted)
    }

    /// Compact a column so its rows run 0.. without holes, keeping vertical order.
    ///
    /// Returns the moves of cells whose row changed, bottom to top.
    pub fn reindex_column(&mut self, column: u16) -> Result<Vec<RowMove>> {
        let width = self.width;
        let stack = self
            .columns
            .get_mut(column as usize)
            .ok_or(BoardError::InvalidColumn { column, width })?;

        let mut moves = Vec::new();
        let mut write = 0usize;
        for read in 0..stack.len() {
            if let Some(slot) = stack[read] {
                if read != write {
                    stack[write] = Some(slot);
                    moves.push(RowMove {
                        from: read as u16,
                        to: write as u16,
                    });
                }
                write += 1;
            }
        }
        stack.truncate(write);
        Ok(moves)
    }

    /// Append a new cell on top of a column's stack.
    pub fn insert_at_top(&mut self, column: u16, color: Color) -> Result<Cell> {
        if color.index() >= self.color_count {
            return Err(BoardError::InvalidColor {
                color: color.index(),
                color_count: self.color_count,
            });
        }
        let width = self.width;
        let stack = self
            .columns
            .get_mut(column as usize)
            .ok_or(BoardError::InvalidColumn { column, width })?;
        let row = u16::try_from(stack.len()).map_err(|_| {
            BoardError::InvalidConfiguration(format!("column {} is full", column))
        })?;

        let slot = Slot::new(color);
        stack.push(Some(slot));
        Ok(slot.into_cell(column, row))
    }

    /// Give every cell a fresh random color and reset its tier.
    pub fn recolor_all(&mut self, rng: &mut SimpleRng) {
        let color_count = self.color_count;
        for slot in self.columns.iter_mut().flatten().flatten() {
            *slot = Slot::new(rng.next_color(color_count));
        }
    }

    /// Overwrite the tier of the cell at `coord`.
    /// Returns the previous tier, or None if there is no cell.
    pub(crate) fn set_tier(&mut self, coord: Coord, tier: Tier) -> Option<Tier> {
        let slot = self
            .columns
            .get_mut(coord.column as usize)?
            .get_mut(coord.row as usize)?
            .as_mut()?;
        Some(std::mem::replace(&mut slot.tier, tier))
    }
}

/// Visited bitmap laid out column after column.
struct Visited {
    offsets: Vec<usize>,
    seen: Vec<bool>,
}

impl Visited {
    fn new(board: &Board) -> Self {
        let mut offsets = Vec::with_capacity(board.columns.len());
        let mut total = 0usize;
        for stack in &board.columns {
            offsets.push(total);
            total += stack.len();
        }
        Self {
            offsets,
            seen: vec![false; total],
        }
    }

    /// Mark `coord` as visited. Returns false if it already was.
    /// `coord` must name a slot inside the board.
    #[inline(always)]
    fn insert(&mut self, coord: Coord) -> bool {
        let idx = self.offsets[coord.column as usize] + coord.row as usize;
        !std::mem::replace(&mut self.seen[idx], true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(i: u8) -> Color {
        Color::new(i)
    }

    #[test]
    fn test_populate_fills_every_slot() {
        let mut rng = SimpleRng::new(42);
        let board = Board::populate(4, 3, 5, &mut rng).unwrap();
        assert_eq!(board.len(), 12);
        for x in 0..4 {
            assert_eq!(board.column_len(x), Some(3));
        }
        assert!(board.cells().all(|cell| cell.color.index() < 5));
        assert!(board.cells().all(|cell| cell.tier == Tier::Default));
    }

    #[test]
    fn test_populate_rejects_zero_dimensions() {
        let mut rng = SimpleRng::new(1);
        for (w, h, n) in [(0, 3, 3), (3, 0, 3), (3, 3, 0)] {
            assert!(matches!(
                Board::populate(w, h, n, &mut rng),
                Err(BoardError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_neighbors_exclude_diagonals() {
        let board = Board::from_columns(
            2,
            vec![vec![c(0), c(0), c(0)], vec![c(0), c(0), c(0)], vec![c(0), c(0), c(0)]],
        )
        .unwrap();
        let mut n: Vec<Coord> = board.neighbors(Coord::new(1, 1)).into_iter().collect();
        n.sort();
        assert_eq!(
            n,
            vec![
                Coord::new(0, 1),
                Coord::new(1, 0),
                Coord::new(1, 2),
                Coord::new(2, 1)
            ]
        );
        assert_eq!(board.neighbors(Coord::new(0, 0)).len(), 2);
    }

    #[test]
    fn test_diagonal_same_color_is_not_a_group() {
        // 0 1
        // 1 0   (top row printed first)
        let board = Board::from_columns(2, vec![vec![c(1), c(0)], vec![c(0), c(1)]]).unwrap();
        assert_eq!(board.group_of(Coord::new(0, 0)).unwrap().len(), 1);
        assert!(board.is_deadlocked());
    }

    #[test]
    fn test_flood_handles_cycles() {
        // A ring of color 0 around a color 1 center.
        let board = Board::from_columns(
            2,
            vec![vec![c(0), c(0), c(0)], vec![c(0), c(1), c(0)], vec![c(0), c(0), c(0)]],
        )
        .unwrap();
        let group = board.group_of(Coord::new(0, 0)).unwrap();
        assert_eq!(group.len(), 8);
        assert!(!group.contains(&Coord::new(1, 1)));
    }

    #[test]
    fn test_group_of_missing_cell() {
        let board = Board::from_columns(1, vec![vec![c(0)]]).unwrap();
        assert_eq!(
            board.group_of(Coord::new(0, 1)),
            Err(BoardError::InvalidSelection(SelectionFault::Missing(
                Coord::new(0, 1)
            )))
        );
    }

    #[test]
    fn test_remove_validates_before_mutating() {
        let mut board = Board::from_columns(2, vec![vec![c(0), c(0)], vec![c(1)]]).unwrap();
        let before = board.clone();

        let err = board
            .remove_group(&[Coord::new(0, 0), Coord::new(1, 1)])
            .unwrap_err();
        assert_eq!(
            err,
            BoardError::InvalidSelection(SelectionFault::Missing(Coord::new(1, 1)))
        );
        assert_eq!(board, before);

        let err = board
            .remove_group(&[Coord::new(0, 0), Coord::new(0, 0)])
            .unwrap_err();
        assert_eq!(
            err,
            BoardError::InvalidSelection(SelectionFault::Duplicate(Coord::new(0, 0)))
        );
        assert_eq!(board, before);

        assert_eq!(
            board.remove_group(&[]),
            Err(BoardError::InvalidSelection(SelectionFault::Empty))
        );
    }

    #[test]
    fn test_removed_cells_leave_holes_until_reindexed() {
        let mut board =
            Board::from_columns(3, vec![vec![c(0), c(1), c(2), c(1)]]).unwrap();
        board
            .remove_group(&[Coord::new(0, 0), Coord::new(0, 2)])
            .unwrap();
        assert_eq!(board.column_len(0), Some(4));
        assert_eq!(board.len(), 2);
        assert!(board.get(Coord::new(0, 0)).is_none());

        let moves = board.reindex_column(0).unwrap();
        assert_eq!(
            moves,
            vec![RowMove { from: 1, to: 0 }, RowMove { from: 3, to: 1 }]
        );
        assert_eq!(board.column_len(0), Some(2));
        assert_eq!(board.get(Coord::new(0, 0)).unwrap().color, c(1));
        assert_eq!(board.get(Coord::new(0, 1)).unwrap().color, c(1));
    }

    #[test]
    fn test_insert_lands_above_holes() {
        let mut board = Board::from_columns(3, vec![vec![c(0), c(1)]]).unwrap();
        board.remove_group(&[Coord::new(0, 0)]).unwrap();

        let cell = board.insert_at_top(0, c(2)).unwrap();
        assert_eq!(cell.coord(), Coord::new(0, 2));

        let moves = board.reindex_column(0).unwrap();
        assert_eq!(
            moves,
            vec![RowMove { from: 1, to: 0 }, RowMove { from: 2, to: 1 }]
        );
        assert_eq!(board.get(Coord::new(0, 1)).unwrap().color, c(2));
    }

    #[test]
    fn test_insert_rejects_bad_column_and_color() {
        let mut board = Board::from_columns(2, vec![vec![c(0)]]).unwrap();
        assert_eq!(
            board.insert_at_top(1, c(0)),
            Err(BoardError::InvalidColumn {
                column: 1,
                width: 1
            })
        );
        assert_eq!(
            board.insert_at_top(0, c(2)),
            Err(BoardError::InvalidColor {
                color: 2,
                color_count: 2
            })
        );
    }

    #[test]
    fn test_recolor_resets_tiers() {
        let mut board = Board::from_columns(4, vec![vec![c(0), c(0)]]).unwrap();
        board.set_tier(Coord::new(0, 0), Tier::Third);
        board.recolor_all(&mut SimpleRng::new(5));
        assert!(board.cells().all(|cell| cell.tier == Tier::Default));
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_from_columns_rejects_out_of_range_color() {
        assert_eq!(
            Board::from_columns(2, vec![vec![c(0), c(3)]]),
            Err(BoardError::InvalidColor {
                color: 3,
                color_count: 2
            })
        );
        assert!(matches!(
            Board::from_columns(2, vec![vec![], vec![]]),
            Err(BoardError::InvalidConfiguration(_))
        ));
    }
}
