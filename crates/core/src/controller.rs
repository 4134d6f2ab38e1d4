//! Board controller - the entry point the presentation layer talks to.
//!
//! The controller owns the board and the RNG and runs every player action as a
//! single transaction:
//!
//! ```text
//! Empty --new_game--> Stable --click(group > 1)--> [remove, refill, reindex,
//!                        ^                           shuffle, tiers] --+
//!                        +-----------------------------------------------+
//! ```
//!
//! A click on a singleton is a no-op. A click that fails (for example because
//! the shuffle bound is hit) leaves the previous board in place.

use std::collections::BTreeMap;

use crate::board::{Board, Cell};
use crate::config::GameConfig;
use crate::error::{BoardError, Result, SelectionFault};
use crate::rng::SimpleRng;
use crate::shuffle::Shuffler;
use crate::snapshot::{BoardSnapshot, ClickOutcome, ResolutionResult};
use crate::tiers::{TierAssigner, TierChange};
use crate::types::Coord;

/// Receives the controller's results as they are committed.
///
/// This is the presentation-layer hook: renderers, animators and journals
/// implement it and are handed to the controller at construction.
pub trait BoardObserver {
    fn new_game(&mut self, _snapshot: &BoardSnapshot) {}

    fn resolved(&mut self, _result: &ResolutionResult) {}
}

impl BoardObserver for () {}

impl<O: BoardObserver + ?Sized> BoardObserver for &mut O {
    fn new_game(&mut self, snapshot: &BoardSnapshot) {
        (**self).new_game(snapshot)
    }

    fn resolved(&mut self, result: &ResolutionResult) {
        (**self).resolved(result)
    }
}

impl<O: BoardObserver> BoardObserver for Option<O> {
    fn new_game(&mut self, snapshot: &BoardSnapshot) {
        if let Some(observer) = self {
            observer.new_game(snapshot);
        }
    }

    fn resolved(&mut self, result: &ResolutionResult) {
        if let Some(observer) = self {
            observer.resolved(result);
        }
    }
}

impl<O: BoardObserver + ?Sized> BoardObserver for Box<O> {
    fn new_game(&mut self, snapshot: &BoardSnapshot) {
        (**self).new_game(snapshot)
    }

    fn resolved(&mut self, result: &ResolutionResult) {
        (**self).resolved(result)
    }
}

/// Lifecycle of the controller between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No game has been started.
    Empty,
    /// A playable board is waiting for input.
    Stable,
}

/// Owns a board and applies player actions to it
#[derive(Debug)]
pub struct BoardController<O = ()> {
    config: GameConfig,
    board: Option<Board>,
    rng: SimpleRng,
    observer: O,
    /// Resolved clicks in the current game.
    moves: u32,
    /// Recolors performed in the current game, initial ones included.
    shuffles: u32,
}

impl BoardController<()> {
    /// Create a controller with no observer.
    pub fn new(seed: u32) -> Self {
        Self::with_observer(seed, ())
    }
}

impl<O: BoardObserver> BoardController<O> {
    pub fn with_observer(seed: u32, observer: O) -> Self {
        Self {
            config: GameConfig::default(),
            board: None,
            rng: SimpleRng::new(seed),
            observer,
            moves: 0,
            shuffles: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.board {
            Some(_) => Phase::Stable,
            None => Phase::Empty,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn shuffles(&self) -> u32 {
        self.shuffles
    }

    /// Start a new game: populate, resolve any deadlock, assign tiers.
    ///
    /// On error the previous game (if any) is kept.
    pub fn new_game(&mut self, config: GameConfig) -> Result<BoardSnapshot> {
        config.validate()?;
        let mut rng = self.rng.clone();
        let board = Board::populate(config.width, config.height, config.color_count, &mut rng)?;
        self.start(config, board, rng)
    }

    /// Start a new game with the current configuration.
    pub fn restart(&mut self) -> Result<BoardSnapshot> {
        self.new_game(self.config)
    }

    /// Start a game from a prepared board, keeping the configured thresholds
    /// and shuffle limit. A deadlocked board is reshuffled like a fresh one.
    pub fn load_board(&mut self, board: Board) -> Result<BoardSnapshot> {
        let config = GameConfig {
            width: board.width(),
            height: board.height(),
            color_count: board.color_count(),
            ..self.config
        };
        config.validate()?;
        let rng = self.rng.clone();
        self.start(config, board, rng)
    }

    fn start(
        &mut self,
        config: GameConfig,
        mut board: Board,
        mut rng: SimpleRng,
    ) -> Result<BoardSnapshot> {
        let shuffles = Shuffler::new(config.shuffle_limit).resolve(&mut board, &mut rng)?;
        TierAssigner::new(config.thresholds).reassign_all(&mut board);

        self.config = config;
        self.board = Some(board);
        self.rng = rng;
        self.moves = 0;
        self.shuffles = shuffles;

        let snapshot = self.current_state();
        self.observer.new_game(&snapshot);
        Ok(snapshot)
    }

    /// Handle a click on (column, row).
    ///
    /// Returns [`ClickOutcome::NoOp`] for a singleton group. Coordinates with
    /// no cell (including any click before the first game) are rejected with
    /// [`BoardError::InvalidSelection`].
    pub fn click(&mut self, column: u16, row: u16) -> Result<ClickOutcome> {
        let coord = Coord::new(column, row);
        let board = self
            .board
            .as_ref()
            .ok_or(BoardError::InvalidSelection(SelectionFault::Missing(coord)))?;

        let group = board.group_of(coord)?;
        if group.len() <= 1 {
            return Ok(ClickOutcome::NoOp);
        }

        let mut next = board.clone();
        let mut rng = self.rng.clone();
        let result = resolve_group(&self.config, &mut next, &mut rng, &group)?;

        self.board = Some(next);
        self.rng = rng;
        self.moves += 1;
        self.shuffles += result.shuffles;

        self.observer.resolved(&result);
        Ok(ClickOutcome::Resolved(result))
    }

    /// Snapshot of the current board; empty before the first game.
    pub fn current_state(&self) -> BoardSnapshot {
        match &self.board {
            Some(board) => BoardSnapshot::capture(board, self.config.thresholds),
            None => BoardSnapshot::default(),
        }
    }
}

/// Clear `group`, refill one cell per cleared cell, compact, then restore the
/// playable and tier invariants.
fn resolve_group(
    config: &GameConfig,
    board: &mut Board,
    rng: &mut SimpleRng,
    group: &[Coord],
) -> Result<ResolutionResult> {
    let removed = board.remove_group(group)?;

    // Replacements spawn above the stack (holes included) and fall on reindex.
    let mut spawned = Vec::with_capacity(removed.len());
    for coord in &removed {
        let color = rng.next_color(board.color_count());
        spawned.push(board.insert_at_top(coord.column, color)?.coord());
    }

    let mut columns: Vec<u16> = removed.iter().map(|c| c.column).collect();
    columns.dedup();

    let mut reindexed = BTreeMap::new();
    for column in columns {
        let moves = board.reindex_column(column)?;
        for coord in spawned.iter_mut().filter(|c| c.column == column) {
            if let Some(m) = moves.iter().find(|m| m.from == coord.row) {
                coord.row = m.to;
            }
        }
        if !moves.is_empty() {
            reindexed.insert(column, moves);
        }
    }

    // Tiers at post-cascade coordinates; new cells are still Default.
    // Deltas are taken against this, since a reshuffle resets every tier.
    let before: Vec<Cell> = board.cells().collect();

    let shuffles = Shuffler::new(config.shuffle_limit).resolve(board, rng)?;
    TierAssigner::new(config.thresholds).reassign_all(board);

    let inserted = spawned.iter().filter_map(|&c| board.get(c)).collect();
    let final_tiers: Vec<Cell> = board.cells().collect();
    let tier_changes = tier_delta(&before, &final_tiers);

    Ok(ResolutionResult {
        removed,
        inserted,
        reindexed,
        final_tiers,
        tier_changes,
        shuffles,
    })
}

/// Cells whose tier differs between two column-major listings of the same
/// occupancy.
fn tier_delta(before: &[Cell], after: &[Cell]) -> Vec<TierChange> {
    debug_assert_eq!(before.len(), after.len());
    before
        .iter()
        .zip(after)
        .filter(|(old, new)| old.tier != new.tier)
        .map(|(old, new)| {
            debug_assert_eq!(old.coord(), new.coord());
            TierChange {
                column: new.column,
                row: new.row,
                from: old.tier,
                to: new.tier,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Tier};

    #[derive(Default)]
    struct Recorder {
        games: usize,
        resolutions: Vec<usize>,
    }

    impl BoardObserver for Recorder {
        fn new_game(&mut self, _snapshot: &BoardSnapshot) {
            self.games += 1;
        }

        fn resolved(&mut self, result: &ResolutionResult) {
            self.resolutions.push(result.removed.len());
        }
    }

    fn col(colors: &[u8]) -> Vec<Color> {
        colors.iter().copied().map(Color::new).collect()
    }

    #[test]
    fn test_starts_empty() {
        let controller = BoardController::new(1);
        assert_eq!(controller.phase(), Phase::Empty);
        assert!(controller.current_state().is_empty());
    }

    #[test]
    fn test_click_before_new_game_is_rejected() {
        let mut controller = BoardController::new(1);
        assert_eq!(
            controller.click(0, 0),
            Err(BoardError::InvalidSelection(SelectionFault::Missing(
                Coord::new(0, 0)
            )))
        );
    }

    #[test]
    fn test_new_game_is_stable_and_playable() {
        let mut controller = BoardController::new(77);
        let snap = controller.new_game(GameConfig::default()).unwrap();
        assert_eq!(controller.phase(), Phase::Stable);
        assert_eq!(snap.cells.len(), 100);
        assert!(controller.board().unwrap().has_any_removable_group());
    }

    #[test]
    fn test_invalid_config_keeps_previous_game() {
        let mut controller = BoardController::new(5);
        let snap = controller.new_game(GameConfig::default()).unwrap();

        let bad = GameConfig {
            color_count: 0,
            ..GameConfig::default()
        };
        assert!(matches!(
            controller.new_game(bad),
            Err(BoardError::InvalidConfiguration(_))
        ));
        assert_eq!(controller.current_state(), snap);
    }

    #[test]
    fn test_single_cell_game_exhausts_shuffles() {
        let mut controller = BoardController::new(5);
        let config = GameConfig {
            width: 1,
            height: 1,
            shuffle_limit: 50,
            ..GameConfig::default()
        };
        assert_eq!(
            controller.new_game(config),
            Err(BoardError::ShuffleExhausted { attempts: 50 })
        );
        assert_eq!(controller.phase(), Phase::Empty);
    }

    #[test]
    fn test_click_resolves_and_refills() {
        let mut controller = BoardController::with_observer(9, Recorder::default());
        // 0 0 | 1
        // column 0 holds a pair of color 0, column 1 a single 1 under a 2.
        let board =
            Board::from_columns(3, vec![col(&[0, 0]), col(&[1, 2])]).unwrap();
        controller.load_board(board).unwrap();

        let outcome = controller.click(0, 1).unwrap();
        let result = outcome.resolution().unwrap();

        assert_eq!(result.removed, vec![Coord::new(0, 0), Coord::new(0, 1)]);
        assert_eq!(result.inserted.len(), 2);
        assert!(result.inserted.iter().all(|c| c.column == 0));
        let mut rows: Vec<u16> = result.inserted.iter().map(|c| c.row).collect();
        rows.sort();
        assert_eq!(rows, vec![0, 1]);

        // New cells fell from spawn rows 2 and 3.
        let moves = &result.reindexed[&0];
        assert_eq!(moves.len(), 2);
        assert_eq!((moves[0].from, moves[0].to), (2, 0));
        assert_eq!((moves[1].from, moves[1].to), (3, 1));

        let board = controller.board().unwrap();
        assert_eq!(board.len(), 4);
        assert!(board.has_any_removable_group());
        assert_eq!(result.final_tiers, board.cells().collect::<Vec<_>>());

        assert_eq!(controller.moves(), 1);
        assert_eq!(controller.observer().games, 1);
        assert_eq!(controller.observer().resolutions, vec![2]);
    }

    #[test]
    fn test_singleton_click_is_noop() {
        let mut controller = BoardController::with_observer(3, Recorder::default());
        let board =
            Board::from_columns(3, vec![col(&[0, 0]), col(&[1, 2])]).unwrap();
        controller.load_board(board).unwrap();
        let before = controller.current_state();

        assert_eq!(controller.click(1, 1).unwrap(), ClickOutcome::NoOp);
        assert_eq!(controller.current_state(), before);
        assert_eq!(controller.moves(), 0);
        assert!(controller.observer().resolutions.is_empty());
    }

    #[test]
    fn test_tiers_follow_group_size_after_load() {
        let mut controller = BoardController::new(1);
        let board = Board::from_columns(2, vec![col(&[0; 5]), col(&[1; 5])]).unwrap();
        let snap = controller.load_board(board).unwrap();
        assert!(snap.cells.iter().all(|c| c.tier == Tier::First));
    }
}
