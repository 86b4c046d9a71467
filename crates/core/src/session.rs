//! Game session module - owns and drives the complete game state
//!
//! This module ties together the board, pieces, piece queue and scoring. It
//! exposes the command API (start, pause, move, rotate, drop, hold), advances
//! gravity from `tick`, and raises [`GameEvent`]s whenever observable state
//! changes. Commands other than `start`, `pause` and `resume` are silent no-ops
//! unless the session is `Playing`.

use std::fmt;

use log::{debug, info, trace};

use crate::board::Board;
use crate::config::{ConfigError, GameConfig};
use crate::piece::{try_rotate, Piece};
use crate::rng::PieceQueue;
use crate::scoring::{fall_interval_ms, hard_drop_score, level_for_lines, line_clear_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{CellValue, GameCommand, GameEvent, PieceKind, SessionState};

type Subscriber = Box<dyn FnMut(GameEvent)>;

/// Complete game state
pub struct GameSession {
    config: GameConfig,
    board: Board,
    active: Option<Piece>,
    hold: Option<PieceKind>,
    /// Set by a hold swap, cleared when a piece spawns after a lock
    hold_used: bool,
    queue: PieceQueue,
    state: SessionState,
    score: u32,
    level: u32,
    lines: u32,
    fall_timer_ms: u32,
    fall_interval_ms: u32,
    /// Undrained events; consecutive `BoardUpdated`s collapse into one
    pending: Vec<GameEvent>,
    subscribers: Vec<Subscriber>,
}

impl GameSession {
    /// Create a session after validating `config`
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    /// Create a session on the default 10x20 board with the given RNG seed
    pub fn with_seed(seed: u32) -> Self {
        Self::from_valid(GameConfig::default().with_seed(seed))
    }

    fn from_valid(config: GameConfig) -> Self {
        Self {
            board: Board::new(config.width, config.height),
            active: None,
            hold: None,
            hold_used: false,
            queue: PieceQueue::new(config.seed),
            state: SessionState::PreGame,
            score: 0,
            level: 1,
            lines: 0,
            fall_timer_ms: 0,
            fall_interval_ms: fall_interval_ms(1),
            pending: Vec::new(),
            subscribers: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    /// Whether a hold command would currently be accepted
    pub fn can_hold(&self) -> bool {
        self.state.is_playing() && !self.hold_used
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    /// Up to `n` upcoming piece kinds, in spawn order
    pub fn next_queue(&self, n: usize) -> Vec<PieceKind> {
        self.queue.peek_n(n)
    }

    /// Upcoming pieces, as many as the configured preview length
    pub fn next_preview(&self) -> Vec<PieceKind> {
        self.queue.peek_n(self.config.preview_len)
    }

    /// Row the active piece's anchor would land on after a hard drop
    pub fn ghost_y(&self) -> Option<i32> {
        self.active.map(|piece| self.landing(piece).y)
    }

    /// Board with the active piece overlaid, as an owned copy
    pub fn rendered_board(&self) -> Vec<Vec<CellValue>> {
        let mut rows = Vec::with_capacity(self.board.height());
        self.rendered_board_into(&mut rows);
        rows
    }

    /// Write the rendered board into `out`, reusing its allocations
    pub fn rendered_board_into(&self, out: &mut Vec<Vec<CellValue>>) {
        self.board.write_rows(out);

        let Some(active) = self.active else {
            return;
        };
        for (x, y) in active.cells() {
            if x < 0 || y < 0 {
                continue;
            }
            if let Some(cell) = out
                .get_mut(y as usize)
                .and_then(|row| row.get_mut(x as usize))
            {
                *cell = CellValue::Active;
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.rendered_board_into(&mut out.board);
        self.queue.peek_into(self.config.preview_len, &mut out.next_queue);

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.hold = self.hold;
        out.can_hold = self.can_hold();
        out.state = self.state;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.fall_interval_ms = self.fall_interval_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Register a callback invoked synchronously for every raised event
    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnMut(GameEvent) + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Drain events raised since the last call.
    ///
    /// Back-to-back `BoardUpdated` events that were never drained are reported
    /// once; subscribers still see every one of them.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }

    fn emit(&mut self, event: GameEvent) {
        for subscriber in &mut self.subscribers {
            subscriber(event);
        }
        if event == GameEvent::BoardUpdated && self.pending.last() == Some(&event) {
            return;
        }
        self.pending.push(event);
    }

    /// Raise `BoardUpdated`, unless the game just ended (that raised `GameOver`)
    fn notify(&mut self) {
        if self.state == SessionState::GameOver {
            return;
        }
        self.emit(GameEvent::BoardUpdated);
        trace!("board updated\n{}", self.snapshot());
    }

    fn end_game(&mut self) {
        if self.state == SessionState::GameOver {
            return;
        }
        self.state = SessionState::GameOver;
        info!(
            "game over: score={} level={} lines={}",
            self.score, self.level, self.lines
        );
        self.emit(GameEvent::GameOver);
    }

    /// Reset board, stats, hold and queue, then spawn the first piece
    pub fn start(&mut self) {
        self.board.clear();
        self.active = None;
        self.hold = None;
        self.hold_used = false;
        self.queue.reset();
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.fall_timer_ms = 0;
        self.fall_interval_ms = fall_interval_ms(self.level);
        self.state = SessionState::Playing;

        info!(
            "game started on {}x{} board (seed {})",
            self.board.width(),
            self.board.height(),
            self.queue.seed()
        );

        self.spawn_next();
        self.notify();
    }

    pub fn pause(&mut self) -> bool {
        if self.state != SessionState::Playing {
            return false;
        }
        self.state = SessionState::Paused;
        self.notify();
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state != SessionState::Paused {
            return false;
        }
        self.state = SessionState::Playing;
        self.notify();
        true
    }

    /// Advance the fall timer; performs one [`step`](Self::step) per elapsed interval.
    ///
    /// Returns true when a step ran.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.state.is_playing() {
            return false;
        }

        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        if self.fall_timer_ms < self.fall_interval_ms {
            return false;
        }
        self.fall_timer_ms = 0;
        self.step()
    }

    /// Shift the active piece one column (`dir` < 0 left, > 0 right)
    pub fn move_horizontal(&mut self, dir: i32) -> bool {
        if !self.state.is_playing() || dir == 0 {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.moved(dir.signum(), 0);
        if !moved.is_valid(&self.board) {
            return false;
        }
        self.active = Some(moved);
        self.notify();
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.move_horizontal(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.move_horizontal(1)
    }

    /// Rotate the active piece, kicking one column right or left if needed
    pub fn rotate(&mut self, clockwise: bool) -> bool {
        if !self.state.is_playing() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let board = &self.board;
        let Some(rotated) = try_rotate(&active, clockwise, |shape, x, y| {
            board.is_valid_position(shape, x, y)
        }) else {
            return false;
        };

        self.active = Some(rotated);
        self.notify();
        true
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.rotate(true)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.rotate(false)
    }

    /// Move the active piece down one row, locking it when it cannot move.
    ///
    /// A piece that cannot move while still poking above the ceiling ends the game.
    pub fn step(&mut self) -> bool {
        if !self.state.is_playing() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let down = active.moved(0, 1);
        if down.is_valid(&self.board) {
            self.active = Some(down);
        } else if !active.is_fully_visible() {
            self.end_game();
            return true;
        } else {
            self.lock_and_spawn(active, 0);
        }

        self.notify();
        true
    }

    /// Manual one-row drop
    pub fn soft_drop(&mut self) -> bool {
        self.step()
    }

    /// Drop the active piece as far as it goes and lock it, scoring 2 points per row
    pub fn hard_drop(&mut self) -> bool {
        if !self.state.is_playing() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let landed = self.landing(active);
        let rows = (landed.y - active.y) as u32;
        self.active = Some(landed);

        if !landed.is_fully_visible() {
            self.end_game();
            return true;
        }

        self.lock_and_spawn(landed, rows);
        self.notify();
        true
    }

    /// Store the active piece, or swap it with the held one.
    ///
    /// Storing into an empty slot spawns the next queued piece and leaves hold
    /// available; a swap uses it up until the next piece locks.
    pub fn hold(&mut self) -> bool {
        if !self.state.is_playing() || self.hold_used {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        match self.hold.replace(active.kind) {
            None => {
                self.spawn_next();
            }
            Some(held) => {
                debug!("hold swap: {:?} <-> {:?}", active.kind, held);
                self.hold_used = true;
                self.spawn_kind(held);
            }
        }

        self.notify();
        true
    }

    /// Apply a command, returning whether it changed anything
    pub fn apply(&mut self, command: GameCommand) -> bool {
        match command {
            GameCommand::Start => {
                self.start();
                true
            }
            GameCommand::Pause => self.pause(),
            GameCommand::Resume => self.resume(),
            GameCommand::MoveLeft => self.move_left(),
            GameCommand::MoveRight => self.move_right(),
            GameCommand::SoftDrop => self.soft_drop(),
            GameCommand::HardDrop => self.hard_drop(),
            GameCommand::RotateCw => self.rotate_cw(),
            GameCommand::RotateCcw => self.rotate_ccw(),
            GameCommand::Hold => self.hold(),
        }
    }

    /// Lowest valid position straight below `piece`
    fn landing(&self, piece: Piece) -> Piece {
        let mut landed = piece;
        loop {
            let next = landed.moved(0, 1);
            if !next.is_valid(&self.board) {
                return landed;
            }
            landed = next;
        }
    }

    fn spawn_next(&mut self) -> bool {
        let kind = self.queue.draw();
        self.spawn_kind(kind)
    }

    fn spawn_kind(&mut self, kind: PieceKind) -> bool {
        let piece = Piece::spawn(kind, self.board.width());
        self.active = Some(piece);

        if !piece.is_valid(&self.board) {
            debug!("spawn of {:?} at ({}, {}) is blocked", kind, piece.x, piece.y);
            self.end_game();
            return false;
        }
        true
    }

    /// Lock `piece`, clear rows, update score/lines/level and spawn the next piece
    fn lock_and_spawn(&mut self, piece: Piece, drop_rows: u32) {
        if let Err(err) = self.board.lock(&piece) {
            debug!("lock rejected: {}", err);
            self.end_game();
            return;
        }
        self.active = None;

        let rows = self.board.clear_full_rows();
        let points = line_clear_score(rows, self.level).saturating_add(hard_drop_score(drop_rows));
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(rows as u32);

        if rows > 0 {
            debug!("cleared {} row(s) for {} points", rows, points);
        }

        let level = level_for_lines(self.lines);
        if level > self.level {
            self.level = level;
            self.fall_interval_ms = fall_interval_ms(level);
            debug!(
                "level up: {} (fall interval {}ms)",
                level, self.fall_interval_ms
            );
        }

        self.hold_used = false;
        self.spawn_next();
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::with_seed(1)
    }
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("active", &self.active)
            .field("hold", &self.hold)
            .field("hold_used", &self.hold_used)
            .field("score", &self.score)
            .field("level", &self.level)
            .field("lines", &self.lines)
            .field("fall_timer_ms", &self.fall_timer_ms)
            .field("fall_interval_ms", &self.fall_interval_ms)
            .field("pending", &self.pending)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::shape::Shape;

    /// Started session with a chosen active piece at its spawn anchor and no pending events
    fn playing(kind: PieceKind) -> GameSession {
        let mut state = GameSession::with_seed(12345);
        state.start();
        state.active = Some(Piece::spawn(kind, state.board.width()));
        state.take_events();
        state
    }

    /// Lock every cell of row `y` except the listed columns
    fn fill_row(state: &mut GameSession, y: i32, except: &[i32]) {
        for x in 0..state.board.width() as i32 {
            if !except.contains(&x) {
                state.board.set(x, y, true);
            }
        }
    }

    /// Lock `rows` bottom rows except column 0 and put a vertical I into that well
    fn prepare_well(state: &mut GameSession, rows: i32) {
        let bottom = state.board.height() as i32 - 1;
        for y in (bottom - rows + 1)..=bottom {
            fill_row(state, y, &[0]);
        }
        state.active = Some(Piece {
            kind: PieceKind::I,
            shape: Shape::of(PieceKind::I).rotate_cw(),
            x: -2,
            y: bottom - 3,
        });
    }

    /// Clear exactly one line with a horizontal I
    fn clear_single(state: &mut GameSession) {
        fill_row(state, 19, &[6, 7, 8, 9]);
        state.active = Some(Piece::new(PieceKind::I, 6, 18));
        assert!(state.step());
    }

    fn count_events(state: &mut GameSession) -> Rc<Cell<(u32, u32)>> {
        let counts = Rc::new(Cell::new((0u32, 0u32)));
        let sink = Rc::clone(&counts);
        state.subscribe(move |event| {
            let (updated, over) = sink.get();
            match event {
                GameEvent::BoardUpdated => sink.set((updated + 1, over)),
                GameEvent::GameOver => sink.set((updated, over + 1)),
            }
        });
        counts
    }

    #[test]
    fn test_new_session() {
        let state = GameSession::with_seed(12345);

        assert_eq!(state.state(), SessionState::PreGame);
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.lines(), 0);
        assert!(state.active().is_none());
        assert!(state.hold_piece().is_none());
        assert_eq!(state.fall_interval_ms(), 1000);
        assert_eq!(state.next_queue(5).len(), 5);
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let err = GameSession::new(GameConfig::default().with_size(0, 20)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDimension { name: "width", .. }));
    }

    #[test]
    fn test_commands_ignored_before_start() {
        let mut state = GameSession::with_seed(1);

        assert!(!state.move_left());
        assert!(!state.rotate_cw());
        assert!(!state.step());
        assert!(!state.hard_drop());
        assert!(!state.hold());
        assert!(!state.pause());
        assert!(!state.tick(5000));
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_start_spawns_and_notifies() {
        let mut state = GameSession::with_seed(1);
        let preview = state.next_queue(5);

        state.start();

        assert_eq!(state.state(), SessionState::Playing);
        let active = state.active().unwrap();
        assert_eq!(active.kind, preview[0]);
        assert_eq!(state.next_queue(4), preview[1..].to_vec());
        assert_eq!(active.x, 4);
        assert_eq!(state.take_events(), vec![GameEvent::BoardUpdated]);
    }

    #[test]
    fn test_start_resets_previous_game() {
        let mut state = playing(PieceKind::I);
        clear_single(&mut state);
        state.hold();
        state.board.set(0, 19, true);

        state.start();

        assert_eq!(state.score(), 0);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.level(), 1);
        assert!(state.hold_piece().is_none());
        assert!(state.board().is_empty());
    }

    #[test]
    fn test_hard_drop_o_piece_on_empty_board() {
        let mut state = playing(PieceKind::O);
        let start = state.active().unwrap();
        assert_eq!((start.x, start.y), (4, -2));

        assert!(state.hard_drop());

        // O occupies grid rows 1-2, so it rests with its anchor at row 17.
        let drop_distance = 17 - start.y;
        assert_eq!(state.score(), 2 * drop_distance as u32);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.board().locked_count(), 4);
        for (x, y) in [(5, 18), (6, 18), (5, 19), (6, 19)] {
            assert!(state.board().is_occupied(x, y), "({}, {})", x, y);
        }
        assert_eq!(state.take_events(), vec![GameEvent::BoardUpdated]);
    }

    #[test]
    fn test_hard_drop_onto_obstruction() {
        let mut state = playing(PieceKind::O);
        state.board.set(5, 10, true);

        assert!(state.hard_drop());

        // Bottom of the O stops on row 9; anchor row 7, from -2
        assert_eq!(state.score(), 2 * 9);
        assert!(state.board().is_occupied(5, 9));
        assert!(state.board().is_occupied(6, 8));
    }

    #[test]
    fn test_hard_drop_with_line_clear_adds_both() {
        let mut state = playing(PieceKind::I);
        fill_row(&mut state, 19, &[6, 7, 8, 9]);
        state.active = Some(Piece::new(PieceKind::I, 6, -1));

        assert!(state.hard_drop());

        assert_eq!(state.lines(), 1);
        assert_eq!(state.score(), 100 + 2 * 19);
        assert!(state.board().is_empty());
    }

    #[test]
    fn test_step_locks_and_clears_single_line() {
        let mut state = playing(PieceKind::I);
        fill_row(&mut state, 19, &[6, 7, 8, 9]);
        fill_row(&mut state, 18, &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        state.active = Some(Piece::new(PieceKind::I, 6, 18));

        assert!(state.step());

        assert_eq!(state.lines(), 1);
        assert_eq!(state.score(), 100);
        // the lone block on row 18 shifted down, and the top row is empty
        assert!(state.board().is_occupied(9, 19));
        assert_eq!(state.board().locked_count(), 1);
        assert!(state.active().is_some());
    }

    #[test]
    fn test_line_clear_scores_at_level_1() {
        for (rows, expected) in [(1, 100), (2, 300), (3, 500), (4, 800)] {
            let mut state = playing(PieceKind::I);
            prepare_well(&mut state, rows);

            assert!(state.step());

            assert_eq!(state.lines(), rows as u32);
            assert_eq!(state.score(), expected, "{} rows", rows);
        }
    }

    #[test]
    fn test_line_clear_scores_double_at_level_2() {
        for (rows, expected) in [(1, 200), (2, 600), (3, 1000), (4, 1600)] {
            let mut state = playing(PieceKind::I);
            state.level = 2;
            prepare_well(&mut state, rows);

            assert!(state.step());

            assert_eq!(state.score(), expected, "{} rows", rows);
        }
    }

    #[test]
    fn test_level_progression() {
        let mut state = playing(PieceKind::I);
        let mut last_level = state.level();

        for cleared in 1..=30u32 {
            clear_single(&mut state);
            assert_eq!(state.lines(), cleared);
            assert!(state.level() >= last_level);
            last_level = state.level();

            match cleared {
                10 => assert_eq!(state.level(), 2),
                20 => assert_eq!(state.level(), 3),
                30 => assert_eq!(state.level(), 4),
                _ => {}
            }
        }

        assert_eq!(state.fall_interval_ms(), 700);
        // 10 lines at each of levels 1..=3
        assert_eq!(state.score(), 100 * (10 + 20 + 30));
    }

    #[test]
    fn test_rotation_kicks_right() {
        let mut state = playing(PieceKind::T);
        state.active = Some(Piece::new(PieceKind::T, 4, 3));
        // Direct clockwise rotation would cover (5, 3)
        state.board.set(5, 3, true);

        assert!(state.rotate_cw());

        let active = state.active().unwrap();
        assert_eq!((active.x, active.y), (5, 3));
        assert_eq!(active.shape, Shape::of(PieceKind::T).rotate_cw());
        assert_eq!(state.take_events(), vec![GameEvent::BoardUpdated]);
    }

    #[test]
    fn test_rotation_kicks_left() {
        let mut state = playing(PieceKind::T);
        state.active = Some(Piece::new(PieceKind::T, 4, 3));
        state.board.set(5, 3, true);
        state.board.set(7, 4, true);

        assert!(state.rotate_cw());
        assert_eq!(state.active().unwrap().x, 3);
    }

    #[test]
    fn test_rotation_rejected_silently() {
        let mut state = playing(PieceKind::T);
        let before = Piece::new(PieceKind::T, 4, 3);
        state.active = Some(before);
        state.board.set(5, 3, true);
        state.board.set(7, 4, true);
        state.board.set(4, 4, true);

        assert!(!state.rotate_cw());
        assert_eq!(state.active(), Some(before));
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_move_against_wall_is_silent() {
        let mut state = playing(PieceKind::O);

        // O blocks sit in grid columns 1-2; anchor 4 allows 5 moves left
        for _ in 0..5 {
            assert!(state.move_left());
        }
        assert!(!state.move_left());
        assert_eq!(state.active().unwrap().x, -1);

        let events = state.take_events();
        assert_eq!(events, vec![GameEvent::BoardUpdated]);
    }

    #[test]
    fn test_hold_store_then_swap_then_blocked() {
        let mut state = playing(PieceKind::T);
        let next = state.next_queue(1)[0];

        // store: T goes to hold, next piece spawns, hold still available
        assert!(state.hold());
        assert_eq!(state.hold_piece(), Some(PieceKind::T));
        assert_eq!(state.active().unwrap().kind, next);
        assert!(state.can_hold());

        // swap: pieces trade places
        assert!(state.hold());
        assert_eq!(state.hold_piece(), Some(next));
        let active = state.active().unwrap();
        assert_eq!(active.kind, PieceKind::T);
        assert_eq!((active.x, active.y), (4, -2));
        assert!(!state.can_hold());
        state.take_events();

        // used up until the next lock
        assert!(!state.hold());
        assert_eq!(state.hold_piece(), Some(next));
        assert_eq!(state.active().unwrap().kind, PieceKind::T);
        assert!(state.take_events().is_empty());

        assert!(state.hard_drop());
        assert!(state.can_hold());
        assert!(state.hold());
    }

    #[test]
    fn test_hold_swap_into_blocked_spawn_ends_game() {
        let mut state = playing(PieceKind::T);
        state.hold = Some(PieceKind::I);
        state.active = Some(Piece::new(PieceKind::T, 0, 10));
        state.board.set(5, 0, true);

        assert!(state.hold());

        assert_eq!(state.state(), SessionState::GameOver);
        assert_eq!(state.take_events(), vec![GameEvent::GameOver]);
    }

    #[test]
    fn test_lock_above_ceiling_is_game_over() {
        let mut state = playing(PieceKind::T);
        let counts = count_events(&mut state);
        // T spawns with its nub on row -1; block the row below its base
        fill_row(&mut state, 1, &[0, 1, 2, 3, 7, 8, 9]);

        assert!(state.step());

        assert_eq!(state.state(), SessionState::GameOver);
        assert_eq!(state.take_events(), vec![GameEvent::GameOver]);
        assert_eq!(counts.get(), (0, 1));
        // nothing was committed
        assert_eq!(state.board().locked_count(), 3);

        // terminal: further commands do nothing
        assert!(!state.step());
        assert!(!state.hard_drop());
        assert!(!state.move_left());
        assert!(!state.tick(10_000));
        assert!(state.take_events().is_empty());
        assert_eq!(counts.get(), (0, 1));

        state.start();
        assert_eq!(state.state(), SessionState::Playing);
        assert!(state.board().is_empty());
    }

    #[test]
    fn test_hard_drop_above_ceiling_is_game_over() {
        let mut state = playing(PieceKind::T);
        fill_row(&mut state, 1, &[0, 1, 2, 3, 7, 8, 9]);

        assert!(state.hard_drop());

        assert_eq!(state.state(), SessionState::GameOver);
        assert_eq!(state.score(), 0);
        assert_eq!(state.take_events(), vec![GameEvent::GameOver]);
    }

    #[test]
    fn test_blocked_spawn_is_game_over() {
        let mut state = playing(PieceKind::I);
        fill_row(&mut state, 0, &[0]);
        state.active = Some(Piece::new(PieceKind::I, 0, 18));

        assert!(state.step());

        assert_eq!(state.state(), SessionState::GameOver);
        assert_eq!(state.take_events(), vec![GameEvent::GameOver]);
    }

    #[test]
    fn test_tick_applies_gravity_after_interval() {
        let mut state = playing(PieceKind::T);
        let y = state.active().unwrap().y;

        assert!(!state.tick(999));
        assert_eq!(state.active().unwrap().y, y);

        assert!(state.tick(1));
        assert_eq!(state.active().unwrap().y, y + 1);

        // timer restarted
        assert!(!state.tick(500));
    }

    #[test]
    fn test_pause_and_resume() {
        let mut state = playing(PieceKind::T);

        assert!(state.pause());
        assert_eq!(state.state(), SessionState::Paused);
        assert!(!state.pause());
        assert!(!state.tick(5000));
        assert!(!state.move_left());
        assert!(!state.hold());

        assert!(state.resume());
        assert!(!state.resume());
        assert_eq!(state.state(), SessionState::Playing);
        assert_eq!(
            state.take_events(),
            vec![GameEvent::BoardUpdated]
        );
    }

    #[test]
    fn test_pending_updates_collapse_but_subscribers_see_all() {
        let mut state = playing(PieceKind::T);
        let counts = count_events(&mut state);

        assert!(state.move_left());
        assert!(state.move_right());
        assert!(state.rotate_cw());

        assert_eq!(state.take_events(), vec![GameEvent::BoardUpdated]);
        assert_eq!(counts.get(), (3, 0));
    }

    #[test]
    fn test_rendered_board_overlays_active() {
        let mut state = playing(PieceKind::T);
        state.board.set(0, 19, true);

        let rendered = state.rendered_board();

        assert_eq!(rendered.len(), 20);
        assert_eq!(rendered[19][0], CellValue::Locked);
        // T base row sits on row 0; nub is above the ceiling and not drawn
        assert_eq!(rendered[0][4], CellValue::Active);
        assert_eq!(rendered[0][5], CellValue::Active);
        assert_eq!(rendered[0][6], CellValue::Active);
        let active_cells = rendered
            .iter()
            .flatten()
            .filter(|&&c| c == CellValue::Active)
            .count();
        assert_eq!(active_cells, 3);

        // the copy is detached from the live board
        let mut copy = rendered;
        copy[5][5] = CellValue::Locked;
        assert!(!state.board().is_occupied(5, 5));
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = playing(PieceKind::O);
        state.hold = Some(PieceKind::S);

        let snap = state.snapshot();

        assert_eq!(snap.state, SessionState::Playing);
        assert_eq!(snap.hold, Some(PieceKind::S));
        assert_eq!(snap.next_queue, state.next_queue(5));
        assert_eq!(snap.active.map(|a| (a.kind, a.x, a.y)), Some((PieceKind::O, 4, -2)));
        assert_eq!(snap.ghost_y, Some(17));
        assert_eq!(snap.board, state.rendered_board());
        assert_eq!(snap.fall_interval_ms, 1000);
    }

    #[test]
    fn test_next_piece_comes_from_queue() {
        let mut state = playing(PieceKind::O);
        let upcoming = state.next_queue(3);

        for expected in upcoming {
            assert!(state.hard_drop());
            assert_eq!(state.active().unwrap().kind, expected);
        }
    }

    #[test]
    fn test_apply_routes_commands() {
        let mut state = GameSession::with_seed(3);

        assert!(state.apply(GameCommand::Start));
        assert_eq!(state.state(), SessionState::Playing);
        assert!(state.apply(GameCommand::Pause));
        assert!(state.apply(GameCommand::Resume));
        assert!(state.apply(GameCommand::SoftDrop));
        assert!(state.apply(GameCommand::HardDrop));
        assert!(state.score() > 0);
        assert!(state.apply(GameCommand::Hold));
        assert!(state.hold_piece().is_some());
    }

    #[test]
    fn test_custom_board_size() {
        let config = GameConfig::default().with_size(6, 8).with_seed(9);
        let mut state = GameSession::new(config).unwrap();
        state.start();

        assert_eq!(state.active().unwrap().x, 2);
        assert_eq!(state.rendered_board().len(), 8);
        assert!(state.rendered_board().iter().all(|row| row.len() == 6));
    }
}
