//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};

use crosstile::config::ViewConfig;
use crosstile::host::{
    Bonus, BoardTile, CellContent, Ctx, DrawBackend, GameModel, GameServer, HostAdapter,
    MiniWindowContent, ScoreContent, Tile, TimerContent, TimerKind, TraySlotContent, UserError,
};
use crosstile::model::geometry::Rect;
use crosstile::model::{BoardView, TrayVisibility};
use crosstile::theme::Theme;
use crosstile::update::update;
use crosstile::view::layout::LayoutParams;
use crosstile::view::paint;
use crosstile::Msg;

pub const TRAY_SIZE: usize = 7;

/// In-memory stand-in for the game model: a board map plus per-player tray
/// slots. Mutating commands apply the obvious semantics and refuse anything
/// the real rules engine would.
pub struct FakeModel {
    pub rows: usize,
    pub cols: usize,
    pub board: HashMap<(usize, usize), BoardTile>,
    pub trays: Vec<Vec<Option<Tile>>>,
}

impl FakeModel {
    pub fn new(rows: usize, cols: usize, players: usize) -> Self {
        Self {
            rows,
            cols,
            board: HashMap::new(),
            trays: vec![vec![None; TRAY_SIZE]; players],
        }
    }

    /// Put one tile per character into a player's tray, starting at slot 0.
    pub fn fill_tray(&mut self, player: usize, faces: &str) {
        for (slot, face) in faces.chars().enumerate() {
            self.trays[player][slot] = Some(Tile::new(face));
        }
    }

    pub fn place(&mut self, col: usize, row: usize, face: char, pending: bool) {
        self.board.insert(
            (col, row),
            BoardTile {
                tile: Tile::new(face),
                pending,
                recent: false,
            },
        );
    }
}

impl GameModel for FakeModel {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn bonus_at(&self, col: usize, row: usize) -> Bonus {
        if col == row && col % 7 == 0 {
            Bonus::DoubleWord
        } else {
            Bonus::None
        }
    }

    fn tile_at(&self, col: usize, row: usize) -> Option<BoardTile> {
        self.board.get(&(col, row)).copied()
    }

    fn tile_value(&self, tile: Tile) -> u8 {
        if tile.is_blank {
            0
        } else {
            (tile.face as u8 % 10) + 1
        }
    }

    fn tray_size(&self) -> usize {
        TRAY_SIZE
    }

    fn tray_tile(&self, player: usize, slot: usize) -> Option<Tile> {
        *self.trays.get(player)?.get(slot)?
    }

    fn pending_count(&self, _player: usize) -> usize {
        self.board.values().filter(|t| t.pending).count()
    }

    fn move_tray_to_board(&mut self, player: usize, slot: usize, col: usize, row: usize) -> bool {
        if self.board.contains_key(&(col, row)) {
            return false;
        }
        let Some(tile) = self.trays[player][slot].take() else {
            return false;
        };
        self.board.insert(
            (col, row),
            BoardTile {
                tile,
                pending: true,
                recent: false,
            },
        );
        true
    }

    fn move_board_to_tray(&mut self, player: usize, col: usize, row: usize, slot: usize) -> bool {
        let occupied = self.trays[player][slot].is_some();
        match self.board.get(&(col, row)) {
            Some(t) if t.pending && !occupied => {
                let tile = self.board.remove(&(col, row)).unwrap().tile;
                self.trays[player][slot] = Some(tile);
                true
            }
            _ => false,
        }
    }

    fn move_board_to_board(
        &mut self,
        _player: usize,
        from_col: usize,
        from_row: usize,
        col: usize,
        row: usize,
    ) -> bool {
        if self.board.contains_key(&(col, row)) {
            return false;
        }
        match self.board.get(&(from_col, from_row)) {
            Some(t) if t.pending => {
                let tile = self.board.remove(&(from_col, from_row)).unwrap();
                self.board.insert((col, row), tile);
                true
            }
            _ => false,
        }
    }

    fn move_within_tray(&mut self, player: usize, from_slot: usize, to_slot: usize) -> bool {
        if from_slot == to_slot {
            return false;
        }
        self.trays[player].swap(from_slot, to_slot);
        true
    }

    fn take_back_pending(&mut self, player: usize, col: usize, row: usize) -> bool {
        match self.board.get(&(col, row)) {
            Some(t) if t.pending => {
                let Some(free) = self.trays[player].iter().position(|s| s.is_none()) else {
                    return false;
                };
                let tile = self.board.remove(&(col, row)).unwrap().tile;
                self.trays[player][free] = Some(tile);
                true
            }
            _ => false,
        }
    }
}

#[derive(Clone, Default)]
pub struct FakePlayer {
    pub robot: bool,
    pub remote: bool,
    pub password: Option<String>,
}

pub struct FakeServer {
    pub turn: Option<usize>,
    pub pool: usize,
    pub over: bool,
    pub players: Vec<FakePlayer>,
}

impl FakeServer {
    pub fn new(players: usize) -> Self {
        Self {
            turn: Some(0),
            pool: 50,
            over: false,
            players: vec![FakePlayer::default(); players],
        }
    }
}

impl GameServer for FakeServer {
    fn turn(&self) -> Option<usize> {
        self.turn
    }

    fn pool_count(&self) -> usize {
        self.pool
    }

    fn game_over(&self) -> bool {
        self.over
    }

    fn player_count(&self) -> usize {
        self.players.len()
    }

    fn is_robot(&self, player: usize) -> bool {
        self.players[player].robot
    }

    fn is_remote(&self, player: usize) -> bool {
        self.players[player].remote
    }

    fn has_password(&self, player: usize) -> bool {
        self.players[player].password.is_some()
    }

    fn check_password(&self, player: usize, guess: &str) -> bool {
        self.players[player].password.as_deref() == Some(guess)
    }
}

/// Records every host call so tests can assert on side effects, and scripts
/// responses for the synchronous queries.
#[derive(Default)]
pub struct RecordingHost {
    pub timers_set: Vec<(TimerKind, u32)>,
    pub timers_cancelled: Vec<TimerKind>,
    /// Interleaved set(true)/cancel(false) events, for arming queries.
    pub timer_log: Vec<(TimerKind, bool)>,
    pub scroll_events: Vec<(usize, usize)>,
    pub tray_events: Vec<(TrayVisibility, usize)>,
    pub clock_running: Vec<bool>,
    pub errors: Vec<UserError>,
    pub engine_resets: Vec<usize>,
    /// Scripted password prompts, consumed front to back.
    pub password_responses: VecDeque<Option<String>>,
    pub password_prompts: usize,
    pub confirm_trade_response: bool,
    pub trade_confirms: Vec<(usize, usize)>,
}

impl RecordingHost {
    /// Whether the most recent event for this timer kind was a set.
    pub fn timer_armed(&self, kind: TimerKind) -> bool {
        self.timer_log
            .iter()
            .rev()
            .find(|(k, _)| *k == kind)
            .is_some_and(|(_, set)| *set)
    }
}

impl HostAdapter for RecordingHost {
    fn set_timer(&mut self, kind: TimerKind, delay_ms: u32) {
        self.timers_set.push((kind, delay_ms));
        self.timer_log.push((kind, true));
    }

    fn cancel_timer(&mut self, kind: TimerKind) {
        self.timers_cancelled.push(kind);
        self.timer_log.push((kind, false));
    }

    fn scroll_changed(&mut self, offset: usize, visible_rows: usize) {
        self.scroll_events.push((offset, visible_rows));
    }

    fn tray_state_changed(&mut self, state: TrayVisibility, visible_rows: usize) {
        self.tray_events.push((state, visible_rows));
    }

    fn set_clock_running(&mut self, running: bool) {
        self.clock_running.push(running);
    }

    fn request_password(&mut self, _player: usize) -> Option<String> {
        self.password_prompts += 1;
        self.password_responses.pop_front().flatten()
    }

    fn confirm_trade(&mut self, player: usize, count: usize) -> bool {
        self.trade_confirms.push((player, count));
        self.confirm_trade_response
    }

    fn user_error(&mut self, error: UserError) {
        self.errors.push(error);
    }

    fn reset_engine(&mut self, player: usize) {
        self.engine_resets.push(player);
    }
}

/// Draw backend that records calls and can refuse a scripted number of cell
/// draws (exercising the retained-dirty-bit contract).
#[derive(Default)]
pub struct RecordingBackend {
    pub cells: Vec<(Rect, CellContent)>,
    pub tray_slots: Vec<(usize, TraySlotContent)>,
    pub dividers: usize,
    pub scores: Vec<ScoreContent>,
    pub timers: Vec<TimerContent>,
    pub minis: Vec<MiniWindowContent>,
    /// Refuse this many cell draws before succeeding again.
    pub fail_cell_draws: usize,
}

impl DrawBackend for RecordingBackend {
    fn draw_cell(&mut self, rect: Rect, content: &CellContent) -> bool {
        if self.fail_cell_draws > 0 {
            self.fail_cell_draws -= 1;
            return false;
        }
        self.cells.push((rect, content.clone()));
        true
    }

    fn draw_tray_slot(&mut self, _rect: Rect, slot: usize, content: &TraySlotContent) -> bool {
        self.tray_slots.push((slot, content.clone()));
        true
    }

    fn draw_divider(&mut self, _rect: Rect) -> bool {
        self.dividers += 1;
        true
    }

    fn draw_score(&mut self, _rect: Rect, content: &ScoreContent) -> bool {
        self.scores.push(content.clone());
        true
    }

    fn draw_timer(&mut self, _rect: Rect, content: &TimerContent) -> bool {
        self.timers.push(content.clone());
        true
    }

    fn draw_mini_window(&mut self, _rect: Rect, content: &MiniWindowContent) -> bool {
        self.minis.push(content.clone());
        true
    }
}

/// The standard fixture: a 15x15 board at 20px scale with the tray
/// overlapping the bottom three rows (12 visible rows), two players.
pub struct Harness {
    pub view: BoardView,
    pub model: FakeModel,
    pub server: FakeServer,
    pub host: RecordingHost,
    pub backend: RecordingBackend,
}

pub fn params_15x15() -> LayoutParams {
    LayoutParams {
        board_x: 0,
        board_y: 0,
        hscale: 20,
        vscale: 20,
        rows: 15,
        cols: 15,
        tray: Rect::new(0, 240, 300, 60),
        score: Rect::new(300, 0, 80, 200),
        timer: Rect::new(300, 200, 80, 40),
        tray_size: TRAY_SIZE,
    }
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(ViewConfig::default())
    }

    pub fn with_config(config: ViewConfig) -> Self {
        let players = 2;
        Self {
            view: BoardView::new(config, Theme::default(), params_15x15(), players),
            model: FakeModel::new(15, 15, players),
            server: FakeServer::new(players),
            host: RecordingHost::default(),
            backend: RecordingBackend::default(),
        }
    }

    pub fn update(&mut self, msg: Msg) -> bool {
        let mut ctx = Ctx {
            model: &mut self.model,
            server: &self.server,
            host: &mut self.host,
        };
        update(&mut self.view, &mut ctx, msg)
    }

    pub fn paint(&mut self) -> bool {
        paint(&mut self.view, &self.model, &self.server, &mut self.backend)
    }

    /// Paint until clean so a test starts from a known-blank dirty state.
    pub fn drain_dirty(&mut self) {
        self.paint();
        self.backend = RecordingBackend::default();
        assert!(!self
            .view
            .dirty
            .needs_redraw_in(self.view.scroll_offset, self.view.layout.visible_rows));
    }

    /// Pixel center of a visible view-space cell.
    pub fn cell_center(&self, col: usize, row: usize) -> (i32, i32) {
        let rect = self
            .view
            .cell_rect(crosstile::model::geometry::Cell::new(col, row))
            .expect("cell must be visible");
        (rect.x + rect.width as i32 / 2, rect.y + rect.height as i32 / 2)
    }

    /// Pixel center of a tray slot.
    pub fn slot_center(&self, slot: usize) -> (i32, i32) {
        let rect = crosstile::view::layout::tray_slot_rect(
            &self.view.params,
            &self.view.layout,
            slot,
        )
        .expect("slot in range");
        (rect.x + rect.width as i32 / 2, rect.y + rect.height as i32 / 2)
    }

    /// A full tap: pointer down then up at the same spot.
    pub fn tap(&mut self, x: i32, y: i32) -> bool {
        let mut changed = self.update(Msg::pointer_down(x, y));
        changed |= self.update(Msg::pointer_up(x, y));
        changed
    }

    /// Reveal the tray through the normal challenge path (player 0 has no
    /// password by default).
    pub fn reveal_tray(&mut self) {
        assert!(self.update(Msg::Tray(crosstile::messages::TrayMsg::Reveal)));
        assert_eq!(self.view.tray_visibility, TrayVisibility::Revealed);
    }
}
