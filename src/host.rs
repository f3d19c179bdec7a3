//! Capability interfaces between the view core and its host.
//!
//! The view never touches pixels, timers, dialogs or game rules directly; it
//! depends only on the traits here. The host implements them once and hands
//! them to `update()` / `paint()` as a [`Ctx`]. Model- and server-originated
//! changes re-enter the view as messages (see [`crate::messages`]), always in
//! unflipped model coordinates.

use crate::model::geometry::{Orientation, Rect};
use crate::model::TrayVisibility;
use crate::theme::Color;

/// A tile identity: its face letter and whether it is a blank standing in
/// for that letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub face: char,
    pub is_blank: bool,
}

impl Tile {
    pub fn new(face: char) -> Self {
        Self {
            face,
            is_blank: false,
        }
    }

    pub fn blank(face: char) -> Self {
        Self {
            face,
            is_blank: true,
        }
    }
}

/// A tile as it sits on the board, with move-state flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardTile {
    pub tile: Tile,
    /// Placed this move, not yet committed.
    pub pending: bool,
    /// Part of the most recently committed move.
    pub recent: bool,
}

/// Bonus-square classification for a board cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Bonus {
    #[default]
    None,
    DoubleLetter,
    TripleLetter,
    DoubleWord,
    TripleWord,
}

/// Everything the backend needs to render one board cell. Colors are
/// resolved from the theme here so backends stay theme-agnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct CellContent {
    pub glyph: Option<char>,
    /// Tile point value, present when cell values are enabled.
    pub value: Option<u8>,
    pub bonus: Bonus,
    pub blank: bool,
    pub pending: bool,
    pub recent: bool,
    /// The cell is the origin of an in-flight tile drag.
    pub drag_source: bool,
    /// The cell lies on the border of the player's hint region.
    pub hint_border: bool,
    /// Placement arrow to draw on this (empty) cell.
    pub arrow: Option<Orientation>,
    pub bg: Color,
    pub fg: Color,
}

/// Render content for one tray slot.
#[derive(Debug, Clone, PartialEq)]
pub struct TraySlotContent {
    /// `None` for an empty slot, or when the slot's tile is mid-drag.
    pub tile: Option<Tile>,
    pub value: Option<u8>,
    /// Face-up (revealed) vs. face-down (reversed) rendering.
    pub face_up: bool,
    pub selected: bool,
    pub drag_source: bool,
    pub bg: Color,
    pub fg: Color,
}

/// Render content for the score area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreContent {
    /// Whose turn it is, or `None` before the game starts.
    pub turn: Option<usize>,
    pub selected_player: usize,
    pub pool_remaining: usize,
    /// Tiles the selected player has placed in the current move.
    pub pending_tiles: usize,
    pub game_over: bool,
}

/// Render content for the timer area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerContent {
    pub player: usize,
    pub seconds_remaining: i32,
}

/// Render content for a mini-window overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiniWindowContent {
    pub text: String,
}

/// The stateless draw capability implemented by the host.
///
/// Every call may return `false` to report "not completed" (platform busy,
/// surface mid-transition); the view then retains the corresponding dirty
/// bit and retries on the next pass. This is expected, not exceptional.
pub trait DrawBackend {
    fn draw_cell(&mut self, rect: Rect, content: &CellContent) -> bool;
    fn draw_tray_slot(&mut self, rect: Rect, slot: usize, content: &TraySlotContent) -> bool;
    fn draw_divider(&mut self, rect: Rect) -> bool;
    fn draw_score(&mut self, rect: Rect, content: &ScoreContent) -> bool;
    fn draw_timer(&mut self, rect: Rect, content: &TimerContent) -> bool;
    fn draw_mini_window(&mut self, rect: Rect, content: &MiniWindowContent) -> bool;
}

/// Tile and board authority, always addressed in model coordinates.
pub trait GameModel {
    fn rows(&self) -> usize;
    fn cols(&self) -> usize;
    fn bonus_at(&self, col: usize, row: usize) -> Bonus;
    fn tile_at(&self, col: usize, row: usize) -> Option<BoardTile>;
    fn tile_value(&self, tile: Tile) -> u8;

    fn tray_size(&self) -> usize;
    fn tray_tile(&self, player: usize, slot: usize) -> Option<Tile>;
    /// Number of tiles placed on the board in the current (uncommitted) move.
    fn pending_count(&self, player: usize) -> usize;

    // Narrow write commands. Each returns whether the model accepted the
    // move; refusals leave the model unchanged.
    fn move_tray_to_board(&mut self, player: usize, slot: usize, col: usize, row: usize) -> bool;
    fn move_board_to_tray(&mut self, player: usize, col: usize, row: usize, slot: usize) -> bool;
    fn move_board_to_board(
        &mut self,
        player: usize,
        from_col: usize,
        from_row: usize,
        col: usize,
        row: usize,
    ) -> bool;
    fn move_within_tray(&mut self, player: usize, from_slot: usize, to_slot: usize) -> bool;
    /// Return a pending tile from the board to the first free tray slot.
    fn take_back_pending(&mut self, player: usize, col: usize, row: usize) -> bool;
}

/// Turn/score/lifecycle authority.
pub trait GameServer {
    fn turn(&self) -> Option<usize>;
    fn pool_count(&self) -> usize;
    fn game_over(&self) -> bool;
    fn player_count(&self) -> usize;
    fn is_robot(&self, player: usize) -> bool;
    fn is_remote(&self, player: usize) -> bool;
    fn has_password(&self, player: usize) -> bool;
    fn check_password(&self, player: usize, guess: &str) -> bool;
}

/// Deferred-execution callbacks registered with the host's timer service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Single-shot long-press detection.
    PointerHold,
    /// Repeating auto-scroll while a tile drag hovers a scrollable edge.
    AutoScroll,
}

/// User-facing refusals, reported through the host (never panics, never
/// blocks beyond the host's own synchronous dialog).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserError {
    /// Acting when it is not the selected player's turn.
    NotYourTurn,
    /// Trading when the pool holds fewer tiles than a full tray.
    TooFewPoolTiles,
    /// Peeking at a remote player's tray.
    RemoteTray,
    /// Revealing a robot's tray.
    RobotTray,
    /// Wrong tray password.
    BadPassword,
}

/// Host services: timers, notifications and synchronous user queries.
pub trait HostAdapter {
    fn set_timer(&mut self, kind: TimerKind, delay_ms: u32);
    fn cancel_timer(&mut self, kind: TimerKind);

    /// Scroll offset changed (for scrollbar sync).
    fn scroll_changed(&mut self, offset: usize, visible_rows: usize);
    /// Tray visibility changed; the host may resize surrounding chrome.
    fn tray_state_changed(&mut self, state: TrayVisibility, visible_rows: usize);
    /// Start/stop the game clock. Called only on pause-depth edges.
    fn set_clock_running(&mut self, running: bool);

    /// Prompt for a tray password. `None` means the user cancelled.
    fn request_password(&mut self, player: usize) -> Option<String>;
    /// Confirm a trade of `count` tiles.
    fn confirm_trade(&mut self, player: usize, count: usize) -> bool;

    fn user_error(&mut self, error: UserError);

    /// The player's move-search engine must restart (hint region changed or
    /// dictionary swapped).
    fn reset_engine(&mut self, player: usize);
}

/// The external collaborators handed to every update call.
pub struct Ctx<'a> {
    pub model: &'a mut dyn GameModel,
    pub server: &'a dyn GameServer,
    pub host: &'a mut dyn HostAdapter,
}
