//! Message types for the Elm-style architecture.
//!
//! All state changes flow through these message types: host input events,
//! timer fires, and the synchronous callbacks re-entering from the game
//! model and server. Model/server events always carry unflipped model
//! coordinates; `update()` applies the flip transform before touching dirty
//! state.

use crate::view::layout::LayoutParams;

/// Direction for arrow and cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Keyboard modifiers active during a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
}

/// Pointer events, in view-space pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerMsg {
    Down { x: i32, y: i32, modifiers: Modifiers },
    Move { x: i32, y: i32 },
    Up { x: i32, y: i32 },
    /// Host-level interruption: identical cleanup to an invalid drop,
    /// without a pointer-up.
    Cancel,
}

/// The closed keyboard-navigation key set (capability-gated).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Move(Direction),
    /// The alternate/jump variant: move to the far edge.
    Jump(Direction),
    Delete,
    RaiseFocus,
    Confirm,
}

/// Key transition. Repeats are treated like presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Down,
    Up,
    Repeat,
}

/// Timer fires, delivered by the host's timer service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMsg {
    /// The pointer-hold (long-press) timer elapsed.
    PointerHold,
    /// One auto-scroll tick while a tile drag hovers a scrollable edge.
    AutoScroll,
    /// Periodic game-clock tick.
    ClockTick { seconds: u32 },
}

/// Board-level messages (scroll, flip, display toggles, geometry).
#[derive(Debug, Clone, PartialEq)]
pub enum BoardMsg {
    SetScrollOffset(usize),
    ScrollBy(i32),
    ToggleFlip,
    SetShowColors(bool),
    SetShowValues(bool),
    /// Switch which player's tray/cursor/trade state is displayed.
    SelectPlayer(usize),
    /// Host resized or re-scaled the view.
    Relayout(LayoutParams),
}

/// Tray-level messages (visibility, trade mode, divider).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayMsg {
    /// Request the tray shown face-down (or face-up when the game is over).
    Show,
    /// Request the tray hidden behind the board.
    Hide,
    /// Request face-up tiles; runs the password/robot/remote challenge.
    Reveal,
    StartTrade,
    CancelTrade,
    CommitTrade,
    SetDivider(usize),
}

/// Hint-region permission changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintMsg {
    /// Grant or revoke a player's hint-region permission. Revoking clears
    /// the region and resets that player's search engine.
    SetAllowed { player: usize, allowed: bool },
}

/// Synchronous callbacks from the game model (model coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelEvent {
    CellChanged { col: usize, row: usize },
    TrayChanged { player: usize },
    DictionaryChanged,
}

/// Synchronous callbacks from the server/turn authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerEvent {
    TurnChanged,
    GameOver,
}

/// Top-level message type.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Pointer(PointerMsg),
    Key { key: NavKey, action: KeyAction },
    Timer(TimerMsg),
    Board(BoardMsg),
    Tray(TrayMsg),
    Hint(HintMsg),
    Model(ModelEvent),
    Server(ServerEvent),
}

// Convenience constructors for common messages
impl Msg {
    pub fn pointer_down(x: i32, y: i32) -> Self {
        Msg::Pointer(PointerMsg::Down {
            x,
            y,
            modifiers: Modifiers::default(),
        })
    }

    pub fn pointer_move(x: i32, y: i32) -> Self {
        Msg::Pointer(PointerMsg::Move { x, y })
    }

    pub fn pointer_up(x: i32, y: i32) -> Self {
        Msg::Pointer(PointerMsg::Up { x, y })
    }

    pub fn key_down(key: NavKey) -> Self {
        Msg::Key {
            key,
            action: KeyAction::Down,
        }
    }
}
