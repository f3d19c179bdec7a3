//! Update functions for the Elm-style architecture.
//!
//! All state transformations flow through [`update`]. Every operation
//! returns a single `bool`: "did anything change / should the caller
//! schedule a redraw". Dirty state accumulates inside the `BoardView`; the
//! host runs the redraw pass from its main loop, never from inside an
//! update.

pub mod arrow;
pub mod board;
pub mod hint;
pub mod keyboard;
pub mod pointer;
pub mod scroll;
pub mod sync;
pub mod tray;

use crate::host::Ctx;
use crate::messages::{
    BoardMsg, HintMsg, ModelEvent, Msg, PointerMsg, ServerEvent, TimerMsg, TrayMsg,
};
use crate::model::BoardView;

pub use scroll::ScrollDir;

/// Main update function - dispatches to sub-handlers.
pub fn update(view: &mut BoardView, ctx: &mut Ctx, msg: Msg) -> bool {
    // Skip logging for high-frequency periodic messages.
    let noisy = matches!(
        msg,
        Msg::Pointer(PointerMsg::Move { .. }) | Msg::Timer(TimerMsg::ClockTick { .. })
    );
    if !noisy {
        tracing::debug!(target: "message", ?msg, "processing");
    }

    let changed = dispatch(view, ctx, msg);

    #[cfg(debug_assertions)]
    view.assert_invariants();

    changed
}

fn dispatch(view: &mut BoardView, ctx: &mut Ctx, msg: Msg) -> bool {
    match msg {
        Msg::Pointer(m) => match m {
            PointerMsg::Down { x, y, modifiers } => {
                pointer::pointer_down(view, ctx, x, y, modifiers)
            }
            PointerMsg::Move { x, y } => pointer::pointer_move(view, ctx, x, y),
            PointerMsg::Up { x, y } => pointer::pointer_up(view, ctx, x, y),
            PointerMsg::Cancel => pointer::pointer_cancel(view, ctx),
        },
        Msg::Key { key, action } => keyboard::handle_key(view, ctx, key, action),
        Msg::Timer(m) => match m {
            TimerMsg::PointerHold => pointer::pointer_hold_fired(view, ctx),
            TimerMsg::AutoScroll => pointer::auto_scroll_tick(view, ctx),
            TimerMsg::ClockTick { seconds } => sync::clock_tick(view, ctx, seconds),
        },
        Msg::Board(m) => match m {
            BoardMsg::SetScrollOffset(offset) => scroll::set_scroll_offset(view, ctx, offset),
            BoardMsg::ScrollBy(delta) => scroll::scroll_by(view, ctx, delta),
            BoardMsg::ToggleFlip => board::toggle_flip(view, ctx),
            BoardMsg::SetShowColors(show) => board::set_show_colors(view, show),
            BoardMsg::SetShowValues(show) => board::set_show_values(view, show),
            BoardMsg::SelectPlayer(player) => board::select_player(view, ctx, player),
            BoardMsg::Relayout(params) => board::relayout(view, ctx, params),
        },
        Msg::Tray(m) => match m {
            TrayMsg::Show => {
                tray::request_visibility(view, ctx, crate::model::TrayVisibility::Reversed)
            }
            TrayMsg::Hide => {
                tray::request_visibility(view, ctx, crate::model::TrayVisibility::Hidden)
            }
            TrayMsg::Reveal => {
                tray::request_visibility(view, ctx, crate::model::TrayVisibility::Revealed)
            }
            TrayMsg::StartTrade => tray::start_trade(view, ctx),
            TrayMsg::CancelTrade => tray::cancel_trade(view),
            TrayMsg::CommitTrade => tray::commit_trade(view, ctx),
            TrayMsg::SetDivider(position) => tray::set_divider(view, position),
        },
        Msg::Hint(m) => match m {
            HintMsg::SetAllowed { player, allowed } => {
                hint::set_allowed(view, ctx, player, allowed)
            }
        },
        Msg::Model(m) => match m {
            ModelEvent::CellChanged { col, row } => sync::cell_changed(view, ctx, col, row),
            ModelEvent::TrayChanged { player } => sync::tray_changed(view, ctx, player),
            ModelEvent::DictionaryChanged => sync::dictionary_changed(view, ctx),
        },
        Msg::Server(m) => match m {
            ServerEvent::TurnChanged => sync::turn_changed(view),
            ServerEvent::GameOver => sync::game_over(view, ctx),
        },
    }
}
