//! crosstile - board/tray view core for a multiplayer tile word game
//!
//! This crate owns screen geometry, hit-testing, drag gestures,
//! minimal-redraw scheduling and per-player UI state for a tile-placement
//! word board game, sitting between raw host input events and the game's
//! rules engine. Rules, rendering, timers and storage stay with the host
//! behind the capability traits in [`host`].

pub mod config;
pub mod config_paths;
pub mod host;
pub mod messages;
pub mod model;
pub mod overlay;
pub mod session;
pub mod theme;
pub mod tracing;
pub mod update;
pub mod view;

// Re-export commonly used types
pub use config::ViewConfig;
pub use host::Ctx;
pub use messages::Msg;
pub use model::BoardView;
pub use session::SessionRecord;
pub use theme::Theme;
pub use update::update;
pub use view::paint;
