//! View-side computation: layout, hit-testing and the redraw pass.
//!
//! Everything here is either pure geometry or a walk over dirty state that
//! calls out through the host's `DrawBackend`; no pixels are touched in this
//! crate.

pub mod layout;
pub mod paint;

pub use hit_test::hit_test;
pub use layout::{Layout, LayoutParams};
pub use paint::paint;
