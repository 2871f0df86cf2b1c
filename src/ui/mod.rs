//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* machine's output and turns it into cells on
//! the terminal.  No input handling happens here.

pub mod animator;
pub mod deck_widget;
pub mod layout;
pub mod page;
pub mod popup;
pub mod theme;
