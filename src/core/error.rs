//! Typed construction errors for the swipe machine.
//!
//! Runtime conditions (noise deltas, boundary overruns) are never errors —
//! they are defined transitions.  Only a machine that could never work is
//! rejected, and it is rejected at construction.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MachineError {
    /// A deck needs at least one panel to navigate.
    #[error("deck has no panels")]
    EmptyDeck,

    /// The pinned section must sit at a finite, non-negative page offset.
    #[error("section top {top} is not a finite, non-negative page offset")]
    InvalidGeometry { top: f64 },
}
