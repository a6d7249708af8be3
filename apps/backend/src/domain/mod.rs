//! Pure game model and rules. Nothing in this module performs I/O;
//! the session coordinator in `services` owns loading and persisting.

pub mod rules;
pub mod snapshot;
pub mod state;
pub mod transitions;

pub use state::{Cell, Game, GameStatus, Move, Player, Symbol};

#[cfg(test)]
mod tests_props;
