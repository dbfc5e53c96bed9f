//! Rules engine for cooperative two-player minesweeper.
//!
//! Both players clear their own board while sharing one score and one pool of lives. Besides mines and numbered
//! cells the boards hide surprise cells, a paid coin flip between a bonus and a penalty, and question cells, which
//! pay out according to a trivia answer. [`GameSession`] drives a whole game, the lower level pieces are usable on
//! their own.

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use history::*;
pub use question::*;
pub use resolver::*;
pub use reveal::*;
pub use rules::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod history;
mod question;
mod resolver;
mod reveal;
mod rules;
mod session;
mod types;
