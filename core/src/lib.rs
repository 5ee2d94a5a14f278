#![no_std]

extern crate alloc;

pub use board::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use panel::*;
pub use problem::*;
pub use session::*;
pub use stage::*;
pub use types::*;

mod board;
mod error;
mod game;
mod generator;
mod panel;
mod problem;
mod session;
mod stage;
mod types;
