pub mod board;
pub mod config;
pub mod game;
pub mod movegen;
pub mod web;

pub use board::*;
pub use config::*;
pub use game::*;
pub use movegen::*;
