//! # flag_engine
//!
//! A two-agent capture-the-flag game on a symmetric grid.
//!
//! Each turn the acting agent receives a text view of the map where its own cell is `Y`,
//! answers with one of eight compass directions, and scores a point for every flag (`$`) it
//! steps on and loses one for every bomb (`!`). Walls (`#`) and the other agent (`R`) block.

pub mod config;
pub mod entities;
pub mod error;
pub mod game;
pub mod map;
pub mod movement;
pub mod populator;
pub mod replay;
pub mod visibility;

pub use config::GameConfig;
pub use entities::{Agent, Direction, Marker, Point};
pub use error::Error;
pub use game::{Controller, Game, TurnReport};
pub use map::{Border, Map, Symmetry};
pub use movement::Outcome;
pub use visibility::{view_as, View};

#[cfg(feature = "python")]
mod python;
