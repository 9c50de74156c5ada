//! Python bindings, so agents written in Python can play.

use crate::config::GameConfig;
use crate::error::Error;
use crate::game::Game;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use std::collections::HashMap;

impl From<Error> for PyErr {
    fn from(error: Error) -> PyErr {
        match error {
            Error::InvalidConfig(_) | Error::Json(_) => PyValueError::new_err(error.to_string()),
            _ => PyRuntimeError::new_err(error.to_string()),
        }
    }
}

/// The flag game.
#[pyclass(name = "Game", module = "flag_engine", unsendable)]
pub struct PyGame {
    game: Game,
}

#[pymethods]
impl PyGame {
    /// Creates a new game.
    ///
    /// # Arguments
    /// * `first` - The name of the agent that moves first.
    /// * `second` - The name of the other agent.
    /// * `seed` - The seed for the random number generator.
    /// * `config` - The game config as JSON. If `None`, the defaults are used.
    /// * `replay_filename` - The filename to save the replay of the game to. If `None`, no replay will be saved.
    #[new]
    #[pyo3(signature = (first, second, seed, config=None, replay_filename=None))]
    fn new(
        first: String,
        second: String,
        seed: u64,
        config: Option<&str>,
        replay_filename: Option<String>,
    ) -> PyResult<PyGame> {
        let config = match config {
            Some(contents) => GameConfig::from_json(contents)?,
            None => GameConfig::default(),
        };

        Ok(PyGame {
            game: Game::new(config, [first, second], seed, replay_filename)?,
        })
    }

    /// Plays one turn. `decide` is called with the agent's view and must return a direction.
    ///
    /// Returns the outcome name. If `decide` raises, the turn is blocked and the error re-raised.
    fn step(&mut self, decide: &Bound<'_, PyAny>) -> PyResult<String> {
        let mut failure = None;

        let report = self.game.step(|view| {
            match decide
                .call1((view,))
                .and_then(|answer| answer.extract::<String>())
            {
                Ok(direction) => direction,
                Err(err) => {
                    failure = Some(err);
                    String::new()
                }
            }
        })?;

        match failure {
            Some(err) => Err(err),
            None => Ok(format!("{:?}", report.outcome)),
        }
    }

    fn scores(&self) -> HashMap<String, i32> {
        self.game.scores()
    }

    #[getter]
    fn turn(&self) -> usize {
        self.game.turn()
    }

    #[getter]
    fn finished(&self) -> bool {
        self.game.finished()
    }

    fn draw(&self) -> PyResult<()> {
        Ok(self.game.draw()?)
    }
}

#[pymodule]
fn flag_engine(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyGame>()?;
    Ok(())
}
