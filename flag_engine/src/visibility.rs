//! Scoping of an agent's turn.
//!
//! While a [`View`] is open the acting agent's cell shows as [`Marker::AgentActive`]. Dropping
//! the view stamps [`Marker::AgentPresent`] on wherever the agent stands by then, on every
//! exit path including a panic inside the turn.

use crate::entities::{Agent, Marker};
use crate::map::Map;
use crate::movement;

pub struct View<'a> {
    map: &'a mut Map,
    agent: &'a mut Agent,
}

impl<'a> View<'a> {
    /// Marks `agent` as the active one until the returned view is dropped.
    pub fn enter(map: &'a mut Map, agent: &'a mut Agent) -> View<'a> {
        log::trace!("{} views the map from {:?}", agent.name(), agent.position);
        map.set_cells(Marker::AgentActive, &[agent.position]);
        View { map, agent }
    }

    /// The map as the active agent sees it.
    pub fn render(&self) -> String {
        self.map.render()
    }

    /// Moves the active agent, see [`movement::resolve`].
    pub fn resolve(&mut self, label: &str) -> Option<Marker> {
        movement::resolve(self.map, self.agent, label)
    }

    pub fn map(&self) -> &Map {
        self.map
    }

    pub fn agent(&self) -> &Agent {
        self.agent
    }
}

impl Drop for View<'_> {
    fn drop(&mut self) {
        self.map.set_cells(Marker::AgentPresent, &[self.agent.position]);
        log::trace!("{} leaves the view at {:?}", self.agent.name(), self.agent.position);
    }
}

/// Runs `turn` inside a [`View`] over `agent`.
pub fn view_as<R>(
    map: &mut Map,
    agent: &mut Agent,
    turn: impl FnOnce(&mut View<'_>) -> R,
) -> R {
    let mut view = View::enter(map, agent);
    turn(&mut view)
}
