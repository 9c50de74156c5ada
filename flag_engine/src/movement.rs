use crate::entities::{Agent, Direction, Marker};
use crate::map::Map;
use serde::Serialize;

/// What came of an agent's move.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Outcome {
    CapturedFlag,
    HitBomb,
    /// Nothing moved: a wall or agent was in the way, the target was off the map, or the
    /// label was not a direction.
    Blocked,
    MovedToEmpty,
}

impl Outcome {
    /// Interprets the marker [`resolve`] returned.
    pub fn from_move(moved: Option<Marker>) -> Outcome {
        match moved {
            Some(Marker::Flag) => Outcome::CapturedFlag,
            Some(Marker::Bomb) => Outcome::HitBomb,
            Some(_) => Outcome::MovedToEmpty,
            None => Outcome::Blocked,
        }
    }

    pub fn score_delta(&self) -> i32 {
        match self {
            Outcome::CapturedFlag => 1,
            Outcome::HitBomb => -1,
            Outcome::Blocked | Outcome::MovedToEmpty => 0,
        }
    }
}

/// Moves `agent` one step towards `label` if the target cell allows it.
///
/// Returns the marker the target held before the move, or `None` when nothing moved.
/// The agent's old cell is cleared; the new one keeps its old marker until the view over
/// the agent is closed and stamps it.
pub fn resolve(map: &mut Map, agent: &mut Agent, label: &str) -> Option<Marker> {
    let direction = Direction::from_label(label)?;
    let target = *map.neighbours(agent.position).get(&direction)?;
    let marker = map.get(target)?;

    if !marker.is_passable() {
        return None;
    }

    map.set_cells(Marker::Empty, &[agent.position]);
    agent.position = target;

    Some(marker)
}
