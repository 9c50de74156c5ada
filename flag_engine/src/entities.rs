use crossterm::style::Color;
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use serde::Serialize;
use uuid::Uuid;

/// A coordinate pair `(x, y)`.
///
/// Signed so neighbours of border cells can be expressed; those simply never match a cell.
pub type Point = (i32, i32);

/// What occupies a single cell of the map.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum Marker {
    Empty,
    Wall,
    Flag,
    Bomb,
    /// Any agent that is not currently looking at the map.
    AgentPresent,
    /// The agent whose turn it is.
    AgentActive,
}

impl Marker {
    pub fn char(&self) -> char {
        match self {
            Marker::Empty => ' ',
            Marker::Wall => '#',
            Marker::Flag => '$',
            Marker::Bomb => '!',
            Marker::AgentPresent => 'R',
            Marker::AgentActive => 'Y',
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Marker::Empty => Color::Reset,
            Marker::Wall => Color::DarkGrey,
            Marker::Flag => Color::Yellow,
            Marker::Bomb => Color::Red,
            Marker::AgentPresent => Color::Cyan,
            Marker::AgentActive => Color::Green,
        }
    }

    /// Parses a fixture character. `.` is accepted for empty cells so rows stay readable.
    pub fn from_char(value: char) -> Option<Marker> {
        match value {
            ' ' | '.' => Some(Marker::Empty),
            '#' => Some(Marker::Wall),
            '$' => Some(Marker::Flag),
            '!' => Some(Marker::Bomb),
            'R' => Some(Marker::AgentPresent),
            'Y' => Some(Marker::AgentActive),
            _ => None,
        }
    }

    /// Whether an agent may step onto a cell holding this marker.
    pub fn is_passable(&self) -> bool {
        !matches!(
            self,
            Marker::Wall | Marker::AgentPresent | Marker::AgentActive
        )
    }
}

/// The eight compass directions an agent can move in.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum Direction {
    UpLeft,
    Left,
    DownLeft,
    Up,
    Down,
    UpRight,
    Right,
    DownRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::UpLeft,
        Direction::Left,
        Direction::DownLeft,
        Direction::Up,
        Direction::Down,
        Direction::UpRight,
        Direction::Right,
        Direction::DownRight,
    ];

    /// The label agents use on the wire.
    pub fn label(&self) -> &'static str {
        match self {
            Direction::UpLeft => "UL",
            Direction::Left => "L",
            Direction::DownLeft => "DL",
            Direction::Up => "U",
            Direction::Down => "D",
            Direction::UpRight => "UR",
            Direction::Right => "R",
            Direction::DownRight => "DR",
        }
    }

    /// Parses an agent's answer. Anything but an exact label is `None`.
    pub fn from_label(label: &str) -> Option<Direction> {
        let label = label.trim();
        Direction::ALL
            .into_iter()
            .find(|direction| direction.label() == label)
    }

    /// `(dx, dy)` with `y` growing downwards.
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::UpLeft => (-1, -1),
            Direction::Left => (-1, 0),
            Direction::DownLeft => (-1, 1),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::UpRight => (1, -1),
            Direction::Right => (1, 0),
            Direction::DownRight => (1, 1),
        }
    }

    pub fn apply(&self, point: Point) -> Point {
        let (dx, dy) = self.offset();
        (point.0 + dx, point.1 + dy)
    }
}

impl Distribution<Direction> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Direction {
        Direction::ALL[rng.gen_range(0..Direction::ALL.len())]
    }
}

/// A player of the game.
///
/// The map assigns the starting position; the game driver updates the score.
#[derive(Clone, Debug, PartialEq)]
pub struct Agent {
    id: String,
    name: String,
    pub position: Point,
    pub score: i32,
}

impl Agent {
    pub fn new(name: impl Into<String>) -> Agent {
        Agent {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            position: (0, 0),
            score: 0,
        }
    }

    /// An agent already standing somewhere, as used by map fixtures.
    pub fn at(name: impl Into<String>, position: Point) -> Agent {
        Agent {
            position,
            ..Agent::new(name)
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
