use crate::config::GameConfig;
use crate::entities::{Agent, Direction, Marker, Point};
use crate::error::Error;
use crossterm::{
    cursor::Hide,
    execute,
    style::{Color, Print, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::io::{stdout, Write};

/// How obstacles and rewards are mirrored across the map.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Symmetry {
    /// Mirrored left to right.
    Vertical,
    /// Mirrored top to bottom.
    Horizontal,
    /// Point symmetry around the center.
    Central,
}

impl Symmetry {
    pub fn label(&self) -> char {
        match self {
            Symmetry::Vertical => 'V',
            Symmetry::Horizontal => 'H',
            Symmetry::Central => 'C',
        }
    }

    pub fn from_label(label: &str) -> Option<Symmetry> {
        match label {
            "V" => Some(Symmetry::Vertical),
            "H" => Some(Symmetry::Horizontal),
            "C" => Some(Symmetry::Central),
            _ => None,
        }
    }
}

impl Distribution<Symmetry> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Symmetry {
        match rng.gen_range(0..3) {
            0 => Symmetry::Vertical,
            1 => Symmetry::Horizontal,
            _ => Symmetry::Central,
        }
    }
}

/// An edge of the map, for [`Map::set_border`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Border {
    Top,
    Right,
    Bottom,
    Left,
}

pub struct Map {
    width: usize,
    height: usize,
    symmetry: Symmetry,
    cells: Vec<Marker>,
}

impl Map {
    /// Creates a map where every cell is empty.
    ///
    /// Zero sides are allowed and give a map with no cells, which renders as `height` empty lines.
    pub fn new(width: usize, height: usize, symmetry: Symmetry) -> Map {
        Map {
            width,
            height,
            symmetry,
            cells: vec![Marker::Empty; width * height],
        }
    }

    /// Creates a map with random even dimensions and a random symmetry, and places both agents.
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        config: &GameConfig,
        first: &mut Agent,
        second: &mut Agent,
    ) -> Map {
        let width = config.min_side + 2 * rng.gen_range(0..config.side_choices());
        let height = config.min_side + 2 * rng.gen_range(0..config.side_choices());
        let symmetry: Symmetry = rng.gen();

        Map::with_agents(width, height, symmetry, rng, first, second)
    }

    /// Creates an empty map of the given shape and places both agents.
    ///
    /// The first agent lands on a random cell and the second one on its mirror.
    pub fn with_agents<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        symmetry: Symmetry,
        rng: &mut R,
        first: &mut Agent,
        second: &mut Agent,
    ) -> Map {
        let mut map = Map::new(width, height, symmetry);

        first.position = map.random_point(rng);
        second.position = map.mirror(first.position);
        map.set_cells(Marker::AgentPresent, &[first.position, second.position]);

        log::debug!(
            "Created {}x{} map with {:?} symmetry, agents at {:?} and {:?}",
            width,
            height,
            symmetry,
            first.position,
            second.position
        );

        map
    }

    /// Parses a map fixture.
    ///
    /// ```text
    /// rows 2
    /// cols 4
    /// symmetry V
    /// m R..R
    /// m #$$#
    /// ```
    pub fn parse(map_contents: &str) -> Result<Map, Error> {
        let height = header(map_contents, "rows")?;
        let width = header(map_contents, "cols")?;

        let symmetry = Regex::new(r"symmetry (\S+)")?
            .captures(map_contents)
            .and_then(|captures| captures.get(1))
            .ok_or(Error::MissingHeader("symmetry"))?
            .as_str();
        let symmetry =
            Symmetry::from_label(symmetry).ok_or(Error::InvalidSymmetry(symmetry.to_string()))?;

        if width == 0 || height == 0 {
            return Err(Error::EmptyMap);
        }

        let mut map = Map::new(width, height, symmetry);

        let rows: Vec<&str> = Regex::new(r"(?m)^\s*m (.*)$")?
            .captures_iter(map_contents)
            .filter_map(|captures| captures.get(1))
            .map(|row| row.as_str().trim_end_matches('\r'))
            .collect();

        if rows.len() != height {
            return Err(Error::RowCount {
                found: rows.len(),
                expected: height,
            });
        }

        for (y, row) in rows.into_iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(Error::RowLength {
                    row: y,
                    found,
                    expected: width,
                });
            }

            for (x, value) in row.chars().enumerate() {
                let marker = Marker::from_char(value).ok_or(Error::InvalidCharacter(value))?;
                map.cells[y * width + x] = marker;
            }
        }

        Ok(map)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn symmetry(&self) -> Symmetry {
        self.symmetry
    }

    /// Reflects a point across the symmetry axis. Applying it twice gives back the point.
    pub fn mirror(&self, point: Point) -> Point {
        let (x, y) = point;
        let width = self.width as i32;
        let height = self.height as i32;

        match self.symmetry {
            Symmetry::Vertical => (width - 1 - x, y),
            Symmetry::Horizontal => (x, height - 1 - y),
            Symmetry::Central => (width - 1 - x, height - 1 - y),
        }
    }

    /// The eight points around `point`, keyed by direction.
    ///
    /// Points are not bounds checked: around a border cell some of them lie off the map.
    pub fn neighbours(&self, point: Point) -> HashMap<Direction, Point> {
        Direction::ALL
            .into_iter()
            .map(|direction| (direction, direction.apply(point)))
            .collect()
    }

    /// The marker at `point`, or `None` when it is off the map.
    pub fn get(&self, point: Point) -> Option<Marker> {
        self.index(point).map(|index| self.cells[index])
    }

    /// Writes `marker` to every point. Points off the map are skipped.
    pub fn set_cells(&mut self, marker: Marker, points: &[Point]) {
        for point in points {
            if let Some(index) = self.index(*point) {
                self.cells[index] = marker;
            }
        }
    }

    /// Overwrites whole edges with `marker`.
    ///
    /// Edges are written top, right, bottom then left, so where two edges meet the later one wins.
    pub fn set_border(&mut self, borders: &[Border], marker: Marker) {
        let width = self.width as i32;
        let height = self.height as i32;

        for edge in [Border::Top, Border::Right, Border::Bottom, Border::Left] {
            if !borders.contains(&edge) {
                continue;
            }

            let points: Vec<Point> = match edge {
                Border::Top => (0..width).map(|x| (x, 0)).collect(),
                Border::Right => (0..height).map(|y| (width - 1, y)).collect(),
                Border::Bottom => (0..width).map(|x| (x, height - 1)).collect(),
                Border::Left => (0..height).map(|y| (0, y)).collect(),
            };
            self.set_cells(marker, &points);
        }
    }

    /// How many cells hold `marker`.
    pub fn count(&self, marker: Marker) -> usize {
        self.cells.iter().filter(|cell| **cell == marker).count()
    }

    /// All points holding `marker`, in row-major order.
    pub fn find(&self, marker: Marker) -> Vec<Point> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == marker)
            .map(|(index, _)| ((index % self.width) as i32, (index / self.width) as i32))
            .collect()
    }

    /// A uniformly random point on the map.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        (
            rng.gen_range(0..self.width) as i32,
            rng.gen_range(0..self.height) as i32,
        )
    }

    /// The map as text: one line per row, one char per cell.
    pub fn render(&self) -> String {
        let mut result = String::with_capacity((self.width + 1) * self.height);

        for row in self.rows() {
            result.extend(row.iter().map(|marker| marker.char()));
            result.push('\n');
        }

        result
    }

    pub fn draw(&self, turn: usize, agents: &[Agent]) -> Result<(), Error> {
        let mut stdout = stdout();

        // Display information about the game
        execute!(
            stdout,
            Clear(ClearType::All),
            Hide,
            Print("Turn: "),
            Print(turn.to_string())
        )?;

        // Display information about the agents
        for agent in agents {
            execute!(
                stdout,
                Print("\n"),
                Print(agent.name()),
                Print(": Score = "),
                Print(agent.score.to_string()),
                Print(", Position = "),
                Print(format!("{:?}", agent.position))
            )?;
        }
        execute!(stdout, Print("\n\n"))?;

        // Display the map
        for row in self.rows() {
            for marker in row {
                execute!(
                    stdout,
                    SetForegroundColor(marker.color()),
                    Print(marker.char()),
                    SetForegroundColor(Color::Reset)
                )?;
            }
            execute!(stdout, Print("\n"))?;
        }

        stdout.flush()?;
        Ok(())
    }

    /// Row slices, top to bottom. A zero-width map still yields `height` empty rows.
    fn rows(&self) -> impl Iterator<Item = &[Marker]> + '_ {
        (0..self.height).map(move |y| &self.cells[y * self.width..(y + 1) * self.width])
    }

    fn index(&self, point: Point) -> Option<usize> {
        let (x, y) = point;
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }

        Some(y as usize * self.width + x as usize)
    }
}

fn header(map_contents: &str, name: &'static str) -> Result<usize, Error> {
    Regex::new(&format!(r"{} (\d+)", name))?
        .captures(map_contents)
        .and_then(|captures| captures.get(1))
        .and_then(|value| value.as_str().parse().ok())
        .ok_or(Error::MissingHeader(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::{prop_assert, prop_assert_eq, proptest};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn when_parsing_a_map_it_is_created_with_the_correct_width_height_and_symmetry() {
        let map = "\
            rows 2
            cols 4
            symmetry H
            m R..R
            m #$$#";
        let map = Map::parse(map).unwrap();

        assert_eq!(map.width(), 4);
        assert_eq!(map.height(), 2);
        assert_eq!(map.symmetry(), Symmetry::Horizontal);
    }

    #[test]
    fn when_getting_a_cell_the_correct_marker_is_returned() {
        let map = "\
            rows 2
            cols 4
            symmetry V
            m R.!Y
            m #$$#";
        let map = Map::parse(map).unwrap();

        assert_eq!(map.get((0, 0)), Some(Marker::AgentPresent));
        assert_eq!(map.get((1, 0)), Some(Marker::Empty));
        assert_eq!(map.get((2, 0)), Some(Marker::Bomb));
        assert_eq!(map.get((3, 0)), Some(Marker::AgentActive));
        assert_eq!(map.get((0, 1)), Some(Marker::Wall));
        assert_eq!(map.get((1, 1)), Some(Marker::Flag));
    }

    #[test]
    fn when_getting_a_cell_off_the_map_none_is_returned() {
        let map = Map::new(4, 2, Symmetry::Central);

        assert_eq!(map.get((-1, 0)), None);
        assert_eq!(map.get((0, -1)), None);
        assert_eq!(map.get((4, 0)), None);
        assert_eq!(map.get((0, 2)), None);
        assert_eq!(map.get((3, 1)), Some(Marker::Empty));
    }

    #[test]
    fn when_parsing_a_map_with_an_unknown_character_an_error_is_returned() {
        let map = "\
            rows 1
            cols 2
            symmetry C
            m .%";

        assert!(matches!(Map::parse(map), Err(Error::InvalidCharacter('%'))));
    }

    #[test]
    fn when_parsing_a_map_without_headers_an_error_is_returned() {
        assert!(matches!(
            Map::parse("cols 2\nsymmetry C\nm .."),
            Err(Error::MissingHeader("rows"))
        ));
        assert!(matches!(
            Map::parse("rows 1\ncols 2\nm .."),
            Err(Error::MissingHeader("symmetry"))
        ));
        assert!(matches!(
            Map::parse("rows 1\ncols 2\nsymmetry X\nm .."),
            Err(Error::InvalidSymmetry(_))
        ));
        assert!(matches!(
            Map::parse("rows 0\ncols 2\nsymmetry C"),
            Err(Error::EmptyMap)
        ));
    }

    #[test]
    fn when_parsing_a_map_with_the_wrong_shape_an_error_is_returned() {
        assert!(matches!(
            Map::parse("rows 2\ncols 2\nsymmetry C\nm .."),
            Err(Error::RowCount {
                found: 1,
                expected: 2
            })
        ));
        assert!(matches!(
            Map::parse("rows 1\ncols 2\nsymmetry C\nm ..."),
            Err(Error::RowLength {
                row: 0,
                found: 3,
                expected: 2
            })
        ));
    }

    #[test]
    fn when_mirroring_each_symmetry_reflects_across_its_axis() {
        let vertical = Map::new(20, 30, Symmetry::Vertical);
        let horizontal = Map::new(20, 30, Symmetry::Horizontal);
        let central = Map::new(20, 30, Symmetry::Central);

        assert_eq!(vertical.mirror((2, 5)), (17, 5));
        assert_eq!(horizontal.mirror((2, 5)), (2, 24));
        assert_eq!(central.mirror((2, 5)), (17, 24));
        assert_eq!(central.mirror((0, 0)), (19, 29));
    }

    proptest! {
        #[test]
        fn mirroring_twice_returns_the_original_point(
            half_width in 10usize..25,
            half_height in 10usize..25,
            x in 0i32..48,
            y in 0i32..48,
            axis in 0usize..3,
        ) {
            let width = half_width * 2;
            let height = half_height * 2;
            let symmetry = [Symmetry::Vertical, Symmetry::Horizontal, Symmetry::Central][axis];
            let map = Map::new(width, height, symmetry);
            let point = (x % width as i32, y % height as i32);

            let mirrored = map.mirror(point);
            prop_assert!(map.get(mirrored).is_some());
            prop_assert_eq!(map.mirror(mirrored), point);
        }
    }

    #[test]
    fn when_getting_neighbours_all_eight_directions_are_returned_unbounded() {
        let map = Map::new(4, 4, Symmetry::Central);
        let neighbours = map.neighbours((0, 0));

        assert_eq!(neighbours.len(), 8);
        assert_eq!(neighbours[&Direction::UpLeft], (-1, -1));
        assert_eq!(neighbours[&Direction::Left], (-1, 0));
        assert_eq!(neighbours[&Direction::DownLeft], (-1, 1));
        assert_eq!(neighbours[&Direction::Up], (0, -1));
        assert_eq!(neighbours[&Direction::Down], (0, 1));
        assert_eq!(neighbours[&Direction::UpRight], (1, -1));
        assert_eq!(neighbours[&Direction::Right], (1, 0));
        assert_eq!(neighbours[&Direction::DownRight], (1, 1));
    }

    #[test]
    fn when_setting_cells_points_off_the_map_are_ignored() {
        let mut map = Map::new(3, 3, Symmetry::Central);
        map.set_cells(Marker::Flag, &[(0, 0), (2, 2), (-1, 0), (3, 3)]);

        assert_eq!(map.get((0, 0)), Some(Marker::Flag));
        assert_eq!(map.get((2, 2)), Some(Marker::Flag));
        assert_eq!(map.count(Marker::Flag), 2);
    }

    #[test]
    fn when_rendering_each_row_is_a_newline_terminated_line() {
        let map = "\
            rows 2
            cols 3
            symmetry C
            m R#$
            m !.Y";
        let map = Map::parse(map).unwrap();

        assert_eq!(map.render(), "R#$\n! Y\n");
    }

    #[test]
    fn when_rendering_a_map_without_cells_it_does_not_panic() {
        let narrow = Map::new(0, 3, Symmetry::Vertical);
        let flat = Map::new(4, 0, Symmetry::Horizontal);

        assert_eq!(narrow.render(), "\n\n\n");
        assert_eq!(narrow.get((0, 0)), None);
        assert_eq!(flat.render(), "");
        assert!(flat.find(Marker::Empty).is_empty());
    }

    #[test]
    fn when_finding_markers_points_are_returned_in_row_major_order() {
        let map = "\
            rows 2
            cols 3
            symmetry C
            m $.$
            m .$.";
        let map = Map::parse(map).unwrap();

        assert_eq!(map.find(Marker::Flag), vec![(0, 0), (2, 0), (1, 1)]);
        assert_eq!(map.count(Marker::Empty), 3);
    }

    #[test]
    fn when_setting_borders_the_last_edge_wins_at_corners() {
        let mut map = Map::new(3, 3, Symmetry::Central);
        map.set_border(&[Border::Left, Border::Top], Marker::Wall);
        map.set_border(&[Border::Bottom, Border::Right], Marker::Bomb);

        assert_eq!(map.render(), "##!\n# !\n!!!\n");
    }

    #[test]
    fn when_setting_top_and_left_borders_left_wins_the_shared_corner() {
        let mut map = Map::new(3, 2, Symmetry::Central);
        map.set_cells(Marker::Flag, &[(0, 0)]);
        map.set_border(&[Border::Top, Border::Left], Marker::Wall);

        assert_eq!(map.get((0, 0)), Some(Marker::Wall));
        assert_eq!(map.render(), "###\n#  \n");
    }

    #[test]
    fn when_placing_agents_the_second_one_mirrors_the_first() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut first = Agent::new("first");
            let mut second = Agent::new("second");

            let map = Map::generate(&mut rng, &GameConfig::default(), &mut first, &mut second);

            assert_eq!(second.position, map.mirror(first.position));
            assert_ne!(first.position, second.position);
            assert_eq!(map.get(first.position), Some(Marker::AgentPresent));
            assert_eq!(map.get(second.position), Some(Marker::AgentPresent));
            assert_eq!(map.count(Marker::AgentPresent), 2);
        }
    }

    #[test]
    fn when_generating_maps_the_sides_are_even_and_within_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = GameConfig::default();

        for _ in 0..50 {
            let mut first = Agent::new("first");
            let mut second = Agent::new("second");
            let map = Map::generate(&mut rng, &config, &mut first, &mut second);

            assert_eq!(map.width() % 2, 0);
            assert_eq!(map.height() % 2, 0);
            assert!((20..50).contains(&map.width()));
            assert!((20..50).contains(&map.height()));
        }
    }
}
