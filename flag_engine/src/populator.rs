//! Scatters walls, flags and bombs over a fresh map.
//!
//! Every placement lands on a random empty point and its mirror, so the finished map is
//! symmetric in everything but the agents. Cells around the starting positions stay clear.

use crate::config::GameConfig;
use crate::entities::{Marker, Point};
use crate::map::Map;
use rand::Rng;
use std::collections::HashSet;

/// Populates `map` with walls, then flags, then bombs.
///
/// `starts` are the agents' starting positions. Their neighbourhoods are kept empty; the
/// agent cells themselves are never empty and so are skipped anyway.
pub fn populate<R: Rng + ?Sized>(
    map: &mut Map,
    rng: &mut R,
    config: &GameConfig,
    starts: &[Point],
) {
    let protected = protected_points(map, starts);
    let area = map.width() * map.height();

    for (marker, divisor) in [
        (Marker::Wall, config.wall_divisor),
        (Marker::Flag, config.flag_divisor),
        (Marker::Bomb, config.bomb_divisor),
    ] {
        let placed = scatter(map, rng, marker, area / divisor, &protected);
        log::debug!("Placed {} cells of {:?}", placed, marker);
    }
}

/// The neighbours of every start, including points that fall off the map.
///
/// Off-map points can never be sampled, so keeping them is harmless.
pub fn protected_points(map: &Map, starts: &[Point]) -> HashSet<Point> {
    starts
        .iter()
        .flat_map(|start| map.neighbours(*start).into_values())
        .collect()
}

/// Places `marker` in symmetric pairs until `count` goes negative.
///
/// Each pair takes 2 off `count` and the loop runs while it is still `>= 0`, so one pair
/// more than `count / 2` is placed. There is no cap on rejected samples; a map too full to
/// take the pairs never returns.
fn scatter<R: Rng + ?Sized>(
    map: &mut Map,
    rng: &mut R,
    marker: Marker,
    count: usize,
    protected: &HashSet<Point>,
) -> usize {
    let mut remaining = count as i64;
    let mut placed = 0;

    while remaining >= 0 {
        let point = map.random_point(rng);
        if map.get(point) != Some(Marker::Empty) || protected.contains(&point) {
            continue;
        }

        let mirrored = map.mirror(point);
        map.set_cells(marker, &[point, mirrored]);
        placed += if point == mirrored { 1 } else { 2 };
        remaining -= 2;
    }

    placed
}
