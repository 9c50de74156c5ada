use crate::error::Error;
use serde::Deserialize;

/// Parameters of a game.
///
/// Every field has a default, so a JSON config only needs the fields it overrides.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Number of rounds; each agent acts once per round.
    pub turns: usize,
    /// Smallest side length (inclusive). Must be even.
    pub min_side: usize,
    /// Upper bound for side lengths (exclusive).
    pub max_side: usize,
    /// One wall per `wall_divisor` cells, before the extra symmetric pair.
    pub wall_divisor: usize,
    pub flag_divisor: usize,
    pub bomb_divisor: usize,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            turns: 200,
            min_side: 20,
            max_side: 50,
            wall_divisor: 10,
            flag_divisor: 20,
            bomb_divisor: 20,
        }
    }
}

impl GameConfig {
    /// Parses and validates a config from JSON.
    pub fn from_json(contents: &str) -> Result<GameConfig, Error> {
        let config: GameConfig = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.min_side % 2 != 0 {
            return Err(Error::InvalidConfig(format!(
                "min_side must be even, got {}",
                self.min_side
            )));
        }

        // Both agents and their neighbourhoods must fit with room left to scatter
        if self.min_side < 8 {
            return Err(Error::InvalidConfig(format!(
                "min_side must be at least 8, got {}",
                self.min_side
            )));
        }

        if self.max_side <= self.min_side {
            return Err(Error::InvalidConfig(format!(
                "max_side ({}) must be greater than min_side ({})",
                self.max_side, self.min_side
            )));
        }

        if self.wall_divisor == 0 || self.flag_divisor == 0 || self.bomb_divisor == 0 {
            return Err(Error::InvalidConfig(
                "density divisors must be greater than zero".to_string(),
            ));
        }

        // Placement never gives up, so the map has to keep enough room to sample from
        let density = 1.0 / self.wall_divisor as f64
            + 1.0 / self.flag_divisor as f64
            + 1.0 / self.bomb_divisor as f64;
        if density > 0.5 {
            return Err(Error::InvalidConfig(format!(
                "walls, flags and bombs would cover {:.0}% of the map, at most 50% is allowed",
                density * 100.0
            )));
        }

        Ok(())
    }

    /// How many even side lengths a generated map can pick from.
    pub fn side_choices(&self) -> usize {
        (self.max_side - self.min_side + 1) / 2
    }
}
