use crate::config::GameConfig;
use crate::entities::{Agent, Point};
use crate::error::Error;
use crate::map::Map;
use crate::movement::Outcome;
use crate::populator::populate;
use crate::replay::{create_replay_logger, MoveEvent, ReplayLogger};
use crate::visibility::view_as;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

/// Decides an agent's moves.
pub trait Controller {
    /// Receives the rendered map, where the agent's own cell is `Y`, and answers with a
    /// direction label (`UL`, `L`, `DL`, `U`, `D`, `UR`, `R` or `DR`).
    fn act(&mut self, view: &str) -> String;
}

/// A match between two agents on one generated map, played round by round.
pub struct Game {
    config: GameConfig,
    map: Map,
    agents: [Agent; 2],
    turn: usize,
    next_player: usize,
    finished: bool,
    replay_logger: Box<dyn ReplayLogger>,
}

/// What happened during a single agent turn.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnReport {
    /// Index of the agent that acted.
    pub player: usize,
    /// The label the agent answered with, as given.
    pub direction: String,
    pub outcome: Outcome,
    /// Where the agent stands after the turn.
    pub position: Point,
    /// The agent's score after the turn.
    pub score: i32,
}

impl Game {
    /// Creates a new game.
    ///
    /// # Arguments
    /// * `config` - The game parameters.
    /// * `names` - The names of both agents, in turn order. They must differ, as scores are keyed by name.
    /// * `seed` - The seed for the random number generator.
    /// * `replay_filename` - The filename to save the replay of the game to. If `None`, no replay will be saved.
    pub fn new(
        config: GameConfig,
        names: [String; 2],
        seed: u64,
        replay_filename: Option<String>,
    ) -> Result<Game, Error> {
        config.validate()?;

        if names[0] == names[1] {
            return Err(Error::DuplicateName(names[0].clone()));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut agents = names.map(Agent::new);
        let [first, second] = &mut agents;

        let mut map = Map::generate(&mut rng, &config, first, second);
        populate(&mut map, &mut rng, &config, &[first.position, second.position]);

        let replay_logger = create_replay_logger(replay_filename, &map, &agents);

        Ok(Game {
            config,
            map,
            agents,
            turn: 0,
            next_player: 0,
            finished: false,
            replay_logger,
        })
    }

    /// Plays one turn for the agent whose turn it is.
    ///
    /// `decide` receives the agent's view of the map and returns a direction label.
    /// Once both agents have acted the round is over; after the last round the game is
    /// finished and the replay, if any, is saved.
    pub fn step<F>(&mut self, decide: F) -> Result<TurnReport, Error>
    where
        F: FnOnce(&str) -> String,
    {
        if self.finished {
            return Err(Error::GameFinished);
        }

        let player = self.next_player;
        let agent = &mut self.agents[player];
        let location = agent.position;

        let (direction, moved) = view_as(&mut self.map, agent, |view| {
            let direction = decide(&view.render());
            let moved = view.resolve(&direction);
            (direction, moved)
        });

        let outcome = Outcome::from_move(moved);
        agent.score += outcome.score_delta();

        log::debug!(
            "Turn {}: {} answered {:?} and {:?}, now at {:?} with score {}",
            self.turn + 1,
            agent.name(),
            direction,
            outcome,
            agent.position,
            agent.score
        );

        let report = TurnReport {
            player,
            direction: direction.clone(),
            outcome,
            position: agent.position,
            score: agent.score,
        };

        // Moves belong to the round in progress; `end_round` logs it as `turn + 1`
        self.replay_logger.log_move(
            self.turn + 1,
            MoveEvent {
                agent: agent.id().to_string(),
                direction,
                outcome,
                location,
                destination: agent.position,
            },
        );

        self.next_player = (player + 1) % self.agents.len();
        if self.next_player == 0 {
            self.end_round()?;
        }

        Ok(report)
    }

    /// Plays the game to the end and returns the final scores.
    ///
    /// `controllers` are matched to agents by position.
    pub fn run(
        &mut self,
        controllers: &mut [&mut dyn Controller],
    ) -> Result<HashMap<String, i32>, Error> {
        if controllers.len() != self.agents.len() {
            return Err(Error::ControllerCount {
                found: controllers.len(),
                expected: self.agents.len(),
            });
        }

        while !self.finished {
            let controller = &mut controllers[self.next_player];
            self.step(|view| controller.act(view))?;
        }

        Ok(self.scores())
    }

    /// The score of each agent, by name. Names are unique, see [`Game::new`].
    pub fn scores(&self) -> HashMap<String, i32> {
        self.agents
            .iter()
            .map(|agent| (agent.name().to_string(), agent.score))
            .collect()
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// The number of completed rounds.
    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Draws the game to the console.
    pub fn draw(&self) -> Result<(), Error> {
        self.map.draw(self.turn, &self.agents)
    }

    fn end_round(&mut self) -> Result<(), Error> {
        self.turn += 1;
        self.replay_logger.log_turn(
            self.turn,
            self.agents.iter().map(|agent| agent.score).collect(),
        );

        if self.turn >= self.config.turns {
            self.finished = true;
            let scores = self.scores();
            log::info!("Game finished after {} turns: {:?}", self.turn, scores);

            self.replay_logger.log_end_game(scores);
            self.replay_logger.save()?;
        }

        Ok(())
    }
}
