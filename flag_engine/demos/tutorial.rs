use flag_engine::{Controller, Direction, Game, GameConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

struct RandomController {
    rng: StdRng,
}

impl RandomController {
    fn new(seed: u64) -> RandomController {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Controller for RandomController {
    fn act(&mut self, _view: &str) -> String {
        let direction: Direction = self.rng.gen();
        direction.label().to_string()
    }
}

fn main() {
    env_logger::init();

    let replay_filename = "/tmp/flag_replay.json".to_string();

    let mut game = match Game::new(
        GameConfig::default(),
        ["red".to_string(), "blue".to_string()],
        0,
        Some(replay_filename),
    ) {
        Ok(game) => game,
        Err(e) => panic!("Error creating game: {}", e),
    };
    let mut red = RandomController::new(0);
    let mut blue = RandomController::new(1);

    let scores = match game.run(&mut [&mut red, &mut blue]) {
        Ok(scores) => scores,
        Err(e) => panic!("Error running game: {}", e),
    };

    if let Err(e) = game.draw() {
        panic!("Error drawing game: {}", e);
    }

    println!("\nFinal scores: {:?}", scores);
}
