use crate::entities::{Agent, Point};
use crate::error::Error;
use crate::map::Map;
use crate::movement::Outcome;
use serde::Serialize;
use serde_json::json;
use std::{collections::HashMap, fs::File, io::BufWriter};

pub fn create_replay_logger(
    filename: Option<String>,
    map: &Map,
    agents: &[Agent],
) -> Box<dyn ReplayLogger> {
    match filename {
        None => Box::new(NoOpReplayLogger {}),
        Some(filename) => Box::new(JsonReplayLogger::new(filename, map, agents)),
    }
}

pub trait ReplayLogger: Send + Sync {
    #[allow(unused_variables)]
    fn log_turn(&mut self, turn: usize, scores: Vec<i32>) {}

    #[allow(unused_variables)]
    fn log_move(&mut self, turn: usize, event: MoveEvent) {}

    #[allow(unused_variables)]
    fn log_end_game(&mut self, scores: HashMap<String, i32>) {}

    fn save(&self) -> Result<(), Error> {
        Ok(())
    }
}

/// One agent turn as recorded in a replay.
#[derive(Clone, Debug, Serialize)]
pub struct MoveEvent {
    pub agent: String,
    pub direction: String,
    pub outcome: Outcome,
    pub location: Point,
    pub destination: Point,
}

struct Turn {
    turn: usize,
    scores: Vec<i32>,
}

struct NoOpReplayLogger;
impl ReplayLogger for NoOpReplayLogger {}

struct JsonReplayLogger {
    filename: String,
    agents: Vec<(String, String)>,
    map_width: usize,
    map_height: usize,
    symmetry: char,
    map_contents: String,
    turns: Vec<Turn>,
    events: HashMap<usize, Vec<MoveEvent>>,
    final_scores: Option<HashMap<String, i32>>,
}

impl JsonReplayLogger {
    pub fn new(filename: String, map: &Map, agents: &[Agent]) -> JsonReplayLogger {
        JsonReplayLogger {
            filename,
            agents: agents
                .iter()
                .map(|agent| (agent.id().to_string(), agent.name().to_string()))
                .collect(),
            map_width: map.width(),
            map_height: map.height(),
            symmetry: map.symmetry().label(),
            map_contents: map.render(),
            turns: Vec::new(),
            events: HashMap::new(),
            final_scores: None,
        }
    }

    fn to_json(&self) -> serde_json::Value {
        let turns: Vec<_> = self
            .turns
            .iter()
            .map(|turn| {
                json!({
                    "turn": turn.turn,
                    "scores": turn.scores,
                    "events": self.events.get(&turn.turn).unwrap_or(&Vec::new()),
                })
            })
            .collect();

        let agents: Vec<_> = self
            .agents
            .iter()
            .map(|(id, name)| json!({ "id": id, "name": name }))
            .collect();

        json!({
            "agents": agents,
            "map": {
                "width": self.map_width,
                "height": self.map_height,
                "symmetry": self.symmetry.to_string(),
                "contents": self.map_contents,
            },
            "turns": turns,
            "final_scores": self.final_scores,
        })
    }
}

impl ReplayLogger for JsonReplayLogger {
    fn log_turn(&mut self, turn: usize, scores: Vec<i32>) {
        self.turns.push(Turn { turn, scores });
    }

    fn log_move(&mut self, turn: usize, event: MoveEvent) {
        self.events.entry(turn).or_default().push(event);
    }

    fn log_end_game(&mut self, scores: HashMap<String, i32>) {
        self.final_scores = Some(scores);
    }

    fn save(&self) -> Result<(), Error> {
        let file = File::create(&self.filename)?;
        let mut writer = BufWriter::new(&file);
        serde_json::to_writer_pretty(&mut writer, &self.to_json())?;
        log::info!("Saved replay to {}", self.filename);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Symmetry;

    fn logger() -> JsonReplayLogger {
        let map = Map::new(4, 2, Symmetry::Vertical);
        let agents = [Agent::at("first", (0, 0)), Agent::at("second", (3, 0))];
        JsonReplayLogger::new("unused.json".to_string(), &map, &agents)
    }

    #[test]
    fn when_logging_moves_they_are_grouped_under_their_turn() {
        let mut logger = logger();
        logger.log_move(
            1,
            MoveEvent {
                agent: "first".to_string(),
                direction: "R".to_string(),
                outcome: Outcome::CapturedFlag,
                location: (0, 0),
                destination: (1, 0),
            },
        );
        logger.log_turn(1, vec![1, 0]);
        logger.log_turn(2, vec![1, 0]);

        let json = logger.to_json();

        assert_eq!(json["map"]["width"], 4);
        assert_eq!(json["map"]["symmetry"], "V");
        assert_eq!(json["agents"][1]["name"], "second");
        assert_eq!(json["turns"][0]["scores"], json!([1, 0]));
        assert_eq!(json["turns"][0]["events"][0]["outcome"], "CapturedFlag");
        assert_eq!(json["turns"][0]["events"][0]["destination"], json!([1, 0]));
        assert_eq!(json["turns"][1]["events"], json!([]));
        assert!(json["final_scores"].is_null());
    }

    #[test]
    fn when_the_game_ends_the_final_scores_are_recorded() {
        let mut logger = logger();
        logger.log_end_game(HashMap::from([("first".to_string(), 3)]));

        assert_eq!(logger.to_json()["final_scores"]["first"], 3);
    }

    #[test]
    fn when_saving_a_replay_a_json_file_is_written() {
        let path = std::env::temp_dir().join(format!("flag_replay_{}.json", uuid::Uuid::new_v4()));
        let map = Map::new(4, 2, Symmetry::Central);
        let logger = create_replay_logger(
            Some(path.to_string_lossy().to_string()),
            &map,
            &[Agent::new("first"), Agent::new("second")],
        );

        logger.save().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(json["map"]["contents"], "    \n    \n");
        std::fs::remove_file(path).unwrap();
    }
}
