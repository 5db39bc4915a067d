use include_dir::{include_dir, Dir};
use itertools::Itertools;
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::error::Error;

use crate::answer::AnswerKey;

static PUZZLE_DIR: Dir = include_dir!("src/puzzles");

/// One textual "still": a short caption plus a small ascii frame.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub caption: String,
    pub art: Vec<String>,
}

/// A playable movie: two accepted title variants and the stills revealed as
/// hints, one per attempt.
#[derive(Deserialize, Clone, Debug)]
pub struct Puzzle {
    pub name: String,
    pub primary_title: String,
    pub alternate_title: String,
    pub frames: Vec<Frame>,
}

impl Puzzle {
    pub fn load(name: &str) -> Result<Self, Box<dyn Error>> {
        let file = PUZZLE_DIR
            .get_file(format!("{name}.json"))
            .ok_or_else(|| format!("unknown puzzle '{name}'"))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| format!("puzzle '{name}' is not valid utf-8"))?;
        let puzzle: Puzzle = serde_json::from_str(contents)?;
        if puzzle.frames.is_empty() {
            return Err(format!("puzzle '{name}' has no frames").into());
        }
        Ok(puzzle)
    }

    /// Picks one of the embedded puzzles at random.
    pub fn random() -> Self {
        let names = Self::names();
        let name = names
            .choose(&mut rand::thread_rng())
            .expect("no puzzles embedded in the binary");
        Self::load(name).expect("embedded puzzle failed to parse")
    }

    pub fn names() -> Vec<String> {
        PUZZLE_DIR
            .files()
            .filter_map(|f| {
                let name = f.path().file_name()?.to_str()?;
                name.strip_suffix(".json").map(str::to_string)
            })
            .sorted()
            .collect()
    }

    pub fn answer_key(&self) -> AnswerKey {
        AnswerKey::new(self.primary_title.clone(), self.alternate_title.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_sorted_and_nonempty() {
        let names = Puzzle::names();
        assert!(!names.is_empty());
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_fight_club_is_embedded() {
        let puzzle = Puzzle::load("fight_club").unwrap();
        assert_eq!(puzzle.primary_title, "Fight Club");
        assert_eq!(puzzle.alternate_title, "El club de la lucha");
    }

    #[test]
    fn test_unknown_puzzle_errors() {
        assert!(Puzzle::load("no_such_movie").is_err());
    }

    #[test]
    fn test_every_puzzle_parses_with_four_frames() {
        for name in Puzzle::names() {
            let puzzle = Puzzle::load(&name).unwrap();
            assert_eq!(puzzle.frames.len(), 4, "{name} should carry four stills");
            for frame in &puzzle.frames {
                assert!(!frame.caption.is_empty());
                assert!(!frame.art.is_empty());
            }
        }
    }

    #[test]
    fn test_answer_key_accepts_both_titles() {
        let key = Puzzle::load("fight_club").unwrap().answer_key();
        assert!(key.matches("fight club"));
        assert!(key.matches("EL CLUB DE LA LUCHA"));
        assert!(!key.matches("se7en"));
    }

    #[test]
    fn test_random_returns_an_embedded_puzzle() {
        let puzzle = Puzzle::random();
        assert!(Puzzle::names().contains(&puzzle.name));
    }
}
