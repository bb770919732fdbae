use crate::games::{GameKind, GameSpec};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Activity ID (dense, 1-based, stable across sessions)
pub type ActivityId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        };
        f.pad(label)
    }
}

/// Catalog entry: display metadata plus the bound game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Activity {
    pub id: ActivityId,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub category: String,

    /// Display hint only (e.g. "5 min")
    pub estimated_time: String,

    /// XP awarded on first completion
    pub points: u32,

    pub game: GameSpec,
}

impl Activity {
    pub fn new(id: ActivityId, title: impl Into<String>, game: GameSpec) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            difficulty: Difficulty::Beginner,
            category: "General".to_string(),
            estimated_time: "5 min".to_string(),
            points: 10,
            game,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_estimated_time(mut self, estimated_time: impl Into<String>) -> Self {
        self.estimated_time = estimated_time.into();
        self
    }

    pub fn with_points(mut self, points: u32) -> Self {
        self.points = points;
        self
    }

    pub fn game_kind(&self) -> GameKind {
        self.game.kind()
    }

    /// Card record for the host page
    pub fn view(&self, completed: bool) -> ActivityView {
        ActivityView {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            difficulty: self.difficulty,
            category: self.category.clone(),
            estimated_time: self.estimated_time.clone(),
            points: self.points,
            completed,
            game_kind: self.game_kind(),
        }
    }
}

/// What an activity card shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ActivityView {
    pub id: ActivityId,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub category: String,
    pub estimated_time: String,
    pub points: u32,
    pub completed: bool,
    pub game_kind: GameKind,
}
