//! Game templates and the session that hosts them.
//!
//! Every mini-game is a data record ([`GameSpec`]) bound to one of five
//! state machines. A [`GameSession`] owns the running machine together
//! with its timers, feedback and completion guard.

mod context;
mod drag_classify;
mod events;
mod pairs_memory;
mod sequence_recall;
mod session;
mod single_shot;
mod timed_match;
mod timers;

pub use context::GameContext;
pub use drag_classify::{
    DragClassify, DragClassifyInput, DragClassifyPhase, DragClassifySpec, DragClassifyView,
    SortItem, SortItemSpec,
};
pub use events::{Feedback, FeedbackKind, GameEvent};
pub use pairs_memory::{
    Card, CardView, PairsMemory, PairsMemoryInput, PairsMemoryPhase, PairsMemorySpec,
    PairsMemoryView,
};
pub use sequence_recall::{
    pattern_order, SequenceRecall, SequenceRecallInput, SequenceRecallPhase, SequenceRecallSpec,
    SequenceRecallView, SequenceSource,
};
pub use session::{GameEngine, GameSession, SessionView};
pub use single_shot::{
    Answer, AnswerKind, EndPolicy, MissPolicy, Question, SingleShot, SingleShotInput,
    SingleShotPhase, SingleShotSpec, SingleShotView,
};
pub use timed_match::{TimedMatch, TimedMatchInput, TimedMatchPhase, TimedMatchSpec, TimedMatchView};
pub use timers::{ScheduledTimer, TimerKind, TimerQueue, TimerToken};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Content that fails validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameSpecError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("invalid game content: {0}")]
    Invalid(String),
}

/// The five game templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    TimedMatch,
    SequenceRecall,
    PairsMemory,
    DragClassify,
    SingleShot,
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GameKind::TimedMatch => "Timed match",
            GameKind::SequenceRecall => "Sequence recall",
            GameKind::PairsMemory => "Pairs memory",
            GameKind::DragClassify => "Drag & sort",
            GameKind::SingleShot => "Question",
        };
        write!(f, "{}", label)
    }
}

/// A game bound to an activity: template plus content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "template", rename_all = "snake_case")]
pub enum GameSpec {
    TimedMatch(TimedMatchSpec),
    SequenceRecall(SequenceRecallSpec),
    PairsMemory(PairsMemorySpec),
    DragClassify(DragClassifySpec),
    SingleShot(SingleShotSpec),
}

impl GameSpec {
    pub fn kind(&self) -> GameKind {
        match self {
            GameSpec::TimedMatch(_) => GameKind::TimedMatch,
            GameSpec::SequenceRecall(_) => GameKind::SequenceRecall,
            GameSpec::PairsMemory(_) => GameKind::PairsMemory,
            GameSpec::DragClassify(_) => GameKind::DragClassify,
            GameSpec::SingleShot(_) => GameKind::SingleShot,
        }
    }

    pub fn validate(&self) -> Result<(), GameSpecError> {
        match self {
            GameSpec::TimedMatch(spec) => spec.validate(),
            GameSpec::SequenceRecall(spec) => spec.validate(),
            GameSpec::PairsMemory(spec) => spec.validate(),
            GameSpec::DragClassify(spec) => spec.validate(),
            GameSpec::SingleShot(spec) => spec.validate(),
        }
    }
}

/// Player input addressed to whichever template is running
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum GameInput {
    TimedMatch(TimedMatchInput),
    SequenceRecall(SequenceRecallInput),
    PairsMemory(PairsMemoryInput),
    DragClassify(DragClassifyInput),
    SingleShot(SingleShotInput),
}

impl GameInput {
    pub fn kind(&self) -> GameKind {
        match self {
            GameInput::TimedMatch(_) => GameKind::TimedMatch,
            GameInput::SequenceRecall(_) => GameKind::SequenceRecall,
            GameInput::PairsMemory(_) => GameKind::PairsMemory,
            GameInput::DragClassify(_) => GameKind::DragClassify,
            GameInput::SingleShot(_) => GameKind::SingleShot,
        }
    }
}

impl From<TimedMatchInput> for GameInput {
    fn from(input: TimedMatchInput) -> Self {
        GameInput::TimedMatch(input)
    }
}

impl From<SequenceRecallInput> for GameInput {
    fn from(input: SequenceRecallInput) -> Self {
        GameInput::SequenceRecall(input)
    }
}

impl From<PairsMemoryInput> for GameInput {
    fn from(input: PairsMemoryInput) -> Self {
        GameInput::PairsMemory(input)
    }
}

impl From<DragClassifyInput> for GameInput {
    fn from(input: DragClassifyInput) -> Self {
        GameInput::DragClassify(input)
    }
}

impl From<SingleShotInput> for GameInput {
    fn from(input: SingleShotInput) -> Self {
        GameInput::SingleShot(input)
    }
}

/// Phase of whichever template is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum GamePhase {
    TimedMatch(TimedMatchPhase),
    SequenceRecall(SequenceRecallPhase),
    PairsMemory(PairsMemoryPhase),
    DragClassify(DragClassifyPhase),
    SingleShot(SingleShotPhase),
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GamePhase::TimedMatch(phase) => write!(f, "{:?}", phase),
            GamePhase::SequenceRecall(phase) => write!(f, "{:?}", phase),
            GamePhase::PairsMemory(phase) => write!(f, "{:?}", phase),
            GamePhase::DragClassify(phase) => write!(f, "{:?}", phase),
            GamePhase::SingleShot(phase) => write!(f, "{:?}", phase),
        }
    }
}

/// Render snapshot of whichever template is running
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "template", rename_all = "snake_case")]
pub enum GameView {
    TimedMatch(TimedMatchView),
    SequenceRecall(SequenceRecallView),
    PairsMemory(PairsMemoryView),
    DragClassify(DragClassifyView),
    SingleShot(SingleShotView),
}

impl GameView {
    pub fn kind(&self) -> GameKind {
        match self {
            GameView::TimedMatch(_) => GameKind::TimedMatch,
            GameView::SequenceRecall(_) => GameKind::SequenceRecall,
            GameView::PairsMemory(_) => GameKind::PairsMemory,
            GameView::DragClassify(_) => GameKind::DragClassify,
            GameView::SingleShot(_) => GameKind::SingleShot,
        }
    }
}
