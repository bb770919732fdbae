use crate::games::{FeedbackKind, GameContext, GameEvent, GamePhase, GameSpecError, TimerKind};
use crate::traits::GameMachine;
use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where the sequence of each level comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SequenceSource {
    /// Fixed grid patterns played in order. Highlighted cells are recalled
    /// left to right.
    Presets { patterns: Vec<Vec<bool>> },

    /// Random sequence over `pads` that grows by one element per level
    Growing { pads: usize, start_length: usize },
}

/// Sequence recall content (pattern memory, sequence builder)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SequenceRecallSpec {
    pub source: SequenceSource,

    /// Solved levels needed to win the activity
    pub levels_to_complete: u32,

    /// Delay between playback steps at level one
    pub step_delay_ms: u64,

    /// Playback never gets faster than this
    pub min_step_delay_ms: u64,

    /// Speed-up applied after each solved level
    pub delay_decrement_ms: u64,
}

impl SequenceRecallSpec {
    pub fn presets(patterns: Vec<Vec<bool>>) -> Self {
        let levels = patterns.len() as u32;
        Self {
            source: SequenceSource::Presets { patterns },
            levels_to_complete: levels,
            step_delay_ms: 600,
            min_step_delay_ms: 300,
            delay_decrement_ms: 50,
        }
    }

    pub fn growing(pads: usize, start_length: usize, levels_to_complete: u32) -> Self {
        Self {
            source: SequenceSource::Growing { pads, start_length },
            levels_to_complete,
            step_delay_ms: 800,
            min_step_delay_ms: 250,
            delay_decrement_ms: 75,
        }
    }

    pub fn with_step_delay(mut self, step_ms: u64, min_ms: u64, decrement_ms: u64) -> Self {
        self.step_delay_ms = step_ms;
        self.min_step_delay_ms = min_ms;
        self.delay_decrement_ms = decrement_ms;
        self
    }

    /// Number of clickable pads / grid cells
    pub fn pad_count(&self) -> usize {
        match &self.source {
            SequenceSource::Presets { patterns } => patterns.first().map_or(0, Vec::len),
            SequenceSource::Growing { pads, .. } => *pads,
        }
    }

    pub fn validate(&self) -> Result<(), GameSpecError> {
        match &self.source {
            SequenceSource::Presets { patterns } => {
                let width = patterns.first().ok_or(GameSpecError::Empty("patterns"))?.len();
                for (i, pattern) in patterns.iter().enumerate() {
                    if pattern.len() != width || width == 0 {
                        return Err(GameSpecError::Invalid(format!(
                            "pattern {} has {} cells, expected {}",
                            i,
                            pattern.len(),
                            width
                        )));
                    }
                    if !pattern.iter().any(|cell| *cell) {
                        return Err(GameSpecError::Invalid(format!(
                            "pattern {} highlights no cells",
                            i
                        )));
                    }
                }
            }
            SequenceSource::Growing { pads, start_length } => {
                if *pads < 2 {
                    return Err(GameSpecError::Invalid("need at least two pads".to_string()));
                }
                if *start_length == 0 {
                    return Err(GameSpecError::Empty("start sequence"));
                }
            }
        }

        if self.levels_to_complete == 0 {
            return Err(GameSpecError::Invalid(
                "levels_to_complete must be positive".to_string(),
            ));
        }
        if self.step_delay_ms == 0 || self.min_step_delay_ms > self.step_delay_ms {
            return Err(GameSpecError::Invalid(
                "step delay must be positive and not below its floor".to_string(),
            ));
        }
        Ok(())
    }
}

/// Highlighted cells of a preset pattern, in recall order
pub fn pattern_order(pattern: &[bool]) -> Vec<usize> {
    pattern
        .iter()
        .enumerate()
        .filter(|(_, lit)| **lit)
        .map(|(i, _)| i)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum SequenceRecallPhase {
    Waiting,
    Showing,
    Input,
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum SequenceRecallInput {
    /// Play back the current level (from Waiting or after a Failure)
    Start,
    /// Click a pad
    Press(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SequenceRecallView {
    pub phase: SequenceRecallPhase,
    pub pads: usize,
    pub level: u32,
    pub levels_to_complete: u32,
    pub highlighted: Option<usize>,
    pub sequence_length: usize,
    /// Correct presses so far in the input phase
    pub entered: usize,
    pub score: u32,
    pub step_delay_ms: u64,
}

/// Waiting → Showing → Input → Success | Failure, with a difficulty ramp
/// between levels.
#[derive(Debug, Clone)]
pub struct SequenceRecall {
    spec: SequenceRecallSpec,
    phase: SequenceRecallPhase,
    level: u32,
    sequence: Vec<usize>,
    preset_index: usize,
    step_delay_ms: u64,
    reveal_pos: usize,
    highlighted: Option<usize>,
    entered: usize,
    score: u32,
}

impl SequenceRecall {
    pub fn new(spec: SequenceRecallSpec) -> Self {
        let step_delay_ms = spec.step_delay_ms;
        Self {
            spec,
            phase: SequenceRecallPhase::Waiting,
            level: 1,
            sequence: Vec::new(),
            preset_index: 0,
            step_delay_ms,
            reveal_pos: 0,
            highlighted: None,
            entered: 0,
            score: 0,
        }
    }

    /// Expected presses of the current level
    pub fn sequence(&self) -> &[usize] {
        &self.sequence
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn step_delay_ms(&self) -> u64 {
        self.step_delay_ms
    }

    fn set_phase(&mut self, to: SequenceRecallPhase, ctx: &mut GameContext<'_>) {
        if self.phase != to {
            ctx.emit(GameEvent::PhaseChanged {
                from: GamePhase::SequenceRecall(self.phase),
                to: GamePhase::SequenceRecall(to),
            });
            self.phase = to;
        }
    }

    fn set_highlight(&mut self, pad: Option<usize>, ctx: &mut GameContext<'_>) {
        if self.highlighted != pad {
            self.highlighted = pad;
            ctx.emit(GameEvent::Highlight { pad });
        }
    }

    fn load_first_sequence(&mut self, ctx: &mut GameContext<'_>) {
        self.sequence = match &self.spec.source {
            SequenceSource::Presets { patterns } => patterns
                .first()
                .map(|p| pattern_order(p))
                .unwrap_or_default(),
            SequenceSource::Growing { pads, start_length } => {
                let (pads, len) = (*pads, *start_length);
                (0..len).map(|_| ctx.rng().gen_range(0..pads)).collect()
            }
        };
    }

    fn load_next_sequence(&mut self, ctx: &mut GameContext<'_>) {
        match &self.spec.source {
            SequenceSource::Presets { patterns } => {
                self.preset_index = (self.preset_index + 1) % patterns.len().max(1);
                self.sequence = patterns
                    .get(self.preset_index)
                    .map(|p| pattern_order(p))
                    .unwrap_or_default();
            }
            SequenceSource::Growing { pads, .. } => {
                let pads = *pads;
                let next = ctx.rng().gen_range(0..pads);
                self.sequence.push(next);
            }
        }
    }

    fn begin_playback(&mut self, ctx: &mut GameContext<'_>) {
        ctx.cancel(TimerKind::RevealStep);
        self.reveal_pos = 0;
        self.entered = 0;
        self.set_highlight(None, ctx);
        self.set_phase(SequenceRecallPhase::Showing, ctx);
        ctx.schedule(self.step_delay_ms, TimerKind::RevealStep);
    }

    fn reveal_step(&mut self, ctx: &mut GameContext<'_>) {
        if let Some(&pad) = self.sequence.get(self.reveal_pos) {
            self.reveal_pos += 1;
            self.set_highlight(Some(pad), ctx);
            ctx.schedule(self.step_delay_ms, TimerKind::RevealStep);
        } else {
            self.set_highlight(None, ctx);
            self.set_phase(SequenceRecallPhase::Input, ctx);
        }
    }

    fn press(&mut self, pad: usize, ctx: &mut GameContext<'_>) {
        if pad >= self.spec.pad_count() {
            tracing::debug!("Ignoring press on unknown pad {}", pad);
            return;
        }

        if self.sequence.get(self.entered) != Some(&pad) {
            self.set_phase(SequenceRecallPhase::Failure, ctx);
            ctx.feedback(FeedbackKind::Error, "Wrong order! Watch the sequence again.");
            return;
        }

        self.entered += 1;
        if self.entered < self.sequence.len() {
            return;
        }

        self.score += 1;
        ctx.emit(GameEvent::ScoreChanged { score: self.score });
        self.set_phase(SequenceRecallPhase::Success, ctx);
        ctx.feedback(FeedbackKind::Success, format!("Level {} cleared!", self.level));

        if self.score >= self.spec.levels_to_complete {
            ctx.complete();
        }

        let pause = ctx.timings().level_pause_ms;
        ctx.schedule(pause, TimerKind::NextLevel);
    }

    fn next_level(&mut self, ctx: &mut GameContext<'_>) {
        self.level += 1;
        self.step_delay_ms = self
            .step_delay_ms
            .saturating_sub(self.spec.delay_decrement_ms)
            .max(self.spec.min_step_delay_ms);
        self.load_next_sequence(ctx);
        ctx.emit(GameEvent::LevelChanged { level: self.level });
        self.begin_playback(ctx);
    }
}

impl GameMachine for SequenceRecall {
    type Input = SequenceRecallInput;
    type View = SequenceRecallView;

    fn phase(&self) -> GamePhase {
        GamePhase::SequenceRecall(self.phase)
    }

    fn reset(&mut self, ctx: &mut GameContext<'_>) {
        ctx.cancel(TimerKind::RevealStep);
        ctx.cancel(TimerKind::NextLevel);
        self.set_phase(SequenceRecallPhase::Waiting, ctx);
        self.set_highlight(None, ctx);
        if self.score != 0 {
            self.score = 0;
            ctx.emit(GameEvent::ScoreChanged { score: 0 });
        }
        self.level = 1;
        self.preset_index = 0;
        self.step_delay_ms = self.spec.step_delay_ms;
        self.reveal_pos = 0;
        self.entered = 0;
        self.load_first_sequence(ctx);
    }

    fn handle_input(&mut self, input: SequenceRecallInput, ctx: &mut GameContext<'_>) {
        match (self.phase, input) {
            (
                SequenceRecallPhase::Waiting | SequenceRecallPhase::Failure,
                SequenceRecallInput::Start,
            ) => self.begin_playback(ctx),
            (SequenceRecallPhase::Input, SequenceRecallInput::Press(pad)) => self.press(pad, ctx),
            (phase, input) => {
                tracing::debug!("Sequence recall ignores {:?} while {:?}", input, phase);
            }
        }
    }

    fn on_timer(&mut self, timer: TimerKind, ctx: &mut GameContext<'_>) {
        match (self.phase, timer) {
            (SequenceRecallPhase::Showing, TimerKind::RevealStep) => self.reveal_step(ctx),
            (SequenceRecallPhase::Success, TimerKind::NextLevel) => self.next_level(ctx),
            _ => {}
        }
    }

    fn view(&self) -> SequenceRecallView {
        SequenceRecallView {
            phase: self.phase,
            pads: self.spec.pad_count(),
            level: self.level,
            levels_to_complete: self.spec.levels_to_complete,
            highlighted: self.highlighted,
            sequence_length: self.sequence.len(),
            entered: self.entered,
            score: self.score,
            step_delay_ms: self.step_delay_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_order() {
        assert_eq!(pattern_order(&[true, false, true, false, true]), vec![0, 2, 4]);
        assert!(pattern_order(&[false, false]).is_empty());
    }

    #[test]
    fn test_pad_count() {
        let spec = SequenceRecallSpec::presets(vec![vec![true, false, true]]);
        assert_eq!(spec.pad_count(), 3);
        assert_eq!(SequenceRecallSpec::growing(4, 2, 5).pad_count(), 4);
    }

    #[test]
    fn test_validate_rejects_ragged_presets() {
        let spec = SequenceRecallSpec::presets(vec![vec![true, false], vec![true]]);
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_pattern() {
        let spec = SequenceRecallSpec::presets(vec![vec![false, false]]);
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_floor_above_delay() {
        let spec = SequenceRecallSpec::growing(4, 1, 3).with_step_delay(200, 300, 10);
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_validate_ok() {
        assert!(SequenceRecallSpec::growing(4, 1, 3).validate().is_ok());
        assert!(SequenceRecallSpec::presets(vec![vec![true, false, true, false, true]])
            .validate()
            .is_ok());
    }
}
