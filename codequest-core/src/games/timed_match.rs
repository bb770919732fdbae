use crate::games::{FeedbackKind, GameContext, GameEvent, GamePhase, GameSpecError, TimerKind};
use crate::traits::GameMachine;
use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Timed matching content (color match, number match)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TimedMatchSpec {
    /// Instruction shown above the target
    pub prompt: String,

    /// Clickable options; the target is always one of them
    pub options: Vec<String>,

    /// Round length in seconds
    pub duration_secs: u32,

    /// Score that wins the activity when time runs out
    #[serde(default)]
    pub target_score: Option<u32>,
}

impl TimedMatchSpec {
    pub fn new(prompt: impl Into<String>, options: &[&str], duration_secs: u32) -> Self {
        Self {
            prompt: prompt.into(),
            options: options.iter().map(|o| o.to_string()).collect(),
            duration_secs,
            target_score: None,
        }
    }

    pub fn with_target_score(mut self, score: u32) -> Self {
        self.target_score = Some(score);
        self
    }

    pub fn validate(&self) -> Result<(), GameSpecError> {
        if self.options.is_empty() {
            return Err(GameSpecError::Empty("options"));
        }
        if self.duration_secs == 0 {
            return Err(GameSpecError::Invalid(
                "duration must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum TimedMatchPhase {
    Idle,
    Running,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum TimedMatchInput {
    /// Start the countdown
    Start,
    /// Click the option at this index
    Pick(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TimedMatchView {
    pub phase: TimedMatchPhase,
    pub prompt: String,
    pub options: Vec<String>,
    pub target: String,
    pub score: u32,
    pub time_left_secs: u32,
    pub duration_secs: u32,
    pub target_score: Option<u32>,
}

/// Idle → Running → Expired. Correct picks score and redraw the target
/// until the countdown reaches zero.
#[derive(Debug, Clone)]
pub struct TimedMatch {
    spec: TimedMatchSpec,
    phase: TimedMatchPhase,
    target: usize,
    score: u32,
    time_left: u32,
}

impl TimedMatch {
    pub fn new(spec: TimedMatchSpec) -> Self {
        let time_left = spec.duration_secs;
        Self {
            spec,
            phase: TimedMatchPhase::Idle,
            target: 0,
            score: 0,
            time_left,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_left_secs(&self) -> u32 {
        self.time_left
    }

    /// Index of the option that currently scores
    pub fn target_index(&self) -> usize {
        self.target
    }

    fn set_phase(&mut self, to: TimedMatchPhase, ctx: &mut GameContext<'_>) {
        if self.phase != to {
            ctx.emit(GameEvent::PhaseChanged {
                from: GamePhase::TimedMatch(self.phase),
                to: GamePhase::TimedMatch(to),
            });
            self.phase = to;
        }
    }

    /// Draw a new target, different from the current one when possible
    fn redraw(&mut self, ctx: &mut GameContext<'_>) {
        let count = self.spec.options.len();
        if count <= 1 {
            self.target = 0;
            return;
        }
        let mut next = ctx.rng().gen_range(0..count - 1);
        if next >= self.target {
            next += 1;
        }
        self.target = next;
    }

    fn pick(&mut self, index: usize, ctx: &mut GameContext<'_>) {
        if index >= self.spec.options.len() {
            tracing::debug!("Ignoring pick of unknown option {}", index);
            return;
        }

        if index == self.target {
            self.score += 1;
            ctx.emit(GameEvent::ScoreChanged { score: self.score });
            ctx.feedback(FeedbackKind::Success, "Correct!");
            self.redraw(ctx);
        } else {
            ctx.feedback(FeedbackKind::Error, "Not a match, keep going!");
        }
    }

    fn expire(&mut self, ctx: &mut GameContext<'_>) {
        self.set_phase(TimedMatchPhase::Expired, ctx);
        ctx.feedback(
            FeedbackKind::Info,
            format!("Time's up! Final score: {}", self.score),
        );

        if let Some(target) = self.spec.target_score {
            if self.score >= target {
                ctx.complete();
            }
        }
    }
}

impl GameMachine for TimedMatch {
    type Input = TimedMatchInput;
    type View = TimedMatchView;

    fn phase(&self) -> GamePhase {
        GamePhase::TimedMatch(self.phase)
    }

    fn reset(&mut self, ctx: &mut GameContext<'_>) {
        ctx.cancel(TimerKind::Countdown);
        self.set_phase(TimedMatchPhase::Idle, ctx);
        if self.score != 0 {
            self.score = 0;
            ctx.emit(GameEvent::ScoreChanged { score: 0 });
        }
        self.time_left = self.spec.duration_secs;
        let count = self.spec.options.len().max(1);
        self.target = ctx.rng().gen_range(0..count);
    }

    fn handle_input(&mut self, input: TimedMatchInput, ctx: &mut GameContext<'_>) {
        match (self.phase, input) {
            (TimedMatchPhase::Idle, TimedMatchInput::Start) => {
                self.time_left = self.spec.duration_secs;
                self.set_phase(TimedMatchPhase::Running, ctx);
                let tick = ctx.timings().countdown_tick_ms;
                ctx.schedule(tick, TimerKind::Countdown);
            }
            (TimedMatchPhase::Running, TimedMatchInput::Pick(index)) => self.pick(index, ctx),
            (phase, input) => {
                tracing::debug!("Timed match ignores {:?} while {:?}", input, phase);
            }
        }
    }

    fn on_timer(&mut self, timer: TimerKind, ctx: &mut GameContext<'_>) {
        if timer != TimerKind::Countdown || self.phase != TimedMatchPhase::Running {
            return;
        }

        self.time_left = self.time_left.saturating_sub(1);
        ctx.emit(GameEvent::Countdown {
            remaining_secs: self.time_left,
        });

        if self.time_left == 0 {
            self.expire(ctx);
        } else {
            let tick = ctx.timings().countdown_tick_ms;
            ctx.schedule(tick, TimerKind::Countdown);
        }
    }

    fn view(&self) -> TimedMatchView {
        TimedMatchView {
            phase: self.phase,
            prompt: self.spec.prompt.clone(),
            options: self.spec.options.clone(),
            target: self
                .spec
                .options
                .get(self.target)
                .cloned()
                .unwrap_or_default(),
            score: self.score,
            time_left_secs: self.time_left,
            duration_secs: self.spec.duration_secs,
            target_score: self.spec.target_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameTimings;
    use crate::games::TimerQueue;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Harness {
        timers: TimerQueue,
        rng: StdRng,
        timings: GameTimings,
        events: Vec<GameEvent>,
        now: u64,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                timers: TimerQueue::new(),
                rng: StdRng::seed_from_u64(7),
                timings: GameTimings::default(),
                events: Vec::new(),
                now: 0,
            }
        }

        fn run<F: FnOnce(&mut TimedMatch, &mut GameContext<'_>)>(
            &mut self,
            game: &mut TimedMatch,
            f: F,
        ) {
            let mut ctx = GameContext::new(
                self.now,
                &mut self.timers,
                &mut self.rng,
                &self.timings,
                &mut self.events,
            );
            f(game, &mut ctx);
        }

        fn advance(&mut self, game: &mut TimedMatch, ms: u64) {
            let target = self.now + ms;
            while let Some(timer) = self.timers.pop_due(target) {
                self.now = timer.due_at;
                self.run(game, |g, ctx| g.on_timer(timer.kind, ctx));
            }
            self.now = target;
        }
    }

    fn colors() -> TimedMatch {
        TimedMatch::new(TimedMatchSpec::new(
            "Click the matching color",
            &["red", "green", "blue", "yellow"],
            3,
        ))
    }

    #[test]
    fn test_start_runs_countdown() {
        let mut h = Harness::new();
        let mut game = colors();
        h.run(&mut game, |g, ctx| g.reset(ctx));
        h.run(&mut game, |g, ctx| g.handle_input(TimedMatchInput::Start, ctx));

        assert_eq!(game.phase, TimedMatchPhase::Running);
        h.advance(&mut game, 1000);
        assert_eq!(game.time_left_secs(), 2);
    }

    #[test]
    fn test_correct_pick_scores_and_redraws() {
        let mut h = Harness::new();
        let mut game = colors();
        h.run(&mut game, |g, ctx| g.reset(ctx));
        h.run(&mut game, |g, ctx| g.handle_input(TimedMatchInput::Start, ctx));

        let before = game.target_index();
        h.run(&mut game, |g, ctx| {
            g.handle_input(TimedMatchInput::Pick(before), ctx)
        });

        assert_eq!(game.score(), 1);
        assert_ne!(game.target_index(), before);
    }

    #[test]
    fn test_wrong_pick_does_not_score() {
        let mut h = Harness::new();
        let mut game = colors();
        h.run(&mut game, |g, ctx| g.reset(ctx));
        h.run(&mut game, |g, ctx| g.handle_input(TimedMatchInput::Start, ctx));

        let wrong = (game.target_index() + 1) % 4;
        h.run(&mut game, |g, ctx| g.handle_input(TimedMatchInput::Pick(wrong), ctx));

        assert_eq!(game.score(), 0);
        assert!(h
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::Feedback { feedback } if feedback.is_error())));
    }

    #[test]
    fn test_picks_before_start_are_ignored() {
        let mut h = Harness::new();
        let mut game = colors();
        h.run(&mut game, |g, ctx| g.reset(ctx));
        let target = game.target_index();
        h.run(&mut game, |g, ctx| g.handle_input(TimedMatchInput::Pick(target), ctx));

        assert_eq!(game.score(), 0);
        assert_eq!(game.phase, TimedMatchPhase::Idle);
    }

    #[test]
    fn test_expired_freezes_input() {
        let mut h = Harness::new();
        let mut game = colors();
        h.run(&mut game, |g, ctx| g.reset(ctx));
        h.run(&mut game, |g, ctx| g.handle_input(TimedMatchInput::Start, ctx));
        h.advance(&mut game, 3000);

        assert_eq!(game.phase, TimedMatchPhase::Expired);
        assert_eq!(game.time_left_secs(), 0);

        for index in 0..4 {
            h.run(&mut game, |g, ctx| g.handle_input(TimedMatchInput::Pick(index), ctx));
        }
        assert_eq!(game.score(), 0);
        assert!(!h.timers.is_scheduled(TimerKind::Countdown));
    }

    #[test]
    fn test_target_score_completes_on_expiry() {
        let mut h = Harness::new();
        let mut game = TimedMatch::new(
            TimedMatchSpec::new("Match the number", &["1", "2", "3"], 2).with_target_score(1),
        );
        h.run(&mut game, |g, ctx| g.reset(ctx));
        h.run(&mut game, |g, ctx| g.handle_input(TimedMatchInput::Start, ctx));
        let target = game.target_index();
        h.run(&mut game, |g, ctx| g.handle_input(TimedMatchInput::Pick(target), ctx));
        h.advance(&mut game, 2000);

        assert!(h.events.contains(&GameEvent::Completed));
    }

    #[test]
    fn test_validate() {
        assert!(TimedMatchSpec::new("x", &[], 10).validate().is_err());
        assert!(TimedMatchSpec::new("x", &["a"], 0).validate().is_err());
        assert!(TimedMatchSpec::new("x", &["a"], 10).validate().is_ok());
    }
}
