use crate::config::GameTimings;
use crate::domain::ActivityId;
use crate::games::{
    DragClassify, Feedback, GameContext, GameEvent, GameInput, GameKind, GamePhase, GameSpec,
    GameSpecError, GameView, PairsMemory, SequenceRecall, SingleShot, TimedMatch, TimerKind,
    TimerQueue,
};
use crate::traits::GameMachine;
use rand::rngs::StdRng;
use rand::SeedableRng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The running state machine of a session
#[derive(Debug, Clone)]
pub enum GameEngine {
    TimedMatch(TimedMatch),
    SequenceRecall(SequenceRecall),
    PairsMemory(PairsMemory),
    DragClassify(DragClassify),
    SingleShot(SingleShot),
}

impl GameEngine {
    pub fn from_spec(spec: &GameSpec) -> Self {
        match spec {
            GameSpec::TimedMatch(s) => GameEngine::TimedMatch(TimedMatch::new(s.clone())),
            GameSpec::SequenceRecall(s) => {
                GameEngine::SequenceRecall(SequenceRecall::new(s.clone()))
            }
            GameSpec::PairsMemory(s) => GameEngine::PairsMemory(PairsMemory::new(s.clone())),
            GameSpec::DragClassify(s) => GameEngine::DragClassify(DragClassify::new(s.clone())),
            GameSpec::SingleShot(s) => GameEngine::SingleShot(SingleShot::new(s.clone())),
        }
    }

    pub fn kind(&self) -> GameKind {
        match self {
            GameEngine::TimedMatch(_) => GameKind::TimedMatch,
            GameEngine::SequenceRecall(_) => GameKind::SequenceRecall,
            GameEngine::PairsMemory(_) => GameKind::PairsMemory,
            GameEngine::DragClassify(_) => GameKind::DragClassify,
            GameEngine::SingleShot(_) => GameKind::SingleShot,
        }
    }

    pub fn phase(&self) -> GamePhase {
        match self {
            GameEngine::TimedMatch(g) => g.phase(),
            GameEngine::SequenceRecall(g) => g.phase(),
            GameEngine::PairsMemory(g) => g.phase(),
            GameEngine::DragClassify(g) => g.phase(),
            GameEngine::SingleShot(g) => g.phase(),
        }
    }

    pub fn view(&self) -> GameView {
        match self {
            GameEngine::TimedMatch(g) => GameView::TimedMatch(g.view()),
            GameEngine::SequenceRecall(g) => GameView::SequenceRecall(g.view()),
            GameEngine::PairsMemory(g) => GameView::PairsMemory(g.view()),
            GameEngine::DragClassify(g) => GameView::DragClassify(g.view()),
            GameEngine::SingleShot(g) => GameView::SingleShot(g.view()),
        }
    }

    fn reset(&mut self, ctx: &mut GameContext<'_>) {
        match self {
            GameEngine::TimedMatch(g) => g.reset(ctx),
            GameEngine::SequenceRecall(g) => g.reset(ctx),
            GameEngine::PairsMemory(g) => g.reset(ctx),
            GameEngine::DragClassify(g) => g.reset(ctx),
            GameEngine::SingleShot(g) => g.reset(ctx),
        }
    }

    fn handle_input(&mut self, input: GameInput, ctx: &mut GameContext<'_>) {
        match (self, input) {
            (GameEngine::TimedMatch(g), GameInput::TimedMatch(i)) => g.handle_input(i, ctx),
            (GameEngine::SequenceRecall(g), GameInput::SequenceRecall(i)) => {
                g.handle_input(i, ctx)
            }
            (GameEngine::PairsMemory(g), GameInput::PairsMemory(i)) => g.handle_input(i, ctx),
            (GameEngine::DragClassify(g), GameInput::DragClassify(i)) => g.handle_input(i, ctx),
            (GameEngine::SingleShot(g), GameInput::SingleShot(i)) => g.handle_input(i, ctx),
            (engine, input) => {
                tracing::debug!(
                    "Ignoring {} input for a {} game",
                    input.kind(),
                    engine.kind()
                );
            }
        }
    }

    fn on_timer(&mut self, timer: TimerKind, ctx: &mut GameContext<'_>) {
        match self {
            GameEngine::TimedMatch(g) => g.on_timer(timer, ctx),
            GameEngine::SequenceRecall(g) => g.on_timer(timer, ctx),
            GameEngine::PairsMemory(g) => g.on_timer(timer, ctx),
            GameEngine::DragClassify(g) => g.on_timer(timer, ctx),
            GameEngine::SingleShot(g) => g.on_timer(timer, ctx),
        }
    }
}

/// Snapshot of a mounted session for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SessionView {
    pub session_id: Uuid,
    pub activity_id: ActivityId,
    pub feedback: Option<Feedback>,
    pub completed: bool,
    pub game: GameView,
}

/// One mounted game: created when the dialog opens, disposed when it closes.
///
/// The session owns the timers of its game on a logical millisecond clock
/// advanced by the host. `Completed` is reported at most once per mount,
/// even across resets.
#[derive(Debug)]
pub struct GameSession {
    id: Uuid,
    activity_id: ActivityId,
    engine: GameEngine,
    timers: TimerQueue,
    rng: StdRng,
    timings: GameTimings,
    now_ms: u64,
    feedback: Option<Feedback>,
    completed: bool,
    disposed: bool,
}

impl GameSession {
    /// Mount a game with a randomly seeded draw
    pub fn new(
        activity_id: ActivityId,
        spec: &GameSpec,
        timings: GameTimings,
    ) -> Result<Self, GameSpecError> {
        Self::with_rng(activity_id, spec, timings, StdRng::from_entropy())
    }

    /// Mount a game with a reproducible draw
    pub fn with_seed(
        activity_id: ActivityId,
        spec: &GameSpec,
        timings: GameTimings,
        seed: u64,
    ) -> Result<Self, GameSpecError> {
        Self::with_rng(activity_id, spec, timings, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(
        activity_id: ActivityId,
        spec: &GameSpec,
        timings: GameTimings,
        rng: StdRng,
    ) -> Result<Self, GameSpecError> {
        spec.validate()?;

        let mut session = Self {
            id: Uuid::new_v4(),
            activity_id,
            engine: GameEngine::from_spec(spec),
            timers: TimerQueue::new(),
            rng,
            timings,
            now_ms: 0,
            feedback: None,
            completed: false,
            disposed: false,
        };
        // Initial draw; nothing is listening yet
        session.run(|engine, ctx| engine.reset(ctx));

        tracing::debug!(
            "🎮 Mounted {} game for activity {} (session {})",
            session.engine.kind(),
            activity_id,
            session.id
        );
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn activity_id(&self) -> ActivityId {
        self.activity_id
    }

    pub fn kind(&self) -> GameKind {
        self.engine.kind()
    }

    pub fn phase(&self) -> GamePhase {
        self.engine.phase()
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Due time of the next pending transition
    pub fn next_due(&self) -> Option<u64> {
        self.timers.next_due()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            session_id: self.id,
            activity_id: self.activity_id,
            feedback: self.feedback.clone(),
            completed: self.completed,
            game: self.engine.view(),
        }
    }

    /// Feed one player input to the game
    pub fn handle_input(&mut self, input: GameInput) -> Vec<GameEvent> {
        if self.disposed {
            tracing::debug!("Session {} disposed, ignoring input", self.id);
            return Vec::new();
        }
        let events = self.run(|engine, ctx| engine.handle_input(input, ctx));
        self.absorb(events)
    }

    /// Move the clock forward and fire every timer that came due, in order
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<GameEvent> {
        if self.disposed {
            return Vec::new();
        }

        let target = self.now_ms.saturating_add(elapsed_ms);
        let mut fired = Vec::new();
        while let Some(timer) = self.timers.pop_due(target) {
            self.now_ms = timer.due_at;
            if timer.kind == TimerKind::ClearFeedback {
                if self.feedback.take().is_some() {
                    fired.push(GameEvent::FeedbackCleared);
                }
                continue;
            }
            fired.extend(self.run(|engine, ctx| engine.on_timer(timer.kind, ctx)));
        }
        self.now_ms = target;

        self.absorb(fired)
    }

    /// Back to the initial phase with a fresh draw and no pending timers
    pub fn reset(&mut self) -> Vec<GameEvent> {
        if self.disposed {
            return Vec::new();
        }

        let cancelled = self.timers.clear();
        tracing::debug!(
            "🔄 Resetting session {} ({} timers cancelled)",
            self.id,
            cancelled
        );
        self.feedback = None;

        let mut events = vec![GameEvent::Reset];
        events.extend(self.run(|engine, ctx| engine.reset(ctx)));
        self.absorb(events)
    }

    /// Unmount: cancel every pending timer. Later calls are no-ops.
    pub fn dispose(&mut self) -> usize {
        if self.disposed {
            return 0;
        }
        self.disposed = true;
        self.feedback = None;
        let cancelled = self.timers.clear();
        tracing::debug!(
            "🧹 Disposed session {} ({} timers cancelled)",
            self.id,
            cancelled
        );
        cancelled
    }

    fn run<F>(&mut self, f: F) -> Vec<GameEvent>
    where
        F: FnOnce(&mut GameEngine, &mut GameContext<'_>),
    {
        let mut events = Vec::new();
        let mut ctx = GameContext::new(
            self.now_ms,
            &mut self.timers,
            &mut self.rng,
            &self.timings,
            &mut events,
        );
        f(&mut self.engine, &mut ctx);
        events
    }

    /// Track feedback and drop repeated completions
    fn absorb(&mut self, events: Vec<GameEvent>) -> Vec<GameEvent> {
        events
            .into_iter()
            .filter(|event| match event {
                GameEvent::Feedback { feedback } => {
                    self.feedback = Some(feedback.clone());
                    true
                }
                GameEvent::Completed if self.completed => {
                    tracing::debug!("Session {} already reported completion", self.id);
                    false
                }
                GameEvent::Completed => {
                    self.completed = true;
                    tracing::info!(
                        "🏁 Activity {} completed in session {}",
                        self.activity_id,
                        self.id
                    );
                    true
                }
                _ => true,
            })
            .collect()
    }
}
