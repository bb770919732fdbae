use crate::application::{ActivityCommand, ActivityEvent};
use crate::config::GameTimings;
use crate::domain::{
    Activity, ActivityCatalog, ActivityId, ActivityView, CompletionRecord, ProgressError,
};
use crate::games::{GameEvent, GameInput, GameSession, SessionView};

/// Activities event loop: owns the catalog, the completion record and at
/// most one mounted game.
#[derive(Debug)]
pub struct ActivityEventLoop {
    catalog: ActivityCatalog,
    record: CompletionRecord,
    session: Option<GameSession>,
    timings: GameTimings,

    /// Base seed for reproducible draws; each mount gets `seed + n`
    seed: Option<u64>,
    mounts: u64,
}

impl ActivityEventLoop {
    pub fn new(catalog: ActivityCatalog) -> Self {
        Self {
            catalog,
            record: CompletionRecord::new(),
            session: None,
            timings: GameTimings::default(),
            seed: None,
            mounts: 0,
        }
    }

    pub fn with_timings(mut self, timings: GameTimings) -> Self {
        self.timings = timings;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Process a single command and return the resulting events
    pub fn handle_command(&mut self, command: ActivityCommand) -> Vec<ActivityEvent> {
        let name = command.name();
        match command {
            ActivityCommand::OpenActivity { activity_id } => self.handle_open(activity_id),
            ActivityCommand::CloseActivity => match self.close_session() {
                Some(event) => vec![event],
                None => vec![not_open(name)],
            },
            ActivityCommand::Input { input } => self.handle_input(input),
            ActivityCommand::ResetGame => self.handle_reset(),
            ActivityCommand::Tick { elapsed_ms } => self.handle_tick(elapsed_ms),
            ActivityCommand::CompleteActivity { activity_id } => {
                self.handle_complete(activity_id)
            }
        }
    }

    fn handle_open(&mut self, activity_id: ActivityId) -> Vec<ActivityEvent> {
        let mut events = Vec::new();

        let Some(activity) = self.catalog.get(activity_id) else {
            events.push(ActivityEvent::CommandFailed {
                command: "OpenActivity".to_string(),
                reason: format!("Activity {} not found", activity_id),
            });
            return events;
        };
        let title = activity.title.clone();

        let mounted = match self.seed {
            Some(seed) => GameSession::with_seed(
                activity_id,
                &activity.game,
                self.timings.clone(),
                seed.wrapping_add(self.mounts),
            ),
            None => GameSession::new(activity_id, &activity.game, self.timings.clone()),
        };

        match mounted {
            Ok(session) => {
                // One dialog at a time
                events.extend(self.close_session());

                tracing::info!("📂 Opened activity {} ({})", activity_id, title);
                self.mounts += 1;
                events.push(ActivityEvent::ActivityOpened {
                    activity_id,
                    session_id: session.id(),
                });
                self.session = Some(session);
            }
            Err(e) => events.push(ActivityEvent::CommandFailed {
                command: "OpenActivity".to_string(),
                reason: e.to_string(),
            }),
        }
        events
    }

    fn close_session(&mut self) -> Option<ActivityEvent> {
        let mut session = self.session.take()?;
        let cancelled_timers = session.dispose();
        tracing::info!("📁 Closed activity {}", session.activity_id());
        Some(ActivityEvent::ActivityClosed {
            activity_id: session.activity_id(),
            session_id: session.id(),
            cancelled_timers,
        })
    }

    fn handle_input(&mut self, input: GameInput) -> Vec<ActivityEvent> {
        let Some(session) = self.session.as_mut() else {
            return vec![not_open("Input")];
        };
        let activity_id = session.activity_id();
        let game_events = session.handle_input(input);
        self.forward(activity_id, game_events)
    }

    fn handle_reset(&mut self) -> Vec<ActivityEvent> {
        let Some(session) = self.session.as_mut() else {
            return vec![not_open("ResetGame")];
        };
        let activity_id = session.activity_id();
        let game_events = session.reset();
        self.forward(activity_id, game_events)
    }

    fn handle_tick(&mut self, elapsed_ms: u64) -> Vec<ActivityEvent> {
        // Ticks keep arriving while no dialog is open
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        let activity_id = session.activity_id();
        let game_events = session.advance(elapsed_ms);
        self.forward(activity_id, game_events)
    }

    /// Wrap game events and complete the activity when the game is won
    fn forward(&mut self, activity_id: ActivityId, game_events: Vec<GameEvent>) -> Vec<ActivityEvent> {
        let mut events = Vec::with_capacity(game_events.len());
        for event in game_events {
            let won = event == GameEvent::Completed;
            events.push(ActivityEvent::Game { activity_id, event });
            if won {
                events.extend(self.handle_complete(activity_id));
            }
        }
        events
    }

    fn handle_complete(&mut self, activity_id: ActivityId) -> Vec<ActivityEvent> {
        match self.record.complete_id(&self.catalog, activity_id) {
            Ok(request) => {
                let title = self
                    .catalog
                    .get(activity_id)
                    .map(|a| a.title.clone())
                    .unwrap_or_default();
                tracing::info!(
                    "🏆 Completed activity {} for {} points ({} total)",
                    activity_id,
                    request.points,
                    self.record.total_points()
                );
                vec![
                    ActivityEvent::ActivityCompleted {
                        activity_id,
                        points: request.points,
                        total_points: self.record.total_points(),
                        completed_count: self.record.completed_count(),
                    },
                    ActivityEvent::AwardRequested { request },
                    ActivityEvent::Celebrate {
                        activity_id,
                        title,
                        points: request.points,
                    },
                ]
            }
            Err(ProgressError::AlreadyCompleted(_)) => {
                tracing::debug!("Activity {} already completed, no award", activity_id);
                Vec::new()
            }
            Err(e) => vec![ActivityEvent::CommandFailed {
                command: "CompleteActivity".to_string(),
                reason: e.to_string(),
            }],
        }
    }

    pub fn catalog(&self) -> &ActivityCatalog {
        &self.catalog
    }

    pub fn record(&self) -> &CompletionRecord {
        &self.record
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn session_view(&self) -> Option<SessionView> {
        self.session.as_ref().map(GameSession::view)
    }

    /// The activity whose dialog is open
    pub fn open_activity(&self) -> Option<&Activity> {
        self.session
            .as_ref()
            .and_then(|s| self.catalog.get(s.activity_id()))
    }

    /// Card records for the host page
    pub fn views(&self) -> Vec<ActivityView> {
        self.catalog.views(&self.record)
    }
}

impl Default for ActivityEventLoop {
    fn default() -> Self {
        Self::new(ActivityCatalog::builtin())
    }
}

fn not_open(command: &str) -> ActivityEvent {
    ActivityEvent::CommandFailed {
        command: command.to_string(),
        reason: "No activity is open".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::{GameEngine, PairsMemoryInput, TimedMatchInput};

    fn event_loop() -> ActivityEventLoop {
        ActivityEventLoop::default().with_seed(42)
    }

    fn awards(events: &[ActivityEvent]) -> usize {
        events.iter().filter(|e| e.award().is_some()).count()
    }

    #[test]
    fn test_open_activity() {
        let mut el = event_loop();
        let events = el.handle_command(ActivityCommand::OpenActivity { activity_id: 1 });

        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            ActivityEvent::ActivityOpened { activity_id: 1, .. }
        ));
        assert_eq!(el.open_activity().map(|a| a.id), Some(1));
    }

    #[test]
    fn test_open_unknown_activity_fails() {
        let mut el = event_loop();
        let events = el.handle_command(ActivityCommand::OpenActivity { activity_id: 99 });

        match &events[0] {
            ActivityEvent::CommandFailed { command, reason } => {
                assert_eq!(command, "OpenActivity");
                assert!(reason.contains("99"));
            }
            other => panic!("Expected CommandFailed, got {:?}", other),
        }
        assert!(el.session().is_none());
    }

    #[test]
    fn test_opening_another_activity_closes_previous() {
        let mut el = event_loop();
        el.handle_command(ActivityCommand::OpenActivity { activity_id: 1 });
        el.handle_command(TimedMatchInput::Start.into_command());

        let events = el.handle_command(ActivityCommand::OpenActivity { activity_id: 5 });

        assert!(matches!(
            events[0],
            ActivityEvent::ActivityClosed {
                activity_id: 1,
                cancelled_timers: 1,
                ..
            }
        ));
        assert!(matches!(
            events[1],
            ActivityEvent::ActivityOpened { activity_id: 5, .. }
        ));
    }

    #[test]
    fn test_input_without_open_activity_fails() {
        let mut el = event_loop();
        let events = el.handle_command(TimedMatchInput::Start.into_command());
        assert!(matches!(events[0], ActivityEvent::CommandFailed { .. }));
    }

    #[test]
    fn test_tick_without_open_activity_is_silent() {
        let mut el = event_loop();
        assert!(el
            .handle_command(ActivityCommand::Tick { elapsed_ms: 100 })
            .is_empty());
    }

    #[test]
    fn test_complete_twice_awards_once() {
        let mut el = event_loop();

        let first = el.handle_command(ActivityCommand::CompleteActivity { activity_id: 1 });
        assert_eq!(awards(&first), 1);
        assert!(matches!(
            first[0],
            ActivityEvent::ActivityCompleted {
                activity_id: 1,
                points: 10,
                total_points: 10,
                completed_count: 1,
            }
        ));
        assert!(matches!(first[2], ActivityEvent::Celebrate { .. }));

        let second = el.handle_command(ActivityCommand::CompleteActivity { activity_id: 1 });
        assert!(second.is_empty());
        assert_eq!(el.record().total_points(), 10);
        assert_eq!(el.record().completed_count(), 1);
    }

    #[test]
    fn test_complete_unknown_activity_fails() {
        let mut el = event_loop();
        let events = el.handle_command(ActivityCommand::CompleteActivity { activity_id: 0 });
        assert!(matches!(events[0], ActivityEvent::CommandFailed { .. }));
    }

    #[test]
    fn test_winning_a_game_completes_the_activity() {
        let mut el = event_loop();
        el.handle_command(ActivityCommand::OpenActivity { activity_id: 5 });

        let mut events = Vec::new();
        loop {
            let Some(GameEngine::PairsMemory(game)) = el.session().map(GameSession::engine)
            else {
                panic!("expected pairs memory");
            };
            let cards = game.cards();
            let Some(first) = cards.iter().position(|c| !c.matched) else {
                break;
            };
            let second = cards
                .iter()
                .enumerate()
                .position(|(i, c)| i != first && !c.matched && c.symbol == cards[first].symbol)
                .unwrap();
            for index in [first, second] {
                events.extend(
                    el.handle_command(GameInput::from(PairsMemoryInput::Flip(index)).into()),
                );
            }
        }

        assert_eq!(awards(&events), 1);
        assert!(el.record().is_completed(5));
        assert!(el.views()[4].completed);
    }

    #[test]
    fn test_reset_and_close() {
        let mut el = event_loop();
        el.handle_command(ActivityCommand::OpenActivity { activity_id: 1 });
        el.handle_command(TimedMatchInput::Start.into_command());

        let events = el.handle_command(ActivityCommand::ResetGame);
        assert!(matches!(
            events[0],
            ActivityEvent::Game {
                event: GameEvent::Reset,
                ..
            }
        ));
        assert_eq!(el.session().map(|s| s.pending_timers()), Some(0));

        let events = el.handle_command(ActivityCommand::CloseActivity);
        assert!(matches!(events[0], ActivityEvent::ActivityClosed { .. }));
        assert!(el.session().is_none());

        let events = el.handle_command(ActivityCommand::CloseActivity);
        assert!(matches!(events[0], ActivityEvent::CommandFailed { .. }));
    }

    #[test]
    fn test_ticks_drive_the_open_game() {
        let mut el = event_loop();
        el.handle_command(ActivityCommand::OpenActivity { activity_id: 1 });
        el.handle_command(TimedMatchInput::Start.into_command());

        let events = el.handle_command(ActivityCommand::Tick { elapsed_ms: 1000 });
        assert!(events.iter().any(|e| matches!(
            e,
            ActivityEvent::Game {
                event: GameEvent::Countdown { remaining_secs: 29 },
                ..
            }
        )));
    }

    trait IntoCommand {
        fn into_command(self) -> ActivityCommand;
    }

    impl IntoCommand for TimedMatchInput {
        fn into_command(self) -> ActivityCommand {
            GameInput::from(self).into()
        }
    }
}
