use codequest_core::games::GameEngine;
use codequest_core::{
    ActivityCommand, ActivityEvent, ActivityEventLoop, GameEvent, GameSession,
    InMemoryRewardStore, RewardDispatcher,
};
use cucumber::World;
use std::fmt;

/// Host tick interval used by both shells
pub const TICK_MS: u64 = 100;

/// Seed for every scenario so shuffles are reproducible
pub const SEED: u64 = 7;

#[derive(World)]
#[world(init = Self::new)]
pub struct ActivitiesWorld {
    /// Activities event loop (the system under test)
    pub event_loop: ActivityEventLoop,

    /// Every event emitted during the scenario
    pub events: Vec<ActivityEvent>,

    /// Events of the last command
    pub last_events: Vec<ActivityEvent>,

    /// Award boundary, backed by an in-memory store
    pub dispatcher: RewardDispatcher<InMemoryRewardStore>,

    /// Events already handed to the dispatcher
    pub dispatched: usize,
}

impl fmt::Debug for ActivitiesWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivitiesWorld")
            .field("open", &self.event_loop.open_activity().map(|a| a.id))
            .field("total_points", &self.event_loop.record().total_points())
            .field("events", &self.events.len())
            .field("failed_awards", &self.dispatcher.failed())
            .finish()
    }
}

impl ActivitiesWorld {
    pub fn new() -> Self {
        Self {
            event_loop: ActivityEventLoop::default().with_seed(SEED),
            events: Vec::new(),
            last_events: Vec::new(),
            dispatcher: RewardDispatcher::new(InMemoryRewardStore::new()),
            dispatched: 0,
        }
    }

    /// Execute a command and store the result
    pub fn execute(&mut self, command: ActivityCommand) -> &[ActivityEvent] {
        let events = self.event_loop.handle_command(command);
        self.events.extend(events.iter().cloned());
        self.last_events = events;
        &self.last_events
    }

    /// Advance the clock the way a host does, one tick at a time
    pub fn tick_for(&mut self, total_ms: u64) {
        let mut elapsed = 0;
        while elapsed < total_ms {
            let step = TICK_MS.min(total_ms - elapsed);
            self.execute(ActivityCommand::Tick { elapsed_ms: step });
            elapsed += step;
        }
    }

    /// Tick until `done` holds; panics after a minute of game time
    pub fn tick_until(&mut self, done: impl Fn(&GameSession) -> bool) {
        for _ in 0..600 {
            if done(self.session()) {
                return;
            }
            self.tick_for(TICK_MS);
        }
        panic!("Condition not reached after a minute of game time");
    }

    /// The open game session (panics if none)
    pub fn session(&self) -> &GameSession {
        self.event_loop.session().expect("No activity is open")
    }

    pub fn engine(&self) -> &GameEngine {
        self.session().engine()
    }

    /// How often the open game reported `Completed`
    pub fn completions(&self) -> usize {
        self.events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    ActivityEvent::Game {
                        event: GameEvent::Completed,
                        ..
                    }
                )
            })
            .count()
    }

    /// Failure reason of the last command, if it failed
    pub fn last_error_message(&self) -> Option<&str> {
        self.last_events.iter().find_map(|e| match e {
            ActivityEvent::CommandFailed { reason, .. } => Some(reason.as_str()),
            _ => None,
        })
    }

    /// Events the dispatcher has not seen yet
    pub fn undispatched(&mut self) -> Vec<ActivityEvent> {
        let fresh = self.events[self.dispatched..].to_vec();
        self.dispatched = self.events.len();
        fresh
    }

    pub fn awards(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(ActivityEvent::award)
            .map(|request| request.points)
            .collect()
    }
}

impl Default for ActivitiesWorld {
    fn default() -> Self {
        Self::new()
    }
}
