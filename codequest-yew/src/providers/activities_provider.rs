use crate::hooks::{ActivitiesContext, ActivitiesSnapshot, Celebration};
use crate::reward::BrowserRewardStore;
use codequest_core::{
    ActivityCommand, ActivityEvent, ActivityLoop, ApiConfig, RewardDispatcher, Stopwatch,
};
use futures::StreamExt;
use std::rc::Rc;
use yew::prelude::*;

/// How long the completion banner stays up
const CELEBRATION_MS: u64 = 3000;

#[derive(Properties, PartialEq)]
pub struct ActivitiesProviderProps {
    /// XP backend; awards stay in memory when unset
    #[prop_or_default]
    pub api: Option<ApiConfig>,
    #[prop_or_default]
    pub seed: Option<u64>,
    pub children: Children,
}

struct PendingInput {
    command_queue: Vec<ActivityCommand>,
    retry_requested: bool,
}

impl PendingInput {
    fn new() -> Self {
        Self {
            command_queue: Vec::new(),
            retry_requested: false,
        }
    }

    fn enqueue_command(&mut self, cmd: ActivityCommand) {
        self.command_queue.push(cmd);
    }

    fn drain_commands(&mut self) -> Vec<ActivityCommand> {
        std::mem::take(&mut self.command_queue)
    }

    fn take_retry(&mut self) -> bool {
        std::mem::take(&mut self.retry_requested)
    }
}

#[function_component(ActivitiesProvider)]
pub fn activities_provider(props: &ActivitiesProviderProps) -> Html {
    let snapshot = use_state(ActivitiesSnapshot::default);
    let celebration = use_state(|| None::<Celebration>);
    let unsaved_awards = use_state(|| 0usize);
    let offline = use_state(|| props.api.is_none());

    let pending = use_mut_ref(PendingInput::new);

    let send_command = {
        let pending = pending.clone();
        Rc::new(move |cmd: ActivityCommand| {
            pending.borrow_mut().enqueue_command(cmd);
        }) as Rc<dyn Fn(ActivityCommand)>
    };

    let retry_awards = {
        let pending = pending.clone();
        Rc::new(move || {
            pending.borrow_mut().retry_requested = true;
        }) as Rc<dyn Fn()>
    };

    {
        let api = props.api.clone();
        let seed = props.seed;
        let snapshot = snapshot.clone();
        let celebration = celebration.clone();
        let unsaved_awards = unsaved_awards.clone();
        let pending = pending.clone();

        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let mut event_loop = codequest_core::ActivityEventLoop::default();
                if let Some(seed) = seed {
                    event_loop = event_loop.with_seed(seed);
                }
                let mut activities = ActivityLoop::new(event_loop, 10, 100);
                let dispatcher = Rc::new(RewardDispatcher::new(BrowserRewardStore::from_config(api)));

                snapshot.set(ActivitiesSnapshot::capture(activities.event_loop()));
                tracing::info!(
                    "📚 Loaded {} activities",
                    activities.event_loop().catalog().len()
                );

                let mut stopwatch = Stopwatch::start();
                let mut celebration_left_ms = 0u64;
                let mut interval = gloo_timers::future::IntervalStream::new(100);

                while interval.next().await.is_some() {
                    let elapsed_ms = stopwatch.lap_ms();

                    // 1. Clock first, then whatever the player did since the last tick
                    let mut commands = vec![ActivityCommand::Tick { elapsed_ms }];
                    commands.extend(pending.borrow_mut().drain_commands());
                    for cmd in commands {
                        tracing::debug!("📤 Command: {}", cmd.name());
                        if let Err(e) = activities.submit(cmd) {
                            tracing::error!("❌ Command dropped: {}", e);
                        }
                    }

                    // 2. Poll
                    while activities.poll() > 0 {}
                    let events = activities.drain_events();

                    // 3. Banner
                    for event in &events {
                        if let ActivityEvent::Celebrate { title, points, .. } = event {
                            celebration.set(Some(Celebration {
                                title: title.clone(),
                                points: *points,
                            }));
                            celebration_left_ms = CELEBRATION_MS;
                        }
                    }
                    if celebration_left_ms > 0 && !has_celebration(&events) {
                        celebration_left_ms = celebration_left_ms.saturating_sub(elapsed_ms);
                        if celebration_left_ms == 0 {
                            celebration.set(None);
                        }
                    }

                    // 4. Awards run on their own task; a slow backend must not stall the clock
                    let awards = award_events(&events);
                    let retry = pending.borrow_mut().take_retry();
                    if !awards.is_empty() || retry {
                        let dispatcher = Rc::clone(&dispatcher);
                        let unsaved_awards = unsaved_awards.clone();
                        wasm_bindgen_futures::spawn_local(async move {
                            let mut outcomes = dispatcher.dispatch_events(&awards).await;
                            if retry {
                                outcomes.extend(dispatcher.retry_failed().await);
                            }
                            if !outcomes.is_empty() {
                                unsaved_awards.set(dispatcher.failed().len());
                            }
                        });
                    }

                    // 5. Update state
                    if !events.is_empty() {
                        snapshot.set(ActivitiesSnapshot::capture(activities.event_loop()));
                    }
                }
            });

            move || {}
        });
    }

    let context = ActivitiesContext {
        snapshot: (*snapshot).clone(),
        celebration: (*celebration).clone(),
        unsaved_awards: *unsaved_awards,
        offline: *offline,
        send_command,
        retry_awards,
    };

    html! {
        <ContextProvider<ActivitiesContext> {context}>
            {props.children.clone()}
        </ContextProvider<ActivitiesContext>>
    }
}

/// Events the reward dispatcher has to see
fn award_events(events: &[ActivityEvent]) -> Vec<ActivityEvent> {
    events
        .iter()
        .filter(|e| e.award().is_some())
        .cloned()
        .collect()
}

fn has_celebration(events: &[ActivityEvent]) -> bool {
    events
        .iter()
        .any(|e| matches!(e, ActivityEvent::Celebrate { .. }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_input_drains_in_order() {
        let mut pending = PendingInput::new();
        pending.enqueue_command(ActivityCommand::OpenActivity { activity_id: 1 });
        pending.enqueue_command(ActivityCommand::ResetGame);

        let drained = pending.drain_commands();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[1], ActivityCommand::ResetGame);
        assert!(pending.drain_commands().is_empty());
    }

    #[test]
    fn test_retry_flag_is_taken_once() {
        let mut pending = PendingInput::new();
        pending.retry_requested = true;
        assert!(pending.take_retry());
        assert!(!pending.take_retry());
    }

    #[test]
    fn test_award_events_keeps_only_awards() {
        let mut event_loop = codequest_core::ActivityEventLoop::default();
        let events = event_loop.handle_command(ActivityCommand::CompleteActivity { activity_id: 1 });
        assert!(events.len() > 1);

        let awards = award_events(&events);
        assert_eq!(awards.len(), 1);
        assert!(matches!(awards[0], ActivityEvent::AwardRequested { .. }));
        assert!(award_events(&[]).is_empty());
    }

    #[test]
    fn test_has_celebration() {
        let events = vec![ActivityEvent::Celebrate {
            activity_id: 1,
            title: "Color Match".to_string(),
            points: 10,
        }];
        assert!(has_celebration(&events));
        assert!(!has_celebration(&[]));
    }
}
