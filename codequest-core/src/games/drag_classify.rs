use crate::games::{FeedbackKind, GameContext, GameEvent, GamePhase, GameSpecError, TimerKind};
use crate::traits::GameMachine;
use rand::seq::SliceRandom;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SortItemSpec {
    pub label: String,
    /// Index into the category list
    pub category: usize,
}

/// Drag classification content (shape sorting)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DragClassifySpec {
    pub categories: Vec<String>,
    pub items: Vec<SortItemSpec>,
}

impl DragClassifySpec {
    /// `copies` items per category, each labelled with its category name
    pub fn uniform(categories: &[&str], copies: usize) -> Self {
        let items = categories
            .iter()
            .enumerate()
            .flat_map(|(category, label)| {
                (0..copies).map(move |_| SortItemSpec {
                    label: label.to_string(),
                    category,
                })
            })
            .collect();

        Self {
            categories: categories.iter().map(|c| c.to_string()).collect(),
            items,
        }
    }

    pub fn validate(&self) -> Result<(), GameSpecError> {
        if self.categories.is_empty() {
            return Err(GameSpecError::Empty("categories"));
        }
        if self.items.is_empty() {
            return Err(GameSpecError::Empty("items"));
        }
        if let Some(item) = self
            .items
            .iter()
            .find(|item| item.category >= self.categories.len())
        {
            return Err(GameSpecError::Invalid(format!(
                "item '{}' points at missing category {}",
                item.label, item.category
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SortItem {
    pub id: usize,
    pub label: String,
    pub category: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum DragClassifyPhase {
    Sorting,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum DragClassifyInput {
    /// Drop pending item `item` onto bin `bin`
    Drop { item: usize, bin: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DragClassifyView {
    pub phase: DragClassifyPhase,
    pub categories: Vec<String>,
    pub pending: Vec<SortItem>,
    pub buckets: Vec<Vec<SortItem>>,
    pub sorted: usize,
    pub total: usize,
}

/// Sorting → Completed. Only drops onto the item's own category are
/// accepted; wrong drops leave the item pending without penalty.
#[derive(Debug, Clone)]
pub struct DragClassify {
    spec: DragClassifySpec,
    phase: DragClassifyPhase,
    pending: Vec<SortItem>,
    buckets: Vec<Vec<SortItem>>,
}

impl DragClassify {
    pub fn new(spec: DragClassifySpec) -> Self {
        let buckets = vec![Vec::new(); spec.categories.len()];
        Self {
            spec,
            phase: DragClassifyPhase::Sorting,
            pending: Vec::new(),
            buckets,
        }
    }

    pub fn pending(&self) -> &[SortItem] {
        &self.pending
    }

    pub fn bucket(&self, bin: usize) -> &[SortItem] {
        self.buckets.get(bin).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn sorted(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Bin index of a category name
    pub fn bin_of(&self, category: &str) -> Option<usize> {
        self.spec.categories.iter().position(|c| c == category)
    }

    fn set_phase(&mut self, to: DragClassifyPhase, ctx: &mut GameContext<'_>) {
        if self.phase != to {
            ctx.emit(GameEvent::PhaseChanged {
                from: GamePhase::DragClassify(self.phase),
                to: GamePhase::DragClassify(to),
            });
            self.phase = to;
        }
    }

    fn drop_item(&mut self, item: usize, bin: usize, ctx: &mut GameContext<'_>) {
        if bin >= self.buckets.len() {
            tracing::debug!("Ignoring drop on unknown bin {}", bin);
            return;
        }
        let Some(position) = self.pending.iter().position(|i| i.id == item) else {
            tracing::debug!("Ignoring drop of item {} that is not pending", item);
            return;
        };
        if self.pending[position].category != bin {
            tracing::debug!("Rejected item {} on bin {}", item, bin);
            return;
        }

        let sorted = self.pending.remove(position);
        self.buckets[bin].push(sorted);
        ctx.emit(GameEvent::ScoreChanged {
            score: self.sorted() as u32,
        });

        if self.pending.is_empty() {
            self.set_phase(DragClassifyPhase::Completed, ctx);
            ctx.feedback(FeedbackKind::Success, "Everything is in the right place!");
            ctx.complete();
        }
    }
}

impl GameMachine for DragClassify {
    type Input = DragClassifyInput;
    type View = DragClassifyView;

    fn phase(&self) -> GamePhase {
        GamePhase::DragClassify(self.phase)
    }

    fn reset(&mut self, ctx: &mut GameContext<'_>) {
        self.set_phase(DragClassifyPhase::Sorting, ctx);
        if self.sorted() != 0 {
            ctx.emit(GameEvent::ScoreChanged { score: 0 });
        }
        self.buckets = vec![Vec::new(); self.spec.categories.len()];
        let mut pending: Vec<SortItem> = self
            .spec
            .items
            .iter()
            .enumerate()
            .map(|(id, item)| SortItem {
                id,
                label: item.label.clone(),
                category: item.category,
            })
            .collect();
        pending.shuffle(ctx.rng());
        self.pending = pending;
    }

    fn handle_input(&mut self, input: DragClassifyInput, ctx: &mut GameContext<'_>) {
        match (self.phase, input) {
            (DragClassifyPhase::Sorting, DragClassifyInput::Drop { item, bin }) => {
                self.drop_item(item, bin, ctx)
            }
            (phase, input) => {
                tracing::debug!("Drag classify ignores {:?} while {:?}", input, phase);
            }
        }
    }

    fn on_timer(&mut self, _timer: TimerKind, _ctx: &mut GameContext<'_>) {}

    fn view(&self) -> DragClassifyView {
        DragClassifyView {
            phase: self.phase,
            categories: self.spec.categories.clone(),
            pending: self.pending.clone(),
            buckets: self.buckets.clone(),
            sorted: self.sorted(),
            total: self.spec.items.len(),
        }
    }
}
