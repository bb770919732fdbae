use crate::games::{FeedbackKind, GameContext, GameEvent, GamePhase, GameSpecError, TimerKind};
use crate::traits::GameMachine;
use rand::seq::SliceRandom;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Pairs memory content: every symbol appears on exactly two cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PairsMemorySpec {
    pub symbols: Vec<String>,
}

impl PairsMemorySpec {
    pub fn new(symbols: &[&str]) -> Self {
        Self {
            symbols: symbols.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn card_count(&self) -> usize {
        self.symbols.len() * 2
    }

    pub fn validate(&self) -> Result<(), GameSpecError> {
        if self.symbols.is_empty() {
            return Err(GameSpecError::Empty("symbols"));
        }
        let unique: HashSet<&String> = self.symbols.iter().collect();
        if unique.len() != self.symbols.len() {
            return Err(GameSpecError::Invalid(
                "symbols must be distinct".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum PairsMemoryPhase {
    Playing,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum PairsMemoryInput {
    /// Turn the card at this position
    Flip(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Card {
    pub symbol: String,
    pub face_up: bool,
    pub matched: bool,
}

/// A card as the player sees it; face-down symbols are hidden
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CardView {
    pub symbol: Option<String>,
    pub face_up: bool,
    pub matched: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PairsMemoryView {
    pub phase: PairsMemoryPhase,
    pub cards: Vec<CardView>,
    pub moves: u32,
    pub matched_pairs: usize,
    pub total_pairs: usize,
}

/// Playing → Completed. Two unmatched cards at most are face up; a
/// mismatch turns back after the flip-back delay.
#[derive(Debug, Clone)]
pub struct PairsMemory {
    spec: PairsMemorySpec,
    phase: PairsMemoryPhase,
    cards: Vec<Card>,
    first: Option<usize>,
    mismatch: Option<(usize, usize)>,
    moves: u32,
    matched_pairs: usize,
}

impl PairsMemory {
    pub fn new(spec: PairsMemorySpec) -> Self {
        Self {
            spec,
            phase: PairsMemoryPhase::Playing,
            cards: Vec::new(),
            first: None,
            mismatch: None,
            moves: 0,
            matched_pairs: 0,
        }
    }

    /// Full deck including hidden symbols
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    /// Input is locked while a mismatched pair waits to turn back
    pub fn is_locked(&self) -> bool {
        self.mismatch.is_some()
    }

    fn set_phase(&mut self, to: PairsMemoryPhase, ctx: &mut GameContext<'_>) {
        if self.phase != to {
            ctx.emit(GameEvent::PhaseChanged {
                from: GamePhase::PairsMemory(self.phase),
                to: GamePhase::PairsMemory(to),
            });
            self.phase = to;
        }
    }

    fn deal(&mut self, ctx: &mut GameContext<'_>) {
        let mut cards: Vec<Card> = self
            .spec
            .symbols
            .iter()
            .flat_map(|s| [s.clone(), s.clone()])
            .map(|symbol| Card {
                symbol,
                face_up: false,
                matched: false,
            })
            .collect();
        cards.shuffle(ctx.rng());
        self.cards = cards;
    }

    fn flip(&mut self, index: usize, ctx: &mut GameContext<'_>) {
        if self.mismatch.is_some() {
            tracing::debug!("Pairs memory locked, ignoring flip of {}", index);
            return;
        }
        let Some(card) = self.cards.get(index) else {
            tracing::debug!("Ignoring flip of unknown card {}", index);
            return;
        };
        if card.matched || card.face_up {
            return;
        }

        self.cards[index].face_up = true;

        let Some(first) = self.first.take() else {
            self.first = Some(index);
            self.moves += 1;
            ctx.emit(GameEvent::MovesChanged { moves: self.moves });
            return;
        };

        if self.cards[first].symbol == self.cards[index].symbol {
            self.cards[first].matched = true;
            self.cards[index].matched = true;
            self.matched_pairs += 1;

            if self.matched_pairs == self.spec.symbols.len() {
                self.set_phase(PairsMemoryPhase::Completed, ctx);
                ctx.feedback(
                    FeedbackKind::Success,
                    format!("All pairs found in {} moves!", self.moves),
                );
                ctx.complete();
            } else {
                ctx.feedback(FeedbackKind::Success, "It's a match!");
            }
        } else {
            self.mismatch = Some((first, index));
            let delay = ctx.timings().flip_back_ms;
            ctx.schedule(delay, TimerKind::FlipBack);
        }
    }

    fn flip_back(&mut self) {
        if let Some((a, b)) = self.mismatch.take() {
            for i in [a, b] {
                if let Some(card) = self.cards.get_mut(i) {
                    card.face_up = false;
                }
            }
        }
    }
}

impl GameMachine for PairsMemory {
    type Input = PairsMemoryInput;
    type View = PairsMemoryView;

    fn phase(&self) -> GamePhase {
        GamePhase::PairsMemory(self.phase)
    }

    fn reset(&mut self, ctx: &mut GameContext<'_>) {
        ctx.cancel(TimerKind::FlipBack);
        self.set_phase(PairsMemoryPhase::Playing, ctx);
        self.first = None;
        self.mismatch = None;
        self.matched_pairs = 0;
        if self.moves != 0 {
            self.moves = 0;
            ctx.emit(GameEvent::MovesChanged { moves: 0 });
        }
        self.deal(ctx);
    }

    fn handle_input(&mut self, input: PairsMemoryInput, ctx: &mut GameContext<'_>) {
        match (self.phase, input) {
            (PairsMemoryPhase::Playing, PairsMemoryInput::Flip(index)) => self.flip(index, ctx),
            (phase, input) => {
                tracing::debug!("Pairs memory ignores {:?} while {:?}", input, phase);
            }
        }
    }

    fn on_timer(&mut self, timer: TimerKind, _ctx: &mut GameContext<'_>) {
        if timer == TimerKind::FlipBack {
            self.flip_back();
        }
    }

    fn view(&self) -> PairsMemoryView {
        PairsMemoryView {
            phase: self.phase,
            cards: self
                .cards
                .iter()
                .map(|card| CardView {
                    symbol: (card.face_up || card.matched).then(|| card.symbol.clone()),
                    face_up: card.face_up,
                    matched: card.matched,
                })
                .collect(),
            moves: self.moves,
            matched_pairs: self.matched_pairs,
            total_pairs: self.spec.symbols.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_count() {
        let spec = PairsMemorySpec::new(&["{}", "[]", "()", "<>"]);
        assert_eq!(spec.card_count(), 8);
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        assert!(PairsMemorySpec::new(&["a", "a"]).validate().is_err());
        assert!(PairsMemorySpec::new(&[]).validate().is_err());
        assert!(PairsMemorySpec::new(&["a", "b"]).validate().is_ok());
    }
}
