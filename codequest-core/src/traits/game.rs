use crate::games::{GameContext, GamePhase, TimerKind};

/// A runnable game: one template state machine parameterized by content.
///
/// Implementors never touch wall-clock time. Delays go through
/// [`GameContext::schedule`] so the owning session can cancel them.
pub trait GameMachine {
    /// Player actions this game understands
    type Input;

    /// Render snapshot (pure function of state)
    type View;

    /// Current phase
    fn phase(&self) -> GamePhase;

    /// Return to the initial phase and redraw any randomized content
    fn reset(&mut self, ctx: &mut GameContext<'_>);

    /// Apply player input. Input not accepted by the current phase is a no-op.
    fn handle_input(&mut self, input: Self::Input, ctx: &mut GameContext<'_>);

    /// A scheduled transition fired
    fn on_timer(&mut self, timer: TimerKind, ctx: &mut GameContext<'_>);

    fn view(&self) -> Self::View;
}
