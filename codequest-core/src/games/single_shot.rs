use crate::games::{FeedbackKind, GameContext, GameEvent, GamePhase, GameSpecError, TimerKind};
use crate::snippet;
use crate::traits::GameMachine;
use rand::seq::SliceRandom;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How a question is answered and checked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Answer {
    /// Pick one of the options
    Choice { options: Vec<String>, correct: usize },

    /// Free text matching any accepted variant, whitespace-normalized
    Text {
        accepted: Vec<String>,
        #[serde(default)]
        case_sensitive: bool,
    },

    /// A whole number
    Number { value: i64 },

    /// A program whose printed lines must equal `lines`
    Output { lines: Vec<String> },
}

impl Answer {
    pub fn kind(&self) -> AnswerKind {
        match self {
            Answer::Choice { .. } => AnswerKind::Choice,
            Answer::Text { .. } => AnswerKind::Text,
            Answer::Number { .. } => AnswerKind::Number,
            Answer::Output { .. } => AnswerKind::Program,
        }
    }

    /// The answer as shown to the player when revealed
    pub fn expected(&self) -> String {
        match self {
            Answer::Choice { options, correct } => options.get(*correct).cloned().unwrap_or_default(),
            Answer::Text { accepted, .. } => accepted.first().cloned().unwrap_or_default(),
            Answer::Number { value } => value.to_string(),
            Answer::Output { lines } => lines.join("\n"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum AnswerKind {
    Choice,
    Text,
    Number,
    Program,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Question {
    pub prompt: String,

    /// Code shown with the prompt, or the starter program for `Output` answers
    #[serde(default)]
    pub code: Option<String>,

    pub answer: Answer,

    #[serde(default)]
    pub explanation: Option<String>,
}

impl Question {
    pub fn choice(prompt: impl Into<String>, options: &[&str], correct: usize) -> Self {
        Self::with_answer(
            prompt,
            Answer::Choice {
                options: options.iter().map(|o| o.to_string()).collect(),
                correct,
            },
        )
    }

    pub fn text(prompt: impl Into<String>, accepted: &[&str]) -> Self {
        Self::with_answer(
            prompt,
            Answer::Text {
                accepted: accepted.iter().map(|a| a.to_string()).collect(),
                case_sensitive: false,
            },
        )
    }

    pub fn number(prompt: impl Into<String>, value: i64) -> Self {
        Self::with_answer(prompt, Answer::Number { value })
    }

    pub fn program(prompt: impl Into<String>, starter: impl Into<String>, lines: &[&str]) -> Self {
        Self::with_answer(
            prompt,
            Answer::Output {
                lines: lines.iter().map(|l| l.to_string()).collect(),
            },
        )
        .with_code(starter)
    }

    fn with_answer(prompt: impl Into<String>, answer: Answer) -> Self {
        Self {
            prompt: prompt.into(),
            code: None,
            answer,
            explanation: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    pub fn validate(&self) -> Result<(), GameSpecError> {
        match &self.answer {
            Answer::Choice { options, correct } => {
                if options.is_empty() {
                    return Err(GameSpecError::Empty("options"));
                }
                if *correct >= options.len() {
                    return Err(GameSpecError::Invalid(format!(
                        "'{}' marks option {} correct but has {} options",
                        self.prompt,
                        correct,
                        options.len()
                    )));
                }
            }
            Answer::Text { accepted, .. } if accepted.is_empty() => {
                return Err(GameSpecError::Empty("accepted answers"));
            }
            Answer::Output { lines } if lines.is_empty() => {
                return Err(GameSpecError::Empty("expected output"));
            }
            _ => {}
        }
        Ok(())
    }
}

/// What a wrong answer does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum MissPolicy {
    /// Stay on the question and try again
    #[default]
    Retry,
    /// Show the expected answer until `Next`
    Reveal,
}

/// What happens after the last question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum EndPolicy {
    /// Go back to the first unsolved question
    #[default]
    Wrap,
    /// Finish the round
    Stop,
}

/// Single-shot content (quizzes, math, debugging, code execution)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SingleShotSpec {
    pub questions: Vec<Question>,
    #[serde(default)]
    pub on_miss: MissPolicy,
    #[serde(default)]
    pub at_end: EndPolicy,
    /// Shuffle question order on every reset
    #[serde(default)]
    pub shuffle: bool,
}

impl SingleShotSpec {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            on_miss: MissPolicy::default(),
            at_end: EndPolicy::default(),
            shuffle: false,
        }
    }

    pub fn with_miss_policy(mut self, on_miss: MissPolicy) -> Self {
        self.on_miss = on_miss;
        self
    }

    pub fn with_end_policy(mut self, at_end: EndPolicy) -> Self {
        self.at_end = at_end;
        self
    }

    pub fn shuffled(mut self) -> Self {
        self.shuffle = true;
        self
    }

    pub fn validate(&self) -> Result<(), GameSpecError> {
        if self.questions.is_empty() {
            return Err(GameSpecError::Empty("questions"));
        }
        self.questions.iter().try_for_each(Question::validate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum SingleShotPhase {
    Answering,
    Revealed,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum SingleShotInput {
    /// Pick a multiple-choice option
    Choose(usize),
    /// Submit free text, a number or a program
    Submit(String),
    /// Move on from a revealed answer
    Next,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SingleShotView {
    pub phase: SingleShotPhase,
    /// Position in the current round, zero-based
    pub position: usize,
    pub total: usize,
    pub prompt: String,
    pub code: Option<String>,
    pub answer_kind: AnswerKind,
    /// Options for multiple-choice questions, empty otherwise
    pub choices: Vec<String>,
    pub score: u32,
    pub solved: usize,
    /// Printed lines of the last program run
    pub last_output: Option<Vec<String>>,
    pub revealed_answer: Option<String>,
    pub explanation: Option<String>,
}

/// Answering ⇄ Revealed → Finished. Completion once every question has
/// been answered correctly at least once.
#[derive(Debug, Clone)]
pub struct SingleShot {
    spec: SingleShotSpec,
    phase: SingleShotPhase,
    order: Vec<usize>,
    position: usize,
    score: u32,
    solved: BTreeSet<usize>,
    last_output: Option<Vec<String>>,
}

impl SingleShot {
    pub fn new(spec: SingleShotSpec) -> Self {
        let order = (0..spec.questions.len()).collect();
        Self {
            spec,
            phase: SingleShotPhase::Answering,
            order,
            position: 0,
            score: 0,
            solved: BTreeSet::new(),
            last_output: None,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn solved(&self) -> usize {
        self.solved.len()
    }

    /// Index into the spec's question list of the question on screen
    pub fn current_index(&self) -> usize {
        self.order.get(self.position).copied().unwrap_or(0)
    }

    pub fn current(&self) -> Option<&Question> {
        self.spec.questions.get(self.current_index())
    }

    fn set_phase(&mut self, to: SingleShotPhase, ctx: &mut GameContext<'_>) {
        if self.phase != to {
            ctx.emit(GameEvent::PhaseChanged {
                from: GamePhase::SingleShot(self.phase),
                to: GamePhase::SingleShot(to),
            });
            self.phase = to;
        }
    }

    fn choose(&mut self, option: usize, ctx: &mut GameContext<'_>) {
        let Some(Answer::Choice { options, correct }) = self.current().map(|q| &q.answer) else {
            tracing::debug!("Ignoring choice on a question without options");
            return;
        };
        if option >= options.len() {
            tracing::debug!("Ignoring unknown option {}", option);
            return;
        }
        let correct = option == *correct;
        self.judge(correct, ctx);
    }

    fn submit(&mut self, text: String, ctx: &mut GameContext<'_>) {
        let Some(answer) = self.current().map(|q| q.answer.clone()) else {
            return;
        };
        if text.trim().is_empty() {
            ctx.feedback(FeedbackKind::Error, "Type an answer first");
            return;
        }

        let correct = match answer {
            Answer::Choice { .. } => {
                tracing::debug!("Ignoring free text on a multiple-choice question");
                return;
            }
            Answer::Text {
                accepted,
                case_sensitive,
            } => {
                let given = normalize(&text, case_sensitive);
                accepted
                    .iter()
                    .any(|variant| normalize(variant, case_sensitive) == given)
            }
            Answer::Number { value } => match text.trim().parse::<i64>() {
                Ok(given) => given == value,
                Err(_) => {
                    ctx.feedback(
                        FeedbackKind::Error,
                        format!("'{}' is not a whole number", text.trim()),
                    );
                    return;
                }
            },
            Answer::Output { lines } => match snippet::run(&text) {
                Ok(printed) => {
                    let matches = printed.len() == lines.len()
                        && printed
                            .iter()
                            .zip(&lines)
                            .all(|(got, want)| got.trim_end() == want.trim_end());
                    self.last_output = Some(printed);
                    matches
                }
                Err(err) => {
                    self.last_output = None;
                    ctx.feedback(FeedbackKind::Error, err.to_string());
                    return;
                }
            },
        };
        self.judge(correct, ctx);
    }

    fn judge(&mut self, correct: bool, ctx: &mut GameContext<'_>) {
        let index = self.current_index();
        if correct {
            self.score += 1;
            self.solved.insert(index);
            ctx.emit(GameEvent::ScoreChanged { score: self.score });

            let message = self
                .current()
                .and_then(|q| q.explanation.clone())
                .map(|why| format!("Correct! {}", why))
                .unwrap_or_else(|| "Correct!".to_string());
            ctx.feedback(FeedbackKind::Success, message);

            if self.solved.len() == self.spec.questions.len() {
                self.set_phase(SingleShotPhase::Finished, ctx);
                ctx.complete();
            } else {
                self.advance(ctx);
            }
            return;
        }

        match self.spec.on_miss {
            MissPolicy::Retry => ctx.feedback(FeedbackKind::Error, "Not quite, try again"),
            MissPolicy::Reveal => {
                self.set_phase(SingleShotPhase::Revealed, ctx);
                let expected = self
                    .current()
                    .map(|q| q.answer.expected())
                    .unwrap_or_default();
                ctx.feedback(
                    FeedbackKind::Error,
                    format!("The answer was: {}", expected),
                );
            }
        }
    }

    fn advance(&mut self, ctx: &mut GameContext<'_>) {
        self.last_output = None;
        let len = self.order.len();
        match self.spec.at_end {
            EndPolicy::Wrap => {
                let next = (1..=len)
                    .map(|step| (self.position + step) % len)
                    .find(|&pos| !self.solved.contains(&self.order[pos]));
                match next {
                    Some(pos) => {
                        self.position = pos;
                        self.set_phase(SingleShotPhase::Answering, ctx);
                    }
                    None => self.set_phase(SingleShotPhase::Finished, ctx),
                }
            }
            EndPolicy::Stop => {
                if self.position + 1 < len {
                    self.position += 1;
                    self.set_phase(SingleShotPhase::Answering, ctx);
                } else {
                    self.set_phase(SingleShotPhase::Finished, ctx);
                    ctx.feedback(
                        FeedbackKind::Info,
                        format!("Round over: {} of {} solved", self.solved.len(), len),
                    );
                }
            }
        }
    }
}

fn normalize(text: &str, case_sensitive: bool) -> String {
    let joined = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if case_sensitive {
        joined
    } else {
        joined.to_lowercase()
    }
}

impl GameMachine for SingleShot {
    type Input = SingleShotInput;
    type View = SingleShotView;

    fn phase(&self) -> GamePhase {
        GamePhase::SingleShot(self.phase)
    }

    fn reset(&mut self, ctx: &mut GameContext<'_>) {
        self.set_phase(SingleShotPhase::Answering, ctx);
        if self.score != 0 {
            self.score = 0;
            ctx.emit(GameEvent::ScoreChanged { score: 0 });
        }
        self.solved.clear();
        self.position = 0;
        self.last_output = None;
        self.order = (0..self.spec.questions.len()).collect();
        if self.spec.shuffle {
            self.order.shuffle(ctx.rng());
        }
    }

    fn handle_input(&mut self, input: SingleShotInput, ctx: &mut GameContext<'_>) {
        match (self.phase, input) {
            (SingleShotPhase::Answering, SingleShotInput::Choose(option)) => {
                self.choose(option, ctx)
            }
            (SingleShotPhase::Answering, SingleShotInput::Submit(text)) => self.submit(text, ctx),
            (SingleShotPhase::Revealed, SingleShotInput::Next) => self.advance(ctx),
            (phase, input) => {
                tracing::debug!("Single shot ignores {:?} while {:?}", input, phase);
            }
        }
    }

    fn on_timer(&mut self, _timer: TimerKind, _ctx: &mut GameContext<'_>) {}

    fn view(&self) -> SingleShotView {
        let question = self.current();
        let choices = match question.map(|q| &q.answer) {
            Some(Answer::Choice { options, .. }) => options.clone(),
            _ => Vec::new(),
        };
        let revealed = self.phase == SingleShotPhase::Revealed;

        SingleShotView {
            phase: self.phase,
            position: self.position,
            total: self.order.len(),
            prompt: question.map(|q| q.prompt.clone()).unwrap_or_default(),
            code: question.and_then(|q| q.code.clone()),
            answer_kind: question.map_or(AnswerKind::Text, |q| q.answer.kind()),
            choices,
            score: self.score,
            solved: self.solved.len(),
            last_output: self.last_output.clone(),
            revealed_answer: revealed
                .then(|| question.map(|q| q.answer.expected()))
                .flatten(),
            explanation: revealed
                .then(|| question.and_then(|q| q.explanation.clone()))
                .flatten(),
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
    }

    impl Harness {
        fn new() -> Self {
            Self {
                timers: TimerQueue::new(),
                rng: StdRng::seed_from_u64(3),
                timings: GameTimings::default(),
                events: Vec::new(),
            }
        }

        fn send(&mut self, game: &mut SingleShot, input: SingleShotInput) {
            let mut ctx = GameContext::new(
                0,
                &mut self.timers,
                &mut self.rng,
                &self.timings,
                &mut self.events,
            );
            game.handle_input(input, &mut ctx);
        }

        fn reset(&mut self, game: &mut SingleShot) {
            let mut ctx = GameContext::new(
                0,
                &mut self.timers,
                &mut self.rng,
                &self.timings,
                &mut self.events,
            );
            game.reset(&mut ctx);
        }

        fn last_error(&self) -> Option<String> {
            self.events.iter().rev().find_map(|e| match e {
                GameEvent::Feedback { feedback } if feedback.is_error() => {
                    Some(feedback.message.clone())
                }
                _ => None,
            })
        }

        fn completions(&self) -> usize {
            self.events
                .iter()
                .filter(|e| **e == GameEvent::Completed)
                .count()
        }
    }

    fn quiz() -> SingleShotSpec {
        SingleShotSpec::new(vec![
            Question::choice("Which keyword declares a variable?", &["fn", "let", "loop"], 1),
            Question::number("What is 7 * 6?", 42),
            Question::text("Name the loop that runs while a condition holds", &["while"]),
        ])
    }

    #[test]
    fn test_correct_answers_advance_and_complete() {
        let mut h = Harness::new();
        let mut game = SingleShot::new(quiz());
        h.reset(&mut game);

        h.send(&mut game, SingleShotInput::Choose(1));
        assert_eq!(game.current_index(), 1);
        h.send(&mut game, SingleShotInput::Submit(" 42 ".to_string()));
        h.send(&mut game, SingleShotInput::Submit("  WHILE ".to_string()));

        assert_eq!(game.score(), 3);
        assert_eq!(game.phase, SingleShotPhase::Finished);
        assert_eq!(h.completions(), 1);
    }

    #[test]
    fn test_number_parse_error_keeps_phase() {
        let mut h = Harness::new();
        let mut game = SingleShot::new(quiz());
        h.reset(&mut game);
        h.send(&mut game, SingleShotInput::Choose(1));

        h.send(&mut game, SingleShotInput::Submit("forty-two".to_string()));

        assert_eq!(game.phase, SingleShotPhase::Answering);
        assert_eq!(game.current_index(), 1);
        assert!(h.last_error().unwrap().contains("not a whole number"));
        assert!(h.timers.is_scheduled(TimerKind::ClearFeedback));
    }

    #[test]
    fn test_retry_stays_on_question() {
        let mut h = Harness::new();
        let mut game = SingleShot::new(quiz());
        h.reset(&mut game);

        h.send(&mut game, SingleShotInput::Choose(0));

        assert_eq!(game.current_index(), 0);
        assert_eq!(game.score(), 0);
        assert!(h.last_error().is_some());
    }

    #[test]
    fn test_reveal_waits_for_next() {
        let mut h = Harness::new();
        let mut game = SingleShot::new(quiz().with_miss_policy(MissPolicy::Reveal));
        h.reset(&mut game);

        h.send(&mut game, SingleShotInput::Choose(2));
        assert_eq!(game.phase, SingleShotPhase::Revealed);
        assert_eq!(game.view().revealed_answer.as_deref(), Some("let"));

        h.send(&mut game, SingleShotInput::Choose(1));
        assert_eq!(game.score(), 0);

        h.send(&mut game, SingleShotInput::Next);
        assert_eq!(game.phase, SingleShotPhase::Answering);
        assert_eq!(game.current_index(), 1);
    }

    #[test]
    fn test_wrap_returns_to_missed_question() {
        let mut h = Harness::new();
        let mut game = SingleShot::new(quiz().with_miss_policy(MissPolicy::Reveal));
        h.reset(&mut game);

        h.send(&mut game, SingleShotInput::Choose(0));
        h.send(&mut game, SingleShotInput::Next);
        h.send(&mut game, SingleShotInput::Submit("42".to_string()));
        h.send(&mut game, SingleShotInput::Submit("while".to_string()));

        assert_eq!(game.current_index(), 0);
        assert_eq!(h.completions(), 0);

        h.send(&mut game, SingleShotInput::Choose(1));
        assert_eq!(h.completions(), 1);
    }

    #[test]
    fn test_stop_finishes_without_completion_after_miss() {
        let mut h = Harness::new();
        let spec = quiz()
            .with_miss_policy(MissPolicy::Reveal)
            .with_end_policy(EndPolicy::Stop);
        let mut game = SingleShot::new(spec);
        h.reset(&mut game);

        h.send(&mut game, SingleShotInput::Choose(0));
        h.send(&mut game, SingleShotInput::Next);
        h.send(&mut game, SingleShotInput::Submit("42".to_string()));
        h.send(&mut game, SingleShotInput::Submit("while".to_string()));

        assert_eq!(game.phase, SingleShotPhase::Finished);
        assert_eq!(h.completions(), 0);
    }

    #[test]
    fn test_program_output_is_compared() {
        let mut h = Harness::new();
        let spec = SingleShotSpec::new(vec![Question::program(
            "Print the numbers 1 to 3",
            "for i in 0..3 {\n    print(i);\n}",
            &["1", "2", "3"],
        )]);
        let mut game = SingleShot::new(spec);
        h.reset(&mut game);

        h.send(
            &mut game,
            SingleShotInput::Submit("for i in 0..3 { print(i); }".to_string()),
        );
        assert_eq!(game.score(), 0);
        assert_eq!(
            game.view().last_output,
            Some(vec!["0".to_string(), "1".to_string(), "2".to_string()])
        );

        h.send(
            &mut game,
            SingleShotInput::Submit("for i in 1..4 { print(i); }".to_string()),
        );
        assert_eq!(game.score(), 1);
        assert_eq!(h.completions(), 1);
    }

    #[test]
    fn test_snippet_errors_become_feedback() {
        let mut h = Harness::new();
        let spec = SingleShotSpec::new(vec![Question::program(
            "Fix the missing semicolon",
            "let x = 5\nprint(x);",
            &["5"],
        )]);
        let mut game = SingleShot::new(spec);
        h.reset(&mut game);

        h.send(
            &mut game,
            SingleShotInput::Submit("let x = 5\nprint(x);".to_string()),
        );

        assert_eq!(game.phase, SingleShotPhase::Answering);
        assert!(h.last_error().unwrap().starts_with("line 2"));
        assert_eq!(game.view().last_output, None);
    }

    #[test]
    fn test_validate() {
        assert!(SingleShotSpec::new(vec![]).validate().is_err());
        assert!(SingleShotSpec::new(vec![Question::choice("q", &["a"], 1)])
            .validate()
            .is_err());
        assert!(quiz().validate().is_ok());
    }
}
