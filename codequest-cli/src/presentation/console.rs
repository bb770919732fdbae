//! Line-based terminal presentation: parses typed commands and renders
//! activity views as plain text.

use crate::infrastructure::{CliError, Result};
use codequest_core::games::{
    DragClassifyInput, DragClassifyView, PairsMemoryInput, PairsMemoryView, SequenceRecallInput,
    SequenceRecallView, SingleShotInput, SingleShotView, TimedMatchInput, TimedMatchView,
};
use codequest_core::{
    ActivityCommand, ActivityEvent, ActivityView, FeedbackKind, GameEvent, GameKind, GameView,
    SessionView,
};
use std::fmt::Write;

/// What a typed line asks for
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleAction {
    Command(ActivityCommand),
    Show,
    Help,
    RetryAwards,
    Quit,
}

fn parse_index(input: &str, token: Option<&str>, what: &str) -> Result<usize> {
    token
        .and_then(|t| t.parse::<usize>().ok())
        .ok_or_else(|| CliError::invalid_input(input, format!("expected {}", what)))
}

/// Parse one typed line for the game currently on screen.
///
/// A bare number is the natural click for every template: pick an option,
/// press a pad, flip a card or choose an answer.
pub fn parse_line(line: &str, kind: GameKind) -> Result<ConsoleAction> {
    let input = line.trim();
    let (head, rest) = match input.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (input, ""),
    };
    let mut args = rest.split_whitespace();

    let action = match head.to_ascii_lowercase().as_str() {
        "" | "show" | "look" => ConsoleAction::Show,
        "help" | "?" => ConsoleAction::Help,
        "quit" | "exit" | "q" => ConsoleAction::Quit,
        "reset" => ConsoleAction::Command(ActivityCommand::ResetGame),
        "retry" => ConsoleAction::RetryAwards,
        "start" => match kind {
            GameKind::TimedMatch => TimedMatchInput::Start.into_action(),
            GameKind::SequenceRecall => SequenceRecallInput::Start.into_action(),
            _ => {
                return Err(CliError::invalid_input(
                    input,
                    format!("{} does not need starting", kind),
                ))
            }
        },
        "drop" => {
            let item = parse_index(input, args.next(), "an item number")?;
            let bin = parse_index(input, args.next(), "a bin number")?;
            DragClassifyInput::Drop { item, bin }.into_action()
        }
        "answer" | "run" => {
            if rest.is_empty() {
                return Err(CliError::invalid_input(input, "nothing to submit"));
            }
            SingleShotInput::Submit(rest.to_string()).into_action()
        }
        "next" => SingleShotInput::Next.into_action(),
        _ => {
            let index = parse_index(input, Some(head), "a command or a number")?;
            match kind {
                GameKind::TimedMatch => TimedMatchInput::Pick(index).into_action(),
                GameKind::SequenceRecall => SequenceRecallInput::Press(index).into_action(),
                GameKind::PairsMemory => PairsMemoryInput::Flip(index).into_action(),
                GameKind::SingleShot => SingleShotInput::Choose(index).into_action(),
                GameKind::DragClassify => {
                    return Err(CliError::invalid_input(input, "use 'drop <item> <bin>'"))
                }
            }
        }
    };

    Ok(action)
}

trait IntoAction {
    fn into_action(self) -> ConsoleAction;
}

impl<T: Into<codequest_core::GameInput>> IntoAction for T {
    fn into_action(self) -> ConsoleAction {
        ConsoleAction::Command(ActivityCommand::Input { input: self.into() })
    }
}

pub fn help(kind: GameKind) -> String {
    let game = match kind {
        GameKind::TimedMatch => "start | <n> pick option n",
        GameKind::SequenceRecall => "start | <n> press pad n",
        GameKind::PairsMemory => "<n> flip card n",
        GameKind::DragClassify => "drop <item> <bin>",
        GameKind::SingleShot => "<n> choose option n | answer <text> | run <program> | next",
    };
    format!(
        "Commands: {}\n          show | reset | retry (failed awards) | quit",
        game
    )
}

pub fn render_catalog(views: &[ActivityView]) -> String {
    let mut out = String::new();
    for view in views {
        let mark = if view.completed { "✓" } else { " " };
        let _ = writeln!(
            out,
            "[{}] {:>2}  {:<22} {:<12} {:<10} {:>3} pts  {}",
            mark,
            view.id,
            view.title,
            view.category,
            view.difficulty,
            view.points,
            view.game_kind
        );
    }
    out
}

pub fn render_session(title: &str, view: &SessionView) -> String {
    let mut out = format!("== {} ==\n", title);
    match &view.game {
        GameView::TimedMatch(game) => render_timed_match(&mut out, game),
        GameView::SequenceRecall(game) => render_sequence_recall(&mut out, game),
        GameView::PairsMemory(game) => render_pairs_memory(&mut out, game),
        GameView::DragClassify(game) => render_drag_classify(&mut out, game),
        GameView::SingleShot(game) => render_single_shot(&mut out, game),
    }
    if let Some(feedback) = &view.feedback {
        let icon = match feedback.kind {
            FeedbackKind::Success => "✅",
            FeedbackKind::Error => "❌",
            FeedbackKind::Info => "ℹ️",
        };
        let _ = writeln!(out, "{} {}", icon, feedback.message);
    }
    if view.completed {
        let _ = writeln!(out, "🏆 Completed!");
    }
    out
}

fn render_timed_match(out: &mut String, game: &TimedMatchView) {
    let _ = writeln!(
        out,
        "{} [{:?}]  score {}  time {}s/{}s",
        game.prompt, game.phase, game.score, game.time_left_secs, game.duration_secs
    );
    let _ = writeln!(out, "Target: {}", game.target);
    for (i, option) in game.options.iter().enumerate() {
        let _ = writeln!(out, "  {}) {}", i, option);
    }
}

fn render_sequence_recall(out: &mut String, game: &SequenceRecallView) {
    let _ = writeln!(
        out,
        "Level {}/{} [{:?}]  score {}  entered {}/{}",
        game.level,
        game.levels_to_complete,
        game.phase,
        game.score,
        game.entered,
        game.sequence_length
    );
    let pads: Vec<String> = (0..game.pads)
        .map(|pad| {
            if game.highlighted == Some(pad) {
                format!("[*{}*]", pad)
            } else {
                format!("[ {} ]", pad)
            }
        })
        .collect();
    let _ = writeln!(out, "{}", pads.join(" "));
}

fn render_pairs_memory(out: &mut String, game: &PairsMemoryView) {
    let _ = writeln!(
        out,
        "Pairs {}/{}  moves {}  [{:?}]",
        game.matched_pairs, game.total_pairs, game.moves, game.phase
    );
    let cards: Vec<String> = game
        .cards
        .iter()
        .enumerate()
        .map(|(i, card)| match &card.symbol {
            Some(symbol) if card.matched => format!("{:>2}:({})", i, symbol),
            Some(symbol) => format!("{:>2}:[{}]", i, symbol),
            None => format!("{:>2}:[?]", i),
        })
        .collect();
    for row in cards.chunks(4) {
        let _ = writeln!(out, "{}", row.join("  "));
    }
}

fn render_drag_classify(out: &mut String, game: &DragClassifyView) {
    let _ = writeln!(
        out,
        "Sorted {}/{} [{:?}]",
        game.sorted, game.total, game.phase
    );
    for (bin, (category, items)) in game.categories.iter().zip(&game.buckets).enumerate() {
        let _ = writeln!(out, "  bin {} {:<10} {} items", bin, category, items.len());
    }
    if !game.pending.is_empty() {
        let pending: Vec<String> = game
            .pending
            .iter()
            .map(|item| format!("{}:{}", item.id, item.label))
            .collect();
        let _ = writeln!(out, "Pending: {}", pending.join(", "));
    }
}

fn render_single_shot(out: &mut String, game: &SingleShotView) {
    let _ = writeln!(
        out,
        "Question {}/{}  solved {}  score {}  [{:?}]",
        game.position + 1,
        game.total,
        game.solved,
        game.score,
        game.phase
    );
    let _ = writeln!(out, "{}", game.prompt);
    if let Some(code) = &game.code {
        for line in code.lines() {
            let _ = writeln!(out, "    {}", line);
        }
    }
    for (i, choice) in game.choices.iter().enumerate() {
        let _ = writeln!(out, "  {}) {}", i, choice);
    }
    if let Some(lines) = &game.last_output {
        let _ = writeln!(out, "Output:");
        for line in lines {
            let _ = writeln!(out, "  > {}", line);
        }
    }
    if let Some(answer) = &game.revealed_answer {
        let _ = writeln!(out, "Answer: {}", answer);
    }
    if let Some(explanation) = &game.explanation {
        if game.revealed_answer.is_some() {
            let _ = writeln!(out, "{}", explanation);
        }
    }
}

/// One-line notice for loop events worth telling the player about
pub fn describe_event(event: &ActivityEvent) -> Option<String> {
    match event {
        ActivityEvent::Celebrate { title, points, .. } => {
            Some(format!("🎉 {} complete! +{} XP", title, points))
        }
        ActivityEvent::ActivityCompleted {
            total_points,
            completed_count,
            ..
        } => Some(format!(
            "📈 {} activities completed, {} points total",
            completed_count, total_points
        )),
        ActivityEvent::CommandFailed { command, reason } => {
            Some(format!("⚠️ {} failed: {}", command, reason))
        }
        ActivityEvent::Game {
            event: GameEvent::Countdown { remaining_secs },
            ..
        } if *remaining_secs <= 5 => Some(format!("⏱ {}s left", remaining_secs)),
        _ => None,
    }
}

/// Whether an event changes what is on screen
pub fn needs_redraw(event: &ActivityEvent) -> bool {
    match event {
        ActivityEvent::Game { event, .. } => !matches!(event, GameEvent::Countdown { .. }),
        ActivityEvent::ActivityOpened { .. } => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codequest_core::{ActivityCatalog, CompletionRecord, GameInput};

    fn input_of(action: ConsoleAction) -> GameInput {
        match action {
            ConsoleAction::Command(ActivityCommand::Input { input }) => input,
            other => panic!("Expected game input, got {:?}", other),
        }
    }

    #[test]
    fn test_bare_number_follows_template() {
        assert_eq!(
            input_of(parse_line("3", GameKind::PairsMemory).unwrap()),
            GameInput::PairsMemory(PairsMemoryInput::Flip(3))
        );
        assert_eq!(
            input_of(parse_line(" 1 ", GameKind::SequenceRecall).unwrap()),
            GameInput::SequenceRecall(SequenceRecallInput::Press(1))
        );
        assert_eq!(
            input_of(parse_line("0", GameKind::SingleShot).unwrap()),
            GameInput::SingleShot(SingleShotInput::Choose(0))
        );
    }

    #[test]
    fn test_start_depends_on_template() {
        assert_eq!(
            input_of(parse_line("start", GameKind::TimedMatch).unwrap()),
            GameInput::TimedMatch(TimedMatchInput::Start)
        );
        assert!(parse_line("start", GameKind::PairsMemory).is_err());
    }

    #[test]
    fn test_drop_needs_two_numbers() {
        assert_eq!(
            input_of(parse_line("drop 4 1", GameKind::DragClassify).unwrap()),
            GameInput::DragClassify(DragClassifyInput::Drop { item: 4, bin: 1 })
        );
        assert!(parse_line("drop 4", GameKind::DragClassify).is_err());
        assert!(parse_line("2", GameKind::DragClassify).is_err());
    }

    #[test]
    fn test_answer_keeps_text() {
        assert_eq!(
            input_of(parse_line("run print(1 + 2);", GameKind::SingleShot).unwrap()),
            GameInput::SingleShot(SingleShotInput::Submit("print(1 + 2);".to_string()))
        );
        assert!(parse_line("answer", GameKind::SingleShot).is_err());
    }

    #[test]
    fn test_shell_commands() {
        assert_eq!(
            parse_line("reset", GameKind::TimedMatch).unwrap(),
            ConsoleAction::Command(ActivityCommand::ResetGame)
        );
        assert_eq!(
            parse_line("QUIT", GameKind::TimedMatch).unwrap(),
            ConsoleAction::Quit
        );
        assert_eq!(parse_line("", GameKind::TimedMatch).unwrap(), ConsoleAction::Show);
        assert!(parse_line("dance", GameKind::TimedMatch).is_err());
    }

    #[test]
    fn test_render_catalog_marks_completed() {
        let catalog = ActivityCatalog::builtin();
        let mut record = CompletionRecord::new();
        record.complete_id(&catalog, 1).unwrap();

        let text = render_catalog(&catalog.views(&record));
        let first = text.lines().next().unwrap();
        assert!(first.starts_with("[✓]"));
        assert!(first.contains("Color Match"));
        assert_eq!(text.lines().count(), catalog.len());
    }

    #[test]
    fn test_describe_celebration() {
        let event = ActivityEvent::Celebrate {
            activity_id: 1,
            title: "Color Match".to_string(),
            points: 10,
        };
        assert_eq!(
            describe_event(&event).unwrap(),
            "🎉 Color Match complete! +10 XP"
        );
    }
}
