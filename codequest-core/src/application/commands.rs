use crate::domain::ActivityId;
use crate::games::GameInput;

/// Commands the host feeds into the activities loop
#[derive(Debug, Clone, PartialEq)]
pub enum ActivityCommand {
    /// Open the dialog for an activity and mount its game
    OpenActivity { activity_id: ActivityId },

    /// Close the open dialog and dispose its game
    CloseActivity,

    /// Player input for the open game
    Input { input: GameInput },

    /// Restart the open game from its initial phase
    ResetGame,

    /// Advance the open game's clock
    Tick { elapsed_ms: u64 },

    /// Mark an activity completed (the "Complete Activity" button)
    CompleteActivity { activity_id: ActivityId },
}

impl ActivityCommand {
    /// Command name used in `CommandFailed` events
    pub fn name(&self) -> &'static str {
        match self {
            ActivityCommand::OpenActivity { .. } => "OpenActivity",
            ActivityCommand::CloseActivity => "CloseActivity",
            ActivityCommand::Input { .. } => "Input",
            ActivityCommand::ResetGame => "ResetGame",
            ActivityCommand::Tick { .. } => "Tick",
            ActivityCommand::CompleteActivity { .. } => "CompleteActivity",
        }
    }
}

impl From<GameInput> for ActivityCommand {
    fn from(input: GameInput) -> Self {
        ActivityCommand::Input { input }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::PairsMemoryInput;

    #[test]
    fn test_command_clone() {
        let cmd = ActivityCommand::OpenActivity { activity_id: 3 };
        let cloned = cmd.clone();
        assert_eq!(cmd, cloned);
    }

    #[test]
    fn test_command_name() {
        assert_eq!(ActivityCommand::ResetGame.name(), "ResetGame");
        assert_eq!(
            ActivityCommand::CompleteActivity { activity_id: 1 }.name(),
            "CompleteActivity"
        );
    }

    #[test]
    fn test_from_game_input() {
        let cmd: ActivityCommand = GameInput::from(PairsMemoryInput::Flip(2)).into();
        let debug = format!("{:?}", cmd);
        assert!(debug.contains("Flip"));
    }
}
