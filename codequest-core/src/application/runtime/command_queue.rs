use crate::application::ActivityCommand;
use std::collections::VecDeque;

/// Bounded FIFO of commands waiting for the activities loop.
///
/// A `Tick` queued right behind another `Tick` is folded into it, so a host
/// that falls behind queues one catch-up tick instead of filling the queue
/// with clock updates. Player input is never merged.
#[derive(Debug)]
pub struct CommandQueue {
    queue: VecDeque<ActivityCommand>,
    max_size: usize,
    folded_ticks: usize,
}

impl CommandQueue {
    pub fn new(max_size: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(max_size),
            max_size,
            folded_ticks: 0,
        }
    }

    /// Queue a command. A full queue hands the command back inside the error.
    pub fn push(&mut self, cmd: ActivityCommand) -> Result<(), QueueError> {
        if let ActivityCommand::Tick { elapsed_ms } = cmd {
            if let Some(ActivityCommand::Tick { elapsed_ms: queued }) = self.queue.back_mut() {
                *queued = queued.saturating_add(elapsed_ms);
                self.folded_ticks += 1;
                return Ok(());
            }
        }

        if self.queue.len() >= self.max_size {
            tracing::warn!("⚠️ Command queue full, dropping {}", cmd.name());
            return Err(QueueError::Full {
                max: self.max_size,
                command: Box::new(cmd),
            });
        }
        self.queue.push_back(cmd);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<ActivityCommand> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_size
    }

    /// Game time waiting in queued ticks
    pub fn pending_ms(&self) -> u64 {
        self.queue
            .iter()
            .filter_map(|cmd| match cmd {
                ActivityCommand::Tick { elapsed_ms } => Some(*elapsed_ms),
                _ => None,
            })
            .fold(0u64, u64::saturating_add)
    }

    /// Ticks absorbed into an earlier queued tick since creation
    pub fn folded_ticks(&self) -> usize {
        self.folded_ticks
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum QueueError {
    #[error("Command queue is full ({max} pending), dropped {}", command.name())]
    Full {
        max: usize,
        command: Box<ActivityCommand>,
    },
}

impl QueueError {
    /// The command that was not queued
    pub fn into_command(self) -> ActivityCommand {
        match self {
            QueueError::Full { command, .. } => *command,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::{GameInput, PairsMemoryInput};

    fn flip(index: usize) -> ActivityCommand {
        ActivityCommand::Input {
            input: GameInput::PairsMemory(PairsMemoryInput::Flip(index)),
        }
    }

    #[test]
    fn test_consecutive_ticks_fold_into_one() {
        let mut queue = CommandQueue::new(4);
        for _ in 0..50 {
            queue.push(ActivityCommand::Tick { elapsed_ms: 100 }).unwrap();
        }

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pending_ms(), 5_000);
        assert_eq!(queue.folded_ticks(), 49);
        assert_eq!(queue.pop(), Some(ActivityCommand::Tick { elapsed_ms: 5_000 }));
    }

    #[test]
    fn test_input_keeps_its_place_between_ticks() {
        let mut queue = CommandQueue::new(10);
        queue.push(ActivityCommand::Tick { elapsed_ms: 100 }).unwrap();
        queue.push(flip(3)).unwrap();
        queue.push(ActivityCommand::Tick { elapsed_ms: 100 }).unwrap();
        queue.push(ActivityCommand::Tick { elapsed_ms: 100 }).unwrap();

        assert_eq!(queue.pop(), Some(ActivityCommand::Tick { elapsed_ms: 100 }));
        assert_eq!(queue.pop(), Some(flip(3)));
        assert_eq!(queue.pop(), Some(ActivityCommand::Tick { elapsed_ms: 200 }));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_full_queue_returns_the_dropped_command() {
        let mut queue = CommandQueue::new(2);
        queue.push(flip(0)).unwrap();
        queue.push(flip(1)).unwrap();

        let err = queue.push(flip(2)).unwrap_err();
        assert!(err.to_string().contains("full (2 pending)"));
        assert_eq!(err.into_command(), flip(2));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_tick_behind_tick_is_accepted_when_full() {
        let mut queue = CommandQueue::new(2);
        queue.push(flip(0)).unwrap();
        queue.push(ActivityCommand::Tick { elapsed_ms: 100 }).unwrap();

        assert!(queue.push(ActivityCommand::Tick { elapsed_ms: 100 }).is_ok());
        assert_eq!(queue.pending_ms(), 200);
        assert!(queue.push(ActivityCommand::ResetGame).is_err());
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = CommandQueue::new(10);
        for activity_id in 1..=3 {
            queue
                .push(ActivityCommand::CompleteActivity { activity_id })
                .unwrap();
        }

        let ids: Vec<_> = std::iter::from_fn(|| queue.pop())
            .map(|cmd| match cmd {
                ActivityCommand::CompleteActivity { activity_id } => activity_id,
                other => panic!("Unexpected {:?}", other),
            })
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(queue.capacity(), 10);
    }
}
