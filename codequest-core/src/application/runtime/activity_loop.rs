use crate::application::runtime::{CommandQueue, QueueError};
use crate::application::{ActivityCommand, ActivityEvent, ActivityEventLoop};

/// Activities loop - processes queued commands in batches
pub struct ActivityLoop {
    /// Stateful event loop (owns catalog, progress and the open game)
    event_loop: ActivityEventLoop,

    /// Inbound command queue
    inbound: CommandQueue,

    /// Outbound event queue (caller drains this)
    outbound: Vec<ActivityEvent>,

    /// Max commands to process per poll
    batch_size: usize,
}

impl ActivityLoop {
    pub fn new(event_loop: ActivityEventLoop, batch_size: usize, max_queue_size: usize) -> Self {
        Self {
            event_loop,
            inbound: CommandQueue::new(max_queue_size),
            outbound: Vec::new(),
            batch_size,
        }
    }

    /// Submit a command (non-blocking)
    pub fn submit(&mut self, cmd: ActivityCommand) -> Result<(), QueueError> {
        self.inbound.push(cmd)
    }

    /// Process up to `batch_size` commands.
    /// Returns number of commands processed.
    pub fn poll(&mut self) -> usize {
        let mut processed = 0;

        while processed < self.batch_size {
            match self.inbound.pop() {
                Some(cmd) => {
                    let events = self.event_loop.handle_command(cmd);
                    self.outbound.extend(events);
                    processed += 1;
                }
                None => break,
            }
        }

        processed
    }

    /// Submit and process immediately, returning everything emitted so far
    pub fn dispatch(&mut self, cmd: ActivityCommand) -> Result<Vec<ActivityEvent>, QueueError> {
        self.submit(cmd)?;
        while self.poll() > 0 {}
        Ok(self.drain_events())
    }

    /// Drain all emitted events (caller's responsibility)
    pub fn drain_events(&mut self) -> Vec<ActivityEvent> {
        std::mem::take(&mut self.outbound)
    }

    pub fn pending_commands(&self) -> usize {
        self.inbound.len()
    }

    /// Get reference to event loop (for queries)
    pub fn event_loop(&self) -> &ActivityEventLoop {
        &self.event_loop
    }
}

impl Default for ActivityLoop {
    fn default() -> Self {
        Self::new(ActivityEventLoop::default(), 10, 100)
    }
}
