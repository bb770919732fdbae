use instant::Instant;

/// Measures wall-clock time between host ticks.
///
/// Game sessions run on a logical millisecond clock; hosts feed it with the
/// real elapsed time they observe. `instant` keeps this working in the
/// browser where `std::time::Instant` panics.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    last: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Milliseconds since the previous lap (or since start)
    pub fn lap_ms(&mut self) -> u64 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        self.last = now;
        elapsed.as_millis() as u64
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::start()
    }
}
