use std::time::{Duration, Instant};

/// Cooperative stop signal, polled at every search node.
pub trait DeadlineOracle {
    fn exceeded(&self) -> bool;
}

impl<F: Fn() -> bool> DeadlineOracle for F {
    fn exceeded(&self) -> bool { self() }
}

/// Wall-clock deadline: expired once `elapsed >= allotment`.
#[derive(Clone, Copy, Debug)]
pub struct Deadline {
    start: Instant,
    allotment: Option<Duration>,
}

impl Deadline {
    pub fn new(allotment: Duration) -> Self { Self::starting_at(Instant::now(), allotment) }

    pub fn starting_at(start: Instant, allotment: Duration) -> Self {
        Self { start, allotment: Some(allotment) }
    }

    pub fn unbounded() -> Self { Self { start: Instant::now(), allotment: None } }

}

impl DeadlineOracle for Deadline {
    fn exceeded(&self) -> bool {
        match self.allotment {
            Some(a) => self.start.elapsed() >= a,
            None => false,
        }
    }
}

/// Seconds to a `Duration`, clamped to `[ZERO, MAX]`; NaN maps to zero.
pub fn saturating_secs(secs: f64) -> Duration {
    if secs.is_nan() || secs <= 0.0 { return Duration::ZERO; }
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}

/// Per-round clock: `time_per_k_turns` seconds shared by every `k` moves.
///
/// Unused or overspent time carries over inside a round. The round resets
/// on every k-th move regardless of what was left.
#[derive(Clone, Debug)]
pub struct TimeBudget {
    k: u32,
    time_per_k_turns: f64,
    safety_margin: f64,
    turns_remaining: u32,
    time_remaining: f64,
}

impl TimeBudget {
    pub fn new(time_per_k_turns: Duration, k: u32, safety_margin: Duration) -> Self {
        let k = k.max(1);
        let pool = time_per_k_turns.as_secs_f64();
        Self {
            k,
            time_per_k_turns: pool,
            safety_margin: safety_margin.as_secs_f64(),
            turns_remaining: k,
            time_remaining: pool,
        }
    }

    /// Time this move may use: remaining / turns, less the safety margin.
    pub fn allotment(&self) -> Duration {
        let secs = self.time_remaining / self.turns_remaining as f64 - self.safety_margin;
        saturating_secs(secs)
    }

    /// Books a finished move that took `elapsed`.
    pub fn end_turn(&mut self, elapsed: Duration) {
        if self.turns_remaining == 1 {
            self.turns_remaining = self.k;
            self.time_remaining = self.time_per_k_turns;
        } else {
            self.turns_remaining -= 1;
            self.time_remaining -= elapsed.as_secs_f64();
        }
    }

    pub fn turns_remaining(&self) -> u32 { self.turns_remaining }

    /// Seconds left in the round; negative once overspent.
    pub fn time_remaining(&self) -> f64 { self.time_remaining }

    pub fn k(&self) -> u32 { self.k }
}
