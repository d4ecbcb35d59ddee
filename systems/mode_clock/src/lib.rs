#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared scatter/chase timer that drives every clock-driven pursuer.

use std::time::Duration;

use maze_chase_core::{Command, Event, Phase};
use tracing::debug;

/// Pure system that walks a finite schedule of alternating phases.
///
/// The schedule starts in [`Phase::Scatter`]. Each entry is the duration of one
/// phase; once the cursor reaches the final entry that phase holds forever.
#[derive(Clone, Debug)]
pub struct ModeClock {
    schedule: Vec<Duration>,
    cursor: usize,
    phase: Phase,
    phase_started: Duration,
}

impl ModeClock {
    /// Creates a clock positioned at the start of the first scatter phase.
    #[must_use]
    pub fn new(schedule: Vec<Duration>) -> Self {
        Self {
            schedule,
            cursor: 0,
            phase: Phase::Scatter,
            phase_started: Duration::ZERO,
        }
    }

    /// Phase the clock currently reports.
    #[must_use]
    pub const fn current_phase(&self) -> Phase {
        self.phase
    }

    /// Index of the schedule entry currently running.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the clock to `now`, returning `true` when the phase flipped.
    ///
    /// At most one flip happens per call; the next phase starts at `now`.
    pub fn advance(&mut self, now: Duration) -> bool {
        let Some(&duration) = self.schedule.get(self.cursor) else {
            return false;
        };
        if self.cursor + 1 >= self.schedule.len() {
            return false;
        }

        let elapsed = now.saturating_sub(self.phase_started);
        if elapsed < duration {
            return false;
        }

        self.cursor += 1;
        self.phase = self.phase.flipped();
        self.phase_started = now;
        debug!(phase = ?self.phase, cursor = self.cursor, ?now, "mode clock advanced");
        true
    }

    /// Consumes time events and publishes phase flips as commands.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            if let Event::TimeAdvanced { now } = event {
                if self.advance(*now) {
                    out.push(Command::SetPhase { phase: self.phase });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(seconds: u64) -> Duration {
        Duration::from_secs(seconds)
    }

    #[test]
    fn starts_in_scatter() {
        let clock = ModeClock::new(vec![secs(7), secs(20)]);
        assert_eq!(clock.current_phase(), Phase::Scatter);
        assert_eq!(clock.cursor(), 0);
    }

    #[test]
    fn flips_once_the_phase_duration_has_elapsed() {
        let mut clock = ModeClock::new(vec![secs(7), secs(20), secs(7)]);

        assert!(!clock.advance(Duration::from_millis(6_999)));
        assert!(clock.advance(secs(7)));
        assert_eq!(clock.current_phase(), Phase::Chase);

        assert!(!clock.advance(Duration::from_millis(26_999)));
        assert!(clock.advance(secs(27)));
        assert_eq!(clock.current_phase(), Phase::Scatter);
    }

    #[test]
    fn late_ticks_restart_the_phase_at_the_observed_time() {
        let mut clock = ModeClock::new(vec![secs(7), secs(20), secs(7)]);

        assert!(clock.advance(secs(10)));
        assert!(!clock.advance(secs(29)));
        assert!(clock.advance(secs(30)));
    }

    #[test]
    fn final_entry_holds_indefinitely() {
        let mut clock = ModeClock::new(vec![secs(1), secs(1)]);

        assert!(clock.advance(secs(1)));
        assert_eq!(clock.current_phase(), Phase::Chase);
        assert!(!clock.advance(secs(10_000)));
        assert_eq!(clock.current_phase(), Phase::Chase);
        assert_eq!(clock.cursor(), 1);
    }

    #[test]
    fn handle_emits_set_phase_on_flip() {
        let mut clock = ModeClock::new(vec![secs(7), secs(20)]);
        let mut out = Vec::new();

        clock.handle(&[Event::TimeAdvanced { now: secs(3) }], &mut out);
        assert!(out.is_empty());

        clock.handle(&[Event::TimeAdvanced { now: secs(7) }], &mut out);
        assert_eq!(out, vec![Command::SetPhase { phase: Phase::Chase }]);
    }

    #[test]
    fn empty_schedule_stays_in_scatter() {
        let mut clock = ModeClock::new(Vec::new());
        assert!(!clock.advance(secs(100)));
        assert_eq!(clock.current_phase(), Phase::Scatter);
    }
}
