//! Presence bridge: translates a sampled boolean presence signal into
//! pause/resume calls on the focus timer.
//!
//! The bridge is edge-triggered: a run of identical readings acts at most
//! once. The core rule is that automation never overrides user intent --
//! a manual pause is never auto-resumed, only an auto-pause is.

use crate::events::Event;
use crate::timer::FocusTimer;

/// Lifecycle port for the external detector that owns camera access and
/// produces presence readings.
///
/// The core never creates sampling intervals itself; the collaborator
/// samples at its own cadence and feeds readings to [`PresenceBridge`].
/// `sample` returns `None` when no reading is available -- a detector
/// that never produces readings simply never auto-pauses anything.
pub trait PresenceDetector {
    fn start(&mut self);
    fn stop(&mut self);
    fn sample(&mut self) -> Option<bool>;
}

/// Detector for environments without presence hardware.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDetector;

impl PresenceDetector for NullDetector {
    fn start(&mut self) {}
    fn stop(&mut self) {}
    fn sample(&mut self) -> Option<bool> {
        None
    }
}

/// Edge-detecting adapter between presence readings and the timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresenceBridge {
    last_present: Option<bool>,
}

impl PresenceBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous reading, e.g. when the detector restarts.
    pub fn reset(&mut self) {
        self.last_present = None;
    }

    /// Feed one presence reading.
    ///
    /// Acts only on edges. Becoming present resumes the timer only when
    /// the pause was automatic; becoming absent pauses only a running,
    /// unpaused timer. The returned event doubles as the notification
    /// hook for the caller's UI.
    pub fn observe(&mut self, present: bool, timer: &mut FocusTimer) -> Option<Event> {
        if self.last_present == Some(present) {
            return None;
        }
        self.last_present = Some(present);

        if present {
            if timer.is_running() && timer.is_paused() && timer.is_auto_paused() {
                return timer.resume();
            }
        } else if timer.is_running() && !timer.is_paused() {
            return timer.pause(true);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Event;

    #[test]
    fn absence_auto_pauses_a_running_timer() {
        let mut bridge = PresenceBridge::new();
        let mut timer = FocusTimer::default();
        timer.start();

        let event = bridge.observe(false, &mut timer);
        assert!(matches!(event, Some(Event::TimerPaused { auto: true, .. })));
        assert!(timer.is_paused() && timer.is_auto_paused());
    }

    #[test]
    fn reappearance_resumes_an_auto_pause() {
        let mut bridge = PresenceBridge::new();
        let mut timer = FocusTimer::default();
        timer.start();
        bridge.observe(false, &mut timer);

        let event = bridge.observe(true, &mut timer);
        assert!(matches!(event, Some(Event::TimerResumed { .. })));
        assert!(!timer.is_paused());
    }

    #[test]
    fn manual_pause_is_never_auto_resumed() {
        let mut bridge = PresenceBridge::new();
        let mut timer = FocusTimer::default();
        timer.start();
        bridge.observe(true, &mut timer);
        timer.pause(false);

        // User walks away and comes back: the manual pause must hold.
        assert!(bridge.observe(false, &mut timer).is_none());
        assert!(bridge.observe(true, &mut timer).is_none());
        assert!(timer.is_paused() && !timer.is_auto_paused());
    }

    #[test]
    fn repeated_readings_act_at_most_once() {
        let mut bridge = PresenceBridge::new();
        let mut timer = FocusTimer::default();
        timer.start();

        assert!(bridge.observe(false, &mut timer).is_some());
        for _ in 0..5 {
            assert!(bridge.observe(false, &mut timer).is_none());
        }
        assert!(bridge.observe(true, &mut timer).is_some());
        for _ in 0..5 {
            assert!(bridge.observe(true, &mut timer).is_none());
        }
    }

    #[test]
    fn idle_timer_is_left_alone() {
        let mut bridge = PresenceBridge::new();
        let mut timer = FocusTimer::default();
        assert!(bridge.observe(false, &mut timer).is_none());
        assert!(bridge.observe(true, &mut timer).is_none());
        assert!(!timer.is_running() && !timer.is_paused());
    }

    #[test]
    fn reset_rearms_the_edge_detector() {
        let mut bridge = PresenceBridge::new();
        let mut timer = FocusTimer::default();
        timer.start();
        bridge.observe(false, &mut timer);
        timer.resume();

        // Without a reset the repeated "absent" reading would be ignored.
        bridge.reset();
        assert!(bridge.observe(false, &mut timer).is_some());
    }
}
