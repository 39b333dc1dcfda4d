//! Decorative header animation.
//!
//! Two repeating timers drive it: a fast rotation tick and a slow pulse tick.
//! Unlike a fire-and-forget interval, both tasks are owned by the [`Animator`]
//! and aborted on stop, on quit, and on drop, so the timers can always be
//! cancelled.

use crate::app::event::AppEvent;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

/// Pulse value ceiling; the cycle resets to 0 once it is reached.
const PULSE_MAX: u8 = 40;

/// Pure animation counters, advanced by tick events.
#[derive(Debug, Clone, Copy)]
pub struct AnimationState {
    /// Set once the first input event has been seen.
    pub armed: bool,
    pub running: bool,
    /// Rotation angle in degrees, one degree per spin tick.
    pub angle: u16,
    /// Pulse value: starts at 16, climbs to 40, wraps to 0.
    pub pulse: u8,
}

impl AnimationState {
    pub fn new() -> Self {
        Self {
            armed: false,
            running: false,
            angle: 0,
            pulse: 16,
        }
    }

    pub fn spin_tick(&mut self) {
        self.angle = (self.angle + 1) % 360;
    }

    pub fn pulse_tick(&mut self) {
        self.pulse = if self.pulse >= PULSE_MAX { 0 } else { self.pulse + 1 };
    }

    /// Spinner glyph for the current angle (eighth turns).
    pub fn spinner_glyph(&self) -> &'static str {
        const FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];
        FRAMES[(self.angle / 45) as usize % FRAMES.len()]
    }

    /// Pulse rendered as a bar width out of `max_width`.
    pub fn pulse_width(&self, max_width: u16) -> u16 {
        (self.pulse as u32 * max_width as u32 / PULSE_MAX as u32) as u16
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns the two interval tasks feeding spin and pulse ticks into the event
/// channel.
pub struct Animator {
    tx: UnboundedSender<AppEvent>,
    spin_task: Option<JoinHandle<()>>,
    pulse_task: Option<JoinHandle<()>>,
}

impl Animator {
    pub fn new(tx: UnboundedSender<AppEvent>) -> Self {
        Self {
            tx,
            spin_task: None,
            pulse_task: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.spin_task.is_some()
    }

    /// Spawn the two timers. A no-op while already running, so repeated
    /// arming cannot stack intervals.
    pub fn start(&mut self, spin_interval_ms: u64, pulse_interval_ms: u64) {
        if self.is_running() {
            return;
        }
        debug!(spin_interval_ms, pulse_interval_ms, "starting animation timers");

        let tx = self.tx.clone();
        self.spin_task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(spin_interval_ms));
            loop {
                interval.tick().await;
                if tx.send(AppEvent::SpinTick).is_err() {
                    break;
                }
            }
        }));

        let tx = self.tx.clone();
        self.pulse_task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(pulse_interval_ms));
            loop {
                interval.tick().await;
                if tx.send(AppEvent::PulseTick).is_err() {
                    break;
                }
            }
        }));
    }

    /// Abort both timer tasks.
    pub fn stop(&mut self) {
        if let Some(task) = self.spin_task.take() {
            task.abort();
        }
        if let Some(task) = self.pulse_task.take() {
            task.abort();
        }
        debug!("animation timers stopped");
    }
}

impl Drop for Animator {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_wraps() {
        let mut anim = AnimationState::new();
        for _ in 0..359 {
            anim.spin_tick();
        }
        assert_eq!(anim.angle, 359);
        anim.spin_tick();
        assert_eq!(anim.angle, 0);
    }

    #[test]
    fn test_pulse_cycle() {
        let mut anim = AnimationState::new();
        assert_eq!(anim.pulse, 16);
        for _ in 0..24 {
            anim.pulse_tick();
        }
        assert_eq!(anim.pulse, 40);
        anim.pulse_tick();
        assert_eq!(anim.pulse, 0);
        anim.pulse_tick();
        assert_eq!(anim.pulse, 1);
    }

    #[test]
    fn test_pulse_width_scales() {
        let mut anim = AnimationState::new();
        anim.pulse = 40;
        assert_eq!(anim.pulse_width(20), 20);
        anim.pulse = 0;
        assert_eq!(anim.pulse_width(20), 0);
        anim.pulse = 20;
        assert_eq!(anim.pulse_width(20), 10);
    }

    #[test]
    fn test_spinner_glyph_steps() {
        let mut anim = AnimationState::new();
        let first = anim.spinner_glyph();
        for _ in 0..45 {
            anim.spin_tick();
        }
        assert_ne!(anim.spinner_glyph(), first);
    }

    #[tokio::test]
    async fn test_start_is_idempotent_and_stop_aborts() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut animator = Animator::new(tx);
        animator.start(1, 1);
        assert!(animator.is_running());
        animator.start(1, 1); // must not stack a second pair of timers
        assert!(animator.is_running());

        // at least one tick of each kind arrives
        let mut saw_spin = false;
        let mut saw_pulse = false;
        while !(saw_spin && saw_pulse) {
            match rx.recv().await {
                Some(AppEvent::SpinTick) => saw_spin = true,
                Some(AppEvent::PulseTick) => saw_pulse = true,
                _ => {}
            }
        }

        animator.stop();
        assert!(!animator.is_running());
    }
}
