/// Side effects requested by the event handler, executed by the main loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Spawn the animation timers (no-op if already running).
    StartAnimator,

    /// Abort the animation timers.
    StopAnimator,

    /// Tear down and exit.
    Quit,
}
