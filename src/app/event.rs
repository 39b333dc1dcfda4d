use crossterm::event::Event as CrosstermEvent;

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// Background UI refresh tick
    Tick,

    /// Animation rotation tick (fast timer)
    SpinTick,

    /// Animation pulse tick (slow timer)
    PulseTick,
}
