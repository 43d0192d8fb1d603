// Per-question countdown

pub use countdown::{CountdownTimer, TimerEvent, TimerHandle};

mod countdown;
