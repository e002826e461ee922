mod broadcaster;
mod scheduler;
mod session_rng;

pub mod tictactoe;

pub use broadcaster::GameBroadcaster;
pub use scheduler::{DelayedTransitions, Expired, ScheduledTask};
pub use session_rng::SessionRng;
