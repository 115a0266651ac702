//! Progress reporting primitives.

pub mod bus;
pub mod event;

pub use bus::{ProgressBus, ProgressReceiver};
pub use event::ProgressEvent;
