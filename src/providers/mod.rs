//! Moment provider implementations

pub mod live;
pub mod replay;

pub use live::LiveProvider;
pub use replay::ReplayProvider;
