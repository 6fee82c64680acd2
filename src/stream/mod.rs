//! Stream utilities for moment subscriptions

mod throttle;

pub use throttle::{Throttle, ThrottleExt};
