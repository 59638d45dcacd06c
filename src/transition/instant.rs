use crate::transition::Transition;

/// Puts the incoming screen in place with no animation at all.
///
/// The first `update` reports completion, so stack operations using it
/// finish before returning. This is the default transition.
#[derive(Debug, Clone, Copy, Default)]
pub struct Instant;

impl Instant {
    pub fn new() -> Self {
        Self
    }
}

impl Transition for Instant {}
