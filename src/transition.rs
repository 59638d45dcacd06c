//! Pluggable animations bridging two screens.

use std::{fmt::Debug, time::Duration};

use crate::screen::ScreenHandle;

pub use self::{instant::Instant, page_flip::PageFlip, slide::Slide};

mod instant;
mod page_flip;
mod slide;

/// Direction a sliding transition moves in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

/// One animated hand-over from an outgoing to an incoming screen.
///
/// An instance drives exactly one run: `init` once, `update` every frame
/// with the total elapsed time, then exactly one `complete` - either
/// because `update` reported completion or because a new transition
/// preempted this one. `complete` must restore whatever transient state
/// the run left on the outgoing screen and release any overlays or
/// shaders it attached, on both exit paths.
pub trait Transition: Debug {
    fn init(&mut self, _outgoing: &ScreenHandle, _incoming: &ScreenHandle) {}

    /// Advances the animation. Returns `true` once it has finished.
    fn update(
        &mut self,
        _outgoing: &ScreenHandle,
        _incoming: &ScreenHandle,
        _elapsed: Duration,
    ) -> bool {
        true
    }

    fn complete(&mut self, _outgoing: &ScreenHandle, _incoming: &ScreenHandle) {}
}

/// Just a helper trait to replace
/// `Box::new(Slide::new(origin))`
/// with
/// `Slide::new(origin).boxed()`.
pub trait Boxed {
    type Out;

    fn boxed(self) -> Self::Out;
}

impl<T: 'static + Transition> Boxed for T {
    type Out = Box<dyn Transition>;

    fn boxed(self) -> Self::Out {
        Box::new(self)
    }
}
