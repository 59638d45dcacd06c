//! Zstack is a stack of screens (menu, game, pause, ...) for 2d games.
//!
//! The stack tracks which screen is visible, animates transitions between
//! screens and keeps its bookkeeping consistent even when screen callbacks
//! fail: every lifecycle call is guarded and failures are routed to a
//! user-supplied [`FaultHandler`].
//!
//! The stack doesn't run its own loop. Call [`ScreenStack::update`] and
//! [`ScreenStack::draw`] once per frame from the game loop.

use std::{error, fmt, time::Duration};

pub use crate::{
    easing::Easing,
    screen::{Screen, ScreenHandle, ScreenResult},
    stack::{FailFast, FaultHandler, LogAndContinue, ScreenStack, TransitionFactory},
    stage::{Layer, Shader, Stage},
    transition::{Boxed, Dir, Instant, PageFlip, Slide, Transition},
};

pub mod transition;

mod easing;
mod screen;
mod stack;
mod stage;


pub fn duration_to_f32(d: Duration) -> f32 {
    d.as_secs() as f32 + d.subsec_nanos() as f32 * 1e-9
}

/// The four guarded screen callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    WasAdded,
    WasShown,
    WasHidden,
    WasRemoved,
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Hook::WasAdded => write!(f, "was_added"),
            Hook::WasShown => write!(f, "was_shown"),
            Hook::WasHidden => write!(f, "was_hidden"),
            Hook::WasRemoved => write!(f, "was_removed"),
        }
    }
}

/// A failure raised by a screen's lifecycle callback.
///
/// Faults never corrupt the stack: membership and the current transition
/// are updated before the fault reaches the handler.
#[derive(Debug)]
pub struct Fault {
    pub hook: Hook,
    pub source: Box<dyn error::Error>,
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "screen callback '{}' failed: {}", self.hook, self.source)
    }
}

impl error::Error for Fault {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}
