use std::{cell::RefCell, error, fmt::Debug, rc::Rc, time::Duration};

use mq::prelude::Vec2;

use crate::stage::Layer;

/// What a screen's lifecycle callback returns. Any user error type fits.
pub type ScreenResult<T = ()> = Result<T, Box<dyn error::Error>>;

/// One full-view application state (menu, game, pause, ...).
///
/// Screens are constructed by the game and handed to the stack, which only
/// manages membership and visibility. The `was_*` callbacks are
/// notifications fired by the stack; they default to no-ops and may fail -
/// failures are contained by the stack and never corrupt it.
pub trait Screen: Debug {
    /// The screen's root drawable.
    fn layer(&self) -> Layer;

    /// Visible dimensions, used by transitions to place screens off-stage.
    fn size(&self) -> Vec2;

    fn update(&mut self, dtime: Duration);

    fn draw(&self, alpha: f32);

    /// The screen joined the stack (it may not be visible yet).
    fn was_added(&mut self) -> ScreenResult {
        Ok(())
    }

    /// The screen's layer went onto the stage.
    fn was_shown(&mut self) -> ScreenResult {
        Ok(())
    }

    /// The screen's layer left the stage (it may still be stacked beneath).
    fn was_hidden(&mut self) -> ScreenResult {
        Ok(())
    }

    /// The screen left the stack for good.
    fn was_removed(&mut self) -> ScreenResult {
        Ok(())
    }

    /// A transition away from this screen has started.
    fn hide_transition_started(&mut self) {}

    /// A transition towards this screen has finished.
    fn show_transition_completed(&mut self) {}
}

/// A shared handle to a screen.
///
/// The stack and an in-flight transition reference the same screens, so
/// screens live behind `Rc<RefCell<_>>` like sprites do in scene graphs.
/// Identity is pointer identity: `is_same` is what the no-duplicate
/// invariant is checked with.
#[derive(Debug, Clone)]
pub struct ScreenHandle {
    data: Rc<RefCell<dyn Screen>>,
}

impl ScreenHandle {
    pub fn new(screen: impl Screen + 'static) -> Self {
        Self {
            data: Rc::new(RefCell::new(screen)),
        }
    }

    pub fn is_same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    pub fn layer(&self) -> Layer {
        self.data.borrow().layer()
    }

    pub fn size(&self) -> Vec2 {
        self.data.borrow().size()
    }

    pub fn update(&self, dtime: Duration) {
        self.data.borrow_mut().update(dtime);
    }

    pub fn draw(&self, alpha: f32) {
        self.data.borrow().draw(alpha);
    }

    pub(crate) fn was_added(&self) -> ScreenResult {
        self.data.borrow_mut().was_added()
    }

    pub(crate) fn was_shown(&self) -> ScreenResult {
        self.data.borrow_mut().was_shown()
    }

    pub(crate) fn was_hidden(&self) -> ScreenResult {
        self.data.borrow_mut().was_hidden()
    }

    pub(crate) fn was_removed(&self) -> ScreenResult {
        self.data.borrow_mut().was_removed()
    }

    pub(crate) fn hide_transition_started(&self) {
        self.data.borrow_mut().hide_transition_started();
    }

    pub(crate) fn show_transition_completed(&self) {
        self.data.borrow_mut().show_transition_completed();
    }
}
