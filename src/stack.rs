use std::time::Duration;

use log::{error, info};
use mq::prelude::Vec2;

use crate::{
    screen::{ScreenHandle, ScreenResult},
    stage::Stage,
    transition::{Instant, Transition},
    Fault, Hook,
};

/// Receives faults raised by screen lifecycle callbacks.
///
/// This is the stack's single extension point: by the time a fault gets
/// here the stack's own bookkeeping has already been updated, so the
/// handler is free to log and keep going or to take the game down.
pub trait FaultHandler {
    fn handle_error(&mut self, error: Fault);
}

/// Logs the fault and keeps the stack running.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAndContinue;

impl FaultHandler for LogAndContinue {
    fn handle_error(&mut self, error: Fault) {
        error!("ScreenStack: {}", error);
    }
}

/// Panics on the first fault. One broken screen takes the game down.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailFast;

impl FaultHandler for FailFast {
    fn handle_error(&mut self, error: Fault) {
        panic!("ScreenStack: {}", error);
    }
}

/// How a transitor puts its incoming screen on stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShowPolicy {
    /// A genuinely new screen: full add + show lifecycle.
    AddAndShow,
    /// A screen already resident in the stack is re-surfacing (pop-to /
    /// remove-top). Re-adding it would double-fire `was_added`.
    JustShow,
}

/// What happens to the outgoing screen once the transition is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompleteAction {
    /// Hide it; it stays stacked beneath (push).
    Hide,
    /// Hide it and fire its removal notification (replace / remove).
    HideAndRemove,
}

/// The runtime driver of one in-flight transition. At most one exists at
/// a time; starting another force-completes this one first.
#[derive(Debug)]
struct Transitor {
    outgoing: ScreenHandle,
    incoming: ScreenHandle,
    trans: Box<dyn Transition>,
    elapsed: Duration,
    show_policy: ShowPolicy,
    complete_action: CompleteAction,
}

/// Builds a fresh transition per operation; instances are single-use.
pub type TransitionFactory = Box<dyn Fn() -> Box<dyn Transition>>;

/// An ordered stack of screens: index 0 is the visible top.
///
/// Operations either mutate the stack directly (empty-stack cases,
/// non-top removals) or install a [`Transitor`] that animates the
/// hand-over and finishes the lifecycle choreography on completion.
/// Whatever a screen callback does, membership and the transitor slot
/// end up consistent; failures go to the [`FaultHandler`].
pub struct ScreenStack {
    screens: Vec<ScreenHandle>,
    transitor: Option<Transitor>,
    stage: Stage,
    origin: Vec2,
    default_push: TransitionFactory,
    default_pop: TransitionFactory,
    handler: Box<dyn FaultHandler>,
}

impl ScreenStack {
    pub fn new(stage: Stage, handler: Box<dyn FaultHandler>) -> Self {
        Self {
            screens: Vec::new(),
            transitor: None,
            stage,
            origin: Vec2::new(0.0, 0.0),
            default_push: Box::new(|| Box::new(Instant::new())),
            default_pop: Box::new(|| Box::new(Instant::new())),
            handler,
        }
    }

    /// The resting position of every screen's layer. Defaults to zero.
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    /// Overrides the transition used by `push`, `push_all` and `replace`.
    pub fn set_default_push_transition(&mut self, factory: TransitionFactory) {
        self.default_push = factory;
    }

    /// Overrides the transition used by `pop_to` and `remove`.
    pub fn set_default_pop_transition(&mut self, factory: TransitionFactory) {
        self.default_pop = factory;
    }

    /// Creates a slide transition anchored at the current origin.
    pub fn slide(&self) -> crate::transition::Slide {
        crate::transition::Slide::new(self.origin)
    }

    pub fn page_flip(&self) -> crate::transition::PageFlip {
        crate::transition::PageFlip::new()
    }

    /// [`ScreenStack::push_with`] with the default push transition.
    pub fn push(&mut self, screen: ScreenHandle) {
        let trans = (self.default_push)();
        self.push_with(screen, trans);
    }

    /// Pushes a screen onto the stack, making it the visible one. The
    /// current top is hidden once the transition finishes but stays
    /// stacked beneath.
    ///
    /// Panics if the screen is already in the stack.
    pub fn push_with(&mut self, screen: ScreenHandle, trans: Box<dyn Transition>) {
        info!("ScreenStack::push");
        assert!(
            !self.contains(&screen),
            "can't push a screen that is already in the stack"
        );
        if self.screens.is_empty() {
            self.add_and_show(screen);
        } else {
            let outgoing = self.screens[0].clone();
            self.transition(Transitor {
                outgoing,
                incoming: screen,
                trans,
                elapsed: Duration::new(0, 0),
                show_policy: ShowPolicy::AddAndShow,
                complete_action: CompleteAction::Hide,
            });
        }
    }

    /// [`ScreenStack::push_all_with`] with the default push transition.
    pub fn push_all(&mut self, screens: Vec<ScreenHandle>) {
        let trans = (self.default_push)();
        self.push_all_with(screens, trans);
    }

    /// Pushes several screens in order; only the last one becomes visible
    /// (via the transition), the rest are added silently beneath it. The
    /// first screen of the list ends up deepest.
    ///
    /// Panics if the list is empty or any screen is already stacked.
    pub fn push_all_with(&mut self, screens: Vec<ScreenHandle>, trans: Box<dyn Transition>) {
        info!("ScreenStack::push_all: {} screens", screens.len());
        assert!(!screens.is_empty(), "can't push an empty list of screens");
        if self.screens.is_empty() {
            for screen in screens {
                self.add(screen);
            }
            let top = self.screens[0].clone();
            self.just_show(&top);
        } else {
            let outgoing = self.screens[0].clone();
            let mut screens = screens;
            let last = screens.pop().expect("the list was checked as non-empty");
            for screen in screens {
                self.add(screen);
            }
            self.transition(Transitor {
                outgoing,
                incoming: last,
                trans,
                elapsed: Duration::new(0, 0),
                show_policy: ShowPolicy::AddAndShow,
                complete_action: CompleteAction::Hide,
            });
        }
    }

    /// [`ScreenStack::pop_to_with`] with the default pop transition.
    pub fn pop_to(&mut self, target: Option<&ScreenHandle>) {
        let trans = (self.default_pop)();
        self.pop_to_with(target, trans);
    }

    /// Pops screens until `target` is the visible top. Screens between the
    /// top and the target were never visible, so they leave with only a
    /// removal notification; the top itself leaves with a transitioned
    /// removal. With `None` (or a target that isn't stacked) every screen
    /// is popped.
    pub fn pop_to_with(&mut self, target: Option<&ScreenHandle>, trans: Box<dyn Transition>) {
        info!("ScreenStack::pop_to");
        loop {
            if self.screens.len() <= 1 {
                break;
            }
            let beneath_top = self.screens[1].clone();
            let is_target = target.map_or(false, |target| beneath_top.is_same(target));
            if is_target {
                break;
            }
            self.just_remove(&beneath_top);
        }
        if let Some(top) = self.screens.first().cloned() {
            self.remove_with(&top, trans);
        }
    }

    /// [`ScreenStack::replace_with`] with the default push transition.
    pub fn replace(&mut self, screen: ScreenHandle) {
        let trans = (self.default_push)();
        self.replace_with(screen, trans);
    }

    /// Swaps the top of the stack for the supplied screen. The old top
    /// leaves the stack's bookkeeping at once (it only participates in the
    /// transition visually) and is hidden and removed on completion.
    ///
    /// Panics if the screen is already in the stack.
    pub fn replace_with(&mut self, screen: ScreenHandle, trans: Box<dyn Transition>) {
        info!("ScreenStack::replace");
        assert!(
            !self.contains(&screen),
            "can't replace with a screen that is already in the stack"
        );
        if self.screens.is_empty() {
            self.add_and_show(screen);
        } else {
            let outgoing = self.screens.remove(0);
            self.transition(Transitor {
                outgoing,
                incoming: screen,
                trans,
                elapsed: Duration::new(0, 0),
                show_policy: ShowPolicy::AddAndShow,
                complete_action: CompleteAction::HideAndRemove,
            });
        }
    }

    /// [`ScreenStack::remove_with`] with the default pop transition.
    pub fn remove(&mut self, screen: &ScreenHandle) -> bool {
        let trans = (self.default_pop)();
        self.remove_with(screen, trans)
    }

    /// Removes a screen from the stack. A non-top screen was never visible
    /// and leaves silently; the top screen transitions out, revealing the
    /// screen beneath (which is already resident, so it is re-shown
    /// without a second `was_added`).
    ///
    /// Returns `false` if the screen wasn't in the stack.
    pub fn remove_with(&mut self, screen: &ScreenHandle, trans: Box<dyn Transition>) -> bool {
        info!("ScreenStack::remove");
        let is_top = self
            .screens
            .first()
            .map_or(false, |top| top.is_same(screen));
        if !is_top {
            return self.just_remove(screen);
        }
        if self.screens.len() > 1 {
            let outgoing = self.screens.remove(0);
            let incoming = self.screens[0].clone();
            self.transition(Transitor {
                outgoing,
                incoming,
                trans,
                elapsed: Duration::new(0, 0),
                show_policy: ShowPolicy::JustShow,
                complete_action: CompleteAction::HideAndRemove,
            });
        } else {
            self.hide(screen);
            self.just_remove(screen);
        }
        true
    }

    /// Advances the visible screen, or both screens of an in-flight
    /// transition. Call once per frame.
    pub fn update(&mut self, dtime: Duration) {
        if let Some(mut transitor) = self.transitor.take() {
            transitor.outgoing.update(dtime);
            transitor.incoming.update(dtime);
            transitor.elapsed += dtime;
            let done = transitor.trans.update(
                &transitor.outgoing,
                &transitor.incoming,
                transitor.elapsed,
            );
            if done {
                self.finish(transitor);
            } else {
                self.transitor = Some(transitor);
            }
        } else if let Some(top) = self.screens.first() {
            top.update(dtime);
        }
    }

    /// Paints the visible screen, or both screens of an in-flight
    /// transition. Call once per frame.
    pub fn draw(&self, alpha: f32) {
        if let Some(transitor) = &self.transitor {
            transitor.outgoing.draw(alpha);
            transitor.incoming.draw(alpha);
        } else if let Some(top) = self.screens.first() {
            top.draw(alpha);
        }
    }

    pub fn top(&self) -> Option<&ScreenHandle> {
        self.screens.first()
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    pub fn contains(&self, screen: &ScreenHandle) -> bool {
        self.screens.iter().any(|other| other.is_same(screen))
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitor.is_some()
    }

    /// Installs a transitor, force-completing any active one first so at
    /// most one is ever live and every started transition reaches its
    /// `complete`.
    fn transition(&mut self, mut transitor: Transitor) {
        if let Some(preempted) = self.transitor.take() {
            self.finish(preempted);
        }
        transitor
            .trans
            .init(&transitor.outgoing, &transitor.incoming);
        transitor.outgoing.hide_transition_started();
        match transitor.show_policy {
            ShowPolicy::AddAndShow => self.add_and_show(transitor.incoming.clone()),
            ShowPolicy::JustShow => {
                let incoming = transitor.incoming.clone();
                self.just_show(&incoming);
            }
        }
        // `init` is contractually followed by a zero-elapsed `update`;
        // instant transitions report completion right here.
        let done = transitor.trans.update(
            &transitor.outgoing,
            &transitor.incoming,
            Duration::new(0, 0),
        );
        if done {
            self.finish(transitor);
        } else {
            self.transitor = Some(transitor);
        }
    }

    /// The completion path, shared by natural completion and preemption.
    /// The slot is already clear when this runs, so completion callbacks
    /// observe a stack that is ready for the next operation.
    fn finish(&mut self, mut transitor: Transitor) {
        transitor
            .trans
            .complete(&transitor.outgoing, &transitor.incoming);
        transitor.incoming.layer().set_pos(self.origin);
        transitor.incoming.show_transition_completed();
        match transitor.complete_action {
            CompleteAction::Hide => self.hide(&transitor.outgoing),
            CompleteAction::HideAndRemove => {
                self.hide(&transitor.outgoing);
                self.notify_removed(&transitor.outgoing);
            }
        }
    }

    fn add(&mut self, screen: ScreenHandle) {
        assert!(
            !self.contains(&screen),
            "can't add a screen to the stack twice"
        );
        self.screens.insert(0, screen.clone());
        let result = screen.was_added();
        self.contain(Hook::WasAdded, result);
    }

    fn add_and_show(&mut self, screen: ScreenHandle) {
        self.add(screen.clone());
        self.just_show(&screen);
    }

    fn just_show(&mut self, screen: &ScreenHandle) {
        self.stage.add(&screen.layer());
        let result = screen.was_shown();
        self.contain(Hook::WasShown, result);
    }

    fn hide(&mut self, screen: &ScreenHandle) {
        self.stage.remove(&screen.layer());
        let result = screen.was_hidden();
        self.contain(Hook::WasHidden, result);
    }

    fn just_remove(&mut self, screen: &ScreenHandle) -> bool {
        let len_before = self.screens.len();
        self.screens.retain(|other| !other.is_same(screen));
        let removed = self.screens.len() != len_before;
        if removed {
            self.notify_removed(screen);
        }
        removed
    }

    fn notify_removed(&mut self, screen: &ScreenHandle) {
        let result = screen.was_removed();
        self.contain(Hook::WasRemoved, result);
    }

    /// The containment boundary around the four lifecycle callbacks.
    fn contain(&mut self, hook: Hook, result: ScreenResult) {
        if let Err(source) = result {
            self.handler.handle_error(Fault { hook, source });
        }
    }
}
