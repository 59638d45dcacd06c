use std::time::Duration;

use mq::prelude::Vec2;

use crate::{
    easing::Easing,
    screen::ScreenHandle,
    transition::{Dir, Transition},
};

/// Slides the outgoing screen off, with the incoming one right behind it.
#[derive(Debug)]
pub struct Slide {
    origin: Vec2,
    dir: Dir,
    easing: Easing,
    duration: Duration,

    // per-run state, computed in `init`
    outgoing_start: Vec2,
    outgoing_dest: Vec2,
    incoming_start: Vec2,
}

impl Slide {
    pub fn new(origin: Vec2) -> Self {
        Self {
            origin,
            dir: Dir::Left,
            easing: Easing::EaseInOut,
            duration: Duration::from_millis(500),
            outgoing_start: Vec2::new(0.0, 0.0),
            outgoing_dest: Vec2::new(0.0, 0.0),
            incoming_start: Vec2::new(0.0, 0.0),
        }
    }

    pub fn dir(mut self, dir: Dir) -> Self {
        self.dir = dir;
        self
    }

    pub fn up(self) -> Self {
        self.dir(Dir::Up)
    }

    pub fn down(self) -> Self {
        self.dir(Dir::Down)
    }

    pub fn left(self) -> Self {
        self.dir(Dir::Left)
    }

    pub fn right(self) -> Self {
        self.dir(Dir::Right)
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

impl Transition for Slide {
    fn init(&mut self, outgoing: &ScreenHandle, incoming: &ScreenHandle) {
        let origin = self.origin;
        let out_size = outgoing.size();
        let in_size = incoming.size();
        let (outgoing_dest, incoming_start) = match self.dir {
            Dir::Up => (
                Vec2::new(origin.x, origin.y - out_size.y),
                Vec2::new(origin.x, origin.y + in_size.y),
            ),
            Dir::Down => (
                Vec2::new(origin.x, origin.y + out_size.y),
                Vec2::new(origin.x, origin.y - in_size.y),
            ),
            Dir::Left => (
                Vec2::new(origin.x - out_size.x, origin.y),
                Vec2::new(origin.x + in_size.x, origin.y),
            ),
            Dir::Right => (
                Vec2::new(origin.x + out_size.x, origin.y),
                Vec2::new(origin.x - in_size.x, origin.y),
            ),
        };
        self.outgoing_dest = outgoing_dest;
        self.incoming_start = incoming_start;
        self.outgoing_start = outgoing.layer().pos();
        incoming.layer().set_pos(incoming_start);
    }

    fn update(&mut self, outgoing: &ScreenHandle, incoming: &ScreenHandle, elapsed: Duration) -> bool {
        let o = self.origin;
        let ox = self
            .easing
            .apply(o.x, self.outgoing_dest.x - o.x, elapsed, self.duration);
        let oy = self
            .easing
            .apply(o.y, self.outgoing_dest.y - o.y, elapsed, self.duration);
        outgoing.layer().set_pos(Vec2::new(ox, oy));
        let s = self.incoming_start;
        let nx = self.easing.apply(s.x, o.x - s.x, elapsed, self.duration);
        let ny = self.easing.apply(s.y, o.y - s.y, elapsed, self.duration);
        incoming.layer().set_pos(Vec2::new(nx, ny));
        elapsed >= self.duration
    }

    fn complete(&mut self, outgoing: &ScreenHandle, _incoming: &ScreenHandle) {
        outgoing.layer().set_pos(self.outgoing_start);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use mq::prelude::Vec2;

    use crate::{
        easing::Easing,
        screen::{Screen, ScreenHandle},
        stage::Layer,
        transition::Transition,
    };

    use super::Slide;

    #[derive(Debug)]
    struct Plain {
        layer: Layer,
    }

    impl Plain {
        fn handle() -> ScreenHandle {
            ScreenHandle::new(Self {
                layer: Layer::new(),
            })
        }
    }

    impl Screen for Plain {
        fn layer(&self) -> Layer {
            self.layer.clone()
        }

        fn size(&self) -> Vec2 {
            Vec2::new(2.0, 1.0)
        }

        fn update(&mut self, _dtime: Duration) {}

        fn draw(&self, _alpha: f32) {}
    }

    #[test]
    fn left_slide_moves_both_screens() {
        let origin = Vec2::new(0.0, 0.0);
        let duration = Duration::from_millis(100);
        let mut slide = Slide::new(origin)
            .left()
            .easing(Easing::Linear)
            .duration(duration);
        let outgoing = Plain::handle();
        let incoming = Plain::handle();
        slide.init(&outgoing, &incoming);
        // the incoming screen starts one screen-width to the right
        assert_eq!(incoming.layer().pos(), Vec2::new(2.0, 0.0));

        let done = slide.update(&outgoing, &incoming, Duration::from_millis(50));
        assert!(!done);
        assert_eq!(outgoing.layer().pos(), Vec2::new(-1.0, 0.0));
        assert_eq!(incoming.layer().pos(), Vec2::new(1.0, 0.0));

        let done = slide.update(&outgoing, &incoming, duration);
        assert!(done);
        assert_eq!(incoming.layer().pos(), origin);
    }

    #[test]
    fn complete_restores_the_outgoing_position() {
        let mut slide = Slide::new(Vec2::new(0.0, 0.0)).up();
        let outgoing = Plain::handle();
        let incoming = Plain::handle();
        outgoing.layer().set_pos(Vec2::new(0.25, 0.5));
        slide.init(&outgoing, &incoming);
        slide.update(&outgoing, &incoming, Duration::from_millis(10));
        slide.complete(&outgoing, &incoming);
        assert_eq!(outgoing.layer().pos(), Vec2::new(0.25, 0.5));
    }
}
