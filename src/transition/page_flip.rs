use std::{f32::consts::PI, time::Duration};

use mq::prelude::{Color, Vec2};

use crate::{
    easing::Easing,
    screen::ScreenHandle,
    stage::{Layer, Shader},
    transition::Transition,
};

/// Peels the outgoing screen off like the page of a book, revealing the
/// incoming screen beneath. With [`PageFlip::unflip`] the incoming screen
/// flips back on top instead.
#[derive(Debug)]
pub struct PageFlip {
    duration: Duration,
    unflip: bool,

    // per-run state, created in `init` and released in `complete`
    easing: Easing,
    flipped: Option<ScreenHandle>,
    shadow: Option<Layer>,
    shader: Option<Shader>,
}

impl PageFlip {
    pub fn new() -> Self {
        Self {
            duration: Duration::from_millis(1500),
            unflip: false,
            easing: Easing::EaseIn,
            flipped: None,
            shadow: None,
            shader: None,
        }
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn unflip(mut self) -> Self {
        self.unflip = true;
        self
    }
}

impl Default for PageFlip {
    fn default() -> Self {
        Self::new()
    }
}

impl Transition for PageFlip {
    fn init(&mut self, outgoing: &ScreenHandle, incoming: &ScreenHandle) {
        incoming
            .layer()
            .set_depth(if self.unflip { 1.0 } else { -1.0 });
        let flipped = if self.unflip { incoming } else { outgoing }.clone();
        self.easing = if self.unflip {
            Easing::EaseInOut
        } else {
            Easing::EaseIn
        };
        let mut shader = Shader::new("rotate_y");
        shader.set_uniform("angle", 0.0);
        flipped.layer().set_shader(Some(shader.clone()));
        let size = flipped.size();
        let mut shadow = Layer::new();
        shadow.set_size(Vec2::new(size.x / 4.0, size.y));
        shadow.set_color(Color::new(0.0, 0.0, 0.0, 0.0));
        flipped.layer().add_child(&shadow, Vec2::new(size.x, 0.0));
        self.shader = Some(shader);
        self.shadow = Some(shadow);
        self.flipped = Some(flipped);
    }

    fn update(&mut self, _outgoing: &ScreenHandle, _incoming: &ScreenHandle, elapsed: Duration) -> bool {
        let pct = self
            .easing
            .apply(0.0, 0.5, elapsed, self.duration)
            .min(0.5)
            .max(0.0);
        let pct = if self.unflip { 0.5 - pct } else { pct };
        if let Some(shadow) = &mut self.shadow {
            shadow.set_color(Color::new(0.0, 0.0, 0.0, pct));
        }
        if let Some(shader) = &mut self.shader {
            shader.set_uniform("angle", PI * pct);
        }
        elapsed >= self.duration
    }

    fn complete(&mut self, _outgoing: &ScreenHandle, incoming: &ScreenHandle) {
        if let (Some(flipped), Some(shadow)) = (&self.flipped, &self.shadow) {
            flipped.layer().remove_child(shadow);
            flipped.layer().set_shader(None);
        }
        incoming.layer().set_depth(0.0);
        self.flipped = None;
        self.shadow = None;
        self.shader = None;
    }
}
