//! Display primitives: a positionable layer, an effect handle and the
//! display root that screens are attached to while visible.
//!
//! These are bookkeeping objects. The crate never draws anything itself,
//! it only mutates attributes (position, depth, color, shader) that the
//! game's renderer reads back when painting a screen.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use mq::prelude::{Color, Vec2};

#[derive(Debug)]
struct ShaderData {
    name: String,
    uniforms: HashMap<String, f32>,
}

/// A named screen-space effect with `f32` uniforms.
#[derive(Debug, Clone)]
pub struct Shader {
    data: Rc<RefCell<ShaderData>>,
}

impl Shader {
    pub fn new(name: impl Into<String>) -> Self {
        let data = ShaderData {
            name: name.into(),
            uniforms: HashMap::new(),
        };
        Self {
            data: Rc::new(RefCell::new(data)),
        }
    }

    pub fn name(&self) -> String {
        self.data.borrow().name.clone()
    }

    pub fn set_uniform(&mut self, name: impl Into<String>, value: f32) {
        self.data.borrow_mut().uniforms.insert(name.into(), value);
    }

    pub fn uniform(&self, name: &str) -> Option<f32> {
        self.data.borrow().uniforms.get(name).copied()
    }

    pub fn is_same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }
}

#[derive(Debug)]
struct LayerData {
    pos: Vec2,
    depth: f32,
    size: Vec2,
    color: Color,
    shader: Option<Shader>,
    children: Vec<(Layer, Vec2)>,
}

/// A drawable that a screen (or a transition overlay) owns.
///
/// `Layer` is a cheap handle: clones share the same data, so a transition
/// can move a screen's layer around without taking the screen itself.
#[derive(Debug, Clone)]
pub struct Layer {
    data: Rc<RefCell<LayerData>>,
}

impl Layer {
    pub fn new() -> Self {
        let data = LayerData {
            pos: Vec2::new(0.0, 0.0),
            depth: 0.0,
            size: Vec2::new(0.0, 0.0),
            color: Color::new(1.0, 1.0, 1.0, 1.0),
            shader: None,
            children: Vec::new(),
        };
        Self {
            data: Rc::new(RefCell::new(data)),
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.data.borrow().pos
    }

    pub fn set_pos(&mut self, pos: Vec2) {
        self.data.borrow_mut().pos = pos;
    }

    pub fn depth(&self) -> f32 {
        self.data.borrow().depth
    }

    pub fn set_depth(&mut self, depth: f32) {
        self.data.borrow_mut().depth = depth;
    }

    pub fn size(&self) -> Vec2 {
        self.data.borrow().size
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.data.borrow_mut().size = size;
    }

    pub fn color(&self) -> Color {
        self.data.borrow().color
    }

    pub fn set_color(&mut self, color: Color) {
        self.data.borrow_mut().color = color;
    }

    pub fn shader(&self) -> Option<Shader> {
        self.data.borrow().shader.clone()
    }

    pub fn set_shader(&mut self, shader: Option<Shader>) {
        self.data.borrow_mut().shader = shader;
    }

    /// Attaches an overlay at an offset relative to this layer.
    pub fn add_child(&mut self, child: &Layer, offset: Vec2) {
        assert!(!self.has_child(child), "can't attach the same child twice");
        let mut data = self.data.borrow_mut();
        data.children.push((child.clone(), offset));
    }

    pub fn remove_child(&mut self, child: &Layer) {
        let mut data = self.data.borrow_mut();
        data.children.retain(|(other, _)| !other.is_same(child));
    }

    pub fn has_child(&self, child: &Layer) -> bool {
        let data = self.data.borrow();
        data.children.iter().any(|(other, _)| other.is_same(child))
    }

    pub fn is_same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }
}

impl Default for Layer {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
struct StageData {
    layers: Vec<Layer>,
}

/// The display root. A screen is visible while its layer is on the stage.
#[derive(Debug, Clone)]
pub struct Stage {
    data: Rc<RefCell<StageData>>,
}

impl Stage {
    pub fn new() -> Self {
        let data = StageData { layers: Vec::new() };
        Self {
            data: Rc::new(RefCell::new(data)),
        }
    }

    pub fn add(&mut self, layer: &Layer) {
        assert!(!self.has_layer(layer), "can't add the same layer twice");
        self.data.borrow_mut().layers.push(layer.clone());
    }

    pub fn remove(&mut self, layer: &Layer) {
        let mut data = self.data.borrow_mut();
        data.layers.retain(|other| !other.is_same(layer));
    }

    pub fn has_layer(&self, layer: &Layer) -> bool {
        let data = self.data.borrow();
        data.layers.iter().any(|other| other.is_same(layer))
    }

    pub fn len(&self) -> usize {
        self.data.borrow().layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use mq::prelude::Vec2;

    use super::{Layer, Shader, Stage};

    #[test]
    fn stage_membership() {
        let mut stage = Stage::new();
        let a = Layer::new();
        let b = Layer::new();
        stage.add(&a);
        assert!(stage.has_layer(&a));
        assert!(!stage.has_layer(&b));
        stage.remove(&a);
        assert!(stage.is_empty());
    }

    #[test]
    #[should_panic(expected = "can't add the same layer twice")]
    fn stage_rejects_duplicates() {
        let mut stage = Stage::new();
        let a = Layer::new();
        stage.add(&a);
        stage.add(&a);
    }

    #[test]
    fn layer_handles_share_data() {
        let mut a = Layer::new();
        let alias = a.clone();
        a.set_pos(Vec2::new(1.0, 2.0));
        assert_eq!(alias.pos(), Vec2::new(1.0, 2.0));
        assert!(a.is_same(&alias));
        assert!(!a.is_same(&Layer::new()));
    }

    #[test]
    fn layer_children() {
        let mut parent = Layer::new();
        let shadow = Layer::new();
        parent.add_child(&shadow, Vec2::new(0.5, 0.0));
        assert!(parent.has_child(&shadow));
        parent.remove_child(&shadow);
        assert!(!parent.has_child(&shadow));
    }

    #[test]
    fn shader_uniforms() {
        let mut shader = Shader::new("rotate_y");
        assert_eq!(shader.uniform("angle"), None);
        shader.set_uniform("angle", 0.25);
        assert_eq!(shader.uniform("angle"), Some(0.25));
        assert_eq!(shader.name(), "rotate_y");
    }
}
