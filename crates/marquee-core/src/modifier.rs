use std::rc::Rc;

use crate::{Color, Size, Vec2};

#[derive(Clone, Default)]
pub struct Modifier {
    pub size: Option<Size>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub fill_max: bool,
    pub padding: Option<f32>,
    pub background: Option<Color>,
    pub corner_radius: Option<f32>,
    /// Offset from the parent's origin, used by the container to place slot
    /// content at its computed frame.
    pub offset: Option<Vec2>,
    pub on_click: Option<Rc<dyn Fn()>>,
}

impl Modifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, w: f32, h: f32) -> Self {
        self.size = Some(Size {
            width: w,
            height: h,
        });
        self
    }

    pub fn width(mut self, w: f32) -> Self {
        self.width = Some(w);
        self
    }

    pub fn height(mut self, h: f32) -> Self {
        self.height = Some(h);
        self
    }

    pub fn fill_max_size(mut self) -> Self {
        self.fill_max = true;
        self
    }

    pub fn padding(mut self, p: f32) -> Self {
        self.padding = Some(p);
        self
    }

    pub fn background(mut self, c: Color) -> Self {
        self.background = Some(c);
        self
    }

    pub fn corner_radius(mut self, r: f32) -> Self {
        self.corner_radius = Some(r);
        self
    }

    pub fn offset(mut self, x: f32, y: f32) -> Self {
        self.offset = Some(Vec2 { x, y });
        self
    }

    pub fn on_click(mut self, f: impl Fn() + 'static) -> Self {
        self.on_click = Some(Rc::new(f));
        self
    }
}

impl std::fmt::Debug for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Modifier")
            .field("size", &self.size)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("fill_max", &self.fill_max)
            .field("padding", &self.padding)
            .field("background", &self.background)
            .field("corner_radius", &self.corner_radius)
            .field("offset", &self.offset)
            .field("on_click", &self.on_click.as_ref().map(|_| "..."))
            .finish()
    }
}
