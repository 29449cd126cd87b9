use crate::constraints::Constraints;

/// Measured extent of a child, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A child that a collapsing container can size.
///
/// Containers ask for the intrinsic heights before measuring when they need
/// to know how small a child may get; `min_intrinsic_height` is the default
/// collapsed height of a stretched child.
pub trait Measurable {
    fn measure(&self, constraints: Constraints) -> Box<dyn Placeable>;

    fn min_intrinsic_height(&self, width: f32) -> f32;

    fn max_intrinsic_height(&self, width: f32) -> f32;
}

/// What a [`Measurable`] settled on for one set of constraints.
pub trait Placeable {
    fn size(&self) -> Size;

    fn width(&self) -> f32 {
        self.size().width
    }

    fn height(&self) -> f32 {
        self.size().height
    }
}

impl Placeable for Size {
    fn size(&self) -> Size {
        *self
    }
}
