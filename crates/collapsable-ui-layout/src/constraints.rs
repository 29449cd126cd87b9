/// Size bounds handed down to a child.
///
/// A vertically scrolling parent gives an unbounded `max_height`; every
/// operation here keeps an infinite maximum infinite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constraints {
    pub min_width: f32,
    pub max_width: f32,
    pub min_height: f32,
    pub max_height: f32,
}

impl Constraints {
    /// Anything from zero up to the given size.
    pub fn loose(max_width: f32, max_height: f32) -> Self {
        Self {
            min_width: 0.0,
            max_width,
            min_height: 0.0,
            max_height,
        }
    }

    /// Exactly `width` wide and as tall as the child likes.
    pub fn fixed_width(width: f32) -> Self {
        Self {
            min_width: width,
            max_width: width,
            min_height: 0.0,
            max_height: f32::INFINITY,
        }
    }

    /// Coerces a preferred size into these bounds.
    pub fn constrain(&self, width: f32, height: f32) -> (f32, f32) {
        (
            width.max(self.min_width).min(self.max_width),
            height.max(self.min_height).min(self.max_height),
        )
    }

    pub fn has_bounded_height(&self) -> bool {
        self.max_height.is_finite()
    }

    pub fn with_min_height(self, min_height: f32) -> Self {
        Self { min_height, ..self }
    }

    /// Takes `used` off the height still available to later children.
    ///
    /// Neither bound drops below zero and the minimum follows the maximum
    /// down.
    pub fn consume_height(self, used: f32) -> Self {
        if !self.has_bounded_height() {
            return self;
        }
        let max_height = (self.max_height - used).max(0.0);
        Self {
            min_height: self.min_height.min(max_height),
            max_height,
            ..self
        }
    }
}

#[cfg(test)]
#[path = "tests/constraints_tests.rs"]
mod tests;
