use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A 2D scroll amount in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Offset along the vertical axis only.
    pub const fn vertical(y: f32) -> Self {
        Self { x: 0.0, y }
    }

    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    pub fn with_x(self, x: f32) -> Self {
        Self { x, ..self }
    }

    pub fn with_y(self, y: f32) -> Self {
        Self { y, ..self }
    }
}

/// A 2D velocity in pixels per second.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn vertical(y: f32) -> Self {
        Self { x: 0.0, y }
    }

    pub const ZERO: Velocity = Velocity { x: 0.0, y: 0.0 };
}

macro_rules! vector_ops {
    ($ty:ident) => {
        impl Add for $ty {
            type Output = $ty;

            fn add(self, rhs: $ty) -> $ty {
                $ty::new(self.x + rhs.x, self.y + rhs.y)
            }
        }

        impl Sub for $ty {
            type Output = $ty;

            fn sub(self, rhs: $ty) -> $ty {
                $ty::new(self.x - rhs.x, self.y - rhs.y)
            }
        }

        impl Neg for $ty {
            type Output = $ty;

            fn neg(self) -> $ty {
                $ty::new(-self.x, -self.y)
            }
        }

        impl AddAssign for $ty {
            fn add_assign(&mut self, rhs: $ty) {
                self.x += rhs.x;
                self.y += rhs.y;
            }
        }

        impl SubAssign for $ty {
            fn sub_assign(&mut self, rhs: $ty) {
                self.x -= rhs.x;
                self.y -= rhs.y;
            }
        }
    };
}

vector_ops!(Offset);
vector_ops!(Velocity);
