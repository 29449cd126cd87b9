//! Sizing contracts between a collapsing container and its children.

mod constraints;
mod measure;

pub use constraints::Constraints;
pub use measure::{Measurable, Placeable, Size};
