//! Measurement for a column whose tagged children collapse.
//!
//! Children are stacked top to bottom. The column measures everything at
//! its expanded size, writes the resulting collapse distance into the
//! [`CollapsableState`], then shrinks by the state's offset. Collapsing
//! children slide up with the offset; pinned children stop at the top and
//! draw above the collapsing ones.

use collapsable_ui_layout::{Constraints, Measurable, Placeable};
use smallvec::SmallVec;

use crate::state::CollapsableState;

/// Room left around clipped content so elevation shadows still draw.
pub const MAX_ELEVATION_MARGIN: f32 = 30.0;

/// How one child of the column collapses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollapseChild {
    /// Height when fully collapsed. `None` uses the child's minimum height.
    pub collapsed_height: Option<f32>,
    /// Height when fully expanded. `None` uses the measured height.
    pub expanded_height: Option<f32>,
    /// Clip the child where it slides under pinned content above it.
    pub clip: bool,
}

impl Default for CollapseChild {
    fn default() -> Self {
        Self {
            collapsed_height: Some(0.0),
            expanded_height: None,
            clip: true,
        }
    }
}

impl CollapseChild {
    pub fn with_collapsed_height(mut self, height: Option<f32>) -> Self {
        self.collapsed_height = height;
        self
    }

    pub fn with_expanded_height(mut self, height: Option<f32>) -> Self {
        self.expanded_height = height;
        self
    }

    pub fn with_clip(mut self, clip: bool) -> Self {
        self.clip = clip;
        self
    }
}

/// A child handed to [`measure_collapsable_column`].
#[derive(Clone, Copy)]
pub struct ColumnChild<'a> {
    pub measurable: &'a dyn Measurable,
    /// `None` pins the child.
    pub collapse: Option<CollapseChild>,
}

impl<'a> ColumnChild<'a> {
    pub fn pinned(measurable: &'a dyn Measurable) -> Self {
        Self {
            measurable,
            collapse: None,
        }
    }

    pub fn collapsing(measurable: &'a dyn Measurable, collapse: CollapseChild) -> Self {
        Self {
            measurable,
            collapse: Some(collapse),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl ClipRect {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Where a child goes, relative to the column's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChildPlacement {
    /// Position in the input slice.
    pub index: usize,
    pub x: f32,
    pub y: f32,
    pub z_index: f32,
    pub width: f32,
    pub height: f32,
    /// In the child's own coordinates.
    pub clip: Option<ClipRect>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColumnLayout {
    pub width: f32,
    pub height: f32,
    pub placements: SmallVec<[ChildPlacement; 4]>,
    /// Vertical clip for the whole column, widened for shadows.
    pub clip: ClipRect,
}

/// Measures and places `children`, updating `state`'s offset limit.
pub fn measure_collapsable_column(
    state: &CollapsableState,
    constraints: Constraints,
    children: &[ColumnChild<'_>],
) -> ColumnLayout {
    let mut current = constraints.with_min_height(0.0);
    let mut width = constraints.min_width;
    let mut collapsed_height = constraints.min_height;
    let mut expanded_height = 0.0;
    let mut measured: SmallVec<[(f32, f32); 4]> = SmallVec::with_capacity(children.len());

    for child in children {
        let expanded = child.collapse.and_then(|collapse| collapse.expanded_height);
        let child_constraints = match expanded {
            Some(height) => current.with_min_height(height.max(0.0).min(current.max_height)),
            None => current,
        };
        let placeable = child.measurable.measure(child_constraints);
        let (child_width, child_height) = (placeable.width(), placeable.height());
        current = current.consume_height(child_height);
        width = width.max(child_width);
        expanded_height += child_height;
        collapsed_height += match child.collapse {
            Some(CollapseChild {
                collapsed_height: Some(height),
                ..
            }) => height,
            // Measured against the expanded height; ask for the smallest.
            Some(_) if expanded.is_some() => child.measurable.min_intrinsic_height(width),
            _ => child_height,
        };
        measured.push((child_width, child_height));
    }

    state.set_offset_limit(collapsed_height - expanded_height);
    let offset = state.offset();
    let height = expanded_height + offset.round();

    let mut placements = SmallVec::with_capacity(children.len());
    let mut y = 0.0;
    let mut pinned_bottom: Option<f32> = None;
    let sized = children.iter().zip(&measured).enumerate();
    for (index, (child, &(child_width, child_height))) in sized {
        let mut top = y + offset;
        let mut z_index = 0.0;
        let mut clip = None;
        match child.collapse {
            None => {
                top = top.max(0.0);
                z_index = 1.0;
            }
            Some(collapse) if collapse.clip => {
                if let Some(pinned_bottom) = pinned_bottom {
                    let overlap = (pinned_bottom - top.round()).max(0.0).min(child_height);
                    clip = Some(ClipRect {
                        left: -MAX_ELEVATION_MARGIN,
                        top: overlap,
                        right: child_width + MAX_ELEVATION_MARGIN,
                        bottom: child_height + MAX_ELEVATION_MARGIN,
                    });
                }
            }
            Some(_) => {}
        }
        let top = top.round();
        if child.collapse.is_none() {
            pinned_bottom = Some(pinned_bottom.unwrap_or(0.0).max(top + child_height));
        }
        placements.push(ChildPlacement {
            index,
            x: 0.0,
            y: top,
            z_index,
            width: child_width,
            height: child_height,
            clip,
        });
        y += child_height;
    }

    log::trace!(
        "collapsable column {}x{} (expanded {}, limit {})",
        width,
        height,
        expanded_height,
        state.offset_limit()
    );

    ColumnLayout {
        width,
        height,
        placements,
        clip: ClipRect {
            left: -MAX_ELEVATION_MARGIN,
            top: 0.0,
            right: width + MAX_ELEVATION_MARGIN,
            bottom: height,
        },
    }
}

#[cfg(test)]
#[path = "tests/column_tests.rs"]
mod tests;
