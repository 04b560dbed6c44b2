//! Layout combinators.
//!
//! Every combinator is a structural function from one unfolded layout to
//! another. Because a layout's leaves are source paths, applying a combinator
//! to the output of a previous one composes the two: pipelines never need
//! to revisit the source.

use alloc::vec::Vec;

use super::Layout;
use super::pipeline::Relayout;
use crate::error::{LayoutError, Result};

/// A step that rewrites a layout.
pub trait Relayouter {
    fn relayout(&self, layout: &Layout) -> Result<Layout>;
}

// =============================================================================
// repeat
// =============================================================================

/// Broadcasts the current layout into `n` identical siblings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Repeat(pub usize);

pub fn repeat(n: usize) -> Repeat {
    Repeat(n)
}

impl Relayouter for Repeat {
    fn relayout(&self, layout: &Layout) -> Result<Layout> {
        Ok(Layout::branch((0..self.0).map(|_| layout.clone())))
    }
}

// =============================================================================
// component
// =============================================================================

/// Fixes index `index` at branch depth `axis`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Component {
    pub index: usize,
    pub axis: usize,
}

pub fn component(index: usize, axis: usize) -> Component {
    Component { index, axis }
}

impl Relayouter for Component {
    fn relayout(&self, layout: &Layout) -> Result<Layout> {
        project(layout, self.index, self.axis, self.axis)
    }
}

fn project(layout: &Layout, index: usize, axis: usize, requested: usize) -> Result<Layout> {
    let Layout::Branch(children) = layout else {
        return Err(LayoutError::AxisOutOfRange {
            axis: requested,
            depth: requested - axis,
        });
    };
    if axis == 0 {
        return children.get(index).cloned().ok_or(LayoutError::OutOfRange {
            index,
            arity: children.len(),
        });
    }
    children
        .iter()
        .map(|c| project(c, index, axis - 1, requested))
        .collect::<Result<Vec<_>>>()
        .map(Layout::branch)
}

// =============================================================================
// transpose
// =============================================================================

/// Swaps the enumeration order of two axes.
///
/// With `axis1 < axis2`, the branch at depth `axis1` is rebuilt as
/// `component(i, axis2 - axis1)` for every `i` along `axis2`. For adjacent
/// axes this is a swap; for distant ones `axis2` moves in front of `axis1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Transpose {
    pub axis1: usize,
    pub axis2: usize,
}

pub fn transpose(axis1: usize, axis2: usize) -> Transpose {
    Transpose { axis1, axis2 }
}

impl Default for Transpose {
    fn default() -> Self {
        transpose(0, 1)
    }
}

impl Relayouter for Transpose {
    fn relayout(&self, layout: &Layout) -> Result<Layout> {
        let (lo, hi) = if self.axis1 <= self.axis2 {
            (self.axis1, self.axis2)
        } else {
            (self.axis2, self.axis1)
        };
        if lo == hi {
            return Ok(layout.clone());
        }
        swap_axes(layout, lo, hi, hi)
    }
}

fn swap_axes(layout: &Layout, lo: usize, hi: usize, requested: usize) -> Result<Layout> {
    if lo == 0 {
        let extent = layout.structure().extent(hi).map_err(|e| match e {
            LayoutError::AxisOutOfRange { depth, .. } => LayoutError::AxisOutOfRange {
                axis: requested,
                depth: depth + requested - hi,
            },
            other => other,
        })?;
        return (0..extent)
            .map(|i| project(layout, i, hi, hi))
            .collect::<Result<Vec<_>>>()
            .map(Layout::branch);
    }
    let Layout::Branch(children) = layout else {
        return Err(LayoutError::AxisOutOfRange {
            axis: requested,
            depth: requested - hi,
        });
    };
    children
        .iter()
        .map(|c| swap_axes(c, lo - 1, hi - 1, requested))
        .collect::<Result<Vec<_>>>()
        .map(Layout::branch)
}

// =============================================================================
// inverse
// =============================================================================

/// Reverses the children of the outermost branch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Inverse;

pub fn inverse() -> Inverse {
    Inverse
}

impl Relayouter for Inverse {
    fn relayout(&self, layout: &Layout) -> Result<Layout> {
        match layout {
            Layout::Branch(children) => Ok(Layout::branch(children.iter().rev().cloned())),
            Layout::Path(_) => Err(LayoutError::AxisOutOfRange { axis: 0, depth: 0 }),
        }
    }
}

// =============================================================================
// Explicit layouts
// =============================================================================

/// An explicit path tree addresses the layout produced so far: each path
/// is replaced by the sub-layout found there.
impl Relayouter for Layout {
    fn relayout(&self, layout: &Layout) -> Result<Layout> {
        match self {
            Layout::Path(path) => layout.sublayout(path).cloned(),
            Layout::Branch(children) => children
                .iter()
                .map(|c| c.relayout(layout))
                .collect::<Result<Vec<_>>>()
                .map(Layout::branch),
        }
    }
}

// =============================================================================
// combine / zip of sub-pipelines
// =============================================================================

/// A branch whose children are the results of each pipeline, unmodified.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Combine(pub Vec<Relayout>);

impl Combine {
    pub fn new(parts: impl IntoIterator<Item = Relayout>) -> Self {
        Combine(parts.into_iter().collect())
    }
}

impl Relayouter for Combine {
    fn relayout(&self, layout: &Layout) -> Result<Layout> {
        combine_parts(&self.0, layout)
    }
}

fn combine_parts(parts: &[Relayout], layout: &Layout) -> Result<Layout> {
    parts
        .iter()
        .map(|part| part.relayout(layout))
        .collect::<Result<Vec<_>>>()
        .map(Layout::branch)
}

/// `Combine` followed by `transpose(0, 1)`: element `i` of the result holds
/// element `i` of every part.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Zip(pub Vec<Relayout>);

impl Zip {
    pub fn new(parts: impl IntoIterator<Item = Relayout>) -> Self {
        Zip(parts.into_iter().collect())
    }
}

impl Relayouter for Zip {
    fn relayout(&self, layout: &Layout) -> Result<Layout> {
        let combined = combine_parts(&self.0, layout)?;
        Transpose::default().relayout(&combined)
    }
}

// =============================================================================
// Step
// =============================================================================

/// Any combinator, as stored in a [`Relayout`] pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    Explicit(Layout),
    Repeat(Repeat),
    Component(Component),
    Transpose(Transpose),
    Inverse(Inverse),
    Combine(Combine),
    Zip(Zip),
}

impl Relayouter for Step {
    fn relayout(&self, layout: &Layout) -> Result<Layout> {
        match self {
            Step::Explicit(step) => step.relayout(layout),
            Step::Repeat(step) => step.relayout(layout),
            Step::Component(step) => step.relayout(layout),
            Step::Transpose(step) => step.relayout(layout),
            Step::Inverse(step) => step.relayout(layout),
            Step::Combine(step) => step.relayout(layout),
            Step::Zip(step) => step.relayout(layout),
        }
    }
}

macro_rules! impl_into_step {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Step {
                fn from(step: $ty) -> Self {
                    Step::$variant(step)
                }
            }

            impl From<$ty> for Relayout {
                fn from(step: $ty) -> Self {
                    Relayout::new().then(step)
                }
            }

            impl<S: Into<Step>> core::ops::BitOr<S> for $ty {
                type Output = Relayout;

                fn bitor(self, rhs: S) -> Relayout {
                    Relayout::new().then(self).then(rhs)
                }
            }
        )*
    };
}

impl_into_step!(
    Layout => Explicit,
    Repeat => Repeat,
    Component => Component,
    Transpose => Transpose,
    Inverse => Inverse,
    Combine => Combine,
    Zip => Zip,
);
