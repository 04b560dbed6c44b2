//! Relayout pipelines.

use alloc::vec::Vec;
use core::ops::BitOr;

use super::Layout;
use super::combinator::{Relayouter, Step};
use crate::error::Result;
use crate::primitives::{Node, Shape, Tree};
use crate::relayout::{Plan, View};

/// A left-to-right chain of layout combinators.
///
/// The chain is resolved against a source shape by [`Relayout::resolve`],
/// starting from the source's identity layout. An empty chain is the
/// identity.
///
/// ```
/// use tola_layout::prelude::*;
///
/// let pipeline = repeat(2) | transpose(0, 1);
/// let plan = pipeline.resolve(&Shape::tensor(&[3])).unwrap();
/// assert_eq!(plan.target_shape(), &Shape::tensor(&[3, 2]));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Relayout {
    steps: Vec<Step>,
}

/// Starts a pipeline with one step.
pub fn relayout(step: impl Into<Step>) -> Relayout {
    Relayout::new().then(step)
}

impl Relayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step.
    pub fn then(mut self, step: impl Into<Step>) -> Self {
        self.steps.push(step.into());
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The composed, unfolded layout over `source`.
    pub fn layout_for(&self, source: &Shape) -> Result<Layout> {
        self.relayout(&Layout::identity(source))
    }

    /// Resolves the pipeline against `source`, validating every step.
    pub fn resolve(&self, source: &Shape) -> Result<Plan> {
        Plan::new(source.clone(), self.layout_for(source)?)
    }

    /// Resolves against the static shape of `S`.
    pub fn resolve_for<S: Tree>(&self) -> Result<Plan> {
        self.resolve(&S::shape())
    }

    /// Resolves against `source`'s shape and applies the plan in one go.
    pub fn apply<'a, T>(&self, source: impl Into<View<'a, T>>) -> Result<View<'a, T>> {
        let source = source.into();
        self.resolve(&source.shape())?.apply(source)
    }

    /// Convenience for a one-off relayout of an owning tree.
    pub fn apply_node<'a, T>(&self, source: &'a Node<T>) -> Result<View<'a, T>> {
        self.apply(source)
    }
}

impl Relayouter for Relayout {
    fn relayout(&self, layout: &Layout) -> Result<Layout> {
        let mut current = layout.clone();
        for step in &self.steps {
            current = step.relayout(&current)?;
        }
        Ok(current)
    }
}

impl<S: Into<Step>> BitOr<S> for Relayout {
    type Output = Relayout;

    fn bitor(self, rhs: S) -> Relayout {
        self.then(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayoutError;
    use crate::layout::{component, inverse, repeat, transpose};
    use alloc::string::ToString;

    #[test]
    fn test_empty_pipeline_is_identity() {
        let shape = Shape::tensor(&[2, 2]);
        assert_eq!(Relayout::new().layout_for(&shape), Ok(Layout::identity(&shape)));
    }

    #[test]
    fn test_pipeline_composes_left_to_right() {
        let shape = Shape::tensor(&[2, 2]);
        let layout = (inverse() | component(0, 1)).layout_for(&shape).unwrap();
        assert_eq!(layout.to_string(), "[.1.0, .0.0]");
    }

    #[test]
    fn test_double_transpose_is_identity() {
        let shape = Shape::tensor(&[2, 3]);
        let layout = (transpose(0, 1) | transpose(0, 1)).layout_for(&shape).unwrap();
        assert_eq!(layout, Layout::identity(&shape));
    }

    #[test]
    fn test_error_surfaces_at_resolve() {
        let shape = Shape::Terminal;
        assert_eq!(
            (repeat(2) | component(5, 0)).resolve(&shape).err(),
            Some(LayoutError::OutOfRange { index: 5, arity: 2 })
        );
    }
}
