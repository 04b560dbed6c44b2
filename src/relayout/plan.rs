//! Resolved relayout plans.

use alloc::vec::Vec;

use super::inverse::InverseLayout;
use super::view::{View, ViewMut};
use crate::error::{LayoutError, Result};
use crate::layout::Layout;
use crate::primitives::{Node, Path, Shape, Tree};

/// A layout specification resolved against one source shape.
///
/// Everything structural is decided here: the unfolded and folded layouts,
/// the target shape and the inverse. Applying the plan afterwards only walks
/// the folded layout, and the same plan serves every source of its shape.
///
/// ```
/// use tola_layout::prelude::*;
///
/// let source = node!([[1, 2], [3, 4]]);
/// let plan = relayout(transpose(0, 1)).resolve(&source.shape()).unwrap();
///
/// let view = plan.apply(&source).unwrap();
/// assert_eq!(view.to_node(), node!([[1, 3], [2, 4]]));
///
/// let back = plan.make(&node!([[1, 3], [2, 4]])).unwrap();
/// assert_eq!(back, source);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan {
    source: Shape,
    target: Shape,
    unfolded: Layout,
    folded: Layout,
    inverse: Result<InverseLayout>,
}

impl Plan {
    /// Resolves an unfolded layout over `source`.
    pub fn new(source: Shape, unfolded: Layout) -> Result<Self> {
        unfolded.validate(&source)?;
        let unfolded = unfolded.unfold(&source)?;
        let folded = unfolded.fold(&source)?;
        let target = unfolded.target_shape(&source)?;
        let inverse = InverseLayout::derive(&unfolded, &source, &target);
        log::debug!(
            "resolved plan {source} -> {target}: folded {folded}, {}",
            match &inverse {
                Ok(inv) if inv.is_total() => "bijective",
                Ok(_) => "injective",
                Err(_) => "not invertible",
            }
        );
        Ok(Plan {
            source,
            target,
            unfolded,
            folded,
            inverse,
        })
    }

    /// Identity plan over `source`.
    pub fn identity(source: Shape) -> Result<Self> {
        let layout = Layout::identity(&source);
        Self::new(source, layout)
    }

    pub fn source_shape(&self) -> &Shape {
        &self.source
    }

    pub fn target_shape(&self) -> &Shape {
        &self.target
    }

    /// The folded layout.
    pub fn layout(&self) -> &Layout {
        &self.folded
    }

    pub fn unfolded_layout(&self) -> &Layout {
        &self.unfolded
    }

    /// True when the whole result is a single reference into the source.
    pub fn is_reference(&self) -> bool {
        matches!(self.folded, Layout::Path(_))
    }

    pub fn is_invertible(&self) -> bool {
        self.inverse.is_ok()
    }

    pub fn inverse(&self) -> Result<&InverseLayout> {
        self.inverse.as_ref().map_err(Clone::clone)
    }

    fn check_source<T>(&self, found: &View<'_, T>) -> Result<()> {
        check_shape(&self.source, found)
    }

    /// Applies the plan to `source`, borrowing every leaf.
    ///
    /// Folded paths come back as [`View::Ref`]; only branches that do not
    /// fold are synthesized.
    pub fn apply<'a, T: 'a>(&self, source: impl Into<View<'a, T>>) -> Result<View<'a, T>> {
        let source = source.into();
        self.check_source(&source)?;
        materialize(&self.folded, &source)
    }

    /// Applies the plan with exclusive access, so writes through the result
    /// land in `source`.
    ///
    /// Needs an injective plan: two target positions reading the same source
    /// position would be two `&mut` to one value.
    pub fn apply_mut<'a, T>(&self, source: &'a mut Node<T>) -> Result<ViewMut<'a, T>> {
        self.check_source(&View::Ref(&*source))?;
        self.inverse()?;
        let paths: Vec<Path> = self.folded.source_paths().into_iter().cloned().collect();
        let mut borrows = source.disjoint_mut(&paths)?.into_iter();
        assemble(&self.folded, &mut borrows)
    }

    /// Rebuilds a tree of the source shape from a tree, or view, of the
    /// target shape.
    ///
    /// Every source position must be reached by exactly one target position.
    pub fn make<'a, T: Clone + 'a>(&self, target: impl Into<View<'a, T>>) -> Result<Node<T>> {
        let target = target.into();
        check_shape(&self.target, &target)?;
        let layout = self.inverse()?.layout()?;
        Ok(materialize(layout, &target)?.to_node())
    }

    /// Like [`Plan::make`], but positions the layout does not reach keep the
    /// values of `base`.
    pub fn make_onto<'a, 'b, T: Clone + 'a + 'b>(
        &self,
        base: impl Into<View<'b, T>>,
        target: impl Into<View<'a, T>>,
    ) -> Result<Node<T>> {
        let (base, target) = (base.into(), target.into());
        self.check_source(&base)?;
        check_shape(&self.target, &target)?;
        let inverse = self.inverse()?;
        let mut out = base.to_node();
        for (source_path, target_path) in inverse.entries() {
            *out.at_mut(source_path)? = target.at(target_path)?.to_node();
        }
        log::trace!("make_onto kept {} base positions", inverse.unreached(&self.source).len());
        Ok(out)
    }

    /// Typed [`Plan::make`].
    pub fn make_as<'a, S>(&self, target: impl Into<View<'a, S::Leaf>>) -> Result<S>
    where
        S: Tree,
        S::Leaf: Clone + 'a,
    {
        S::from_node(self.make(target)?)
    }
}

fn check_shape<T>(expected: &Shape, found: &View<'_, T>) -> Result<()> {
    if found.has_shape(expected) {
        Ok(())
    } else {
        Err(LayoutError::mismatch(expected, found.shape()))
    }
}

fn materialize<'a, T>(layout: &Layout, source: &View<'a, T>) -> Result<View<'a, T>> {
    match layout {
        Layout::Path(path) => source.at(path),
        Layout::Branch(children) => children
            .iter()
            .map(|c| materialize(c, source))
            .collect::<Result<Vec<_>>>()
            .map(View::branch),
    }
}

fn assemble<'a, T>(
    layout: &Layout,
    borrows: &mut impl Iterator<Item = &'a mut Node<T>>,
) -> Result<ViewMut<'a, T>> {
    match layout {
        Layout::Path(_) => borrows.next().map(ViewMut::RefMut).ok_or(LayoutError::NotInvertible {
            reason: "fewer write-through borrows than layout paths",
        }),
        Layout::Branch(children) => children
            .iter()
            .map(|c| assemble(c, borrows))
            .collect::<Result<Vec<_>>>()
            .map(|children| ViewMut::Branch(children.into_boxed_slice())),
    }
}
