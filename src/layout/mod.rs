//! # Layer 1: Layout Builder
//!
//! A [`Layout`] describes a *target* tree by naming, for each of its
//! positions, a path into a *source* tree. Layouts are pure values: they are
//! built, composed and validated against a source [`Shape`] before any data
//! exists.
//!
//! - **Layout**: the mapping itself, with `identity`, `unfold` and `fold`.
//! - **Combinators**: `repeat`, `component`, `transpose`, `inverse`, explicit
//!   path trees, `Combine` and `Zip` of sub-pipelines.
//! - **Pipeline**: [`Relayout`], a left-to-right chain of combinators.
//!
//! ```text
//! identity(source) --step--> layout --step--> ... --fold--> Plan
//! ```

pub mod combinator;
pub mod pipeline;

pub use combinator::{
    Combine, Component, Inverse, Relayouter, Repeat, Step, Transpose, Zip, component, inverse,
    repeat, transpose,
};
pub use pipeline::{Relayout, relayout};

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::error::{LayoutError, Result};
use crate::primitives::{Path, Shape};

/// Mapping from target positions to source paths.
///
/// A `Path` leaf selects the whole source subtree at that path; a `Branch`
/// synthesizes a new node from its children.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layout {
    Path(Path),
    Branch(Box<[Layout]>),
}

impl Layout {
    pub fn branch(children: impl IntoIterator<Item = Layout>) -> Self {
        Layout::Branch(children.into_iter().collect())
    }

    /// Selects the whole source tree.
    pub fn whole() -> Self {
        Layout::Path(Path::root())
    }

    /// The unfolded layout mapping every terminal of `shape` to itself.
    pub fn identity(shape: &Shape) -> Self {
        Self::identity_at(shape, Path::root())
    }

    fn identity_at(shape: &Shape, at: Path) -> Self {
        match shape {
            Shape::Terminal => Layout::Path(at),
            Shape::Branch(children) => Layout::branch(
                children
                    .iter()
                    .enumerate()
                    .map(|(i, child)| Self::identity_at(child, at.child(i))),
            ),
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Layout::Path(path) => Some(path),
            Layout::Branch(_) => None,
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Layout::Path(_) => 0,
            Layout::Branch(children) => children.len(),
        }
    }

    /// The layout's own branching structure, treating every path as a
    /// terminal. For an unfolded layout this is the target shape.
    pub fn structure(&self) -> Shape {
        match self {
            Layout::Path(_) => Shape::Terminal,
            Layout::Branch(children) => Shape::branch(children.iter().map(Layout::structure)),
        }
    }

    /// Sub-layout at `path`, walking this layout's own structure.
    pub fn sublayout(&self, path: &Path) -> Result<&Layout> {
        path.indices().iter().try_fold(self, |layout, &index| match layout {
            Layout::Path(_) => Err(LayoutError::mismatch("branch", "terminal")),
            Layout::Branch(children) => children.get(index).ok_or(LayoutError::OutOfRange {
                index,
                arity: children.len(),
            }),
        })
    }

    /// Checks every path against `source`.
    pub fn validate(&self, source: &Shape) -> Result<()> {
        match self {
            Layout::Path(path) => source.at(path).map(|_| ()),
            Layout::Branch(children) => children.iter().try_for_each(|c| c.validate(source)),
        }
    }

    /// Expands every path that selects a source branch into one path per
    /// source terminal below it.
    pub fn unfold(&self, source: &Shape) -> Result<Layout> {
        match self {
            Layout::Path(path) => Ok(Self::identity_at(source.at(path)?, path.clone())),
            Layout::Branch(children) => children
                .iter()
                .map(|c| c.unfold(source))
                .collect::<Result<Vec<_>>>()
                .map(Layout::branch),
        }
    }

    /// Collapses every branch that enumerates a contiguous source
    /// sub-structure into the single path of that sub-structure.
    ///
    /// A branch folds to `prefix` when its children are exactly
    /// `prefix.0, prefix.1, ..., prefix.(n-1)` in order and the source
    /// branch at `prefix` has arity `n`. An empty branch folds to its own
    /// position when the source has an empty branch there.
    pub fn fold(&self, source: &Shape) -> Result<Layout> {
        self.fold_at(source, Some(Path::root()))
    }

    fn fold_at(&self, source: &Shape, at: Option<Path>) -> Result<Layout> {
        match self {
            Layout::Path(path) => {
                source.at(path)?;
                Ok(Layout::Path(path.clone()))
            }
            Layout::Branch(children) if children.is_empty() => {
                match at.filter(|at| matches!(source.at(at), Ok(Shape::Branch(c)) if c.is_empty())) {
                    Some(at) => Ok(Layout::Path(at)),
                    None => Ok(Layout::branch([])),
                }
            }
            Layout::Branch(children) => {
                let folded = children
                    .iter()
                    .enumerate()
                    .map(|(i, c)| c.fold_at(source, at.as_ref().map(|at| at.child(i))))
                    .collect::<Result<Vec<_>>>()?;
                if let Some(prefix) = contiguous_prefix(&folded, source) {
                    log::trace!("folded {} children into {prefix}", folded.len());
                    return Ok(Layout::Path(prefix));
                }
                // An empty child only aliases the source as part of a folded parent.
                let kept = folded.into_iter().zip(children.iter()).map(|(folded, child)| match child {
                    Layout::Branch(c) if c.is_empty() => Layout::branch([]),
                    _ => folded,
                });
                Ok(Layout::branch(kept))
            }
        }
    }

    /// Shape of the tree this layout produces from `source`.
    pub fn target_shape(&self, source: &Shape) -> Result<Shape> {
        match self {
            Layout::Path(path) => source.at(path).cloned(),
            Layout::Branch(children) => children
                .iter()
                .map(|c| c.target_shape(source))
                .collect::<Result<Vec<_>>>()
                .map(Shape::branch),
        }
    }

    /// `(target path, source path)` for every path leaf, depth first.
    pub fn leaves(&self) -> Vec<(Path, &Path)> {
        let mut out = Vec::new();
        self.push_leaves(Path::root(), &mut out);
        out
    }

    fn push_leaves<'a>(&'a self, at: Path, out: &mut Vec<(Path, &'a Path)>) {
        match self {
            Layout::Path(path) => out.push((at, path)),
            Layout::Branch(children) => {
                for (i, child) in children.iter().enumerate() {
                    child.push_leaves(at.child(i), out);
                }
            }
        }
    }

    /// Source paths of every leaf, depth first.
    pub fn source_paths(&self) -> Vec<&Path> {
        self.leaves().into_iter().map(|(_, source)| source).collect()
    }
}

fn contiguous_prefix(children: &[Layout], source: &Shape) -> Option<Path> {
    let (prefix, _) = children.first()?.as_path()?.split_last()?;
    if source.at(&prefix).ok()?.arity() != children.len() {
        return None;
    }
    let contiguous = children.iter().enumerate().all(|(i, child)| {
        child
            .as_path()
            .and_then(Path::split_last)
            .is_some_and(|(p, last)| last == i && p == prefix)
    });
    contiguous.then_some(prefix)
}

/// Paths render as `.0.1`, branches as `[.., ..]`.
impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Path(path) => write!(f, "{path}"),
            Layout::Branch(children) => {
                f.write_str("[")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{child}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Layout({self})")
    }
}

impl From<Path> for Layout {
    fn from(path: Path) -> Self {
        Layout::Path(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn p<const N: usize>(indices: [usize; N]) -> Layout {
        Layout::Path(Path::from(indices))
    }

    #[test]
    fn test_identity_folds_to_whole() {
        let shape = Shape::tensor(&[2, 3]);
        let id = Layout::identity(&shape);
        assert_eq!(id.structure(), shape);
        assert_eq!(id.fold(&shape), Ok(Layout::whole()));
    }

    #[test]
    fn test_fold_partial() {
        let shape = Shape::tensor(&[2, 2]);
        // Second row kept whole, first row reversed.
        let layout = Layout::branch([Layout::branch([p([0, 1]), p([0, 0])]), Layout::branch([p([1, 0]), p([1, 1])])]);
        assert_eq!(layout.fold(&shape).unwrap().to_string(), "[[.0.1, .0.0], .1]");
    }

    #[test]
    fn test_fold_requires_full_arity() {
        let shape = Shape::tensor(&[3]);
        let layout = Layout::branch([p([0]), p([1])]);
        assert_eq!(layout.fold(&shape), Ok(layout.clone()));
    }

    #[test]
    fn test_empty_branch_folds_onto_empty_source() {
        let empty = Layout::branch([]);
        assert_eq!(empty.fold(&Shape::Terminal), Ok(Layout::branch([])));
        assert_eq!(empty.fold(&Shape::branch([])), Ok(Layout::whole()));

        let shape = Shape::branch([Shape::Terminal, Shape::branch([])]);
        assert_eq!(Layout::identity(&shape).fold(&shape), Ok(Layout::whole()));
        // Out of place, the empty branch stays synthesized.
        let swapped = Layout::branch([empty.clone(), p([0])]);
        assert_eq!(swapped.fold(&shape).unwrap().to_string(), "[[], .0]");
        let aliased = Layout::branch([p([1]), empty]);
        assert_eq!(aliased.fold(&shape).unwrap().to_string(), "[.1, []]");
    }

    #[test]
    fn test_unfold_and_target_shape() {
        let shape = Shape::tensor(&[2, 2]);
        let layout = Layout::branch([p([1]), p([0, 0])]);
        let unfolded = layout.unfold(&shape).unwrap();
        assert_eq!(unfolded.to_string(), "[[.1.0, .1.1], .0.0]");
        assert_eq!(
            layout.target_shape(&shape),
            Ok(Shape::branch([Shape::tensor(&[2]), Shape::Terminal]))
        );
    }

    #[test]
    fn test_validate_errors() {
        let shape = Shape::tensor(&[2, 2]);
        assert_eq!(
            p([0, 2]).validate(&shape),
            Err(LayoutError::OutOfRange { index: 2, arity: 2 })
        );
        assert!(matches!(
            p([0, 0, 0]).validate(&shape),
            Err(LayoutError::ShapeMismatch { .. })
        ));
    }
}
