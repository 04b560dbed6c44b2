//! Tree topology without data.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use super::path::Path;
use crate::error::{LayoutError, Result};

/// Branching structure of a tree.
///
/// Leaf value types play no part: two shapes are compatible iff they are
/// structurally identical.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Shape {
    Terminal,
    Branch(Box<[Shape]>),
}

impl Shape {
    pub fn branch(children: impl IntoIterator<Item = Shape>) -> Self {
        Shape::Branch(children.into_iter().collect())
    }

    /// `n` copies of `child` under one branch.
    pub fn uniform(n: usize, child: Shape) -> Self {
        Shape::Branch((0..n).map(|_| child.clone()).collect())
    }

    /// Nested uniform branches with the given extents, e.g. `[2, 3]` is a
    /// 2x3 matrix shape.
    pub fn tensor(extents: &[usize]) -> Self {
        match extents.split_first() {
            None => Shape::Terminal,
            Some((&n, rest)) => Shape::uniform(n, Shape::tensor(rest)),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Shape::Terminal)
    }

    /// Number of children; zero for a terminal.
    pub fn arity(&self) -> usize {
        match self {
            Shape::Terminal => 0,
            Shape::Branch(children) => children.len(),
        }
    }

    pub fn child(&self, index: usize) -> Result<&Shape> {
        match self {
            Shape::Terminal => Err(LayoutError::mismatch("branch", "terminal")),
            Shape::Branch(children) => children.get(index).ok_or(LayoutError::OutOfRange {
                index,
                arity: children.len(),
            }),
        }
    }

    /// Subshape at `path`.
    pub fn at(&self, path: &Path) -> Result<&Shape> {
        path.indices().iter().try_fold(self, |shape, &i| shape.child(i))
    }

    /// Maximum branch nesting below this node.
    pub fn depth(&self) -> usize {
        match self {
            Shape::Terminal => 0,
            Shape::Branch(children) => 1 + children.iter().map(Shape::depth).max().unwrap_or(0),
        }
    }

    /// Tensor extent at `axis`: the common arity of every branch at that
    /// depth.
    pub fn extent(&self, axis: usize) -> Result<usize> {
        let mut extent = None;
        self.collect_extent(axis, axis, &mut extent)?;
        // A zero-arity branch above `axis` leaves nothing to measure.
        Ok(extent.unwrap_or(0))
    }

    fn collect_extent(&self, axis: usize, requested: usize, extent: &mut Option<usize>) -> Result<()> {
        let Shape::Branch(children) = self else {
            return Err(LayoutError::AxisOutOfRange {
                axis: requested,
                depth: requested - axis,
            });
        };
        if axis > 0 {
            return children
                .iter()
                .try_for_each(|c| c.collect_extent(axis - 1, requested, extent));
        }
        match *extent {
            Some(n) if n != children.len() => Err(LayoutError::mismatch(
                format_args!("extent {n} at axis {requested}"),
                format_args!("extent {}", children.len()),
            )),
            _ => {
                *extent = Some(children.len());
                Ok(())
            }
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Shape::Terminal => 1,
            Shape::Branch(children) => children.iter().map(Shape::leaf_count).sum(),
        }
    }

    /// Paths to every terminal, depth first, left to right.
    pub fn leaf_paths(&self) -> Vec<Path> {
        let mut out = Vec::with_capacity(self.leaf_count());
        self.push_leaf_paths(Path::root(), &mut out);
        out
    }

    fn push_leaf_paths(&self, at: Path, out: &mut Vec<Path>) {
        match self {
            Shape::Terminal => out.push(at),
            Shape::Branch(children) => {
                for (i, child) in children.iter().enumerate() {
                    child.push_leaf_paths(at.child(i), out);
                }
            }
        }
    }

    pub fn is_compatible(&self, other: &Shape) -> bool {
        self == other
    }
}

/// `*` for a terminal, `(..)` for a branch.
impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Terminal => f.write_str("*"),
            Shape::Branch(children) => {
                f.write_str("(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{child}")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape{self}")
    }
}
