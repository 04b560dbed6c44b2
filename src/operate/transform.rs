//! Element-wise maps over one or more trees.

use alloc::vec::Vec;

use super::{Operation, OperationTree, run};
use crate::error::{LayoutError, Result};
use crate::primitives::{Node, Shape};
use crate::relayout::{View, zip};

/// Maps `f` over every child of a flat tree, producing a new tree.
///
/// ```
/// use tola_layout::prelude::*;
///
/// let data = node!([1, 2, 3]);
/// let doubled = transform(&data, |x: &i32| x * 2).unwrap();
/// assert_eq!(doubled, node!([2, 4, 6]));
/// assert_eq!(data, node!([1, 2, 3]));
/// ```
pub fn transform<'a, T, U>(data: impl Into<View<'a, T>>, f: impl Fn(&T) -> U) -> Result<Node<U>>
where
    T: 'a,
{
    let data = data.into();
    if data.is_terminal() {
        return Err(LayoutError::mismatch("branch", Shape::Terminal));
    }
    let leaves = (0..data.arity())
        .map(|i| {
            let child = data.child(i)?;
            child.as_leaf().ok_or_else(|| LayoutError::mismatch(Shape::Terminal, child.shape()))
        })
        .collect::<Result<Vec<_>>>()?;
    log::trace!("transform over {} positions", leaves.len());
    Ok(Node::branch(leaves.into_iter().map(|value| Node::Leaf(f(value)))))
}

/// Calls `f(a[i], b[i], ...)` for every index `i` shared by `inputs`.
///
/// Each argument is the whole element subtree, so rows of two matrices
/// arrive as two row views.
///
/// ```
/// use tola_layout::prelude::*;
///
/// let a = node!([[1, 2], [3, 4]]);
/// let b = node!([[5, 6], [7, 8]]);
/// let dot = |rows: &[View<'_, i32>]| -> i32 {
///     rows[0].leaves().into_iter().zip(rows[1].leaves()).map(|(x, y)| x * y).sum()
/// };
/// assert_eq!(zip_transform(dot, [a.refer(), b.refer()]), Ok(node!([17, 53])));
/// ```
pub fn zip_transform<'a, T, U, F>(f: F, inputs: impl IntoIterator<Item = View<'a, T>>) -> Result<Node<U>>
where
    T: 'a,
    F: Fn(&[View<'_, T>]) -> U,
{
    let zipped = zip(inputs)?;
    let ops = OperationTree::uniform(Operation::ApplyInvoke(&f), zipped.arity());
    ops.validate(&zipped.shape())?;
    log::trace!("zip_transform over {} positions", zipped.arity());
    run(&ops, &zipped, None)
}

/// [`zip_transform`] over owned trees.
pub fn zip_transform_nodes<T, U, F>(f: F, inputs: &[&Node<T>]) -> Result<Node<U>>
where
    F: Fn(&[View<'_, T>]) -> U,
{
    zip_transform(f, inputs.iter().map(|&node| View::Ref(node)).collect::<Vec<_>>())
}
