//! # Layer 3: Operate Engine
//!
//! Positional per-leaf operations over views.
//!
//! - **Operations**: [`Operation`] (`None` passes data through, `ApplyInvoke`
//!   calls a function) arranged in an [`OperationTree`] that mirrors the data.
//! - **Operate**: [`operate`] validates the whole tree against the data, then
//!   invokes left to right, depth first.
//! - **Transform**: [`transform`] and [`zip_transform`], built on `zip` and a
//!   uniform invoke tree.

pub mod transform;

pub use transform::{transform, zip_transform};

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;

use crate::error::{LayoutError, Result};
use crate::primitives::{Node, Shape};
use crate::relayout::View;

// =============================================================================
// Operation trees
// =============================================================================

/// What to do with one data subtree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation<F> {
    /// Pass the subtree through unchanged.
    None,
    /// Call `F` with the subtree's children, as views, as positional
    /// arguments. A terminal is passed as the single argument.
    ApplyInvoke(F),
}

/// Operations laid out over a data tree.
///
/// A `Leaf` covers the whole data subtree at its position; a `Branch` must
/// match the data branch child for child.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum OperationTree<F> {
    Leaf(Operation<F>),
    Branch(Box<[OperationTree<F>]>),
}

impl<F> OperationTree<F> {
    pub fn none() -> Self {
        OperationTree::Leaf(Operation::None)
    }

    pub fn invoke(f: F) -> Self {
        OperationTree::Leaf(Operation::ApplyInvoke(f))
    }

    pub fn branch(children: impl IntoIterator<Item = OperationTree<F>>) -> Self {
        OperationTree::Branch(children.into_iter().collect())
    }

    /// `n` copies of `op`.
    pub fn uniform(op: Operation<F>, n: usize) -> Self
    where
        F: Clone,
    {
        Self::branch((0..n).map(|_| OperationTree::Leaf(op.clone())))
    }

    /// True if any leaf invokes a function.
    pub fn has_invoke(&self) -> bool {
        match self {
            OperationTree::Leaf(op) => matches!(op, Operation::ApplyInvoke(_)),
            OperationTree::Branch(children) => children.iter().any(OperationTree::has_invoke),
        }
    }

    /// True if any leaf passes its data through.
    pub fn has_pass_through(&self) -> bool {
        match self {
            OperationTree::Leaf(op) => matches!(op, Operation::None),
            OperationTree::Branch(children) => children.iter().any(OperationTree::has_pass_through),
        }
    }

    /// Number of invocations `operate` would perform.
    pub fn invoke_count(&self) -> usize {
        match self {
            OperationTree::Leaf(Operation::ApplyInvoke(_)) => 1,
            OperationTree::Leaf(Operation::None) => 0,
            OperationTree::Branch(children) => children.iter().map(OperationTree::invoke_count).sum(),
        }
    }

    /// Checks this tree against a data shape without invoking anything.
    pub fn validate(&self, data: &Shape) -> Result<()> {
        match (self, data) {
            (OperationTree::Leaf(_), _) => Ok(()),
            (OperationTree::Branch(ops), Shape::Branch(children)) if ops.len() == children.len() => ops
                .iter()
                .zip(children.iter())
                .try_for_each(|(op, child)| op.validate(child)),
            (OperationTree::Branch(ops), found) => Err(LayoutError::mismatch(
                format_args!("branch of arity {}", ops.len()),
                found,
            )),
        }
    }
}

// =============================================================================
// Results
// =============================================================================

/// Result of [`operate`]: the input itself when nothing was invoked, a newly
/// owned tree otherwise.
#[derive(Clone, Debug)]
pub enum Operated<'a, T, U> {
    Ref(View<'a, T>),
    Owned(Node<U>),
}

impl<'a, T, U> Operated<'a, T, U> {
    pub fn is_ref(&self) -> bool {
        matches!(self, Operated::Ref(_))
    }

    pub fn as_view(&self) -> Option<&View<'a, T>> {
        match self {
            Operated::Ref(view) => Some(view),
            Operated::Owned(_) => None,
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Operated::Ref(view) => view.shape(),
            Operated::Owned(node) => node.shape(),
        }
    }

    /// The newly built tree, if anything was invoked.
    pub fn into_owned(self) -> Option<Node<U>> {
        match self {
            Operated::Ref(_) => None,
            Operated::Owned(node) => Some(node),
        }
    }

    /// Owned form of the result, copying referenced leaves.
    pub fn into_node(self) -> Node<U>
    where
        T: Clone + Into<U>,
    {
        match self {
            Operated::Ref(view) => view.to_node().map(&mut |value: T| value.into()),
            Operated::Owned(node) => node,
        }
    }
}

// =============================================================================
// operate
// =============================================================================

/// Applies `ops` to `data` positionally.
///
/// The whole tree is checked against the data's shape first, so a mismatch
/// anywhere is reported before any function runs. Every invocation may
/// return any `U`; a pass-through position under an invoking tree has no `U`
/// to offer and is rejected, see [`operate_with`] for mixed trees.
///
/// ```
/// use tola_layout::prelude::*;
///
/// let data = node!([[1, 2], [3, 4]]);
/// let row = |args: &[View<'_, i32>]| format!("{:?}", args.iter().flat_map(View::leaves).collect::<Vec<_>>());
/// let ops = OperationTree::uniform(Operation::ApplyInvoke(row), 2);
/// let out = operate(&ops, &data).unwrap();
/// assert_eq!(out.into_owned(), Some(node!(["[1, 2]".to_string(), "[3, 4]".to_string()])));
/// ```
pub fn operate<'a, T, U, F>(ops: &OperationTree<F>, data: impl Into<View<'a, T>>) -> Result<Operated<'a, T, U>>
where
    T: 'a,
    F: Fn(&[View<'_, T>]) -> U,
{
    let data = data.into();
    ops.validate(&data.shape())?;
    if !ops.has_invoke() {
        log::trace!("operate: no invocations, returning input by reference");
        return Ok(Operated::Ref(data));
    }
    if ops.has_pass_through() {
        return Err(LayoutError::mismatch("invoked subtree", "pass-through"));
    }
    log::trace!("operate: {} invocations over {}", ops.invoke_count(), data.shape());
    run(ops, &data, None).map(Operated::Owned)
}

/// [`operate`] for trees that mix invocations with pass-through positions.
///
/// Leaves at a pass-through position are converted with `pass`.
///
/// ```
/// use tola_layout::prelude::*;
///
/// let data = node!([1, [2, 3]]);
/// let ops = OperationTree::branch([
///     OperationTree::none(),
///     OperationTree::invoke(|args: &[View<'_, i32>]| args.iter().flat_map(View::leaves).sum::<i32>()),
/// ]);
/// let out = operate_with(&ops, &data, i32::clone).unwrap();
/// assert_eq!(out.into_node(), node!([1, 5]));
/// ```
pub fn operate_with<'a, T, U, F>(
    ops: &OperationTree<F>,
    data: impl Into<View<'a, T>>,
    pass: impl Fn(&T) -> U,
) -> Result<Operated<'a, T, U>>
where
    T: 'a,
    F: Fn(&[View<'_, T>]) -> U,
{
    let data = data.into();
    ops.validate(&data.shape())?;
    if !ops.has_invoke() {
        log::trace!("operate: no invocations, returning input by reference");
        return Ok(Operated::Ref(data));
    }
    log::trace!("operate: {} invocations over {}", ops.invoke_count(), data.shape());
    run(ops, &data, Some(&pass as &dyn Fn(&T) -> U)).map(Operated::Owned)
}

/// Evaluates a validated tree. Without `pass`, a `None` leaf is an error.
pub(crate) fn run<T, U, F>(
    ops: &OperationTree<F>,
    data: &View<'_, T>,
    pass: Option<&dyn Fn(&T) -> U>,
) -> Result<Node<U>>
where
    F: Fn(&[View<'_, T>]) -> U,
{
    match ops {
        OperationTree::Leaf(Operation::None) => {
            let pass = pass.ok_or_else(|| LayoutError::mismatch("invoked subtree", "pass-through"))?;
            Ok(map_view(data, pass))
        }
        OperationTree::Leaf(Operation::ApplyInvoke(f)) => {
            let args = if data.is_terminal() {
                vec![data.clone()]
            } else {
                (0..data.arity()).map(|i| data.child(i)).collect::<Result<Vec<_>>>()?
            };
            Ok(Node::Leaf(f(args.as_slice())))
        }
        OperationTree::Branch(children) => children
            .iter()
            .enumerate()
            .map(|(i, op)| run(op, &data.child(i)?, pass))
            .collect::<Result<Vec<_>>>()
            .map(Node::branch),
    }
}

fn map_view<T, U>(view: &View<'_, T>, f: &dyn Fn(&T) -> U) -> Node<U> {
    match view {
        View::Ref(node) => map_node(*node, f),
        View::Branch(children) => Node::branch(children.iter().map(|c| map_view(c, f))),
    }
}

fn map_node<T, U>(node: &Node<T>, f: &dyn Fn(&T) -> U) -> Node<U> {
    match node {
        Node::Leaf(value) => Node::Leaf(f(value)),
        Node::Branch(children) => Node::branch(children.iter().map(|c| map_node(c, f))),
    }
}
