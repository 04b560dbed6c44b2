//! Non-owning relayout results.
//!
//! A view is either a direct reference into its source (`Ref`, zero-copy) or
//! a synthesized branch whose children are themselves views. Synthesized
//! branches own only their ordering; every leaf still lives in the source.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::error::{LayoutError, Result};
use crate::primitives::{Node, Path, Shape};

/// Shared view over one or more source trees.
#[derive(Debug)]
pub enum View<'a, T> {
    /// The whole subtree at some source position.
    Ref(&'a Node<T>),
    /// A synthesized node.
    Branch(Box<[View<'a, T>]>),
}

impl<T> Clone for View<'_, T> {
    fn clone(&self) -> Self {
        match *self {
            View::Ref(node) => View::Ref(node),
            View::Branch(ref children) => View::Branch(children.clone()),
        }
    }
}

impl<'a, T> View<'a, T> {
    pub fn branch(children: impl IntoIterator<Item = View<'a, T>>) -> Self {
        View::Branch(children.into_iter().collect())
    }

    /// True when this view is a direct reference with no synthesized
    /// structure.
    pub fn is_ref(&self) -> bool {
        matches!(self, View::Ref(_))
    }

    pub fn shape(&self) -> Shape {
        match self {
            View::Ref(node) => node.shape(),
            View::Branch(children) => Shape::branch(children.iter().map(View::shape)),
        }
    }

    /// Structural check against `shape`; see [`Node::has_shape`].
    pub fn has_shape(&self, shape: &Shape) -> bool {
        match (self, shape) {
            (View::Ref(node), shape) => node.has_shape(shape),
            (View::Branch(children), Shape::Branch(shapes)) => {
                children.len() == shapes.len() && children.iter().zip(shapes.iter()).all(|(c, s)| c.has_shape(s))
            }
            (View::Branch(_), Shape::Terminal) => false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, View::Ref(node) if node.is_terminal())
    }

    pub fn arity(&self) -> usize {
        match self {
            View::Ref(node) => node.arity(),
            View::Branch(children) => children.len(),
        }
    }

    pub fn child(&self, index: usize) -> Result<View<'a, T>> {
        match *self {
            View::Ref(node) => node.child(index).map(View::Ref),
            View::Branch(ref children) => children.get(index).cloned().ok_or(LayoutError::OutOfRange {
                index,
                arity: children.len(),
            }),
        }
    }

    /// Sub-view at `path`.
    pub fn at(&self, path: &Path) -> Result<View<'a, T>> {
        let mut view = self;
        for (depth, &index) in path.indices().iter().enumerate() {
            match *view {
                View::Ref(node) => {
                    let rest = Path::from(&path.indices()[depth..]);
                    return node.at(&rest).map(View::Ref);
                }
                View::Branch(ref children) => {
                    view = children.get(index).ok_or(LayoutError::OutOfRange {
                        index,
                        arity: children.len(),
                    })?;
                }
            }
        }
        Ok(view.clone())
    }

    pub fn as_leaf(&self) -> Option<&'a T> {
        match *self {
            View::Ref(node) => node.as_leaf(),
            View::Branch(_) => None,
        }
    }

    /// Leaf value at `path`.
    pub fn leaf(&self, path: &Path) -> Result<&'a T> {
        let view = self.at(path)?;
        view.as_leaf()
            .ok_or_else(|| LayoutError::mismatch(Shape::Terminal, view.shape()))
    }

    /// Leaf values, depth first, left to right.
    pub fn leaves(&self) -> Vec<&'a T> {
        let mut out = Vec::new();
        self.push_leaves(&mut out);
        out
    }

    fn push_leaves(&self, out: &mut Vec<&'a T>) {
        match *self {
            View::Ref(node) => out.extend(node.leaves()),
            View::Branch(ref children) => children.iter().for_each(|c| c.push_leaves(out)),
        }
    }

    /// Copies the viewed values into a freshly owned tree.
    pub fn to_node(&self) -> Node<T>
    where
        T: Clone,
    {
        match self {
            View::Ref(node) => (*node).clone(),
            View::Branch(children) => Node::branch(children.iter().map(View::to_node)),
        }
    }
}

impl<'a, T> From<&'a Node<T>> for View<'a, T> {
    fn from(node: &'a Node<T>) -> Self {
        View::Ref(node)
    }
}

impl<'a, T> From<&'a mut Node<T>> for View<'a, T> {
    fn from(node: &'a mut Node<T>) -> Self {
        View::Ref(node)
    }
}

impl<'a, 'b, T> From<&'b View<'a, T>> for View<'a, T> {
    fn from(view: &'b View<'a, T>) -> Self {
        view.clone()
    }
}

/// Compares viewed values, not identity.
impl<T: PartialEq> PartialEq<Node<T>> for View<'_, T> {
    fn eq(&self, other: &Node<T>) -> bool {
        match (self, other) {
            (View::Ref(node), other) => *node == other,
            (View::Branch(children), Node::Branch(others)) => {
                children.len() == others.len() && children.iter().zip(others.iter()).all(|(c, o)| c == o)
            }
            (View::Branch(_), Node::Leaf(_)) => false,
        }
    }
}

impl<T: PartialEq> PartialEq for View<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (View::Ref(node), other) | (other, View::Ref(node)) => other == *node,
            (View::Branch(a), View::Branch(b)) => a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y),
        }
    }
}

// =============================================================================
// ViewMut
// =============================================================================

/// Exclusive view: every leaf is a disjoint mutable borrow of its source
/// position, so writes land in the source.
///
/// Only leaf values can be written; the source's shape never changes.
///
/// ```compile_fail
/// use tola_layout::prelude::*;
///
/// let mut m = node!([[1, 2], [3, 4]]);
/// let plan = relayout(component(1, 0)).resolve(&m.shape()).unwrap();
/// let mut row = plan.apply_mut(&mut m).unwrap();
/// *row.node_mut(&path!()).unwrap() = Node::Leaf(9);
/// ```
#[derive(Debug)]
pub enum ViewMut<'a, T> {
    RefMut(&'a mut Node<T>),
    Branch(Box<[ViewMut<'a, T>]>),
}

impl<'a, T> ViewMut<'a, T> {
    pub fn shape(&self) -> Shape {
        match self {
            ViewMut::RefMut(node) => node.shape(),
            ViewMut::Branch(children) => Shape::branch(children.iter().map(ViewMut::shape)),
        }
    }

    pub fn is_ref(&self) -> bool {
        matches!(self, ViewMut::RefMut(_))
    }

    /// Reborrows as a shared view.
    pub fn as_view(&self) -> View<'_, T> {
        match self {
            ViewMut::RefMut(node) => View::Ref(&**node),
            ViewMut::Branch(children) => View::branch(children.iter().map(ViewMut::as_view)),
        }
    }

    /// Mutable access to the subtree at `path`. Private: callers only write
    /// leaves, so the source keeps its shape.
    fn node_mut(&mut self, path: &Path) -> Result<&mut Node<T>> {
        let mut view = self;
        for (depth, &index) in path.indices().iter().enumerate() {
            match view {
                ViewMut::RefMut(node) => {
                    let rest = Path::from(&path.indices()[depth..]);
                    return node.at_mut(&rest);
                }
                ViewMut::Branch(children) => {
                    let arity = children.len();
                    view = children
                        .get_mut(index)
                        .ok_or(LayoutError::OutOfRange { index, arity })?;
                }
            }
        }
        match view {
            ViewMut::RefMut(node) => Ok(&mut **node),
            ViewMut::Branch(_) => Err(LayoutError::mismatch("source subtree", "synthesized branch")),
        }
    }

    pub fn leaf_mut(&mut self, path: &Path) -> Result<&mut T> {
        let node = self.node_mut(path)?;
        match node {
            Node::Leaf(value) => Ok(value),
            branch => Err(LayoutError::mismatch(Shape::Terminal, branch.shape())),
        }
    }

    /// Overwrites the leaf at `path`, returning the previous value.
    pub fn set(&mut self, path: &Path, value: T) -> Result<T> {
        Ok(core::mem::replace(self.leaf_mut(path)?, value))
    }

    /// Calls `f` on every leaf, depth first, left to right.
    pub fn for_each_leaf_mut(&mut self, f: &mut impl FnMut(&mut T)) {
        match self {
            ViewMut::RefMut(node) => for_each_node_leaf(&mut **node, f),
            ViewMut::Branch(children) => children.iter_mut().for_each(|c| c.for_each_leaf_mut(f)),
        }
    }
}

fn for_each_node_leaf<T>(node: &mut Node<T>, f: &mut impl FnMut(&mut T)) {
    match node {
        Node::Leaf(value) => f(value),
        Node::Branch(children) => children.iter_mut().for_each(|c| for_each_node_leaf(c, f)),
    }
}
