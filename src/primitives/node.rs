//! Owning tree storage.
//!
//! `Node<T>` is the source-of-truth container every relayout is applied to.
//! Its arity is fixed at construction: there is no way to push or remove
//! children afterwards.

use alloc::boxed::Box;
use alloc::vec::Vec;

use super::path::Path;
use super::shape::Shape;
use crate::error::{LayoutError, Result};

/// A leaf value or an ordered, fixed-arity branch of subtrees.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Node<T> {
    Leaf(T),
    Branch(Box<[Node<T>]>),
}

impl<T> Node<T> {
    pub fn branch(children: impl IntoIterator<Item = Node<T>>) -> Self {
        Node::Branch(children.into_iter().collect())
    }

    pub fn shape(&self) -> Shape {
        match self {
            Node::Leaf(_) => Shape::Terminal,
            Node::Branch(children) => Shape::branch(children.iter().map(Node::shape)),
        }
    }

    /// Structural check against `shape`, without building this node's
    /// shape.
    pub fn has_shape(&self, shape: &Shape) -> bool {
        match (self, shape) {
            (Node::Leaf(_), Shape::Terminal) => true,
            (Node::Branch(children), Shape::Branch(shapes)) => {
                children.len() == shapes.len() && children.iter().zip(shapes.iter()).all(|(c, s)| c.has_shape(s))
            }
            _ => false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn arity(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Branch(children) => children.len(),
        }
    }

    pub fn children(&self) -> &[Node<T>] {
        match self {
            Node::Leaf(_) => &[],
            Node::Branch(children) => children,
        }
    }

    pub fn child(&self, index: usize) -> Result<&Node<T>> {
        match self {
            Node::Leaf(_) => Err(LayoutError::mismatch("branch", "terminal")),
            Node::Branch(children) => children.get(index).ok_or(LayoutError::OutOfRange {
                index,
                arity: children.len(),
            }),
        }
    }

    pub fn child_mut(&mut self, index: usize) -> Result<&mut Node<T>> {
        match self {
            Node::Leaf(_) => Err(LayoutError::mismatch("branch", "terminal")),
            Node::Branch(children) => {
                let arity = children.len();
                children
                    .get_mut(index)
                    .ok_or(LayoutError::OutOfRange { index, arity })
            }
        }
    }

    /// Non-owning view of the whole tree.
    pub fn refer(&self) -> crate::relayout::View<'_, T> {
        crate::relayout::View::Ref(self)
    }

    /// Subtree at `path`, by reference.
    pub fn at(&self, path: &Path) -> Result<&Node<T>> {
        path.indices().iter().try_fold(self, |node, &i| node.child(i))
    }

    pub fn at_mut(&mut self, path: &Path) -> Result<&mut Node<T>> {
        path.indices().iter().try_fold(self, |node, &i| node.child_mut(i))
    }

    pub fn as_leaf(&self) -> Option<&T> {
        match self {
            Node::Leaf(value) => Some(value),
            Node::Branch(_) => None,
        }
    }

    pub fn as_leaf_mut(&mut self) -> Option<&mut T> {
        match self {
            Node::Leaf(value) => Some(value),
            Node::Branch(_) => None,
        }
    }

    pub fn into_leaf(self) -> Result<T> {
        match self {
            Node::Leaf(value) => Ok(value),
            branch => Err(LayoutError::mismatch(Shape::Terminal, branch.shape())),
        }
    }

    /// Leaf values, depth first, left to right.
    pub fn leaves(&self) -> Vec<&T> {
        let mut out = Vec::new();
        self.visit_leaves(&mut |value| out.push(value));
        out
    }

    fn visit_leaves<'a>(&'a self, f: &mut impl FnMut(&'a T)) {
        match self {
            Node::Leaf(value) => f(value),
            Node::Branch(children) => children.iter().for_each(|c| c.visit_leaves(f)),
        }
    }

    pub fn map<U>(self, f: &mut impl FnMut(T) -> U) -> Node<U> {
        match self {
            Node::Leaf(value) => Node::Leaf(f(value)),
            Node::Branch(children) => {
                Node::Branch(children.into_vec().into_iter().map(|c| c.map(f)).collect())
            }
        }
    }

    /// Splits this tree into disjoint mutable borrows at the requested paths.
    ///
    /// The paths must be pairwise prefix-free. Returned borrows are in the
    /// order of `paths`.
    pub(crate) fn disjoint_mut<'a>(&'a mut self, paths: &[Path]) -> Result<Vec<&'a mut Node<T>>> {
        let mut slots: Vec<Option<&'a mut Node<T>>> = (0..paths.len()).map(|_| None).collect();
        let mut pending: Vec<usize> = (0..paths.len()).collect();
        pending.sort_by(|&a, &b| paths[a].cmp(&paths[b]));
        self.distribute(0, paths, &pending, &mut slots)?;
        slots
            .into_iter()
            .map(|slot| slot.ok_or(LayoutError::NotInvertible { reason: "overlapping write-through paths" }))
            .collect()
    }

    fn distribute<'a>(
        &'a mut self,
        depth: usize,
        paths: &[Path],
        pending: &[usize],
        slots: &mut [Option<&'a mut Node<T>>],
    ) -> Result<()> {
        if pending.is_empty() {
            return Ok(());
        }
        if let Some(&here) = pending.iter().find(|&&p| paths[p].len() == depth) {
            if pending.len() > 1 {
                return Err(LayoutError::NotInvertible { reason: "overlapping write-through paths" });
            }
            slots[here] = Some(self);
            return Ok(());
        }
        let arity = self.arity();
        let Node::Branch(children) = self else {
            return Err(LayoutError::mismatch("branch", "terminal"));
        };
        let mut rest = pending;
        for (i, child) in children.iter_mut().enumerate() {
            let split = rest
                .iter()
                .position(|&p| paths[p].indices()[depth] != i)
                .unwrap_or(rest.len());
            let (mine, tail) = rest.split_at(split);
            child.distribute(depth + 1, paths, mine, slots)?;
            rest = tail;
        }
        match rest.first() {
            Some(&p) => Err(LayoutError::OutOfRange {
                index: paths[p].indices()[depth],
                arity,
            }),
            None => Ok(()),
        }
    }
}

impl<T> From<T> for Node<T> {
    fn from(value: T) -> Self {
        Node::Leaf(value)
    }
}
