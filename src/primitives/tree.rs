//! Statically-shaped trees.
//!
//! [`Tree`] is implemented by types whose shape is fixed by the type itself:
//! scalars (terminals), arrays, homogeneous-leaf tuples and structs using
//! `#[derive(Tree)]`. It is the typed bridge into and out of [`Node`]:
//! `into_node` wraps a value as an owning tree, `from_node` rebuilds the
//! typed value after a relayout round trip.

use alloc::string::String;
use alloc::vec::Vec;

use super::node::Node;
use super::shape::Shape;
use crate::error::{LayoutError, Result};

/// A type with a shape known from the type alone.
pub trait Tree: Sized {
    /// Value type stored at every terminal.
    type Leaf;

    fn shape() -> Shape;

    fn into_node(self) -> Node<Self::Leaf>;

    /// Rebuilds the typed value. Fails with `ShapeMismatch` if `node` does
    /// not have `Self::shape()`.
    fn from_node(node: Node<Self::Leaf>) -> Result<Self>;
}

// =============================================================================
// Helpers shared with #[derive(Tree)]
// =============================================================================

/// Children of `node`, checked against the arity of `expected`.
#[doc(hidden)]
pub fn split_branch<L>(node: Node<L>, expected: &Shape) -> Result<alloc::vec::IntoIter<Node<L>>> {
    match node {
        Node::Branch(children) if !expected.is_terminal() && children.len() == expected.arity() => {
            Ok(children.into_vec().into_iter())
        }
        other => Err(LayoutError::mismatch(expected, other.shape())),
    }
}

#[doc(hidden)]
pub fn next_child<E: Tree>(children: &mut impl Iterator<Item = Node<E::Leaf>>) -> Result<E> {
    let node = children
        .next()
        .ok_or_else(|| LayoutError::mismatch(E::shape(), "missing child"))?;
    E::from_node(node)
}

// =============================================================================
// Terminals
// =============================================================================

macro_rules! impl_terminal {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Tree for $ty {
                type Leaf = $ty;

                fn shape() -> Shape {
                    Shape::Terminal
                }

                fn into_node(self) -> Node<$ty> {
                    Node::Leaf(self)
                }

                fn from_node(node: Node<$ty>) -> Result<Self> {
                    node.into_leaf()
                }
            }
        )*
    };
}

impl_terminal!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String, &'static str,
);

// =============================================================================
// Arrays
// =============================================================================

impl<E: Tree, const N: usize> Tree for [E; N] {
    type Leaf = E::Leaf;

    fn shape() -> Shape {
        Shape::uniform(N, E::shape())
    }

    fn into_node(self) -> Node<E::Leaf> {
        Node::branch(self.into_iter().map(Tree::into_node))
    }

    fn from_node(node: Node<E::Leaf>) -> Result<Self> {
        let elements = split_branch(node, &Self::shape())?
            .map(E::from_node)
            .collect::<Result<Vec<E>>>()?;
        elements
            .try_into()
            .map_err(|rest: Vec<E>| LayoutError::mismatch(Self::shape(), format_args!("{} children", rest.len())))
    }
}

// =============================================================================
// Tuples (every element shares one leaf type)
// =============================================================================

macro_rules! impl_tuple_tree {
    ($first:ident $(, $rest:ident)*) => {
        impl<$first: Tree $(, $rest: Tree<Leaf = <$first as Tree>::Leaf>)*> Tree for ($first, $($rest,)*) {
            type Leaf = <$first as Tree>::Leaf;

            fn shape() -> Shape {
                Shape::branch([<$first as Tree>::shape() $(, <$rest as Tree>::shape())*])
            }

            #[allow(non_snake_case)]
            fn into_node(self) -> Node<Self::Leaf> {
                let ($first, $($rest,)*) = self;
                Node::branch([$first.into_node() $(, $rest.into_node())*])
            }

            fn from_node(node: Node<Self::Leaf>) -> Result<Self> {
                let mut children = split_branch(node, &Self::shape())?;
                Ok((
                    next_child::<$first>(&mut children)?,
                    $(next_child::<$rest>(&mut children)?,)*
                ))
            }
        }
    };
}

impl_tuple_tree!(A);
impl_tuple_tree!(A, B);
impl_tuple_tree!(A, B, C);
impl_tuple_tree!(A, B, C, D);
impl_tuple_tree!(A, B, C, D, E);
impl_tuple_tree!(A, B, C, D, E, F);
impl_tuple_tree!(A, B, C, D, E, F, G);
impl_tuple_tree!(A, B, C, D, E, F, G, H);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_roundtrip_shape() {
        type M = [[i32; 2]; 3];
        assert_eq!(M::shape(), Shape::tensor(&[3, 2]));
        let node = [[1i32, 2], [3, 4], [5, 6]].into_node();
        assert_eq!(node.shape(), M::shape());
        assert_eq!(M::from_node(node), Ok([[1, 2], [3, 4], [5, 6]]));
    }

    #[test]
    fn test_tuple_mixed_nesting() {
        type T = (u8, [u8; 2]);
        assert_eq!(
            T::shape(),
            Shape::branch([Shape::Terminal, Shape::tensor(&[2])])
        );
        let node = (1u8, [2u8, 3]).into_node();
        assert_eq!(node.leaves(), [&1u8, &2, &3]);
        assert_eq!(T::from_node(node), Ok((1, [2, 3])));
    }

    #[test]
    fn test_from_node_shape_mismatch() {
        let node = [1i32, 2, 3].into_node();
        assert!(matches!(
            <[i32; 2]>::from_node(node),
            Err(LayoutError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            i32::from_node(Node::branch([Node::Leaf(1)])),
            Err(LayoutError::ShapeMismatch { .. })
        ));
    }
}
