//! Literal syntax for trees and paths.

// =============================================================================
// node! - Owning trees from nested brackets
// =============================================================================

/// Builds a [`Node`](crate::Node) from nested brackets.
///
/// Brackets are branches; anything else is a leaf expression.
///
/// ```
/// use tola_layout::{Node, node};
///
/// let m: Node<i32> = node!([[1, 2], [3, -4]]);
/// assert_eq!(m.shape().to_string(), "((*, *), (*, *))");
/// assert_eq!(node!(5), Node::Leaf(5));
/// assert_eq!(node!([]), Node::<u8>::branch([]));
/// ```
#[macro_export]
macro_rules! node {
    ([$($body:tt)*]) => {
        $crate::node!(@children [] $($body)*)
    };
    (@children [$($done:expr,)*]) => {
        $crate::Node::branch([$($done),*])
    };
    (@children [$($done:expr,)*] [$($inner:tt)*] $(, $($rest:tt)*)?) => {
        $crate::node!(@children [$($done,)* $crate::node!([$($inner)*]),] $($($rest)*)?)
    };
    (@children [$($done:expr,)*] $leaf:expr $(, $($rest:tt)*)?) => {
        $crate::node!(@children [$($done,)* $crate::Node::Leaf($leaf),] $($($rest)*)?)
    };
    ($leaf:expr) => {
        $crate::Node::Leaf($leaf)
    };
}

// =============================================================================
// path! - Structural addresses
// =============================================================================

/// Builds a [`Path`](crate::Path) from child indices. `path!()` is the root.
///
/// ```
/// use tola_layout::path;
///
/// assert_eq!(path!(1, 0).to_string(), ".1.0");
/// assert!(path!().is_root());
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::Path::root()
    };
    ($($index:expr),+ $(,)?) => {
        $crate::Path::new([$($index),*])
    };
}
