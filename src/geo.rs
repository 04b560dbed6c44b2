//! Fixed-size vectors.
//!
//! [`Vector`] is a thin `Tree` over `[T; N]` with named component accessors,
//! so it can be relayouted and operated on like any other tree.

use core::ops::{Add, Index, IndexMut, Sub};

use crate::error::Result;
use crate::layout::{Layout, relayout};
use crate::primitives::{Node, Path, Shape, Tree};

/// `N` components of `T`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Vector<const N: usize, T> {
    storage: [T; N],
}

pub type Vec2<T> = Vector<2, T>;
pub type Vec3<T> = Vector<3, T>;
pub type Vec4<T> = Vector<4, T>;

impl<const N: usize, T> Vector<N, T> {
    pub const fn new(storage: [T; N]) -> Self {
        Vector { storage }
    }

    pub fn as_array(&self) -> &[T; N] {
        &self.storage
    }

    pub fn into_array(self) -> [T; N] {
        self.storage
    }

    /// Reorders or repeats components: `v.swizzle([2, 0])` is `(z, x)`.
    ///
    /// Fails with `OutOfRange` for an index `>= N`.
    pub fn swizzle<const M: usize>(&self, indices: [usize; M]) -> Result<Vector<M, T>>
    where
        T: Tree + Clone,
        T::Leaf: Clone,
    {
        let node = self.clone().into_node();
        let picks = Layout::branch(indices.map(|i| Layout::Path(Path::from([i]))));
        let view = relayout(picks).apply(&node)?;
        Vector::from_node(view.to_node())
    }
}

impl<const N: usize, T> From<[T; N]> for Vector<N, T> {
    fn from(storage: [T; N]) -> Self {
        Vector::new(storage)
    }
}

impl<const N: usize, T: Default> Default for Vector<N, T> {
    fn default() -> Self {
        Vector::new(core::array::from_fn(|_| T::default()))
    }
}

impl<const N: usize, T> Index<usize> for Vector<N, T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.storage[index]
    }
}

impl<const N: usize, T> IndexMut<usize> for Vector<N, T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.storage[index]
    }
}

impl<const N: usize, T: Tree> Tree for Vector<N, T> {
    type Leaf = T::Leaf;

    fn shape() -> Shape {
        <[T; N]>::shape()
    }

    fn into_node(self) -> Node<T::Leaf> {
        self.storage.into_node()
    }

    fn from_node(node: Node<T::Leaf>) -> Result<Self> {
        <[T; N]>::from_node(node).map(Vector::new)
    }
}

// =============================================================================
// Component accessors
// =============================================================================

macro_rules! impl_accessors {
    ($n:literal: $($name:ident => $index:literal),* $(,)?) => {
        impl<T> Vector<$n, T> {
            $(
                pub fn $name(&self) -> &T {
                    &self.storage[$index]
                }

                $crate::paste::paste! {
                    pub fn [<$name _mut>](&mut self) -> &mut T {
                        &mut self.storage[$index]
                    }
                }
            )*
        }
    };
}

impl_accessors!(2: x => 0, y => 1);
impl_accessors!(3: x => 0, y => 1, z => 2, r => 0, g => 1, b => 2);
impl_accessors!(4: x => 0, y => 1, z => 2, w => 3, r => 0, g => 1, b => 2, a => 3);

// =============================================================================
// Arithmetic
// =============================================================================

impl<const N: usize, T: Copy + Add<Output = T>> Add for Vector<N, T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Vector::new(core::array::from_fn(|i| self.storage[i] + rhs.storage[i]))
    }
}

impl<const N: usize, T: Copy + Sub<Output = T>> Sub for Vector<N, T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Vector::new(core::array::from_fn(|i| self.storage[i] - rhs.storage[i]))
    }
}
