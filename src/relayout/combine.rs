//! Joining views over several sources.

use crate::error::Result;
use crate::layout::{Relayout, transpose};

use super::view::View;

/// A synthesized branch whose children are `views`, unmodified.
pub fn combine<'a, T>(views: impl IntoIterator<Item = View<'a, T>>) -> View<'a, T> {
    View::branch(views)
}

/// Element-wise pairing: child `i` of the result holds child `i` of every
/// input.
///
/// All inputs must have the same outer arity.
///
/// ```
/// use tola_layout::prelude::*;
///
/// let a = node!([1, 2, 3]);
/// let b = node!([4, 5, 6]);
/// let zipped = zip([a.refer(), b.refer()]).unwrap();
/// assert_eq!(zipped.to_node(), node!([[1, 4], [2, 5], [3, 6]]));
///
/// let short = node!([7, 8]);
/// assert!(zip([a.refer(), short.refer()]).is_err());
/// ```
pub fn zip<'a, T>(views: impl IntoIterator<Item = View<'a, T>>) -> Result<View<'a, T>> {
    Relayout::from(transpose(0, 1)).apply(combine(views))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayoutError;
    use crate::node;
    use crate::primitives::Node;

    #[test]
    fn test_combine_keeps_references() {
        let a: Node<i32> = node!([1, 2]);
        let b: Node<i32> = node!(3);
        let combined = combine([a.refer(), b.refer()]);
        let View::Branch(children) = &combined else {
            panic!("expected a branch");
        };
        assert!(children.iter().all(View::is_ref));
        assert_eq!(combined.to_node(), node!([[1, 2], 3]));
    }

    #[test]
    fn test_zip_arity_mismatch() {
        let a: Node<i32> = node!([1, 2, 3]);
        let b: Node<i32> = node!([1, 2]);
        assert!(matches!(
            zip([a.refer(), b.refer()]),
            Err(LayoutError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_zip_of_terminals_is_too_shallow() {
        let a: Node<i32> = node!(1);
        assert!(matches!(
            zip([a.refer()]),
            Err(LayoutError::AxisOutOfRange { axis: 1, .. })
        ));
    }
}
