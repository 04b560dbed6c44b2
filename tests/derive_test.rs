//! #[derive(Tree)] on user structs

use tola_layout::geo::{Vec2, Vec3};
use tola_layout::prelude::*;

#[derive(Tree, Clone, Debug, PartialEq)]
struct Pixel(u8, u8, u8);

#[derive(Tree, Clone, Debug, PartialEq)]
struct Segment {
    start: [f32; 2],
    end: [f32; 2],
}

#[derive(Tree, Debug, PartialEq)]
struct Pair<T> {
    left: T,
    right: T,
}

#[test]
fn test_tuple_struct_shape() {
    assert_eq!(Pixel::shape(), Shape::tensor(&[3]));
    let node = Pixel(1, 2, 3).into_node();
    assert_eq!(node, node!([1u8, 2u8, 3u8]));
    assert_eq!(Pixel::from_node(node), Ok(Pixel(1, 2, 3)));
}

#[test]
fn test_named_struct_relayout() {
    let seg = Segment {
        start: [0.0, 1.0],
        end: [2.0, 3.0],
    };
    let plan = relayout(layout![1, 0]).resolve_for::<Segment>().unwrap();
    let node = seg.clone().into_node();
    let swapped = plan.apply(&node).unwrap().to_node();
    assert_eq!(
        Segment::from_node(swapped),
        Ok(Segment {
            start: [2.0, 3.0],
            end: [0.0, 1.0],
        })
    );

    // Both x coordinates, by reference into the segment.
    let xs = relayout(component(0, 1)).apply(&node).unwrap();
    assert_eq!(xs.leaves(), [&0.0f32, &2.0f32]);
}

#[test]
fn test_generic_struct() {
    type P = Pair<[i32; 2]>;
    assert_eq!(P::shape(), Shape::tensor(&[2, 2]));
    let plan = relayout(transpose(0, 1)).resolve_for::<P>().unwrap();
    let made: P = plan.make_as(&node!([[1, 3], [2, 4]])).unwrap();
    assert_eq!(
        made,
        Pair {
            left: [1, 2],
            right: [3, 4],
        }
    );
}

#[test]
fn test_from_node_rejects_wrong_shape() {
    assert!(matches!(
        Pixel::from_node(node!([1u8, 2u8])),
        Err(LayoutError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_geo_vector_is_a_tree() {
    type Line = (Vec2<f64>, Vec2<f64>);
    assert_eq!(Line::shape(), Shape::tensor(&[2, 2]));

    let v: Vec3<f64> = Vec3::new([1.0, 2.0, 3.0]);
    let flipped = relayout(inverse()).apply(&v.into_node()).unwrap().to_node();
    assert_eq!(Vec3::<f64>::from_node(flipped), Ok(Vec3::new([3.0, 2.0, 1.0])));
}
