//! Layout builder: combinators, pipelines and the layout! literal

use tola_layout::prelude::*;

#[test]
fn test_layout_macro_forms() {
    assert_eq!(layout![()], Layout::whole());
    assert_eq!(layout![2], Layout::Path(path!(2)));
    assert_eq!(layout![(0, 1)], Layout::Path(path!(0, 1)));
    assert_eq!(layout![1, 0].to_string(), "[.1, .0]");
    assert_eq!(layout![(0, 1), [(1, 0)]].to_string(), "[.0.1, [.1.0]]");
    assert_eq!(layout![], Layout::branch([]));
}

#[test]
fn test_repeat_then_transpose() {
    let plan = (repeat(3) | transpose(0, 1)).resolve(&Shape::tensor(&[2])).unwrap();
    assert_eq!(plan.target_shape(), &Shape::tensor(&[2, 3]));
    assert_eq!(plan.layout().to_string(), "[[.0, .0, .0], [.1, .1, .1]]");
}

#[test]
fn test_explicit_layout_after_transpose() {
    // The explicit step addresses the transposed tree, not the source.
    let pipeline = transpose(0, 1) | layout![(1, 0)];
    let plan = pipeline.resolve(&Shape::tensor(&[2, 2])).unwrap();
    assert_eq!(plan.layout().to_string(), ".0.1");
}

#[test]
fn test_explicit_subtree_selection() {
    let shape = Shape::branch([Shape::tensor(&[2]), Shape::Terminal]);
    let plan = relayout(layout![1, 0]).resolve(&shape).unwrap();
    assert_eq!(plan.target_shape(), &Shape::branch([Shape::Terminal, Shape::tensor(&[2])]));
    // Selecting a whole subtree keeps it folded.
    assert_eq!(plan.layout().to_string(), "[.1, .0]");
}

#[test]
fn test_transpose_distant_axes() {
    let shape = Shape::tensor(&[2, 3, 4]);
    let plan = relayout(transpose(0, 2)).resolve(&shape).unwrap();
    assert_eq!(plan.target_shape(), &Shape::tensor(&[4, 2, 3]));
    let layout = plan.unfolded_layout();
    assert_eq!(layout.sublayout(&path!(3, 1, 2)).unwrap(), &Layout::Path(path!(1, 2, 3)));
}

#[test]
fn test_transpose_inner_axes() {
    let shape = Shape::tensor(&[2, 3, 4]);
    let plan = relayout(transpose(1, 2)).resolve(&shape).unwrap();
    assert_eq!(plan.target_shape(), &Shape::tensor(&[2, 4, 3]));
    let layout = plan.unfolded_layout();
    assert_eq!(layout.sublayout(&path!(1, 3, 2)).unwrap(), &Layout::Path(path!(1, 2, 3)));
}

// =============================================================================
// Errors surface at resolve time
// =============================================================================

#[test]
fn test_explicit_out_of_range() {
    let err = relayout(layout![(0, 5)]).resolve(&Shape::tensor(&[2, 2]));
    assert_eq!(err.err(), Some(LayoutError::OutOfRange { index: 5, arity: 2 }));
}

#[test]
fn test_explicit_through_terminal() {
    let err = relayout(layout![(0, 0, 0)]).resolve(&Shape::tensor(&[2, 2]));
    assert!(matches!(err, Err(LayoutError::ShapeMismatch { .. })));
}

#[test]
fn test_component_errors() {
    let shape = Shape::tensor(&[2, 2]);
    assert_eq!(
        relayout(component(2, 0)).resolve(&shape).err(),
        Some(LayoutError::OutOfRange { index: 2, arity: 2 })
    );
    assert_eq!(
        relayout(component(0, 3)).resolve(&shape).err(),
        Some(LayoutError::AxisOutOfRange { axis: 3, depth: 2 })
    );
}

#[test]
fn test_transpose_ragged() {
    let ragged = Shape::branch([Shape::tensor(&[2]), Shape::tensor(&[3])]);
    assert!(matches!(
        relayout(transpose(0, 1)).resolve(&ragged),
        Err(LayoutError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_inverse_of_terminal() {
    assert_eq!(
        relayout(inverse()).resolve(&Shape::Terminal).err(),
        Some(LayoutError::AxisOutOfRange { axis: 0, depth: 0 })
    );
}

#[test]
fn test_zip_step_arity_mismatch() {
    let shape = Shape::branch([Shape::tensor(&[3]), Shape::tensor(&[2])]);
    let zip = Zip::new([relayout(component(0, 0)), relayout(component(1, 0))]);
    assert!(matches!(relayout(zip).resolve(&shape), Err(LayoutError::ShapeMismatch { .. })));
}

#[test]
fn test_combine_step() {
    let shape = Shape::tensor(&[2, 2]);
    let combine = Combine::new([relayout(component(1, 1)), Relayout::new()]);
    let plan = relayout(combine).resolve(&shape).unwrap();
    assert_eq!(plan.layout().to_string(), "[[.0.1, .1.1], .]");
}

#[test]
fn test_resolve_for_typed_tree() {
    let plan = relayout(inverse()).resolve_for::<(u8, [u8; 2])>().unwrap();
    assert_eq!(plan.target_shape(), &Shape::branch([Shape::tensor(&[2]), Shape::Terminal]));
}
