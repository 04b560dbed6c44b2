//! Operate engine: operation trees, transform and zip_transform

use std::cell::Cell;

use tola_layout::operate::transform::zip_transform_nodes;
use tola_layout::prelude::*;

#[test]
fn test_transform_doubles() {
    let data: Node<i32> = node!([1, 2, 3]);
    let out = transform(&data, |x: &i32| x * 2).unwrap();
    assert_eq!(out, node!([2, 4, 6]));
    // The source is untouched and the result owns its leaves.
    assert_eq!(data, node!([1, 2, 3]));
}

#[test]
fn test_transform_over_view() {
    let m: Node<i32> = node!([[1, 2], [3, 4]]);
    let column = relayout(component(1, 1)).apply(&m).unwrap();
    let out = transform(column, |x: &i32| x + 1).unwrap();
    assert_eq!(out, node!([3, 5]));
}

#[test]
fn test_zip_transform_matches_elementwise() {
    let a: Node<i32> = node!([1, 2, 3, 4]);
    let b: Node<i32> = node!([5, 6, 7, 8]);
    let product = |args: &[View<'_, i32>]| args[0].leaf(&path!()).unwrap() * args[1].leaf(&path!()).unwrap();
    let out = zip_transform(product, [a.refer(), b.refer()]).unwrap();
    let expected: Vec<i32> = a
        .leaves()
        .into_iter()
        .zip(b.leaves())
        .map(|(x, y)| x * y)
        .collect();
    assert_eq!(out.leaves().into_iter().copied().collect::<Vec<_>>(), expected);
}

#[test]
fn test_zip_transform_unequal_arity() {
    let a: Node<i32> = node!([1, 2, 3]);
    let b: Node<i32> = node!([4, 5]);
    let calls = Cell::new(0);
    let out = zip_transform_nodes(
        |args: &[View<'_, i32>]| {
            calls.set(calls.get() + 1);
            args.len()
        },
        &[&a, &b],
    );
    assert!(matches!(out, Err(LayoutError::ShapeMismatch { .. })));
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_operate_mixed_tree() {
    let data: Node<i32> = node!([[1, 2, 3], 10, [4, 5]]);
    let sum = |args: &[View<'_, i32>]| args.iter().flat_map(View::leaves).sum::<i32>();
    let ops = OperationTree::branch([
        OperationTree::invoke(&sum as &dyn Fn(&[View<'_, i32>]) -> i32),
        OperationTree::none(),
        OperationTree::invoke(&sum as &dyn Fn(&[View<'_, i32>]) -> i32),
    ]);
    let out = operate_with(&ops, &data, i32::clone).unwrap();
    assert!(!out.is_ref());
    assert_eq!(out.into_node(), node!([6, 10, 9]));
}

#[test]
fn test_operate_identity_is_zero_copy() {
    let data: Node<i32> = node!([1, 2]);
    let ops: OperationTree<fn(&[View<'_, i32>]) -> i32> = OperationTree::none();
    let out: Operated<'_, i32, i32> = operate(&ops, &data).unwrap();
    assert!(out.is_ref());
    assert_eq!(out.shape(), data.shape());
    assert_eq!(out.into_node(), data);
}

#[test]
fn test_zip_transform_matrix_rows() {
    let a: Node<i32> = node!([[1, 2], [3, 4]]);
    let b: Node<i32> = node!([[5, 6], [7, 8]]);
    // Each call sees one row of `a` and the matching row of `b`.
    let rows = zip_transform(
        |args: &[View<'_, i32>]| [args[0].to_node(), args[1].to_node()],
        [a.refer(), b.refer()],
    )
    .unwrap();
    assert_eq!(
        rows,
        Node::branch([
            Node::Leaf([node!([1, 2]), node!([5, 6])]),
            Node::Leaf([node!([3, 4]), node!([7, 8])]),
        ])
    );
}

#[test]
fn test_operate_to_strings() {
    let data: Node<i32> = node!([[1, 2], [3, 4, 5]]);
    let count = |args: &[View<'_, i32>]| format!("{} values", args.len());
    let ops = OperationTree::uniform(Operation::ApplyInvoke(count), 2);
    let out = operate(&ops, &data).unwrap();
    assert_eq!(
        out.into_owned(),
        Some(node!(["2 values".to_string(), "3 values".to_string()]))
    );
}

#[test]
fn test_operate_heterogeneous_leaves() {
    #[derive(Clone, Debug, PartialEq)]
    enum Value {
        Int(i64),
        Text(&'static str),
    }

    let data = node!([Value::Int(2), Value::Text("ab"), Value::Int(5)]);
    let describe = |args: &[&Value]| match args[0] {
        Value::Int(n) => Value::Int(n * 10),
        Value::Text(s) => Value::Int(s.len() as i64),
    };
    let out = transform(&data, |v: &Value| describe(&[v])).unwrap();
    assert_eq!(out, node!([Value::Int(20), Value::Int(2), Value::Int(50)]));
}
