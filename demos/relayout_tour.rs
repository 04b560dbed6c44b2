//! A Tour of Relayout
//!
//! Builds a few layouts over a 2x3 matrix and shows which results are
//! references into the source, which are synthesized, and how a relayouted
//! tree is made back into the source shape.

use tola_layout::prelude::*;

fn describe(name: &str, view: &View<'_, i32>) {
    let kind = if view.is_ref() { "reference" } else { "synthesized" };
    println!("{name:<12} {kind:<12} {:?}", view.to_node());
}

fn main() -> Result<(), LayoutError> {
    let m = node!([[1, 2, 3], [4, 5, 6]]);
    println!("source shape {}", m.shape());

    // =========================================================================
    // Combinators
    // =========================================================================

    describe("row 1", &relayout(component(1, 0)).apply(&m)?);
    describe("column 2", &relayout(component(2, 1)).apply(&m)?);
    describe("transpose", &relayout(transpose(0, 1)).apply(&m)?);
    describe("reversed", &relayout(inverse()).apply(&m)?);
    describe("broadcast", &(component(0, 0) | repeat(2)).apply(&m)?);
    describe("picked", &relayout(layout![(1, 2), (0, 0)]).apply(&m)?);

    // =========================================================================
    // Plans: resolve once, apply to any source of the same shape
    // =========================================================================

    let plan = relayout(transpose(0, 1)).resolve(&m.shape())?;
    println!("plan {} -> {}: {}", plan.source_shape(), plan.target_shape(), plan.layout());

    let other = node!([[10, 20, 30], [40, 50, 60]]);
    describe("other^T", &plan.apply(&other)?);

    // Write through the transposed view.
    let mut editable = m.clone();
    {
        let mut t = plan.apply_mut(&mut editable)?;
        t.set(&path!(2, 0), 300)?;
    }
    println!("after write  {editable:?}");

    // And make a source-shaped tree back from a target-shaped one.
    let back = plan.make(&node!([[1, 4], [2, 5], [3, 6]]))?;
    println!("made back    {back:?}");

    // Repeating reads one position twice, so there is no way back.
    let broadcast = relayout(repeat(2)).resolve(&m.shape())?;
    if let Err(err) = broadcast.make(&node!([[[1, 2, 3], [4, 5, 6]], [[1, 2, 3], [4, 5, 6]]])) {
        println!("repeat make  {err}");
    }

    // =========================================================================
    // Operate
    // =========================================================================

    let sums = zip_transform(
        |args: &[View<'_, i32>]| args.iter().flat_map(View::leaves).sum::<i32>(),
        [m.child(0)?.refer(), m.child(1)?.refer()],
    )?;
    println!("row sums     {sums:?}");

    Ok(())
}
