//! Inverse layouts: routing target positions back to source positions.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::error::{LayoutError, Result};
use crate::layout::Layout;
use crate::primitives::{Path, Shape};

/// Partial bijection from source terminals to the target positions that read
/// them.
///
/// Built once when a plan is resolved. It only exists when the forward
/// mapping is injective; a layout reading one source terminal from two
/// target positions (as `repeat` does) has no inverse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InverseLayout {
    entries: BTreeMap<Path, Path>,
    /// Present when every source terminal is reached: a layout over the
    /// source shape whose leaves are target paths, folded against the
    /// target shape.
    layout: Option<Layout>,
}

impl InverseLayout {
    /// Derives the inverse of an unfolded layout over `source`.
    pub(crate) fn derive(unfolded: &Layout, source: &Shape, target: &Shape) -> Result<Self> {
        let mut entries = BTreeMap::new();
        for (target_path, source_path) in unfolded.leaves() {
            if entries.insert(source_path.clone(), target_path).is_some() {
                return Err(LayoutError::NotInvertible {
                    reason: "a source position is read by more than one target position",
                });
            }
        }
        let layout = if entries.len() == source.leaf_count() {
            Some(Self::route(source, Path::root(), &entries).fold(target)?)
        } else {
            None
        };
        Ok(InverseLayout { entries, layout })
    }

    fn route(shape: &Shape, at: Path, entries: &BTreeMap<Path, Path>) -> Layout {
        match shape {
            Shape::Terminal => Layout::Path(entries.get(&at).cloned().unwrap_or_default()),
            Shape::Branch(children) => Layout::branch(
                children
                    .iter()
                    .enumerate()
                    .map(|(i, child)| Self::route(child, at.child(i), entries)),
            ),
        }
    }

    /// Every source terminal is reached by exactly one target position.
    pub fn is_total(&self) -> bool {
        self.layout.is_some()
    }

    /// Target position that reads the source terminal at `source`.
    pub fn target_of(&self, source: &Path) -> Option<&Path> {
        self.entries.get(source)
    }

    /// `(source path, target path)` pairs ordered by source path.
    pub fn entries(&self) -> impl Iterator<Item = (&Path, &Path)> {
        self.entries.iter()
    }

    /// The layout that rebuilds the source shape from a target tree.
    pub fn layout(&self) -> Result<&Layout> {
        self.layout.as_ref().ok_or(LayoutError::NotInvertible {
            reason: "some source positions are not reached by the layout",
        })
    }

    pub(crate) fn unreached(&self, source: &Shape) -> Vec<Path> {
        source
            .leaf_paths()
            .into_iter()
            .filter(|p| !self.entries.contains_key(p))
            .collect()
    }
}
