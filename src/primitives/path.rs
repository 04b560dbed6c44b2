//! Structural addresses.

use alloc::vec::Vec;
use core::fmt;

/// Sequence of child indices locating a subtree. The empty path is the root.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path(Vec<usize>);

impl Path {
    /// The whole-tree path.
    pub const fn root() -> Self {
        Path(Vec::new())
    }

    pub fn new(indices: impl Into<Vec<usize>>) -> Self {
        Path(indices.into())
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// This path extended by one child index.
    pub fn child(&self, index: usize) -> Self {
        let mut indices = Vec::with_capacity(self.0.len() + 1);
        indices.extend_from_slice(&self.0);
        indices.push(index);
        Path(indices)
    }

    /// This path extended by `other`.
    pub fn join(&self, other: &Path) -> Self {
        let mut indices = self.0.clone();
        indices.extend_from_slice(&other.0);
        Path(indices)
    }

    /// Splits off the last index: `(prefix, last)`.
    pub fn split_last(&self) -> Option<(Path, usize)> {
        let (last, prefix) = self.0.split_last()?;
        Some((Path(prefix.to_vec()), *last))
    }

    pub fn first(&self) -> Option<usize> {
        self.0.first().copied()
    }

    /// Everything after the first index.
    pub fn tail(&self) -> Path {
        Path(self.0.get(1..).map(<[usize]>::to_vec).unwrap_or_default())
    }

    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl From<Vec<usize>> for Path {
    fn from(indices: Vec<usize>) -> Self {
        Path(indices)
    }
}

impl From<&[usize]> for Path {
    fn from(indices: &[usize]) -> Self {
        Path(indices.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Path {
    fn from(indices: [usize; N]) -> Self {
        Path(indices.to_vec())
    }
}

/// Renders as `.0.1`; the root renders as `.`.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str(".");
        }
        for index in &self.0 {
            write!(f, ".{index}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_child_and_split() {
        let p = Path::root().child(1).child(0);
        assert_eq!(p.indices(), &[1, 0]);
        let (prefix, last) = p.split_last().unwrap();
        assert_eq!(prefix, Path::from([1]));
        assert_eq!(last, 0);
        assert!(Path::root().split_last().is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Path::root().to_string(), ".");
        assert_eq!(Path::from([2, 0, 1]).to_string(), ".2.0.1");
    }

    #[test]
    fn test_prefix() {
        let p = Path::from([1, 2, 3]);
        assert!(p.starts_with(&Path::from([1, 2])));
        assert!(p.starts_with(&Path::root()));
        assert!(!p.starts_with(&Path::from([2])));
        assert_eq!(p.tail(), Path::from([2, 3]));
        assert_eq!(Path::root().tail(), Path::root());
    }
}
