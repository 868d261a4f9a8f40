use alloc::{string::String, vec::Vec};
use core::fmt;

/// One step from a container to its child.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// The location of a container inside the value being encoded or decoded.
///
/// Carried for diagnostics only. Displays as `$` for the root and e.g.
/// `$.runways[0].surface` for nested values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<PathSegment>);

impl Path {
    pub const fn root() -> Self {
        Path(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// A new path extended with a map key.
    pub fn key(&self, key: &str) -> Path {
        self.extended(PathSegment::Key(key.into()))
    }

    /// A new path extended with an array index.
    pub fn index(&self, index: usize) -> Path {
        self.extended(PathSegment::Index(index))
    }

    fn extended(&self, segment: PathSegment) -> Path {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend_from_slice(&self.0);
        segments.push(segment);
        Path(segments)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.0 {
            match segment {
                PathSegment::Key(key) => write!(f, ".{}", key)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}
