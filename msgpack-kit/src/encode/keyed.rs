use alloc::{collections::BTreeMap, string::String};
use serde::Serialize;
use msgpack_wire::WireWrite;
use msgpack_wire::write::{write_map_len, write_str};

use crate::error::{ErrorKind, Result};
use crate::path::Path;
use crate::ser::Encoder;
use super::{stored, EncodeNode, NodeKind, SingleValueEncodeContainer, UnkeyedEncodeContainer};

/// A map of string keys to child nodes.
///
/// Pairs are written in ascending byte-wise order of the keys, whatever the
/// order they were added in. Adding a key that is already present replaces
/// its node.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedEncodeContainer {
    entries: BTreeMap<String, EncodeNode>,
    path: Path,
}

impl KeyedEncodeContainer {
    pub fn new(path: Path) -> Self {
        KeyedEncodeContainer { entries: BTreeMap::new(), path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn encode_nil(&mut self, key: &str) -> Result<()> {
        self.nested_single_value_container(key).encode_nil()
    }

    /// Serialize `value` into a new child under `key`.
    pub fn encode<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let node = Encoder::encode_node(self.path.key(key), value)?;
        self.insert(key, node);
        Ok(())
    }

    pub fn nested_single_value_container(&mut self, key: &str) -> &mut SingleValueEncodeContainer {
        self.nested(key)
    }

    pub fn nested_keyed_container(&mut self, key: &str) -> &mut KeyedEncodeContainer {
        self.nested(key)
    }

    pub fn nested_unkeyed_container(&mut self, key: &str) -> &mut UnkeyedEncodeContainer {
        self.nested(key)
    }

    pub fn write_to<W: WireWrite>(&self, output: &mut W) -> Result<()> {
        write_map_len(output, self.entries.len())
            .map_err(|err| ErrorKind::from(err).at(&self.path))?;
        for (key, node) in &self.entries {
            write_str(output, key).map_err(|err| ErrorKind::from(err).at(&self.path.key(key)))?;
            node.write_to(output)?;
        }
        Ok(())
    }

    fn nested<C: NodeKind>(&mut self, key: &str) -> &mut C {
        let node = C::new(self.path.key(key)).into_node();
        stored(self.insert(key, node))
    }

    fn insert(&mut self, key: &str, node: EncodeNode) -> &mut EncodeNode {
        use alloc::collections::btree_map::Entry;
        match self.entries.entry(key.into()) {
            Entry::Occupied(mut entry) => {
                entry.insert(node);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(node)
        }
    }
}
