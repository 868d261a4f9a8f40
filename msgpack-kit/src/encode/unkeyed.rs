use alloc::vec::Vec;
use serde::Serialize;
use msgpack_wire::WireWrite;
use msgpack_wire::write::write_array_len;

use crate::error::{ErrorKind, Result};
use crate::path::Path;
use crate::ser::Encoder;
use super::{stored, EncodeNode, NodeKind, KeyedEncodeContainer, SingleValueEncodeContainer};

/// An ordered list of child nodes, written in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct UnkeyedEncodeContainer {
    items: Vec<EncodeNode>,
    path: Path,
}

impl UnkeyedEncodeContainer {
    pub fn new(path: Path) -> Self {
        UnkeyedEncodeContainer { items: Vec::new(), path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn encode_nil(&mut self) -> Result<()> {
        self.nested_single_value_container().encode_nil()
    }

    /// Serialize `value` into a new trailing child.
    pub fn encode<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        let node = Encoder::encode_node(self.next_path(), value)?;
        self.items.push(node);
        Ok(())
    }

    pub fn nested_single_value_container(&mut self) -> &mut SingleValueEncodeContainer {
        self.nested()
    }

    pub fn nested_keyed_container(&mut self) -> &mut KeyedEncodeContainer {
        self.nested()
    }

    pub fn nested_unkeyed_container(&mut self) -> &mut UnkeyedEncodeContainer {
        self.nested()
    }

    pub fn write_to<W: WireWrite>(&self, output: &mut W) -> Result<()> {
        write_array_len(output, self.items.len())
            .map_err(|err| ErrorKind::from(err).at(&self.path))?;
        for node in &self.items {
            node.write_to(output)?;
        }
        Ok(())
    }

    fn next_path(&self) -> Path {
        self.path.index(self.items.len())
    }

    fn nested<C: NodeKind>(&mut self) -> &mut C {
        let node = C::new(self.next_path()).into_node();
        self.items.push(node);
        let index = self.items.len() - 1;
        stored(&mut self.items[index])
    }
}
