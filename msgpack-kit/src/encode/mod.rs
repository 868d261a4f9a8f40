//! Encode container tree.
//!
//! Containers buffer their children and are serialized top-down, on demand,
//! by [`EncodeNode::write_to`].
use msgpack_wire::WireWrite;

use crate::error::Result;
use crate::path::Path;

mod keyed;
mod single;
mod unkeyed;

pub use keyed::KeyedEncodeContainer;
pub use single::SingleValueEncodeContainer;
pub use unkeyed::UnkeyedEncodeContainer;

/// A node of the encode tree.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodeNode {
    SingleValue(SingleValueEncodeContainer),
    Keyed(KeyedEncodeContainer),
    Unkeyed(UnkeyedEncodeContainer),
}

impl EncodeNode {
    /// Write the MessagePack representation of this node and all of its children.
    pub fn write_to<W: WireWrite>(&self, output: &mut W) -> Result<()> {
        match self {
            EncodeNode::SingleValue(container) => container.write_to(output),
            EncodeNode::Keyed(container) => container.write_to(output),
            EncodeNode::Unkeyed(container) => container.write_to(output),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            EncodeNode::SingleValue(container) => container.path(),
            EncodeNode::Keyed(container) => container.path(),
            EncodeNode::Unkeyed(container) => container.path(),
        }
    }
}

/// A container kind that can be stored in the tree and borrowed back out of it.
pub(crate) trait NodeKind: Sized {
    fn new(path: Path) -> Self;
    fn into_node(self) -> EncodeNode;
    fn from_node_mut(node: &mut EncodeNode) -> Option<&mut Self>;
}

macro_rules! impl_node_kind {
    ($($variant:ident => $container:ty),*) => {$(
        impl NodeKind for $container {
            fn new(path: Path) -> Self {
                <$container>::new(path)
            }

            fn into_node(self) -> EncodeNode {
                EncodeNode::$variant(self)
            }

            fn from_node_mut(node: &mut EncodeNode) -> Option<&mut Self> {
                match node {
                    EncodeNode::$variant(container) => Some(container),
                    _ => None
                }
            }
        }
    )*};
}

impl_node_kind!(
    SingleValue => SingleValueEncodeContainer,
    Keyed => KeyedEncodeContainer,
    Unkeyed => UnkeyedEncodeContainer
);

/// Borrow a node that has just been stored in the tree as its container kind.
pub(crate) fn stored<C: NodeKind>(node: &mut EncodeNode) -> &mut C {
    match C::from_node_mut(node) {
        Some(container) => container,
        None => unreachable!("a stored node changed its kind")
    }
}
