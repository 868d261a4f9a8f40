//! A MessagePack codec built from a tree of encode and decode containers, with serde integration.
/*!

Encoding buffers the value as a tree of [`EncodeNode`]s and writes it out
on demand. Map keys are kept sorted, so equal values always produce equal
bytes. Decoding never copies: every container borrows exactly the byte range
of one encoded value and finds its children lazily, once.

[`Encoder`] and [`Decoder`] implement the serde traits on top of the
containers. The containers are public too and can be driven by hand.

[`Encoder`] types:

| Serde type ->     | MessagePack type
|-------------------|--------------------
| `()`              | `nil`
| `Unit` struct     | `nil`
| `bool`            | `bool`
| `NewType(T)`      | `T` -> `MessagePack`
| `None`            | `nil`
| `Some(T)`         | `T` -> `MessagePack`
| `u8`-`u64`        | `uint` (smallest representation)
| `i8`-`i64`        | `int`, `uint` (sm. repr.)
| `f32`             | `float-32`
| `f64`             | `float-64`
| `char`, `str`     | `str`
| `bytes`           | `bin`
| [`Timestamp`]     | `timestamp` extension (type -1, sm. repr.)
| `array`, `tuple`  | `array`
| `seq`-like        | `array`
| `map`-like        | `map`, keys in byte-wise order
| `struct`          | `map`, field names in byte-wise order
| `unit variant`    | `str`
| `newtype variant` | `fixmap:1` `str`, `T`
| `tuple variant`   | `fixmap:1` `str`, `array`
| `struct variant`  | `fixmap:1` `str`, `map`

Map keys must serialize as strings.

[`Decoder`] supports self-describing formats (`deserialize_any`).

[`Decoder`] types:

| MessagePack type -> | Serde type (depending on context)
|---------------------|----------------------------------------
| `nil`               | `unit`,`none`
| `bool`              | `bool`
| `fixint`, `int`     | `u8`-`u64`,`i8`-`i64` (when the value fits)
| `float-32`          | `f32`, `f64`
| `float-64`          | `f64`, `f32` (when exact)
| `str`               | `str`, `char`, `enum variant`
| `bin`               | `bytes` (`&[u8]`, `Vec<u8>`)
| `timestamp`         | [`Timestamp`]
| `array`             | `array`,`tuple`,`tuple struct`,`seq-like`
| `map`               | `enum variant`,`map-like`,`struct`
| `T`                 | `NewType(T)`, `Some(T)`
| `fixext`, `ext`     | skipped when a struct field is ignored

Every error carries the [`Path`] of the container where it occurred.

```
use serde::{Serialize, Deserialize};
use msgpack_kit::{to_vec, from_slice};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Runway<'a> {
    direction: &'a str,
    distance: u32,
}

let runway = Runway { direction: "3/21", distance: 1829 };
let bytes = to_vec(&runway).unwrap();
assert_eq!(bytes, b"\x82\xa9direction\xa43/21\xa8distance\xcd\x07\x25");
assert_eq!(from_slice::<Runway>(&bytes).unwrap(), runway);
```
*/
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod tracing_macros;

pub mod error;
pub mod path;
pub mod timestamp;
pub mod decode;
pub mod encode;
pub mod ser;
pub mod de;

pub use msgpack_wire;
pub use msgpack_wire::WireWrite;

pub use error::{Error, ErrorKind, Result};
pub use path::{Path, PathSegment};
pub use timestamp::Timestamp;
pub use decode::{
    DecodeContainer,
    KeyedDecodeContainer,
    UnkeyedDecodeContainer,
    SingleValueDecodeContainer
};
pub use encode::{
    EncodeNode,
    KeyedEncodeContainer,
    UnkeyedEncodeContainer,
    SingleValueEncodeContainer
};
pub use ser::{Encoder, to_vec, to_writer};
pub use de::{Decoder, from_slice, from_slice_split_tail};
