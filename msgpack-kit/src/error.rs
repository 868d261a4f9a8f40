use alloc::string::{String, ToString};
use core::fmt;
use core::str::Utf8Error;
use serde::{de, ser};
use msgpack_wire::WireError;

use crate::path::Path;

/// Codec result
pub type Result<T> = core::result::Result<T, Error>;

/// What went wrong
#[derive(Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A read went past the end of the data
    UnexpectedEndOfData,
    /// The format tag can not be decoded as the requested type
    TypeMismatch { tag: u8, expected: &'static str },
    /// A keyed lookup missed
    KeyNotFound,
    /// A string payload is not valid UTF-8
    InvalidUtf8,
    /// A number does not fit the requested type or a length exceeds 32 bits
    ValueOutOfRange,
    /// A single value container was written to twice
    AlreadyEncoded,
    /// A second root container was requested from one encoder or decoder
    ContainerAlreadyCreated,
    /// A keyed or unkeyed view was requested of a value of another shape
    UnsupportedShape { tag: u8, expected: &'static str },
    /// A map key did not serialize as a string
    KeyMustBeString,
    /// A fixed-size type left array elements undecoded
    TrailingElements,
    /// Bytes follow the decoded value
    TrailingBytes,
    /// The output sink is full
    BufferFull,
    /// An error raised by a `Serialize` or `Deserialize` implementation
    Custom(String),
}

/// Codec error: an [`ErrorKind`] and the [`Path`] where it occurred.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Error {
    kind: ErrorKind,
    path: Path,
}

impl Error {
    pub fn new(kind: ErrorKind, path: Path) -> Self {
        Error { kind, path }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }

    /// Attach `path` unless the error already carries a location.
    pub(crate) fn or_path(mut self, path: &Path) -> Self {
        if self.path.is_root() {
            self.path = path.clone();
        }
        self
    }
}

impl ErrorKind {
    /// Locate this error at `path`.
    pub(crate) fn at(self, path: &Path) -> Error {
        Error::new(self, path.clone())
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::new(kind, Path::root())
    }
}

impl From<WireError> for ErrorKind {
    fn from(err: WireError) -> Self {
        match err {
            WireError::UnexpectedEndOfData => ErrorKind::UnexpectedEndOfData,
            WireError::BufferFull => ErrorKind::BufferFull,
            WireError::ValueOutOfRange => ErrorKind::ValueOutOfRange,
            _ => ErrorKind::Custom(err.to_string())
        }
    }
}

impl From<WireError> for Error {
    fn from(err: WireError) -> Self {
        ErrorKind::from(err).into()
    }
}

impl From<Utf8Error> for ErrorKind {
    fn from(_err: Utf8Error) -> Self {
        ErrorKind::InvalidUtf8
    }
}

impl serde::de::StdError for Error {}

impl de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        ErrorKind::Custom(msg.to_string()).into()
    }
}

impl ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        ErrorKind::Custom(msg.to_string()).into()
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::UnexpectedEndOfData => f.write_str("Unexpected end of MessagePack data"),
            ErrorKind::TypeMismatch { tag, expected } => {
                write!(f, "Invalid format 0x{:02x}, expected {}", tag, expected)
            }
            ErrorKind::KeyNotFound => f.write_str("Key not found"),
            ErrorKind::InvalidUtf8 => f.write_str("Invalid UTF-8 in MessagePack string"),
            ErrorKind::ValueOutOfRange => f.write_str("Value out of range"),
            ErrorKind::AlreadyEncoded => f.write_str("Single value container already encoded"),
            ErrorKind::ContainerAlreadyCreated => f.write_str("Root container already created"),
            ErrorKind::UnsupportedShape { tag, expected } => {
                write!(f, "Can not view format 0x{:02x} as {}", tag, expected)
            }
            ErrorKind::KeyMustBeString => f.write_str("Map key must be a string"),
            ErrorKind::TrailingElements => f.write_str("Too many elements for a deserialized type"),
            ErrorKind::TrailingBytes => f.write_str("Trailing bytes after MessagePack value"),
            ErrorKind::BufferFull => f.write_str("Buffer is full"),
            ErrorKind::Custom(s) => f.write_str(s),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.path)
    }
}
