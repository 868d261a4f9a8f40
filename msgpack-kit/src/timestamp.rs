//! The MessagePack timestamp extension (type -1).
use core::fmt;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use msgpack_wire::marker::NANOS_PER_SEC;

use crate::error::{ErrorKind, Result};

/// Newtype struct name that routes a [`Timestamp`] to the timestamp extension.
///
/// [`Encoder`](crate::ser::Encoder) and [`Decoder`](crate::de::Decoder)
/// recognize it; other serde formats see a newtype around 12 bytes.
pub(crate) const TIMESTAMP_TOKEN: &str = "$msgpack_kit::Timestamp";

/// Size of the payload exchanged through [`TIMESTAMP_TOKEN`]:
/// nanoseconds (u32) followed by seconds (i64), big-endian.
pub(crate) const PAYLOAD_LEN: usize = 12;

/// An instant as seconds and nanoseconds since the Unix epoch.
///
/// Instants before the epoch have negative `seconds` and a non-negative
/// `nanoseconds` part, e.g. -0.5s is `(-1, 500_000_000)`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    seconds: i64,
    nanoseconds: u32,
}

impl Timestamp {
    pub const UNIX_EPOCH: Timestamp = Timestamp { seconds: 0, nanoseconds: 0 };

    /// Create a timestamp, `nanoseconds` must be below 10^9.
    pub fn new(seconds: i64, nanoseconds: u32) -> Result<Self> {
        if nanoseconds >= NANOS_PER_SEC {
            return Err(ErrorKind::ValueOutOfRange.into())
        }
        Ok(Timestamp { seconds, nanoseconds })
    }

    pub const fn from_seconds(seconds: i64) -> Self {
        Timestamp { seconds, nanoseconds: 0 }
    }

    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    pub const fn nanoseconds(&self) -> u32 {
        self.nanoseconds
    }

    pub(crate) fn to_payload(self) -> [u8; PAYLOAD_LEN] {
        let mut payload = [0u8; PAYLOAD_LEN];
        payload[..4].copy_from_slice(&self.nanoseconds.to_be_bytes());
        payload[4..].copy_from_slice(&self.seconds.to_be_bytes());
        payload
    }

    pub(crate) fn from_payload(payload: &[u8]) -> Option<Self> {
        let payload: &[u8; PAYLOAD_LEN] = payload.try_into().ok()?;
        let (nanos, secs) = payload.split_at(4);
        let nanoseconds = u32::from_be_bytes(nanos.try_into().ok()?);
        let seconds = i64::from_be_bytes(secs.try_into().ok()?);
        Timestamp::new(seconds, nanoseconds).ok()
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl From<std::time::SystemTime> for Timestamp {
    fn from(time: std::time::SystemTime) -> Self {
        use std::time::UNIX_EPOCH;
        match time.duration_since(UNIX_EPOCH) {
            Ok(since) => Timestamp {
                seconds: since.as_secs() as i64,
                nanoseconds: since.subsec_nanos()
            },
            Err(err) => {
                let before = err.duration();
                let seconds = -(before.as_secs() as i64);
                match before.subsec_nanos() {
                    0 => Timestamp { seconds, nanoseconds: 0 },
                    nanos => Timestamp { seconds: seconds - 1, nanoseconds: NANOS_PER_SEC - nanos }
                }
            }
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl TryFrom<Timestamp> for std::time::SystemTime {
    type Error = crate::error::Error;

    fn try_from(ts: Timestamp) -> Result<Self> {
        use std::time::{Duration, UNIX_EPOCH};
        let time = if ts.seconds >= 0 {
            UNIX_EPOCH.checked_add(Duration::new(ts.seconds as u64, ts.nanoseconds))
        }
        else {
            UNIX_EPOCH.checked_sub(Duration::from_secs(ts.seconds.unsigned_abs()))
            .and_then(|t| t.checked_add(Duration::from_nanos(ts.nanoseconds.into())))
        };
        time.ok_or_else(|| ErrorKind::ValueOutOfRange.into())
    }
}

struct Payload([u8; PAYLOAD_LEN]);

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.0)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.serialize_newtype_struct(TIMESTAMP_TOKEN, &Payload(self.to_payload()))
    }
}

struct TimestampVisitor;

impl<'de> de::Visitor<'de> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a MessagePack timestamp")
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> core::result::Result<Timestamp, E> {
        Timestamp::from_payload(v)
        .ok_or_else(|| E::invalid_value(de::Unexpected::Bytes(v), &self))
    }

    fn visit_newtype_struct<D>(self, deserializer: D) -> core::result::Result<Timestamp, D::Error>
        where D: Deserializer<'de>
    {
        deserializer.deserialize_bytes(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        deserializer.deserialize_newtype_struct(TIMESTAMP_TOKEN, TimestampVisitor)
    }
}
