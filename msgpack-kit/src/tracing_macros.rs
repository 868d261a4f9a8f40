//! Container tree events, forwarded to `tracing` only with the `tracing` feature.
//!
//! Arguments use the `tracing` field syntax, e.g. `trace!(path = %path, "...")`.

/// Container creation.
macro_rules! trace {
    ($($event:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::trace!($($event)*);
    };
}

/// Container scans and finished trees.
macro_rules! debug {
    ($($event:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($event)*);
    };
}

pub(crate) use {debug, trace};
