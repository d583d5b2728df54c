//! # shipdeck-id
//!
//! Typed resource IDs for the shipdeck demo platform.
//!
//! All IDs use a prefixed format, `{prefix}_{ulid}`:
//!
//! - `pkg_01JD2X8WQXKJNM8GPQY6VBKC3D` — a schedulable package
//! - `shp_01JD2X9MXNKPQR9HSTZ7WCLD4E` — a booked shipment
//! - `sess_01JD2XANYPLTRS0JTUA8XDME5F` — a visitor session
//!
//! Prefixes keep resource types from being mixed up at API boundaries, the
//! ULID payload keeps IDs time-sortable, and parsing is strict: an ID string
//! either roundtrips exactly or it is rejected.

mod error;
mod macros;
mod types;

pub use error::IdError;
pub use types::*;

/// Re-export ulid for consumers that need raw ULID operations.
pub use ulid::Ulid;
