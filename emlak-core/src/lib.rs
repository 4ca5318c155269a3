//! Emlak Core - Geographic Reference Types
//!
//! Pure data structures shared by the resolver and API crates: address
//! components, the normalized hierarchy key tuple, and the error taxonomy.
//! This crate contains no I/O.

pub mod address;
pub mod error;
pub mod key;

pub use address::{AddressComponent, ComponentKind, Coordinates};
pub use error::{EmlakError, EmlakResult, ProviderError, ValidationError};
pub use key::GeoKey;
