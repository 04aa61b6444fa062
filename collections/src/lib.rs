//! Two-way unique mapping collections: pairings, the bijection contract, a
//! map-backed implementation, and a read-only wrapper.

pub mod bijection;
pub mod error;
pub mod index;
pub mod pairing;
pub mod read_only;

pub use bijection::{Bijection, HashBijection, MapBijection, OrdBijection};
pub use error::{Error, Result};
pub use index::MapIndex;
pub use pairing::{Pairing, Side};
pub use read_only::ReadOnly;
