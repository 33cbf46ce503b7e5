//! Identity directory implementations
//!
//! The realm directory and the attribute side-table the OTP lifecycle
//! writes to. Only an in-memory store ships; it can be seeded from a JSON
//! file at startup.

pub mod memory;
pub mod seed;

pub use memory::InMemoryIdentityStore;
pub use seed::{ClientSeed, DirectorySeed, RealmSeed, UserSeed};
