pub mod identity;

pub use identity::{AttributeStore, IdentityDirectory};

#[cfg(test)]
pub use identity::MockIdentityDirectory;
