
pub use mocks::*;
