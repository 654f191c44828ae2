pub mod asserts;
pub mod fixtures;

pub use asserts::*;
pub use fixtures::*;
