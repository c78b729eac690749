mod convert;
mod types;

pub use convert::*;
pub use types::*;

#[cfg(test)]
mod convert_test;
