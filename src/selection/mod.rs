mod predicate;
pub use predicate::*;

#[cfg(test)]
mod predicate_test;
