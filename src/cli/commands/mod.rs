//! Command implementations

mod generate;

pub use generate::generate;
