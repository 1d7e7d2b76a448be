pub mod core;
pub mod mapping;
pub mod operations;

#[cfg(test)]
mod tests;

pub use core::Dao;
