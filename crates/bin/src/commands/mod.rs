//! Command implementations for the stockroom binary.

pub mod catalog;
pub mod complaints;
pub mod identity;
pub mod reviews;
