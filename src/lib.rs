//! This is the library of the label-toggle action.
pub mod config;
pub mod github;
pub mod permissions;
pub mod toggle;
pub mod utils;

#[cfg(test)]
mod tests;
