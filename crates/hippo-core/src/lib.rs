//! Configuration, secrets, and provider bootstrap shared by the hippo binary.

pub mod bootstrap;
pub mod config;
pub mod vault;
