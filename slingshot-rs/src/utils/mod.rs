//! Shared utilities for the slingshot-rs CLI

pub mod table;

pub use table::*;
