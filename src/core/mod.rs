//! # Core Module
//!
//! Concurrency primitives shared by the rest of the crate.

pub mod mt_resource;

pub use mt_resource::MtResource;
