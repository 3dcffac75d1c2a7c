//! Core types shared across containstate facilities
//!
//! This crate provides foundational types used by the comparator,
//! its error facility and its logging facility:
//!
//! - **Type identity**: TypeKey, the runtime identity used for atomic classification
//! - **Path segments**: Segment, one step of a failure location
//! - **Schema constants**: Canonical field keys and event names

pub mod schema;
pub mod segment;
pub mod type_key;

pub use segment::Segment;
pub use type_key::TypeKey;
