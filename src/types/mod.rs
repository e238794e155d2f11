//! Core types for the order kernel.

pub mod vertex;
pub mod outcome;
pub mod stats;

pub use vertex::{Order, VertexData};
pub use outcome::{EdgeCheck, OrderViolation};
pub use stats::MaintainerStats;
