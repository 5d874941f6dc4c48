//! Deterministic primitives.

pub mod hashing;
