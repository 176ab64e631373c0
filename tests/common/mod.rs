//! Shared test utilities for sevlog integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Fault-injecting backends live in [`faults`]; they wrap
//! the real backends and fail chosen operations on chosen streams.

#![allow(dead_code, unused_imports)]

pub mod assertions;
pub mod builders;
pub mod faults;

pub use assertions::*;
pub use builders::*;
pub use faults::*;
pub use fixtures::*;
