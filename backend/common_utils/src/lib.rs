//! Utilities shared by every crate of the BPOINT connector workspace.

pub mod consts;
pub mod errors;
pub mod fp_utils;
pub mod types;

pub use errors::CustomResult;
