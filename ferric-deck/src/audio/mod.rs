//! Audio backend boundary
//!
//! The engine depends only on the [`AudioBackend`]/[`AudioHandle`] contract,
//! never on a concrete audio library, so output implementations can be
//! substituted (including the recording mock used by the test suite).

mod backend;

pub use backend::{AudioBackend, AudioHandle, AudioStatus};
