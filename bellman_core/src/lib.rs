//! # bellman_core
//!
//! Model side of the `bellman` solvers: trait describing finite Markov decision process
//! as dense [`tch`] tensors, tabular implementation with builder and the error types shared
//! by the workspace.
//!
//! ## Examples
//! Runnable examples are in `bellman_examples` crate.
//! ## Licence: MIT

/// Structures used for error handling.
pub mod error;
/// Environment (model) trait and tabular implementation.
pub mod env;
/// Module with demonstration environments
pub mod demo;

/// Reexports compatible [`tch`]
pub use tch;
