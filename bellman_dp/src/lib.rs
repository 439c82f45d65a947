//! # bellman_dp
//! Dynamic programming solvers for finite Markov decision processes described by
//! [`MdpEnvironment`](bellman_core::env::MdpEnvironment):
//! + [`ValueIteration`](solver::ValueIteration),
//! + [`PolicyIteration`](solver::PolicyIteration),
//! + [`ModifiedPolicyIteration`](solver::ModifiedPolicyIteration).
//!
//! Every update is a batched tensor operation over all states at once.
//! ## Examples
//! Runnable examples are in `bellman_examples` crate.
//! ## Licence: MIT

/// Solver configuration.
pub mod config;
/// Bellman operators on tensors
pub mod operators;
/// Solvers and common run loop.
pub mod solver;

/// Reexports compatible [`tch`]
pub use tch;
pub use bellman_core;
