//! # bellman_examples
//! Command line front end for `bellman_dp` solvers: option parsing, logger setup,
//! loading environment descriptions from files and running chosen algorithm.
//! ## Licence: MIT

pub mod setup;
pub mod options;
pub mod error;
pub mod loading;
pub mod runner;
