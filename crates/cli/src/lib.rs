//! Command dispatcher for the earthcall agent binary.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
