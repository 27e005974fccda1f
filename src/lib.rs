//! BCN CLI Library
//!
//! Client, cache and formatting layers for the bconomy game API. The binary
//! in `main.rs` only parses arguments and wires these together.

pub mod cache;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod data;
pub mod format;
pub mod render;
