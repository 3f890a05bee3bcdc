//! CLI command implementations.
//!
//! This module contains the implementation of each CLI command.

pub mod actor;
pub mod config;
pub mod hex_utils;
pub mod hexdump;
pub mod inspect;
pub mod resolve;
pub mod session;
