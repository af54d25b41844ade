//! Contract Console
//!
//! An interactive console for browsing and calling the read methods of a
//! deployed smart contract.

pub mod commands;
pub mod config;
pub mod interactive;
pub mod types;
pub mod utils;
