pub mod command;
pub mod error;
pub mod invocation;
pub mod method;
pub mod network;
