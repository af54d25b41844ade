pub mod abi;
pub mod eth;
pub mod helper;
pub mod table;
