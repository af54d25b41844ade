pub mod history;
pub mod parser;
pub mod registry;

pub use history::CommandHistory;
pub use parser::{parse_line, tokenize};
pub use registry::CommandRegistry;
