//! The query pipeline: run cscope, capture its output, parse it into records.

pub mod parser;
pub mod results;
pub mod runner;
pub mod session;
pub mod types;

pub use parser::parse_line;
pub use results::{build_records, count_lines};
pub use runner::{ProcessRunner, QueryCommand, Runner};
pub use session::QuerySession;
pub use types::{Operation, QueryRecord, ResultSet, Selection};
