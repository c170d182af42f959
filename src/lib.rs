//! # csx - cscope query browser
//!
//! csx runs `cscope` line-mode queries against a prebuilt symbol database,
//! parses the results into records and lets you jump to them in your
//! editor.
//!
//! ## Architecture
//!
//! - [`query`] - Process runner, line parser, result builder and the query session
//! - [`error`] - Query and directory validation errors
//! - [`tui`] - Interactive terminal UI (feature `interactive`)
//! - [`output`] - Printing records for non-interactive use
//! - [`utils`] - Configuration, logging and path handling
//!
//! ## Quick Start
//!
//! ```no_run
//! use csx::query::{Operation, QuerySession};
//!
//! let mut session: QuerySession = QuerySession::default();
//! session.set_index_directory("~/src/linux").unwrap();
//!
//! let results = session.execute_query(Operation::Definition, "schedule").unwrap();
//! for record in results.records() {
//!     println!("{}:{} {}", record.file.display(), record.line, record.context);
//! }
//!
//! // Resolve the first match to an absolute path for the editor
//! let target = session.select_record(0);
//! ```

pub mod error;
pub mod output;
pub mod query;
#[cfg(feature = "interactive")]
pub mod tui;
pub mod utils;
