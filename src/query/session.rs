//! The active query context: index directory, last query, last results.

use super::results::{build_records, count_lines};
use super::runner::{ProcessRunner, QueryCommand, Runner};
use super::types::{Operation, QueryRecord, ResultSet, Selection};
use crate::error::{QueryError, ValidationError};
use crate::utils::paths::{DEFAULT_DATABASE, validate_index_directory};
use std::path::{Path, PathBuf};

/// Default indexer executable
pub const DEFAULT_TOOL: &str = "cscope";

/// One query context.
///
/// Holds at most one [`ResultSet`]. A successful query replaces it in a
/// single assignment; a failed query leaves it as it was.
pub struct QuerySession<R: Runner = ProcessRunner> {
    runner: R,
    tool: String,
    database_file: String,
    index_directory: Option<PathBuf>,
    operation: Operation,
    symbol: String,
    results: Option<ResultSet>,
}

impl QuerySession<ProcessRunner> {
    pub fn new(tool: impl Into<String>, database_file: impl Into<String>) -> Self {
        Self::with_runner(ProcessRunner, tool, database_file)
    }
}

impl Default for QuerySession<ProcessRunner> {
    fn default() -> Self {
        Self::new(DEFAULT_TOOL, DEFAULT_DATABASE)
    }
}

impl<R: Runner> QuerySession<R> {
    pub fn with_runner(
        runner: R,
        tool: impl Into<String>,
        database_file: impl Into<String>,
    ) -> Self {
        Self {
            runner,
            tool: tool.into(),
            database_file: database_file.into(),
            index_directory: None,
            operation: Operation::default(),
            symbol: String::new(),
            results: None,
        }
    }

    pub fn index_directory(&self) -> Option<&Path> {
        self.index_directory.as_deref()
    }

    pub fn database_file(&self) -> &str {
        &self.database_file
    }

    /// Validate and store the symbol directory.
    ///
    /// On failure the stored directory is cleared, so the user has to enter
    /// a new one before the next query.
    pub fn set_index_directory(&mut self, candidate: &str) -> Result<&Path, ValidationError> {
        match validate_index_directory(candidate, &self.database_file) {
            Ok(dir) => {
                tracing::debug!(dir = %dir.display(), "symbol directory set");
                Ok(self.index_directory.insert(dir).as_path())
            }
            Err(e) => {
                tracing::info!(candidate, error = %e, "symbol directory rejected");
                self.index_directory = None;
                Err(e)
            }
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Run a query against the stored symbol directory
    pub fn execute_query(
        &mut self,
        operation: Operation,
        symbol: &str,
    ) -> Result<&ResultSet, QueryError> {
        let dir = self
            .index_directory
            .clone()
            .ok_or(QueryError::NoIndexDirectory)?;
        self.execute_query_in(&dir, operation, symbol)
    }

    /// Run a query against an explicit index directory
    pub fn execute_query_in(
        &mut self,
        index_directory: &Path,
        operation: Operation,
        symbol: &str,
    ) -> Result<&ResultSet, QueryError> {
        self.operation = operation;
        self.symbol = symbol.to_string();

        let database = index_directory.join(&self.database_file);
        let command = QueryCommand::cscope(&self.tool, &database, operation, symbol);

        let raw = self.runner.run(&command).inspect_err(|e| {
            tracing::warn!(%command, error = %e, "cscope query failed");
        })?;

        let records = build_records(&raw, count_lines(&raw))?;
        let truncated = records.iter().filter(|r| r.truncated).count();
        tracing::debug!(records = records.len(), truncated, "query output parsed");

        let results = ResultSet::new(
            index_directory.to_path_buf(),
            operation,
            self.symbol.clone(),
            raw,
            records,
        );
        Ok(&*self.results.insert(results))
    }

    pub fn results(&self) -> Option<&ResultSet> {
        self.results.as_ref()
    }

    /// Records of the latest successful query (empty before the first one)
    pub fn records(&self) -> &[QueryRecord] {
        self.results.as_ref().map(ResultSet::records).unwrap_or(&[])
    }

    /// File and line to open for the record at `index`.
    ///
    /// Out-of-range indices yield `None`.
    pub fn select_record(&self, index: usize) -> Option<Selection> {
        self.results.as_ref()?.selection(index)
    }
}
