use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

/// cscope line-oriented query kinds (`-L<n>`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Operation {
    /// Find all occurrences of a C symbol
    #[default]
    Symbol,
    /// Find the global definition of a symbol
    Definition,
    /// Find functions called by a function
    Callees,
    /// Find functions calling a function
    Callers,
    /// Find a text string
    Text,
    /// Find an egrep pattern
    Egrep,
    /// Find a file by name
    File,
    /// Find files #including a file
    Includes,
    /// Find assignments to a symbol
    Assignments,
}

impl Operation {
    pub const ALL: [Operation; 9] = [
        Operation::Symbol,
        Operation::Definition,
        Operation::Callees,
        Operation::Callers,
        Operation::Text,
        Operation::Egrep,
        Operation::File,
        Operation::Includes,
        Operation::Assignments,
    ];

    /// Numeric code passed to cscope after `-L`. Code 5 (change text) is
    /// interactive-only and has no variant.
    pub fn code(self) -> u8 {
        match self {
            Operation::Symbol => 0,
            Operation::Definition => 1,
            Operation::Callees => 2,
            Operation::Callers => 3,
            Operation::Text => 4,
            Operation::Egrep => 6,
            Operation::File => 7,
            Operation::Includes => 8,
            Operation::Assignments => 9,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.code() == code)
    }

    /// Minibuffer prompt for this query kind
    pub fn prompt(self) -> &'static str {
        match self {
            Operation::Symbol => "Symbol: ",
            Operation::Definition => "Symbol (definition): ",
            Operation::Callees => "Functions called by: ",
            Operation::Callers => "Functions calling: ",
            Operation::Text => "Text string: ",
            Operation::Egrep => "Egrep pattern: ",
            Operation::File => "File: ",
            Operation::Includes => "Files #including: ",
            Operation::Assignments => "Assignments to: ",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Symbol => "symbol",
            Operation::Definition => "definition",
            Operation::Callees => "callees",
            Operation::Callers => "callers",
            Operation::Text => "text",
            Operation::Egrep => "egrep",
            Operation::File => "file",
            Operation::Includes => "includes",
            Operation::Assignments => "assignments",
        };
        f.write_str(name)
    }
}

/// One parsed line of cscope output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryRecord {
    /// File path relative to the index directory, byte for byte as the
    /// tool printed it
    #[serde(serialize_with = "serialize_path_lossy")]
    pub file: PathBuf,
    /// Enclosing function, or `<global>` / `<unknown>`
    pub symbol_scope: String,
    /// 1-based line number; 0 when the field was not numeric
    pub line: u32,
    /// Text of the matched line
    pub context: String,
    /// Set when any field was cut at its capacity
    pub truncated: bool,
}

fn serialize_path_lossy<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

/// Records of one query together with the output they were parsed from.
///
/// The two are only ever built together, so the raw buffer can never
/// describe a different query than the records do.
#[derive(Debug, Clone)]
pub struct ResultSet {
    pub index_directory: PathBuf,
    pub operation: Operation,
    pub symbol: String,
    raw: Vec<u8>,
    records: Vec<QueryRecord>,
}

impl ResultSet {
    pub(crate) fn new(
        index_directory: PathBuf,
        operation: Operation,
        symbol: String,
        raw: Vec<u8>,
        records: Vec<QueryRecord>,
    ) -> Self {
        Self {
            index_directory,
            operation,
            symbol,
            raw,
            records,
        }
    }

    pub fn records(&self) -> &[QueryRecord] {
        &self.records
    }

    /// Unparsed tool output, byte for byte
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Location of the record at `index`, with its file resolved against
    /// the index directory the query ran in
    pub fn selection(&self, index: usize) -> Option<Selection> {
        self.records.get(index).map(|record| Selection {
            path: self.index_directory.join(&record.file),
            line: record.line,
        })
    }
}

/// A navigable location resolved from a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub path: PathBuf,
    pub line: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_codes_round_trip() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_code(op.code()), Some(op));
        }
        assert_eq!(Operation::from_code(5), None);
        assert_eq!(Operation::from_code(10), None);
    }

    #[test]
    fn test_primary_operation_codes() {
        assert_eq!(Operation::Symbol.code(), 0);
        assert_eq!(Operation::Definition.code(), 1);
    }
}
