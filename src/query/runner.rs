//! Running the indexer as a child process and capturing its output.

use crate::error::QueryError;
use std::ffi::OsString;
use std::fmt;
use std::io::{self, Read};
use std::path::Path;
use std::process::{Command, Stdio};

use super::types::Operation;

/// Read granularity for child output
pub const CHUNK_SIZE: usize = 1024;

/// A program and its argument vector.
///
/// Arguments are handed to the OS as-is; no shell ever sees them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryCommand {
    pub program: String,
    pub args: Vec<OsString>,
}

impl QueryCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// `<tool> -p8 -d -f <database> -L<code> <symbol>`
    pub fn cscope(tool: &str, database: &Path, operation: Operation, symbol: &str) -> Self {
        Self::new(tool)
            .arg("-p8")
            .arg("-d")
            .arg("-f")
            .arg(database)
            .arg(format!("-L{}", operation.code()))
            .arg(symbol)
    }
}

impl fmt::Display for QueryCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Executes a query command and returns everything it wrote to stdout
pub trait Runner {
    fn run(&self, command: &QueryCommand) -> Result<Vec<u8>, QueryError>;
}

/// Spawns the command as a real child process.
///
/// The exit status is ignored: only the output stream matters. The child
/// is always reaped before returning, and killed first if reading failed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl Runner for ProcessRunner {
    fn run(&self, command: &QueryCommand) -> Result<Vec<u8>, QueryError> {
        tracing::debug!(%command, "spawning query");

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| QueryError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        let result = match child.stdout.take() {
            Some(mut stdout) => read_chunked(&mut stdout),
            None => Err(QueryError::StreamRead(io::Error::other(
                "child stdout was not captured",
            ))),
        };

        if result.is_err() {
            let _ = child.kill();
        }
        let _ = child.wait();

        if let Ok(ref output) = result {
            tracing::debug!(bytes = output.len(), "query output captured");
        }
        result
    }
}

/// Read a stream to its end in [`CHUNK_SIZE`] steps.
///
/// Room for a full chunk is reserved before every read, so nothing is lost
/// however long the output is. A read error discards what was buffered so
/// far, and a stream that ends without producing a byte is
/// [`QueryError::EmptyResult`].
pub fn read_chunked<R: Read>(reader: &mut R) -> Result<Vec<u8>, QueryError> {
    let mut buf: Vec<u8> = Vec::new();

    loop {
        let start = buf.len();
        buf.try_reserve(CHUNK_SIZE)
            .map_err(|_| QueryError::OutOfMemory)?;
        buf.resize(start + CHUNK_SIZE, 0);

        let read = loop {
            match reader.read(&mut buf[start..]) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(QueryError::StreamRead(e)),
            }
        };

        buf.truncate(start + read);
        if read == 0 {
            break;
        }
    }

    if buf.is_empty() {
        return Err(QueryError::EmptyResult);
    }

    buf.shrink_to_fit();
    Ok(buf)
}
