//! Output formatting for non-interactive queries

use crate::query::QueryRecord;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Print records grep-style: `path:line: scope  context`
pub fn print_records(records: &[QueryRecord], color: bool) -> io::Result<()> {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);
    write_records(&mut stdout, records)
}

pub fn write_records<W: WriteColor>(out: &mut W, records: &[QueryRecord]) -> io::Result<()> {
    for record in records {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(out, "{}", record.file.display())?;
        out.reset()?;
        write!(out, ":")?;

        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, "{}", record.line)?;
        out.reset()?;
        write!(out, ": ")?;

        out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        write!(out, "{}", record.symbol_scope)?;
        out.reset()?;

        writeln!(out, "  {}", record.context)?;
    }

    Ok(())
}

/// Print records as a JSON array
pub fn print_json(records: &[QueryRecord]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, records)?;
    writeln!(stdout)
}

/// Print the tool's output exactly as captured
pub fn print_raw(raw: &[u8]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(raw)?;
    stdout.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcolor::Buffer;

    #[test]
    fn test_write_records_plain() {
        let records = vec![
            QueryRecord {
                file: "src/foo.c".into(),
                symbol_scope: "main".to_string(),
                line: 42,
                context: "int foo(void) {".to_string(),
                truncated: false,
            },
            QueryRecord {
                file: "include/foo.h".into(),
                symbol_scope: "<global>".to_string(),
                line: 3,
                context: "int foo(void);".to_string(),
                truncated: false,
            },
        ];
        let mut buf = Buffer::no_color();

        write_records(&mut buf, &records).unwrap();

        assert_eq!(
            String::from_utf8(buf.into_inner()).unwrap(),
            "src/foo.c:42: main  int foo(void) {\ninclude/foo.h:3: <global>  int foo(void);\n"
        );
    }
}
