use super::parser::parse_line;
use super::types::QueryRecord;
use crate::error::QueryError;
use memchr::memchr_iter;

/// Count the lines a buffer would occupy once written out: one per
/// newline, plus one for an unterminated last line.
pub fn count_lines(raw: &[u8]) -> usize {
    let newlines = memchr_iter(b'\n', raw).count();
    match raw.last() {
        Some(b'\n') | None => newlines,
        Some(_) => newlines + 1,
    }
}

/// Split raw output on newlines and parse every non-empty line, in order.
///
/// `line_count` bounds the number of records produced; lines beyond it are
/// ignored. Pass [`count_lines`] of the same buffer to keep every line.
pub fn build_records(raw: &[u8], line_count: usize) -> Result<Vec<QueryRecord>, QueryError> {
    let mut records = Vec::new();
    records
        .try_reserve_exact(line_count)
        .map_err(|_| QueryError::OutOfMemory)?;

    for line in raw.split(|&b| b == b'\n').filter(|l| !l.is_empty()) {
        if records.len() == line_count {
            tracing::debug!(line_count, "output has more lines than the sizing hint");
            break;
        }
        records.push(parse_line(line));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_lines() {
        assert_eq!(count_lines(b""), 0);
        assert_eq!(count_lines(b"a\n"), 1);
        assert_eq!(count_lines(b"a\nb"), 2);
        assert_eq!(count_lines(b"a\nb\n"), 2);
        assert_eq!(count_lines(b"\n\n"), 2);
    }

    #[test]
    fn test_build_preserves_order() {
        let raw = b"z.c f 3 third\na.c g 1 first\nm.c h 2 second\n";

        let records = build_records(raw, count_lines(raw)).unwrap();

        assert_eq!(records.len(), 3);
        let files: Vec<&str> = records.iter().map(|r| r.file.to_str().unwrap()).collect();
        assert_eq!(files, ["z.c", "a.c", "m.c"]);
        assert_eq!(records[2].line, 2);
    }

    #[test]
    fn test_build_many_lines() {
        let raw: String = (1..=250)
            .map(|i| format!("src/f{i}.c fn{i} {i} call_{i}();\n"))
            .collect();

        let records = build_records(raw.as_bytes(), count_lines(raw.as_bytes())).unwrap();

        assert_eq!(records.len(), 250);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.line as usize, i + 1);
        }
    }

    #[test]
    fn test_empty_output_gives_no_records() {
        assert!(build_records(b"", 0).unwrap().is_empty());
    }

    #[test]
    fn test_blank_lines_skipped() {
        let raw = b"\na.c f 1 x\n\n\nb.c g 2 y\n";

        let records = build_records(raw, count_lines(raw)).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].file, std::path::Path::new("b.c"));
    }

    #[test]
    fn test_unterminated_last_line_kept() {
        let raw = b"a.c f 1 x\nb.c g 2 y";

        let records = build_records(raw, count_lines(raw)).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].context, "y");
    }

    #[test]
    fn test_line_count_is_an_upper_bound() {
        let raw = b"a.c f 1 x\nb.c g 2 y\nc.c h 3 z\n";

        let records = build_records(raw, 2).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].file, std::path::Path::new("b.c"));
    }
}
