//! Replay of recorded sample files.
//!
//! Files are JSON lines, one sample per line:
//! `{"x":0.1,"y":-0.2,"z":9.8,"timestamp":1700000000000}`. Blank lines are
//! skipped.

use crate::collector::types::Sample;
use crate::collector::CollectorError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read every sample from a JSON-lines file.
pub fn read_samples(path: &Path) -> Result<Vec<Sample>, CollectorError> {
    let file = File::open(path)?;
    read_samples_from(BufReader::new(file))
}

/// Read every sample from a buffered reader.
pub fn read_samples_from<R: BufRead>(reader: R) -> Result<Vec<Sample>, CollectorError> {
    let mut samples = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let sample: Sample =
            serde_json::from_str(trimmed).map_err(|e| CollectorError::Parse {
                line: index + 1,
                message: e.to_string(),
            })?;
        samples.push(sample);
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_lines_and_skips_blanks() {
        let input = "{\"x\":1.0,\"y\":0.0,\"z\":9.8,\"timestamp\":10}\n\
                     \n\
                     {\"x\":2.0,\"y\":0.5,\"z\":9.7,\"timestamp\":25}\n";
        let samples = read_samples_from(Cursor::new(input)).unwrap();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1], Sample::new(2.0, 0.5, 9.7, 25));
    }

    #[test]
    fn test_reports_bad_line_number() {
        let input = "{\"x\":1.0,\"y\":0.0,\"z\":9.8,\"timestamp\":10}\nnot json\n";
        match read_samples_from(Cursor::new(input)) {
            Err(CollectorError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_samples(Path::new("/nonexistent/samples.jsonl")).unwrap_err();
        assert!(matches!(err, CollectorError::Io(_)));
    }
}
