use csv::ReaderBuilder;
use log::debug;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::{Frame, FrameError};

/// Loads a CSV (or, by `.tsv` extension, tab separated) file with a header row.
///
/// Every cell is kept as a trimmed `String` category.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Frame<String>, FrameError> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| FrameError::Io(format!("{}: {}", path.display(), e)))?;

    let is_tsv = path.extension().map(|e| e == "tsv").unwrap_or(false);
    let delimiter = if is_tsv { b'\t' } else { b',' };

    read_csv_from(BufReader::new(file), delimiter)
}

/// Reads delimited text with a header row from any reader.
pub fn read_csv_from<R: Read>(reader: R, delimiter: u8) -> Result<Frame<String>, FrameError> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| FrameError::Csv(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| FrameError::Csv(e.to_string()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    debug!("Read {} rows x {} columns", rows.len(), headers.len());

    Frame::from_rows(headers, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_from_reader() {
        let input = "has_link, has_attachment ,is_spam\n1,0,1\n0, 1,0\n";
        let frame = read_csv_from(input.as_bytes(), b',').unwrap();
        assert_eq!(frame.columns(), ["has_link", "has_attachment", "is_spam"]);
        assert_eq!(frame.n_rows(), 2);
        assert_eq!(frame.value(1, "has_attachment").unwrap(), "1");
    }

    #[test]
    fn test_ragged_csv_is_an_error() {
        let input = "a,b\n1,0\n1\n";
        assert!(matches!(
            read_csv_from(input.as_bytes(), b','),
            Err(FrameError::Csv(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_csv("/definitely/not/here.csv"),
            Err(FrameError::Io(_))
        ));
    }
}
