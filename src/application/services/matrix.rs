//! CSV matrix helpers: single cell lookup and summed row entropy.

use std::fs;
use std::path::Path;

use tracing::{debug, instrument};

use crate::application::{ApplicationResult, CsvResultExt, IoResultExt};
use crate::domain::DomainError;

/// Comma-delimited rows without header; rows may differ in length.
///
/// Row numbers follow physical lines: a blank line is an empty row. A quoted
/// field may span lines, in which case the record counts as one row.
pub fn read_rows(text: &str) -> ApplicationResult<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    let mut pending = String::new();
    let mut start_line = 0;

    for (i, line) in text.lines().enumerate() {
        if pending.is_empty() {
            if line.is_empty() {
                rows.push(Vec::new());
                continue;
            }
            start_line = i + 1;
        } else {
            pending.push('\n');
        }
        pending.push_str(line);

        // odd quote count: record continues on the next line
        if pending.matches('"').count() % 2 == 0 {
            rows.extend(parse_records(&pending, start_line)?);
            pending.clear();
        }
    }
    if !pending.is_empty() {
        rows.extend(parse_records(&pending, start_line)?);
    }
    Ok(rows)
}

fn parse_records(chunk: &str, line: usize) -> ApplicationResult<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(chunk.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| DomainError::at_line(line, e))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Value at zero-based `rows[row][column]`.
pub fn cell(text: &str, row: usize, column: usize) -> ApplicationResult<String> {
    read_rows(text)?
        .get(row)
        .and_then(|r| r.get(column))
        .cloned()
        .ok_or_else(|| DomainError::IndexOutOfRange { row, column }.into())
}

#[instrument(level = "debug")]
pub fn cell_in_file(path: &Path, row: usize, column: usize) -> ApplicationResult<String> {
    let text = fs::read_to_string(path).with_path_context("read csv", path)?;
    cell(&text, row, column)
}

/// Rectangular matrix of non-negative numbers.
pub fn parse_matrix(text: &str) -> ApplicationResult<Vec<Vec<f64>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut matrix = Vec::new();
    for result in reader.records() {
        let record = result.or_malformed()?;
        let line = record.position().map_or(matrix.len() + 1, |p| p.line() as usize);
        let mut values = Vec::with_capacity(record.len());
        for field in record.iter() {
            let value: f64 = field
                .parse()
                .map_err(|_| DomainError::at_line(line, format!("not a number: '{field}'")))?;
            if value < 0.0 || !value.is_finite() {
                return Err(DomainError::at_line(line, format!("not a non-negative number: {field}")).into());
            }
            values.push(value);
        }
        matrix.push(values);
    }
    Ok(matrix)
}

/// Sum over rows of `-Σ (x / n) * log2(x / n)` with `n = rows - 1`.
///
/// Zero cells contribute nothing.
pub fn matrix_entropy(matrix: &[Vec<f64>]) -> ApplicationResult<f64> {
    if matrix.len() < 2 {
        return Err(DomainError::MalformedInput(format!(
            "entropy needs at least 2 rows, found {}",
            matrix.len()
        ))
        .into());
    }
    let n = (matrix.len() - 1) as f64;

    let total: f64 = matrix
        .iter()
        .map(|row| {
            -row.iter()
                .filter(|&&x| x != 0.0)
                .map(|&x| (x / n) * (x / n).log2())
                .sum::<f64>()
        })
        .sum();
    Ok(total)
}

/// Parse CSV text and sum the entropies of all rows.
#[instrument(level = "debug", skip(text))]
pub fn row_entropy(text: &str) -> ApplicationResult<f64> {
    let matrix = parse_matrix(text)?;
    debug!("entropy over {} rows", matrix.len());
    matrix_entropy(&matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;

    #[test]
    fn given_ragged_rows_when_looking_up_then_row_then_column() {
        let text = "a,b,c\nd\ne,f\n";
        assert_eq!(cell(text, 0, 2).unwrap(), "c");
        assert_eq!(cell(text, 2, 1).unwrap(), "f");
    }

    #[test]
    fn given_blank_line_when_looking_up_then_counted_as_empty_row() {
        let text = "a\n\nb\n";
        assert_eq!(read_rows(text).unwrap(), vec![vec!["a"], vec![], vec!["b"]]);
        assert_eq!(cell(text, 2, 0).unwrap(), "b");
        assert!(matches!(
            cell(text, 1, 0),
            Err(ApplicationError::Domain(DomainError::IndexOutOfRange { row: 1, column: 0 }))
        ));
    }

    #[test]
    fn given_quoted_field_spanning_lines_when_reading_then_single_row() {
        let rows = read_rows("\"x\n\ny\",z\nw\n").unwrap();
        assert_eq!(rows, vec![vec!["x\n\ny", "z"], vec!["w"]]);
    }

    #[test]
    fn given_index_past_end_when_looking_up_then_out_of_range() {
        let err = cell("a,b\n", 0, 5).unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::IndexOutOfRange { row: 0, column: 5 })
        ));
    }

    #[test]
    fn given_one_populated_row_when_entropy_then_only_it_counts() {
        let text = "1,1,1,1\n0,0,0,0\n0,0,0,0\n0,0,0,0\n";
        let expected = 4.0 / 3.0 * 3f64.log2();
        assert!((row_entropy(text).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn given_all_zero_matrix_when_entropy_then_zero() {
        assert_eq!(row_entropy("0,0\n0,0\n").unwrap(), 0.0);
    }

    #[test]
    fn given_single_row_when_entropy_then_malformed() {
        assert!(row_entropy("1,2,3\n").is_err());
    }

    #[test]
    fn given_text_cell_when_entropy_then_malformed() {
        let err = row_entropy("1,x\n1,1\n").unwrap_err();
        assert_eq!(err.to_string(), "malformed input: line 1: not a number: 'x'");
    }
}
