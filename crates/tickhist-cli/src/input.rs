use std::fs::File;
use std::path::Path;

use crate::error::CliError;

/// Read one numeric column from a CSV file. Picks the named column when one
/// is given, otherwise the last column.
pub fn load_series(path: &Path, column: Option<&str>) -> Result<Vec<f64>, CliError> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let headers = reader.headers()?.clone();

    let index = match column {
        Some(name) => headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| {
                CliError::Command(format!("column {name:?} not found in {}", path.display()))
            })?,
        None => headers
            .len()
            .checked_sub(1)
            .ok_or_else(|| CliError::Command(format!("{} has no columns", path.display())))?,
    };

    let mut values = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cell = record.get(index).unwrap_or_default().trim();
        let value = cell
            .parse::<f64>()
            .map_err(|_| CliError::Command(format!("cannot parse {cell:?} as a number")))?;
        values.push(value);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_csv(name: &str, body: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("tickhist-input-{}-{name}.csv", std::process::id()));
        let mut file = File::create(&path).expect("temp file");
        file.write_all(body.as_bytes()).expect("write");
        path
    }

    #[test]
    fn defaults_to_last_column() {
        let path = temp_csv("last-column", "Date,Close\n2020-01-02,1.5\n2020-01-03,2.0\n");
        let values = load_series(&path, None).expect("must load");
        assert_eq!(values, vec![1.5, 2.0]);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn unknown_column_is_an_error() {
        let path = temp_csv("unknown-column", "Date,Close\n2020-01-02,1.5\n");
        let err = load_series(&path, Some("Open")).expect_err("must fail");
        assert!(matches!(err, CliError::Command(_)));
        std::fs::remove_file(path).ok();
    }
}
