//! Altitude/density table loading.
//!
//! Tables are plain text files with one `altitude density` pair per line,
//! whitespace-separated, altitude in metres ascending, density in kg/m³.
//! Blank lines and lines starting with `#` are skipped so a header row can
//! be carried in the file.

use std::fs;
use std::path::Path;

use crate::errors::EntryError;

/// Load an altitude/density table from disk.
///
/// The file is opened, parsed and closed within this call; no handle
/// outlives it. Any line that is neither blank, a `#` comment, nor two
/// finite numeric tokens is a parse error — rows are never silently
/// dropped.
///
/// # Arguments
/// * `path` - Path to the table file
///
/// # Returns
/// Ascending (altitude, density) pairs as read from the file.
pub fn load_density_table<P: AsRef<Path>>(path: P) -> Result<Vec<(f64, f64)>, EntryError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let contents = fs::read_to_string(path).map_err(|source| EntryError::TableLoad {
        path: display.clone(),
        source,
    })?;

    let mut table = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let altitude = parse_token(tokens.next(), &display, idx + 1)?;
        let density = parse_token(tokens.next(), &display, idx + 1)?;
        if tokens.next().is_some() {
            return Err(EntryError::TableParse {
                path: display,
                line: idx + 1,
                reason: format!("expected two columns, got extra tokens in {:?}", line),
            });
        }
        if density < 0.0 {
            return Err(EntryError::TableParse {
                path: display,
                line: idx + 1,
                reason: format!("negative density {}", density),
            });
        }
        table.push((altitude, density));
    }

    if table.is_empty() {
        return Err(EntryError::TableParse {
            path: display,
            line: 0,
            reason: "no data rows".to_string(),
        });
    }

    Ok(table)
}

fn parse_token(token: Option<&str>, path: &str, line: usize) -> Result<f64, EntryError> {
    let token = token.ok_or_else(|| EntryError::TableParse {
        path: path.to_string(),
        line,
        reason: "expected two columns".to_string(),
    })?;
    let value: f64 = token.parse().map_err(|_| EntryError::TableParse {
        path: path.to_string(),
        line,
        reason: format!("not a number: {:?}", token),
    })?;
    if !value.is_finite() {
        return Err(EntryError::TableParse {
            path: path.to_string(),
            line,
            reason: format!("non-finite value: {:?}", token),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_table(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_valid_table() {
        let path = write_table(
            "entry_table_valid.txt",
            "# Altitude Density\n0.0 1.225\n1000.0 1.1\n2000.0 1.0\n",
        );
        let table = load_density_table(&path).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table[0], (0.0, 1.225));
        assert_eq!(table[2], (2000.0, 1.0));
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_density_table("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, EntryError::TableLoad { .. }));
    }

    #[test]
    fn test_load_malformed_line() {
        let path = write_table("entry_table_malformed.txt", "0.0 1.2\nbogus 1.0\n");
        let err = load_density_table(&path).unwrap_err();
        match err {
            EntryError::TableParse { line, .. } => assert_eq!(line, 2),
            other => panic!("expected TableParse, got {:?}", other),
        }
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_missing_column() {
        let path = write_table("entry_table_one_col.txt", "0.0\n");
        let err = load_density_table(&path).unwrap_err();
        assert!(matches!(err, EntryError::TableParse { .. }));
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_empty_table() {
        let path = write_table("entry_table_empty.txt", "# only a header\n\n");
        let err = load_density_table(&path).unwrap_err();
        assert!(matches!(err, EntryError::TableParse { .. }));
        fs::remove_file(path).ok();
    }
}
