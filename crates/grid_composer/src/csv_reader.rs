use crate::category::Category;
use crate::constants::{
    EXPECTED_CATEGORY_HEADER, EXPECTED_DURATION_HEADER, EXPECTED_INTENSITY_HEADER,
    EXPECTED_URGENT_HEADER,
};
use crate::error::{ComposeError, Result};
use crate::scoring::{IntensityLevel, Item, ItemsByCategory};

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const EXPECTED_HEADERS: [&str; 4] = [
    EXPECTED_CATEGORY_HEADER,
    EXPECTED_DURATION_HEADER,
    EXPECTED_URGENT_HEADER,
    EXPECTED_INTENSITY_HEADER,
];

/// Reads items from a CSV file
///
/// # Errors
/// Returns error if the file cannot be read or a row is malformed
pub fn read_items_csv<P: AsRef<Path>>(path: P) -> Result<ItemsByCategory> {
    let file = std::fs::File::open(path)?;
    read_items_from_reader(file)
}

/// Reads and merges all CSV files from a directory
///
/// Files are read in file-name order so the merged item lists are stable.
/// Unreadable files are skipped with a warning.
///
/// # Errors
/// Returns error if the directory cannot be read or no valid CSV file is found
pub fn read_items_from_directory<P: AsRef<Path>>(dir_path: P) -> Result<ItemsByCategory> {
    let dir_path = dir_path.as_ref();

    if !dir_path.exists() {
        return Err(ComposeError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Directory does not exist: {}", dir_path.display()),
        )));
    }

    if !dir_path.is_dir() {
        return Err(ComposeError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Path is not a directory: {}", dir_path.display()),
        )));
    }

    let mut csv_paths: Vec<PathBuf> = Vec::new();
    for entry in std::fs::read_dir(dir_path)? {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("csv") {
            csv_paths.push(path);
        }
    }
    csv_paths.sort();

    let mut merged = ItemsByCategory::new();
    let mut csv_files_processed = 0;

    for path in &csv_paths {
        match read_items_csv(path) {
            Ok(items) => {
                debug!(
                    "{}: {} items",
                    path.display(),
                    items.values().map(Vec::len).sum::<usize>()
                );
                merge_items(&mut merged, items);
                csv_files_processed += 1;
            }
            Err(e) => {
                warn!("Failed to read CSV file {}: {}", path.display(), e);
            }
        }
    }

    if csv_files_processed == 0 {
        return Err(ComposeError::Other(format!(
            "No valid CSV files found in directory: {}",
            dir_path.display()
        )));
    }

    Ok(merged)
}

/// Reads a file or, if `path` is a directory, every CSV file inside it
pub fn read_items<P: AsRef<Path>>(path: P) -> Result<ItemsByCategory> {
    let path = path.as_ref();
    if path.is_dir() {
        read_items_from_directory(path)
    } else {
        read_items_csv(path)
    }
}

/// Appends `other` to `into`, keeping per-category item order
pub fn merge_items(into: &mut ItemsByCategory, other: ItemsByCategory) {
    for (category, items) in other {
        into.entry(category).or_default().extend(items);
    }
}

/// Read CSV with `Category,Duration,Urgent,Intensity` format.
/// - blank lines are skipped
/// - extra trailing columns are ignored
/// - an unknown category is an error
pub fn read_items_from_reader<R: Read>(reader: R) -> Result<ItemsByCategory> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true) // allow additional columns
        .from_reader(reader);

    validate_csv_headers(&mut rdr)?;

    let mut items = ItemsByCategory::new();

    for (i, result) in rdr.records().enumerate() {
        let rec = result?;
        let row = i + 2; // CSV rows are 1-indexed, +1 for header

        if let Some((category, item)) = parse_record(&rec, row)? {
            items.entry(category).or_default().push(item);
        }
    }

    Ok(items)
}

/// Validates CSV headers match expected format
fn validate_csv_headers<R: Read>(csv_reader: &mut csv::Reader<R>) -> Result<()> {
    let headers = csv_reader
        .headers()
        .map_err(|e| ComposeError::CsvHeader(format!("Failed to read headers: {}", e)))?;

    for (index, expected) in EXPECTED_HEADERS.iter().enumerate() {
        let found = headers.get(index).ok_or_else(|| {
            ComposeError::CsvHeader(format!("Missing {} column at index {}", expected, index))
        })?;
        if !found.eq_ignore_ascii_case(expected) {
            return Err(ComposeError::CsvHeader(format!(
                "Expected '{}' in column {}, found '{}'",
                expected, index, found
            )));
        }
    }

    Ok(())
}

fn parse_record(rec: &StringRecord, row: usize) -> Result<Option<(Category, Item)>> {
    if rec.iter().all(|f| f.trim().is_empty()) {
        return Ok(None);
    }

    let label = get_column_value(rec, 0, row)?;
    let duration_str = get_column_value(rec, 1, row)?;
    let urgent_str = get_column_value(rec, 2, row)?;
    let intensity_str = get_column_value(rec, 3, row)?;

    let category = Category::from_str(label).map_err(|_| ComposeError::UnknownCategory {
        row,
        label: label.to_string(),
    })?;

    let item = Item {
        duration_minutes: parse_duration_value(duration_str, row)?,
        is_urgent: parse_urgent_value(urgent_str, row)?,
        intensity: parse_intensity_value(intensity_str, row)?,
    };

    Ok(Some((category, item)))
}

/// Safely extracts a column value from a CSV record
fn get_column_value(record: &StringRecord, column_index: usize, row_number: usize) -> Result<&str> {
    record
        .get(column_index)
        .map(str::trim)
        .ok_or_else(|| ComposeError::CsvRow {
            row: row_number,
            expected: EXPECTED_HEADERS.len(),
            got: record.len(),
        })
}

fn parse_duration_value(duration_str: &str, row_number: usize) -> Result<u32> {
    duration_str
        .parse()
        .map_err(|parse_error| ComposeError::DurationParse {
            row: row_number,
            value: duration_str.to_string(),
            source: parse_error,
        })
}

fn parse_urgent_value(urgent_str: &str, row_number: usize) -> Result<bool> {
    match urgent_str.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(ComposeError::UrgencyParse {
            row: row_number,
            value: urgent_str.to_string(),
        }),
    }
}

/// Number in [0, 1] or a level name
fn parse_intensity_value(intensity_str: &str, row_number: usize) -> Result<f64> {
    if let Ok(level) = IntensityLevel::from_str(intensity_str) {
        return Ok(level.intensity());
    }
    match intensity_str.parse::<f64>() {
        Ok(v) if v.is_finite() && (0.0..=1.0).contains(&v) => Ok(v),
        _ => Err(ComposeError::IntensityParse {
            row: row_number,
            value: intensity_str.to_string(),
        }),
    }
}
