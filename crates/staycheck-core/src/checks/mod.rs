//! The six data quality checks.
//!
//! Each check is a pure function over already-ingested tables. `Ok(())` is a
//! pass; `Err` carries the assertion-style diagnostic for the failure. Checks
//! never mutate their inputs and stop at their own first violated row, so the
//! error always names the earliest offending record.

pub mod drift;

pub use drift::check_drift;

use arrow::array::{Array, Float64Array};

use crate::errors::CheckError;
use crate::schema;
use crate::table::ListingTable;

/// Column names and order must match the fixed sixteen-column schema.
///
/// Any renaming, reordering, addition or omission fails.
pub fn check_columns(table: &ListingTable) -> Result<(), CheckError> {
    let actual = table.column_names();
    tracing::info!(
        name = table.name(),
        expected = ?schema::EXPECTED_COLUMNS,
        actual = ?actual,
        "checking column layout"
    );

    if actual.iter().map(String::as_str).eq(schema::EXPECTED_COLUMNS) {
        Ok(())
    } else {
        Err(CheckError::Schema {
            expected: schema::EXPECTED_COLUMNS
                .iter()
                .map(|c| c.to_string())
                .collect(),
            actual,
        })
    }
}

/// Distinct `neighbourhood_group` values must be exactly the five boroughs.
///
/// Both a missing borough and an unexpected value (nulls included) fail.
pub fn check_categories(table: &ListingTable) -> Result<(), CheckError> {
    let groups = table.string_column("neighbourhood_group")?;

    let mut present: Vec<&str> = Vec::new();
    for value in groups.iter().flatten() {
        if !present.contains(&value) {
            present.push(value);
        }
    }
    present.sort_unstable();

    let mut unexpected: Vec<String> = present
        .iter()
        .filter(|v| !schema::KNOWN_BOROUGHS.contains(v))
        .map(|v| v.to_string())
        .collect();
    if groups.null_count() > 0 {
        unexpected.push("(null)".to_string());
    }
    let missing: Vec<String> = schema::KNOWN_BOROUGHS
        .iter()
        .filter(|b| !present.contains(b))
        .map(|b| b.to_string())
        .collect();

    tracing::info!(
        name = table.name(),
        expected = ?schema::KNOWN_BOROUGHS,
        actual = ?present,
        "checking neighbourhood groups"
    );

    if unexpected.is_empty() && missing.is_empty() {
        Ok(())
    } else {
        Err(CheckError::Category {
            unexpected,
            missing,
        })
    }
}

/// Every record must carry coordinates inside the NYC bounding box.
///
/// A single out-of-range or null coordinate fails the whole table.
pub fn check_bounds(table: &ListingTable) -> Result<(), CheckError> {
    let longitudes = table.float_column("longitude")?;
    let latitudes = table.float_column("latitude")?;

    tracing::info!(
        name = table.name(),
        lon_min = schema::LON_MIN,
        lon_max = schema::LON_MAX,
        lat_min = schema::LAT_MIN,
        lat_max = schema::LAT_MAX,
        rows = table.num_rows(),
        "checking geographic boundaries"
    );

    for row in 0..table.num_rows() {
        let lon = value_or_nan(longitudes, row);
        if !(schema::LON_MIN..=schema::LON_MAX).contains(&lon) {
            return Err(CheckError::ValueRange {
                column: "longitude",
                row,
                value: lon,
                min: schema::LON_MIN,
                max: schema::LON_MAX,
            });
        }
        let lat = value_or_nan(latitudes, row);
        if !(schema::LAT_MIN..=schema::LAT_MAX).contains(&lat) {
            return Err(CheckError::ValueRange {
                column: "latitude",
                row,
                value: lat,
                min: schema::LAT_MIN,
                max: schema::LAT_MAX,
            });
        }
    }
    Ok(())
}

/// Row count must be strictly between the expected bounds.
///
/// The boundary values themselves fail.
pub fn check_row_count(table: &ListingTable) -> Result<(), CheckError> {
    let rows = table.num_rows();
    tracing::info!(
        name = table.name(),
        rows,
        min = schema::MIN_ROWS,
        max = schema::MAX_ROWS,
        "checking row count"
    );

    if rows > schema::MIN_ROWS && rows < schema::MAX_ROWS {
        Ok(())
    } else {
        Err(CheckError::Size {
            rows,
            min: schema::MIN_ROWS,
            max: schema::MAX_ROWS,
        })
    }
}

/// Every record must carry a price inside `[min_price, max_price]`.
///
/// Bounds are inclusive; a null price fails.
pub fn check_price_range(
    table: &ListingTable,
    min_price: f64,
    max_price: f64,
) -> Result<(), CheckError> {
    let prices = table.float_column("price")?;

    tracing::info!(
        name = table.name(),
        min_price,
        max_price,
        rows = table.num_rows(),
        "checking price range"
    );

    for row in 0..table.num_rows() {
        let price = value_or_nan(prices, row);
        if !(min_price..=max_price).contains(&price) {
            return Err(CheckError::ValueRange {
                column: "price",
                row,
                value: price,
                min: min_price,
                max: max_price,
            });
        }
    }
    Ok(())
}

/// Null cells fail range checks the same way NaN does.
fn value_or_nan(array: &Float64Array, row: usize) -> f64 {
    if array.is_null(row) {
        f64::NAN
    } else {
        array.value(row)
    }
}
