use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use arrow::array::Int64Array;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use staycheck_core::ListingTable;
use staycheck_core::checks::{
    check_bounds, check_categories, check_columns, check_price_range, check_row_count,
};
use staycheck_core::errors::CheckError;
use tempfile::tempdir;

const HEADER: &str = "id,name,host_id,host_name,neighbourhood_group,neighbourhood,latitude,longitude,room_type,price,minimum_nights,number_of_reviews,last_review,reviews_per_month,calculated_host_listings_count,availability_365";

fn listing_row(id: i64, borough: &str, lat: f64, lon: f64, price: f64) -> String {
    format!(
        "{id},Cozy room,{host},Pat,{borough},Somewhere,{lat},{lon},Private room,{price},2,10,2019-05-21,0.8,1,180",
        host = id + 1000
    )
}

fn write_listing_csv(path: &Path, rows: &[String]) {
    let mut file = File::create(path).unwrap();
    writeln!(file, "{HEADER}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
}

fn load(path: &Path) -> ListingTable {
    ListingTable::from_csv(path, "candidate.csv:latest").unwrap()
}

/// Five in-bounds rows covering all five boroughs.
fn valid_rows() -> Vec<String> {
    ["Bronx", "Brooklyn", "Manhattan", "Queens", "Staten Island"]
        .iter()
        .enumerate()
        .map(|(i, b)| listing_row(i as i64, b, 40.7, -73.95, 100.0))
        .collect()
}

/// Table with a given row count; only the row count checks look at it.
fn table_with_rows(n: usize) -> ListingTable {
    let schema = Arc::new(Schema::new(vec![Field::new("id", DataType::Int64, false)]));
    let batch =
        RecordBatch::try_new(schema, vec![Arc::new(Int64Array::from(vec![0i64; n]))]).unwrap();
    ListingTable::from_batch("candidate.csv:latest", batch)
}

#[test]
fn test_column_names_pass() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("t.csv");
    write_listing_csv(&path, &valid_rows());
    check_columns(&load(&path)).unwrap();
}

#[test]
fn test_reversed_columns_fail() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("t.csv");
    let reversed: Vec<&str> = HEADER.split(',').rev().collect();
    let mut file = File::create(&path).unwrap();
    writeln!(file, "{}", reversed.join(",")).unwrap();
    writeln!(
        file,
        "180,1,0.8,2019-05-21,10,2,100.0,Private room,-73.95,40.7,Somewhere,Brooklyn,Pat,1001,Cozy room,1"
    )
    .unwrap();
    drop(file);

    // Same column set, different order: must fail
    match check_columns(&load(&path)) {
        Err(CheckError::Schema { expected, actual }) => {
            assert_eq!(expected.len(), 16);
            assert_eq!(actual.first().map(String::as_str), Some("availability_365"));
        }
        other => panic!("expected Schema error, got {other:?}"),
    }
}

#[test]
fn test_extra_column_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("t.csv");
    let mut file = File::create(&path).unwrap();
    writeln!(file, "{HEADER},extra").unwrap();
    writeln!(file, "{},x", listing_row(1, "Brooklyn", 40.7, -73.95, 100.0)).unwrap();
    drop(file);

    assert!(matches!(
        check_columns(&load(&path)),
        Err(CheckError::Schema { .. })
    ));
}

#[test]
fn test_missing_column_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("t.csv");
    let mut file = File::create(&path).unwrap();
    let truncated = HEADER.rsplit_once(',').unwrap().0;
    writeln!(file, "{truncated}").unwrap();
    writeln!(
        file,
        "1,Cozy room,1001,Pat,Brooklyn,Somewhere,40.7,-73.95,Private room,100.0,2,10,2019-05-21,0.8,1"
    )
    .unwrap();
    drop(file);

    assert!(matches!(
        check_columns(&load(&path)),
        Err(CheckError::Schema { .. })
    ));
}

#[test]
fn test_all_boroughs_present_pass() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("t.csv");
    write_listing_csv(&path, &valid_rows());
    check_categories(&load(&path)).unwrap();
}

#[test]
fn test_unexpected_neighbourhood_group_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("t.csv");
    let mut rows = valid_rows();
    rows.push(listing_row(10, "Jersey City", 40.7, -74.05, 100.0));
    write_listing_csv(&path, &rows);

    match check_categories(&load(&path)) {
        Err(CheckError::Category {
            unexpected,
            missing,
        }) => {
            assert_eq!(unexpected, vec!["Jersey City".to_string()]);
            assert!(missing.is_empty());
        }
        other => panic!("expected Category error, got {other:?}"),
    }
}

#[test]
fn test_missing_borough_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("t.csv");
    let mut rows = valid_rows();
    rows.pop(); // drop the Staten Island row
    write_listing_csv(&path, &rows);

    match check_categories(&load(&path)) {
        Err(CheckError::Category {
            unexpected,
            missing,
        }) => {
            assert!(unexpected.is_empty());
            assert_eq!(missing, vec!["Staten Island".to_string()]);
        }
        other => panic!("expected Category error, got {other:?}"),
    }
}

#[test]
fn test_bounds_pass() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("t.csv");
    write_listing_csv(&path, &valid_rows());
    check_bounds(&load(&path)).unwrap();
}

#[test]
fn test_longitude_outlier_fails_whole_table() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("t.csv");
    let mut rows = valid_rows();
    rows.insert(2, listing_row(10, "Queens", 40.7, -75.0, 100.0));
    write_listing_csv(&path, &rows);

    match check_bounds(&load(&path)) {
        Err(CheckError::ValueRange {
            column, row, value, ..
        }) => {
            assert_eq!(column, "longitude");
            assert_eq!(row, 2);
            assert_eq!(value, -75.0);
        }
        other => panic!("expected ValueRange error, got {other:?}"),
    }
}

#[test]
fn test_latitude_outlier_fails_whole_table() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("t.csv");
    let mut rows = valid_rows();
    rows.push(listing_row(10, "Queens", 42.0, -73.95, 100.0));
    write_listing_csv(&path, &rows);

    match check_bounds(&load(&path)) {
        Err(CheckError::ValueRange { column, value, .. }) => {
            assert_eq!(column, "latitude");
            assert_eq!(value, 42.0);
        }
        other => panic!("expected ValueRange error, got {other:?}"),
    }
}

#[test]
fn test_row_count_boundaries() {
    // Strict inequalities: the boundary values themselves fail
    assert!(matches!(
        check_row_count(&table_with_rows(15_000)),
        Err(CheckError::Size { rows: 15_000, .. })
    ));
    check_row_count(&table_with_rows(15_001)).unwrap();
    check_row_count(&table_with_rows(999_999)).unwrap();
    assert!(matches!(
        check_row_count(&table_with_rows(1_000_000)),
        Err(CheckError::Size {
            rows: 1_000_000,
            ..
        })
    ));
}

#[test]
fn test_price_range_inclusive_pass() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("t.csv");
    write_listing_csv(
        &path,
        &[
            listing_row(1, "Brooklyn", 40.7, -73.95, 10.0),
            listing_row(2, "Brooklyn", 40.7, -73.95, 350.0),
        ],
    );
    check_price_range(&load(&path), 10.0, 350.0).unwrap();
}

#[test]
fn test_price_out_of_range_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("t.csv");
    write_listing_csv(
        &path,
        &[
            listing_row(1, "Brooklyn", 40.7, -73.95, 100.0),
            listing_row(2, "Brooklyn", 40.7, -73.95, 351.0),
        ],
    );

    match check_price_range(&load(&path), 10.0, 350.0) {
        Err(CheckError::ValueRange {
            column, row, value, ..
        }) => {
            assert_eq!(column, "price");
            assert_eq!(row, 1);
            assert_eq!(value, 351.0);
        }
        other => panic!("expected ValueRange error, got {other:?}"),
    }
}

#[test]
fn test_null_price_fails_range_check() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("t.csv");
    let mut file = File::create(&path).unwrap();
    writeln!(file, "{HEADER}").unwrap();
    writeln!(
        file,
        "1,Cozy room,1001,Pat,Brooklyn,Somewhere,40.7,-73.95,Private room,,2,10,2019-05-21,0.8,1,180"
    )
    .unwrap();
    drop(file);

    assert!(matches!(
        check_price_range(&load(&path), 10.0, 350.0),
        Err(CheckError::ValueRange { column: "price", .. })
    ));
}
