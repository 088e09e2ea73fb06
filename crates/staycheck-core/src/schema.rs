//! Fixed schema of the NYC short-term-rental listings dataset.
//!
//! Every table flowing through the pipeline shares these sixteen columns, in
//! this exact order. The checks compare against these constants; ingestion
//! uses [`ingest_type`] to coerce each column to its semantic type.

use arrow::datatypes::DataType;

/// The sixteen listing columns, in required order.
pub const EXPECTED_COLUMNS: [&str; 16] = [
    "id",
    "name",
    "host_id",
    "host_name",
    "neighbourhood_group",
    "neighbourhood",
    "latitude",
    "longitude",
    "room_type",
    "price",
    "minimum_nights",
    "number_of_reviews",
    "last_review",
    "reviews_per_month",
    "calculated_host_listings_count",
    "availability_365",
];

/// The five NYC boroughs, in ascending lexicographic order.
///
/// The drift check relies on this ordering to align count vectors
/// index-for-index between candidate and reference.
pub const KNOWN_BOROUGHS: [&str; 5] =
    ["Bronx", "Brooklyn", "Manhattan", "Queens", "Staten Island"];

/// Geographic bounds for properties in and around NYC.
pub const LON_MIN: f64 = -74.25;
pub const LON_MAX: f64 = -73.50;
pub const LAT_MIN: f64 = 40.5;
pub const LAT_MAX: f64 = 41.2;

/// Strict row count bounds: a valid dataset has more than `MIN_ROWS`
/// and fewer than `MAX_ROWS` records.
pub const MIN_ROWS: usize = 15_000;
pub const MAX_ROWS: usize = 1_000_000;

/// Semantic type each column is coerced to at ingestion.
///
/// `last_review` stays Utf8 here: converting it to Date32 is the cleaning
/// stage's job, and the checks never read it. Unknown columns also stay Utf8
/// so the schema check can report them by name.
pub fn ingest_type(column: &str) -> DataType {
    match column {
        "id" | "host_id" | "minimum_nights" | "number_of_reviews"
        | "calculated_host_listings_count" | "availability_365" => DataType::Int64,
        "latitude" | "longitude" | "price" | "reviews_per_month" => DataType::Float64,
        _ => DataType::Utf8,
    }
}
