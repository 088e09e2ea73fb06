//! Cleaning stage: price outlier filtering and date normalization.

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::compute::{and, filter_record_batch};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow_array::Date32Array;
use arrow_ord::cmp::{gt_eq, lt_eq};
use chrono::NaiveDate;

use crate::errors::CheckError;
use crate::table::ListingTable;

/// Clean a raw listing table.
///
/// Retains exactly the records with `min_price <= price <= max_price`
/// (inclusive on both bounds; records with a null price are dropped),
/// preserving row order and column order, then parses `last_review` from
/// text into a Date32 column, with empty or unparseable values becoming
/// null.
///
/// The function is pure: persisting the result is the caller's job. An empty
/// result is valid, including when `min_price > max_price`. Fails with
/// [`CheckError::DataFormat`] when the input has no `price` column.
pub fn clean(
    raw: &ListingTable,
    min_price: f64,
    max_price: f64,
) -> Result<ListingTable, CheckError> {
    let prices = raw.float_column("price")?;

    tracing::info!(
        name = raw.name(),
        rows = raw.num_rows(),
        min_price,
        max_price,
        "removing price outliers"
    );

    let lower = Float64Array::new_scalar(min_price);
    let upper = Float64Array::new_scalar(max_price);
    let mask = and(&gt_eq(prices, &lower)?, &lt_eq(prices, &upper)?)?;
    let filtered = filter_record_batch(raw.batch(), &mask)?;

    let batch = convert_last_review(filtered)?;

    tracing::info!(name = raw.name(), rows = batch.num_rows(), "cleaned table");
    Ok(ListingTable::from_batch(raw.name(), batch))
}

/// Replace a Utf8 `last_review` column with its Date32 parse.
///
/// Already-converted columns (re-cleaning a cleaned table) and tables
/// without the column are left untouched.
fn convert_last_review(batch: RecordBatch) -> Result<RecordBatch, CheckError> {
    let Some((index, field)) = batch.schema().column_with_name("last_review").map(
        |(index, field)| (index, field.clone()),
    ) else {
        return Ok(batch);
    };
    if field.data_type() != &DataType::Utf8 {
        return Ok(batch);
    }

    let strings = batch
        .column(index)
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| CheckError::ColumnType {
            column: "last_review".to_string(),
            expected: "Utf8".to_string(),
        })?;
    let dates: ArrayRef = Arc::new(parse_review_dates(strings));

    let mut fields: Vec<Field> = Vec::with_capacity(batch.num_columns());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(batch.num_columns());
    for (i, (f, column)) in batch
        .schema()
        .fields()
        .iter()
        .zip(batch.columns())
        .enumerate()
    {
        if i == index {
            fields.push(Field::new(f.name(), DataType::Date32, true));
            columns.push(dates.clone());
        } else {
            fields.push(f.as_ref().clone());
            columns.push(column.clone());
        }
    }

    let schema = Arc::new(Schema::new(fields));
    Ok(RecordBatch::try_new(schema, columns)?)
}

/// Turn the textual review dates into Date32 day offsets, null on any cell
/// that is missing, empty, or not a `%Y-%m-%d` date.
fn parse_review_dates(array: &StringArray) -> Date32Array {
    array
        .iter()
        .map(|cell| cell.and_then(review_day_number))
        .collect()
}

fn review_day_number(text: &str) -> Option<i32> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    Some(date.signed_duration_since(epoch).num_days() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Array;

    #[test]
    fn test_review_dates_are_lenient() {
        let reviews = StringArray::from(vec![
            Some("2019-05-21"),
            Some("never reviewed"),
            None,
            Some(""),
        ]);
        let parsed = parse_review_dates(&reviews);

        assert_eq!(Some(parsed.value(0)), review_day_number("2019-05-21"));
        assert!(parsed.is_null(1));
        assert!(parsed.is_null(2));
        assert!(parsed.is_null(3));
    }

    #[test]
    fn test_day_numbers_count_from_the_epoch() {
        assert_eq!(review_day_number("1970-01-01"), Some(0));
        assert_eq!(review_day_number("1970-02-01"), Some(31));
        assert_eq!(review_day_number("1969-12-31"), Some(-1));
    }
}
