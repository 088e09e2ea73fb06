//! In-memory listing table backed by an Arrow `RecordBatch`.
//!
//! CSV files are read with an all-Utf8 schema generated from the header row,
//! then each known column is coerced to its semantic type (unparseable cells
//! become null). Tables are immutable once loaded; the cleaner produces a new
//! table instead of mutating in place.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::compute;
use arrow::csv::{ReaderBuilder as CsvReaderBuilder, WriterBuilder as CsvWriterBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use crate::errors::CheckError;
use crate::schema;

#[derive(Debug, Clone)]
pub struct ListingTable {
    name: String,
    batch: RecordBatch,
}

impl ListingTable {
    /// Load a listing table from a CSV file.
    ///
    /// `name` identifies the table in logs and reports, typically the
    /// artifact reference it was fetched under.
    pub fn from_csv(path: &Path, name: &str) -> Result<Self, CheckError> {
        let raw_schema = Arc::new(csv_generate_schema(path)?);

        let file = File::open(path)?;
        let reader = CsvReaderBuilder::new(raw_schema.clone())
            .with_header(true)
            .build(file)?;
        let batches = reader.collect::<Result<Vec<_>, _>>()?;
        let batch = compute::concat_batches(&raw_schema, batches.iter())?;
        let batch = coerce_columns(batch)?;

        tracing::info!(
            name,
            rows = batch.num_rows(),
            columns = batch.num_columns(),
            "loaded table"
        );
        Ok(Self {
            name: name.to_string(),
            batch,
        })
    }

    /// Wrap an already-built batch, e.g. the cleaner's output.
    pub fn from_batch(name: &str, batch: RecordBatch) -> Self {
        Self {
            name: name.to_string(),
            batch,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Column names in file order.
    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    pub fn column(&self, name: &str) -> Result<&ArrayRef, CheckError> {
        self.batch
            .column_by_name(name)
            .ok_or_else(|| CheckError::DataFormat(name.to_string()))
    }

    pub fn float_column(&self, name: &str) -> Result<&Float64Array, CheckError> {
        self.column(name)?
            .as_any()
            .downcast_ref::<Float64Array>()
            .ok_or_else(|| CheckError::ColumnType {
                column: name.to_string(),
                expected: "Float64".to_string(),
            })
    }

    pub fn string_column(&self, name: &str) -> Result<&StringArray, CheckError> {
        self.column(name)?
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| CheckError::ColumnType {
                column: name.to_string(),
                expected: "Utf8".to_string(),
            })
    }

    /// Write the table as CSV with a header row and no index column.
    ///
    /// Date32 columns serialize as `YYYY-MM-DD`, nulls as empty cells.
    pub fn write_csv(&self, path: &Path) -> Result<(), CheckError> {
        let file = File::create(path)?;
        let mut writer = CsvWriterBuilder::new().with_header(true).build(file);
        writer.write(&self.batch)?;
        tracing::info!(name = self.name.as_str(), path = %path.display(), "wrote table");
        Ok(())
    }
}

/// Generate an all-Utf8 schema from the CSV header row.
fn csv_generate_schema(path: &Path) -> Result<Schema, io::Error> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    if let Some(first) = lines.next() {
        let header = first?;
        let fields: Vec<Field> = header
            .split(',')
            .map(|c| Field::new(c.trim(), DataType::Utf8, true))
            .collect();
        Ok(Schema::new(fields))
    } else {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "CSV file is empty",
        ))
    }
}

/// Cast every known column from Utf8 to its semantic type.
///
/// The Arrow cast kernel turns unparseable cells into nulls, which matches
/// the lenient ingestion the checks expect: type damage shows up as nulls in
/// range checks, not as a hard ingestion failure.
fn coerce_columns(batch: RecordBatch) -> Result<RecordBatch, CheckError> {
    let mut fields = Vec::with_capacity(batch.num_columns());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(batch.num_columns());

    for (field, column) in batch.schema().fields().iter().zip(batch.columns()) {
        let target = schema::ingest_type(field.name());
        if target != DataType::Utf8 && field.data_type() == &DataType::Utf8 {
            let casted = compute::cast(column, &target)?;
            fields.push(Field::new(field.name(), target, true));
            columns.push(casted);
        } else {
            fields.push(field.as_ref().clone());
            columns.push(column.clone());
        }
    }

    let coerced = Arc::new(Schema::new(fields));
    Ok(RecordBatch::try_new(coerced, columns)?)
}
