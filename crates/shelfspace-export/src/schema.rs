//! Column schemas and validated record sets
//!
//! A [`Schema`] is the ordered header of an export. A [`RecordSet`] is a
//! non-empty slice of records that has been checked against one.

use serde::Deserialize;

use crate::error::{ExportError, ExportResult};
use crate::record::Record;
use crate::value::Scalar;

/// What to do when a record's fields differ from the header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaPolicy {
    /// Any missing or unexpected field is an error
    #[default]
    Reject,
    /// Missing fields export as empty cells; unexpected fields are still an error
    PadMissing,
}

/// Ordered list of column names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<String>,
}

impl Schema {
    /// Declare a schema explicitly
    #[must_use]
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Derive a schema from a record's field order
    #[must_use]
    pub fn of(record: &Record) -> Self {
        Self::new(record.field_names())
    }

    /// Column names in order
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Number of columns
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Check one record against this schema
    ///
    /// Field order inside the record is not checked; cells are always emitted
    /// in schema order.
    ///
    /// # Errors
    /// Returns `InconsistentSchema` if the field sets differ beyond what
    /// `policy` tolerates
    pub fn validate(&self, row: usize, record: &Record, policy: SchemaPolicy) -> ExportResult<()> {
        let missing: Vec<String> = self
            .fields
            .iter()
            .filter(|f| !record.contains(f.as_str()))
            .cloned()
            .collect();
        let unexpected: Vec<String> = record
            .field_names()
            .filter(|name| !self.fields.iter().any(|f| f.as_str() == *name))
            .map(str::to_string)
            .collect();

        let tolerated = match policy {
            SchemaPolicy::Reject => missing.is_empty() && unexpected.is_empty(),
            SchemaPolicy::PadMissing => unexpected.is_empty(),
        };
        if tolerated {
            Ok(())
        } else {
            Err(ExportError::InconsistentSchema {
                row,
                missing,
                unexpected,
            })
        }
    }
}

/// A validated, non-empty view over records sharing one schema
#[derive(Debug, Clone)]
pub struct RecordSet<'a> {
    schema: Schema,
    records: &'a [Record],
}

impl<'a> RecordSet<'a> {
    /// Validate records, deriving the header from the first one
    ///
    /// # Errors
    /// - `EmptyRecordSet` if `records` is empty
    /// - `InconsistentSchema` if a later record disagrees with the first
    pub fn new(records: &'a [Record], policy: SchemaPolicy) -> ExportResult<Self> {
        let first = records.first().ok_or(ExportError::EmptyRecordSet)?;
        let schema = Schema::of(first);
        tracing::debug!("Derived {}-column header from first record", schema.len());
        Self::validated(schema, records, policy, 1)
    }

    /// Validate records against a declared schema
    ///
    /// # Errors
    /// - `EmptyRecordSet` if `records` is empty
    /// - `InconsistentSchema` if any record disagrees with `schema`
    pub fn with_schema(
        schema: Schema,
        records: &'a [Record],
        policy: SchemaPolicy,
    ) -> ExportResult<Self> {
        if records.is_empty() {
            return Err(ExportError::EmptyRecordSet);
        }
        Self::validated(schema, records, policy, 0)
    }

    fn validated(
        schema: Schema,
        records: &'a [Record],
        policy: SchemaPolicy,
        skip: usize,
    ) -> ExportResult<Self> {
        for (row, record) in records.iter().enumerate().skip(skip) {
            schema.validate(row, record, policy)?;
        }
        Ok(Self { schema, records })
    }

    /// The header
    #[inline]
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Underlying records
    #[inline]
    #[must_use]
    pub fn records(&self) -> &'a [Record] {
        self.records
    }

    /// Number of data rows
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; kept for API symmetry with slices
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stringified cells of each row, in header order
    ///
    /// Missing fields (only possible under `PadMissing`) yield empty cells.
    pub fn rows(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.records.iter().map(move |record| {
            self.schema
                .fields()
                .iter()
                .map(|field| record.get(field).map(Scalar::to_cell).unwrap_or_default())
                .collect()
        })
    }
}
