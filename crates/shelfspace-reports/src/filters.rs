//! Report filters
//!
//! Mirrors the dashboard's filter bar: a snapshot date or a date range, plus
//! optional concept and store selections given as slugs (`concept-a`,
//! `store-b`).

use chrono::NaiveDate;

use crate::error::FilterError;
use crate::kind::{DateScope, ReportKind};

/// Inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    /// # Errors
    /// `ReversedRange` if `from` is after `to`
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, FilterError> {
        if from > to {
            return Err(FilterError::ReversedRange { from, to });
        }
        Ok(Self { from, to })
    }

    #[inline]
    #[must_use]
    pub fn from(&self) -> NaiveDate {
        self.from
    }

    #[inline]
    #[must_use]
    pub fn to(&self) -> NaiveDate {
        self.to
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// Filter selections for one report fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilters {
    pub date: Option<NaiveDate>,
    pub date_range: Option<DateRange>,
    pub concept: Option<String>,
    pub store: Option<String>,
}

impl ReportFilters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    #[must_use]
    pub fn with_concept(mut self, concept: impl Into<String>) -> Self {
        self.concept = Some(concept.into());
        self
    }

    #[must_use]
    pub fn with_store(mut self, store: impl Into<String>) -> Self {
        self.store = Some(store.into());
        self
    }

    /// Check the date filters against what `kind` accepts
    ///
    /// # Errors
    /// `WrongDateScope` when a date or range is given to a report that does
    /// not take one
    pub fn validate_for(&self, kind: ReportKind) -> Result<(), FilterError> {
        let wrong = |given| FilterError::WrongDateScope {
            report: kind.slug(),
            given,
        };
        match kind.date_scope() {
            DateScope::Single if self.date_range.is_some() => Err(wrong("date range")),
            DateScope::Range if self.date.is_some() => Err(wrong("single date")),
            DateScope::None if self.date_range.is_some() => Err(wrong("date range")),
            DateScope::None if self.date.is_some() => Err(wrong("single date")),
            _ => Ok(()),
        }
    }

    /// Date the export is stamped with, if the filters pin one
    #[must_use]
    pub fn report_date(&self) -> Option<NaiveDate> {
        self.date.or_else(|| self.date_range.map(|r| r.to))
    }

    /// Display name of the selected store (`store-a` → `Store A`)
    #[must_use]
    pub fn store_label(&self) -> Option<String> {
        self.store.as_deref().and_then(|s| slug_label(s, "store"))
    }

    /// Display name of the selected concept (`concept-a` → `Concept A`)
    #[must_use]
    pub fn concept_label(&self) -> Option<String> {
        self.concept.as_deref().and_then(|s| slug_label(s, "concept"))
    }
}

/// `<prefix>-<suffix>` → `<Prefix> <SUFFIX>`; `all` and empty slugs select nothing
fn slug_label(slug: &str, prefix: &str) -> Option<String> {
    let slug = slug.trim();
    if slug.is_empty() || slug.eq_ignore_ascii_case("all") {
        return None;
    }
    let suffix = slug
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .unwrap_or(slug);
    let mut label = String::with_capacity(prefix.len() + 1 + suffix.len());
    let mut chars = prefix.chars();
    if let Some(first) = chars.next() {
        label.extend(first.to_uppercase());
        label.push_str(chars.as_str());
    }
    label.push(' ');
    label.push_str(&suffix.to_ascii_uppercase());
    Some(label)
}
