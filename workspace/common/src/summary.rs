//! Wire shapes for the monthly summary.
//!
//! Field names follow the JSON contract the web client consumes
//! (`byLabel`, `byFixed`, `noFijo`), hence the camelCase renames. Amounts
//! serialize as strings via rust_decimal's `serde-with-str`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The calendar-month window a summary covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SummaryPeriod {
    pub year: i32,
    pub month: u32,
    /// First day of the month, included in the window.
    pub start: NaiveDate,
    /// First day of the following month, excluded from the window.
    pub end: NaiveDate,
}

/// Whole-window totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
pub struct Totals {
    pub gastos: Decimal,
    pub ingresos: Decimal,
    /// `ingresos - gastos`. Negative when the month ran at a loss.
    pub diferencia: Decimal,
}

/// Expense/income pair plus the gross volume `gastos + ingresos`.
///
/// `total` is gross, not net. The fixed/variable split and the label table
/// both display volume moved; the net figure lives in [`Totals::diferencia`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
pub struct KindTotals {
    pub gastos: Decimal,
    pub ingresos: Decimal,
    pub total: Decimal,
}

/// One `byLabel` bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LabelBucket {
    /// Label exactly as stored; no case normalization is applied.
    pub label: String,
    pub gastos: Decimal,
    pub ingresos: Decimal,
    /// Gross volume, `gastos + ingresos`.
    pub total: Decimal,
}

/// One `byPerson` bucket. Only produced for scope `casa`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PersonBucket {
    pub person: String,
    pub gastos: Decimal,
    pub ingresos: Decimal,
    pub total: Decimal,
}

/// The fixed / non-fixed split. Both buckets are always present, zeroed
/// when empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct FixedBuckets {
    pub fijo: KindTotals,
    pub no_fijo: KindTotals,
}

/// Monthly summary payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub period: SummaryPeriod,
    /// Scope the summary was computed for, `casa` or `registro`.
    pub scope: String,
    pub totals: Totals,
    /// Ordered by label ascending.
    pub by_label: Vec<LabelBucket>,
    pub by_fixed: FixedBuckets,
    /// Ordered by person ascending. Empty unless scope is `casa`.
    pub by_person: Vec<PersonBucket>,
}
