use std::collections::HashMap;

use chrono::NaiveDate;
use common::{FixedBuckets, KindTotals, LabelBucket, MonthlySummary, PersonBucket, SummaryPeriod, Totals};
use model::entities::entry::{self, Kind, Scope};
use model::query;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tracing::{debug, info, instrument};

use crate::error::{ComputeError, Result};

/// Earliest year a summary may be requested for.
pub const MIN_YEAR: i32 = 1970;
/// Latest year a summary may be requested for.
pub const MAX_YEAR: i32 = 3000;

/// Computes the half-open window `[start, end)` covering a calendar month.
///
/// `start` is the first day of the month, `end` the first day of the
/// following month; December rolls over to January of the next year. The
/// year and month are validated before any date arithmetic runs.
pub fn month_window(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(ComputeError::InvalidYear(year));
    }
    if !(1..=12).contains(&month) {
        return Err(ComputeError::InvalidMonth(month));
    }

    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };

    let start =
        NaiveDate::from_ymd_opt(year, month, 1).ok_or(ComputeError::InvalidMonth(month))?;
    let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .ok_or(ComputeError::InvalidMonth(next_month))?;
    Ok((start, end))
}

fn add_to(bucket: &mut KindTotals, kind: Kind, amount: Decimal) {
    match kind {
        Kind::Gasto => bucket.gastos += amount,
        Kind::Ingreso => bucket.ingresos += amount,
    }
    // Gross volume; the net figure lives in Totals::diferencia only.
    bucket.total += amount;
}

/// Aggregates a scope's entries over one calendar month.
///
/// Entries are expected to be the scope's full list; only rows dated inside
/// `[start, end)` contribute. Buckets group by kind, label, fixed/variable
/// and (for scope `casa`) the recording person. Amounts are summed as
/// stored, regardless of currency. Anomalous rows, such as a non-fixed
/// entry carrying a frequency, are counted with their stored values.
#[instrument(skip(entries), fields(num_entries = entries.len()))]
pub fn summarize(
    entries: &[entry::Model],
    scope: Scope,
    year: i32,
    month: u32,
) -> Result<MonthlySummary> {
    let (start, end) = month_window(year, month)?;

    let mut totals = Totals::default();
    let mut by_fixed = FixedBuckets::default();
    let mut label_map: HashMap<String, KindTotals> = HashMap::new();
    let mut person_map: HashMap<String, KindTotals> = HashMap::new();
    let mut in_window = 0usize;

    for entry in entries.iter().filter(|e| e.date >= start && e.date < end) {
        in_window += 1;
        let amount = entry.amount;

        match entry.kind {
            Kind::Gasto => totals.gastos += amount,
            Kind::Ingreso => totals.ingresos += amount,
        }

        add_to(label_map.entry(entry.label.clone()).or_default(), entry.kind, amount);

        let fixed_bucket = if entry.is_fixed {
            &mut by_fixed.fijo
        } else {
            &mut by_fixed.no_fijo
        };
        add_to(fixed_bucket, entry.kind, amount);

        if scope == Scope::Casa {
            if let Some(person) = &entry.recorded_by {
                add_to(person_map.entry(person.clone()).or_default(), entry.kind, amount);
            }
        }
    }

    totals.diferencia = totals.ingresos - totals.gastos;

    // Sort buckets for stable ordering
    let mut by_label: Vec<LabelBucket> = label_map
        .into_iter()
        .map(|(label, t)| LabelBucket {
            label,
            gastos: t.gastos,
            ingresos: t.ingresos,
            total: t.total,
        })
        .collect();
    by_label.sort_by(|a, b| a.label.cmp(&b.label));

    let mut by_person: Vec<PersonBucket> = person_map
        .into_iter()
        .map(|(person, t)| PersonBucket {
            person,
            gastos: t.gastos,
            ingresos: t.ingresos,
            total: t.total,
        })
        .collect();
    by_person.sort_by(|a, b| a.person.cmp(&b.person));

    debug!(
        "Aggregated {} of {} entries into {} label buckets",
        in_window,
        entries.len(),
        by_label.len()
    );

    Ok(MonthlySummary {
        period: SummaryPeriod { year, month, start, end },
        scope: scope.to_string(),
        totals,
        by_label,
        by_fixed,
        by_person,
    })
}

/// Aggregates one month of a scope's ledger straight from storage.
///
/// Every call re-reads the scope and re-aggregates; results are never
/// cached, so a summary always reflects the entries visible at call time.
#[derive(Debug)]
pub struct SummaryComputer;

impl SummaryComputer {
    /// Creates a new SummaryComputer instance.
    pub fn new() -> Self {
        Self
    }

    /// Fetches the scope's entries and summarizes the requested month.
    #[instrument(skip(self, db))]
    pub async fn compute_monthly_summary(
        &self,
        db: &DatabaseConnection,
        scope: Scope,
        year: i32,
        month: u32,
    ) -> Result<MonthlySummary> {
        // Reject a bad period before touching storage
        month_window(year, month)?;

        let entries = query::list_entries_by_scope(db, scope).await?;
        info!(
            "Computing monthly summary for scope {} over {} entries",
            scope,
            entries.len()
        );
        summarize(&entries, scope, year, month)
    }
}

impl Default for SummaryComputer {
    fn default() -> Self {
        Self::new()
    }
}
