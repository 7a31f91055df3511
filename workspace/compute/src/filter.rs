//! Client-facing filter engine for entry lists.
//!
//! A [`FilterState`] is an immutable snapshot of everything the user has
//! set. It compiles into a list of [`Facet`] predicates which are applied
//! as a pure conjunction over a scope's entries. The engine never reorders
//! its input; storage supplies entries newest first and the visible subset
//! keeps that order.

use chrono::NaiveDate;
use common::FacetActivity;
use model::entities::entry::{self, Currency, Frequency, Kind, Scope};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

/// Inclusive date range. An unset bound does not constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// A missing date fails any bounded range.
    fn contains(&self, date: Option<NaiveDate>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(date) = date else {
            return false;
        };
        if let Some(from) = self.from {
            if date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if date > to {
                return false;
            }
        }
        true
    }
}

/// Inclusive amount range. An unset bound does not constrain; unparseable
/// user input never reaches this type, it collapses to `None` upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AmountRange {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

impl AmountRange {
    pub fn new(min: Option<Decimal>, max: Option<Decimal>) -> Self {
        Self { min, max }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    fn contains(&self, amount: Decimal) -> bool {
        if let Some(min) = self.min {
            if amount < min {
                return false;
            }
        }
        if let Some(max) = self.max {
            if amount > max {
                return false;
            }
        }
        true
    }
}

/// An immutable snapshot of every facet the user has set.
///
/// Multi-select facets hold the selected values; an empty selection means
/// the facet does not constrain. The engines take the state by reference
/// and never mutate it; changing a filter means building a new state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterState {
    pub kinds: Vec<Kind>,
    pub labels: Vec<String>,
    pub currencies: Vec<Currency>,
    pub fixed: Vec<bool>,
    pub frequencies: Vec<Frequency>,
    pub recorded_by: Vec<String>,
    pub date: DateRange,
    pub due: DateRange,
    pub amount: AmountRange,
    /// Case-insensitive containment over the note text. Whitespace-only
    /// input does not constrain.
    pub note: String,
}

impl FilterState {
    /// Compiles the active facets for a scope.
    ///
    /// Inactive facets produce no predicate. `recorded_by` never activates
    /// outside scope `casa`, whatever values it holds.
    pub fn compile(&self, scope: Scope) -> Vec<Facet> {
        let mut facets = Vec::new();

        if !self.kinds.is_empty() {
            facets.push(Facet::Kinds(self.kinds.clone()));
        }
        if !self.labels.is_empty() {
            facets.push(Facet::Labels(self.labels.clone()));
        }
        if !self.currencies.is_empty() {
            facets.push(Facet::Currencies(self.currencies.clone()));
        }
        if !self.fixed.is_empty() {
            facets.push(Facet::Fixed(self.fixed.clone()));
        }
        if !self.frequencies.is_empty() {
            facets.push(Facet::Frequencies(self.frequencies.clone()));
        }
        if scope == Scope::Casa && !self.recorded_by.is_empty() {
            facets.push(Facet::RecordedBy(self.recorded_by.clone()));
        }
        if !self.date.is_unbounded() {
            facets.push(Facet::Date(self.date));
        }
        if !self.due.is_unbounded() {
            facets.push(Facet::Due(self.due));
        }
        if !self.amount.is_unbounded() {
            facets.push(Facet::Amount(self.amount));
        }
        let note = self.note.trim();
        if !note.is_empty() {
            facets.push(Facet::Note(note.to_lowercase()));
        }

        facets
    }
}

/// One active predicate compiled from a [`FilterState`].
///
/// Multi-select variants match set membership, range variants match
/// inclusive bounds and `Note` matches lowercased containment. Every
/// variant carries its own values, so evaluation is a uniform walk.
#[derive(Debug, Clone, PartialEq)]
pub enum Facet {
    Kinds(Vec<Kind>),
    Labels(Vec<String>),
    Currencies(Vec<Currency>),
    Fixed(Vec<bool>),
    Frequencies(Vec<Frequency>),
    RecordedBy(Vec<String>),
    Date(DateRange),
    Due(DateRange),
    Amount(AmountRange),
    /// Trimmed and lowercased before compilation.
    Note(String),
}

impl Facet {
    /// True when the entry satisfies this predicate.
    pub fn matches(&self, entry: &entry::Model) -> bool {
        match self {
            Self::Kinds(kinds) => kinds.contains(&entry.kind),
            Self::Labels(labels) => labels.contains(&entry.label),
            Self::Currencies(currencies) => currencies.contains(&entry.currency),
            Self::Fixed(values) => values.contains(&entry.is_fixed),
            Self::Frequencies(frequencies) => frequencies.contains(&entry.frequency),
            // An entry without a recorder never matches a person selection
            Self::RecordedBy(people) => entry
                .recorded_by
                .as_ref()
                .is_some_and(|person| people.contains(person)),
            Self::Date(range) => range.contains(Some(entry.date)),
            Self::Due(range) => range.contains(entry.due_date),
            Self::Amount(range) => range.contains(entry.amount),
            Self::Note(needle) => entry
                .note
                .as_deref()
                .unwrap_or("")
                .to_lowercase()
                .contains(needle),
        }
    }
}

/// Applies every active facet as a conjunction, preserving input order.
#[instrument(skip(entries, filter), fields(num_entries = entries.len()))]
pub fn apply_filters(
    entries: &[entry::Model],
    filter: &FilterState,
    scope: Scope,
) -> Vec<entry::Model> {
    let facets = filter.compile(scope);
    if facets.is_empty() {
        return entries.to_vec();
    }

    let visible: Vec<entry::Model> = entries
        .iter()
        .filter(|e| facets.iter().all(|facet| facet.matches(e)))
        .cloned()
        .collect();

    debug!(
        "{} of {} entries visible after {} facets",
        visible.len(),
        entries.len(),
        facets.len()
    );
    visible
}

/// Reports which facets constrain the list for a scope.
///
/// Derived from the compiled facets, so the flags always agree with what
/// [`apply_filters`] actually evaluates.
pub fn active_facets(filter: &FilterState, scope: Scope) -> FacetActivity {
    let mut activity = FacetActivity::default();
    for facet in filter.compile(scope) {
        match facet {
            Facet::Kinds(_) => activity.kind = true,
            Facet::Labels(_) => activity.labels = true,
            Facet::Currencies(_) => activity.currency = true,
            Facet::Fixed(_) => activity.fixed = true,
            Facet::Frequencies(_) => activity.frequency = true,
            Facet::RecordedBy(_) => activity.recorded_by = true,
            Facet::Date(_) => activity.date = true,
            Facet::Due(_) => activity.due = true,
            Facet::Amount(_) => activity.amount = true,
            Facet::Note(_) => activity.note = true,
        }
    }
    activity
}
