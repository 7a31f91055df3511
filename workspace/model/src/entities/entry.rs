use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The household context an entry belongs to. Every entry lives in exactly
/// one scope and never moves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Shared household ledger.
    #[sea_orm(string_value = "casa")]
    Casa,
    /// Individual log.
    #[sea_orm(string_value = "registro")]
    Registro,
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Casa => "casa",
            Self::Registro => "registro",
        })
    }
}

/// Whether an entry records money going out or coming in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    #[sea_orm(string_value = "gasto")]
    Gasto,
    #[sea_orm(string_value = "ingreso")]
    Ingreso,
}

/// Currency an amount was recorded in. Amounts are plain magnitudes;
/// aggregation does not convert between currencies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[sea_orm(string_value = "pesos")]
    Pesos,
    #[sea_orm(string_value = "dolares")]
    Dolares,
}

/// Recurrence cadence for fixed entries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[sea_orm(string_value = "ninguna")]
    Ninguna,
    #[sea_orm(string_value = "mensual")]
    Mensual,
    #[sea_orm(string_value = "semanal")]
    Semanal,
    #[sea_orm(string_value = "diario")]
    Diario,
}

/// A single recorded movement. Entries are immutable once created; they can
/// be deleted but never edited.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub scope: Scope,
    pub kind: Kind,
    /// Recurring vs one-off.
    pub is_fixed: bool,
    /// Must be `Ninguna` when `is_fixed` is false. Enforced on the write
    /// path; read paths use whatever is stored.
    pub frequency: Frequency,
    /// Free-form category tag, stored exactly as entered.
    pub label: String,
    /// Non-negative magnitude. Direction is carried by `kind`.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub amount: Decimal,
    pub currency: Currency,
    pub note: Option<String>,
    /// Acting user for scope `casa`; always `None` for `registro`.
    pub recorded_by: Option<String>,
    /// The date month-window aggregation keys on.
    pub date: NaiveDate,
    /// Optional deferred-payment date.
    pub due_date: Option<NaiveDate>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
