//! Storage access used by the HTTP handlers.
//!
//! Everything downstream of these functions works on materialized
//! `entry::Model` rows; the summary and filter engines never touch the
//! database themselves.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use tracing::{debug, instrument};

use crate::entities::prelude::{Entry, Label};
use crate::entities::{entry, label};

/// Labels inserted by [`seed_default_labels`].
pub const DEFAULT_LABELS: &[&str] = &[
    "luz",
    "agua",
    "seguro",
    "patente",
    "compra",
    "sueldo",
    "alquiler",
    "internet",
    "gas",
    "nafta",
    "pagos pendientes",
    "otros",
];

/// Fetches every entry in a scope, newest first. Ties on the date are
/// broken by id descending, so the most recently inserted row wins.
#[instrument(skip(db))]
pub async fn list_entries_by_scope<C>(db: &C, scope: entry::Scope) -> Result<Vec<entry::Model>, DbErr>
where
    C: ConnectionTrait,
{
    let entries = Entry::find()
        .filter(entry::Column::Scope.eq(scope))
        .order_by_desc(entry::Column::Date)
        .order_by_desc(entry::Column::Id)
        .all(db)
        .await?;

    debug!("Fetched {} entries for scope {}", entries.len(), scope);
    Ok(entries)
}

/// Inserts a new entry and returns the stored row with its assigned id.
#[instrument(skip(db, entry))]
pub async fn insert_entry<C>(db: &C, entry: entry::ActiveModel) -> Result<entry::Model, DbErr>
where
    C: ConnectionTrait,
{
    let stored = entry.insert(db).await?;
    debug!("Inserted entry {} in scope {}", stored.id, stored.scope);
    Ok(stored)
}

/// Deletes an entry by id. Returns false when no row matched.
#[instrument(skip(db))]
pub async fn delete_entry<C>(db: &C, id: i32) -> Result<bool, DbErr>
where
    C: ConnectionTrait,
{
    let result = Entry::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

/// Label names for the entry form, alphabetical with `otros` forced last.
#[instrument(skip(db))]
pub async fn list_labels<C>(db: &C) -> Result<Vec<String>, DbErr>
where
    C: ConnectionTrait,
{
    let mut names: Vec<String> = Label::find()
        .all(db)
        .await?
        .into_iter()
        .map(|l| l.name)
        .collect();

    names.sort_by(|a, b| (a == "otros").cmp(&(b == "otros")).then_with(|| a.cmp(b)));
    Ok(names)
}

/// Inserts the default label catalog, skipping names that already exist.
/// Safe to run on every startup.
#[instrument(skip(db))]
pub async fn seed_default_labels<C>(db: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let models = DEFAULT_LABELS.iter().map(|name| label::ActiveModel {
        name: Set((*name).to_string()),
        ..Default::default()
    });

    Label::insert_many(models)
        .on_conflict(
            OnConflict::column(label::Column::Name)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    debug!("Label catalog seeded");
    Ok(())
}
