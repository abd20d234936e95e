//! Generic CRUD over any [`Record`]

use tokio_postgres::GenericClient;

use super::{begin, commit, query_error, write_error, Database, ListQuery, Record};
use crate::error::{Error, Result};
use crate::models::{apply_patch, patch::patch_id, PatchMap};

pub(super) fn select_sql<T: Record>() -> String {
    format!("SELECT {} FROM {}", T::SELECT_COLUMNS.join(", "), T::TABLE)
}

fn insert_sql<T: Record>() -> String {
    let placeholders: Vec<String> = (1..=T::INSERT_COLUMNS.len())
        .map(|i| format!("${}", i))
        .collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        T::TABLE,
        T::INSERT_COLUMNS.join(", "),
        placeholders.join(", "),
        T::SELECT_COLUMNS.join(", ")
    )
}

fn update_sql<T: Record>() -> String {
    let assignments: Vec<String> = T::UPDATE_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{} = ${}", column, i + 1))
        .collect();
    format!(
        "UPDATE {} SET {} WHERE id = ${} RETURNING {}",
        T::TABLE,
        assignments.join(", "),
        T::UPDATE_COLUMNS.len() + 1,
        T::SELECT_COLUMNS.join(", ")
    )
}

async fn fetch<T, C>(client: &C, id: i32) -> Result<T>
where
    T: Record,
    C: GenericClient + Sync,
{
    let sql = format!("{} WHERE id = $1", select_sql::<T>());
    let row = client
        .query_opt(&sql, &[&id])
        .await
        .map_err(query_error)?
        .ok_or(Error::NotFound)?;
    T::from_row(&row).map_err(query_error)
}

/// Full-row update, returning the row as stored
async fn store<T, C>(client: &C, id: i32, item: &T) -> Result<T>
where
    T: Record,
    C: GenericClient + Sync,
{
    let mut params = item.update_params();
    params.push(&id);

    let row = client
        .query_opt(&update_sql::<T>(), &params)
        .await
        .map_err(write_error)?
        .ok_or(Error::NotFound)?;
    T::from_row(&row).map_err(query_error)
}

pub async fn get_by_id<T: Record>(db: &Database, id: i32) -> Result<T> {
    let client = db.connect().await?;
    fetch(&client, id).await
}

/// List rows matching the query parameters. Sort parameters are checked
/// before any connection is opened.
pub async fn list<T: Record>(db: &Database, params: &[(String, String)]) -> Result<Vec<T>> {
    let query = ListQuery::parse(params, T::QUERY_COLUMNS)?;
    let sql = query.to_sql(&select_sql::<T>());

    let client = db.connect().await?;
    let rows = client
        .query(&sql, &query.params())
        .await
        .map_err(query_error)?;

    rows.iter()
        .map(T::from_row)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(query_error)
}

/// Insert a batch in one transaction, returning the stored rows with their ids
pub async fn create<T: Record>(db: &Database, items: &[T]) -> Result<Vec<T>> {
    let mut client = db.connect().await?;
    let tx = begin(&mut client).await?;
    let stmt = tx
        .prepare(&insert_sql::<T>())
        .await
        .map_err(query_error)?;

    let mut created = Vec::with_capacity(items.len());
    for item in items {
        let row = tx
            .query_one(&stmt, &item.insert_params())
            .await
            .map_err(write_error)?;
        created.push(T::from_row(&row).map_err(query_error)?);
    }

    commit(tx).await?;
    Ok(created)
}

pub async fn replace<T: Record>(db: &Database, id: i32, item: &T) -> Result<T> {
    let client = db.connect().await?;
    store(&client, id, item).await
}

/// Apply a batch of partial updates; any failure rolls back the whole batch
pub async fn patch_many<T: Record>(db: &Database, updates: &[PatchMap]) -> Result<()> {
    let mut client = db.connect().await?;
    let tx = begin(&mut client).await?;

    for update in updates {
        let id = patch_id(update)?;
        let mut current: T = fetch(&tx, id).await?;
        apply_patch(&mut current, update)?;
        store(&tx, id, &current).await?;
    }

    commit(tx).await
}

pub async fn patch_one<T: Record>(db: &Database, id: i32, update: &PatchMap) -> Result<T> {
    let client = db.connect().await?;
    let mut current: T = fetch(&client, id).await?;
    apply_patch(&mut current, update)?;
    store(&client, id, &current).await
}

pub async fn delete_one<T: Record>(db: &Database, id: i32) -> Result<()> {
    let client = db.connect().await?;
    let sql = format!("DELETE FROM {} WHERE id = $1", T::TABLE);
    let affected = client.execute(&sql, &[&id]).await.map_err(query_error)?;
    if affected == 0 {
        return Err(Error::NotFound);
    }
    Ok(())
}

/// Delete a batch of ids; a missing id rolls back every delete in the batch
pub async fn delete_many<T: Record>(db: &Database, ids: &[i32]) -> Result<Vec<i32>> {
    if ids.is_empty() {
        return Err(Error::NotFound);
    }

    let mut client = db.connect().await?;
    let tx = begin(&mut client).await?;
    let stmt = tx
        .prepare(&format!("DELETE FROM {} WHERE id = $1", T::TABLE))
        .await
        .map_err(query_error)?;

    let mut deleted = Vec::with_capacity(ids.len());
    for id in ids {
        let affected = tx.execute(&stmt, &[id]).await.map_err(query_error)?;
        if affected == 0 {
            return Err(Error::NotFoundId(*id));
        }
        deleted.push(*id);
    }

    commit(tx).await?;
    Ok(deleted)
}
