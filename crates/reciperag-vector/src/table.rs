//! LanceDB connection and table lifecycle helpers.
use arrow_array::RecordBatchIterator;
use lancedb::{connect, Connection, Table};

use reciperag_core::error::{Error, Result};
use reciperag_core::types::CollectionSpec;

use crate::schema::build_arrow_schema;

pub(crate) fn op_err(context: &str, e: lancedb::Error) -> Error {
    Error::Operation(format!("{context}: {e}"))
}

pub async fn open_db(uri: &str) -> Result<Connection> {
    connect(uri)
        .execute()
        .await
        .map_err(|e| Error::Connectivity(format!("cannot open LanceDB at {uri}: {e}")))
}

pub async fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let names = conn
        .table_names()
        .execute()
        .await
        .map_err(|e| Error::Connectivity(format!("cannot list tables: {e}")))?;
    Ok(names.iter().any(|n| n == name))
}

/// Create an empty table with the collection's schema.
pub async fn create_empty(conn: &Connection, spec: &CollectionSpec) -> Result<()> {
    let schema = build_arrow_schema(spec.layout, spec.dim)?;
    let iter = RecordBatchIterator::new(vec![].into_iter(), schema);
    conn.create_table(&spec.name, Box::new(iter))
        .execute()
        .await
        .map_err(|e| op_err(&format!("create table {}", spec.name), e))?;
    Ok(())
}

pub async fn drop_if_exists(conn: &Connection, name: &str) -> Result<()> {
    if !table_exists(conn, name).await? {
        return Ok(());
    }
    conn.drop_table(name, &[])
        .await
        .map_err(|e| op_err(&format!("drop table {name}"), e))
}

pub async fn open_existing(conn: &Connection, name: &str) -> Result<Table> {
    if !table_exists(conn, name).await? {
        return Err(Error::NotFound(format!("collection '{name}'")));
    }
    conn.open_table(name)
        .execute()
        .await
        .map_err(|e| op_err(&format!("open table {name}"), e))
}
