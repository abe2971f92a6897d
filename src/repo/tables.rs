//! Diagnostic dump of the schema and contents of every application table.

use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, SqlitePool, ValueRef};

use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct TableDump {
    pub table_name: String,
    pub table_schema: String,
    pub rows: Vec<Map<String, Value>>,
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn column_value(row: &SqliteRow, index: usize) -> Value {
    match row.try_get_raw(index) {
        Ok(raw) if !raw.is_null() => {}
        _ => return Value::Null,
    }

    if let Ok(v) = row.try_get::<i64, _>(index) {
        return Value::from(v);
    }
    if let Ok(v) = row.try_get::<bool, _>(index) {
        return Value::from(i64::from(v));
    }
    if let Ok(v) = row.try_get::<f64, _>(index) {
        return Value::from(v);
    }
    if let Ok(v) = row.try_get::<String, _>(index) {
        return Value::from(v);
    }
    if let Ok(v) = row.try_get::<Vec<u8>, _>(index) {
        return Value::from(v);
    }
    Value::Null
}

fn row_to_json(row: &SqliteRow) -> Map<String, Value> {
    row.columns()
        .iter()
        .map(|col| (col.name().to_string(), column_value(row, col.ordinal())))
        .collect()
}

pub async fn dump_tables(db: &SqlitePool) -> Result<Vec<TableDump>, AppError> {
    let tables: Vec<(String, Option<String>)> = sqlx::query_as(
        r#"
        SELECT name, sql
        FROM sqlite_master
        WHERE type = 'table'
          AND name NOT LIKE 'sqlite\_%' ESCAPE '\'
          AND name NOT LIKE '\_sqlx%' ESCAPE '\'
        ORDER BY name ASC
        "#,
    )
    .fetch_all(db)
    .await?;

    let mut dumps = Vec::with_capacity(tables.len());
    for (name, schema) in tables {
        let sql = format!("SELECT * FROM {}", quote_ident(&name));
        let rows = sqlx::query(&sql).fetch_all(db).await?;

        dumps.push(TableDump {
            rows: rows.iter().map(row_to_json).collect(),
            table_name: name,
            table_schema: schema.unwrap_or_default(),
        });
    }

    Ok(dumps)
}
