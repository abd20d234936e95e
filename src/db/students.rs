use tokio_postgres::types::ToSql;
use tokio_postgres::Row;

use super::Record;
use crate::models::Student;

const COLUMNS: &[&str] = &["first_name", "last_name", "email", "class"];

impl Record for Student {
    const TABLE: &'static str = "students";
    const SELECT_COLUMNS: &'static [&'static str] =
        &["id", "first_name", "last_name", "email", "class"];
    const INSERT_COLUMNS: &'static [&'static str] = COLUMNS;
    const QUERY_COLUMNS: &'static [&'static str] = COLUMNS;

    fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            class: row.try_get("class")?,
        })
    }

    fn insert_params(&self) -> Vec<&(dyn ToSql + Sync)> {
        vec![&self.first_name, &self.last_name, &self.email, &self.class]
    }
}
