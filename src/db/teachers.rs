//! Teacher rows and the students assigned to a teacher's class

use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, Row};

use super::crud::select_sql;
use super::{query_error, Database, Record};
use crate::error::{Error, Result};
use crate::models::{Student, Teacher};

const COLUMNS: &[&str] = &["first_name", "last_name", "email", "class", "subject"];

impl Record for Teacher {
    const TABLE: &'static str = "teachers";
    const SELECT_COLUMNS: &'static [&'static str] =
        &["id", "first_name", "last_name", "email", "class", "subject"];
    const INSERT_COLUMNS: &'static [&'static str] = COLUMNS;
    const QUERY_COLUMNS: &'static [&'static str] = COLUMNS;

    fn from_row(row: &Row) -> std::result::Result<Self, tokio_postgres::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            class: row.try_get("class")?,
            subject: row.try_get("subject")?,
        })
    }

    fn insert_params(&self) -> Vec<&(dyn ToSql + Sync)> {
        vec![
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.class,
            &self.subject,
        ]
    }
}

async fn class_of(client: &Client, teacher_id: i32) -> Result<String> {
    let row = client
        .query_opt("SELECT class FROM teachers WHERE id = $1", &[&teacher_id])
        .await
        .map_err(query_error)?
        .ok_or(Error::NotFound)?;
    row.try_get(0).map_err(query_error)
}

/// Students whose class is the one led by the given teacher
pub async fn students_for_teacher(db: &Database, teacher_id: i32) -> Result<Vec<Student>> {
    let client = db.connect().await?;
    let class = class_of(&client, teacher_id).await?;

    let sql = format!("{} WHERE class = $1", select_sql::<Student>());
    let rows = client
        .query(&sql, &[&class])
        .await
        .map_err(query_error)?;

    rows.iter()
        .map(Student::from_row)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(query_error)
}

pub async fn student_count_for_teacher(db: &Database, teacher_id: i32) -> Result<i64> {
    let client = db.connect().await?;
    let class = class_of(&client, teacher_id).await?;

    let row = client
        .query_one("SELECT COUNT(*) FROM students WHERE class = $1", &[&class])
        .await
        .map_err(query_error)?;
    row.try_get(0).map_err(query_error)
}
