//! Collection filters and sort clauses built from query parameters
//!
//! Column names only ever come from a per-entity allow-list; values are
//! bound as parameters.

use std::fmt;
use tokio_postgres::types::ToSql;

use crate::error::{Error, Result};

const SORT_PARAM: &str = "sortby";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "ASC"),
            SortDirection::Desc => write!(f, "DESC"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub column: &'static str,
    pub direction: SortDirection,
}

impl SortKey {
    /// Parse `column:asc|desc`, where the column must be allow-listed
    pub fn parse(value: &str, columns: &[&'static str]) -> Result<Self> {
        let mut parts = value.split(':');
        let (Some(field), Some(order), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(Error::InvalidSortParameter);
        };

        let column = allowed_column(field, columns).ok_or(Error::InvalidSortParameter)?;
        let direction = match order {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => return Err(Error::InvalidSortParameter),
        };

        Ok(Self { column, direction })
    }
}

/// Exact-match filters plus ordering for a collection GET
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub filters: Vec<(&'static str, String)>,
    pub sort: Vec<SortKey>,
}

impl ListQuery {
    /// Build from raw query pairs. Unknown parameters and empty filter
    /// values are ignored; the first value given for a column wins.
    pub fn parse(params: &[(String, String)], columns: &[&'static str]) -> Result<Self> {
        let mut query = ListQuery::default();

        for (key, value) in params {
            if key == SORT_PARAM {
                query.sort.push(SortKey::parse(value, columns)?);
                continue;
            }
            if value.is_empty() {
                continue;
            }
            if let Some(column) = allowed_column(key, columns) {
                if !query.filters.iter().any(|(c, _)| *c == column) {
                    query.filters.push((column, value.clone()));
                }
            }
        }

        Ok(query)
    }

    /// Append WHERE and ORDER BY clauses to a bare `SELECT ... FROM table`
    pub fn to_sql(&self, select: &str) -> String {
        let mut sql = format!("{} WHERE 1=1", select);

        for (i, (column, _)) in self.filters.iter().enumerate() {
            sql.push_str(&format!(" AND {} = ${}", column, i + 1));
        }

        if !self.sort.is_empty() {
            let order: Vec<String> = self
                .sort
                .iter()
                .map(|key| format!("{} {}", key.column, key.direction))
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&order.join(", "));
        }

        sql
    }

    /// Bind values matching the placeholders of [`ListQuery::to_sql`]
    pub fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.filters
            .iter()
            .map(|(_, value)| value as &(dyn ToSql + Sync))
            .collect()
    }
}

fn allowed_column(name: &str, columns: &[&'static str]) -> Option<&'static str> {
    columns.iter().copied().find(|column| *column == name)
}
