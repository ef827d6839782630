//! In-memory search and sort for admin list views.
//!
//! Admin tables operate on small, wholly-in-memory datasets: search is a
//! case-insensitive substring match across every column value, sort is a
//! single-column toggle. Rows are flattened through `serde_json::Value`
//! so the same code serves every entity.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    pub fn toggle(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Query parameters accepted by every admin list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// Substring matched against all column values, case-insensitive.
    pub q: Option<String>,
    /// Column (field name) to sort by.
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_dir: SortDir,
}

impl ListQuery {
    pub fn is_noop(&self) -> bool {
        self.q.as_deref().is_none_or(str::is_empty) && self.sort_by.is_none()
    }
}

/// Apply `query` to `rows`, preserving the incoming order of equal keys.
pub fn apply<T: Serialize>(rows: Vec<T>, query: &ListQuery) -> Vec<T> {
    if query.is_noop() {
        return rows;
    }

    let mut paired: Vec<(Value, T)> = rows
        .into_iter()
        .map(|row| (serde_json::to_value(&row).unwrap_or(Value::Null), row))
        .collect();

    if let Some(q) = query.q.as_deref().filter(|q| !q.is_empty()) {
        let needle = q.to_lowercase();
        paired.retain(|(value, _)| value_matches(value, &needle));
    }

    if let Some(column) = query.sort_by.as_deref() {
        paired.sort_by(|(a, _), (b, _)| {
            let ord = compare_fields(a.get(column), b.get(column));
            match query.sort_dir {
                SortDir::Asc => ord,
                SortDir::Desc => ord.reverse(),
            }
        });
    }

    paired.into_iter().map(|(_, row)| row).collect()
}

fn value_matches(value: &Value, needle: &str) -> bool {
    match value {
        Value::Object(map) => map.values().any(|v| value_matches(v, needle)),
        Value::Array(items) => items.iter().any(|v| value_matches(v, needle)),
        Value::String(s) => s.to_lowercase().contains(needle),
        Value::Number(n) => n.to_string().contains(needle),
        Value::Bool(b) => b.to_string() == needle,
        Value::Null => false,
    }
}

fn compare_fields(a: Option<&Value>, b: Option<&Value>) -> std::cmp::Ordering {
    use std::cmp::Ordering;

    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => {
            x.to_lowercase().cmp(&y.to_lowercase())
        }
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        // Missing or mixed-type fields sort last so real values surface first.
        (Some(Value::Null), Some(Value::Null)) | (None, None) => Ordering::Equal,
        (Some(Value::Null), Some(_)) | (None, Some(_)) => Ordering::Greater,
        (Some(_), Some(Value::Null)) | (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, Clone, Serialize, PartialEq)]
    struct Row {
        id: i64,
        name: String,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                id: 1,
                name: "Zeta".into(),
            },
            Row {
                id: 2,
                name: "Alpha".into(),
            },
        ]
    }

    #[test]
    fn sort_ascending_then_toggle() {
        let query = ListQuery {
            sort_by: Some("name".into()),
            ..Default::default()
        };
        let sorted = apply(rows(), &query);
        assert_eq!(
            sorted.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
            ["Alpha", "Zeta"]
        );

        let query = ListQuery {
            sort_dir: query.sort_dir.toggle(),
            ..query
        };
        let sorted = apply(rows(), &query);
        assert_eq!(
            sorted.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
            ["Zeta", "Alpha"]
        );
    }

    #[test]
    fn search_matches_any_column_case_insensitive() {
        let query = ListQuery {
            q: Some("alph".into()),
            ..Default::default()
        };
        let found = apply(rows(), &query);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Alpha");
    }

    #[test]
    fn search_matches_numbers_too() {
        let query = ListQuery {
            q: Some("2".into()),
            ..Default::default()
        };
        let found = apply(rows(), &query);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);
    }

    #[test]
    fn noop_query_returns_rows_unchanged() {
        let query = ListQuery::default();
        assert_eq!(apply(rows(), &query), rows());
    }

    #[test]
    fn missing_sort_column_keeps_all_rows() {
        let query = ListQuery {
            sort_by: Some("nope".into()),
            ..Default::default()
        };
        assert_eq!(apply(rows(), &query).len(), 2);
    }
}
