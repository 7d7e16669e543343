//! Read requests against a collection: column selection, equality filters and
//! a single ordering column.

use std::cmp::Ordering;

use serde_json::Value;

/// Sort direction for [`Query::order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    fn as_str(self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

/// A read request, built fluently:
///
/// ```ignore
/// Query::select(&["id", "date"]).eq("user_id", user_id).order("date", Order::Desc)
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub columns: Vec<String>,
    pub filters: Vec<(String, String)>,
    pub order: Option<(String, Order)>,
}

impl Query {
    pub fn select(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Keep only records whose `column` equals `value`.
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters.push((column.to_string(), value.to_string()));
        self
    }

    pub fn order(mut self, column: &str, direction: Order) -> Self {
        self.order = Some((column.to_string(), direction));
        self
    }

    /// Render as data store query-string parameters
    /// (`select=a,b`, `col=eq.value`, `order=col.desc`).
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(self.filters.len() + 2);
        if !self.columns.is_empty() {
            params.push(("select".to_string(), self.columns.join(",")));
        }
        for (column, value) in &self.filters {
            params.push((column.clone(), format!("eq.{value}")));
        }
        if let Some((column, direction)) = &self.order {
            params.push(("order".to_string(), format!("{column}.{}", direction.as_str())));
        }
        params
    }

    /// Whether a JSON record passes every filter.
    pub fn matches(&self, record: &Value) -> bool {
        self.filters
            .iter()
            .all(|(column, expected)| value_equals(record.get(column), expected))
    }

    /// Sort records in place by the query's ordering column, if any.
    ///
    /// Missing or null values sort last in either direction.
    pub fn sort(&self, records: &mut [Value]) {
        let Some((column, direction)) = &self.order else {
            return;
        };
        records.sort_by(|a, b| {
            let (a, b) = (a.get(column), b.get(column));
            match (is_present(a), is_present(b)) {
                (false, false) => Ordering::Equal,
                (false, true) => Ordering::Greater,
                (true, false) => Ordering::Less,
                (true, true) => {
                    let ord = compare_values(a, b);
                    match direction {
                        Order::Asc => ord,
                        Order::Desc => ord.reverse(),
                    }
                }
            }
        });
    }

    /// Keep only the selected columns of a record.
    pub fn project(&self, record: &Value) -> Value {
        match record {
            Value::Object(map) if !self.columns.is_empty() => Value::Object(
                map.iter()
                    .filter(|(k, _)| self.columns.iter().any(|c| c == *k))
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            ),
            other => other.clone(),
        }
    }
}

fn is_present(value: Option<&Value>) -> bool {
    !matches!(value, None | Some(Value::Null))
}

fn value_equals(value: Option<&Value>, expected: &str) -> bool {
    match value {
        Some(Value::String(s)) => s == expected,
        Some(Value::Number(n)) => n.to_string() == expected,
        Some(Value::Bool(b)) => b.to_string() == expected,
        _ => false,
    }
}

/// Numbers compare numerically, strings lexicographically (ISO dates sort
/// chronologically this way). Mixed types compare equal.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => x
                .as_f64()
                .partial_cmp(&y.as_f64())
                .unwrap_or(Ordering::Equal),
        },
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => Ordering::Equal,
    }
}
