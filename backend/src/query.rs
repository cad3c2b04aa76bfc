//! Table select description, rendered to REST query parameters.

use serde_json::Value;

/// A table row as returned by the backend.
pub type Row = serde_json::Map<String, Value>;

/// Comparison applied by a [`Filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    /// Case-insensitive equality on a text column. The value is matched
    /// literally; pattern characters are escaped when rendered.
    EqIgnoreCase,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    /// `true` when `stored` satisfies this filter.
    #[must_use]
    pub fn matches(&self, stored: Option<&Value>) -> bool {
        match self.op {
            FilterOp::Eq => values_equal(stored, &self.value),
            FilterOp::EqIgnoreCase => match (stored, &self.value) {
                (Some(Value::String(a)), Value::String(b)) => a.to_lowercase() == b.to_lowercase(),
                (stored, wanted) => values_equal(stored, wanted),
            },
        }
    }

    fn render(&self) -> String {
        match self.op {
            FilterOp::Eq => format!("eq.{}", filter_literal(&self.value)),
            FilterOp::EqIgnoreCase => format!("ilike.{}", escape_like(&filter_literal(&self.value))),
        }
    }
}

pub(crate) fn values_equal(stored: Option<&Value>, wanted: &Value) -> bool {
    match (stored, wanted) {
        (Some(Value::Number(a)), Value::Number(b)) => a.as_f64() == b.as_f64(),
        (Some(a), b) => a == b,
        (None, Value::Null) => true,
        (None, _) => false,
    }
}

/// Escape LIKE wildcards (and the REST layer's `*` alias for `%`).
fn escape_like(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    for c in literal.chars() {
        if matches!(c, '\\' | '%' | '_' | '*') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

/// A select against a single table.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub table: String,
    pub columns: String,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
}

impl Select {
    /// Select every column of `table`.
    #[must_use]
    pub fn from(table: impl Into<String>) -> Self {
        Self { table: table.into(), columns: "*".into(), filters: Vec::new(), order: None, limit: None }
    }

    /// Restrict the selected columns (comma separated, as the REST layer expects).
    #[must_use]
    pub fn columns(mut self, columns: impl Into<String>) -> Self {
        self.columns = columns.into();
        self
    }

    #[must_use]
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter { column: column.into(), op: FilterOp::Eq, value: value.into() });
        self
    }

    /// Case-insensitive equality on a text column.
    #[must_use]
    pub fn eq_ignore_case(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(Filter { column: column.into(), op: FilterOp::EqIgnoreCase, value: Value::String(value.into()) });
        self
    }

    #[must_use]
    pub fn order_by(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.order = Some(Order { column: column.into(), ascending });
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Column names named by `columns`, or `None` for `*`.
    #[must_use]
    pub fn column_list(&self) -> Option<Vec<&str>> {
        let trimmed = self.columns.trim();
        if trimmed == "*" {
            return None;
        }
        Some(trimmed.split(',').map(str::trim).filter(|c| !c.is_empty()).collect())
    }

    /// Query-string pairs in REST filter syntax (`col=eq.value`, `col=ilike.value`, `order=col.asc`).
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_owned(), self.columns.clone())];
        for filter in &self.filters {
            pairs.push((filter.column.clone(), filter.render()));
        }
        if let Some(order) = &self.order {
            let dir = if order.ascending { "asc" } else { "desc" };
            pairs.push(("order".to_owned(), format!("{}.{dir}", order.column)));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_owned(), limit.to_string()));
        }
        pairs
    }
}

fn filter_literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_owned(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
