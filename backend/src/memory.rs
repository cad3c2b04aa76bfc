//! In-process backend with the hosted backend's error behavior.
//!
//! DESIGN
//! ======
//! Tables are registered with a column list, a primary key and any extra
//! unique columns. Writes and selects are checked against that schema and
//! fail with the same [`ErrorKind`]s the REST layer produces: unknown table
//! → `MissingRelation`, unknown column → `MissingColumn`, denied table →
//! `PermissionDenied`, duplicate key → `UniqueViolation`.
//!
//! Upsert has no native primitive here, so it is spelled out: select the row
//! sharing the conflict column, then update it in place or insert.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

use crate::error::{BackendError, ErrorKind};
use crate::query::{Row, Select, values_equal};
use crate::records::{
    ADMIN_USER_COLUMNS, ADMIN_USERS_TABLE, APPOINTMENT_COLUMNS, APPOINTMENTS_TABLE, CONTACT_MESSAGE_COLUMNS,
    CONTACT_MESSAGES_TABLE, LAWYER_COLUMNS, LAWYERS_TABLE,
};
use crate::{AuthUser, Backend, NewAuthUser};

const CREATED_AT: &str = "created_at";

// =============================================================================
// SCHEMA
// =============================================================================

/// How a missing primary key is filled on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDefault {
    /// The caller must supply the key.
    None,
    /// Next integer after the largest seen.
    Serial,
    /// Random v4 UUID.
    Uuid,
}

#[derive(Debug, Clone)]
pub struct TableSpec {
    pub name: String,
    pub columns: Vec<String>,
    pub primary_key: String,
    pub unique: Vec<String>,
    pub key_default: KeyDefault,
}

impl TableSpec {
    #[must_use]
    pub fn new(name: &str, columns: &[&str], primary_key: &str) -> Self {
        Self {
            name: name.to_owned(),
            columns: columns.iter().map(|c| (*c).to_owned()).collect(),
            primary_key: primary_key.to_owned(),
            unique: Vec::new(),
            key_default: KeyDefault::None,
        }
    }

    #[must_use]
    pub fn unique(mut self, column: &str) -> Self {
        self.unique.push(column.to_owned());
        self
    }

    #[must_use]
    pub fn key_default(mut self, key_default: KeyDefault) -> Self {
        self.key_default = key_default;
        self
    }

    fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    fn unique_columns(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary_key.as_str()).chain(self.unique.iter().map(String::as_str))
    }
}

// =============================================================================
// BACKEND
// =============================================================================

struct Table {
    spec: TableSpec,
    rows: Vec<Row>,
    next_serial: i64,
}

#[derive(Default)]
struct Inner {
    tables: HashMap<String, Table>,
    users: Vec<AuthUser>,
    denied: HashSet<String>,
    auth_denied: bool,
}

#[derive(Default)]
pub struct MemoryBackend {
    inner: Mutex<Inner>,
}

impl MemoryBackend {
    /// An empty backend with no tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend with the four site tables registered and empty.
    #[must_use]
    pub fn with_site_schema() -> Self {
        let backend = Self::new();
        backend.register(TableSpec::new(LAWYERS_TABLE, LAWYER_COLUMNS, "id").unique("referral_code"));
        backend.register(TableSpec::new(ADMIN_USERS_TABLE, ADMIN_USER_COLUMNS, "user_id").unique("email"));
        backend.register(TableSpec::new(APPOINTMENTS_TABLE, APPOINTMENT_COLUMNS, "id").key_default(KeyDefault::Uuid));
        backend.register(
            TableSpec::new(CONTACT_MESSAGES_TABLE, CONTACT_MESSAGE_COLUMNS, "id").key_default(KeyDefault::Uuid),
        );
        backend
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Register (or replace) a table.
    pub fn register(&self, spec: TableSpec) {
        let name = spec.name.clone();
        self.lock()
            .tables
            .insert(name, Table { spec, rows: Vec::new(), next_serial: 1 });
    }

    /// Drop a table so later calls see a missing relation.
    pub fn drop_table(&self, table: &str) {
        self.lock().tables.remove(table);
    }

    /// Make every call on `table` fail with a permission error.
    pub fn deny_table(&self, table: &str) {
        self.lock().denied.insert(table.to_owned());
    }

    /// Make every auth-admin call fail with a permission error.
    pub fn deny_auth(&self) {
        self.lock().auth_denied = true;
    }

    /// Seed an auth identity directly, keeping the email exactly as given.
    pub fn add_auth_user(&self, email: &str) -> AuthUser {
        let user = new_auth_user(email);
        self.lock().users.push(user.clone());
        user
    }

    /// Snapshot of every auth identity.
    #[must_use]
    pub fn auth_users(&self) -> Vec<AuthUser> {
        self.lock().users.clone()
    }

    /// Snapshot of a table's rows in storage order; empty if the table is absent.
    #[must_use]
    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.lock()
            .tables
            .get(table)
            .map(|t| t.rows.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl Backend for MemoryBackend {
    async fn create_auth_user(&self, user: &NewAuthUser) -> Result<AuthUser, BackendError> {
        let mut inner = self.lock();
        if inner.auth_denied {
            return Err(auth_denied());
        }
        let email = user.email.trim();
        if inner
            .users
            .iter()
            .any(|u| u.email.as_deref().is_some_and(|e| e.eq_ignore_ascii_case(email)))
        {
            return Err(BackendError::new(
                ErrorKind::AlreadyExists,
                "A user with this email address has already been registered",
            )
            .with_code("email_exists")
            .with_status(422));
        }
        let mut created = new_auth_user(email);
        if user.email_confirm {
            created.email_confirmed_at = created.created_at.clone();
        }
        inner.users.push(created.clone());
        Ok(created)
    }

    async fn list_auth_users(&self) -> Result<Vec<AuthUser>, BackendError> {
        let inner = self.lock();
        if inner.auth_denied {
            return Err(auth_denied());
        }
        Ok(inner.users.clone())
    }

    async fn select(&self, query: &Select) -> Result<Vec<Row>, BackendError> {
        let inner = self.lock();
        let table = table_ref(&inner, &query.table)?;

        for filter in &query.filters {
            require_column(&table.spec, &filter.column)?;
        }
        if let Some(order) = &query.order {
            require_column(&table.spec, &order.column)?;
        }
        let projection = query.column_list();
        if let Some(columns) = &projection {
            for column in columns {
                require_column(&table.spec, column)?;
            }
        }

        let mut rows: Vec<Row> = table
            .rows
            .iter()
            .filter(|row| {
                query
                    .filters
                    .iter()
                    .all(|f| f.matches(row.get(&f.column)))
            })
            .cloned()
            .collect();

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ord = compare_values(a.get(&order.column), b.get(&order.column));
                if order.ascending { ord } else { ord.reverse() }
            });
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }
        if let Some(columns) = projection {
            rows = rows.into_iter().map(|row| project(row, &columns)).collect();
        }
        Ok(rows)
    }

    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<Vec<Row>, BackendError> {
        let mut inner = self.lock();
        let target = table_mut(&mut inner, table)?;
        let mut staged = target.rows.clone();
        let mut serial = target.next_serial;
        let mut inserted = Vec::with_capacity(rows.len());

        for row in rows {
            let row = prepare_row(&target.spec, row, &mut serial)?;
            check_unique(&target.spec, &staged, &row, None)?;
            staged.push(row.clone());
            inserted.push(row);
        }

        target.rows = staged;
        target.next_serial = serial;
        Ok(inserted)
    }

    async fn upsert(&self, table: &str, rows: Vec<Row>, on_conflict: &str) -> Result<Vec<Row>, BackendError> {
        let mut inner = self.lock();
        let target = table_mut(&mut inner, table)?;
        require_column(&target.spec, on_conflict)?;

        let mut staged = target.rows.clone();
        let mut serial = target.next_serial;
        let mut written = Vec::with_capacity(rows.len());

        for row in rows {
            for column in row.keys() {
                require_column(&target.spec, column)?;
            }
            let existing = row
                .get(on_conflict)
                .filter(|v| !v.is_null())
                .and_then(|key| {
                    staged
                        .iter()
                        .position(|r| values_equal(r.get(on_conflict), key))
                });

            match existing {
                Some(index) => {
                    let mut merged = staged[index].clone();
                    for (column, value) in row {
                        merged.insert(column, value);
                    }
                    check_unique(&target.spec, &staged, &merged, Some(index))?;
                    staged[index] = merged.clone();
                    written.push(merged);
                }
                None => {
                    let row = prepare_row(&target.spec, row, &mut serial)?;
                    check_unique(&target.spec, &staged, &row, None)?;
                    staged.push(row.clone());
                    written.push(row);
                }
            }
        }

        target.rows = staged;
        target.next_serial = serial;
        Ok(written)
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn new_auth_user(email: &str) -> AuthUser {
    AuthUser { id: Uuid::new_v4(), email: Some(email.to_owned()), email_confirmed_at: None, created_at: Some(now()) }
}

fn now() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

fn auth_denied() -> BackendError {
    BackendError::new(ErrorKind::PermissionDenied, "User not allowed")
        .with_code("not_admin")
        .with_status(403)
}

fn check_access(inner: &Inner, table: &str) -> Result<(), BackendError> {
    if inner.denied.contains(table) {
        return Err(BackendError::new(ErrorKind::PermissionDenied, format!("permission denied for table {table}"))
            .with_code("42501")
            .with_status(403));
    }
    Ok(())
}

fn missing_relation(table: &str) -> BackendError {
    BackendError::new(ErrorKind::MissingRelation, format!("relation \"public.{table}\" does not exist"))
        .with_code("42P01")
        .with_status(404)
}

fn table_ref<'a>(inner: &'a Inner, table: &str) -> Result<&'a Table, BackendError> {
    check_access(inner, table)?;
    inner.tables.get(table).ok_or_else(|| missing_relation(table))
}

fn table_mut<'a>(inner: &'a mut Inner, table: &str) -> Result<&'a mut Table, BackendError> {
    check_access(inner, table)?;
    inner
        .tables
        .get_mut(table)
        .ok_or_else(|| missing_relation(table))
}

fn require_column(spec: &TableSpec, column: &str) -> Result<(), BackendError> {
    if spec.has_column(column) {
        return Ok(());
    }
    Err(BackendError::new(ErrorKind::MissingColumn, format!("column {}.{column} does not exist", spec.name))
        .with_code("42703")
        .with_status(400))
}

/// Validate columns, fill the primary key and `created_at`, and pad unset columns with null.
fn prepare_row(spec: &TableSpec, mut row: Row, serial: &mut i64) -> Result<Row, BackendError> {
    for column in row.keys() {
        require_column(spec, column)?;
    }

    let key_missing = row.get(&spec.primary_key).is_none_or(Value::is_null);
    if key_missing {
        let generated = match spec.key_default {
            KeyDefault::Serial => Value::from(*serial),
            KeyDefault::Uuid => Value::String(Uuid::new_v4().to_string()),
            KeyDefault::None => {
                return Err(BackendError::new(
                    ErrorKind::Other,
                    format!("null value in column \"{}\" violates not-null constraint", spec.primary_key),
                )
                .with_code("23502")
                .with_status(400));
            }
        };
        row.insert(spec.primary_key.clone(), generated);
    }
    if spec.key_default == KeyDefault::Serial {
        if let Some(id) = row.get(&spec.primary_key).and_then(Value::as_i64) {
            *serial = (*serial).max(id.saturating_add(1));
        }
    }

    if spec.has_column(CREATED_AT) && row.get(CREATED_AT).is_none_or(Value::is_null) {
        row.insert(CREATED_AT.to_owned(), Value::String(now()));
    }
    for column in &spec.columns {
        row.entry(column.clone()).or_insert(Value::Null);
    }
    Ok(row)
}

fn check_unique(spec: &TableSpec, rows: &[Row], candidate: &Row, skip: Option<usize>) -> Result<(), BackendError> {
    for column in spec.unique_columns() {
        let Some(value) = candidate.get(column).filter(|v| !v.is_null()) else {
            continue;
        };
        let clash = rows
            .iter()
            .enumerate()
            .any(|(i, r)| Some(i) != skip && values_equal(r.get(column), value));
        if clash {
            return Err(BackendError::new(
                ErrorKind::UniqueViolation,
                format!("duplicate key value violates unique constraint \"{}_{column}_key\"", spec.name),
            )
            .with_code("23505")
            .with_details(format!("Key ({column})=({}) already exists.", display_value(value)))
            .with_status(409));
        }
    }
    Ok(())
}

fn project(row: Row, columns: &[&str]) -> Row {
    row.into_iter()
        .filter(|(k, _)| columns.contains(&k.as_str()))
        .collect()
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Equality with numbers compared by value, so `1` matches `1.0`.
/// Nulls sort first; numbers numerically; everything else by its JSON text.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.unwrap_or(&Value::Null);
    let b = b.unwrap_or(&Value::Null);
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (x, y) => x.to_string().cmp(&y.to_string()),
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
