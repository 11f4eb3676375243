//! Typed building blocks for dynamic SQL.
//!
//! List filters and partial updates vary per request, so their SQL is
//! assembled at runtime. Column names are always `&'static str` constants
//! chosen by the repository; every caller-supplied value goes through a bind
//! parameter.

use chrono::{DateTime, Utc};
use domain::models::Patch;
use domain::services::Visibility;
use serde_json::Value as JsonValue;
use sqlx::{Postgres, QueryBuilder};

use crate::entities::UserRoleDb;

/// A value that can be bound into a dynamic query.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i32),
    BigInt(i64),
    /// Nullable float; `None` binds SQL `NULL`.
    Float(Option<f64>),
    Bool(bool),
    Text(String),
    Json(JsonValue),
    Timestamp(DateTime<Utc>),
    IntArray(Vec<i32>),
    Role(UserRoleDb),
}

macro_rules! impl_sql_value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for SqlValue {
                fn from(value: $ty) -> Self {
                    SqlValue::$variant(value)
                }
            }
        )*
    };
}

impl_sql_value_from! {
    i32 => Int,
    i64 => BigInt,
    Option<f64> => Float,
    bool => Bool,
    String => Text,
    JsonValue => Json,
    DateTime<Utc> => Timestamp,
    Vec<i32> => IntArray,
    UserRoleDb => Role,
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Float(Some(value))
    }
}

fn push_value(qb: &mut QueryBuilder<'_, Postgres>, value: SqlValue) {
    match value {
        SqlValue::Int(v) => qb.push_bind(v),
        SqlValue::BigInt(v) => qb.push_bind(v),
        SqlValue::Float(v) => qb.push_bind(v),
        SqlValue::Bool(v) => qb.push_bind(v),
        SqlValue::Text(v) => qb.push_bind(v),
        SqlValue::Json(v) => qb.push_bind(v),
        SqlValue::Timestamp(v) => qb.push_bind(v),
        SqlValue::IntArray(v) => qb.push_bind(v),
        SqlValue::Role(v) => qb.push_bind(v),
    };
}

/// The `SET` list of a partial update.
#[derive(Debug, Clone, Default)]
pub struct Assignments {
    values: Vec<(&'static str, SqlValue)>,
    now_columns: Vec<&'static str>,
}

impl Assignments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, column: &'static str, value: impl Into<SqlValue>) -> Self {
        self.values.push((column, value.into()));
        self
    }

    /// Adds the column only when a value was supplied.
    pub fn set_some<T: Into<SqlValue>>(self, column: &'static str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.set(column, value),
            None => self,
        }
    }

    /// Adds a nullable column: `Null` clears it, `Absent` leaves it out.
    pub fn set_patch<T>(self, column: &'static str, patch: Patch<T>) -> Self
    where
        Option<T>: Into<SqlValue>,
    {
        match patch.change() {
            Some(value) => self.set(column, value),
            None => self,
        }
    }

    /// Sets the column to the database clock. Does not count as a change.
    pub fn touch(mut self, column: &'static str) -> Self {
        self.now_columns.push(column);
        self
    }

    /// True when no caller-supplied column is being set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Appends `col = $n, ...` (without the `SET` keyword).
    pub fn push_to(self, qb: &mut QueryBuilder<'_, Postgres>) {
        let mut first = true;
        for (column, value) in self.values {
            if !first {
                qb.push(", ");
            }
            first = false;
            qb.push(column).push(" = ");
            push_value(qb, value);
        }
        for column in self.now_columns {
            if !first {
                qb.push(", ");
            }
            first = false;
            qb.push(column).push(" = NOW()");
        }
    }
}

/// One clause of a `WHERE`.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Eq(&'static str, SqlValue),
    Gte(&'static str, SqlValue),
    Lte(&'static str, SqlValue),
    /// `parking_column` names a lot the user holds a grant for.
    LinkedToUser {
        parking_column: &'static str,
        user_id: i64,
    },
}

/// Clauses ANDed together; empty means no `WHERE` at all.
#[derive(Debug, Clone, Default)]
pub struct Predicates {
    clauses: Vec<Predicate>,
}

impl Predicates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, predicate: Predicate) -> Self {
        self.clauses.push(predicate);
        self
    }

    pub fn eq_opt<T: Into<SqlValue>>(self, column: &'static str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.and(Predicate::Eq(column, value.into())),
            None => self,
        }
    }

    pub fn gte_opt<T: Into<SqlValue>>(self, column: &'static str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.and(Predicate::Gte(column, value.into())),
            None => self,
        }
    }

    pub fn lte_opt<T: Into<SqlValue>>(self, column: &'static str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.and(Predicate::Lte(column, value.into())),
            None => self,
        }
    }

    /// Narrows rows to the caller's lots when their visibility is scoped.
    pub fn visible_to(self, parking_column: &'static str, visibility: Visibility) -> Self {
        match visibility {
            Visibility::All => self,
            Visibility::LinkedTo(user_id) => self.and(Predicate::LinkedToUser {
                parking_column,
                user_id,
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Appends ` WHERE ...` if there is at least one clause.
    pub fn push_where(self, qb: &mut QueryBuilder<'_, Postgres>) {
        for (i, clause) in self.clauses.into_iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            match clause {
                Predicate::Eq(column, value) => {
                    qb.push(column).push(" = ");
                    push_value(qb, value);
                }
                Predicate::Gte(column, value) => {
                    qb.push(column).push(" >= ");
                    push_value(qb, value);
                }
                Predicate::Lte(column, value) => {
                    qb.push(column).push(" <= ");
                    push_value(qb, value);
                }
                Predicate::LinkedToUser {
                    parking_column,
                    user_id,
                } => {
                    qb.push(parking_column)
                        .push(" IN (SELECT up.parking_id FROM user_parking up WHERE up.user_id = ");
                    qb.push_bind(user_id);
                    qb.push(")");
                }
            }
        }
    }
}
