use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Collection, Document};

/// A single predicate on one document field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Condition {
    /// Field equals the value.
    Eq(String, Value),
    /// Field is greater than or equal to the value.
    Gte(String, Value),
    /// Field is strictly less than the value.
    Lt(String, Value),
    /// Field is a string of exactly this many Unicode code points.
    StrLen(String, usize),
}

impl Condition {
    /// Evaluate this condition against a document.
    #[must_use]
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Self::Eq(field, want) => doc
                .get(field)
                .is_some_and(|v| compare_values(v, want) == Some(Ordering::Equal)),
            Self::Gte(field, bound) => doc.get(field).is_some_and(|v| {
                matches!(
                    compare_values(v, bound),
                    Some(Ordering::Greater | Ordering::Equal)
                )
            }),
            Self::Lt(field, bound) => doc
                .get(field)
                .is_some_and(|v| compare_values(v, bound) == Some(Ordering::Less)),
            Self::StrLen(field, n) => doc
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|s| s.chars().count() == *n),
        }
    }
}

/// Conjunction of conditions; the empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    /// The match-all filter.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            conditions: Vec::new(),
        }
    }

    /// Add a raw condition.
    #[must_use]
    pub fn and(mut self, c: Condition) -> Self {
        self.conditions.push(c);
        self
    }

    /// Add a field equality condition.
    #[must_use]
    pub fn eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.and(Condition::Eq(field.into(), value.into()))
    }

    /// Add a lower bound (inclusive).
    #[must_use]
    pub fn gte(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.and(Condition::Gte(field.into(), value.into()))
    }

    /// Add an upper bound (exclusive).
    #[must_use]
    pub fn lt(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.and(Condition::Lt(field.into(), value.into()))
    }

    /// Add a string code-point length condition.
    #[must_use]
    pub fn str_len(self, field: impl Into<String>, n: usize) -> Self {
        self.and(Condition::StrLen(field.into(), n))
    }

    /// The conditions in insertion order.
    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// True when every condition matches `doc`.
    #[must_use]
    pub fn matches(&self, doc: &Document) -> bool {
        self.conditions.iter().all(|c| c.matches(doc))
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

/// Single-field sort order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    /// Field to sort by.
    pub field: String,
    /// Direction.
    pub direction: SortDirection,
}

impl Sort {
    /// Ascending sort on `field`.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Descending sort on `field`.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }

    /// Compare two documents under this sort. Documents missing the field sort
    /// before those that have it (in ascending order).
    #[must_use]
    pub fn compare(&self, a: &Document, b: &Document) -> Ordering {
        let ord = match (a.get(&self.field), b.get(&self.field)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(x), Some(y)) => {
                compare_values(x, y).unwrap_or_else(|| kind_rank(x).cmp(&kind_rank(y)))
            }
        };
        match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// A filtered, sorted, windowed read against one collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindQuery {
    /// Collection to read.
    pub collection: Collection,
    /// Documents must match this filter.
    pub filter: Filter,
    /// Optional order; `None` means the store's natural order.
    pub sort: Option<Sort>,
    /// Matching documents to skip before returning results.
    pub skip: usize,
    /// Maximum documents to return; `None` means all.
    pub limit: Option<usize>,
}

impl FindQuery {
    /// Match-all query over `collection` in natural order.
    #[must_use]
    pub fn new(collection: Collection) -> Self {
        Self {
            collection,
            filter: Filter::new(),
            sort: None,
            skip: 0,
            limit: None,
        }
    }

    /// Replace the filter.
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Set the sort order.
    #[must_use]
    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Set the number of documents to skip.
    #[must_use]
    pub const fn skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    /// Set the maximum number of documents to return.
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Order two JSON values of the same kind.
///
/// Numbers compare numerically (integers exactly, otherwise as `f64`), strings
/// and booleans compare naturally, `null` equals `null`. Values of different
/// kinds, arrays, and objects are incomparable.
#[must_use]
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(i), Some(j)) => Some(i.cmp(&j)),
            _ => x.as_f64()?.partial_cmp(&y.as_f64()?),
        },
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        _ => None,
    }
}

const fn kind_rank(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Number(_) => 1,
        Value::String(_) => 2,
        Value::Object(_) => 3,
        Value::Array(_) => 4,
        Value::Bool(_) => 5,
    }
}
