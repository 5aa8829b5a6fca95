use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::dates::DateField;

/// Effective identifier of a normalized product.
///
/// `Index` is the positional fallback used when the source record carries no
/// truthy `id`. It can coincide with a real numeric id elsewhere in the same
/// collection; no attempt is made to disambiguate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductId {
    Text(String),
    Number(Number),
    Index(usize),
}

impl ProductId {
    fn as_f64(&self) -> Option<f64> {
        match self {
            ProductId::Text(_) => None,
            ProductId::Number(n) => n.as_f64(),
            ProductId::Index(i) => u32::try_from(*i).ok().map(f64::from),
        }
    }

    /// Numeric ids sort before text ids; each group sorts naturally.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.to_string().cmp(&other.to_string()),
        }
    }
}

/// The form used in navigation tokens and detail lookup.
impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Text(s) => f.write_str(s),
            ProductId::Index(i) => write!(f, "{i}"),
            ProductId::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    return write!(f, "{n}");
                }
                match n.as_f64() {
                    Some(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{v:.0}"),
                    Some(v) => write!(f, "{v}"),
                    None => write!(f, "{n}"),
                }
            }
        }
    }
}

impl Serialize for ProductId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ProductId::Text(s) => serializer.serialize_str(s),
            ProductId::Number(n) => n.serialize(serializer),
            ProductId::Index(i) => i.serialize(serializer),
        }
    }
}

/// A catalog record after id, date and price defaulting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedProduct {
    pub id: ProductId,
    pub name: Option<String>,
    pub main_category: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub sku_code: Option<String>,
    pub activation_date: DateField,
    pub deactivation_date: DateField,
    /// Always finite; `0.0` when the source price was missing or unusable.
    pub price: f64,
    /// Source fields this crate does not interpret, carried through as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NormalizedProduct {
    /// Name used for text filtering; a missing name filters as empty.
    #[must_use]
    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Price with two decimals, e.g. `2.50`.
    #[must_use]
    pub fn price_label(&self) -> String {
        format!("{:.2}", self.price)
    }
}
