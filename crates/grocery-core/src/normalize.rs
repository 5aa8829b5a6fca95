//! Normalization from the gateway's raw JSON payload to [`NormalizedProduct`].
//!
//! The gateway's records are only partially trusted. Every field is read
//! with JavaScript-style truthiness: `null`, `false`, `0`, `NaN` and `""`
//! count as absent. Malformed payloads degrade to an empty collection; this
//! module never fails.

use serde_json::{Map, Value};

use crate::dates::{self, DateField};
use crate::product::{NormalizedProduct, ProductId};

/// Key under which the gateway returns its product array.
pub const PRODUCTS_KEY: &str = "products";

/// Normalizes a whole gateway payload.
///
/// Returns an empty collection when the payload is not an object, or when
/// `products` is missing or not an array.
#[must_use]
pub fn normalize_payload(payload: Value) -> Vec<NormalizedProduct> {
    let Value::Object(mut fields) = payload else {
        return Vec::new();
    };
    match fields.remove(PRODUCTS_KEY) {
        Some(Value::Array(records)) => normalize_products(records),
        _ => Vec::new(),
    }
}

/// Normalizes records in order, using each record's position as its
/// fallback id.
#[must_use]
pub fn normalize_products(records: Vec<Value>) -> Vec<NormalizedProduct> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| normalize_record(record, index))
        .collect()
}

/// Normalizes one record found at `index` in the incoming sequence.
///
/// A record that is not a JSON object normalizes like an empty object.
#[must_use]
pub fn normalize_record(record: Value, index: usize) -> NormalizedProduct {
    let mut fields = match record {
        Value::Object(fields) => fields,
        _ => Map::new(),
    };

    let id = effective_id(fields.remove("id"), index);
    let activation_date = date_field(fields.remove("activation_date"));
    let deactivation_date = date_field(fields.remove("deactivation_date"));
    let price = price_field(fields.remove("price"));

    NormalizedProduct {
        id,
        name: text_field(fields.remove("name")),
        main_category: text_field(fields.remove("main_category")),
        brand: text_field(fields.remove("brand")),
        description: text_field(fields.remove("description")),
        sku_code: text_field(fields.remove("sku_code")),
        activation_date,
        deactivation_date,
        price,
        extra: fields,
    }
}

pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0 && !v.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn truthy(value: Option<Value>) -> Option<Value> {
    value.filter(is_truthy)
}

fn effective_id(raw: Option<Value>, index: usize) -> ProductId {
    match truthy(raw) {
        Some(Value::String(s)) => ProductId::Text(s),
        Some(Value::Number(n)) => ProductId::Number(n),
        Some(other) => ProductId::Text(other.to_string()),
        None => ProductId::Index(index),
    }
}

fn date_field(raw: Option<Value>) -> DateField {
    match truthy(raw) {
        Some(Value::String(s)) => dates::parse_date(&s),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(millis) => dates::from_epoch_millis(millis),
            None => n.as_f64().map_or(DateField::Invalid, dates::from_epoch_millis_f64),
        },
        _ => DateField::Invalid,
    }
}

fn price_field(raw: Option<Value>) -> f64 {
    let price = match truthy(raw) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    price.filter(|p| p.is_finite()).unwrap_or(0.0)
}

fn text_field(raw: Option<Value>) -> Option<String> {
    match raw? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
