//! Single-product lookup and the detail field list.

use crate::product::NormalizedProduct;

/// First product whose effective id, in display form, equals `id`.
#[must_use]
pub fn find_product<'a>(
    products: &'a [NormalizedProduct],
    id: &str,
) -> Option<&'a NormalizedProduct> {
    products.iter().find(|p| p.id.to_string() == id)
}

/// A labelled line of the detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailField {
    pub label: &'static str,
    pub value: String,
}

impl DetailField {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// Fields shown for one product, in display order.
#[must_use]
pub fn detail_fields(product: &NormalizedProduct) -> Vec<DetailField> {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    vec![
        DetailField::new("Name", text(&product.name)),
        DetailField::new("Product ID", product.id.to_string()),
        DetailField::new("Brand", text(&product.brand)),
        DetailField::new("Description", text(&product.description)),
        DetailField::new("SKU Code", text(&product.sku_code)),
        DetailField::new("Main Category", text(&product.main_category)),
        DetailField::new("Activation Date", product.activation_date.to_string()),
        DetailField::new("Deactivation Date", product.deactivation_date.to_string()),
        DetailField::new("Price", format!("${}", product.price_label())),
    ]
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::normalize::normalize_payload;

    #[test]
    fn finds_by_string_form_of_effective_id() {
        let products = normalize_payload(json!({
            "products": [{"id": "p1", "name": "Milk"}, {"id": 42, "name": "Tea"}, {"name": "Eggs"}]
        }));
        assert_eq!(find_product(&products, "p1").unwrap().name.as_deref(), Some("Milk"));
        assert_eq!(find_product(&products, "42").unwrap().name.as_deref(), Some("Tea"));
        assert_eq!(find_product(&products, "2").unwrap().name.as_deref(), Some("Eggs"));
        assert!(find_product(&products, "P1").is_none());
    }

    #[test]
    fn colliding_ids_resolve_to_first_match() {
        let products = normalize_payload(json!({
            "products": [{"id": 1, "name": "Real"}, {"name": "Fallback"}]
        }));
        assert_eq!(find_product(&products, "1").unwrap().name.as_deref(), Some("Real"));
    }

    #[test]
    fn detail_fields_render_dates_and_price() {
        let products = normalize_payload(json!({
            "products": [{
                "id": "p1",
                "name": "Milk",
                "brand": "Amul",
                "main_category": "Dairy",
                "activation_date": "2024-02-01",
                "price": 2.5
            }]
        }));
        let fields = detail_fields(&products[0]);
        let lookup = |label: &str| {
            fields
                .iter()
                .find(|f| f.label == label)
                .map(|f| f.value.as_str())
        };
        assert_eq!(lookup("Activation Date"), Some("02/01/2024"));
        assert_eq!(lookup("Deactivation Date"), Some("Invalid Date"));
        assert_eq!(lookup("Price"), Some("$2.50"));
        assert_eq!(lookup("Main Category"), Some("Dairy"));
        assert_eq!(fields.len(), 9);
    }
}
