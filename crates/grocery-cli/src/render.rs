//! Plain-text rendering of catalog snapshots and detail states.

use std::fmt::Write as _;

use grocery_client::{CatalogSnapshot, CatalogStatus};
use grocery_core::{detail_fields, GridColumn, LoadState, NormalizedProduct, SortDirection};

const ROW_HEADER: &str = "#";

/// Renders the grid as an aligned table. Row numbers are zero-based so they
/// can be passed straight to `:open`.
pub(crate) fn render_catalog(snapshot: &CatalogSnapshot) -> String {
    let mut out = String::new();

    if let Some(message) = &snapshot.notification {
        let _ = writeln!(out, "! {message} (:dismiss to hide)");
    }

    match snapshot.status {
        CatalogStatus::Loading => {
            out.push_str("Loading...\n");
            return out;
        }
        CatalogStatus::Failed => {
            out.push_str("No products to show.\n");
            return out;
        }
        CatalogStatus::Ready => {}
    }

    if !snapshot.categories.is_empty() {
        let selected = snapshot.state.category().unwrap_or("All");
        let _ = writeln!(
            out,
            "Category: {selected}  [{}]",
            snapshot.categories.join(", ")
        );
    }
    let sort: Vec<String> = snapshot
        .state
        .sort()
        .items()
        .iter()
        .map(ToString::to_string)
        .collect();
    let _ = writeln!(
        out,
        "Search: {:?}  Sort: {}",
        snapshot.state.search(),
        if sort.is_empty() {
            "none".to_string()
        } else {
            sort.join(", ")
        }
    );

    let mut table: Vec<Vec<String>> = Vec::with_capacity(snapshot.rows.len() + 1);
    table.push(
        std::iter::once(ROW_HEADER.to_string())
            .chain(GridColumn::ALL.iter().map(|&c| column_header(snapshot, c)))
            .collect(),
    );
    for (index, product) in snapshot.rows.iter().enumerate() {
        table.push(
            std::iter::once(index.to_string())
                .chain(GridColumn::ALL.iter().map(|c| c.cell(product)))
                .collect(),
        );
    }
    write_table(&mut out, &table);

    if snapshot.rows.is_empty() {
        out.push_str("No rows\n");
    }
    let _ = writeln!(
        out,
        "Page {} of {} ({} rows, {} per page)",
        snapshot.page + 1,
        snapshot.page_count.max(1),
        snapshot.total_rows,
        snapshot.state.page_size().get()
    );
    out
}

/// Header text, with `^` / `v` appended when the column is a sort key.
fn column_header(snapshot: &CatalogSnapshot, column: GridColumn) -> String {
    let key = snapshot
        .state
        .sort()
        .items()
        .iter()
        .find(|item| item.field == column.sort_field());
    match key.map(|item| item.direction) {
        Some(SortDirection::Asc) => format!("{} ^", column.header()),
        Some(SortDirection::Desc) => format!("{} v", column.header()),
        None => column.header().to_string(),
    }
}

fn write_table(out: &mut String, table: &[Vec<String>]) {
    let columns = table.first().map_or(0, Vec::len);
    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            table
                .iter()
                .map(|row| row[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    for row in table {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    }
}

pub(crate) fn render_details(state: &LoadState<NormalizedProduct>) -> String {
    match state {
        LoadState::Idle | LoadState::Loading => "Loading...\n".to_string(),
        LoadState::Error(error) => format!("{error}\n"),
        LoadState::Success(product) => {
            let fields = detail_fields(product);
            let width = fields.iter().map(|f| f.label.len() + 1).max().unwrap_or(0);
            let mut out = String::new();
            for field in fields {
                let label = format!("{}:", field.label);
                let _ = writeln!(out, "{label:<width$}  {}", field.value);
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use grocery_core::{normalize_payload, SortField, SortItem, SortModel, ViewError, ViewState};
    use serde_json::json;

    use super::*;

    fn ready_snapshot() -> CatalogSnapshot {
        let rows = normalize_payload(json!({
            "products": [
                {
                    "id": "p1",
                    "name": "Milk",
                    "brand": "Acme",
                    "main_category": "Dairy",
                    "price": 2.5
                }
            ]
        }));
        CatalogSnapshot {
            status: CatalogStatus::Ready,
            state: ViewState::default(),
            categories: vec!["Dairy".to_string()],
            rows,
            total_rows: 1,
            page: 0,
            page_count: 1,
            notification: None,
        }
    }

    #[test]
    fn catalog_table_lists_headers_and_cells() {
        let out = render_catalog(&ready_snapshot());
        let header = out
            .lines()
            .find(|line| line.starts_with(ROW_HEADER))
            .expect("header line");
        assert!(header.contains("SKU Code"));
        assert!(header.contains("Deactivation Date"));

        let row = out
            .lines()
            .find(|line| line.starts_with('0'))
            .expect("row line");
        assert!(row.contains("p1"));
        assert!(row.contains("Milk"));
        assert!(row.contains("Invalid Date"));
        assert!(row.ends_with("2.50"));
        assert!(out.contains("Page 1 of 1 (1 rows, 5 per page)"));
        assert!(out.contains("Sort: price:asc"));
    }

    #[test]
    fn sorted_columns_are_marked_in_header() {
        let mut snapshot = ready_snapshot();
        let header = |out: &str| {
            out.lines()
                .find(|line| line.starts_with(ROW_HEADER))
                .map(str::to_string)
                .expect("header line")
        };
        assert!(header(&render_catalog(&snapshot)).ends_with("Price ^"));

        snapshot.state = snapshot.state.clone().with_sort(SortModel::new(vec![
            SortItem::desc(SortField::Name),
            SortItem::asc(SortField::MainCategory),
        ]));
        let line = header(&render_catalog(&snapshot));
        assert!(line.contains("Name v"));
        assert!(line.ends_with("Price"));
    }

    #[test]
    fn loading_catalog_shows_only_indicator() {
        let mut snapshot = ready_snapshot();
        snapshot.status = CatalogStatus::Loading;
        assert_eq!(render_catalog(&snapshot), "Loading...\n");
    }

    #[test]
    fn failed_catalog_shows_notification() {
        let mut snapshot = ready_snapshot();
        snapshot.status = CatalogStatus::Failed;
        snapshot.rows.clear();
        snapshot.notification = Some("Failed to fetch products".to_string());

        let out = render_catalog(&snapshot);
        assert!(out.starts_with("! Failed to fetch products"));
        assert!(out.contains("No products to show."));
    }

    #[test]
    fn empty_page_says_no_rows() {
        let mut snapshot = ready_snapshot();
        snapshot.rows.clear();
        snapshot.total_rows = 0;
        snapshot.page_count = 0;
        let out = render_catalog(&snapshot);
        assert!(out.contains("No rows"));
        assert!(out.contains("Page 1 of 1 (0 rows"));
    }

    #[test]
    fn details_list_labelled_fields() {
        let product = normalize_payload(json!({
            "products": [{"id": "p1", "name": "Milk", "price": "3"}]
        }))
        .remove(0);
        let out = render_details(&LoadState::Success(product));
        assert!(out.contains("Name:"));
        assert!(out.contains("Milk"));
        assert!(out
            .lines()
            .any(|line| line.starts_with("Price:") && line.ends_with("$3.00")));
    }

    #[test]
    fn detail_errors_render_their_message() {
        assert_eq!(
            render_details(&LoadState::Error(ViewError::ProductNotFound)),
            "Product not found\n"
        );
        assert_eq!(render_details(&LoadState::Loading), "Loading...\n");
    }
}
