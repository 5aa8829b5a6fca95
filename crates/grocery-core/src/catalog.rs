//! Catalog view state: text/category filtering, sorting and pagination over
//! an already-normalized collection.
//!
//! [`ViewState`] is an immutable value; every user action maps to a
//! `with_*` transition returning the next state. [`ViewState::page`] derives
//! the visible slice without touching the underlying collection.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::navigation::Navigation;
use crate::product::NormalizedProduct;

/// Quiet period before typed search text is applied.
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

/// Page sizes the grid offers.
pub const PAGE_SIZE_OPTIONS: [usize; 3] = [5, 10, 20];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(usize);

impl PageSize {
    pub const DEFAULT: Self = Self(5);

    #[must_use]
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<usize> for PageSize {
    type Error = CoreError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        if PAGE_SIZE_OPTIONS.contains(&size) {
            Ok(Self(size))
        } else {
            Err(CoreError::InvalidPageSize(size))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Id,
    Brand,
    Name,
    Description,
    SkuCode,
    MainCategory,
    ActivationDate,
    DeactivationDate,
    Price,
}

impl SortField {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Brand => "brand",
            SortField::Name => "name",
            SortField::Description => "description",
            SortField::SkuCode => "sku_code",
            SortField::MainCategory => "main_category",
            SortField::ActivationDate => "activation_date",
            SortField::DeactivationDate => "deactivation_date",
            SortField::Price => "price",
        }
    }

    fn compare(self, a: &NormalizedProduct, b: &NormalizedProduct) -> Ordering {
        match self {
            SortField::Id => a.id.compare(&b.id),
            SortField::Brand => compare_text(a.brand.as_deref(), b.brand.as_deref()),
            SortField::Name => compare_text(a.name.as_deref(), b.name.as_deref()),
            SortField::Description => {
                compare_text(a.description.as_deref(), b.description.as_deref())
            }
            SortField::SkuCode => compare_text(a.sku_code.as_deref(), b.sku_code.as_deref()),
            SortField::MainCategory => {
                compare_text(a.main_category.as_deref(), b.main_category.as_deref())
            }
            SortField::ActivationDate => a.activation_date.cmp(&b.activation_date),
            SortField::DeactivationDate => a.deactivation_date.cmp(&b.deactivation_date),
            SortField::Price => a.price.total_cmp(&b.price),
        }
    }
}

impl FromStr for SortField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(SortField::Id),
            "brand" => Ok(SortField::Brand),
            "name" => Ok(SortField::Name),
            "description" => Ok(SortField::Description),
            "sku_code" | "sku" => Ok(SortField::SkuCode),
            "main_category" | "category" => Ok(SortField::MainCategory),
            "activation_date" => Ok(SortField::ActivationDate),
            "deactivation_date" => Ok(SortField::DeactivationDate),
            "price" => Ok(SortField::Price),
            other => Err(CoreError::UnknownSortField(other.to_string())),
        }
    }
}

/// Absent text sorts first; present text compares case-insensitively, then
/// by exact bytes to keep the order total.
fn compare_text(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a
            .to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b)),
        (a, b) => a.is_some().cmp(&b.is_some()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(CoreError::UnknownSortDirection(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortItem {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortItem {
    #[must_use]
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    #[must_use]
    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }
}

/// Parses `field` or `field:dir`, e.g. `price:desc`.
impl FromStr for SortItem {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.split_once(':') {
            Some((field, direction)) => (field.parse()?, direction.parse()?),
            None => (s.parse()?, SortDirection::Asc),
        };
        Ok(Self { field, direction })
    }
}

impl fmt::Display for SortItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{}:{dir}", self.field.as_str())
    }
}

/// Ordered sort keys; later keys only break ties left by earlier ones.
/// An empty model keeps source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortModel(Vec<SortItem>);

impl SortModel {
    #[must_use]
    pub fn new(items: Vec<SortItem>) -> Self {
        Self(items)
    }

    #[must_use]
    pub fn unsorted() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn items(&self) -> &[SortItem] {
        &self.0
    }

    fn compare(&self, a: &NormalizedProduct, b: &NormalizedProduct) -> Ordering {
        self.0.iter().fold(Ordering::Equal, |acc, item| {
            acc.then_with(|| {
                let ord = item.field.compare(a, b);
                match item.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            })
        })
    }
}

/// Ascending by price.
impl Default for SortModel {
    fn default() -> Self {
        Self(vec![SortItem::asc(SortField::Price)])
    }
}

/// Everything the user can change about the catalog grid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    search: String,
    category: Option<String>,
    sort: SortModel,
    page: usize,
    page_size: PageSize,
}

impl ViewState {
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    #[must_use]
    pub fn sort(&self) -> &SortModel {
        &self.sort
    }

    #[must_use]
    pub fn page_index(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    #[must_use]
    pub fn with_search(self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..self
        }
    }

    /// An empty category string clears the restriction.
    #[must_use]
    pub fn with_category(self, category: Option<String>) -> Self {
        Self {
            category: category.filter(|c| !c.is_empty()),
            ..self
        }
    }

    #[must_use]
    pub fn with_sort(self, sort: SortModel) -> Self {
        Self { sort, ..self }
    }

    #[must_use]
    pub fn with_page(self, page: usize) -> Self {
        Self { page, ..self }
    }

    #[must_use]
    pub fn with_page_size(self, page_size: PageSize) -> Self {
        Self { page_size, ..self }
    }

    fn matches_category(&self, product: &NormalizedProduct) -> bool {
        self.category
            .as_deref()
            .is_none_or(|selected| product.main_category.as_deref() == Some(selected))
    }

    /// Filtered rows in source order: name contains the search text
    /// (case-insensitive) and, when a category is selected, the category
    /// matches exactly.
    #[must_use]
    pub fn filter<'a>(&self, products: &'a [NormalizedProduct]) -> Vec<&'a NormalizedProduct> {
        let needle = self.search.to_lowercase();
        products
            .iter()
            .filter(|p| matches_search(p, &needle) && self.matches_category(p))
            .collect()
    }

    /// Filtered, sorted and paginated view of `products`.
    ///
    /// A stored page index past the end shows the last page instead.
    #[must_use]
    pub fn page<'a>(&self, products: &'a [NormalizedProduct]) -> CatalogPage<'a> {
        let mut rows = self.filter(products);
        rows.sort_by(|a, b| self.sort.compare(a, b));

        let page_size = self.page_size.get();
        let total_rows = rows.len();
        let page_count = total_rows.div_ceil(page_size);
        let page = self.page.min(page_count.saturating_sub(1));

        let rows = rows
            .into_iter()
            .skip(page * page_size)
            .take(page_size)
            .collect();

        CatalogPage {
            rows,
            total_rows,
            page,
            page_count,
            page_size: self.page_size,
        }
    }
}

fn matches_search(product: &NormalizedProduct, needle_lower: &str) -> bool {
    product
        .name_or_empty()
        .to_lowercase()
        .contains(needle_lower)
}

/// The visible slice of the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage<'a> {
    pub rows: Vec<&'a NormalizedProduct>,
    /// Rows passing the filter, across all pages.
    pub total_rows: usize,
    /// Zero-based page actually shown.
    pub page: usize,
    pub page_count: usize,
    pub page_size: PageSize,
}

impl CatalogPage<'_> {
    /// Navigation triggered by selecting the `row`-th visible row.
    #[must_use]
    pub fn select(&self, row: usize) -> Option<Navigation> {
        self.rows.get(row).map(|p| Navigation::for_product(p))
    }
}

/// Distinct `main_category` values in order of first appearance.
#[must_use]
pub fn categories(products: &[NormalizedProduct]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for category in products.iter().filter_map(|p| p.main_category.as_deref()) {
        if !seen.contains(&category) {
            seen.push(category);
        }
    }
    seen
}

/// Columns of the catalog grid, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridColumn {
    Id,
    Brand,
    Name,
    Description,
    SkuCode,
    ActivationDate,
    DeactivationDate,
    Price,
}

impl GridColumn {
    pub const ALL: [GridColumn; 8] = [
        GridColumn::Id,
        GridColumn::Brand,
        GridColumn::Name,
        GridColumn::Description,
        GridColumn::SkuCode,
        GridColumn::ActivationDate,
        GridColumn::DeactivationDate,
        GridColumn::Price,
    ];

    #[must_use]
    pub fn header(self) -> &'static str {
        match self {
            GridColumn::Id => "ID",
            GridColumn::Brand => "Brand",
            GridColumn::Name => "Name",
            GridColumn::Description => "Description",
            GridColumn::SkuCode => "SKU Code",
            GridColumn::ActivationDate => "Activation Date",
            GridColumn::DeactivationDate => "Deactivation Date",
            GridColumn::Price => "Price",
        }
    }

    #[must_use]
    pub fn sort_field(self) -> SortField {
        match self {
            GridColumn::Id => SortField::Id,
            GridColumn::Brand => SortField::Brand,
            GridColumn::Name => SortField::Name,
            GridColumn::Description => SortField::Description,
            GridColumn::SkuCode => SortField::SkuCode,
            GridColumn::ActivationDate => SortField::ActivationDate,
            GridColumn::DeactivationDate => SortField::DeactivationDate,
            GridColumn::Price => SortField::Price,
        }
    }

    #[must_use]
    pub fn cell(self, product: &NormalizedProduct) -> String {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        match self {
            GridColumn::Id => product.id.to_string(),
            GridColumn::Brand => text(&product.brand),
            GridColumn::Name => text(&product.name),
            GridColumn::Description => text(&product.description),
            GridColumn::SkuCode => text(&product.sku_code),
            GridColumn::ActivationDate => product.activation_date.to_string(),
            GridColumn::DeactivationDate => product.deactivation_date.to_string(),
            GridColumn::Price => product.price_label(),
        }
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
