//! Catalog filtering.
//!
//! A pure derivation over the full catalog: the visible subset is a function
//! of (catalog, filter) and nothing else. Filters always start from the
//! untouched full catalog - they never stack. Exactly one of free-text
//! search or a category selection is active at a time; representing the
//! filter as an enum makes combining them impossible by construction.

use crate::catalog::Product;

/// A named category with its fixed keyword substrings.
///
/// Catalog categories are coarse, so each shop category is pre-associated
/// with a handful of keyword synonyms matched against product titles and
/// catalog categories.
#[derive(Debug, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    keywords: &'static [&'static str],
}

impl Category {
    /// Whether a product's title or catalog category contains any of this
    /// category's keywords (case-insensitive).
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.keywords
            .iter()
            .any(|keyword| product_contains(product, keyword))
    }
}

/// The fixed shop categories, in presentation order.
pub const CATEGORIES: [Category; 4] = [
    Category {
        name: "Sneakers",
        keywords: &["sneaker", "casual", "lifestyle"],
    },
    Category {
        name: "Sports",
        keywords: &[
            "running", "walking", "training", "sport", "athletic", "gym", "outdoor",
        ],
    },
    Category {
        name: "Casual",
        keywords: &["casual", "loafer", "slip-on", "moccasin", "sandal"],
    },
    Category {
        name: "Brogues",
        keywords: &["brogue", "formal", "derby", "oxford", "wedding", "leather"],
    },
];

/// Sentinel category label that matches every product unconditionally.
pub const ALL: &str = "All";

/// Look up a shop category by name (case-insensitive). `None` for unknown
/// names, including the sentinel "All".
#[must_use]
pub fn find_category(name: &str) -> Option<&'static Category> {
    CATEGORIES
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
}

/// The active catalog filter.
///
/// Selecting a search resets any category and vice versa; the enum carries
/// only one of the two, so the mutual exclusion is structural.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogFilter {
    /// Everything is visible.
    #[default]
    All,
    /// Free-text search over title and catalog category.
    Search(String),
    /// One of the fixed shop categories.
    Category(&'static Category),
}

impl CatalogFilter {
    /// Derive the visible subset of the catalog.
    ///
    /// Always operates over the full catalog, never an already-filtered
    /// view.
    #[must_use]
    pub fn apply(&self, catalog: &[Product]) -> Vec<Product> {
        match self {
            Self::All => catalog.to_vec(),
            Self::Search(query) => catalog
                .iter()
                .filter(|p| product_contains(p, query))
                .cloned()
                .collect(),
            Self::Category(category) => catalog
                .iter()
                .filter(|p| category.matches(p))
                .cloned()
                .collect(),
        }
    }

    /// The active search text; empty unless a search is active.
    #[must_use]
    pub fn search_text(&self) -> &str {
        match self {
            Self::Search(query) => query,
            _ => "",
        }
    }

    /// The active category name; the sentinel "All" unless a category is
    /// active.
    #[must_use]
    pub fn category_name(&self) -> &str {
        match self {
            Self::Category(category) => category.name,
            _ => ALL,
        }
    }
}

/// Case-insensitive substring match against a product's title or category.
fn product_contains(product: &Product, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    product.title.to_lowercase().contains(&needle)
        || product.category.to_lowercase().contains(&needle)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use footwa_core::{Price, ProductId};
    use rust_decimal::Decimal;

    fn product(id: u64, title: &str, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_owned(),
            brand: Some("Acme".to_owned()),
            price: Price::new(Decimal::new(50, 0)),
            thumbnail: String::new(),
            category: category.to_owned(),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Air Runner", "mens-shoes"),
            product(2, "Classic Loafer", "casual"),
            product(3, "Oxford Derby", "mens-shoes"),
            product(4, "Gym Trainer Pro", "womens-shoes"),
        ]
    }

    #[test]
    fn test_all_returns_catalog_unfiltered() {
        let catalog = catalog();
        assert_eq!(CatalogFilter::All.apply(&catalog), catalog);
    }

    #[test]
    fn test_search_matches_title_case_insensitive() {
        let visible = CatalogFilter::Search("air".to_owned()).apply(&catalog());
        assert_eq!(visible.len(), 1);
        assert_eq!(visible.first().unwrap().title, "Air Runner");
    }

    #[test]
    fn test_search_does_not_match_unrelated() {
        let visible = CatalogFilter::Search("air".to_owned()).apply(&catalog());
        assert!(visible.iter().all(|p| p.title != "Classic Loafer"));
    }

    #[test]
    fn test_search_matches_category_field() {
        let visible = CatalogFilter::Search("womens".to_owned()).apply(&catalog());
        assert_eq!(visible.len(), 1);
        assert_eq!(visible.first().unwrap().id, ProductId::new(4));
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let catalog = catalog();
        let visible = CatalogFilter::Search(String::new()).apply(&catalog);
        assert_eq!(visible.len(), catalog.len());
    }

    #[test]
    fn test_category_keywords_match_synonyms() {
        let sports = find_category("Sports").unwrap();
        let visible = CatalogFilter::Category(sports).apply(&catalog());
        // "Gym Trainer Pro" matches both "gym" and "training"-adjacent keywords
        assert_eq!(visible.len(), 1);
        assert_eq!(visible.first().unwrap().id, ProductId::new(4));
    }

    #[test]
    fn test_brogues_matches_oxford() {
        let brogues = find_category("Brogues").unwrap();
        let visible = CatalogFilter::Category(brogues).apply(&catalog());
        assert_eq!(visible.len(), 1);
        assert_eq!(visible.first().unwrap().title, "Oxford Derby");
    }

    #[test]
    fn test_find_category_is_case_insensitive() {
        assert!(find_category("sneakers").is_some());
        assert!(find_category(" SPORTS ").is_some());
        assert!(find_category("All").is_none());
        assert!(find_category("nope").is_none());
    }

    #[test]
    fn test_filter_accessors() {
        assert_eq!(CatalogFilter::All.category_name(), ALL);
        assert_eq!(CatalogFilter::All.search_text(), "");

        let search = CatalogFilter::Search("air".to_owned());
        assert_eq!(search.search_text(), "air");
        assert_eq!(search.category_name(), ALL);

        let casual = CatalogFilter::Category(find_category("Casual").unwrap());
        assert_eq!(casual.category_name(), "Casual");
        assert_eq!(casual.search_text(), "");
    }
}
