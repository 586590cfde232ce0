//! Read-only product catalog with substring filtering.
//!
//! The catalog is injected by the host page before the widget initializes.
//! The widget never mutates it; stock numbers only change when the page is
//! reloaded after a sale.

use tillpoint_core::{Product, ProductId};

/// The full product list available to the widget.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from the injected product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Create a catalog from a list that may not have been injected at all.
    ///
    /// A missing list means "no products to display", not a failure.
    #[must_use]
    pub fn from_injected(products: Option<Vec<Product>>) -> Self {
        Self {
            products: products.unwrap_or_default(),
        }
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Filter products whose name, ID, or category contains the query as a
    /// case-insensitive substring.
    ///
    /// An empty query returns the full list. Order is always catalog order;
    /// there is no ranking.
    #[must_use]
    pub fn filter(&self, query: &str) -> Vec<&Product> {
        let term = query.to_lowercase();
        if term.is_empty() {
            return self.products.iter().collect();
        }

        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&term)
                    || p.id.to_string().contains(&term)
                    || p.category_name
                        .as_ref()
                        .is_some_and(|c| c.to_lowercase().contains(&term))
            })
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(id: i64, name: &str, category: Option<&str>) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            category_name: category.map(String::from),
            selling_price: Decimal::new(999, 2),
            stock_quantity: 10,
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            product(1, "Ball Pen", Some("Stationery")),
            product(12, "Ink Bottle", Some("Stationery")),
            product(3, "Coffee Mug", Some("Kitchen")),
            product(4, "Uncategorized Thing", None),
        ])
    }

    #[test]
    fn test_empty_query_returns_all_in_order() {
        let c = catalog();
        let filtered = c.filter("");
        assert_eq!(filtered.len(), 4);
        let names: Vec<_> = filtered.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            ["Ball Pen", "Ink Bottle", "Coffee Mug", "Uncategorized Thing"]
        );
    }

    #[test]
    fn test_filter_by_name_is_case_insensitive() {
        let c = catalog();
        let filtered = c.filter("PEN");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.first().map(|p| p.name.as_str()), Some("Ball Pen"));
    }

    #[test]
    fn test_filter_by_id_substring() {
        let c = catalog();
        // "1" matches product 1 and product 12.
        let filtered = c.filter("1");
        let ids: Vec<_> = filtered.iter().map(|p| p.id.as_i64()).collect();
        assert_eq!(ids, [1, 12]);
    }

    #[test]
    fn test_filter_by_category() {
        let c = catalog();
        let filtered = c.filter("kitchen");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.first().map(|p| p.id.as_i64()), Some(3));
    }

    #[test]
    fn test_filter_skips_missing_category_without_panicking() {
        let c = catalog();
        let filtered = c.filter("thing");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.first().map(|p| p.id.as_i64()), Some(4));
    }

    #[test]
    fn test_filter_no_match() {
        let c = catalog();
        assert!(c.filter("xyzzy").is_empty());
    }

    #[test]
    fn test_missing_injection_is_empty_catalog() {
        let c = Catalog::from_injected(None);
        assert!(c.is_empty());
        assert!(c.filter("").is_empty());
    }

    #[test]
    fn test_get_by_id() {
        let c = catalog();
        assert_eq!(
            c.get(ProductId::new(3)).map(|p| p.name.as_str()),
            Some("Coffee Mug")
        );
        assert!(c.get(ProductId::new(99)).is_none());
    }
}
