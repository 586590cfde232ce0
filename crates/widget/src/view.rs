//! View models and the rendering seam.
//!
//! The widget never touches a concrete rendering technology. After every
//! mutation it projects the catalog and cart into plain view models and hands
//! them to a [`WidgetView`] implementation supplied by the host UI (a web
//! page, a terminal, a test recorder, ...).

use tillpoint_core::{Product, ProductId, display_amount};

use crate::store::CartStore;

/// Whether a product card's add control is live, and which badge it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// De-emphasized card, add control disabled.
    OutOfStock,
    /// Available but flagged with a warning badge; cosmetic only.
    LowStock,
    InStock,
}

/// One card in the product grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    /// Category display name; uncategorized products show as "General".
    pub category: String,
    /// Formatted unit price, e.g. `₹49.50`.
    pub price: String,
    pub stock_quantity: i64,
    pub availability: Availability,
}

impl ProductCard {
    /// Whether the card's add control should be enabled.
    #[must_use]
    pub fn can_add(&self) -> bool {
        self.availability != Availability::OutOfStock
    }
}

/// One row in the cart panel. `index` is the row's current position and is
/// what the remove control must send back.
#[derive(Debug, Clone, PartialEq)]
pub struct CartRow {
    pub index: usize,
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_subtotal: String,
}

/// The cart side of the screen.
#[derive(Debug, Clone, PartialEq)]
pub struct CartPanel {
    pub rows: Vec<CartRow>,
    pub subtotal: String,
    pub total: String,
    /// Disabled while the cart is empty; the empty panel shows a placeholder
    /// message instead of rows.
    pub checkout_enabled: bool,
}

impl CartPanel {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A "bought together" hint, shown as a dismissible prompt with a one-click
/// add for `product_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionPrompt {
    pub product_id: ProductId,
    pub product_name: String,
    /// Name of the product whose add triggered the suggestion.
    pub trigger_name: String,
}

/// The rendering seam implemented by the host UI.
///
/// Implementations must be `Send + Sync`: the advisory suggestion prompt is
/// delivered from a spawned task.
pub trait WidgetView: Send + Sync {
    /// Render the product grid. An empty slice means no products matched and
    /// should render as a single "no results" placeholder, not zero cards.
    fn render_grid(&self, cards: &[ProductCard]);

    /// Render the cart panel. An empty panel shows a placeholder message and
    /// a disabled checkout control.
    fn render_cart(&self, panel: &CartPanel);

    /// Blocking notice for a rejected mutation or invalid checkout attempt.
    fn notify(&self, message: &str);

    /// Non-blocking suggestion prompt. May arrive after the triggering line
    /// was removed; it is still shown.
    fn show_suggestion(&self, prompt: &SuggestionPrompt);

    /// Ask the operator to confirm emptying the cart.
    fn confirm_clear_cart(&self) -> bool;

    /// Toggle the checkout control's busy indicator. `true` is always
    /// followed by exactly one `false` once the request settles.
    fn set_checkout_busy(&self, busy: bool);

    /// A sale went through; show the invoice identifier.
    fn show_checkout_success(&self, invoice: &str);

    /// A sale did not go through; the checkout control has already been
    /// re-enabled and the cart is preserved for retry.
    fn show_checkout_error(&self, message: &str);

    /// Ask whether to open the receipt for a completed sale.
    fn confirm_open_receipt(&self) -> bool;

    /// Open the (opaque) receipt URL in a new browsing context or whatever
    /// the host UI uses for external documents.
    fn open_receipt(&self, url: &str);
}

// =============================================================================
// Projections
// =============================================================================

/// Project a single product into its grid card.
#[must_use]
pub fn product_card(product: &Product, currency_symbol: &str) -> ProductCard {
    let availability = if !product.is_available() {
        Availability::OutOfStock
    } else if product.is_low_stock() {
        Availability::LowStock
    } else {
        Availability::InStock
    };

    ProductCard {
        id: product.id,
        name: product.name.clone(),
        category: product
            .category_name
            .clone()
            .unwrap_or_else(|| "General".to_string()),
        price: display_amount(product.selling_price, currency_symbol),
        stock_quantity: product.stock_quantity,
        availability,
    }
}

/// Project a filtered product list into grid cards, preserving order.
#[must_use]
pub fn product_cards<'a, I>(products: I, currency_symbol: &str) -> Vec<ProductCard>
where
    I: IntoIterator<Item = &'a Product>,
{
    products
        .into_iter()
        .map(|p| product_card(p, currency_symbol))
        .collect()
}

/// Project the cart store into the panel view model.
#[must_use]
pub fn cart_panel(store: &CartStore, currency_symbol: &str) -> CartPanel {
    let rows = store
        .lines()
        .iter()
        .enumerate()
        .map(|(index, line)| CartRow {
            index,
            name: line.name.clone(),
            quantity: line.quantity,
            unit_price: display_amount(line.price, currency_symbol),
            line_subtotal: display_amount(line.subtotal(), currency_symbol),
        })
        .collect::<Vec<_>>();

    CartPanel {
        checkout_enabled: !rows.is_empty(),
        subtotal: display_amount(store.subtotal(), currency_symbol),
        total: display_amount(store.total(), currency_symbol),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, category: Option<&str>, price: &str, stock: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            category_name: category.map(String::from),
            selling_price: price.parse().expect("valid decimal"),
            stock_quantity: stock,
        }
    }

    #[test]
    fn test_card_formats_price_and_category() {
        let card = product_card(&product(1, "Pen", Some("Stationery"), "10", 20), "₹");
        assert_eq!(card.price, "₹10.00");
        assert_eq!(card.category, "Stationery");
        assert_eq!(card.availability, Availability::InStock);
        assert!(card.can_add());
    }

    #[test]
    fn test_card_falls_back_to_general_category() {
        let card = product_card(&product(1, "Pen", None, "10", 20), "₹");
        assert_eq!(card.category, "General");
    }

    #[test]
    fn test_out_of_stock_card_disables_add() {
        let card = product_card(&product(1, "Pen", None, "10", 0), "₹");
        assert_eq!(card.availability, Availability::OutOfStock);
        assert!(!card.can_add());
    }

    #[test]
    fn test_low_stock_card_still_adds() {
        let card = product_card(&product(1, "Pen", None, "10", 4), "₹");
        assert_eq!(card.availability, Availability::LowStock);
        assert!(card.can_add());
    }

    #[test]
    fn test_empty_cart_panel_disables_checkout() {
        let panel = cart_panel(&CartStore::new(), "₹");
        assert!(panel.is_empty());
        assert!(!panel.checkout_enabled);
        assert_eq!(panel.subtotal, "₹0.00");
        assert_eq!(panel.total, "₹0.00");
    }

    #[test]
    fn test_cart_panel_rows_carry_indices_and_subtotals() {
        let mut store = CartStore::new();
        let pen = product(1, "Pen", None, "10", 5);
        let ink = product(2, "Ink", None, "2.5", 5);
        store.add(&pen).expect("add");
        store.add(&pen).expect("add");
        store.add(&ink).expect("add");

        let panel = cart_panel(&store, "₹");
        assert!(panel.checkout_enabled);
        assert_eq!(panel.rows.len(), 2);

        let first = panel.rows.first().expect("row");
        assert_eq!((first.index, first.quantity), (0, 2));
        assert_eq!(first.line_subtotal, "₹20.00");

        let second = panel.rows.get(1).expect("row");
        assert_eq!((second.index, second.quantity), (1, 1));
        assert_eq!(second.unit_price, "₹2.50");

        assert_eq!(panel.total, "₹22.50");
        assert_eq!(panel.subtotal, panel.total);
    }
}
