//! The event-driven cart widget controller.
//!
//! Owns the catalog, the cart store, and the backend client, and drives an
//! injected [`WidgetView`]. The host UI forwards user events to the `on_*`
//! methods; every mutation re-renders synchronously before any network
//! request is issued, so the visible cart is never stale relative to the
//! mutation that caused it.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use tillpoint_core::{PaymentMode, Product, ProductId};

use crate::catalog::Catalog;
use crate::client::{BackendClient, BackendError, SaleRequest};
use crate::config::WidgetConfig;
use crate::store::{AddOutcome, CartStore};
use crate::view::{self, SuggestionPrompt, WidgetView};

/// Surfaced when a checkout settles with a transport-level failure.
const CONNECTIVITY_ERROR: &str = "Could not reach the sales server. Check the connection and try again.";

/// Surfaced when checkout is triggered without a payment mode selected.
const PAYMENT_MODE_REQUIRED: &str = "Select a payment mode before completing the sale.";

/// Checkout mutual exclusion: a boolean gate, not a queue. Exactly one
/// checkout request may be in flight per cart; further triggers are dropped
/// until the current one settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CheckoutState {
    Idle,
    InFlight,
}

/// The cart widget.
///
/// Single-threaded and event-driven: callers hold the widget (typically
/// behind `&mut`) and feed it one event at a time. The only background work
/// is the advisory suggestion fetch, which runs as a spawned task and talks
/// to the view on its own.
pub struct CartWidget {
    catalog: Catalog,
    store: CartStore,
    client: BackendClient,
    view: Arc<dyn WidgetView>,
    currency_symbol: String,
    checkout: CheckoutState,
}

impl CartWidget {
    /// Create a widget over an injected catalog.
    #[must_use]
    pub fn new(
        catalog: Catalog,
        client: BackendClient,
        view: Arc<dyn WidgetView>,
        config: &WidgetConfig,
    ) -> Self {
        Self {
            catalog,
            store: CartStore::new(),
            client,
            view,
            currency_symbol: config.currency_symbol.clone(),
            checkout: CheckoutState::Idle,
        }
    }

    /// Initial render: full product grid and the (empty) cart panel.
    pub fn start(&self) {
        self.render_grid("");
        self.render_cart();
    }

    /// Current cart contents, for embedders.
    #[must_use]
    pub const fn store(&self) -> &CartStore {
        &self.store
    }

    /// The injected catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Whether a checkout request is currently in flight.
    #[must_use]
    pub fn is_checkout_in_flight(&self) -> bool {
        self.checkout == CheckoutState::InFlight
    }

    // =========================================================================
    // UI events
    // =========================================================================

    /// The search box changed; re-render the grid with the filtered list.
    #[instrument(skip(self))]
    pub fn on_search(&self, query: &str) {
        self.render_grid(query);
    }

    /// An enabled product card's add control was clicked.
    ///
    /// Returns the handle of the advisory suggestion-fetch task when this was
    /// the product's first add. The handle may be awaited (tests do) or
    /// dropped; the task delivers its result to the view by itself and
    /// swallows failures.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn on_add_product(&mut self, id: ProductId) -> Option<JoinHandle<()>> {
        let Some(product) = self.catalog.get(id).cloned() else {
            // The grid only issues known IDs; a stale suggestion may not.
            debug!(product_id = %id, "add ignored: product not in catalog");
            return None;
        };

        let outcome = match self.store.add(&product) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(product_id = %id, "add rejected: {e}");
                self.view.notify(&e.to_string());
                return None;
            }
        };

        // Re-render before the suggestion fetch is even issued.
        self.render_cart();

        match outcome {
            AddOutcome::Added => Some(self.spawn_suggestion_fetch(&product)),
            AddOutcome::Incremented => None,
        }
    }

    /// The operator accepted a suggestion prompt. Suggested products are
    /// re-looked-up in the catalog; an ID not present there is a no-op.
    pub fn on_accept_suggestion(&mut self, id: ProductId) -> Option<JoinHandle<()>> {
        self.on_add_product(id)
    }

    /// A cart row's remove control was clicked.
    #[instrument(skip(self))]
    pub fn on_remove_line(&mut self, index: usize) {
        if self.store.remove(index).is_none() {
            debug!(index, "remove ignored: index out of range");
        }
        self.render_cart();
    }

    /// The clear-cart control was clicked; asks the view for confirmation.
    pub fn on_clear_cart(&mut self) {
        if self.store.is_empty() {
            return;
        }
        if !self.view.confirm_clear_cart() {
            return;
        }
        self.store.clear();
        self.render_cart();
    }

    /// The checkout control was clicked.
    ///
    /// Exactly one of three outcomes settles the request: success (invoice
    /// shown, receipt offered, cart discarded), application failure (server
    /// message shown verbatim, cart kept), or transport failure (generic
    /// connectivity message, cart kept). The checkout control is busy from
    /// send until settlement and re-enabled on every path.
    #[instrument(skip(self))]
    pub async fn on_checkout(&mut self, payment_mode: Option<PaymentMode>) {
        if self.checkout == CheckoutState::InFlight {
            debug!("checkout ignored: request already in flight");
            return;
        }

        let Some(payment_mode) = payment_mode else {
            self.view.notify(PAYMENT_MODE_REQUIRED);
            return;
        };

        if self.store.is_empty() {
            // The control is disabled for an empty cart; guard anyway.
            debug!("checkout ignored: cart is empty");
            return;
        }

        self.checkout = CheckoutState::InFlight;
        self.view.set_checkout_busy(true);

        // Total is recomputed from the store, never read back from the view.
        let request = SaleRequest {
            items: self.store.lines().to_vec(),
            total: self.store.total(),
            payment_mode,
        };

        let result = self.client.create_sale(&request).await;

        self.checkout = CheckoutState::Idle;
        self.view.set_checkout_busy(false);

        match result {
            Ok(receipt) => {
                info!(invoice = %receipt.invoice, "sale recorded");
                self.view.show_checkout_success(&receipt.invoice);
                if self.view.confirm_open_receipt() {
                    self.view
                        .open_receipt(&self.client.receipt_url(&receipt.sale_id));
                }
                // Fresh session: discard the cart and show the full grid.
                self.store.clear();
                self.render_cart();
                self.render_grid("");
            }
            Err(BackendError::Rejected(message)) => {
                warn!(%message, "sale rejected by backend");
                self.view.show_checkout_error(&message);
            }
            Err(e) => {
                warn!(error = %e, "checkout request failed");
                self.view.show_checkout_error(CONNECTIVITY_ERROR);
            }
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    fn render_grid(&self, query: &str) {
        let cards = view::product_cards(self.catalog.filter(query), &self.currency_symbol);
        self.view.render_grid(&cards);
    }

    fn render_cart(&self) {
        self.view
            .render_cart(&view::cart_panel(&self.store, &self.currency_symbol));
    }

    /// Fire the advisory "bought together" fetch for a first-added product.
    ///
    /// Failures are logged and suppressed: the fetch must never block or
    /// fail the add that triggered it. A prompt resolving after the
    /// triggering line was removed is still shown.
    fn spawn_suggestion_fetch(&self, product: &Product) -> JoinHandle<()> {
        let client = self.client.clone();
        let view = Arc::clone(&self.view);
        let product_id = product.id;
        let trigger_name = product.name.clone();

        tokio::spawn(async move {
            match client.recommendations(product_id).await {
                Ok(suggestions) => {
                    if let Some(first) = suggestions.first() {
                        view.show_suggestion(&SuggestionPrompt {
                            product_id: first.id,
                            product_name: first.name.clone(),
                            trigger_name,
                        });
                    }
                }
                Err(e) => {
                    debug!(error = %e, product_id = %product_id, "suggestion fetch failed");
                }
            }
        })
    }
}
