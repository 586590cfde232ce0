//! Test support for Tillpoint integration tests.
//!
//! Provides two pieces the scenario tests share:
//!
//! - [`MockBackend`]: a real local HTTP server (axum on an ephemeral port)
//!   standing in for the sales backend, with canned responses and capture of
//!   every `/create_sale` body it receives
//! - [`RecordingView`]: a [`WidgetView`] that records every call as a
//!   [`ViewEvent`] for assertions

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::{Value, json};

use tillpoint_core::Product;
use tillpoint_widget::{
    BackendClient, CartPanel, CartWidget, Catalog, ProductCard, SuggestionPrompt, WidgetConfig,
    WidgetView,
};

// =============================================================================
// Mock backend
// =============================================================================

struct MockState {
    recommendations: Value,
    recommendations_fail: bool,
    recommendation_delay: Option<Duration>,
    sale_response: Value,
    sale_delay: Option<Duration>,
    captured_sales: Mutex<Vec<Value>>,
}

/// Builder for the mock sales backend.
pub struct MockBackendBuilder {
    recommendations: Value,
    recommendations_fail: bool,
    recommendation_delay: Option<Duration>,
    sale_response: Value,
    sale_delay: Option<Duration>,
}

impl Default for MockBackendBuilder {
    fn default() -> Self {
        Self {
            recommendations: json!([]),
            recommendations_fail: false,
            recommendation_delay: None,
            sale_response: json!({
                "success": true,
                "invoice": "INV-100001",
                "sale_id": 7
            }),
            sale_delay: None,
        }
    }
}

impl MockBackendBuilder {
    /// Canned body for `GET /api/ai/recommendations/{id}`.
    #[must_use]
    pub fn recommendations(mut self, body: Value) -> Self {
        self.recommendations = body;
        self
    }

    /// Make the recommendations endpoint answer 500.
    #[must_use]
    pub const fn recommendations_fail(mut self) -> Self {
        self.recommendations_fail = true;
        self
    }

    /// Delay recommendation responses, for staleness scenarios.
    #[must_use]
    pub const fn recommendation_delay(mut self, delay: Duration) -> Self {
        self.recommendation_delay = Some(delay);
        self
    }

    /// Canned body for `POST /create_sale`.
    #[must_use]
    pub fn sale_response(mut self, body: Value) -> Self {
        self.sale_response = body;
        self
    }

    /// Delay sale responses.
    #[must_use]
    pub const fn sale_delay(mut self, delay: Duration) -> Self {
        self.sale_delay = Some(delay);
        self
    }

    /// Bind an ephemeral port and start serving.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound; tests have no recovery path.
    pub async fn spawn(self) -> MockBackend {
        let state = Arc::new(MockState {
            recommendations: self.recommendations,
            recommendations_fail: self.recommendations_fail,
            recommendation_delay: self.recommendation_delay,
            sale_response: self.sale_response,
            sale_delay: self.sale_delay,
            captured_sales: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api/ai/recommendations/{id}", get(recommendations))
            .route("/create_sale", post(create_sale))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend addr");

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        MockBackend {
            base_url: format!("http://{addr}"),
            state,
        }
    }
}

async fn recommendations(
    State(state): State<Arc<MockState>>,
    Path(_product_id): Path<i64>,
) -> Response {
    if let Some(delay) = state.recommendation_delay {
        tokio::time::sleep(delay).await;
    }
    if state.recommendations_fail {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    Json(state.recommendations.clone()).into_response()
}

async fn create_sale(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    state
        .captured_sales
        .lock()
        .expect("capture lock")
        .push(body);
    if let Some(delay) = state.sale_delay {
        tokio::time::sleep(delay).await;
    }
    Json(state.sale_response.clone()).into_response()
}

/// A running mock sales backend.
pub struct MockBackend {
    /// Base URL to hand to `WidgetConfig::new`.
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockBackend {
    /// Every `/create_sale` body received so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the capture lock is poisoned.
    #[must_use]
    pub fn captured_sales(&self) -> Vec<Value> {
        self.state
            .captured_sales
            .lock()
            .expect("capture lock")
            .clone()
    }
}

// =============================================================================
// Recording view
// =============================================================================

/// Everything a widget can tell its view, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Grid(Vec<ProductCard>),
    Cart(CartPanel),
    Notice(String),
    Suggestion(SuggestionPrompt),
    Busy(bool),
    Success(String),
    CheckoutError(String),
    OpenReceipt(String),
}

/// A view that records every call for later assertions.
#[derive(Default)]
pub struct RecordingView {
    pub events: Mutex<Vec<ViewEvent>>,
    /// Answer given to `confirm_clear_cart`.
    pub confirm_clear: bool,
    /// Answer given to `confirm_open_receipt`.
    pub confirm_receipt: bool,
}

impl RecordingView {
    /// All recorded events so far.
    ///
    /// # Panics
    ///
    /// Panics if the event lock is poisoned.
    #[must_use]
    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().expect("event lock").clone()
    }

    /// The recorded suggestion prompts, in order.
    #[must_use]
    pub fn suggestions(&self) -> Vec<SuggestionPrompt> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Suggestion(prompt) => Some(prompt),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: ViewEvent) {
        self.events.lock().expect("event lock").push(event);
    }
}

impl WidgetView for RecordingView {
    fn render_grid(&self, cards: &[ProductCard]) {
        self.push(ViewEvent::Grid(cards.to_vec()));
    }

    fn render_cart(&self, panel: &CartPanel) {
        self.push(ViewEvent::Cart(panel.clone()));
    }

    fn notify(&self, message: &str) {
        self.push(ViewEvent::Notice(message.to_string()));
    }

    fn show_suggestion(&self, prompt: &SuggestionPrompt) {
        self.push(ViewEvent::Suggestion(prompt.clone()));
    }

    fn confirm_clear_cart(&self) -> bool {
        self.confirm_clear
    }

    fn set_checkout_busy(&self, busy: bool) {
        self.push(ViewEvent::Busy(busy));
    }

    fn show_checkout_success(&self, invoice: &str) {
        self.push(ViewEvent::Success(invoice.to_string()));
    }

    fn show_checkout_error(&self, message: &str) {
        self.push(ViewEvent::CheckoutError(message.to_string()));
    }

    fn confirm_open_receipt(&self) -> bool {
        self.confirm_receipt
    }

    fn open_receipt(&self, url: &str) {
        self.push(ViewEvent::OpenReceipt(url.to_string()));
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// A catalog product for test fixtures.
///
/// # Panics
///
/// Panics if `price` is not a valid decimal literal.
#[must_use]
pub fn product(id: i64, name: &str, price: &str, stock: i64) -> Product {
    Product {
        id: tillpoint_core::ProductId::new(id),
        name: name.to_string(),
        category_name: None,
        selling_price: price.parse().expect("valid decimal literal"),
        stock_quantity: stock,
    }
}

/// A widget wired to the given mock backend and recording view.
///
/// # Panics
///
/// Panics if the backend URL is rejected, which cannot happen for a URL
/// produced by [`MockBackendBuilder::spawn`].
#[must_use]
pub fn widget(
    backend: &MockBackend,
    products: Vec<Product>,
    view: Arc<RecordingView>,
) -> CartWidget {
    let config = WidgetConfig::new(&backend.base_url).expect("mock backend url");
    let client = BackendClient::new(&config).expect("backend client");
    CartWidget::new(Catalog::new(products), client, view, &config)
}
