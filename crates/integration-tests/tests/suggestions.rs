//! "Bought together" suggestion scenarios against a live mock backend.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use tillpoint_core::ProductId;
use tillpoint_integration_tests::{MockBackendBuilder, RecordingView, ViewEvent, product, widget};

#[tokio::test]
async fn test_empty_suggestions_show_no_prompt() {
    let backend = MockBackendBuilder::default()
        .recommendations(json!([]))
        .spawn()
        .await;
    let view = Arc::new(RecordingView::default());
    let mut w = widget(
        &backend,
        vec![product(1, "Pen", "10", 5)],
        Arc::clone(&view),
    );

    let handle = w.on_add_product(ProductId::new(1)).expect("first add");
    handle.await.expect("suggestion task");

    assert!(view.suggestions().is_empty());
}

#[tokio::test]
async fn test_first_suggestion_is_prompted_and_accept_adds_it() {
    // The backend ranks suggestions; only the top one is prompted.
    let backend = MockBackendBuilder::default()
        .recommendations(json!([
            {"id": 2, "name": "Ink", "selling_price": 5.0, "stock_quantity": 9, "frequency": 4},
            {"id": 3, "name": "Ruler", "selling_price": 3.0, "stock_quantity": 9, "frequency": 1}
        ]))
        .spawn()
        .await;
    let view = Arc::new(RecordingView::default());
    let mut w = widget(
        &backend,
        vec![product(1, "Pen", "10", 5), product(2, "Ink", "5", 9)],
        Arc::clone(&view),
    );

    let handle = w.on_add_product(ProductId::new(1)).expect("first add");
    handle.await.expect("suggestion task");

    let prompts = view.suggestions();
    assert_eq!(prompts.len(), 1);
    let prompt = prompts.first().expect("prompt");
    assert_eq!(prompt.product_id, ProductId::new(2));
    assert_eq!(prompt.product_name, "Ink");
    assert_eq!(prompt.trigger_name, "Pen");

    // Accepting re-enters the normal add path, suggestion fetch included.
    let handle = w
        .on_accept_suggestion(prompt.product_id)
        .expect("accepted add");
    handle.await.expect("suggestion task");
    assert_eq!(w.store().len(), 2);
}

#[tokio::test]
async fn test_accepting_suggestion_not_in_catalog_is_noop() {
    let backend = MockBackendBuilder::default()
        .recommendations(json!([
            {"id": 99, "name": "Ghost", "selling_price": 1.0, "stock_quantity": 1, "frequency": 1}
        ]))
        .spawn()
        .await;
    let view = Arc::new(RecordingView::default());
    let mut w = widget(
        &backend,
        vec![product(1, "Pen", "10", 5)],
        Arc::clone(&view),
    );

    let handle = w.on_add_product(ProductId::new(1)).expect("first add");
    handle.await.expect("suggestion task");

    let prompts = view.suggestions();
    assert_eq!(prompts.len(), 1);

    assert!(
        w.on_accept_suggestion(prompts.first().expect("prompt").product_id)
            .is_none()
    );
    assert_eq!(w.store().len(), 1);
}

#[tokio::test]
async fn test_failed_suggestion_fetch_is_invisible() {
    let backend = MockBackendBuilder::default()
        .recommendations_fail()
        .spawn()
        .await;
    let view = Arc::new(RecordingView::default());
    let mut w = widget(
        &backend,
        vec![product(1, "Pen", "10", 5)],
        Arc::clone(&view),
    );

    let handle = w.on_add_product(ProductId::new(1)).expect("first add");
    handle.await.expect("suggestion task");

    // The add itself went through; the failed fetch leaves no trace.
    assert_eq!(w.store().len(), 1);
    assert!(!view
        .events()
        .iter()
        .any(|e| matches!(e, ViewEvent::Suggestion(_) | ViewEvent::Notice(_))));
}

#[tokio::test]
async fn test_late_suggestion_is_shown_after_line_removed() {
    let backend = MockBackendBuilder::default()
        .recommendations(json!([
            {"id": 2, "name": "Ink", "selling_price": 5.0, "stock_quantity": 9, "frequency": 2}
        ]))
        .recommendation_delay(Duration::from_millis(50))
        .spawn()
        .await;
    let view = Arc::new(RecordingView::default());
    let mut w = widget(
        &backend,
        vec![product(1, "Pen", "10", 5), product(2, "Ink", "5", 9)],
        Arc::clone(&view),
    );

    let handle = w.on_add_product(ProductId::new(1)).expect("first add");
    w.on_remove_line(0);
    assert!(w.store().is_empty());

    // The prompt resolves after the trigger was removed and is still shown.
    handle.await.expect("suggestion task");
    assert_eq!(view.suggestions().len(), 1);
}

#[tokio::test]
async fn test_incrementing_does_not_refetch() {
    let backend = MockBackendBuilder::default()
        .recommendations(json!([
            {"id": 2, "name": "Ink", "selling_price": 5.0, "stock_quantity": 9, "frequency": 2}
        ]))
        .spawn()
        .await;
    let view = Arc::new(RecordingView::default());
    let mut w = widget(
        &backend,
        vec![product(1, "Pen", "10", 5)],
        Arc::clone(&view),
    );

    let handle = w.on_add_product(ProductId::new(1)).expect("first add");
    assert!(w.on_add_product(ProductId::new(1)).is_none());
    assert!(w.on_add_product(ProductId::new(1)).is_none());
    handle.await.expect("suggestion task");

    assert_eq!(view.suggestions().len(), 1);
}
