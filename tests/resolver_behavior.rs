//! Resolver behavior: cache-through semantics, filename matching and
//! value formatting against a scripted Canto API

mod common;

use common::{MockCantoApi, resolver, resolver_with_ttl};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use canto_bridge::errors::CantoError;
use canto_bridge::models::{FormattedValue, ReturnFormat, Scheme};
use serde_json::json;

fn image_payload(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "scheme": "image",
        "name": name,
        "size": 2621440,
        "default": {"Content Type": "image/jpeg"}
    })
}

#[tokio::test]
async fn resolve_by_id_hits_cache_on_second_call() {
    let api = Arc::new(MockCantoApi::new().with_asset("a123456789x", image_payload("a123456789x", "Summer.jpg")));
    let resolver = resolver(api.clone());

    let first = resolver.resolve_by_id("a123456789x").await.unwrap();
    let second = resolver.resolve_by_id("a123456789x").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.scheme, Scheme::Image);
    assert_eq!(first.filename, "Summer.jpg");
    assert_eq!(first.size, "2.5 MB");
    assert_eq!(api.get_by_id_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn expired_cache_entry_causes_refetch() {
    let api = Arc::new(MockCantoApi::new().with_asset("a1", image_payload("a1", "a.jpg")));
    let resolver = resolver_with_ttl(api.clone(), Duration::from_millis(40));

    resolver.resolve_by_id("a1").await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    resolver.resolve_by_id("a1").await.unwrap();

    assert_eq!(api.get_by_id_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn unknown_id_is_not_found_and_never_cached() {
    let api = Arc::new(MockCantoApi::new());
    let resolver = resolver(api.clone());

    for _ in 0..2 {
        let err = resolver.resolve_by_id("missing").await.unwrap_err();
        assert!(matches!(err, CantoError::NotFound(_)));
    }
    // No negative caching: both lookups reached the API
    assert_eq!(api.get_by_id_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn filename_resolution_prefers_exact_filename_match() {
    let api = Arc::new(MockCantoApi::new().with_search_results(vec![
        json!({
            "id": "wrong1",
            "name": "Summer",
            "default": {"Filename": "Summer-draft.jpg"}
        }),
        json!({
            "id": "right1",
            "name": "Something else entirely",
            "default": {"Filename": "Summer.jpg"}
        }),
    ]));
    let resolver = resolver(api.clone());

    let record = resolver.resolve_by_filename("Summer.jpg").await.unwrap();
    assert_eq!(record.id, "right1");
}

#[tokio::test]
async fn filename_resolution_falls_back_to_display_name() {
    let api = Arc::new(MockCantoApi::new().with_search_results(vec![
        json!({
            "id": "n1",
            "name": "Summer.jpg",
            "default": {"Filename": "IMG_0042.JPG"}
        }),
        json!({
            "id": "n2",
            "name": "Summer.jpg",
            "default": {"Filename": "IMG_0043.JPG"}
        }),
    ]));
    let resolver = resolver(api.clone());

    // No derived filename equals the input, so the name pass applies;
    // the first name match wins
    let record = resolver.resolve_by_filename("Summer.jpg").await.unwrap();
    assert_eq!(record.id, "n1");
}

#[tokio::test]
async fn filename_matching_is_case_sensitive() {
    let api = Arc::new(MockCantoApi::new().with_search_results(vec![json!({
        "id": "a1",
        "name": "x",
        "default": {"Filename": "Summer.jpg"}
    })]));
    let resolver = resolver(api.clone());

    let err = resolver.resolve_by_filename("summer.jpg").await.unwrap_err();
    assert!(matches!(err, CantoError::NotFound(_)));
}

#[tokio::test]
async fn unmatched_filename_leaves_cache_unwritten() {
    let api = Arc::new(MockCantoApi::new().with_search_results(vec![json!({
        "id": "a1",
        "name": "Unrelated",
        "default": {"Filename": "other.png"}
    })]));
    let resolver = resolver(api.clone());

    for _ in 0..2 {
        let err = resolver.resolve_by_filename("missing.png").await.unwrap_err();
        assert!(matches!(err, CantoError::NotFound(_)));
    }
    // Each attempt searched again; nothing was cached for the key
    assert_eq!(api.search_calls.load(Ordering::SeqCst), 2);
    assert_eq!(resolver.cached_entries().await, 0);
}

#[tokio::test]
async fn matched_filename_is_cached() {
    let api = Arc::new(MockCantoApi::new().with_search_results(vec![json!({
        "id": "a1",
        "name": "x",
        "default": {"Filename": "Summer.jpg"}
    })]));
    let resolver = resolver(api.clone());

    let first = resolver.resolve_by_filename("Summer.jpg").await.unwrap();
    let second = resolver.resolve_by_filename("Summer.jpg").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(api.search_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn clear_cache_forces_refetch() {
    let api = Arc::new(MockCantoApi::new().with_asset("a1", image_payload("a1", "a.jpg")));
    let resolver = resolver(api.clone());

    resolver.resolve_by_id("a1").await.unwrap();
    assert_eq!(resolver.clear_cache().await, 1);
    // Idempotent
    assert_eq!(resolver.clear_cache().await, 0);

    resolver.resolve_by_id("a1").await.unwrap();
    assert_eq!(api.get_by_id_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn search_pins_selected_asset_not_in_page() {
    let api = Arc::new(
        MockCantoApi::new()
            .with_search_results(vec![image_payload("other1", "other.jpg")])
            .with_asset("selected123", image_payload("selected123", "chosen.jpg")),
    );
    let resolver = resolver(api.clone());

    let assets = resolver.search("beach", Some("selected123")).await.unwrap();
    assert_eq!(assets.len(), 2);
    assert_eq!(assets[0].id, "selected123");
    assert_eq!(assets[1].id, "other1");
    assert_eq!(api.get_by_id_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn search_does_not_duplicate_selected_asset() {
    let api = Arc::new(
        MockCantoApi::new().with_search_results(vec![image_payload("a1", "a.jpg")]),
    );
    let resolver = resolver(api.clone());

    let assets = resolver.search("a", Some("a1")).await.unwrap();
    assert_eq!(assets.len(), 1);
    assert_eq!(api.get_by_id_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn search_skips_unresolvable_payloads() {
    let api = Arc::new(MockCantoApi::new().with_search_results(vec![
        json!({"name": "no id at all"}),
        image_payload("a1", "a.jpg"),
    ]));
    let resolver = resolver(api.clone());

    let assets = resolver.search("", None).await.unwrap();
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].id, "a1");
}

#[tokio::test]
async fn resolve_tries_id_then_filename() {
    let api = Arc::new(
        MockCantoApi::new()
            .with_asset("abcdef123456", image_payload("abcdef123456", "direct.jpg"))
            .with_search_results(vec![json!({
                "id": "s1",
                "name": "x",
                "default": {"Filename": "fallback.jpg"}
            })]),
    );
    let resolver = resolver(api.clone());

    // Id-shaped identifier resolves directly
    let record = resolver.resolve("abcdef123456").await.unwrap();
    assert_eq!(record.id, "abcdef123456");

    // Dotted identifier falls back to the filename search
    let record = resolver.resolve("fallback.jpg").await.unwrap();
    assert_eq!(record.id, "s1");

    // Short undotted identifier is not looked up at all
    let before = api.search_calls.load(Ordering::SeqCst);
    let err = resolver.resolve("short").await.unwrap_err();
    assert!(matches!(err, CantoError::NotFound(_)));
    assert_eq!(api.search_calls.load(Ordering::SeqCst), before);
}

#[tokio::test]
async fn format_value_honors_return_format() {
    let api = Arc::new(MockCantoApi::new().with_search_results(vec![json!({
        "id": "a1",
        "name": "x",
        "url": {"preview": "https://acme.canto.com/preview/image/a1"},
        "default": {"Filename": "Summer.jpg"}
    })]));
    let resolver = resolver(api.clone());

    let value = resolver
        .format_value("Summer.jpg", ReturnFormat::Id)
        .await
        .unwrap();
    assert_eq!(value, Some(FormattedValue::Id("a1".to_string())));

    let value = resolver
        .format_value("Summer.jpg", ReturnFormat::Url)
        .await
        .unwrap();
    assert_eq!(
        value,
        Some(FormattedValue::Url(
            "https://acme.canto.com/preview/image/a1".to_string()
        ))
    );

    let value = resolver
        .format_value("Summer.jpg", ReturnFormat::Object)
        .await
        .unwrap();
    match value {
        Some(FormattedValue::Object(record)) => assert_eq!(record.id, "a1"),
        other => panic!("expected object, got {other:?}"),
    }
}

#[tokio::test]
async fn format_value_is_absent_for_empty_or_unresolvable_input() {
    let api = Arc::new(MockCantoApi::new());
    let resolver = resolver(api.clone());

    let value = resolver
        .format_value("", ReturnFormat::Object)
        .await
        .unwrap();
    assert_eq!(value, None);
    assert_eq!(api.search_calls.load(Ordering::SeqCst), 0);

    let value = resolver
        .format_value("gone.jpg", ReturnFormat::Object)
        .await
        .unwrap();
    assert_eq!(value, None);
}

#[tokio::test]
async fn upstream_errors_propagate_unchanged() {
    let api = Arc::new(MockCantoApi::new().unconfigured());
    let resolver = resolver(api.clone());

    let err = resolver.resolve_by_filename("Summer.jpg").await.unwrap_err();
    assert!(matches!(err, CantoError::NotConfigured(_)));
}
