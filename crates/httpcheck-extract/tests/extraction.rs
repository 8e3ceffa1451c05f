//! Extraction of raw inputs from whole `http::Request`s.

use httpcheck_core::RawValue;
use httpcheck_extract::{
    extract_payload, extract_queries, RequestContext, ValuelessKeyPolicy,
};
use serde_json::json;
use std::collections::HashMap;

fn router_params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn extracts_all_three_sources() {
    let request = http::Request::builder()
        .method("PUT")
        .uri("/orders/17?DryRun=1&trace")
        .header("Content-Type", "application/json; charset=utf-8")
        .body(r#"{"Quantity": 3, "items": [{"sku": "A1"}], "note": null}"#)
        .unwrap();

    let ctx = RequestContext::from_http(request, router_params(&[("OrderId", "17")]));

    assert_eq!(ctx.path_params().get_or_empty("orderid"), "17");

    let queries = extract_queries(&ctx, ValuelessKeyPolicy::KeyAsValue);
    assert_eq!(queries.get_or_empty("dryrun"), "1");
    assert_eq!(queries.get_or_empty("trace"), "trace");

    let payload = extract_payload(&ctx).unwrap();
    assert_eq!(payload.get("quantity"), Some(&RawValue::Integer(3)));
    assert_eq!(
        payload.get("ITEMS"),
        Some(&RawValue::Composite(json!([{"sku": "A1"}])))
    );
    assert!(payload.get("note").is_some_and(RawValue::is_absent));
}

#[test]
fn form_bodies_are_not_payloads() {
    let request = http::Request::builder()
        .method("POST")
        .uri("/login")
        .header("content-type", "application/x-www-form-urlencoded")
        .body("user=alice&password=secret")
        .unwrap();

    let ctx = RequestContext::from_http(request, router_params(&[]));
    let err = extract_payload(&ctx).unwrap_err();

    assert_eq!(
        err.to_string(),
        "application/x-www-form-urlencoded is not supported by this API"
    );
}

#[test]
fn empty_policy_blanks_valueless_keys() {
    let request = http::Request::builder()
        .uri("/search?q=rust&exact")
        .body("")
        .unwrap();

    let ctx = RequestContext::from_http(request, router_params(&[]));
    let queries = extract_queries(&ctx, ValuelessKeyPolicy::Empty);

    assert_eq!(queries.get_or_empty("q"), "rust");
    assert!(queries.contains_key("exact"));
    assert_eq!(queries.get_or_empty("exact"), "");
}
