//! End-to-end tests of the REST router against mocked provider APIs.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use provider_gateway::api::rest::create_router;
use provider_gateway::app::{Stores, build_state};
use provider_gateway::config::GatewayConfig;
use provider_gateway::domain::entities::{
    AdjustmentKind, CostComponent, MarkupRule, ProviderCupid, ProviderRecord,
};
use provider_gateway::domain::value_objects::{ContractTerm, ProviderId, UserType};
use provider_gateway::infrastructure::persistence::QuoteRepository;
use provider_gateway::infrastructure::persistence::in_memory::{
    InMemoryMarkupRepository, InMemoryProviderCupidsRepository, InMemoryProviderRepository,
    InMemoryQuoteRepository, InMemoryRequestContextRepository,
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const IDENTIFIERS: [(&str, &str); 5] = [
    ("sky", "sky"),
    ("neos", "neos"),
    ("bt", "bt"),
    ("virgin_media", "virgin"),
    ("cityfibre", "cityfibre"),
];

fn rule(identifier: &str) -> MarkupRule {
    let mut rule = MarkupRule::new(UserType::DEFAULT, ProviderId::new(identifier));
    for years in [1, 3] {
        let term = ContractTerm::new(years).unwrap();
        rule = rule
            .with_adjustment(term, CostComponent::Connection, AdjustmentKind::Addition, Decimal::new(10, 0))
            .with_adjustment(term, CostComponent::Connection, AdjustmentKind::Markup, Decimal::new(10, 0))
            .with_adjustment(term, CostComponent::Rental, AdjustmentKind::Addition, Decimal::new(5, 0))
            .with_adjustment(term, CostComponent::Rental, AdjustmentKind::Markup, Decimal::new(20, 0));
    }
    rule
}

struct TestApp {
    router: Router,
    quotes: Arc<InMemoryQuoteRepository>,
}

async fn app(server: &MockServer) -> TestApp {
    let providers: String = IDENTIFIERS
        .iter()
        .map(|(kind, identifier)| {
            format!(
                "[[providers]]\nkind = \"{kind}\"\nidentifier = \"{identifier}\"\nendpoint = \"{}/{identifier}\"\ntimeout_ms = 2000\n\n",
                server.uri()
            )
        })
        .collect();
    let config = GatewayConfig::load_from_str(&providers).unwrap();

    let quotes = Arc::new(InMemoryQuoteRepository::new());
    let stores = Stores {
        quotes: quotes.clone(),
        markups: Arc::new(InMemoryMarkupRepository::with_rules(
            IDENTIFIERS.iter().map(|(_, identifier)| rule(identifier)),
        )),
        providers: Arc::new(InMemoryProviderRepository::with_records([
            ProviderRecord::new(ProviderId::new("sky"), "Sky"),
            ProviderRecord::new(ProviderId::new("colt"), "Colt").with_active(false),
            ProviderRecord::new(ProviderId::new("neos"), "Neos"),
        ])),
        cupids: Arc::new(InMemoryProviderCupidsRepository::with_cupids([
            ProviderCupid::new(ProviderId::new("sky"), "111"),
        ])),
        contexts: Arc::new(InMemoryRequestContextRepository::new()),
    };

    let state = build_state(&config, stores).unwrap();
    TestApp {
        router: create_router(Arc::new(state)),
        quotes,
    }
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

async fn post_quote(router: &Router, body: Value, debug: bool) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/v1/quotes?debug={debug}"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(router, request).await
}

fn quote_request(provider: &str) -> Value {
    json!({"request_id": "req-42", "provider": provider, "postcode": "SW1A 1AA"})
}

#[tokio::test]
async fn health_reports_registered_providers() {
    let server = MockServer::start().await;
    let app = app(&server).await;

    let (status, body) = get(&app.router, "/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["providers"], 5);
}

#[tokio::test]
async fn unknown_provider_returns_invalid_provider() {
    let server = MockServer::start().await;
    let app = app(&server).await;

    let (status, body) = post_quote(&app.router, quote_request("acme"), false).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Invalid Provider", "data": []}));
}

#[tokio::test]
async fn batched_provider_quotes_are_priced_and_stored() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sky"))
        .and(body_partial_json(json!({
            "request": {"request_id": "req-42", "postcode": "SW1A 1AA"},
            "contract_term": [1, 3],
            "debug": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"term": 1, "costs": {"connection": 100, "rental": 50}, "product": {"type": "FTTP"}},
            {"term": 5, "costs": {"connection": 100, "rental": 50}}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    let app = app(&server).await;

    let (status, body) = post_quote(&app.router, quote_request("sky"), false).await;

    assert_eq!(status, StatusCode::OK);
    let quotes = body.as_array().unwrap();
    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0]["term"], 1);
    assert_eq!(quotes[0]["costs"]["sell"]["connection"], "121.00");
    assert_eq!(quotes[0]["costs"]["sell"]["rental"], "66.00");
    assert_eq!(quotes[0]["product"]["type"], "FTTP");
    assert_eq!(app.quotes.count().await.unwrap(), 1);
}

#[tokio::test]
async fn per_term_provider_is_called_once_per_term() {
    let server = MockServer::start().await;
    for years in [1, 3] {
        Mock::given(method("POST"))
            .and(path("/neos"))
            .and(body_partial_json(json!({"contract_term": [years]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"term": years, "costs": {"connection": 100, "rental": 50}}
            ])))
            .expect(1)
            .mount(&server)
            .await;
    }
    let app = app(&server).await;

    let (status, body) = post_quote(&app.router, quote_request("neos"), false).await;

    assert_eq!(status, StatusCode::OK);
    let terms: Vec<u64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["term"].as_u64().unwrap())
        .collect();
    assert_eq!(terms, vec![1, 3]);
}

#[tokio::test]
async fn explicit_contract_terms_are_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bt"))
        .and(body_partial_json(json!({"contract_term": [3]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    let app = app(&server).await;

    let mut request = quote_request("bt");
    request["contract_term"] = json!([3]);
    let (status, body) = post_quote(&app.router, request, false).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn cityfibre_quotes_are_normalized_before_pricing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cityfibre"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"term": 1, "costs": {"connection": 0, "rental": 10}, "product": {"type": "GPON"}},
            {"term": 1, "costs": {"connection": 0, "rental": 10}, "product": {"type": "XGS-PON"}}
        ])))
        .mount(&server)
        .await;
    let app = app(&server).await;

    let (_, body) = post_quote(&app.router, quote_request("cityfibre"), false).await;

    let quotes = body.as_array().unwrap();
    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0]["product"]["type"], "XGS-PON");
    assert_eq!(quotes[0]["costs"]["sell"]["rental"], "150.00");
}

#[tokio::test]
async fn debug_returns_provider_response_unprocessed() {
    let server = MockServer::start().await;
    let raw = json!([{"term": 9, "costs": {"rental": "0.001"}, "trace": "abc"}]);
    Mock::given(method("POST"))
        .and(path("/bt"))
        .and(body_partial_json(json!({"debug": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(raw.clone()))
        .mount(&server)
        .await;
    let app = app(&server).await;

    let (status, body) = post_quote(&app.router, quote_request("bt"), true).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, raw);
    assert_eq!(app.quotes.count().await.unwrap(), 0);
}

#[tokio::test]
async fn debug_is_refused_for_virgin_media() {
    let server = MockServer::start().await;
    let app = app(&server).await;

    let (status, body) = post_quote(&app.router, quote_request("virgin"), true).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"message": "Debug mode is not supported for Virgin Media", "data": []})
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn upstream_rejection_is_passed_through() {
    let server = MockServer::start().await;
    let rejection = json!({"error": "postcode not serviceable", "reference": "X1"});
    Mock::given(method("POST"))
        .and(path("/sky"))
        .respond_with(ResponseTemplate::new(422).set_body_json(rejection.clone()))
        .mount(&server)
        .await;
    let app = app(&server).await;

    let (status, body) = post_quote(&app.router, quote_request("sky"), false).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, rejection);
}

#[tokio::test]
async fn malformed_provider_data_is_a_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sky"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"term": 1}])))
        .mount(&server)
        .await;
    let app = app(&server).await;

    let (status, body) = post_quote(&app.router, quote_request("sky"), false).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "PROVIDER_DATA_ERROR");
}

#[tokio::test]
async fn malformed_request_body_is_rejected() {
    let server = MockServer::start().await;
    let app = app(&server).await;

    let (status, body) = post_quote(&app.router, json!({"provider": "sky"}), false).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["message"].as_str().unwrap().contains("request_id"));

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/quotes")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app.router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(app.quotes.count().await.unwrap(), 0);
}

#[tokio::test]
async fn provider_listings() {
    let server = MockServer::start().await;
    let app = app(&server).await;

    let (status, active) = get(&app.router, "/api/v1/providers").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = active
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["identifier"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["sky", "neos"]);

    let (_, all) = get(&app.router, "/api/v1/providers/all").await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (status, cupids) = get(&app.router, "/api/v1/providers/sky/cupids").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cupids, json!([{"provider_id": "sky", "cupid": "111"}]));
}
