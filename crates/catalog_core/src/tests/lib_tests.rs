use super::*;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode as HttpStatus,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use shared::{domain::PageDirection, error::ErrorCode};
use tokio::{net::TcpListener, sync::Mutex};

const TOTAL: u32 = 964;

#[derive(Clone, Default)]
struct ServerState {
    page_queries: Arc<Mutex<Vec<PageQuery>>>,
}

fn summary(n: u32) -> serde_json::Value {
    json!({
        "name": format!("mon-{n}"),
        "url": format!("https://pokeapi.co/api/v2/pokemon/{}/", n + 1),
    })
}

async fn handle_page(
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> Json<serde_json::Value> {
    state.page_queries.lock().await.push(query);
    let end = (query.offset + query.limit).min(TOTAL);
    Json(json!({
        "count": TOTAL,
        "next": null,
        "previous": null,
        "results": (query.offset..end).map(summary).collect::<Vec<_>>(),
    }))
}

async fn handle_types() -> Json<serde_json::Value> {
    Json(json!({
        "count": 2,
        "results": [
            { "name": "grass", "url": "https://pokeapi.co/api/v2/type/12/" },
            { "name": "fire", "url": "https://pokeapi.co/api/v2/type/10/" }
        ]
    }))
}

async fn handle_type_members(Path(name): Path<String>) -> impl IntoResponse {
    if name != "grass" {
        return (HttpStatus::NOT_FOUND, "Not Found").into_response();
    }
    Json(json!({
        "name": "grass",
        "pokemon": [
            { "pokemon": summary(0), "slot": 1 },
            { "pokemon": summary(42), "slot": 1 }
        ]
    }))
    .into_response()
}

async fn handle_detail(Path(name): Path<String>) -> impl IntoResponse {
    if name != "bulbasaur" {
        return (HttpStatus::NOT_FOUND, "Not Found").into_response();
    }
    Json(json!({
        "name": "bulbasaur",
        "height": 7,
        "weight": 69,
        "base_experience": 64,
        "abilities": [ { "ability": { "name": "overgrow", "url": "" } } ],
        "types": [
            { "slot": 1, "type": { "name": "grass", "url": "" } },
            { "slot": 2, "type": { "name": "poison", "url": "" } }
        ],
        "sprites": { "other": { "official-artwork": { "front_default": "https://example.invalid/1.png" } } }
    }))
    .into_response()
}

fn catalog_routes(state: ServerState) -> Router {
    Router::new()
        .route("/pokemon", get(handle_page))
        .route("/pokemon/:name", get(handle_detail))
        .route("/type", get(handle_types))
        .route("/type/:name", get(handle_type_members))
        .with_state(state)
}

async fn serve(app: Router) -> anyhow::Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

async fn spawn_catalog_server() -> anyhow::Result<(HttpCatalogClient, ServerState)> {
    let state = ServerState::default();
    let base = serve(catalog_routes(state.clone())).await?;
    Ok((HttpCatalogClient::new(Url::parse(&base)?), state))
}

#[tokio::test]
async fn fetch_page_sends_offset_and_limit() {
    let (client, state) = spawn_catalog_server().await.expect("spawn server");

    let page = client
        .fetch_page(PageQuery {
            offset: 50,
            limit: 50,
        })
        .await
        .expect("page");

    assert_eq!(page.count, TOTAL);
    assert_eq!(page.results.len(), 50);
    assert_eq!(page.results[0].name, "mon-50");
    assert_eq!(
        state.page_queries.lock().await.as_slice(),
        &[PageQuery {
            offset: 50,
            limit: 50
        }]
    );
}

#[tokio::test]
async fn fetch_types_returns_vocabulary() {
    let (client, _state) = spawn_catalog_server().await.expect("spawn server");
    let types = client.fetch_types().await.expect("types");
    let names: Vec<_> = types.iter().map(|tag| tag.name.as_str()).collect();
    assert_eq!(names, vec!["grass", "fire"]);
}

#[tokio::test]
async fn fetch_type_members_unwraps_nested_entries() {
    let (client, _state) = spawn_catalog_server().await.expect("spawn server");
    let members = client.fetch_type_members("grass").await.expect("members");
    let names: Vec<_> = members.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, vec!["mon-0", "mon-42"]);
}

#[tokio::test]
async fn unknown_type_is_not_found() {
    let (client, _state) = spawn_catalog_server().await.expect("spawn server");
    let err = client
        .fetch_type_members("shadow")
        .await
        .expect_err("must fail");
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn fetch_detail_decodes_entity() {
    let (client, _state) = spawn_catalog_server().await.expect("spawn server");
    let detail = client.fetch_detail("bulbasaur").await.expect("detail");
    assert_eq!(detail.height, 7);
    assert_eq!(detail.type_names(), vec!["grass", "poison"]);
    assert_eq!(detail.artwork_url(), Some("https://example.invalid/1.png"));
}

#[tokio::test]
async fn missing_detail_maps_to_not_found() {
    let (client, _state) = spawn_catalog_server().await.expect("spawn server");
    let err = client.fetch_detail("missingno").await.expect_err("must fail");
    assert!(err.is_not_found());
    assert_eq!(err.user_message(), "Pokémon not found");
}

#[tokio::test]
async fn malformed_payload_is_network_or_parse_failure() {
    let app = Router::new().route("/type", get(|| async { "<html>maintenance</html>" }));
    let base = serve(app).await.expect("spawn server");
    let client = HttpCatalogClient::new(Url::parse(&base).expect("url"));

    let err = client.fetch_types().await.expect_err("must fail");
    assert_eq!(err.code, ErrorCode::NetworkOrParseFailure);
}

#[tokio::test]
async fn server_error_is_network_or_parse_failure() {
    let app = Router::new().route(
        "/pokemon",
        get(|| async { (HttpStatus::INTERNAL_SERVER_ERROR, "oops") }),
    );
    let base = serve(app).await.expect("spawn server");
    let client = HttpCatalogClient::new(Url::parse(&base).expect("url"));

    let err = client
        .fetch_page(PageQuery {
            offset: 0,
            limit: 50,
        })
        .await
        .expect_err("must fail");
    assert_eq!(err.code, ErrorCode::NetworkOrParseFailure);
}

#[tokio::test]
async fn unreachable_server_is_network_or_parse_failure() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = HttpCatalogClient::new(Url::parse(&format!("http://{addr}")).expect("url"));
    let err = client.fetch_types().await.expect_err("must fail");
    assert_eq!(err.code, ErrorCode::NetworkOrParseFailure);
}

#[tokio::test]
async fn base_url_path_prefix_is_preserved() {
    let state = ServerState::default();
    let app = Router::new().nest("/api/v2", catalog_routes(state));
    let base = serve(app).await.expect("spawn server");

    for prefix in ["/api/v2", "/api/v2/"] {
        let client = HttpCatalogClient::new(Url::parse(&format!("{base}{prefix}")).expect("url"));
        let detail = client.fetch_detail("bulbasaur").await.expect("detail");
        assert_eq!(detail.name, "bulbasaur");
    }
}

#[tokio::test]
async fn list_controller_pages_and_filters_over_http() {
    let (client, state) = spawn_catalog_server().await.expect("spawn server");
    let controller = ListController::new(Arc::new(client));

    let outcome = controller.initialize().await;
    assert_eq!(outcome.page, FetchOutcome::Applied);
    assert_eq!(outcome.vocabulary, FetchOutcome::Applied);

    assert_eq!(
        controller.go_to_page(PageDirection::Next).await,
        FetchOutcome::Applied
    );
    assert_eq!(controller.snapshot().await.window.offset(), 50);
    assert_eq!(
        state.page_queries.lock().await.last(),
        Some(&PageQuery {
            offset: 50,
            limit: 50
        })
    );

    assert_eq!(
        controller
            .set_type_filter(Some(TypeTag::named("grass")))
            .await,
        FetchOutcome::Applied
    );
    let snapshot = controller.snapshot().await;
    let names: Vec<_> = snapshot
        .displayed_list
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(names, vec!["mon-0", "mon-42"]);
    assert_eq!(snapshot.base_list[0].name, "mon-50");
}
