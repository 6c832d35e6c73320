//! Integration tests for the marquee-web HTTP surface
//!
//! Each test builds the full router over a fresh in-memory database
//! and drives it with `tower::ServiceExt::oneshot`.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use marquee_common::time::parse_timestamp;
use marquee_web::forms::{ArtistCommand, ShowCommand, VenueCommand};
use marquee_web::{build_router, db, AppState};
use sqlx::SqlitePool;
use tower::util::ServiceExt; // for `oneshot`

/// Test helper: fresh in-memory database with schema applied
async fn setup() -> (axum::Router, SqlitePool) {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Should create in-memory database");
    marquee_common::db::init_schema(&pool)
        .await
        .expect("Schema init should succeed");

    let app = build_router(AppState::new(pool.clone()));
    (app, pool)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("Body should be UTF-8")
}

fn musical_hop() -> VenueCommand {
    VenueCommand {
        name: "The Musical Hop".to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        address: "1015 Folsom Street".to_string(),
        phone: Some("123-123-1234".to_string()),
        genres: vec!["Jazz".to_string(), "Folk".to_string()],
        image_link: None,
        facebook_link: None,
        website_link: None,
        seeking_talent: false,
        seeking_description: String::new(),
    }
}

fn guns_n_petals() -> ArtistCommand {
    ArtistCommand {
        name: "Guns N Petals".to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        phone: None,
        genres: vec!["Rock n Roll".to_string()],
        image_link: Some("https://example.com/petals.jpg".to_string()),
        facebook_link: None,
        website_link: None,
        seeking_venue: true,
        seeking_description: "Looking for gigs".to_string(),
    }
}

async fn seed_show(pool: &SqlitePool, venue_id: i64, artist_id: i64, start: &str) {
    db::shows::insert(
        pool,
        &ShowCommand {
            venue_id,
            artist_id,
            start_time: parse_timestamp(start).unwrap(),
        },
    )
    .await
    .expect("Show insert should succeed");
}

// =============================================================================
// Health and home
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _pool) = setup().await;

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value =
        serde_json::from_str(&body_text(response.into_body()).await).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "marquee-web");
}

#[tokio::test]
async fn test_home_page_renders() {
    let (app, _pool) = setup().await;

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response.into_body()).await.contains("Marquee"));
}

// =============================================================================
// Venue directory
// =============================================================================

#[tokio::test]
async fn test_directory_groups_by_city_and_counts_per_venue() {
    let (app, pool) = setup().await;

    let hop = db::venues::insert(&pool, &musical_hop()).await.unwrap();
    let mut pianos = musical_hop();
    pianos.name = "The Dueling Pianos Bar".to_string();
    pianos.city = "New York".to_string();
    pianos.state = "NY".to_string();
    let pianos = db::venues::insert(&pool, &pianos).await.unwrap();

    let artist = db::artists::insert(&pool, &guns_n_petals()).await.unwrap();

    // Far-future shows stay upcoming no matter when the test runs
    seed_show(&pool, hop, artist, "2099-06-01 20:00:00").await;
    seed_show(&pool, hop, artist, "2099-07-01 20:00:00").await;
    // A past show at the other venue must not inflate its count
    seed_show(&pool, pianos, artist, "2001-06-01 20:00:00").await;

    let response = app.oneshot(get("/venues")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response.into_body()).await;
    assert!(html.contains("San Francisco, CA"));
    assert!(html.contains("New York, NY"));
    assert!(html.contains("The Musical Hop"));

    // Counts are per venue: 2 at the Hop, 0 at the Pianos
    let hop_pos = html.find("The Musical Hop").unwrap();
    let pianos_pos = html.find("The Dueling Pianos Bar").unwrap();
    assert!(html[hop_pos..].contains("2 upcoming shows"));
    assert!(html[pianos_pos..hop_pos].contains("0 upcoming shows"));
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn test_venue_search_is_case_insensitive_substring() {
    let (app, pool) = setup().await;

    db::venues::insert(&pool, &musical_hop()).await.unwrap();
    let mut coffee = musical_hop();
    coffee.name = "Park Square Live Music & Coffee".to_string();
    db::venues::insert(&pool, &coffee).await.unwrap();

    let response = app
        .clone()
        .oneshot(post_form("/venues/search", "search_term=hop"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response.into_body()).await;
    assert!(html.contains("Found 1 results"));
    assert!(html.contains("The Musical Hop"));

    let response = app
        .clone()
        .oneshot(post_form("/venues/search", "search_term=Music"))
        .await
        .unwrap();
    let html = body_text(response.into_body()).await;
    assert!(html.contains("Found 2 results"));

    // Empty term matches every venue
    let response = app
        .oneshot(post_form("/venues/search", "search_term="))
        .await
        .unwrap();
    let html = body_text(response.into_body()).await;
    assert!(html.contains("Found 2 results"));
}

#[tokio::test]
async fn test_artist_search() {
    let (app, pool) = setup().await;

    db::artists::insert(&pool, &guns_n_petals()).await.unwrap();
    let mut band = guns_n_petals();
    band.name = "The Wild Sax Band".to_string();
    db::artists::insert(&pool, &band).await.unwrap();

    let response = app
        .oneshot(post_form("/artists/search", "search_term=band"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response.into_body()).await;
    assert!(html.contains("Found 1 results"));
    assert!(html.contains("The Wild Sax Band"));
    assert!(!html.contains("Guns N Petals"));
}

// =============================================================================
// Detail pages
// =============================================================================

#[tokio::test]
async fn test_venue_detail_renders_record_and_partitioned_history() {
    let (app, pool) = setup().await;

    let venue = db::venues::insert(&pool, &musical_hop()).await.unwrap();
    let artist = db::artists::insert(&pool, &guns_n_petals()).await.unwrap();
    seed_show(&pool, venue, artist, "2099-06-01 20:00:00").await;
    seed_show(&pool, venue, artist, "2001-06-01 20:00:00").await;

    let response = app.oneshot(get(&format!("/venues/{venue}"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response.into_body()).await;
    assert!(html.contains("The Musical Hop"));
    assert!(html.contains("Jazz, Folk"));
    assert!(html.contains("1015 Folsom Street"));
    assert!(html.contains("1 upcoming shows"));
    assert!(html.contains("1 past shows"));
    assert!(html.contains("Guns N Petals"));
}

#[tokio::test]
async fn test_detail_on_missing_id_is_404() {
    let (app, _pool) = setup().await;

    let response = app.clone().oneshot(get("/venues/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response.into_body()).await.contains("404"));

    let response = app.oneshot(get("/artists/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_venue_round_trip() {
    let (app, pool) = setup().await;

    let body = "name=The+Musical+Hop&city=San+Francisco&state=CA\
                &address=1015+Folsom+Street&phone=123-123-1234\
                &genres=Jazz,+Reggae&seeking_talent=y\
                &seeking_description=Looking+for+local+artists";
    let response = app
        .clone()
        .oneshot(post_form("/venues/create", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response.into_body()).await;
    assert!(html.contains("Venue The Musical Hop was successfully listed!"));

    // Every submitted field round-trips through the detail page
    let found = db::venues::search(&pool, "hop").await.unwrap();
    assert_eq!(found.len(), 1);

    let response = app
        .oneshot(get(&format!("/venues/{}", found[0].id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response.into_body()).await;
    assert!(html.contains("The Musical Hop"));
    assert!(html.contains("Jazz, Reggae"));
    assert!(html.contains("123-123-1234"));
    assert!(html.contains("Looking for local artists"));
}

#[tokio::test]
async fn test_create_venue_validation_errors_rerender_form() {
    let (app, pool) = setup().await;

    // Missing name and a bad state code
    let body = "city=San+Francisco&state=California&address=1015+Folsom+Street";
    let response = app
        .oneshot(post_form("/venues/create", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let html = body_text(response.into_body()).await;
    assert!(html.contains("name is required"));
    assert!(html.contains("state must be a 2-letter code"));
    // Submitted values are echoed back into the form
    assert!(html.contains("San Francisco"));

    // Nothing was persisted
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM venues")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_create_artist_round_trip() {
    let (app, pool) = setup().await;

    let body = "name=Guns+N+Petals&city=San+Francisco&state=CA&genres=Rock+n+Roll";
    let response = app
        .oneshot(post_form("/artists/create", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response.into_body()).await;
    assert!(html.contains("Artist Guns N Petals was successfully listed!"));

    let artists = db::artists::list_all(&pool).await.unwrap();
    assert_eq!(artists.len(), 1);
    assert_eq!(artists[0].name, "Guns N Petals");
}

// =============================================================================
// Edit
// =============================================================================

#[tokio::test]
async fn test_edit_venue_overwrites_all_fields_and_redirects() {
    let (app, pool) = setup().await;
    let id = db::venues::insert(&pool, &musical_hop()).await.unwrap();

    // Pre-filled form
    let response = app
        .clone()
        .oneshot(get(&format!("/venues/{id}/edit")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response.into_body()).await.contains("The Musical Hop"));

    // Full-field overwrite: fields left blank in the submission clear out
    let body = "name=The+Dueling+Pianos+Bar&city=New+York&state=ny\
                &address=335+Delancey+Street&genres=Classical";
    let response = app
        .clone()
        .oneshot(post_form(&format!("/venues/{id}/edit"), body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert_eq!(location, format!("/venues/{id}?notice=updated"));

    let venue = db::venues::get(&pool, id).await.unwrap().unwrap();
    assert_eq!(venue.name, "The Dueling Pianos Bar");
    assert_eq!(venue.state, "NY");
    assert_eq!(venue.phone, None, "Blank phone clears the stored value");
    assert_eq!(venue.genres, vec!["Classical"]);
    assert!(!venue.seeking_talent);
}

#[tokio::test]
async fn test_edit_with_invalid_input_leaves_record_unchanged() {
    let (app, pool) = setup().await;
    let id = db::venues::insert(&pool, &musical_hop()).await.unwrap();

    let response = app
        .oneshot(post_form(&format!("/venues/{id}/edit"), "name=&city=&state=XX&address="))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let venue = db::venues::get(&pool, id).await.unwrap().unwrap();
    assert_eq!(venue.name, "The Musical Hop");
    assert_eq!(venue.city, "San Francisco");
}

#[tokio::test]
async fn test_edit_missing_venue_is_404() {
    let (app, _pool) = setup().await;

    let body = "name=X&city=Y&state=CA&address=Z";
    let response = app
        .oneshot(post_form("/venues/42/edit", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_artist_redirects_to_detail() {
    let (app, pool) = setup().await;
    let id = db::artists::insert(&pool, &guns_n_petals()).await.unwrap();

    let body = "name=Matt+Quevedo&city=New+York&state=NY";
    let response = app
        .oneshot(post_form(&format!("/artists/{id}/edit"), body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let artist = db::artists::get(&pool, id).await.unwrap().unwrap();
    assert_eq!(artist.name, "Matt Quevedo");
    assert!(!artist.seeking_venue, "Unchecked checkbox overwrites to false");
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_venue_then_detail_is_404() {
    let (app, pool) = setup().await;
    let venue = db::venues::insert(&pool, &musical_hop()).await.unwrap();
    let artist = db::artists::insert(&pool, &guns_n_petals()).await.unwrap();
    seed_show(&pool, venue, artist, "2099-06-01 20:00:00").await;

    let response = app
        .clone()
        .oneshot(delete(&format!("/venues/{venue}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert_eq!(location, "/venues?notice=deleted");

    let response = app.oneshot(get(&format!("/venues/{venue}"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let shows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shows")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(shows, 0, "Deleting a venue cascades to its shows");
}

#[tokio::test]
async fn test_delete_missing_venue_is_404() {
    let (app, _pool) = setup().await;
    let response = app.oneshot(delete("/venues/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Shows
// =============================================================================

#[tokio::test]
async fn test_shows_page_joins_venue_and_artist() {
    let (app, pool) = setup().await;
    let venue = db::venues::insert(&pool, &musical_hop()).await.unwrap();
    let artist = db::artists::insert(&pool, &guns_n_petals()).await.unwrap();
    seed_show(&pool, venue, artist, "2099-06-01 20:00:00").await;

    let response = app.oneshot(get("/shows")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response.into_body()).await;
    assert!(html.contains("The Musical Hop"));
    assert!(html.contains("Guns N Petals"));
    assert!(html.contains("2099-06-01 20:00:00"));
}

#[tokio::test]
async fn test_create_show() {
    let (app, pool) = setup().await;
    let venue = db::venues::insert(&pool, &musical_hop()).await.unwrap();
    let artist = db::artists::insert(&pool, &guns_n_petals()).await.unwrap();

    let body = format!(
        "venue_id={venue}&artist_id={artist}&start_time=2099-06-01+20:00:00"
    );
    let response = app
        .oneshot(post_form("/shows/create", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response.into_body()).await;
    assert!(html.contains("Show was successfully listed!"));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shows")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_create_show_with_missing_artist_is_form_error() {
    let (app, pool) = setup().await;
    let venue = db::venues::insert(&pool, &musical_hop()).await.unwrap();

    let body = format!("venue_id={venue}&artist_id=99&start_time=2099-06-01+20:00:00");
    let response = app
        .oneshot(post_form("/shows/create", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response.into_body()).await.contains("no artist with id 99"));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shows")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_create_show_with_bad_timestamp_is_form_error() {
    let (app, _pool) = setup().await;

    let response = app
        .oneshot(post_form("/shows/create", "venue_id=1&artist_id=1&start_time=tonight"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response.into_body()).await.contains("Invalid timestamp"));
}
