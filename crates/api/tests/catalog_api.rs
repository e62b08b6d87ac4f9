//! HTTP-level integration tests for the catalog resources.
//!
//! Reads are public, writes need a staff credential.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, delete_auth, get, get_auth, post_json, post_json_auth,
    put_json_auth, staff_bearer,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create(pool: &PgPool, auth: &str, uri: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_json_auth(build_test_app(pool.clone()), uri, auth, body).await;
    assert_eq!(response.status(), StatusCode::CREATED, "POST {uri}");
    body_json(response).await
}

/// Seed one category and return its id.
async fn seed_category(pool: &PgPool, auth: &str) -> i64 {
    let category = create(pool, auth, "/api/categories", serde_json::json!({"name": "Porcelain"})).await;
    category["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Access control
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_anonymous_can_read_but_not_write(pool: PgPool) {
    let response = get(build_test_app(pool.clone()), "/api/tiles").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));

    let response = post_json(
        build_test_app(pool),
        "/api/categories",
        serde_json::json!({"name": "Sneaky"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["error"],
        "Authentication credentials were not provided"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_trailing_slash_is_equivalent(pool: PgPool) {
    let auth = staff_bearer(&pool).await;
    seed_category(&pool, &auth).await;

    let plain = body_json(get(build_test_app(pool.clone()), "/api/categories").await).await;
    let slashed = get(build_test_app(pool), "/api/categories/").await;
    assert_eq!(slashed.status(), StatusCode::OK);
    assert_eq!(body_json(slashed).await, plain);
}

// ---------------------------------------------------------------------------
// Product types and categories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_product_type_crud_and_slug(pool: PgPool) {
    let auth = staff_bearer(&pool).await;

    let first = create(&pool, &auth, "/api/product-types", serde_json::json!({"name": "Wall Tiles"})).await;
    assert_eq!(first["slug"], "wall-tiles");
    let second = create(&pool, &auth, "/api/product-types", serde_json::json!({"name": "Wall Tiles"})).await;
    assert_eq!(second["slug"], "wall-tiles-2");

    let id = first["id"].as_i64().unwrap();
    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/product-types/{id}"),
        &auth,
        serde_json::json!({"name": "Bathroom Walls"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["slug"], "bathroom-walls");
    assert_eq!(updated["active"], true, "absent fields are kept");

    let response = delete_auth(
        build_test_app(pool.clone()),
        &format!("/api/product-types/{id}"),
        &auth,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(build_test_app(pool), &format!("/api/product-types/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_or_long_name_is_rejected(pool: PgPool) {
    let auth = staff_bearer(&pool).await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/categories",
        &auth,
        serde_json::json!({"name": "   "}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        build_test_app(pool),
        "/api/categories",
        &auth,
        serde_json::json!({"name": "x".repeat(201)}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_product_type_detail_includes_categories(pool: PgPool) {
    let auth = staff_bearer(&pool).await;
    let product_type = create(&pool, &auth, "/api/product-types", serde_json::json!({"name": "Floor"})).await;
    let pt_id = product_type["id"].as_i64().unwrap();
    create(
        &pool,
        &auth,
        "/api/categories",
        serde_json::json!({"name": "Marble", "product_type": pt_id}),
    )
    .await;

    let json = body_json(get(build_test_app(pool), &format!("/api/product-types/{pt_id}")).await).await;
    assert_eq!(json["categories"].as_array().unwrap().len(), 1);
    assert_eq!(json["categories"][0]["name"], "Marble");
    assert_eq!(json["categories_count"], 1);
}

// ---------------------------------------------------------------------------
// Tiles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tile_create_generates_sku_and_rejects_negative_price(pool: PgPool) {
    let auth = staff_bearer(&pool).await;
    let category = seed_category(&pool, &auth).await;

    let tile = create(
        &pool,
        &auth,
        "/api/tiles",
        serde_json::json!({"title": "Carrara White", "category": category, "price": 12.5}),
    )
    .await;
    let sku = tile["sku"].as_str().unwrap();
    assert!(sku.starts_with("TL-"));
    assert_eq!(sku.len(), 11);
    assert_eq!(tile["slug"], "carrara-white");
    assert_eq!(tile["category_name"], "Porcelain");

    let response = post_json_auth(
        build_test_app(pool),
        "/api/tiles",
        &auth,
        serde_json::json!({"title": "Cheap", "category": category, "price": -1.0}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tile_unknown_category_is_bad_request(pool: PgPool) {
    let auth = staff_bearer(&pool).await;
    let response = post_json_auth(
        build_test_app(pool),
        "/api/tiles",
        &auth,
        serde_json::json!({"title": "Orphan", "category": 999_999}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tile_filters_and_ordering(pool: PgPool) {
    let auth = staff_bearer(&pool).await;
    let category = seed_category(&pool, &auth).await;
    for (title, price, material) in [
        ("Alpha", 10.0, "Ceramic"),
        ("Bravo", 30.0, "Porcelain"),
        ("Charlie", 20.0, "ceramic"),
    ] {
        create(
            &pool,
            &auth,
            "/api/tiles",
            serde_json::json!({
                "title": title, "category": category, "price": price, "material": material,
            }),
        )
        .await;
    }

    let json = body_json(get(build_test_app(pool.clone()), "/api/tiles?ordering=price").await).await;
    let titles: Vec<_> = json.as_array().unwrap().iter().map(|t| t["title"].clone()).collect();
    assert_eq!(titles, ["Alpha", "Charlie", "Bravo"]);

    let json = body_json(get(build_test_app(pool.clone()), "/api/tiles?material=CERAMIC").await).await;
    assert_eq!(json.as_array().unwrap().len(), 2);

    let json = body_json(
        get(build_test_app(pool.clone()), "/api/tiles?min_price=15&max_price=25").await,
    )
    .await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["title"], "Charlie");

    let json = body_json(get(build_test_app(pool.clone()), "/api/tiles?search=brav").await).await;
    assert_eq!(json[0]["title"], "Bravo");

    let json = body_json(
        get(build_test_app(pool.clone()), "/api/tiles?ordering=title&limit=1&offset=1").await,
    )
    .await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["title"], "Bravo");

    let response = get(build_test_app(pool.clone()), "/api/tiles?ordering=popularity").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // A page far past the end is empty, not an error.
    let response = get(
        build_test_app(pool),
        "/api/tiles?page=9223372036854775807&page_size=100",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tile_gallery_primary_image(pool: PgPool) {
    let auth = staff_bearer(&pool).await;
    let category = seed_category(&pool, &auth).await;
    let tile = create(
        &pool,
        &auth,
        "/api/tiles",
        serde_json::json!({"title": "Onyx", "category": category}),
    )
    .await;
    let tile_id = tile["id"].as_i64().unwrap();
    assert!(tile["primary_image"].is_null());

    let images_uri = format!("/api/tiles/{tile_id}/images");
    let first = create(&pool, &auth, &images_uri, serde_json::json!({"image": "tiles/a.jpg", "is_primary": true})).await;
    assert_eq!(first["image_url"], "http://testserver/media/tiles/a.jpg");
    assert_eq!(first["thumbnail_url"], "http://testserver/media/tiles/a.jpg");
    create(&pool, &auth, &images_uri, serde_json::json!({"image": "tiles/b.jpg", "is_primary": true})).await;

    let json = body_json(get(build_test_app(pool.clone()), &format!("/api/tiles/{tile_id}")).await).await;
    assert_eq!(json["primary_image"], "http://testserver/media/tiles/b.jpg");
    let images = json["images"].as_array().unwrap();
    assert_eq!(images.len(), 2);
    assert_eq!(images.iter().filter(|i| i["is_primary"] == true).count(), 1);

    let first_id = first["id"].as_i64().unwrap();
    let response = delete_auth(
        build_test_app(pool.clone()),
        &format!("/api/tile-images/{first_id}"),
        &auth,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(get(build_test_app(pool), &images_uri).await).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Projects and testimonials
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_status_and_tiles_used(pool: PgPool) {
    let auth = staff_bearer(&pool).await;
    let category = seed_category(&pool, &auth).await;
    let tile = create(&pool, &auth, "/api/tiles", serde_json::json!({"title": "Slate", "category": category})).await;
    let tile_id = tile["id"].as_i64().unwrap();

    let project = create(&pool, &auth, "/api/projects", serde_json::json!({"title": "Kitchen Remodel"})).await;
    assert_eq!(project["status"], "completed");
    assert_eq!(project["status_display"], "Completed");
    let project_id = project["id"].as_i64().unwrap();

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/projects",
        &auth,
        serde_json::json!({"title": "Bad", "status": "abandoned"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let tiles_uri = format!("/api/projects/{project_id}/tiles");
    let response = put_json_auth(
        build_test_app(pool.clone()),
        &tiles_uri,
        &auth,
        serde_json::json!({"tile_ids": [tile_id, 999_999]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        build_test_app(pool.clone()),
        &tiles_uri,
        &auth,
        serde_json::json!({"tile_ids": [tile_id]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get(build_test_app(pool), &format!("/api/projects/{project_id}")).await).await;
    assert_eq!(json["tiles_used"][0]["id"], tile_id);
    assert_eq!(json["images"], serde_json::json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_public_testimonial_is_hidden_until_approved(pool: PgPool) {
    let auth = staff_bearer(&pool).await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/testimonials",
        serde_json::json!({
            "customer_name": "Dana",
            "testimonial": "Great work",
            "rating": 5,
            "approved": true,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["approved"], false);
    let id = created["id"].as_i64().unwrap();

    let response = get(build_test_app(pool.clone()), &format!("/api/testimonials/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(get(build_test_app(pool.clone()), "/api/testimonials").await).await;
    assert_eq!(json, serde_json::json!([]));

    let json = body_json(get_auth(build_test_app(pool.clone()), "/api/testimonials", &auth).await).await;
    assert_eq!(json.as_array().unwrap().len(), 1);

    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/testimonials/{id}"),
        &auth,
        serde_json::json!({"approved": true}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(build_test_app(pool), &format!("/api/testimonials/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_testimonial_rating_out_of_range(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/testimonials",
        serde_json::json!({"customer_name": "Eve", "testimonial": "Meh", "rating": 6}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_team_inactive_members_are_staff_only(pool: PgPool) {
    let auth = staff_bearer(&pool).await;
    create(&pool, &auth, "/api/team", serde_json::json!({"name": "Ana", "position": "Owner"})).await;
    create(
        &pool,
        &auth,
        "/api/team",
        serde_json::json!({"name": "Ben", "position": "Installer", "active": false}),
    )
    .await;

    let json = body_json(get(build_test_app(pool.clone()), "/api/team?include_inactive=true").await).await;
    assert_eq!(json.as_array().unwrap().len(), 1);

    let json = body_json(
        get_auth(build_test_app(pool), "/api/team?include_inactive=true", &auth).await,
    )
    .await;
    assert_eq!(json.as_array().unwrap().len(), 2);
}
