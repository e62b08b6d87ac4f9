use sqlx::PgPool;

/// Connect, migrate, and verify the schema is in place.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    tola_db::health_check(&pool).await.unwrap();

    let tables = [
        "users",
        "refresh_sessions",
        "api_tokens",
        "product_types",
        "categories",
        "tiles",
        "tile_images",
        "projects",
        "project_images",
        "project_tiles",
        "customer_testimonials",
        "team_members",
        "contacts",
        "subscribers",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// `updated_at` is bumped by the trigger on update.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_updated_at_trigger(pool: PgPool) {
    let (id, before): (i64, chrono::DateTime<chrono::Utc>) = sqlx::query_as(
        "INSERT INTO product_types (name, slug, created_at, updated_at)
         VALUES ('Floor', 'floor', NOW() - INTERVAL '1 day', NOW() - INTERVAL '1 day')
         RETURNING id, updated_at",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    let after: chrono::DateTime<chrono::Utc> =
        sqlx::query_scalar("UPDATE product_types SET name = 'Floors' WHERE id = $1 RETURNING updated_at")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();

    assert!(after > before);
}
