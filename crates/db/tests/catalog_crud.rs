//! Integration tests for the catalog repositories.
//!
//! Exercises the repository layer against a real database:
//! - Slug generation and uniqueness
//! - Computed counts and primary-image selection
//! - Tile filters and ordering
//! - Primary-image flag transitions
//! - Project tile links and cascade deletes

use assert_matches::assert_matches;
use sqlx::PgPool;
use tola_db::models::category::{CreateCategory, UpdateCategory};
use tola_db::models::product_type::{CreateProductType, ProductTypeFilter};
use tola_db::models::project::{CreateProject, CreateProjectImage, ProjectFilter};
use tola_db::models::testimonial::{CreateTestimonial, TestimonialFilter};
use tola_db::models::tile::{
    CreateTile, CreateTileImage, TileFilter, TileOrdering, UpdateTile, UpdateTileImage,
};
use tola_db::repositories::{
    CategoryRepo, ProductTypeRepo, ProjectImageRepo, ProjectRepo, TestimonialRepo, TileImageRepo,
    TileRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_product_type(name: &str) -> CreateProductType {
    CreateProductType {
        name: name.to_string(),
        description: None,
        image: None,
        icon_name: None,
        display_order: None,
        active: None,
        show_in_navbar: None,
    }
}

fn new_category(name: &str, product_type: Option<i64>) -> CreateCategory {
    CreateCategory {
        name: name.to_string(),
        description: None,
        image: None,
        product_type,
        order: None,
        active: None,
    }
}

fn new_tile(title: &str, category: i64, price: Option<f64>) -> CreateTile {
    CreateTile {
        title: title.to_string(),
        description: String::new(),
        category,
        product_type: None,
        price,
        size: None,
        material: None,
        in_stock: None,
        featured: None,
    }
}

fn new_project(title: &str) -> CreateProject {
    CreateProject {
        title: title.to_string(),
        description: String::new(),
        client: String::new(),
        location: String::new(),
        completed_date: None,
        status: None,
        featured: None,
        product_type: None,
        area_size: None,
        testimonial: None,
    }
}

fn new_image(path: &str, is_primary: bool) -> CreateTileImage {
    CreateTileImage {
        image: path.to_string(),
        thumbnail: None,
        caption: None,
        is_primary,
    }
}

async fn seed_category(pool: &PgPool) -> i64 {
    CategoryRepo::create(pool, &new_category("Ceramic", None))
        .await
        .unwrap()
        .id
}

// ---------------------------------------------------------------------------
// Slugs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_names_get_suffixed_slugs(pool: PgPool) {
    let a = ProductTypeRepo::create(&pool, &new_product_type("Wall Tiles")).await.unwrap();
    let b = ProductTypeRepo::create(&pool, &new_product_type("Wall Tiles")).await.unwrap();
    let c = ProductTypeRepo::create(&pool, &new_product_type("Wall  tiles!")).await.unwrap();

    assert_eq!(a.slug, "wall-tiles");
    assert_eq!(b.slug, "wall-tiles-2");
    assert_eq!(c.slug, "wall-tiles-3");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rename_regenerates_slug(pool: PgPool) {
    let cat = CategoryRepo::create(&pool, &new_category("Porcelain", None)).await.unwrap();
    let update = UpdateCategory {
        name: Some("Glazed Porcelain".to_string()),
        ..Default::default()
    };
    let updated = CategoryRepo::update(&pool, cat.id, &update).await.unwrap().unwrap();
    assert_eq!(updated.slug, "glazed-porcelain");
    assert_eq!(updated.name, "Glazed Porcelain");

    // Renaming to the same name keeps the slug stable.
    let same = UpdateCategory {
        name: Some("Glazed Porcelain".to_string()),
        ..Default::default()
    };
    let again = CategoryRepo::update(&pool, cat.id, &same).await.unwrap().unwrap();
    assert_eq!(again.slug, "glazed-porcelain");
}

// ---------------------------------------------------------------------------
// Counts and relations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_product_type_counts(pool: PgPool) {
    let pt = ProductTypeRepo::create(&pool, &new_product_type("Floor")).await.unwrap();
    let cat = CategoryRepo::create(&pool, &new_category("Stone", Some(pt.id))).await.unwrap();
    let mut tile = new_tile("Slate", cat.id, None);
    tile.product_type = Some(pt.id);
    TileRepo::create(&pool, &tile).await.unwrap();

    let pt = ProductTypeRepo::find_by_id(&pool, pt.id).await.unwrap().unwrap();
    assert_eq!(pt.categories_count, 1);
    assert_eq!(pt.tiles_count, 1);

    let cat = CategoryRepo::find_by_id(&pool, cat.id).await.unwrap().unwrap();
    assert_eq!(cat.product_type_name.as_deref(), Some("Floor"));
    assert_eq!(cat.tiles_count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_product_type_filter(pool: PgPool) {
    let mut hidden = new_product_type("Hidden");
    hidden.show_in_navbar = Some(false);
    ProductTypeRepo::create(&pool, &hidden).await.unwrap();
    ProductTypeRepo::create(&pool, &new_product_type("Shown")).await.unwrap();

    let filter = ProductTypeFilter {
        active: Some(true),
        show_in_navbar: Some(true),
    };
    let listed = ProductTypeRepo::list(&pool, &filter).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Shown");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_category_cascades_to_tiles(pool: PgPool) {
    let cat = seed_category(&pool).await;
    let tile = TileRepo::create(&pool, &new_tile("Gone", cat, None)).await.unwrap();

    assert!(CategoryRepo::delete(&pool, cat).await.unwrap());
    assert!(TileRepo::find_by_id(&pool, tile.id).await.unwrap().is_none());
    assert!(!CategoryRepo::delete(&pool, cat).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tile_with_unknown_category_is_fk_violation(pool: PgPool) {
    let err = TileRepo::create(&pool, &new_tile("Orphan", 9999, None))
        .await
        .unwrap_err();
    assert_matches!(err, sqlx::Error::Database(ref db) if db.code().as_deref() == Some("23503"));
}

// ---------------------------------------------------------------------------
// Tiles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tile_sku_generated_and_stable(pool: PgPool) {
    let cat = seed_category(&pool).await;
    let tile = TileRepo::create(&pool, &new_tile("Hex", cat, Some(12.5))).await.unwrap();
    assert!(tile.sku.starts_with("TL-"));
    assert_eq!(tile.sku.len(), 11);
    assert_eq!(tile.price, Some(12.5));
    assert!(tile.in_stock);
    assert!(!tile.featured);

    let update = UpdateTile {
        title: Some("Hexagon".to_string()),
        ..Default::default()
    };
    let updated = TileRepo::update(&pool, tile.id, &update).await.unwrap().unwrap();
    assert_eq!(updated.sku, tile.sku);
    assert_eq!(updated.slug, "hexagon");
    assert_eq!(updated.price, Some(12.5));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tile_filters_and_ordering(pool: PgPool) {
    let cat = seed_category(&pool).await;
    let other = CategoryRepo::create(&pool, &new_category("Mosaic", None)).await.unwrap().id;

    let mut marble = new_tile("Carrara Marble", cat, Some(80.0));
    marble.material = Some("Marble".to_string());
    marble.featured = Some(true);
    TileRepo::create(&pool, &marble).await.unwrap();

    let mut cheap = new_tile("Basic White", cat, Some(5.0));
    cheap.in_stock = Some(false);
    TileRepo::create(&pool, &cheap).await.unwrap();

    TileRepo::create(&pool, &new_tile("Glass Mosaic", other, Some(40.0))).await.unwrap();

    let by_price = TileRepo::list(&pool, &TileFilter::default(), TileOrdering::PriceAsc, 50, 0)
        .await
        .unwrap();
    let prices: Vec<_> = by_price.iter().map(|t| t.price.unwrap()).collect();
    assert_eq!(prices, vec![5.0, 40.0, 80.0]);

    let filter = TileFilter {
        category: Some(cat),
        ..Default::default()
    };
    let in_cat = TileRepo::list(&pool, &filter, TileOrdering::TitleAsc, 50, 0).await.unwrap();
    assert_eq!(in_cat.len(), 2);
    assert_eq!(in_cat[0].title, "Basic White");

    let filter = TileFilter {
        material: Some("marble".to_string()),
        ..Default::default()
    };
    let marble_only = TileRepo::list(&pool, &filter, TileOrdering::default(), 50, 0)
        .await
        .unwrap();
    assert_eq!(marble_only.len(), 1);
    assert_eq!(marble_only[0].title, "Carrara Marble");

    let filter = TileFilter {
        search: Some("mosaic".to_string()),
        ..Default::default()
    };
    let searched = TileRepo::list(&pool, &filter, TileOrdering::default(), 50, 0)
        .await
        .unwrap();
    assert_eq!(searched.len(), 1);

    let filter = TileFilter {
        min_price: Some(10.0),
        max_price: Some(50.0),
        ..Default::default()
    };
    let ranged = TileRepo::list(&pool, &filter, TileOrdering::default(), 50, 0)
        .await
        .unwrap();
    assert_eq!(ranged.len(), 1);
    assert_eq!(ranged[0].price, Some(40.0));

    let filter = TileFilter {
        in_stock: Some(false),
        ..Default::default()
    };
    let out_of_stock = TileRepo::list(&pool, &filter, TileOrdering::default(), 50, 0)
        .await
        .unwrap();
    assert_eq!(out_of_stock.len(), 1);

    let featured = TileRepo::list_featured(&pool, 8).await.unwrap();
    assert_eq!(featured.len(), 1);

    let paged = TileRepo::list(&pool, &TileFilter::default(), TileOrdering::TitleAsc, 1, 1)
        .await
        .unwrap();
    assert_eq!(paged.len(), 1);
    assert_eq!(paged[0].title, "Carrara Marble");
}

/// `_` and `%` in a search term match themselves, not any character.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_treats_wildcards_literally(pool: PgPool) {
    let cat = seed_category(&pool).await;
    TileRepo::create(&pool, &new_tile("Terrazzo 60_60", cat, None)).await.unwrap();
    TileRepo::create(&pool, &new_tile("Terrazzo 6060", cat, None)).await.unwrap();

    let search = |term: &str| TileFilter {
        search: Some(term.to_string()),
        ..Default::default()
    };

    let found = TileRepo::list(&pool, &search("60_60"), TileOrdering::default(), 50, 0)
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Terrazzo 60_60");

    let none = TileRepo::list(&pool, &search("100%"), TileOrdering::default(), 50, 0)
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_negative_price_rejected_by_check(pool: PgPool) {
    let cat = seed_category(&pool).await;
    let err = TileRepo::create(&pool, &new_tile("Bad", cat, Some(-1.0)))
        .await
        .unwrap_err();
    assert_matches!(err, sqlx::Error::Database(_));
}

// ---------------------------------------------------------------------------
// Primary images
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_primary_image_falls_back_to_first(pool: PgPool) {
    let cat = seed_category(&pool).await;
    let tile = TileRepo::create(&pool, &new_tile("Plain", cat, None)).await.unwrap();
    assert!(tile.primary_image_path.is_none());
    assert_eq!(tile.images_count, 0);

    TileImageRepo::create(&pool, tile.id, &new_image("tiles/a.jpg", false)).await.unwrap();
    TileImageRepo::create(&pool, tile.id, &new_image("tiles/b.jpg", false)).await.unwrap();

    let tile = TileRepo::find_by_id(&pool, tile.id).await.unwrap().unwrap();
    assert_eq!(tile.primary_image_path.as_deref(), Some("tiles/a.jpg"));
    assert_eq!(tile.images_count, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_new_primary_image_clears_previous(pool: PgPool) {
    let cat = seed_category(&pool).await;
    let tile = TileRepo::create(&pool, &new_tile("Gallery", cat, None)).await.unwrap();

    let first = TileImageRepo::create(&pool, tile.id, &new_image("tiles/1.jpg", true))
        .await
        .unwrap();
    let second = TileImageRepo::create(&pool, tile.id, &new_image("tiles/2.jpg", true))
        .await
        .unwrap();

    let first = TileImageRepo::find_by_id(&pool, first.id).await.unwrap().unwrap();
    assert!(!first.is_primary);
    assert!(second.is_primary);

    // Promote the first one back through an update.
    let promote = UpdateTileImage {
        is_primary: Some(true),
        ..Default::default()
    };
    TileImageRepo::update(&pool, first.id, &promote).await.unwrap().unwrap();

    let images = TileImageRepo::list_by_tile(&pool, tile.id).await.unwrap();
    let primaries: Vec<_> = images.iter().filter(|i| i.is_primary).collect();
    assert_eq!(primaries.len(), 1);
    assert_eq!(primaries[0].id, first.id);

    let tile = TileRepo::find_by_id(&pool, tile.id).await.unwrap().unwrap();
    assert_eq!(tile.primary_image_path.as_deref(), Some("tiles/1.jpg"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_primary_image(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("Villa")).await.unwrap();
    let image = |path: &str, is_primary| CreateProjectImage {
        image: path.to_string(),
        caption: None,
        is_primary,
    };
    ProjectImageRepo::create(&pool, project.id, &image("projects/a.jpg", false))
        .await
        .unwrap();
    ProjectImageRepo::create(&pool, project.id, &image("projects/b.jpg", true))
        .await
        .unwrap();

    let project = ProjectRepo::find_by_id(&pool, project.id).await.unwrap().unwrap();
    assert_eq!(project.primary_image_path.as_deref(), Some("projects/b.jpg"));
    assert_eq!(project.images_count, 2);

    let listed = ProjectImageRepo::list(&pool, Some(project.id)).await.unwrap();
    assert!(listed[0].is_primary);
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_project_defaults_and_ordering(pool: PgPool) {
    let undated = ProjectRepo::create(&pool, &new_project("Undated")).await.unwrap();
    assert_eq!(undated.status, "completed");

    let mut old = new_project("Old");
    old.completed_date = chrono::NaiveDate::from_ymd_opt(2020, 1, 1);
    ProjectRepo::create(&pool, &old).await.unwrap();

    let mut recent = new_project("Recent");
    recent.completed_date = chrono::NaiveDate::from_ymd_opt(2024, 6, 1);
    recent.status = Some("in_progress".to_string());
    ProjectRepo::create(&pool, &recent).await.unwrap();

    let all = ProjectRepo::list(&pool, &ProjectFilter::default(), 50, 0).await.unwrap();
    let titles: Vec<_> = all.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Recent", "Old", "Undated"]);

    let filter = ProjectFilter {
        status: Some("in_progress".to_string()),
        ..Default::default()
    };
    let in_progress = ProjectRepo::list(&pool, &filter, 50, 0).await.unwrap();
    assert_eq!(in_progress.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_replace_project_tiles(pool: PgPool) {
    let cat = seed_category(&pool).await;
    let a = TileRepo::create(&pool, &new_tile("A", cat, None)).await.unwrap();
    let b = TileRepo::create(&pool, &new_tile("B", cat, None)).await.unwrap();
    let project = ProjectRepo::create(&pool, &new_project("Kitchen")).await.unwrap();

    ProjectRepo::replace_tiles(&pool, project.id, &[a.id, b.id]).await.unwrap();
    assert_eq!(TileRepo::list_by_project(&pool, project.id).await.unwrap().len(), 2);

    ProjectRepo::replace_tiles(&pool, project.id, &[b.id]).await.unwrap();
    let used = TileRepo::list_by_project(&pool, project.id).await.unwrap();
    assert_eq!(used.len(), 1);
    assert_eq!(used[0].id, b.id);

    let missing = TileRepo::find_missing_ids(&pool, &[a.id, 424242]).await.unwrap();
    assert_eq!(missing, vec![424242]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_testimonial_approval_filter(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("Spa")).await.unwrap();
    let input = CreateTestimonial {
        customer_name: "Ada".to_string(),
        location: None,
        testimonial: "Lovely".to_string(),
        project: Some(project.id),
        rating: None,
        date: None,
        image: None,
        approved: None,
    };
    let pending = TestimonialRepo::create(&pool, &input, false).await.unwrap();
    TestimonialRepo::create(&pool, &input, true).await.unwrap();

    assert_eq!(pending.rating, 5);
    assert_eq!(pending.project_title.as_deref(), Some("Spa"));

    let filter = TestimonialFilter {
        approved: Some(true),
        ..Default::default()
    };
    assert_eq!(TestimonialRepo::list(&pool, &filter, 50).await.unwrap().len(), 1);

    let project = ProjectRepo::find_by_id(&pool, project.id).await.unwrap().unwrap();
    assert_eq!(project.testimonials_count, 2);
}
