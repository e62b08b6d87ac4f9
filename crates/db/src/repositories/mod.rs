//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod api_token_repo;
pub mod category_repo;
pub mod contact_repo;
pub mod product_type_repo;
pub mod project_image_repo;
pub mod project_repo;
pub mod session_repo;
pub mod stats_repo;
pub mod subscriber_repo;
pub mod team_member_repo;
pub mod testimonial_repo;
pub mod tile_image_repo;
pub mod tile_repo;
pub mod user_repo;

pub use api_token_repo::ApiTokenRepo;
pub use category_repo::CategoryRepo;
pub use contact_repo::ContactRepo;
pub use product_type_repo::ProductTypeRepo;
pub use project_image_repo::ProjectImageRepo;
pub use project_repo::ProjectRepo;
pub use session_repo::SessionRepo;
pub use stats_repo::StatsRepo;
pub use subscriber_repo::SubscriberRepo;
pub use team_member_repo::TeamMemberRepo;
pub use testimonial_repo::TestimonialRepo;
pub use tile_image_repo::TileImageRepo;
pub use tile_repo::TileRepo;
pub use user_repo::UserRepo;
