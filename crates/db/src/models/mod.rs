//! Row models and create/update DTOs, one module per table group.

pub mod api_token;
pub mod category;
pub mod contact;
pub mod product_type;
pub mod project;
pub mod session;
pub mod stats;
pub mod subscriber;
pub mod team_member;
pub mod testimonial;
pub mod tile;
pub mod user;
