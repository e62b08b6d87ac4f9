pub mod auth;
pub mod category;
pub mod contact;
pub mod home;
pub mod newsletter;
pub mod product_type;
pub mod project;
pub mod proxy;
pub mod team;
pub mod testimonial;
pub mod tile;
pub mod upload;
