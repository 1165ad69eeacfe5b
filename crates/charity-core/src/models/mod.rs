//! Data models for charity platform entities.
//!
//! - `Role`, `RoleInput`: admin role management
//! - `Campaign`: fundraising campaign detail and progress
//! - `User`: admin user listing

pub mod campaign;
pub mod role;
pub mod user;

pub use campaign::Campaign;
pub use role::{Role, RoleInput};
pub use user::User;
