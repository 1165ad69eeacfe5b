//! Static user-facing messages raised by the domain services.

pub const ROLES_FETCH_FAILED: &str = "Failed to fetch roles";
pub const ROLE_FETCH_FAILED: &str = "Failed to fetch role details";
pub const ROLE_CREATE_FAILED: &str = "Failed to create role";
pub const ROLE_UPDATE_FAILED: &str = "Failed to update role";
pub const ROLE_DELETE_FAILED: &str = "Failed to delete role";

pub const CAMPAIGNS_FETCH_FAILED: &str = "Failed to fetch campaigns";
pub const CAMPAIGN_FETCH_FAILED: &str = "Failed to fetch campaign details";

pub const USERS_FETCH_FAILED: &str = "Failed to fetch users";
pub const USER_FETCH_FAILED: &str = "Failed to fetch user details";
pub const USER_ROLE_UPDATE_FAILED: &str = "Failed to update user role";

pub const SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";
pub const SESSION_EXPIRING_SOON: &str = "Your session will expire soon.";
pub const LOGGED_OUT: &str = "You have been logged out.";
