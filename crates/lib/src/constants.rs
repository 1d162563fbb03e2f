//! Constants used throughout the Stockroom library.
//!
//! This module provides central definitions for internal strings and other
//! constants used within the library, especially for reserved backend keys.

/// Reserved backend key for the user database.
pub const USERS: &str = "_users";

/// Reserved backend key for the remembered session reference.
pub const SESSION: &str = "_session";

/// Reserved backend key for the product catalog.
pub const CATALOG: &str = "_catalog";

/// Reserved backend key for product reviews.
pub const REVIEWS: &str = "_reviews";

/// Reserved backend key for contact and complaint messages.
pub const COMPLAINTS: &str = "_complaints";

/// Credential assigned by an administrative password reset.
pub const RESET_SECRET: &str = "password123";

/// Base URL for derived avatar images.
pub const AVATAR_URL: &str = "https://ui-avatars.com/api/";
