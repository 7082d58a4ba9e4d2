//! URL handling module
//!
//! This module provides base-URL normalization, domain membership checks and
//! the public-host guard applied before any user-supplied URL is fetched.

mod domain;
mod guard;
mod matcher;
mod normalize;

// Re-export main functions
pub use domain::{extract_domain, url_belongs_to_domain};
pub use guard::{ensure_public_url, is_blocked_ip, BLOCKED_HOSTNAMES};
pub use matcher::matches_domain;
pub use normalize::{normalize_base_url, resource_url};
