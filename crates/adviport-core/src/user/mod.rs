//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: User profile domain model and main page styles
//! - `repository`: Profile persistence trait
//!
//! # Usage
//!
//! ```ignore
//! use adviport_core::user::{ProfileRepository, UserProfile};
//! ```

mod model;
mod repository;

// Re-export public API
pub use model::{HISTORY_LIMIT, MainPageStyle, UserProfile, favourite_key};
pub use repository::ProfileRepository;
