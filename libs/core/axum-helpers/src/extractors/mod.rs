//! Request extractors with consistent error bodies.

pub mod current_user;
pub mod uuid_path;
pub mod validated_json;

pub use current_user::{AdminUser, CurrentUser};
pub use uuid_path::{UuidPath, UuidPathPair};
pub use validated_json::ValidatedJson;
