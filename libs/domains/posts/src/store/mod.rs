//! Local JSON copy of the posts and the wrapper that falls back to it

mod fallback;
mod file;

pub use fallback::FallbackPostRepository;
pub use file::FilePostRepository;
