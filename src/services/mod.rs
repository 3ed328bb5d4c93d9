pub mod backend;
pub mod dispatcher;
pub mod fallback;
pub mod transcript;
