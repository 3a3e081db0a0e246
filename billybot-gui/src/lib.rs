pub mod app;
pub mod args;
pub mod dir;
pub mod logger;

pub use billybot::VERSION;
