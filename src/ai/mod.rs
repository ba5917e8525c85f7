pub mod client;
pub mod fallback;
pub mod prompt;
pub mod resolver;
pub mod rotation;

pub use resolver::{LunaResolver, Resolution, ResolutionSource};
