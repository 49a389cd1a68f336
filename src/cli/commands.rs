pub mod interactive;
pub mod ping;
pub mod predict;
pub mod serve;

pub use interactive::interactive;
pub use ping::ping;
pub use predict::predict;
pub use serve::serve;
