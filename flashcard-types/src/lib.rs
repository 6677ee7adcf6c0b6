pub mod deck;
pub mod errors;
pub mod player;
pub mod word;

// Re-export all types
pub use deck::*;
pub use errors::*;
pub use player::*;
pub use word::*;
