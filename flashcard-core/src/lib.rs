pub mod catalog;
pub mod deck;
pub mod errors;
pub mod events;
pub mod roster;
pub mod session;
pub mod shuffle;
pub mod store;

// Re-export main components
pub use catalog::*;
pub use deck::*;
pub use errors::*;
pub use events::*;
pub use roster::*;
pub use session::*;
pub use shuffle::*;
pub use store::*;

/// Storage key holding the remaining word ids, head first.
pub const DECK_KEY: &str = "remainingWordIds_v1";

/// Storage key holding the player list.
pub const ROSTER_KEY: &str = "players_list_v1";
