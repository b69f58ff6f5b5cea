pub mod config;
pub mod draft;
pub mod listing;
pub mod media;

/// Shortest address accepted by the basic-info step, in characters.
pub const MIN_ADDRESS_CHARS: usize = 5;
