pub mod phase;
pub mod session;
pub mod words;

// Re-export main components
pub use phase::*;
pub use session::*;
pub use words::*;
