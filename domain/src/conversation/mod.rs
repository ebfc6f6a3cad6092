//! Conversation subdomain - turns and the rolling memory across queries.

pub mod memory;
pub mod turn;

pub use memory::{ConversationMemory, ConversationSnapshot, DEFAULT_RECENT_TURNS};
pub use turn::ConversationTurn;
