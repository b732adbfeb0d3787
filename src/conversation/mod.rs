pub mod aggregator;
pub mod types;
pub mod views;

pub use aggregator::Aggregator;
pub use types::{Analysis, ConversationEntry, EntryId};
pub use views::{RadarPoint, TimelinePoint, TIMELINE_WINDOW};
