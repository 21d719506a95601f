// Data Models
pub mod feed_state;
pub mod listing;
pub mod selection;

pub use feed_state::{FeedAction, FeedDetails, FeedState, PluginInstance, PluginInstancesPayload};
pub use listing::{list_items, FileDescriptor, ListItem, Listing};
pub use selection::SelectionStore;
