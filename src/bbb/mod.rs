pub mod builder;
pub mod client;
pub mod types;

// Re-export main types for easier importing
pub use builder::{build_client, build_client_with_rest};
pub use client::BbbClient;
pub use types::{CreateMeetingOptions, GetRecordingsOptions, JoinOptions, Meta, RecordIds, Role};
