pub mod bbb;
pub mod core;

pub use crate::bbb::{
    BbbClient, CreateMeetingOptions, GetRecordingsOptions, JoinOptions, Meta, RecordIds, Role,
};
pub use crate::core::{config::BbbConfig, errors::BbbError};
