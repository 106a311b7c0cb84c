use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid task set: {message} {location}")]
    InvalidTaskSet {
        message: String,
        location: ErrorLocation,
    },

    #[error("Channel protocol violation on {channel} channel: {message} {location}")]
    ChannelProtocolViolation {
        channel: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("Shutdown controller already started {location}")]
    AlreadyStarted { location: ErrorLocation },
}

impl CoreError {
    #[track_caller]
    pub fn invalid_task_set<S: Into<String>>(message: S) -> Self {
        Self::InvalidTaskSet {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn channel_protocol_violation<S: Into<String>>(channel: &'static str, message: S) -> Self {
        Self::ChannelProtocolViolation {
            channel,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn already_started() -> Self {
        Self::AlreadyStarted {
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;
