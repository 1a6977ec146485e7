use serde::{Deserialize, Serialize};
use vapp::types::Value;

/// Published on every speed change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedEvent {
    pub speed: Value,
}

/// Published when a crash is simulated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrashEvent {
    /* consumers expect the key with the trailing space */
    #[serde(rename = "crashed ")]
    pub crashed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseResult {
    pub status: i32,
    pub message: String,
}

/// Response to a request on the get speed topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedResponse {
    pub result: ResponseResult,
}

pub const STATUS_OK: i32 = 0;
pub const STATUS_ERROR: i32 = 1;

impl SpeedResponse {
    pub fn ok(speed: &Value) -> Self {
        Self {
            result: ResponseResult {
                status: STATUS_OK,
                message: format!("Current Speed = {speed}"),
            },
        }
    }

    pub fn error<E: std::fmt::Display>(error: &E) -> Self {
        Self {
            result: ResponseResult {
                status: STATUS_ERROR,
                message: format!("Failed to get current speed: {error}"),
            },
        }
    }
}
