use serde::{Deserialize, Serialize};

/// Literal payload returned by delete endpoints
pub const DELETED: &str = "OK";

/// Uniform envelope wrapping every successful response payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebResponse<T> {
    pub data: T,
}

impl<T> WebResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
