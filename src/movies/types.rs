use serde::Serialize;

pub const SUCCESS: &str = "success";

/// Response body of every /movies route.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub message: String,
    pub data: Vec<T>,
}

impl<T> Envelope<T> {
    pub fn success(data: Vec<T>) -> Self {
        Self {
            message: SUCCESS.to_string(),
            data,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: Vec::new(),
        }
    }
}
