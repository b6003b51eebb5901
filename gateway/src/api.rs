use serde::Serialize;

// Success: the model's text under a single key.
#[derive(Debug, Serialize)]
pub struct DescribeResponse {
    pub description: String,
}

// Failure: one message, never alongside a description.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
