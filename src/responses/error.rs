use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `{"error": "..."}` body shared by every non-login failure
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema, PartialEq, Eq)]
pub struct ErrorEnvelope {
    #[schema(example = "Malformed request")]
    pub error: String,
}
