use crate::workflow::Endpoint;

/// Cheap connectivity probe. Works for authenticated and anonymous clients
/// and does not consume the rate budget.
pub struct RateLimit;

impl Endpoint for RateLimit {
    fn method(&self) -> &str {
        "GET"
    }

    fn endpoint(&self) -> String {
        "rate_limit".to_string()
    }
}
