//! Custom request extractors.

mod validated_json;
mod validated_query;

pub use validated_json::{ValidatedJson, INVALID_BODY_MESSAGE};
pub use validated_query::ValidatedQuery;
