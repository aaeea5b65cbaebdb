//! Envelope type and extractors shared by all HTTP modules

pub mod envelope;
pub mod envelope_query;
pub mod validated_json;

pub use envelope::{ApiResponse, ResultStatus};
pub use envelope_query::EnvelopeQuery;
pub use validated_json::{ValidatedJson, ValidatedJsonRejection};
