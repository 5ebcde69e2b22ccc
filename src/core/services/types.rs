use crate::api::models::ConnectorRecord;

/// A detail response that did not match the expected record shape.
///
/// Collected instead of propagated so one malformed connector cannot sink
/// the rest of the run.
#[derive(Debug, Clone)]
pub struct SchemaFailure {
    pub connector_id: String,
    pub message: String,
}

/// Result of one collection run across all connector type categories.
#[derive(Debug, Default)]
pub struct CollectionOutcome {
    /// Records in discovery order, concatenated across categories.
    pub records: Vec<ConnectorRecord>,
    /// Per-record schema violations, surfaced to the operator.
    pub schema_failures: Vec<SchemaFailure>,
}
