use super::auth_service::AuthService;
use super::types::{CollectionOutcome, SchemaFailure};
use crate::AppError;
use crate::api::client::CloudApiClient;
use crate::api::models::{ConnectorRecord, ConnectorSummary, ConnectorType};
use crate::core::session::Session;
use crate::error::ApiError;

/// Connector type categories enumerated on every run, in this order.
pub const CONNECTOR_TYPES: [ConnectorType; 2] = [ConnectorType::Windows, ConnectorType::Unified];

/// Discovers connectors per type category and fetches their detail records.
pub struct ConnectorService {
    client: CloudApiClient,
    auth: AuthService,
}

impl ConnectorService {
    pub fn new(client: CloudApiClient, auth: AuthService) -> Self {
        Self { client, auth }
    }

    /// Collect detail records for every connector the agent hub lists.
    ///
    /// Strictly sequential: all list- and detail-calls for one category
    /// complete before the next category begins, and detail-calls run one
    /// at a time in listing order. A category whose list-call exhausts its
    /// retries contributes zero records; the run continues. The session is
    /// checked against its expiry before every call.
    pub async fn collect(&self, session: &mut Session) -> Result<CollectionOutcome, AppError> {
        let mut outcome = CollectionOutcome::default();

        for connector_type in CONNECTOR_TYPES {
            self.auth.ensure_session(session).await?;

            let list_url = self.client.edge_servers_url(connector_type);
            let summaries: Option<Vec<ConnectorSummary>> =
                self.client.get_with_retry(&list_url, session).await?;

            let Some(summaries) = summaries else {
                tracing::warn!(
                    %connector_type,
                    "connector listing returned no data, category contributes zero records"
                );
                continue;
            };

            tracing::debug!(
                %connector_type,
                count = summaries.len(),
                "discovered connectors"
            );

            for summary in summaries {
                self.auth.ensure_session(session).await?;

                let detail_url = self.client.edge_server_url(&summary.id);
                match self
                    .client
                    .get_with_retry::<ConnectorRecord>(&detail_url, session)
                    .await
                {
                    Ok(Some(record)) => outcome.records.push(record),
                    Ok(None) => {
                        tracing::warn!(id = %summary.id, "no detail data after retries, skipping");
                    }
                    Err(ApiError::Schema { message, .. }) => {
                        tracing::error!(
                            id = %summary.id,
                            %message,
                            "connector detail did not match the expected record shape"
                        );
                        outcome.schema_failures.push(SchemaFailure {
                            connector_id: summary.id,
                            message,
                        });
                    }
                    Err(error) => return Err(error.into()),
                }
            }
        }

        Ok(outcome)
    }
}
