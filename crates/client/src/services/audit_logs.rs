use mailpanel_core::{AuditLogPage, DomainId};

use crate::error::ApiError;
use crate::transport::ApiClient;

pub struct AuditLogsApi<'a> {
    api: &'a ApiClient,
}

impl<'a> AuditLogsApi<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// One page (1-based) of the log, optionally restricted to a domain.
    pub async fn page(
        &self,
        page: u32,
        domain: Option<DomainId>,
    ) -> Result<AuditLogPage, ApiError> {
        let mut query = Vec::with_capacity(2);
        if page > 0 {
            query.push(("page", page.to_string()));
        }
        if let Some(domain) = domain {
            query.push(("domain_id", domain.to_string()));
        }
        self.api.get_with_query("/audit-logs", &query).await
    }
}
