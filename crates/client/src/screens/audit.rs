use mailpanel_core::{AuditLogPage, DomainId};

use crate::error::ApiError;
use crate::loader::{LoadState, Loader, Mount};
use crate::messages;
use crate::scoped::ScopedLoaders;
use crate::transport::ApiClient;

/// Paginated audit feed, global or for one domain. Entries keep server order.
pub struct AuditFeed {
    api: ApiClient,
    domain: Option<DomainId>,
    page: Loader<Option<AuditLogPage>>,
}

impl AuditFeed {
    pub fn global(api: ApiClient) -> Self {
        Self::with_mount(api, None, Mount::new())
    }

    pub fn for_domain(api: ApiClient, domain: DomainId) -> Self {
        Self::with_mount(api, Some(domain), Mount::new())
    }

    pub(crate) fn with_mount(api: ApiClient, domain: Option<DomainId>, mount: Mount) -> Self {
        Self {
            api,
            domain,
            page: Loader::new(mount),
        }
    }

    pub fn state(&self) -> LoadState<Option<AuditLogPage>> {
        self.page.snapshot()
    }

    pub fn unmount(&self) {
        self.page.mount().unmount();
    }

    /// Page currently shown (1 before anything loaded).
    pub fn current_page(&self) -> u32 {
        self.page
            .data()
            .map(|p| p.pagination.page.max(1))
            .unwrap_or(1)
    }

    pub async fn load(&self, page: u32) -> Result<(), ApiError> {
        let scoped = ScopedLoaders::new(&self.api);
        let domain = self.domain;
        self.page
            .load(messages::LOAD_LOGS, async move {
                scoped.audit_logs(page.max(1), domain).await.map(Some)
            })
            .await
    }

    /// Advance one page; `Ok(false)` when already on the last one.
    pub async fn next(&self) -> Result<bool, ApiError> {
        match self.page.data() {
            Some(p) if p.pagination.has_next() => {
                self.load(p.pagination.page + 1).await?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub async fn previous(&self) -> Result<bool, ApiError> {
        match self.page.data() {
            Some(p) if p.pagination.has_previous() => {
                self.load(p.pagination.page - 1).await?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
