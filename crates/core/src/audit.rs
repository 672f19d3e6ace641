//! Audit log entries. Produced by the API on every mutation; read-only here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entity::Entity;
use crate::id::{AuditLogId, DomainId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorType {
    User,
    Mailbox,
    /// Any actor kind this client does not know yet.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditStatus {
    Success,
    Failed,
    #[serde(other)]
    Unknown,
}

/// Dotted event name such as `mailbox.password_changed`.
///
/// Kept open: the API adds event types without notice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventType(String);

/// Coarse classification used to highlight entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSeverity {
    Created,
    Updated,
    Deleted,
    Session,
    Other,
}

impl EventType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `user.password_changed` → `user - password changed`.
    pub fn display(&self) -> String {
        self.0.replace('_', " ").replacen('.', " - ", 1)
    }

    pub fn severity(&self) -> EventSeverity {
        let name = self.0.as_str();
        if name.contains("created") || (name.contains("assigned") && !name.contains("unassigned")) {
            EventSeverity::Created
        } else if name.contains("deleted") || name.contains("unassigned") {
            EventSeverity::Deleted
        } else if name.contains("updated") || name.contains("changed") {
            EventSeverity::Updated
        } else if name.contains("login") || name.contains("logout") {
            EventSeverity::Session
        } else {
            EventSeverity::Other
        }
    }
}

impl core::fmt::Display for EventType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: AuditLogId,
    pub actor_type: ActorType,
    pub actor_id: i64,
    pub event_type: EventType,
    pub entity_type: String,
    #[serde(default)]
    pub entity_id: Option<i64>,
    #[serde(default)]
    pub old_value: Value,
    #[serde(default)]
    pub new_value: Value,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    pub status: AuditStatus,
    #[serde(default, with = "crate::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for AuditLogEntry {
    type Id = AuditLogId;

    fn id(&self) -> AuditLogId {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl Pagination {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// One page of `GET /audit-logs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogPage {
    #[serde(default)]
    pub logs: Vec<AuditLogEntry>,
    #[serde(default)]
    pub domain_id: Option<DomainId>,
    #[serde(default)]
    pub domain_name: Option<String>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn event_display_and_severity() {
        let e = EventType::new("mailbox.password_changed_by_admin");
        assert_eq!(e.display(), "mailbox - password changed by admin");
        assert_eq!(e.severity(), EventSeverity::Updated);

        assert_eq!(EventType::new("alias.deleted").severity(), EventSeverity::Deleted);
        assert_eq!(EventType::new("user_domain.assigned").severity(), EventSeverity::Created);
        assert_eq!(EventType::new("user_domain.unassigned").severity(), EventSeverity::Deleted);
        assert_eq!(EventType::new("auth.login").severity(), EventSeverity::Session);
        assert_eq!(EventType::new("system.tick").severity(), EventSeverity::Other);
    }

    #[test]
    fn decodes_page() {
        let page: AuditLogPage = serde_json::from_value(json!({
            "logs": [{
                "id": 1,
                "actor_type": "user",
                "actor_id": 2,
                "event_type": "domain.created",
                "entity_type": "domain",
                "entity_id": 7,
                "old_value": null,
                "new_value": { "name": "a.org" },
                "ip_address": "10.0.0.1",
                "user_agent": "cli",
                "status": "success",
                "created_at": "2025-01-01T00:00:00Z"
            }],
            "pagination": { "page": 1, "page_size": 50, "total_items": 1, "total_pages": 1 }
        }))
        .unwrap();

        assert_eq!(page.logs.len(), 1);
        assert_eq!(page.logs[0].new_value["name"], "a.org");
        assert!(!page.pagination.has_next());
        assert!(!page.pagination.has_previous());
    }

    #[test]
    fn unfamiliar_actor_and_status_do_not_break_the_page() {
        let page: AuditLogPage = serde_json::from_value(json!({
            "logs": [{
                "id": 3,
                "actor_type": "system",
                "actor_id": 0,
                "event_type": "domain.updated",
                "entity_type": "domain",
                "status": "pending",
                "created_at": "2025-01-01 00:00:00"
            }],
            "pagination": { "page": 1, "page_size": 50, "total_items": 1, "total_pages": 1 }
        }))
        .unwrap();

        assert_eq!(page.logs[0].actor_type, ActorType::Unknown);
        assert_eq!(page.logs[0].status, AuditStatus::Unknown);
        assert_eq!(page.logs[0].event_type.severity(), EventSeverity::Updated);
    }
}
