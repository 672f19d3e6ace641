//! Mailbox autoresponder: zero or one per mailbox, replaced as a unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult, require_non_blank};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Autoresponder {
    pub subject: String,
    pub body: String,
    pub active: bool,
    #[serde(default, with = "crate::timestamp")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::timestamp")]
    pub end_date: Option<DateTime<Utc>>,
}

/// Full replacement payload for `PUT /mailbox/autoresponder`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutoresponderDraft {
    pub subject: String,
    pub body: String,
    pub active: bool,
    #[serde(with = "crate::timestamp")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(with = "crate::timestamp")]
    pub end_date: Option<DateTime<Utc>>,
}

impl AutoresponderDraft {
    pub fn validate(&self) -> DomainResult<()> {
        require_non_blank("subject", &self.subject)?;
        require_non_blank("body", &self.body)?;
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(DomainError::validation("end date precedes start date"));
            }
        }
        Ok(())
    }
}

impl From<&Autoresponder> for AutoresponderDraft {
    fn from(value: &Autoresponder) -> Self {
        Self {
            subject: value.subject.clone(),
            body: value.body.clone(),
            active: value.active,
            start_date: value.start_date,
            end_date: value.end_date,
        }
    }
}
