//! Core data models for the activity feed

use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::error::{CoreError, CoreResult};

/// One line item in the activity feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Unique, immutable identifier
    pub id: u64,
    /// Counterparty display name, trimmed and non-empty
    pub name: String,
    /// Free-text memo
    #[serde(default, alias = "desc")]
    pub description: String,
    /// Display time of day, e.g. `9:18PM`
    #[serde(default)]
    pub time: String,
    pub amount: Amount,
    /// Derived from `name`; recomputed on load when missing
    #[serde(default, alias = "avatar")]
    pub avatar_initials: String,
    /// Custom avatar image (URL or data URI)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Fields this version does not know about, written back untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TransactionRecord {
    /// Avatar reference for this record
    pub fn avatar_url(&self, config: &payfeed_config::AvatarConfig) -> String {
        crate::avatar::resolve_avatar(&self.avatar_initials, self.image_url.as_deref(), config)
    }
}

/// Form input for creating a transaction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionInput {
    pub name: String,
    /// Raw amount text as typed, e.g. `500` or `$1,000`
    pub amount: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl TransactionInput {
    pub fn new(name: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
            ..Default::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

/// Partial update; `None` keeps the current value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionPatch {
    pub name: Option<String>,
    pub amount: Option<String>,
    pub description: Option<String>,
    pub time: Option<String>,
    /// `Some(None)` clears the custom image
    pub image_url: Option<Option<String>>,
}

impl TransactionPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(Some(image_url.into()));
        self
    }

    pub fn clear_image(mut self) -> Self {
        self.image_url = Some(None);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.amount.is_none()
            && self.description.is_none()
            && self.time.is_none()
            && self.image_url.is_none()
    }
}

/// A distinct counterparty, taken from its most recent transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactView {
    pub name: String,
    pub avatar_initials: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub most_recent_transaction_id: u64,
}

impl ContactView {
    pub fn avatar_url(&self, config: &payfeed_config::AvatarConfig) -> String {
        crate::avatar::resolve_avatar(&self.avatar_initials, self.image_url.as_deref(), config)
    }
}

// ==================== Validation ====================

/// Trimmed, non-empty counterparty name
pub(crate) fn validate_name(name: &str) -> CoreResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation("name", "Please fill in name and amount"));
    }
    Ok(trimmed.to_string())
}

/// Blank image references count as "no custom image"
pub(crate) fn normalize_image_url(image_url: Option<String>) -> Option<String> {
    image_url
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
}

/// Check the invariants a loaded collection must satisfy
pub(crate) fn check_collection(records: &[TransactionRecord]) -> CoreResult<()> {
    let mut seen = std::collections::HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id) {
            return Err(CoreError::PersistenceRead {
                message: format!("duplicate transaction id {}", record.id),
            });
        }
        if record.id == u64::MAX {
            return Err(CoreError::PersistenceRead {
                message: format!("transaction id {} leaves no room for new ids", record.id),
            });
        }
        if record.name.trim().is_empty() {
            return Err(CoreError::PersistenceRead {
                message: format!("transaction {} has an empty name", record.id),
            });
        }
    }
    Ok(())
}
