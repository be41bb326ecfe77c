//! The transaction store
//!
//! Owns the canonical, recency-ordered collection. Every successful
//! mutation is written through to the persistence slot before the call
//! returns. If that write fails the in-memory change is kept, the store is
//! marked dirty and a warning is queued for the caller; the next successful
//! save (any later mutation, or [`TransactionStore::flush`]) catches the
//! snapshot up.

use crate::amount::{Amount, AmountFormat};
use crate::contacts::derive_contacts;
use crate::error::{CoreError, CoreResult};
use crate::models::{
    normalize_image_url, validate_name, ContactView, TransactionInput, TransactionPatch,
    TransactionRecord,
};
use crate::persistence::PersistenceAdapter;
use crate::search::filter_transactions_with;

pub struct TransactionStore {
    transactions: Vec<TransactionRecord>,
    persistence: PersistenceAdapter,
    format: AmountFormat,
    /// Highest id ever held this session, deleted ones included
    high_water: u64,
    version: u64,
    dirty: bool,
    persistence_warning: Option<CoreError>,
}

impl TransactionStore {
    /// Hydrate a store from its persistence slot
    pub fn open(persistence: PersistenceAdapter) -> Self {
        let transactions = persistence.load();
        let high_water = transactions.iter().map(|tx| tx.id).max().unwrap_or(0);

        Self {
            transactions,
            persistence,
            format: AmountFormat::default(),
            high_water,
            version: 0,
            dirty: false,
            persistence_warning: None,
        }
    }

    /// Use a display format for parsing input and matching searches
    pub fn with_format(mut self, format: AmountFormat) -> Self {
        self.format = format;
        self
    }

    // ==================== Reads ====================

    /// The full collection, most recent first
    pub fn list(&self) -> &[TransactionRecord] {
        &self.transactions
    }

    pub fn get(&self, id: u64) -> Option<&TransactionRecord> {
        self.transactions.iter().find(|tx| tx.id == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Incremented on every successful mutation
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn format(&self) -> &AmountFormat {
        &self.format
    }

    /// Recent-contacts strip for the current collection
    pub fn contacts(&self) -> Vec<ContactView> {
        derive_contacts(&self.transactions)
    }

    /// Visible feed for a search query
    pub fn search(&self, query: &str) -> Vec<TransactionRecord> {
        filter_transactions_with(&self.transactions, query, &self.format)
    }

    // ==================== Mutations ====================

    /// Validate and prepend a new transaction
    pub fn create(&mut self, input: TransactionInput) -> CoreResult<TransactionRecord> {
        let name = validate_name(&input.name)?;
        let amount = self.parse_amount(&input.amount)?;

        let record = TransactionRecord {
            id: self.next_id()?,
            avatar_initials: payfeed_utils::initials(&name),
            name,
            description: input.description.unwrap_or_default(),
            time: time_or_now(input.time),
            amount,
            image_url: normalize_image_url(input.image_url),
            extra: serde_json::Map::new(),
        };

        self.transactions.insert(0, record.clone());
        log::info!(
            target: "payfeed::store",
            "Created transaction {} ({} {})",
            record.id,
            record.name,
            self.format.format(&record.amount)
        );
        self.commit("create transaction");

        Ok(record)
    }

    /// Apply a partial update in place; position and id are kept
    pub fn update(&mut self, id: u64, patch: TransactionPatch) -> CoreResult<TransactionRecord> {
        let index = self.position(id)?;
        let current = &self.transactions[index];

        let name = match patch.name {
            Some(ref name) => validate_name(name)?,
            None => current.name.clone(),
        };
        let amount = match patch.amount {
            Some(ref amount) => self.parse_amount(amount)?,
            None => current.amount,
        };

        let mut updated = current.clone();
        updated.avatar_initials = payfeed_utils::initials(&name);
        updated.name = name;
        updated.amount = amount;
        if let Some(description) = patch.description {
            updated.description = description;
        }
        if let Some(time) = patch.time {
            updated.time = time_or_now(Some(time));
        }
        if let Some(image_url) = patch.image_url {
            updated.image_url = normalize_image_url(image_url);
        }

        self.transactions[index] = updated.clone();
        log::info!(target: "payfeed::store", "Updated transaction {}", id);
        self.commit("update transaction");

        Ok(updated)
    }

    /// Remove a transaction permanently
    pub fn delete(&mut self, id: u64) -> CoreResult<()> {
        let index = self.position(id)?;
        let removed = self.transactions.remove(index);
        log::info!(
            target: "payfeed::store",
            "Deleted transaction {} ({})",
            removed.id,
            removed.name
        );
        self.commit("delete transaction");
        Ok(())
    }

    // ==================== Persistence state ====================

    /// Whether the snapshot is behind the in-memory collection
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The warning left by the most recent failed snapshot write, if any
    pub fn take_persistence_warning(&mut self) -> Option<CoreError> {
        self.persistence_warning.take()
    }

    /// Retry writing the snapshot when it is behind
    pub fn flush(&mut self) -> CoreResult<()> {
        if !self.dirty {
            return Ok(());
        }
        self.persistence.save(&self.transactions)?;
        self.dirty = false;
        self.persistence_warning = None;
        Ok(())
    }

    // ==================== Helpers ====================

    fn position(&self, id: u64) -> CoreResult<usize> {
        self.transactions
            .iter()
            .position(|tx| tx.id == id)
            .ok_or(CoreError::NotFound { id })
    }

    fn parse_amount(&self, input: &str) -> CoreResult<Amount> {
        self.format.parse(input)
    }

    /// Time-based id, forced above every id seen so far
    fn next_id(&mut self) -> CoreResult<u64> {
        let floor = self.high_water.checked_add(1).ok_or_else(|| {
            CoreError::validation("id", "No transaction ids are left to assign")
        })?;
        let id = payfeed_utils::timestamp_millis().max(floor);
        self.high_water = id;
        Ok(id)
    }

    fn commit(&mut self, operation: &str) {
        self.version += 1;
        match self.persistence.save(&self.transactions) {
            Ok(()) => {
                self.dirty = false;
                self.persistence_warning = None;
            }
            Err(e) => {
                e.log(operation);
                self.dirty = true;
                self.persistence_warning = Some(e);
            }
        }
    }
}

fn time_or_now(time: Option<String>) -> String {
    match time.map(|t| t.trim().to_string()) {
        Some(t) if !t.is_empty() => t,
        _ => payfeed_utils::current_time_label(),
    }
}
