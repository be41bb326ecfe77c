//! Recent-contacts strip derived from transaction history

use std::collections::HashSet;

use crate::models::{ContactView, TransactionRecord};

/// One contact per distinct name, in first-seen (most recent) order.
///
/// The collection is expected in recency order, so the first record seen
/// for a name is its most recent one and supplies the contact's avatar.
pub fn derive_contacts(transactions: &[TransactionRecord]) -> Vec<ContactView> {
    let mut seen: HashSet<&str> = HashSet::new();
    transactions
        .iter()
        .filter(|tx| seen.insert(tx.name.as_str()))
        .map(|tx| ContactView {
            name: tx.name.clone(),
            avatar_initials: tx.avatar_initials.clone(),
            image_url: tx.image_url.clone(),
            most_recent_transaction_id: tx.id,
        })
        .collect()
}
