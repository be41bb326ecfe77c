//! Transaction store and derived view engine for the payfeed activity feed
//!
//! - `store`: the owned, recency-ordered transaction collection
//! - `persistence`: snapshot slot and seed fallback
//! - `contacts` / `search`: pure views recomputed from the collection
//! - `amount` / `avatar`: display rules that never touch stored values

pub mod amount;
pub mod avatar;
pub mod contacts;
pub mod error;
pub mod models;
pub mod pending;
pub mod persistence;
pub mod search;
pub mod seed;
pub mod store;

pub use amount::{Amount, AmountFormat};
pub use avatar::{generated_avatar_url, resolve_avatar};
pub use contacts::derive_contacts;
pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails, ErrorSeverity};
pub use models::{ContactView, TransactionInput, TransactionPatch, TransactionRecord};
pub use pending::PendingSignal;
pub use persistence::{FileSlot, MemorySlot, PersistenceAdapter, Slot, SlotRef};
pub use search::{filter_transactions, filter_transactions_with};
pub use seed::default_seed;
pub use store::TransactionStore;
