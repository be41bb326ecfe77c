//! Default feed used when no valid snapshot exists

use crate::amount::Amount;
use crate::models::TransactionRecord;

const SEED: [(u64, &str, &str, &str, u64); 5] = [
    (1, "Ariya Shingles", "Fro buying $20 load", "9:18PM", 1000),
    (2, "Guillermo Galvan", "Fro buying $20 load", "9:18PM", 1000),
    (3, "Crystal Ligon", "Fro buying $20 load", "9:18PM", 1000),
    (4, "jsosa", "Fro buying $20 load", "9:18PM", 1000),
    (5, "Crystal Ligon", "H", "5:41PM", 8000),
];

/// The fixed five-record seed collection, in feed order
pub fn default_seed() -> Vec<TransactionRecord> {
    SEED.iter()
        .map(|&(id, name, description, time, units)| TransactionRecord {
            id,
            name: name.to_string(),
            description: description.to_string(),
            time: time.to_string(),
            amount: Amount::units(units),
            avatar_initials: payfeed_utils::initials(name),
            image_url: None,
            extra: serde_json::Map::new(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::check_collection;

    #[test]
    fn test_seed_shape() {
        let seed = default_seed();
        assert_eq!(seed.len(), 5);
        assert!(check_collection(&seed).is_ok());
        assert_eq!(seed[0].avatar_initials, "AS");
        assert_eq!(seed[3].avatar_initials, "J");
        assert_eq!(seed[4].amount.to_string(), "$8,000");
    }
}
