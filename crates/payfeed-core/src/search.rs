//! Live substring search over the feed

use crate::amount::AmountFormat;
use crate::models::TransactionRecord;

/// Records whose name, description or displayed amount contains `query`,
/// case-insensitively, in input order. An empty query keeps everything.
pub fn filter_transactions(transactions: &[TransactionRecord], query: &str) -> Vec<TransactionRecord> {
    filter_transactions_with(transactions, query, &AmountFormat::default())
}

/// Same as [`filter_transactions`], matching amounts as `format` displays them
pub fn filter_transactions_with(
    transactions: &[TransactionRecord],
    query: &str,
    format: &AmountFormat,
) -> Vec<TransactionRecord> {
    let query_lower = query.to_lowercase();
    transactions
        .iter()
        .filter(|tx| matches(tx, &query_lower, format))
        .cloned()
        .collect()
}

fn matches(tx: &TransactionRecord, query_lower: &str, format: &AmountFormat) -> bool {
    query_lower.is_empty()
        || tx.name.to_lowercase().contains(query_lower)
        || tx.description.to_lowercase().contains(query_lower)
        || format.format(&tx.amount).to_lowercase().contains(query_lower)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_seed;

    fn ids(txs: &[TransactionRecord]) -> Vec<u64> {
        txs.iter().map(|tx| tx.id).collect()
    }

    #[test]
    fn test_empty_query_is_identity() {
        let txs = default_seed();
        assert_eq!(filter_transactions(&txs, ""), txs);
    }

    #[test]
    fn test_name_match_is_case_insensitive() {
        let txs = default_seed();
        assert_eq!(ids(&filter_transactions(&txs, "CRYSTAL")), [3, 5]);
        assert_eq!(ids(&filter_transactions(&txs, "sosa")), [4]);
    }

    #[test]
    fn test_description_match() {
        let txs = default_seed();
        assert_eq!(ids(&filter_transactions(&txs, "load")), [1, 2, 3, 4]);
    }

    #[test]
    fn test_amount_matches_formatted_string() {
        let txs = default_seed();
        assert_eq!(ids(&filter_transactions(&txs, "$8,0")), [5]);
        assert_eq!(ids(&filter_transactions(&txs, "8000")), Vec::<u64>::new());

        let euro = AmountFormat {
            symbol: "€".to_string(),
            thousands_separator: ".".to_string(),
        };
        assert_eq!(ids(&filter_transactions_with(&txs, "€8.000", &euro)), [5]);
    }

    #[test]
    fn test_result_is_ordered_subset() {
        let txs = default_seed();
        for query in ["a", "ligon", "$", "zzz", " "] {
            let result = filter_transactions(&txs, query);
            let mut remaining = txs.iter();
            for tx in &result {
                assert!(remaining.any(|candidate| candidate == tx));
            }
        }
        assert!(filter_transactions(&txs, "zzz").is_empty());
    }
}
