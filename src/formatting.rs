use payfeed_config::AvatarConfig;
use payfeed_core::{AmountFormat, ContactView, TransactionRecord};
use serde_json::{json, Value};

/// One feed line: `id  time  [AB] name  description  $1,000`
pub fn feed_line(tx: &TransactionRecord, format: &AmountFormat) -> String {
    format!(
        "{:>14}  {:>7}  [{:<2}] {:<22} {:<28} {:>12}",
        tx.id,
        tx.time,
        tx.avatar_initials,
        truncate(&tx.name, 22),
        truncate(&tx.description, 28),
        format.format(&tx.amount)
    )
}

pub fn print_feed(transactions: &[TransactionRecord], format: &AmountFormat) {
    if transactions.is_empty() {
        println!("No transactions.");
        return;
    }
    for tx in transactions {
        println!("{}", feed_line(tx, format));
    }
}

pub fn print_transaction(tx: &TransactionRecord, format: &AmountFormat, avatars: &AvatarConfig) {
    println!("Id:\t\t{}", tx.id);
    println!("Name:\t\t{}", tx.name);
    println!("Description:\t{}", tx.description);
    println!("Time:\t\t{}", tx.time);
    println!("Amount:\t\t{}", format.format(&tx.amount));
    println!("Avatar:\t\t{}", tx.avatar_url(avatars));
}

pub fn print_contacts(contacts: &[ContactView], avatars: &AvatarConfig) {
    if contacts.is_empty() {
        println!("No contacts yet.");
        return;
    }
    for contact in contacts {
        println!(
            "[{:<2}] {:<22} {}",
            contact.avatar_initials,
            truncate(&contact.name, 22),
            contact.avatar_url(avatars)
        );
    }
}

pub fn feed_json(transactions: &[TransactionRecord], format: &AmountFormat, avatars: &AvatarConfig) -> Value {
    Value::Array(
        transactions
            .iter()
            .map(|tx| {
                json!({
                    "id": tx.id,
                    "name": tx.name,
                    "description": tx.description,
                    "time": tx.time,
                    "amount": format.format(&tx.amount),
                    "avatarInitials": tx.avatar_initials,
                    "avatarUrl": tx.avatar_url(avatars),
                })
            })
            .collect(),
    )
}

pub fn contacts_json(contacts: &[ContactView], avatars: &AvatarConfig) -> Value {
    Value::Array(
        contacts
            .iter()
            .map(|contact| {
                json!({
                    "name": contact.name,
                    "avatarInitials": contact.avatar_initials,
                    "avatarUrl": contact.avatar_url(avatars),
                    "mostRecentTransactionId": contact.most_recent_transaction_id,
                })
            })
            .collect(),
    )
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
