use anyhow::{anyhow, Result};
use clap::Args;
use inquire::Confirm;
use std::path::Path;

use payfeed_config::Config;
use payfeed_core::{
    AmountFormat, CoreError, PendingSignal, PersistenceAdapter, TransactionInput,
    TransactionPatch, TransactionRecord, TransactionStore,
};

use crate::formatting::{contacts_json, feed_json, print_contacts, print_feed, print_transaction};

/// Store plus the presentation capabilities the core leaves to us
pub struct Feed {
    pub store: TransactionStore,
    pub config: Config,
    saving: PendingSignal,
}

impl Feed {
    pub fn open(config: Config) -> Self {
        let store = TransactionStore::open(PersistenceAdapter::from_config(&config))
            .with_format(AmountFormat::from(&config.currency));
        let saving = PendingSignal::from_millis(config.feed.save_delay_ms);
        Self {
            store,
            config,
            saving,
        }
    }

    fn format(&self) -> &AmountFormat {
        self.store.format()
    }

    /// Show the "saving" state until the pending signal fires
    async fn finish_saving(&mut self, message: String) {
        if !self.saving.delay().is_zero() {
            println!("Saving...");
        }
        self.saving.schedule(move || println!("{}", message));
        self.saving.settle().await;
        self.report_persistence_warning();
    }

    fn report_persistence_warning(&mut self) {
        if let Some(warning) = self.store.take_persistence_warning() {
            eprintln!("warning: {}", warning.to_details());
        }
    }
}

/// Hand a store error to the user as kind + message
fn surface(error: CoreError) -> anyhow::Error {
    anyhow!(error.to_details())
}

#[derive(Args, Debug)]
pub struct ListTransactions {
    /// Only show transactions whose name, description or amount contains this text
    #[arg(short, long)]
    pub query: Option<String>,
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl ListTransactions {
    pub async fn run(self, feed: &mut Feed) -> Result<()> {
        let visible = feed.store.search(self.query.as_deref().unwrap_or(""));
        if self.json {
            let value = feed_json(&visible, feed.format(), &feed.config.avatar);
            println!("{}", serde_json::to_string_pretty(&value)?);
        } else {
            print_feed(&visible, feed.format());
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListContacts {
    /// Print JSON instead of a list
    #[arg(long)]
    pub json: bool,
}

impl ListContacts {
    pub async fn run(self, feed: &mut Feed) -> Result<()> {
        let contacts = feed.store.contacts();
        if self.json {
            let value = contacts_json(&contacts, &feed.config.avatar);
            println!("{}", serde_json::to_string_pretty(&value)?);
        } else {
            print_contacts(&contacts, &feed.config.avatar);
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ShowTransaction {
    pub id: u64,
}

impl ShowTransaction {
    pub async fn run(self, feed: &mut Feed) -> Result<()> {
        let tx = feed
            .store
            .get(self.id)
            .ok_or_else(|| surface(CoreError::NotFound { id: self.id }))?;
        print_transaction(tx, feed.format(), &feed.config.avatar);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddTransaction {
    #[arg(short, long)]
    pub name: String,
    /// Amount in whole units, e.g. 500 or 1,000
    #[arg(short, long)]
    pub amount: String,
    #[arg(short, long)]
    pub description: Option<String>,
    /// Display time such as 9:18PM; defaults to now
    #[arg(short, long)]
    pub time: Option<String>,
    /// Custom avatar image (URL or data URI)
    #[arg(long)]
    pub image_url: Option<String>,
}

impl AddTransaction {
    pub async fn run(self, feed: &mut Feed) -> Result<()> {
        let input = TransactionInput {
            name: self.name,
            amount: self.amount,
            description: self.description,
            time: self.time,
            image_url: self.image_url,
        };
        let created = feed.store.create(input).map_err(surface)?;
        let message = saved_message("Added", &created, feed.format());
        feed.finish_saving(message).await;
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct EditTransaction {
    pub id: u64,
    #[arg(short, long)]
    pub name: Option<String>,
    #[arg(short, long)]
    pub amount: Option<String>,
    #[arg(short, long)]
    pub description: Option<String>,
    #[arg(short, long)]
    pub time: Option<String>,
    #[arg(long, conflicts_with = "clear_image")]
    pub image_url: Option<String>,
    /// Go back to the generated avatar
    #[arg(long)]
    pub clear_image: bool,
}

impl EditTransaction {
    pub async fn run(self, feed: &mut Feed) -> Result<()> {
        let patch = TransactionPatch {
            name: self.name,
            amount: self.amount,
            description: self.description,
            time: self.time,
            image_url: if self.clear_image {
                Some(None)
            } else {
                self.image_url.map(Some)
            },
        };
        if patch.is_empty() {
            return Err(anyhow!("Nothing to change; pass at least one field to edit."));
        }

        let updated = feed.store.update(self.id, patch).map_err(surface)?;
        let message = saved_message("Updated", &updated, feed.format());
        feed.finish_saving(message).await;
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct RemoveTransaction {
    pub id: u64,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

impl RemoveTransaction {
    pub async fn run(self, feed: &mut Feed) -> Result<()> {
        let tx = feed
            .store
            .get(self.id)
            .cloned()
            .ok_or_else(|| surface(CoreError::NotFound { id: self.id }))?;

        if !self.yes {
            print_transaction(&tx, feed.format(), &feed.config.avatar);
            let confirm = Confirm::new("Are you sure you want to delete this transaction?")
                .with_default(false);
            if !confirm.prompt()? {
                return Ok(());
            }
        }

        feed.store.delete(self.id).map_err(surface)?;
        println!("Deleted transaction {}.", self.id);
        feed.report_persistence_warning();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct InitConfig {
    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}

impl InitConfig {
    pub fn run(self, path: &Path) -> Result<()> {
        if path.exists() && !self.force {
            return Err(anyhow!(
                "{} already exists; pass --force to overwrite it",
                path.display()
            ));
        }
        std::fs::write(path, Config::generate_default())?;
        println!("Wrote default configuration to {}", path.display());
        Ok(())
    }
}

fn saved_message(verb: &str, tx: &TransactionRecord, format: &AmountFormat) -> String {
    format!(
        "{} transaction {}: {} {}",
        verb,
        tx.id,
        tx.name,
        format.format(&tx.amount)
    )
}
