use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{
    AddTransaction, EditTransaction, InitConfig, ListContacts, ListTransactions,
    RemoveTransaction, ShowTransaction,
};

#[derive(Parser, Debug)]
#[command(name = "payfeed")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A local peer-payment activity feed", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "payfeed.yaml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the activity feed, optionally filtered by a search query
    #[command(name = "list")]
    List(ListTransactions),
    /// Show the recent-contacts strip
    #[command(name = "contacts")]
    Contacts(ListContacts),
    /// Show a single transaction
    #[command(name = "show")]
    Show(ShowTransaction),
    /// Add a transaction to the top of the feed
    #[command(name = "add")]
    Add(AddTransaction),
    /// Edit a transaction in place
    #[command(name = "edit")]
    Edit(EditTransaction),
    /// Delete a transaction
    #[command(name = "remove")]
    Remove(RemoveTransaction),
    /// Write the default configuration file
    #[command(name = "init-config")]
    InitConfig(InitConfig),
}
