use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "pasar-ternak")]
#[command(about = "Cart and checkout for the Pasar Ternak livestock marketplace", long_about = None)]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Keep the cart in memory for this run only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// More log output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show one listing
    Item {
        /// Listing id
        id: i64,
    },
    /// Add a listing to the cart
    Add {
        /// Listing id
        id: i64,
    },
    /// Show the cart with current listing details
    Cart,
    /// Remove the cart line at a position (0-based, as shown by `cart`)
    Remove {
        position: usize,
    },
    /// Empty the cart
    Clear,
    /// Place an order for everything in the cart
    Checkout {
        /// TRANSFER or COD
        #[arg(short, long)]
        payment: Option<String>,
    },
}
