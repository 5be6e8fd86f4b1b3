use clap::Subcommand;
use marzano_core::{Config, Store};

#[derive(Subcommand)]
pub enum DataAction {
    /// Erase all stored progress and settings
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: DataAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        DataAction::Clear { yes } => {
            if !yes {
                eprintln!("This will reset all progress and settings and cannot be undone.");
                eprintln!("Re-run with --yes to confirm.");
                std::process::exit(1);
            }
            let store = Store::open()?;
            store.clear()?;
            Config::default().save()?;
            println!("all data cleared");
        }
    }
    Ok(())
}
