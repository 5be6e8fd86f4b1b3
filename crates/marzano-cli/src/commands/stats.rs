use clap::Subcommand;
use marzano_core::{Session, Store};

use crate::view;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Completed-session summary
    Show,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        StatsAction::Show => {
            let store = Store::open()?;
            let session = Session::open(store);
            let completed = session.completed_work_sessions();

            let tomatoes = view::tomato_line(completed);
            if !tomatoes.is_empty() {
                println!("{tomatoes}");
            }
            println!("{}", view::summary_line(completed));
        }
    }
    Ok(())
}
