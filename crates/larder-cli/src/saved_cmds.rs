//! `larder saved ...` subcommands.

use anyhow::Result;

use crate::SavedCommands;
use crate::store::DataStore;

pub fn run_saved_command(command: SavedCommands, store: &DataStore) -> Result<()> {
    let mut saved = store.load_saved_plans()?;
    match command {
        SavedCommands::List { search } => {
            let mut found = saved.search(search.as_deref().unwrap_or(""));
            found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            if found.is_empty() {
                match search {
                    Some(query) => println!("No saved plans match {query:?}."),
                    None => println!("No saved plans yet."),
                }
                return Ok(());
            }
            for entry in found {
                println!(
                    "{}  {}  {} ({} recipes)",
                    entry.id,
                    entry.created_at.format("%Y-%m-%d"),
                    entry.name,
                    entry.plan.recipe_count()
                );
            }
        }
        SavedCommands::Load { id } => {
            let id = saved.resolve(&id)?;
            if let Some(entry) = saved.get(id) {
                store.save_week_plan(&entry.plan)?;
                println!("Loaded {:?} as the current week.", entry.name);
            }
        }
        SavedCommands::Duplicate { id } => {
            let id = saved.resolve(&id)?;
            let copy = saved.duplicate(id)?;
            println!("Duplicated as {:?} ({}).", copy.name, copy.id);
            store.save_saved_plans(&saved)?;
        }
        SavedCommands::Delete { id } => {
            let id = saved.resolve(&id)?;
            let removed = saved.remove(id)?;
            store.save_saved_plans(&saved)?;
            println!("Deleted {:?}.", removed.name);
        }
    }
    Ok(())
}
