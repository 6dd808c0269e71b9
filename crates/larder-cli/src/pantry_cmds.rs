//! `larder pantry ...` subcommands.

use anyhow::Result;

use crate::PantryCommands;
use crate::store::DataStore;

pub fn run_pantry_command(command: PantryCommands, store: &DataStore) -> Result<()> {
    match command {
        PantryCommands::List => {
            let pantry = store.load_pantry()?;
            if pantry.is_empty() {
                println!("Your pantry is empty. Add items with `larder pantry add <name>`.");
                return Ok(());
            }
            for item in pantry.items() {
                println!("{:<36}  {:<16} {}", item.id, item.category.to_string(), item.name);
            }
        }
        PantryCommands::Add { name, category } => {
            let mut pantry = store.load_pantry()?;
            let item = pantry.add(&name.join(" "), category)?;
            println!("Added {} ({}) [{}].", item.name, item.category, item.id);
            store.save_pantry(&pantry)?;
        }
        PantryCommands::Remove { item } => {
            let mut pantry = store.load_pantry()?;
            let removed = pantry.remove(&item)?;
            store.save_pantry(&pantry)?;
            println!("Removed {}.", removed.name);
        }
    }
    Ok(())
}
