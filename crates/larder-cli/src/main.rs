mod config;
mod pantry_cmds;
mod plan_cmds;
mod prefs_cmd;
mod recipe_cmds;
mod saved_cmds;
mod store;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use larder_core::{DietCategory, Day, Goal, GoalFocus, IngredientCategory, MealSlot, RecipeId, TimeLimit};

use config::LarderConfig;
use store::DataStore;

#[derive(Parser)]
#[command(name = "larder", about = "Pantry-aware recipe matching and weekly meal planning")]
struct Cli {
    /// Recipe catalog file, .json or .toml (overrides LARDER_CATALOG)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Directory holding pantry and plan files (overrides LARDER_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a larder config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Show or change planning preferences
    Prefs {
        #[command(subcommand)]
        command: PrefsCommands,
    },
    /// Pantry management
    Pantry {
        #[command(subcommand)]
        command: PantryCommands,
    },
    /// List recipes you can cook from your pantry, best match first
    Recipes {
        /// Total time bucket: all, under30, under60
        #[arg(long, default_value = "all")]
        time: TimeLimit,
    },
    /// Browse recipes by nutrition goal (defaults to your preferred goal)
    Browse {
        /// Goal lens: all, low-calorie, high-protein
        #[arg(long)]
        goal: Option<GoalFocus>,
    },
    /// Weekly plan management
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Shopping list for the current week
    Shopping,
    /// Saved plans
    Saved {
        #[command(subcommand)]
        command: SavedCommands,
    },
}

#[derive(Subcommand)]
pub enum PrefsCommands {
    /// Print the stored preferences
    Show,
    /// Update preferences; omitted options keep their current value
    Set {
        /// Accepted diets, comma-separated (vegan,vegetarian,non-veg)
        #[arg(long, value_delimiter = ',')]
        diet: Vec<DietCategory>,
        /// Accepted cuisines, comma-separated ("Any" accepts all)
        #[arg(long, value_delimiter = ',')]
        cuisine: Vec<String>,
        /// Maximum prep + cook minutes (0 removes the limit)
        #[arg(long)]
        max_time: Option<u32>,
        /// Health goal: loss, maintain, protein
        #[arg(long)]
        goal: Option<Goal>,
        /// Start from empty preferences instead of the stored ones
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Subcommand)]
pub enum PantryCommands {
    /// List pantry items
    List,
    /// Add an item to the pantry
    Add {
        /// Item name (multiple words are joined)
        #[arg(required = true)]
        name: Vec<String>,
        /// Shelf category
        #[arg(long, default_value = "produce")]
        category: IngredientCategory,
    },
    /// Remove an item by id or name
    Remove {
        /// Item id or name
        item: String,
    },
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Draft a week with the configured proposer and assemble it
    Generate {
        /// Read the draft from a file instead of running the proposer command
        #[arg(long)]
        draft: Option<PathBuf>,
        /// Also save the result under this name
        #[arg(long)]
        save: Option<String>,
    },
    /// Show the current week
    Show,
    /// Add a catalog recipe to a meal slot
    Add {
        /// Recipe id
        recipe_id: RecipeId,
        /// Day of the week (monday, tue, ...)
        #[arg(long)]
        day: Day,
        /// breakfast, lunch or dinner
        #[arg(long)]
        meal: MealSlot,
    },
    /// Remove a recipe from a meal slot
    Remove {
        /// Recipe id
        recipe_id: RecipeId,
        /// Day of the week
        #[arg(long)]
        day: Day,
        /// breakfast, lunch or dinner
        #[arg(long)]
        meal: MealSlot,
    },
    /// Empty one meal slot
    Clear {
        /// Day of the week
        #[arg(long)]
        day: Day,
        /// breakfast, lunch or dinner
        #[arg(long)]
        meal: MealSlot,
    },
    /// Drop stale recipe references and replace repeats
    Repair,
    /// Save the current week
    Save {
        /// Plan name (defaults to a dated name)
        name: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum SavedCommands {
    /// List saved plans, newest first
    List {
        /// Only plans whose name contains this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Replace the current week with a saved plan
    Load {
        /// Saved plan id (or unique prefix)
        id: String,
    },
    /// Copy a saved plan
    Duplicate {
        /// Saved plan id (or unique prefix)
        id: String,
    },
    /// Delete a saved plan
    Delete {
        /// Saved plan id (or unique prefix)
        id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Commands::Init { force } = cli.command {
        return prefs_cmd::cmd_init(force);
    }

    let resolved = LarderConfig::resolve(cli.catalog.as_deref(), cli.data_dir.as_deref())?;
    let store = DataStore::new(&resolved.data_dir);

    match cli.command {
        Commands::Init { .. } => {}
        Commands::Prefs { command } => {
            prefs_cmd::run_prefs_command(command)?;
        }
        Commands::Pantry { command } => {
            pantry_cmds::run_pantry_command(command, &store)?;
        }
        Commands::Recipes { time } => {
            let catalog = store::load_catalog(resolved.catalog_path.as_deref())?;
            recipe_cmds::run_recipes(&store, &catalog, time)?;
        }
        Commands::Browse { goal } => {
            let catalog = store::load_catalog(resolved.catalog_path.as_deref())?;
            recipe_cmds::run_browse(&catalog, resolved.preferences.as_ref(), goal)?;
        }
        Commands::Plan { command } => {
            let catalog = store::load_catalog(resolved.catalog_path.as_deref())?;
            plan_cmds::run_plan_command(command, &resolved, &store, &catalog).await?;
        }
        Commands::Shopping => {
            recipe_cmds::run_shopping(&store)?;
        }
        Commands::Saved { command } => {
            saved_cmds::run_saved_command(command, &store)?;
        }
    }

    Ok(())
}
