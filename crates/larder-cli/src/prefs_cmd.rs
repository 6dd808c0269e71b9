//! `larder init` and `larder prefs ...`: the config file and the
//! preferences kept in it.

use anyhow::{Context, Result, bail};

use larder_core::{CuisinePreference, UserPreferences};

use crate::PrefsCommands;
use crate::config::{self, ConfigFile};

/// Execute the `larder init` command: write a default config file.
pub fn cmd_init(force: bool) -> Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    config::save_config(&ConfigFile::default())?;

    println!("Config written to {}", path.display());
    println!();
    println!("Next: run `larder prefs set` to record your diet, cuisines and time limit.");
    Ok(())
}

pub fn run_prefs_command(command: PrefsCommands) -> Result<()> {
    match command {
        PrefsCommands::Show => {
            let file = config::load_or_default()?;
            match file.preferences {
                Some(prefs) => {
                    let text = toml::to_string_pretty(&prefs)
                        .context("failed to render preferences")?;
                    print!("{text}");
                }
                None => println!("No preferences set; every recipe is a candidate."),
            }
        }
        PrefsCommands::Set {
            diet,
            cuisine,
            max_time,
            goal,
            reset,
        } => {
            let mut file = config::load_or_default()?;
            let mut prefs = if reset {
                UserPreferences::default()
            } else {
                file.preferences.take().unwrap_or_default()
            };

            if !diet.is_empty() {
                prefs.diet = diet.into_iter().collect();
            }
            if !cuisine.is_empty() {
                prefs.cuisine = CuisinePreference::from(cuisine);
            }
            if let Some(minutes) = max_time {
                prefs.cook_time_max = (minutes > 0).then_some(minutes);
            }
            if goal.is_some() {
                prefs.goal = goal;
            }

            file.preferences = Some(prefs);
            config::save_config(&file)?;
            println!("Preferences saved to {}", config::config_path().display());
        }
    }
    Ok(())
}
