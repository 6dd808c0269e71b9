//! `larder plan ...` subcommands.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use larder_core::plan::{DraftPlan, assemble, generate_week_plan};
use larder_core::proposal::{CommandProposer, FileProposer, ProposerRegistry};
use larder_core::{Catalog, Day, MealSlot, RecipeId, WeekPlan};

use crate::PlanCommands;
use crate::config::{LarderConfig, ProposerKind};
use crate::store::DataStore;

pub async fn run_plan_command(
    command: PlanCommands,
    config: &LarderConfig,
    store: &DataStore,
    catalog: &Catalog,
) -> Result<()> {
    match command {
        PlanCommands::Generate { draft, save } => {
            cmd_generate(config, store, catalog, draft, save.as_deref()).await
        }
        PlanCommands::Show => {
            print_week(&store.load_week_plan()?);
            Ok(())
        }
        PlanCommands::Add {
            recipe_id,
            day,
            meal,
        } => cmd_add(store, catalog, recipe_id, day, meal),
        PlanCommands::Remove {
            recipe_id,
            day,
            meal,
        } => {
            let mut plan = store.load_week_plan()?;
            let removed = plan.remove_recipe(day, meal, recipe_id)?;
            store.save_week_plan(&plan)?;
            println!("Removed {} from {day} {meal}.", removed.name);
            Ok(())
        }
        PlanCommands::Clear { day, meal } => {
            let mut plan = store.load_week_plan()?;
            let cleared = plan.clear_slot(day, meal);
            store.save_week_plan(&plan)?;
            println!("Cleared {day} {meal} ({} recipe(s)).", cleared.len());
            Ok(())
        }
        PlanCommands::Repair => cmd_repair(store, catalog),
        PlanCommands::Save { name } => {
            let plan = store.load_week_plan()?;
            let mut saved = store.load_saved_plans()?;
            let entry = saved.save(name.as_deref().unwrap_or(""), plan);
            println!("Saved plan {:?} ({}).", entry.name, entry.id);
            store.save_saved_plans(&saved)?;
            Ok(())
        }
    }
}

/// Register every proposer the configuration can build.
pub fn build_registry(config: &LarderConfig, draft: Option<PathBuf>) -> ProposerRegistry {
    let mut registry = ProposerRegistry::new();
    registry.register(
        CommandProposer::with_binary(&config.proposer.command).args(config.proposer.args.clone()),
    );
    if let Some(path) = draft.or_else(|| config.proposer.draft_path.clone()) {
        registry.register(FileProposer::new(path));
    }
    registry
}

async fn cmd_generate(
    config: &LarderConfig,
    store: &DataStore,
    catalog: &Catalog,
    draft: Option<PathBuf>,
    save: Option<&str>,
) -> Result<()> {
    let kind = if draft.is_some() {
        ProposerKind::File
    } else {
        config.proposer.kind
    };
    let registry = build_registry(config, draft);
    let Some(proposer) = registry.get(kind.name()) else {
        bail!("proposer kind is \"file\" but no draft_path is configured; pass --draft FILE");
    };

    let pantry_names = store.load_pantry()?.names();
    let generated =
        generate_week_plan(catalog, config.preferences.as_ref(), &pantry_names, proposer)
            .await
            .context("failed to generate a week plan")?;

    store.save_week_plan(&generated.plan)?;
    println!(
        "Planned {} recipe(s) from {} matching your preferences.",
        generated.plan.recipe_count(),
        generated.pool_size
    );

    if let Some(name) = save {
        let mut saved = store.load_saved_plans()?;
        let entry = saved.save(name, generated.plan.clone());
        println!("Saved as {:?} ({}).", entry.name, entry.id);
        store.save_saved_plans(&saved)?;
    }

    println!();
    print_week(&generated.plan);
    Ok(())
}

fn cmd_add(
    store: &DataStore,
    catalog: &Catalog,
    recipe_id: RecipeId,
    day: Day,
    meal: MealSlot,
) -> Result<()> {
    let recipe = catalog
        .get(recipe_id)
        .with_context(|| format!("no recipe with id {recipe_id} in the catalog"))?;
    let mut plan = store.load_week_plan()?;
    plan.add_recipe(day, meal, recipe.clone())?;
    store.save_week_plan(&plan)?;
    println!("Added {} to {day} {meal}.", recipe.name);
    Ok(())
}

/// Re-run the assembler over the current week, against the whole catalog.
fn cmd_repair(store: &DataStore, catalog: &Catalog) -> Result<()> {
    let plan = store.load_week_plan()?;
    let draft = DraftPlan::from(&plan);
    let repaired = assemble(&draft, catalog.recipes())?;

    let before = plan.recipe_count();
    store.save_week_plan(&repaired)?;
    println!(
        "Repaired plan: {} of {before} reference(s) kept or replaced.",
        repaired.recipe_count()
    );
    print_week(&repaired);
    Ok(())
}

/// Print the week as a day-by-day table.
pub fn print_week(plan: &WeekPlan) {
    if plan.is_empty() {
        println!("The week is empty.");
        return;
    }
    for day_plan in plan.days() {
        println!("{}", day_plan.day);
        for slot in MealSlot::ALL {
            let recipes = &day_plan.meal(slot).recipes;
            let names = if recipes.is_empty() {
                "-".to_string()
            } else {
                recipes
                    .iter()
                    .map(|r| format!("{} [{}]", r.name, r.id))
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            println!("  {:<10} {names}", slot.to_string());
        }
    }
}
