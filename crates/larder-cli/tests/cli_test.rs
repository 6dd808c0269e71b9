//! End-to-end tests for the `larder` binary.
//!
//! Every test runs the real binary against its own temporary config and data
//! directories, using the built-in recipe catalog.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use larder_test_utils::draft_day;

// -----------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------

struct Sandbox {
    tmp: tempfile::TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            tmp: tempfile::TempDir::new().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.tmp.path()
    }

    fn data_dir(&self) -> PathBuf {
        self.path().join("data")
    }

    fn config_home(&self) -> PathBuf {
        self.path().join("config")
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_larder"))
            .arg("--data-dir")
            .arg(self.data_dir())
            .args(args)
            .env("XDG_CONFIG_HOME", self.config_home())
            .env("XDG_DATA_HOME", self.path().join("share"))
            .env_remove("LARDER_CATALOG")
            .env_remove("LARDER_DATA_DIR")
            .env_remove("LARDER_PROPOSER_COMMAND")
            .env_remove("RUST_LOG")
            .output()
            .expect("failed to run larder binary")
    }

    /// Run and require success, returning stdout.
    fn ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "larder {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).unwrap()
    }

    /// Run and require failure, returning stderr.
    fn fails(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "larder {args:?} should have failed, stdout: {}",
            String::from_utf8_lossy(&output.stdout)
        );
        String::from_utf8(output.stderr).unwrap()
    }

    fn write_draft(&self, entries: &[String]) -> PathBuf {
        let path = self.path().join("draft.json");
        std::fs::write(&path, format!("[{}]", entries.join(","))).unwrap();
        path
    }

    fn write_config(&self, contents: &str) {
        let dir = self.config_home().join("larder");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.toml"), contents).unwrap();
    }

    /// Generate Monday {1, 4, 6} plus a repeated 6 on Tuesday dinner.
    fn generate_sample_week(&self) -> String {
        let draft = self.write_draft(&[
            draft_day("Monday", &[1], &[4], &[6]),
            draft_day("Tuesday", &[], &[], &[6]),
        ]);
        self.ok(&["plan", "generate", "--draft", draft.to_str().unwrap()])
    }
}

// -----------------------------------------------------------------------
// init
// -----------------------------------------------------------------------

#[test]
fn init_refuses_to_overwrite_without_force() {
    let sandbox = Sandbox::new();

    let stdout = sandbox.ok(&["init"]);
    assert!(stdout.contains("Config written to"), "got: {stdout}");
    assert!(sandbox.config_home().join("larder/config.toml").exists());

    let stderr = sandbox.fails(&["init"]);
    assert!(stderr.contains("already exists"), "got: {stderr}");

    sandbox.ok(&["init", "--force"]);
}

// -----------------------------------------------------------------------
// prefs
// -----------------------------------------------------------------------

#[test]
fn prefs_set_persists_to_config_file() {
    let sandbox = Sandbox::new();

    sandbox.ok(&[
        "prefs", "set", "--diet", "vegan,vegetarian", "--cuisine", "Italian", "--max-time", "45",
    ]);
    let shown = sandbox.ok(&["prefs", "show"]);
    assert!(shown.contains("vegan"), "got: {shown}");
    assert!(shown.contains("Italian"), "got: {shown}");
    assert!(shown.contains("45"), "got: {shown}");

    sandbox.ok(&["prefs", "set", "--reset"]);
    let shown = sandbox.ok(&["prefs", "show"]);
    assert!(!shown.contains("Italian"), "got: {shown}");
}

// -----------------------------------------------------------------------
// pantry
// -----------------------------------------------------------------------

#[test]
fn pantry_add_list_remove() {
    let sandbox = Sandbox::new();

    let empty = sandbox.ok(&["pantry", "list"]);
    assert!(empty.contains("pantry is empty"), "got: {empty}");

    let added = sandbox.ok(&["pantry", "add", "red", "lentils", "--category", "pantry"]);
    assert!(added.contains("Added red lentils (Pantry Staples)"), "got: {added}");

    let listed = sandbox.ok(&["pantry", "list"]);
    assert!(listed.contains("red lentils"), "got: {listed}");

    let stderr = sandbox.fails(&["pantry", "add", "Red Lentils"]);
    assert!(stderr.contains("already in the pantry"), "got: {stderr}");

    let removed = sandbox.ok(&["pantry", "remove", "RED LENTILS"]);
    assert!(removed.contains("Removed red lentils."), "got: {removed}");

    let stderr = sandbox.fails(&["pantry", "remove", "red lentils"]);
    assert!(stderr.contains("no pantry item matches"), "got: {stderr}");
}

// -----------------------------------------------------------------------
// recipes / browse
// -----------------------------------------------------------------------

#[test]
fn recipes_rank_by_pantry_matches() {
    let sandbox = Sandbox::new();
    sandbox.ok(&["pantry", "add", "garlic"]);
    sandbox.ok(&["pantry", "add", "spaghetti", "--category", "pantry"]);

    let stdout = sandbox.ok(&["recipes"]);
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines[0].contains("Spaghetti Aglio e Olio"), "got: {stdout}");
    assert!(lines[0].starts_with("2/5"), "got: {stdout}");
    assert!(lines[1].contains("Chana Masala"), "got: {stdout}");
    assert_eq!(lines.len(), 2, "got: {stdout}");

    let quick = sandbox.ok(&["recipes", "--time", "under30"]);
    assert!(quick.contains("Spaghetti"), "got: {quick}");
    assert!(!quick.contains("Chana Masala"), "got: {quick}");
}

#[test]
fn recipes_with_empty_pantry_prompt_to_add_items() {
    let sandbox = Sandbox::new();
    let stdout = sandbox.ok(&["recipes"]);
    assert!(stdout.contains("pantry is empty"), "got: {stdout}");
}

#[test]
fn browse_applies_goal_lens() {
    let sandbox = Sandbox::new();

    let protein = sandbox.ok(&["browse", "--goal", "high-protein"]);
    assert!(protein.contains("Chicken Tikka Masala"), "got: {protein}");
    assert!(!protein.contains("Avocado Toast"), "got: {protein}");

    let light = sandbox.ok(&["browse", "--goal", "low-calorie"]);
    assert!(light.contains("Avocado Toast"), "got: {light}");
    assert!(!light.contains("Beef Burrito Bowl"), "got: {light}");
}

#[test]
fn browse_defaults_to_preferred_goal_within_diet() {
    let sandbox = Sandbox::new();
    sandbox.write_config("[preferences]\ndiet = [\"vegan\"]\ngoal = \"loss\"\n");

    let stdout = sandbox.ok(&["browse"]);
    assert!(stdout.contains("low-calorie"), "got: {stdout}");
    assert!(stdout.contains("Lentil Soup"), "got: {stdout}");
    // Vegan but 480 kcal.
    assert!(!stdout.contains("Chana Masala"), "got: {stdout}");
    // Low calorie but not vegan.
    assert!(!stdout.contains("Masala Omelette"), "got: {stdout}");
}

// -----------------------------------------------------------------------
// plan
// -----------------------------------------------------------------------

#[test]
fn plan_generate_from_draft_replaces_repeats() {
    let sandbox = Sandbox::new();

    let stdout = sandbox.generate_sample_week();
    assert!(
        stdout.contains("Planned 4 recipe(s) from 18"),
        "got: {stdout}"
    );

    let shown = sandbox.ok(&["plan", "show"]);
    assert!(shown.contains("Avocado Toast [1]"), "got: {shown}");
    assert!(shown.contains("Chana Masala [4]"), "got: {shown}");
    assert_eq!(shown.matches("Chicken Tikka Masala [6]").count(), 1, "got: {shown}");
}

#[test]
fn plan_generate_with_too_few_candidates_fails() {
    let sandbox = Sandbox::new();
    sandbox.write_config("[preferences]\ncuisine = [\"Thai\"]\n");
    let draft = sandbox.write_draft(&[draft_day("Monday", &[10], &[14], &[])]);

    let stderr = sandbox.fails(&["plan", "generate", "--draft", draft.to_str().unwrap()]);
    assert!(
        stderr.contains("not enough recipes match your preferences: 2 available, 7 required"),
        "got: {stderr}"
    );
    assert!(!sandbox.data_dir().join("week_plan.json").exists());
}

#[test]
fn plan_generate_rejects_malformed_draft() {
    let sandbox = Sandbox::new();
    let path = sandbox.path().join("draft.json");
    std::fs::write(&path, r#"{"plan": "soon"}"#).unwrap();

    let stderr = sandbox.fails(&["plan", "generate", "--draft", path.to_str().unwrap()]);
    assert!(stderr.contains("malformed plan proposal"), "got: {stderr}");
}

#[test]
fn plan_manual_edits() {
    let sandbox = Sandbox::new();
    sandbox.generate_sample_week();

    let added = sandbox.ok(&["plan", "add", "11", "--day", "wed", "--meal", "lunch"]);
    assert!(added.contains("Added Caprese Salad to Wednesday lunch."), "got: {added}");

    let stderr = sandbox.fails(&["plan", "add", "1", "--day", "friday", "--meal", "dinner"]);
    assert!(
        stderr.contains("recipe 1 is already planned for Monday breakfast"),
        "got: {stderr}"
    );

    let stderr = sandbox.fails(&["plan", "add", "999", "--day", "friday", "--meal", "dinner"]);
    assert!(stderr.contains("no recipe with id 999"), "got: {stderr}");

    let removed = sandbox.ok(&["plan", "remove", "11", "--day", "wednesday", "--meal", "lunch"]);
    assert!(removed.contains("Removed Caprese Salad"), "got: {removed}");

    let cleared = sandbox.ok(&["plan", "clear", "--day", "monday", "--meal", "breakfast"]);
    assert!(cleared.contains("(1 recipe(s))"), "got: {cleared}");
    let shown = sandbox.ok(&["plan", "show"]);
    assert!(!shown.contains("Avocado Toast"), "got: {shown}");
}

#[test]
fn plan_repair_keeps_a_clean_week() {
    let sandbox = Sandbox::new();
    sandbox.generate_sample_week();

    let stdout = sandbox.ok(&["plan", "repair"]);
    assert!(stdout.contains("Repaired plan: 4 of 4"), "got: {stdout}");
}

// -----------------------------------------------------------------------
// shopping
// -----------------------------------------------------------------------

#[test]
fn shopping_marks_pantry_items() {
    let sandbox = Sandbox::new();

    let empty = sandbox.ok(&["shopping"]);
    assert!(empty.contains("week is empty"), "got: {empty}");

    sandbox.generate_sample_week();
    sandbox.ok(&["pantry", "add", "avocado"]);

    let stdout = sandbox.ok(&["shopping"]);
    assert!(stdout.contains("Produce"), "got: {stdout}");
    assert!(stdout.contains("[x] 1 ripe avocado"), "got: {stdout}");
    assert!(stdout.contains("[ ] 2 cans chickpeas"), "got: {stdout}");
}

// -----------------------------------------------------------------------
// saved
// -----------------------------------------------------------------------

#[test]
fn saved_plan_lifecycle() {
    let sandbox = Sandbox::new();
    sandbox.generate_sample_week();

    let saved = sandbox.ok(&["plan", "save", "Week one"]);
    assert!(saved.contains("Saved plan \"Week one\""), "got: {saved}");

    let listed = sandbox.ok(&["saved", "list"]);
    assert!(listed.contains("Week one (4 recipes)"), "got: {listed}");
    let id = listed.split_whitespace().next().unwrap().to_string();

    let copy = sandbox.ok(&["saved", "duplicate", &id[..8]]);
    assert!(copy.contains("\"Week one (copy)\""), "got: {copy}");

    let found = sandbox.ok(&["saved", "list", "--search", "COPY"]);
    assert_eq!(found.lines().count(), 1, "got: {found}");

    sandbox.ok(&["plan", "clear", "--day", "monday", "--meal", "breakfast"]);
    let loaded = sandbox.ok(&["saved", "load", &id]);
    assert!(loaded.contains("Loaded \"Week one\""), "got: {loaded}");
    let shown = sandbox.ok(&["plan", "show"]);
    assert!(shown.contains("Avocado Toast [1]"), "got: {shown}");

    let deleted = sandbox.ok(&["saved", "delete", &id]);
    assert!(deleted.contains("Deleted \"Week one\""), "got: {deleted}");
    let stderr = sandbox.fails(&["saved", "load", &id]);
    assert!(stderr.contains("no saved plan matches"), "got: {stderr}");
}
