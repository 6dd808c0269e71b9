//! Subprocess proposer.
//!
//! Runs an LLM CLI (by default `claude -p`), writes the prompt to its stdin
//! and takes its stdout as the draft.

use std::process::Stdio;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use super::request::{ProposalRequest, build_proposal_prompt};
use super::trait_def::PlanProposer;

/// Default executable, found via `$PATH`.
pub const DEFAULT_COMMAND: &str = "claude";

/// Proposer that shells out to an external command.
#[derive(Debug, Clone)]
pub struct CommandProposer {
    binary: String,
    args: Vec<String>,
}

impl CommandProposer {
    /// Run `claude -p`.
    pub fn new() -> Self {
        Self {
            binary: DEFAULT_COMMAND.to_string(),
            args: vec!["-p".to_string()],
        }
    }

    /// Run `path` with no arguments.
    pub fn with_binary(path: impl Into<String>) -> Self {
        Self {
            binary: path.into(),
            args: Vec::new(),
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }
}

impl Default for CommandProposer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlanProposer for CommandProposer {
    fn name(&self) -> &str {
        "command"
    }

    async fn propose(&self, request: &ProposalRequest) -> Result<String> {
        let prompt = build_proposal_prompt(request);

        let mut cmd = Command::new(&self.binary);
        cmd.args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(binary = %self.binary, args = ?self.args, "spawning proposer");
        let mut child = cmd.spawn().with_context(|| {
            format!(
                "failed to spawn proposer binary at '{}' -- is it installed and on PATH?",
                self.binary
            )
        })?;

        let mut stdin = child
            .stdin
            .take()
            .context("proposer process has no stdin")?;
        // Feed stdin while stdout and stderr drain; dropping stdin closes it.
        let write_prompt = async move { stdin.write_all(prompt.as_bytes()).await };
        let (written, output) = tokio::join!(write_prompt, child.wait_with_output());
        let output = output.context("failed to wait for proposer process")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(status = %output.status, stderr = %stderr.trim(), "proposer exited unsuccessfully");
            bail!(
                "proposer '{}' exited with {}: {}",
                self.binary,
                output.status,
                stderr.trim()
            );
        }

        written.context("failed to write prompt to proposer stdin")?;

        let stdout = String::from_utf8(output.stdout).context("proposer output is not UTF-8")?;
        debug!(bytes = stdout.len(), "proposer returned draft");
        Ok(stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_script(dir: &std::path::Path, body: &str) -> String {
        let script_path = dir.join("fake_proposer.sh");
        std::fs::write(&script_path, format!("#!/bin/sh\n{body}")).unwrap();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&script_path, std::fs::Permissions::from_mode(0o755))
                .unwrap();
        }
        script_path.to_str().unwrap().to_string()
    }

    fn request() -> ProposalRequest {
        ProposalRequest::new(None, &["rice".to_string()], &[])
    }

    #[tokio::test]
    async fn returns_stdout_of_the_command() {
        let tmp = tempfile::tempdir().unwrap();
        let script = write_script(
            tmp.path(),
            "cat > /dev/null\necho '[{\"day\":\"Monday\",\"dinner_recipe_ids\":[1]}]'\n",
        );

        let proposer = CommandProposer::with_binary(script);
        let out = proposer.propose(&request()).await.unwrap();
        assert!(out.contains("dinner_recipe_ids"), "got: {out}");
    }

    #[tokio::test]
    async fn prompt_is_written_to_stdin() {
        let tmp = tempfile::tempdir().unwrap();
        let captured = tmp.path().join("prompt.txt");
        let script = write_script(
            tmp.path(),
            &format!("cat > '{}'\necho '[]'\n", captured.display()),
        );

        CommandProposer::with_binary(script)
            .propose(&request())
            .await
            .unwrap();

        let prompt = std::fs::read_to_string(&captured).unwrap();
        assert!(prompt.contains("meal planning assistant"));
        assert!(prompt.contains("rice"));
    }

    #[tokio::test]
    async fn arguments_are_passed_through() {
        let tmp = tempfile::tempdir().unwrap();
        let script = write_script(tmp.path(), "cat > /dev/null\necho \"$1 $2\"\n");

        let out = CommandProposer::with_binary(script)
            .args(["--model", "small"])
            .propose(&request())
            .await
            .unwrap();
        assert_eq!(out.trim(), "--model small");
    }

    #[tokio::test]
    async fn non_zero_exit_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let script = write_script(tmp.path(), "cat > /dev/null\necho 'quota exceeded' >&2\nexit 3\n");

        let err = CommandProposer::with_binary(script)
            .propose(&request())
            .await
            .unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("quota exceeded"), "got: {msg}");
    }

    fn large_request() -> ProposalRequest {
        let pantry: Vec<String> = (0..20_000).map(|i| format!("pantry item {i}")).collect();
        ProposalRequest::new(None, &pantry, &[])
    }

    #[tokio::test]
    async fn early_exit_reports_status_and_stderr() {
        let tmp = tempfile::tempdir().unwrap();
        let script = write_script(tmp.path(), "echo 'not logged in' >&2\nexit 4\n");

        let err = CommandProposer::with_binary(script)
            .propose(&large_request())
            .await
            .unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("not logged in"), "got: {msg}");
        assert!(msg.contains("exited with"), "got: {msg}");
    }

    #[tokio::test]
    async fn chatty_child_does_not_block_prompt_write() {
        let tmp = tempfile::tempdir().unwrap();
        let script = write_script(
            tmp.path(),
            "head -c 300000 /dev/zero | tr '\\0' 'x'\ncat > /dev/null\n",
        );

        let out = tokio::time::timeout(
            std::time::Duration::from_secs(30),
            CommandProposer::with_binary(script).propose(&large_request()),
        )
        .await
        .expect("proposer should not deadlock")
        .unwrap();
        assert_eq!(out.len(), 300_000);
    }

    #[tokio::test]
    async fn missing_binary_is_an_error() {
        let proposer = CommandProposer::with_binary("/nonexistent/path/to/claude");
        let err = proposer.propose(&request()).await.unwrap_err();
        let msg = format!("{err:#}");
        assert!(
            msg.contains("failed to spawn proposer binary"),
            "error message should mention spawn failure, got: {msg}"
        );
    }

    #[test]
    fn default_runs_claude_print_mode() {
        let proposer = CommandProposer::default();
        assert_eq!(proposer.binary(), "claude");
        assert_eq!(proposer.args, vec!["-p"]);
        assert_eq!(proposer.name(), "command");
    }
}
