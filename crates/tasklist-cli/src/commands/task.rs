//! Task command handlers
//!
//! Each command runs one flow through a fresh `Synchronizer` and reports
//! whatever the error slot holds once it finishes.

use anyhow::{bail, Context, Result};

use tasklist_core::{Config, Synchronizer, TaskId};

use crate::output::Output;

/// List all tasks
pub async fn list(config: &Config, output: &Output) -> Result<()> {
    let sync = open_loaded(config).await?;
    output.print_tasks(sync.list().tasks())
}

/// Create a task
pub async fn add(config: &Config, title: String, output: &Output) -> Result<()> {
    let mut sync = open(config)?;
    sync.create(title).await;
    check_error(&sync)?;

    // The created task is always appended last
    if let Some(task) = sync.list().tasks().last() {
        output.success(&format!("Created task: {}", task.id));
        output.print_task(task)?;
    }
    Ok(())
}

/// Toggle a task's done flag
///
/// The current flag decides the endpoint, so the list is loaded first.
pub async fn toggle(config: &Config, id: TaskId, output: &Output) -> Result<()> {
    let mut sync = open_loaded(config).await?;
    sync.toggle(id).await;
    check_error(&sync)?;

    if let Some(task) = sync.list().get(id) {
        let state = if task.done { "done" } else { "not done" };
        output.success(&format!("Marked task {} {}", id, state));
        output.print_task(task)?;
    }
    Ok(())
}

/// Delete a task
pub async fn delete(config: &Config, id: TaskId, output: &Output) -> Result<()> {
    let mut sync = open(config)?;
    sync.delete(id)
        .await
        .with_context(|| format!("Failed to reach task service at {}", config.server_url))?;

    output.success(&format!("Deleted task: {}", id));
    Ok(())
}

fn open(config: &Config) -> Result<Synchronizer> {
    Synchronizer::open(config).context("Failed to create task service client")
}

async fn open_loaded(config: &Config) -> Result<Synchronizer> {
    let mut sync = open(config)?;
    sync.load()
        .await
        .with_context(|| format!("Failed to load tasks from {}", config.server_url))?;
    Ok(sync)
}

/// Turn a non-empty error slot into a command failure
fn check_error(sync: &Synchronizer) -> Result<()> {
    if let Some(message) = sync.list().error() {
        bail!("{}", message);
    }
    Ok(())
}
