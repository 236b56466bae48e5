//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use anyhow::Result;
use tasklist_core::Task;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a single task
    pub fn print_task(&self, task: &Task) -> Result<()> {
        match self.format {
            OutputFormat::Human => println!("{}", task_line(task)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(task)?),
            OutputFormat::Quiet => println!("{}", task.id),
        }
        Ok(())
    }

    /// Print a list of tasks
    pub fn print_tasks(&self, tasks: &[Task]) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                if tasks.is_empty() {
                    println!("No tasks.");
                    return Ok(());
                }
                for task in tasks {
                    println!("{}", task_line(task));
                }
                let done = tasks.iter().filter(|t| t.done).count();
                println!("\n{} task(s), {} done", tasks.len(), done);
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(tasks)?);
            }
            OutputFormat::Quiet => {
                for task in tasks {
                    println!("{}", task.id);
                }
            }
        }
        Ok(())
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// One-line rendering of a task: checkbox, id, title
fn task_line(task: &Task) -> String {
    let check = if task.done { "[x]" } else { "[ ]" };
    format!("{} {:>4}  {}", check, task.id, task.title)
}
