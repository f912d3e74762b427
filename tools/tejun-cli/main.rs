use clap::{Parser, Subcommand};
use tejun::prelude::*;
use std::process::ExitCode;

/// Inspect and drive a tejun projects document from the terminal.
#[derive(Parser)]
#[command(name = "tejun-cli", version, about)]
struct Cli {
    /// Path to the projects JSON document.
    #[arg(short, long, default_value = "projects.json")]
    file: String,

    /// Acting user id recorded in project history.
    #[arg(short, long, default_value = "cli-user")]
    user: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all projects in the document.
    List,
    /// Create a new project from the built-in template.
    Create { name: String },
    /// Show a project's procedure with cursor and completion marks.
    Show { project_id: String },
    /// Complete the current node and move to its successor.
    Next { project_id: String },
    /// Move back to the predecessor node.
    Back { project_id: String },
    /// Take a decision branch by its target node id.
    Choose {
        project_id: String,
        target_node_id: String,
    },
    /// Reset a project's progress to the start node.
    Reset { project_id: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), StoreError> {
    let identity = Identity::new(&cli.user);
    let backend = JsonFileStore::new(&cli.file);
    let mut store = ProjectStore::with_backend(Some(identity), Box::new(backend))?;

    match cli.command {
        Command::List => {
            for project in store.projects() {
                let marker = if project.is_template { " [template]" } else { "" };
                println!(
                    "{}  {}{}  ({} nodes)",
                    project.id,
                    project.name,
                    marker,
                    project.workflow.nodes.len()
                );
            }
        }
        Command::Create { name } => {
            let id = store.create_project(&name, None)?;
            println!("Created {id}");
        }
        Command::Show { project_id } => {
            store.select_project(&project_id);
            let Some(project) = store.current_project() else {
                return Err(StoreError::Persistence(format!(
                    "No project with id '{project_id}'"
                )));
            };
            print_procedure(project);
        }
        Command::Next { project_id } => {
            store.select_project(&project_id);
            store.advance()?;
            print_cursor(&store);
        }
        Command::Back { project_id } => {
            store.select_project(&project_id);
            store.go_back()?;
            print_cursor(&store);
        }
        Command::Choose {
            project_id,
            target_node_id,
        } => {
            store.select_project(&project_id);
            store.choose_branch(&target_node_id)?;
            print_cursor(&store);
        }
        Command::Reset { project_id } => {
            store.select_project(&project_id);
            store.reset_progress()?;
            print_cursor(&store);
        }
    }
    Ok(())
}

fn print_procedure(project: &Project) {
    println!("{} - {}", project.id, project.name);
    for node in &project.workflow.nodes {
        let cursor = if node.id == project.progress.current_node_id {
            ">"
        } else {
            " "
        };
        let done = if project.progress.is_node_complete(node) {
            "x"
        } else {
            " "
        };
        println!("{cursor} [{done}] {}  ({})", node.title, node.id);
        for sub in &node.sub_processes {
            let done = if project.progress.is_step_completed(&sub.id) {
                "x"
            } else {
                " "
            };
            println!("     [{done}] {} {}", sub.id, sub.title);
        }
        for option in &node.decision_options {
            println!("      -> {} ({})", option.label, option.target_node_id);
        }
    }
}

fn print_cursor(store: &ProjectStore) {
    if let Some(project) = store.current_project() {
        println!("Now at: {}", project.progress.current_node_id);
    }
}
