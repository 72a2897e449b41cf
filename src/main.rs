use std::path::PathBuf;
use std::process;

use clap::Parser;

mod app;
mod commands;
mod config;
mod directory;
mod error;
mod models;
mod query;
mod render;
mod storage;
mod store;
mod theme;
mod view;

use models::Priority;
use query::{Filter, SortKey};

const HELP_TEXT: &str = r#"
  Usage
    $ td [<options> ...]

    Options
        none             Display the task list
      --task, -t         Create task
      --edit, -e         Edit task (@id followed by the new text)
      --check, -c        Toggle task completion
      --delete, -d       Delete task
      --clear            Delete all completed tasks
      --find <term>      Search task text
      --filter, -f       Show all, active or completed tasks
      --sort, -s         Order by date-added, due-date, priority, alphabetical
      --priority, -p     Priority for --task/--edit (low, medium, high)
      --due <date>       Due date (YYYY-MM-DD) for --task/--edit
      --time <time>      Due time (HH:MM) for --task/--edit
      --theme            Toggle light/dark theme
      --todolite-dir     Define a custom data directory
      --help, -h         Display help message
      --version, -V      Display installed version

    Examples
      $ td
      $ td --task Buy milk
      $ td --task --priority high --due 2026-04-15 --time 17:00 File taxes
      $ td --check 1 2
      $ td --edit @3 File federal taxes
      $ td --filter active --sort due-date
      $ td --find milk
      $ td --clear
      $ td --theme
"#;

#[derive(Parser)]
#[command(
    name = "td",
    version = env!("CARGO_PKG_VERSION"),
    about = "A due-date-aware to-do list for the command-line habitat",
    after_help = HELP_TEXT
)]
struct Cli {
    /// Input arguments (task text, ids, @id edit target)
    #[arg(trailing_var_arg = true)]
    input: Vec<String>,

    /// Create task
    #[arg(short = 't', long)]
    task: bool,

    /// Edit task (@id followed by the new text)
    #[arg(short = 'e', long)]
    edit: bool,

    /// Toggle task completion
    #[arg(short = 'c', long)]
    check: bool,

    /// Delete task
    #[arg(short = 'd', long)]
    delete: bool,

    /// Delete all completed tasks
    #[arg(long)]
    clear: bool,

    /// Toggle light/dark theme
    #[arg(long)]
    theme: bool,

    /// Which tasks to show
    #[arg(short = 'f', long, value_enum, default_value_t = Filter::All)]
    filter: Filter,

    /// Display order
    #[arg(short = 's', long, value_enum, default_value_t = SortKey::DateAdded)]
    sort: SortKey,

    /// Case-insensitive search term for the task list
    #[arg(long, value_name = "TERM")]
    find: Option<String>,

    /// Priority for --task/--edit
    #[arg(short = 'p', long, value_enum)]
    priority: Option<Priority>,

    /// Due date (YYYY-MM-DD) for --task/--edit
    #[arg(long, value_name = "DATE")]
    due: Option<String>,

    /// Due time (HH:MM) for --task/--edit
    #[arg(long, value_name = "TIME")]
    time: Option<String>,

    /// Define a custom data directory
    #[arg(long = "todolite-dir", value_name = "PATH")]
    todolite_dir: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let result = commands::run(
        cli.input,
        cli.task,
        cli.edit,
        cli.check,
        cli.delete,
        cli.clear,
        cli.theme,
        cli.filter,
        cli.sort,
        cli.find,
        cli.priority,
        cli.due,
        cli.time,
        cli.todolite_dir,
    );

    if let Err(e) = result {
        eprintln!("{}", e);
        process::exit(1);
    }
}
