use std::path::PathBuf;

use crate::app::TodoApp;
use crate::error::Result;
use crate::models::Priority;
use crate::query::{Filter, SortKey};

fn parse_ids(input: &[String]) -> Vec<u64> {
    input.iter().filter_map(|s| s.parse().ok()).collect()
}

/// Execute CLI commands
pub fn run(
    input: Vec<String>,
    task: bool,
    edit: bool,
    check: bool,
    delete: bool,
    clear: bool,
    theme: bool,
    filter: Filter,
    sort: SortKey,
    find: Option<String>,
    priority: Option<Priority>,
    due: Option<String>,
    time: Option<String>,
    data_dir: Option<PathBuf>,
) -> Result<()> {
    let mut app = TodoApp::new(data_dir.as_deref())?;

    if task {
        return app.add_task(
            &input,
            priority.unwrap_or_default(),
            due.as_deref(),
            time.as_deref(),
        );
    }

    if edit {
        return app.edit_task(&input, priority, due.as_deref(), time.as_deref());
    }

    if check {
        return app.toggle_tasks(&parse_ids(&input));
    }

    if delete {
        return app.delete_tasks(&parse_ids(&input));
    }

    if clear {
        return app.clear_completed();
    }

    if theme {
        return app.toggle_theme();
    }

    // Default: display the projected list for the current view state.
    app.display(filter, sort, find.as_deref().unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ids_skips_garbage() {
        let input: Vec<String> = vec!["3".into(), "x".into(), "7".into()];
        assert_eq!(parse_ids(&input), vec![3, 7]);
    }
}
