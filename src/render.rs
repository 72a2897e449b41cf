use chrono::NaiveDateTime;
use colored::Colorize;

use crate::config::Config;
use crate::models::{Priority, Task};
use crate::query::{Filter, Stats};
use crate::theme::Theme;
use crate::view::{self, DueStatus};

pub struct Render {
    config: Config,
}

impl Render {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn build_prefix(&self, task: &Task) -> String {
        let id_str = task.id.to_string();
        let padding = " ".repeat(4usize.saturating_sub(id_str.len()));
        format!("{}{}", padding, format!("{}.", task.id).dimmed())
    }

    fn get_icon(&self, task: &Task) -> String {
        if task.completed {
            "✔".green().to_string()
        } else {
            "☐".magenta().to_string()
        }
    }

    fn build_message(&self, task: &Task) -> String {
        if task.completed {
            return task.text.dimmed().to_string();
        }

        match task.priority {
            Priority::High => format!("{} {}", task.text.red().underline(), "(!!)".red()),
            Priority::Medium => task.text.to_string(),
            Priority::Low => format!("{} {}", task.text, "(low)".dimmed()),
        }
    }

    fn build_due(&self, task: &Task, now: NaiveDateTime) -> String {
        let date = match task.due_date {
            Some(d) => d,
            None => return String::new(),
        };

        let mut label = format!("due {}", view::format_date(date, now.date()));
        if let Some(time) = task.due_time {
            label.push_str(&format!(" at {}", view::format_time(time)));
        }

        match view::due_status(task, now) {
            Some(DueStatus::Overdue) => label.red().to_string(),
            Some(DueStatus::DueSoon) => label.yellow().to_string(),
            _ => label.dimmed().to_string(),
        }
    }

    fn display_title(&self, filter: Filter, shown: usize, stats: &Stats) {
        let title = match filter {
            Filter::All => "All tasks",
            Filter::Active => "Active tasks",
            Filter::Completed => "Completed tasks",
        };
        let correlation = format!("[{}/{}]", shown, stats.total).dimmed();
        println!("\n {} {}", title.underline(), correlation);
    }

    fn display_empty_state(&self, filter: Filter) {
        let (title, subtitle) = view::empty_state(filter);
        println!("\n  {}", title.underline());
        println!("  {}", subtitle.dimmed());
    }

    /// Render the projected task list. `now` anchors due-date emphasis and
    /// the Today/Tomorrow labels.
    pub fn display_tasks(
        &self,
        projection: &[&Task],
        filter: Filter,
        stats: &Stats,
        now: NaiveDateTime,
    ) {
        if projection.is_empty() {
            self.display_empty_state(filter);
            return;
        }

        self.display_title(filter, projection.len(), stats);

        for task in projection {
            let prefix = self.build_prefix(task);
            let icon = self.get_icon(task);
            let message = self.build_message(task);
            let due = self.build_due(task, now);

            if due.is_empty() {
                println!("{} {} {}", prefix, icon, message);
            } else {
                println!("{} {} {} {}", prefix, icon, message, due);
            }
        }
    }

    pub fn display_stats(&self, stats: &Stats) {
        if !self.config.display_stats {
            return;
        }

        let word = if stats.active == 1 { "item" } else { "items" };
        println!(
            "\n  {} {}",
            stats.active.to_string().magenta(),
            format!("{} left", word).dimmed()
        );
        println!(
            "  {} {} {} {} {} {} {} {}\n",
            stats.completed.to_string().green(),
            "done".dimmed(),
            "·".dimmed(),
            stats.active.to_string().magenta(),
            "active".dimmed(),
            "·".dimmed(),
            stats.total.to_string().blue(),
            "total".dimmed(),
        );
    }

    pub fn invalid_custom_app_dir(&self, path: &str) {
        eprintln!(
            "\n {} Custom data directory was not found on your system: {}",
            "✖".red(),
            path.red()
        );
    }

    pub fn invalid_id(&self, id: u64) {
        eprintln!(
            "\n {} Unable to find task with id: {}",
            "✖".red(),
            id.to_string().dimmed()
        );
    }

    pub fn invalid_ids_number(&self) {
        eprintln!("\n {} More than one id was given as input", "✖".red());
    }

    pub fn invalid_due_date(&self, raw: &str) {
        eprintln!(
            "\n {} Could not parse due date {} (expected YYYY-MM-DD); task saved without one",
            "✖".yellow(),
            raw.dimmed()
        );
    }

    pub fn invalid_due_time(&self, raw: &str) {
        eprintln!(
            "\n {} Could not parse due time {} (expected HH:MM); task saved without one",
            "✖".yellow(),
            raw.dimmed()
        );
    }

    pub fn missing_id(&self) {
        eprintln!("\n {} No id was given as input", "✖".red());
    }

    pub fn missing_text(&self) {
        eprintln!("\n {} No task text was given as input", "✖".red());
    }

    pub fn success_create(&self, id: u64) {
        println!(
            "\n {} Created task: {}",
            "✔".green(),
            id.to_string().dimmed()
        );
    }

    pub fn success_edit(&self, id: u64) {
        println!(
            "\n {} Updated task: {}",
            "✔".green(),
            id.to_string().dimmed()
        );
    }

    pub fn success_toggle(&self, checked: &[u64], unchecked: &[u64]) {
        if !checked.is_empty() {
            let ids_str = join_ids(checked);
            let word = if checked.len() > 1 { "tasks" } else { "task" };
            println!("\n {} Checked {}: {}", "✔".green(), word, ids_str.dimmed());
        }
        if !unchecked.is_empty() {
            let ids_str = join_ids(unchecked);
            let word = if unchecked.len() > 1 { "tasks" } else { "task" };
            println!(
                "\n {} Unchecked {}: {}",
                "✔".green(),
                word,
                ids_str.dimmed()
            );
        }
    }

    pub fn success_delete(&self, ids: &[u64]) {
        if ids.is_empty() {
            return;
        }
        let ids_str = join_ids(ids);
        let word = if ids.len() > 1 { "tasks" } else { "task" };
        println!("\n {} Deleted {}: {}", "✔".green(), word, ids_str.dimmed());
    }

    pub fn success_clear(&self, count: usize) {
        if count == 0 {
            println!("\n {} No completed tasks to clear", "✔".green());
            return;
        }
        let word = if count > 1 { "tasks" } else { "task" };
        println!(
            "\n {} Cleared {} completed {}",
            "✔".green(),
            count.to_string().dimmed(),
            word
        );
    }

    pub fn success_theme(&self, theme: Theme) {
        let label = match theme {
            Theme::Light => theme.label().yellow(),
            Theme::Dark => theme.label().blue(),
        };
        println!("\n {} Switched to {} theme", "✔".green(), label);
    }
}

fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
