//! Terminal rendering for weekboard types.
//!
//! Extension traits that add colored output to weekboard-core types using
//! owo_colors.

use owo_colors::OwoColorize;

use weekboard_core::{DayNote, NoteDate, Task, TaskFormat, WeekView};

/// Extension trait for terminal rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Task {
    fn render(&self) -> String {
        let marker = match (self.format, self.completed) {
            (TaskFormat::Checkbox, true) => "[x]".green().to_string(),
            (TaskFormat::Checkbox, false) => "[ ]".to_string(),
            (TaskFormat::Plain, _) => " - ".to_string(),
        };

        let text = if self.completed {
            self.text.strikethrough().dimmed().to_string()
        } else {
            self.text.clone()
        };

        format!("{marker} {text}")
    }
}

/// One day as a block: numbered tasks under a weekday header.
impl Render for DayNote {
    fn render(&self) -> String {
        let mut lines = vec![day_header(self.date)];

        if self.tasks.is_empty() {
            lines.push(format!("   {}", "(no tasks)".dimmed()));
        } else {
            for (i, task) in self.tasks.iter().enumerate() {
                lines.push(format!("   {} {}", format!("{i}.").dimmed(), task.render()));
            }
        }

        lines.join("\n")
    }
}

impl Render for WeekView {
    fn render(&self) -> String {
        let blocks: Vec<String> = self.days.iter().map(|day| day.render()).collect();
        blocks.join("\n\n")
    }
}

fn day_header(date: NoteDate) -> String {
    let weekday = date.naive().format("%A");
    let header = format!("{weekday} {date}");

    if date == NoteDate::today() {
        format!("📅 {}", header.bold().cyan())
    } else {
        format!("📅 {header}")
    }
}
