use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

use crate::config::Config;
use crate::controller::Snapshot;

// Width math goes through display columns, not bytes or chars, so
// double-width names line up.
#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> Self {
        Self { color: cfg.color() }
    }

    #[tracing::instrument(skip(self, snapshot))]
    pub fn print_task_list(&self, snapshot: &Snapshot<'_>) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        let title = format!(
            "{} ({})",
            snapshot.strings.get("Todos"),
            snapshot.strings.get(snapshot.filter.label_key())
        );

        let name_width = snapshot
            .visible
            .iter()
            .map(|task| task.name.width())
            .max()
            .unwrap_or(0);
        // position column (3) + space + mark (3) + space
        let rule_width = title.width().max(name_width + 8);

        writeln!(out, "{title}")?;
        writeln!(out, "{}", "─".repeat(rule_width))?;

        if snapshot.visible.is_empty() {
            writeln!(out, "{}", snapshot.strings.get("What needs to be done?"))?;
        }

        for (position, task) in snapshot.visible.iter().enumerate() {
            let mark = if task.completed {
                self.paint("[x]", "32")
            } else {
                "[ ]".to_string()
            };
            writeln!(out, "{:>3} {mark} {}", position + 1, task.name)?;
        }

        writeln!(out, "{}", "─".repeat(rule_width))?;
        writeln!(
            out,
            "{} {}",
            snapshot.active_count,
            snapshot.strings.get("item(s) left")
        )?;

        Ok(())
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if self.color {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }
}
