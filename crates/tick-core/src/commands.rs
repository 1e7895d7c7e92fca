use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

use anyhow::anyhow;
use tracing::{debug, instrument};

use crate::cli::Invocation;
use crate::controller::{Action, AppController};
use crate::filter::FilterMode;
use crate::i18n;
use crate::render::Renderer;
use crate::task::TaskId;

pub fn known_command_names() -> Vec<&'static str> {
    vec![
        "add", "list", "done", "reopen", "edit", "delete", "clear", "lang", "langs", "version",
    ]
}

pub fn expand_command_abbrev<'a>(token: &'a str, known: &[&'a str]) -> Option<&'a str> {
    if known.contains(&token) {
        return Some(token);
    }

    let mut matches = known.iter().copied().filter(|name| name.starts_with(token));
    let first = matches.next()?;
    if matches.next().is_some() {
        None
    } else {
        Some(first)
    }
}

/// Translates one invocation into controller actions and redraws the list
/// when (and only when) the controller signaled a change.
#[instrument(skip(controller, renderer, data_file, inv))]
pub fn dispatch(
    controller: &mut AppController,
    renderer: &Renderer,
    data_file: &Path,
    inv: Invocation,
) -> anyhow::Result<()> {
    let dirty = Rc::new(Cell::new(false));
    let flag = Rc::clone(&dirty);
    controller.set_change_listener(Box::new(move || flag.set(true)));

    controller.apply(Action::Load {
        path: data_file.to_path_buf(),
    });
    // the startup load signals too; only the command's own change should
    // trigger the redraw
    dirty.set(false);

    let command = inv.command.as_str();
    debug!(command, args = ?inv.args, "dispatching command");

    match command {
        "add" => {
            if inv.args.is_empty() {
                return Err(anyhow!("add requires the task text"));
            }
            let name = inv.args.join(" ");
            controller.apply(Action::Add { name });
        }
        "list" => {
            let mode = match inv.args.first() {
                Some(token) => FilterMode::parse(token).ok_or_else(|| {
                    anyhow!("unknown filter: {token} (expected all, active or completed)")
                })?,
                None => FilterMode::All,
            };
            controller.apply(Action::Filter { mode });
        }
        "done" | "reopen" => {
            let id = resolve_position(controller, &inv.args)?;
            controller.apply(Action::Toggle {
                id,
                completed: command == "done",
            });
        }
        "edit" => {
            let id = resolve_position(controller, &inv.args)?;
            if inv.args.len() < 2 {
                return Err(anyhow!("edit requires the new task text"));
            }
            let name = inv.args[1..].join(" ");
            controller.apply(Action::Edit { id, name });
        }
        "delete" => {
            let id = resolve_position(controller, &inv.args)?;
            controller.apply(Action::Delete { id });
        }
        "clear" => controller.apply(Action::ClearCompleted),
        "lang" => {
            let code = inv
                .args
                .first()
                .ok_or_else(|| anyhow!("lang requires a language code"))?;
            controller.apply(Action::Language { code: code.clone() });
        }
        "langs" => {
            for code in i18n::known_codes() {
                println!("{code}");
            }
        }
        "version" => println!("{}", env!("CARGO_PKG_VERSION")),
        other => return Err(anyhow!("unknown command: {other}")),
    }

    if dirty.get() {
        renderer.print_task_list(&controller.snapshot())?;
    }
    Ok(())
}

/// Resolves a 1-based position in the full list (the order `list` shows
/// under the `all` tab) to the task's stable id.
fn resolve_position(controller: &AppController, args: &[String]) -> anyhow::Result<TaskId> {
    let token = args
        .first()
        .ok_or_else(|| anyhow!("a task number is required"))?;
    let position: usize = token
        .parse()
        .map_err(|_| anyhow!("not a task number: {token}"))?;

    let tasks = controller.store().tasks();
    if position == 0 || position > tasks.len() {
        return Err(anyhow!(
            "no task at position {position} (the list has {} task(s))",
            tasks.len()
        ));
    }
    Ok(tasks[position - 1].id)
}
