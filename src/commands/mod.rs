//! Console commands
//!
//! One-shot commands mount a panel, drive it through a single flow and report
//! whether the flow succeeded. The interactive shell lives in [`shell`].

pub mod shell;

use std::io::Write;

use crate::{
    error::{AppError, AppResult},
    models::{EntityId, ResourceKind},
    render,
    services::{PanelControl, Services, Submission},
    theme::{Role, Theme},
};

pub use shell::{Flow, Shell, ShellCommand};

/// Parse a `field=value` assignment
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => Ok((field.trim().to_string(), value.to_string())),
        _ => Err(format!("expected field=value, got '{}'", raw)),
    }
}

/// Confirmation line for an accepted write
pub(crate) fn saved_line(kind: ResourceKind, id: Option<EntityId>) -> String {
    match id {
        Some(id) => format!("Saved {} {}", kind.singular(), id),
        None => format!("Saved {}", kind.singular()),
    }
}

/// Print the collection
pub async fn list<W: Write>(services: &Services, kind: ResourceKind, theme: &Theme, out: &mut W) -> AppResult<bool> {
    let panel = services.mount(kind).await;
    let view = panel.view();
    write!(out, "{}", render::panel(&view, theme))?;
    Ok(view.notice.is_none())
}

/// Create one entity from field assignments
pub async fn create<W: Write>(
    services: &Services,
    kind: ResourceKind,
    assignments: &[(String, String)],
    theme: &Theme,
    out: &mut W,
) -> AppResult<bool> {
    let mut panel = services.mount(kind).await;
    panel.open_new()?;
    submit_with(panel.as_mut(), assignments, theme, out).await
}

/// Update one entity from field assignments
pub async fn update<W: Write>(
    services: &Services,
    kind: ResourceKind,
    id: EntityId,
    assignments: &[(String, String)],
    theme: &Theme,
    out: &mut W,
) -> AppResult<bool> {
    let mut panel = services.mount(kind).await;
    if let Some(notice) = panel.view().notice {
        writeln!(out, "{}", theme.paint(Role::Error, &notice))?;
        return Ok(false);
    }
    panel.open_edit(id)?;
    submit_with(panel.as_mut(), assignments, theme, out).await
}

/// Delete one entity
pub async fn delete<W: Write>(
    services: &Services,
    kind: ResourceKind,
    id: EntityId,
    theme: &Theme,
    out: &mut W,
) -> AppResult<bool> {
    let mut panel = services.mount(kind).await;
    panel.dismiss();
    let deleted = panel.delete(id).await;
    write!(out, "{}", render::panel(&panel.view(), theme))?;
    Ok(deleted)
}

/// Print the options available for relation fields pointing at `kind`
pub async fn choices<W: Write>(services: &Services, kind: ResourceKind, theme: &Theme, out: &mut W) -> AppResult<bool> {
    let choices = services.choices(kind).await?;
    write!(out, "{}", render::choices(kind.title(), &choices, theme))?;
    Ok(true)
}

async fn submit_with<W: Write>(
    panel: &mut dyn PanelControl,
    assignments: &[(String, String)],
    theme: &Theme,
    out: &mut W,
) -> AppResult<bool> {
    for (field, value) in assignments {
        panel.set_field(field, value)?;
    }

    match panel.submit().await? {
        Submission::Saved(id) => {
            writeln!(out, "{}", saved_line(panel.kind(), id))?;
            write!(out, "{}", render::panel(&panel.view(), theme))?;
            Ok(true)
        }
        Submission::Invalid(errors) => {
            if let Some(editor) = panel.view().editor {
                write!(out, "{}", render::editor(&editor, theme))?;
            }
            Err(AppError::Validation(errors))
        }
        Submission::Failed => {
            let notice = panel.view().notice.unwrap_or_default();
            writeln!(out, "{}", theme.paint(Role::Error, &notice))?;
            Ok(false)
        }
    }
}
