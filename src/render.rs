//! Text rendering of panel snapshots

use std::fmt::Write;

use crate::{
    models::FieldKind,
    services::{Choice, EditorView, PanelView},
    theme::{Role, Theme},
};

/// Render the list, the open editor (if any) and the notice (if any)
pub fn panel(view: &PanelView, theme: &Theme) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", theme.paint(Role::Title, view.kind.title()));

    let mut header = vec!["Id"];
    header.extend_from_slice(view.columns);
    let rows: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|(id, cells)| {
            let mut row = vec![id.to_string()];
            row.extend(cells.iter().cloned());
            row
        })
        .collect();
    out.push_str(&table(&header, &rows, theme));

    if view.rows.is_empty() {
        let _ = writeln!(out, "{}", theme.paint(Role::Muted, &format!("No {} yet.", view.kind.plural())));
    }

    if let Some(editor) = &view.editor {
        out.push('\n');
        out.push_str(&self::editor(editor, theme));
    }

    if let Some(notice) = &view.notice {
        out.push('\n');
        let _ = writeln!(out, "{}", theme.paint(Role::Error, &format!("! {}", notice)));
    }

    out
}

/// Render the draft fields with their validation messages
pub fn editor(view: &EditorView, theme: &Theme) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", theme.paint(Role::Title, &view.title));
    let width = view.fields.iter().map(|(f, _)| f.name.len()).max().unwrap_or(0);

    for (field, value) in &view.fields {
        let hint = match field.kind {
            FieldKind::Reference(kind) => format!("  ({}, {} id)", field.label, kind.singular()),
            FieldKind::ReferenceList(kind) => {
                format!("  ({}, {} ids separated by commas)", field.label, kind.singular())
            }
            FieldKind::Date => format!("  ({}, YYYY-MM-DD)", field.label),
            FieldKind::Text | FieldKind::Number => format!("  ({})", field.label),
        };
        let _ = writeln!(
            out,
            "  {:<width$}  {}{}",
            field.name,
            value,
            theme.paint(Role::Muted, &hint),
            width = width
        );
        if let Some(message) = view.errors.get(field.name) {
            let _ = writeln!(out, "  {:<width$}  {}", "", theme.paint(Role::Error, message), width = width);
        }
    }
    out
}

/// Render relation options
pub fn choices(title: &str, choices: &[Choice], theme: &Theme) -> String {
    let rows: Vec<Vec<String>> = choices
        .iter()
        .map(|c| vec![c.id.to_string(), c.label.clone()])
        .collect();
    format!("{}\n{}", theme.paint(Role::Title, title), table(&["Id", "Name"], &rows, theme))
}

/// Left-aligned columns separated by two spaces
fn table(header: &[&str], rows: &[Vec<String>], theme: &Theme) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", theme.paint(Role::Header, &line(header, &widths)));
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        let _ = writeln!(out, "{}", line(&cells, &widths));
    }
    out
}

fn line(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
