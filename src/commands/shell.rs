//! Interactive console shell
//!
//! One panel is mounted at a time. Opening another resource drops the current
//! panel, its draft and its notice.

use std::io::Write;
use std::str::FromStr;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::{
    error::{AppError, AppResult},
    models::{EntityId, ResourceKind},
    render,
    services::{PanelControl, Services, Submission},
    theme::{Role, Theme},
};

const HELP: &str = "\
Commands:
  open <resource>       mount the panel for publishers, categories, authors, books, borrows or book-orders
  list                  refetch and show the collection
  new                   open the editor on a new draft
  edit <id>             open the editor on an existing entity
  set <field> <value>   change one draft field (empty value clears it)
  show                  show the panel again
  submit                validate and save the draft
  cancel                close the editor without saving
  delete <id>           delete an entity
  dismiss               clear the error notice
  choices <resource>    list selectable entities for relation fields
  help                  show this text
  quit                  leave the console
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Open(ResourceKind),
    List,
    New,
    Edit(EntityId),
    Set { field: String, value: String },
    Show,
    Submit,
    Cancel,
    Delete(EntityId),
    Dismiss,
    Choices(ResourceKind),
    Help,
    Quit,
}

fn parse_id(arg: &str) -> AppResult<EntityId> {
    arg.trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("'{}' is not an id", arg.trim())))
}

fn required<'a>(arg: Option<&'a str>, usage: &str) -> AppResult<&'a str> {
    match arg.map(str::trim) {
        Some(arg) if !arg.is_empty() => Ok(arg),
        _ => Err(AppError::BadRequest(format!("usage: {}", usage))),
    }
}

impl FromStr for ShellCommand {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, Some(rest.trim_start())),
            None => (line, None),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "open" => ShellCommand::Open(required(rest, "open <resource>")?.parse()?),
            "list" | "ls" => ShellCommand::List,
            "new" => ShellCommand::New,
            "edit" => ShellCommand::Edit(parse_id(required(rest, "edit <id>")?)?),
            "set" => {
                let rest = required(rest, "set <field> <value>")?;
                let (field, value) = match rest.split_once(char::is_whitespace) {
                    Some((field, value)) => (field, value.trim()),
                    None => (rest, ""),
                };
                ShellCommand::Set {
                    field: field.to_string(),
                    value: value.to_string(),
                }
            }
            "show" => ShellCommand::Show,
            "submit" | "save" => ShellCommand::Submit,
            "cancel" => ShellCommand::Cancel,
            "delete" | "rm" => ShellCommand::Delete(parse_id(required(rest, "delete <id>")?)?),
            "dismiss" => ShellCommand::Dismiss,
            "choices" => ShellCommand::Choices(required(rest, "choices <resource>")?.parse()?),
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => return Err(AppError::BadRequest(format!("unknown command '{}', try 'help'", other))),
        };
        Ok(command)
    }
}

/// Whether the shell keeps reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell<W> {
    services: Services,
    theme: Theme,
    panel: Option<Box<dyn PanelControl>>,
    out: W,
}

impl<W: Write> Shell<W> {
    pub fn new(services: Services, theme: Theme, out: W) -> Self {
        Self {
            services,
            theme,
            panel: None,
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Read commands line by line until `quit` or end of input
    pub async fn run<I: AsyncBufRead + Unpin>(&mut self, input: I) -> AppResult<()> {
        let mut lines = input.lines();
        self.prompt()?;
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                self.prompt()?;
                continue;
            }
            let flow = match line.parse::<ShellCommand>() {
                Ok(command) => self.execute(command).await?,
                Err(e) => {
                    self.error(&e)?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                break;
            }
            self.prompt()?;
        }
        Ok(())
    }

    /// Run one command. Command failures are printed, only output errors
    /// propagate.
    pub async fn execute(&mut self, command: ShellCommand) -> AppResult<Flow> {
        match self.dispatch(command).await {
            Ok(flow) => Ok(flow),
            Err(AppError::Io(e)) => Err(AppError::Io(e)),
            Err(e) => {
                self.error(&e)?;
                Ok(Flow::Continue)
            }
        }
    }

    async fn dispatch(&mut self, command: ShellCommand) -> AppResult<Flow> {
        match command {
            ShellCommand::Open(kind) => {
                // Unmount first so the old panel's state is gone before the fetch
                self.panel = None;
                self.panel = Some(self.services.mount(kind).await);
                self.show()?;
            }
            ShellCommand::List => {
                self.panel_mut()?.refresh().await;
                self.show()?;
            }
            ShellCommand::New => {
                self.panel_mut()?.open_new()?;
                self.show_relations().await?;
                self.show()?;
            }
            ShellCommand::Edit(id) => {
                self.panel_mut()?.open_edit(id)?;
                self.show_relations().await?;
                self.show()?;
            }
            ShellCommand::Set { field, value } => {
                self.panel_mut()?.set_field(&field, &value)?;
            }
            ShellCommand::Show => self.show()?,
            ShellCommand::Submit => {
                let panel = self.panel_mut()?;
                let kind = panel.kind();
                let submission = panel.submit().await?;
                match submission {
                    Submission::Saved(id) => {
                        writeln!(self.out, "{}", super::saved_line(kind, id))?;
                    }
                    Submission::Invalid(errors) => {
                        writeln!(
                            self.out,
                            "{}",
                            self.theme
                                .paint(Role::Error, &format!("{} field(s) need attention", errors.len()))
                        )?;
                    }
                    Submission::Failed => {}
                }
                self.show()?;
            }
            ShellCommand::Cancel => {
                self.panel_mut()?.cancel();
                self.show()?;
            }
            ShellCommand::Delete(id) => {
                let panel = self.panel_mut()?;
                let kind = panel.kind();
                let deleted = panel.delete(id).await;
                if deleted {
                    writeln!(self.out, "Deleted {} {}", kind.singular(), id)?;
                }
                self.show()?;
            }
            ShellCommand::Dismiss => {
                self.panel_mut()?.dismiss();
            }
            ShellCommand::Choices(kind) => {
                let choices = self.services.choices(kind).await?;
                write!(self.out, "{}", render::choices(kind.title(), &choices, &self.theme))?;
            }
            ShellCommand::Help => write!(self.out, "{}", HELP)?,
            ShellCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn panel_mut(&mut self) -> AppResult<&mut Box<dyn PanelControl>> {
        self.panel
            .as_mut()
            .ok_or_else(|| AppError::BadRequest("open a resource first".to_string()))
    }

    fn show(&mut self) -> AppResult<()> {
        if let Some(panel) = &self.panel {
            write!(self.out, "{}", render::panel(&panel.view(), &self.theme))?;
        }
        Ok(())
    }

    /// List options for every relation the open editor can pick from
    async fn show_relations(&mut self) -> AppResult<()> {
        let relations = match &self.panel {
            Some(panel) => panel.relations(),
            None => return Ok(()),
        };
        for kind in relations {
            match self.services.choices(kind).await {
                Ok(choices) => write!(self.out, "{}", render::choices(kind.title(), &choices, &self.theme))?,
                Err(e) => {
                    tracing::warn!("Could not load {} choices: {}", kind, e);
                    writeln!(
                        self.out,
                        "{}",
                        self.theme.paint(Role::Error, &e.notice(&format!("Error fetching {}", kind.plural())))
                    )?;
                }
            }
        }
        Ok(())
    }

    fn prompt(&mut self) -> AppResult<()> {
        let name = self.panel.as_ref().map(|p| p.kind().plural()).unwrap_or("console");
        write!(self.out, "{}> ", name)?;
        self.out.flush()?;
        Ok(())
    }

    fn error(&mut self, error: &AppError) -> AppResult<()> {
        writeln!(self.out, "{}", self.theme.paint(Role::Error, &error.to_string()))?;
        Ok(())
    }
}
