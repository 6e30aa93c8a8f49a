//! The `sheetmark interactive` command.
//!
//! Reads one command per line from stdin and drives a [`Session`]. Every
//! change rescoring happens inside the session; this module only parses
//! lines and prints what changed. Rejected input is reported as a
//! `Notice:` line and the loop carries on.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use sheetmark_core::clipboard::{copy_to_clipboard, Clipboard, StatusLabel};
use sheetmark_core::config::{load_config_from, SheetmarkConfig};
use sheetmark_core::session::Session;
use sheetmark_core::sheet::{Group, Mode, SheetConfig};
use sheetmark_core::SheetError;

const HELP: &str = "\
Commands:
  config <questions> <option-type> <options> [plain|keyed]
                         build a new sheet (discards all selections)
  pick <q> <label>       select your answer for question q
  key <q> <label>        select the correct answer for question q
  unpick <q>             clear your answer for question q
  unkey <q>              clear the correct answer for question q
  show                   print the score report
  sheet                  print the sheet with current marks
  copy                   copy the score report to the clipboard
  status                 print the copy button label
  help                   show this help
  quit                   leave";

/// One parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Config {
        questions: String,
        option_type: String,
        options: String,
        mode: Option<String>,
    },
    Pick { group: Group, ordinal: usize, label: String },
    Clear { group: Group, ordinal: usize },
    Show,
    Sheet,
    Copy,
    Status,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&verb, args)) = words.split_first() else {
        return Ok(None);
    };

    let ordinal = |raw: &str| -> Result<usize, String> {
        raw.parse()
            .map_err(|_| format!("'{raw}' is not a question number"))
    };
    let group_for = |verb: &str| match verb {
        "key" | "unkey" => Group::Key,
        _ => Group::User,
    };

    let command = match (verb, args) {
        ("config", [q, t, o]) | ("config", [q, t, o, _]) => Command::Config {
            questions: q.to_string(),
            option_type: t.to_string(),
            options: o.to_string(),
            mode: args.get(3).map(|m| m.to_string()),
        },
        ("config", _) => {
            return Err("usage: config <questions> <option-type> <options> [plain|keyed]".into())
        }
        ("pick" | "key", [q, label]) => Command::Pick {
            group: group_for(verb),
            ordinal: ordinal(*q)?,
            label: label.to_string(),
        },
        ("pick" | "key", _) => return Err(format!("usage: {verb} <q> <label>")),
        ("unpick" | "unkey", [q]) => Command::Clear {
            group: group_for(verb),
            ordinal: ordinal(*q)?,
        },
        ("unpick" | "unkey", _) => return Err(format!("usage: {verb} <q>")),
        ("show", []) => Command::Show,
        ("sheet", []) => Command::Sheet,
        ("copy", []) => Command::Copy,
        ("status", []) => Command::Status,
        ("help", []) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        _ => return Err(format!("unknown command '{line}'; type `help` for commands")),
    };
    Ok(Some(command))
}

/// Interactive state: the session plus the copy button.
struct Repl {
    session: Session,
    default_mode: Mode,
    clipboard: Result<Box<dyn Clipboard>, SheetError>,
    status: StatusLabel,
}

impl Repl {
    fn new(config: &SheetmarkConfig, clipboard: Result<Box<dyn Clipboard>, SheetError>) -> Self {
        Self {
            session: Session::new(),
            default_mode: config.mode,
            clipboard,
            status: StatusLabel::new("Copy", config.copied_notice()),
        }
    }

    /// Handle one line. Returns `None` when the user asked to quit.
    async fn handle(&mut self, line: &str) -> Option<String> {
        let command = match parse_command(line) {
            Ok(Some(c)) => c,
            Ok(None) => return Some(String::new()),
            Err(msg) => return Some(notice(msg)),
        };

        let out = match command {
            Command::Quit => return None,
            Command::Help => HELP.to_string(),
            Command::Config {
                questions,
                option_type,
                options,
                mode,
            } => self.configure(&questions, &option_type, &options, mode.as_deref()),
            Command::Pick {
                group,
                ordinal,
                label,
            } => match self.check_event(group) {
                Some(msg) => notice(msg),
                None if self.session.select_label(group, ordinal, &label) => {
                    self.changed(ordinal)
                }
                None => notice(format!("question {ordinal} has no option '{label}'")),
            },
            Command::Clear { group, ordinal } => match self.check_event(group) {
                Some(msg) => notice(msg),
                None if self.session.clear(group, ordinal) => self.changed(ordinal),
                None => notice(format!("there is no question {ordinal}")),
            },
            Command::Show => self.session.copy_text().trim_end().to_string(),
            Command::Sheet => self.session.render_sheet().trim_end().to_string(),
            Command::Copy => self.copy().await,
            Command::Status => self.status.text_at(Instant::now()).to_string(),
        };
        Some(out)
    }

    fn configure(
        &mut self,
        questions: &str,
        option_type: &str,
        options: &str,
        mode: Option<&str>,
    ) -> String {
        let mode = match mode.map(str::parse::<Mode>).transpose() {
            Ok(m) => m.unwrap_or(self.default_mode),
            Err(e) => return notice(e),
        };
        let config = match SheetConfig::parse(questions, option_type, options, mode) {
            Ok(c) => c,
            Err(e) => return notice(e),
        };
        match self.session.submit(config) {
            Ok(_) => format!(
                "New sheet: {} questions x {} options ({}, {})",
                config.question_count, config.option_count, config.scheme, config.mode
            ),
            Err(e) => notice(e),
        }
    }

    /// Reason an event for `group` cannot apply to the live sheet, if any.
    fn check_event(&self, group: Group) -> Option<String> {
        match self.session.sheet() {
            None => Some("no sheet yet; use `config` first".into()),
            Some(sheet) if sheet.tree(group).is_none() => {
                Some("the sheet is in plain mode and has no answer key".into())
            }
            Some(_) => None,
        }
    }

    /// Report line for `ordinal`, followed by the score in keyed mode.
    fn changed(&self, ordinal: usize) -> String {
        let report = self.session.report();
        let line = report
            .questions
            .iter()
            .find(|q| q.ordinal == ordinal)
            .map(|q| q.display_line.clone())
            .unwrap_or_default();
        match report.mode {
            Mode::Keyed => format!("{line}\n{}", report.score_line()),
            Mode::Plain => line,
        }
    }

    async fn copy(&mut self) -> String {
        let clipboard = match &self.clipboard {
            Ok(c) => c.as_ref(),
            Err(e) => return notice(e),
        };
        let text = self.session.copy_text();
        match copy_to_clipboard(clipboard, &text, &mut self.status).await {
            Ok(()) => self.status.text_at(Instant::now()).to_string(),
            Err(e) => notice(e),
        }
    }
}

fn notice(msg: impl std::fmt::Display) -> String {
    format!("Notice: {msg}")
}

pub async fn execute(clipboard_command: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let clipboard = super::clipboard_for(&config, clipboard_command.as_deref())
        .map(|c| Box::new(c) as Box<dyn Clipboard>);
    let mut repl = Repl::new(&config, clipboard);

    println!("sheetmark interactive mode. Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match repl.handle(&line).await {
            Some(out) if out.is_empty() => {}
            Some(out) => println!("{out}"),
            None => break,
        }
    }

    Ok(())
}
