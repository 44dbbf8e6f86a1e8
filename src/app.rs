use crate::document::Document;
use crate::error::{Result, ViewerError};
use crate::i18n::Lang;
use crate::models::Category;
use crate::source::DataSource;
use crate::view_model::{
    complete_load, fetch_outcome, fetch_status, status_requests, LeaderboardViewModel, LoadOutcome,
    LoadTicket, StatusRequest, StatusUpdate,
};
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

pub const HELP: &str = "\
Commands:
  1-5 | cat <category>   switch ranking (daily_trending, weekly_trending, monthly_trending, top_repos_list, top_users_list)
  n | next               next page
  p | prev               previous page
  size <n>               items per page
  lang <zh|en>           display language
  r | reload             reload current ranking
  h | help               this help
  q | quit               exit";

/// A user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Category(Category),
    PageSize(usize),
    Next,
    Prev,
    Lang(Lang),
    Reload,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace();
        let head = parts.next().unwrap_or("").to_ascii_lowercase();
        let arg = parts.next();

        match (head.as_str(), arg) {
            ("n" | "next", None) => Ok(Self::Next),
            ("p" | "prev", None) => Ok(Self::Prev),
            ("r" | "reload", None) => Ok(Self::Reload),
            ("h" | "help" | "?", None) => Ok(Self::Help),
            ("q" | "quit" | "exit", None) => Ok(Self::Quit),
            ("cat" | "category", Some(c)) => Ok(Self::Category(c.parse()?)),
            ("lang", Some(l)) => Ok(Self::Lang(l.parse()?)),
            ("size", Some(n)) => n
                .parse::<usize>()
                .map(Self::PageSize)
                .map_err(|_| ViewerError::ConfigError(format!("Invalid page size: {n}"))),
            (other, None) if other.parse::<usize>().is_ok() => Ok(Self::Category(other.parse()?)),
            _ => Err(ViewerError::ConfigError(format!(
                "Unknown command: {}. Type `help` for a list of commands",
                s.trim()
            ))),
        }
    }
}

/// Where the viewer draws. The terminal implementation lives in `render`.
pub trait Screen {
    fn draw(&mut self, doc: &Document);

    /// Out-of-band text such as help or an invalid command.
    fn notice(&mut self, text: &str);
}

/// Apply a command to the view-model. Returns the load to start, if any.
pub fn dispatch(vm: &mut LeaderboardViewModel, command: Command) -> Result<Option<LoadTicket>> {
    debug!(?command, "Dispatching command");
    match command {
        Command::Category(category) => Ok(Some(vm.select_category(category))),
        Command::PageSize(n) => vm.set_items_per_page(n).map(|_| None),
        Command::Next => {
            vm.next_page();
            Ok(None)
        }
        Command::Prev => {
            vm.prev_page();
            Ok(None)
        }
        Command::Lang(lang) => Ok(vm.switch_language(lang)),
        Command::Reload => Ok(Some(vm.reload())),
        Command::Help | Command::Quit => Ok(None),
    }
}

/// A finished background read, reported back to the event loop.
#[derive(Debug)]
enum Completion {
    Load(LoadTicket, LoadOutcome),
    Status(LoadTicket, StatusUpdate),
}

fn spawn_load(source: Arc<dyn DataSource>, ticket: LoadTicket, tx: mpsc::UnboundedSender<Completion>) {
    tokio::spawn(async move {
        let outcome = fetch_outcome(source.as_ref(), ticket).await;
        if tx.send(Completion::Load(ticket, outcome)).is_err() {
            debug!(seq = ticket.seq, "Viewer closed before load finished");
        }
    });
}

fn spawn_status(
    source: Arc<dyn DataSource>,
    ticket: LoadTicket,
    request: StatusRequest,
    tx: mpsc::UnboundedSender<Completion>,
) {
    tokio::spawn(async move {
        let update = fetch_status(source.as_ref(), request).await;
        if tx.send(Completion::Status(ticket, update)).is_err() {
            debug!(seq = ticket.seq, "Viewer closed before status read finished");
        }
    });
}

/// Load the configured ranking, draw it once, and return the view-model.
pub async fn run_once<S>(
    mut vm: LeaderboardViewModel,
    source: &S,
    screen: &mut dyn Screen,
) -> LeaderboardViewModel
where
    S: DataSource + ?Sized,
{
    let ticket = vm.reload();
    complete_load(&mut vm, source, ticket).await;
    screen.draw(vm.document());
    vm
}

/// Interactive loop: commands come from `input`, loads run as tasks and
/// report back over a channel. The list is drawn as soon as its category read
/// lands; the status reads follow as their own completions. Ends on `quit`,
/// or once input is exhausted and no read is pending.
pub async fn run<R>(
    mut vm: LeaderboardViewModel,
    source: Arc<dyn DataSource>,
    input: R,
    screen: &mut dyn Screen,
) -> Result<LeaderboardViewModel>
where
    R: AsyncBufRead + Unpin,
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut lines = input.lines();
    let mut input_open = true;
    let mut pending = 0usize;

    let ticket = vm.reload();
    spawn_load(source.clone(), ticket, tx.clone());
    pending += 1;
    screen.draw(vm.document());

    while input_open || pending > 0 {
        tokio::select! {
            line = lines.next_line(), if input_open => {
                let Some(line) = line? else {
                    input_open = false;
                    continue;
                };
                if line.trim().is_empty() {
                    continue;
                }

                let command = match line.parse::<Command>() {
                    Ok(command) => command,
                    Err(e) => {
                        screen.notice(&e.to_string());
                        continue;
                    }
                };
                match command {
                    Command::Quit => break,
                    Command::Help => {
                        screen.notice(HELP);
                        continue;
                    }
                    _ => {}
                }

                match dispatch(&mut vm, command) {
                    Ok(Some(ticket)) => {
                        spawn_load(source.clone(), ticket, tx.clone());
                        pending += 1;
                    }
                    Ok(None) => {}
                    Err(e) => {
                        warn!(error = %e, "Command rejected");
                        screen.notice(&e.to_string());
                        continue;
                    }
                }
                screen.draw(vm.document());
            }
            Some(completion) = rx.recv() => {
                pending = pending.saturating_sub(1);
                match completion {
                    Completion::Load(ticket, outcome) => {
                        let requests = status_requests(&outcome);
                        if vm.apply_load(ticket, outcome) {
                            screen.draw(vm.document());
                            for request in requests {
                                spawn_status(source.clone(), ticket, request, tx.clone());
                                pending += 1;
                            }
                        }
                    }
                    Completion::Status(ticket, update) => {
                        if vm.apply_status(ticket, update) {
                            screen.draw(vm.document());
                        }
                    }
                }
            }
        }
    }

    Ok(vm)
}
