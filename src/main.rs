use {
  action::Action,
  anyhow::Context,
  app::App,
  arguments::Arguments,
  clap::Parser,
  client::Client,
  command::Command,
  command_dispatch::CommandDispatch,
  crossterm::{
    event as crossterm_event,
    event::{
      Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    },
    execute,
    style::Stylize,
    terminal::{
      EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
      enable_raw_mode,
    },
  },
  effect::Effect,
  event::Event,
  help_view::HelpView,
  list_view::ListView,
  pending_search::PendingSearch,
  ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
  },
  reqwest::Url,
  search_input::{InputKind, SearchInput},
  search_response::SearchResponse,
  serde::{
    Deserialize, Deserializer,
    de::{self, Unexpected},
  },
  serde_json::Value,
  state::State,
  std::{
    backtrace::BacktraceStatus,
    collections::{BTreeMap, HashSet},
    env, fs,
    io::{self, IsTerminal, Stdout},
    path::{Path, PathBuf},
    process,
    sync::Mutex,
    time::{Duration, Instant},
  },
  storage::Storage,
  stories::Stories,
  story::Story,
  tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
  },
  transient_message::TransientMessage,
  utils::{
    deserialize_count, deserialize_escaped_text, deserialize_id,
    deserialize_text, format_comments, format_points, host, truncate,
  },
};

mod action;
mod app;
mod arguments;
mod client;
mod command;
mod command_dispatch;
mod effect;
mod event;
mod help_view;
mod list_view;
mod logging;
mod pending_search;
mod search_input;
mod search_response;
mod state;
mod storage;
mod stories;
mod story;
mod transient_message;
mod utils;

const TITLE: &str = "My Hacker Stories";

const LIST_STATUS: &str = "↑/k up • ↓/j down • / search • f filter • x dismiss • o open • r reload • q quit • ? help";

const HELP_TITLE: &str = "Help";
const HELP_STATUS: &str = "Press ? or esc to close help";

const LOADING_STATUS: &str = "Loading ...";
const ERROR_STATUS: &str = "Something went wrong ...";

const BASE_INDENT: &str = " ";

const HELP_TEXT: &str = "\
Navigation:
  ↑ / k   move selection up
  ↓ / j   move selection down
  pg↓     page down
  pg↑     page up
  ctrl+d  page down
  ctrl+u  page up
  home    jump to first story
  end     jump to last story

Actions:
  /       edit the search term (enter to search, esc to cancel)
  f       filter stories by title as you type (esc to undo)
  x / d   dismiss the selected story
  enter   open the selected story in your browser
  o       open the selected story in your browser
  r       run the current search again
  q       quit
  esc     close help or quit from the list
  ?       toggle this help
";

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

fn initialize_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
  enable_raw_mode()?;

  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen)?;

  Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(
  terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result {
  disable_raw_mode()?;

  execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

  terminal.show_cursor()?;

  Ok(())
}

async fn run() -> Result {
  let arguments = Arguments::parse();

  logging::init(arguments.log_file.as_deref())?;

  let client = Client::new(&arguments.api_url)?;

  let storage = Storage::load(arguments.storage_file.clone())
    .context("could not load local storage")?;

  let search_term = arguments.initial_search_term(&storage);

  tracing::info!(search_term, api_url = arguments.api_url, "starting");

  let mut terminal = initialize_terminal()?;

  let mut app = App::new(client, State::new(storage, search_term));

  let result = app.run(&mut terminal);

  restore_terminal(&mut terminal)?;

  result
}

#[tokio::main]
async fn main() {
  if let Err(error) = run().await {
    let use_color = io::stderr().is_terminal();

    if use_color {
      eprintln!("{} {error}", "error:".bold().red());
    } else {
      eprintln!("error: {error}");
    }

    for (i, error) in error.chain().skip(1).enumerate() {
      if i == 0 {
        eprintln!();

        if use_color {
          eprintln!("{}", "because:".bold().red());
        } else {
          eprintln!("because:");
        }
      }

      if use_color {
        eprintln!("{} {error}", "-".bold().red());
      } else {
        eprintln!("- {error}");
      }
    }

    let backtrace = error.backtrace();

    if backtrace.status() == BacktraceStatus::Captured {
      if use_color {
        eprintln!("{}", "backtrace:".bold().red());
      } else {
        eprintln!("backtrace:");
      }

      eprintln!("{backtrace}");
    }

    process::exit(1);
  }
}
