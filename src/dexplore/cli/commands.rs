//! # CLI Layer
//!
//! One possible UI client for dexplore. This is the only place that knows about
//! terminal I/O, logging setup and exit codes.
//!
//! - `run()`: parses arguments, installs logging, dispatches
//! - `handle_*()`: per-command handlers that call `DexApi` and print the result
//! - `run_shell()`: the interactive loop, one `DexApi` (and so one cache and one page
//!   cursor) for the whole session

use super::render::print_result;
use super::setup::{Cli, Commands, FavAction, TeamAction};
use clap::Parser;
use dexplore::api::DexApi;
use dexplore::error::{DexError, Result};
use dexplore::filter::FilterCriteria;
use dexplore::init::initialize;
use dexplore::model::EffortStat;
use dexplore::provider::http::HttpProvider;
use dexplore::store::fs::FileStore;
use std::io::{BufRead, Write};
use tracing_subscriber::EnvFilter;

type Api = DexApi<HttpProvider, FileStore>;

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut api = initialize()?.api;

    match cli.command {
        Some(Commands::List { page }) => handle_list(&mut api, page).await,
        Some(Commands::Search { query }) => handle_search(&mut api, &query).await,
        Some(Commands::Filter {
            types,
            ability,
            move_name,
            ev,
            page,
        }) => {
            let criteria = build_criteria(&types, ability.as_deref(), move_name.as_deref(), ev.as_deref())?;
            handle_filter(&mut api, criteria, page).await
        }
        Some(Commands::Show { query }) => handle_show(&mut api, &query).await,
        Some(Commands::Types) => handle_types(&mut api).await,
        Some(Commands::Fav { action }) => handle_fav(&mut api, action).await,
        Some(Commands::Team { action }) => handle_team(&mut api, action).await,
        Some(Commands::Shell) => run_shell(&mut api).await,
        Some(Commands::Config) => handle_config(&api),
        None => handle_list(&mut api, 1).await,
    }
}

/// Logs go to stderr. `warn` by default, `debug` with `-v`; `RUST_LOG` wins when set.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "dexplore=debug" } else { "dexplore=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn build_criteria(
    types: &[String],
    ability: Option<&str>,
    move_name: Option<&str>,
    ev: Option<&str>,
) -> Result<FilterCriteria> {
    let mut criteria = types
        .iter()
        .fold(FilterCriteria::new(), |c, t| c.with_category(t));
    if let Some(ability) = ability {
        criteria = criteria.with_ability(ability);
    }
    if let Some(move_name) = move_name {
        criteria = criteria.with_move(move_name);
    }
    if let Some(stat) = ev {
        criteria = criteria.with_effort_stat(stat.parse::<EffortStat>()?);
    }
    criteria.validate()?;
    Ok(criteria)
}

async fn handle_list(api: &mut Api, page: u32) -> Result<()> {
    let result = api.browse(page).await?;
    print_result(&result);
    Ok(())
}

async fn handle_search(api: &mut Api, query: &str) -> Result<()> {
    let result = api.search(query).await?;
    print_result(&result);
    Ok(())
}

async fn handle_filter(api: &mut Api, criteria: FilterCriteria, page: u32) -> Result<()> {
    let result = api.filter(criteria, page).await?;
    print_result(&result);
    Ok(())
}

async fn handle_show(api: &mut Api, query: &str) -> Result<()> {
    let result = api.show(query).await?;
    print_result(&result);
    Ok(())
}

async fn handle_types(api: &mut Api) -> Result<()> {
    let result = api.categories().await?;
    print_result(&result);
    Ok(())
}

async fn handle_fav(api: &mut Api, action: Option<FavAction>) -> Result<()> {
    let result = match action {
        None => api.favorites().await?,
        Some(FavAction::Toggle { query }) => api.toggle_favorite(&query).await?,
        Some(FavAction::Rm { query }) => api.remove_favorite(&query).await?,
        Some(FavAction::Clear) => api.clear_favorites().await?,
    };
    print_result(&result);
    Ok(())
}

async fn handle_team(api: &mut Api, action: Option<TeamAction>) -> Result<()> {
    let result = match action {
        None => api.team().await?,
        Some(TeamAction::Add { query }) => api.add_to_team(&query).await?,
        Some(TeamAction::Rm { slot }) => api.remove_from_team(slot).await?,
        Some(TeamAction::Clear) => api.clear_team().await?,
    };
    print_result(&result);
    Ok(())
}

fn handle_config(api: &Api) -> Result<()> {
    let result = api.config()?;
    print_result(&result);
    Ok(())
}

/// One line of shell input.
#[derive(Debug, PartialEq, Eq)]
enum ShellCommand {
    Next,
    Prev,
    Page(u32),
    Search(String),
    Filter(FilterCriteria),
    Clear,
    Show(String),
    Fav(Option<String>),
    Team(Option<String>),
    Types,
    Help,
    Quit,
    Nothing,
}

const SHELL_HELP: &str = "\
  n | next              next page
  p | prev              previous page
  page N                jump to page N of the current list
  search NAME           exact lookup
  filter KEY=VALUE ...  type=T (twice at most), ability=A, move=M, ev=STAT
  clear                 back to the full listing
  show NAME             detail view
  fav [NAME]            toggle a favorite, or list favorites
  team [NAME]           add to the team, or show it
  types                 list types
  q | quit              leave";

fn parse_shell_line(line: &str) -> Result<ShellCommand> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let argument = || {
        if rest.is_empty() {
            Err(DexError::InvalidInput(format!("'{}' needs an argument", word)))
        } else {
            Ok(rest.to_string())
        }
    };
    let optional = || (!rest.is_empty()).then(|| rest.to_string());

    Ok(match word {
        "" => ShellCommand::Nothing,
        "n" | "next" => ShellCommand::Next,
        "p" | "prev" => ShellCommand::Prev,
        "page" => ShellCommand::Page(
            rest.parse()
                .map_err(|_| DexError::InvalidInput(format!("not a page number: '{}'", rest)))?,
        ),
        "search" | "s" => ShellCommand::Search(argument()?),
        "filter" | "f" => ShellCommand::Filter(parse_filter_args(rest)?),
        "clear" => ShellCommand::Clear,
        "show" => ShellCommand::Show(argument()?),
        "fav" => ShellCommand::Fav(optional()),
        "team" => ShellCommand::Team(optional()),
        "types" => ShellCommand::Types,
        "help" | "?" => ShellCommand::Help,
        "q" | "quit" | "exit" => ShellCommand::Quit,
        other => {
            return Err(DexError::InvalidInput(format!(
                "unknown command '{}' (try 'help')",
                other
            )))
        }
    })
}

/// Unreadable input (such as invalid UTF-8) is reported like any other bad line.
fn parse_shell_input(line: std::io::Result<String>) -> Result<ShellCommand> {
    parse_shell_line(&line?)
}

fn parse_filter_args(args: &str) -> Result<FilterCriteria> {
    let mut types = Vec::new();
    let mut ability = None;
    let mut move_name = None;
    let mut ev = None;
    for token in args.split_whitespace() {
        let (key, value) = token.split_once('=').ok_or_else(|| {
            DexError::InvalidInput(format!("expected KEY=VALUE, got '{}'", token))
        })?;
        match key {
            "type" | "t" => types.push(value.to_string()),
            "ability" | "a" => ability = Some(value),
            "move" | "m" => move_name = Some(value),
            "ev" | "e" => ev = Some(value),
            other => {
                return Err(DexError::InvalidInput(format!(
                    "unknown filter '{}'",
                    other
                )))
            }
        }
    }
    build_criteria(&types, ability, move_name, ev)
}

async fn run_shell(api: &mut Api) -> Result<()> {
    println!("dexplore shell, 'help' for commands");
    print_result(&api.browse(1).await?);

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("dex> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            return Ok(());
        };
        let command = match parse_shell_input(line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("Error: {}", e);
                continue;
            }
        };

        let outcome = match command {
            ShellCommand::Quit => return Ok(()),
            ShellCommand::Nothing => continue,
            ShellCommand::Help => {
                println!("{}", SHELL_HELP);
                continue;
            }
            ShellCommand::Next => api.next_page().await,
            ShellCommand::Prev => api.prev_page().await,
            ShellCommand::Page(page) => api.goto(page).await,
            ShellCommand::Search(query) => api.search(&query).await,
            ShellCommand::Filter(criteria) => api.filter(criteria, 1).await,
            ShellCommand::Clear => api.clear_filters().await,
            ShellCommand::Show(query) => api.show(&query).await,
            ShellCommand::Fav(Some(query)) => api.toggle_favorite(&query).await,
            ShellCommand::Fav(None) => api.favorites().await,
            ShellCommand::Team(Some(query)) => api.add_to_team(&query).await,
            ShellCommand::Team(None) => api.team().await,
            ShellCommand::Types => api.categories().await,
        };

        // Errors end the command, not the session.
        match outcome {
            Ok(result) => print_result(&result),
            Err(e) => eprintln!("Error: {}", e),
        }
    }
}
