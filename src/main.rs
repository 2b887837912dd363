//! Pulse main entry point
//!
//! This is the command-line interface for the Pulse influencer browser.

use anyhow::Context;
use clap::Parser;
use pulse_browser::config::{load_config_with_hash, Config};
use pulse_browser::render::Screen;
use pulse_browser::state::{Intent, ViewState};
use pulse_browser::{HttpRepository, Navigator, Session};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

/// Pulse: browse influencers and their posts
///
/// Searches the content API for influencers, pages through their posts and
/// can ask the backend to crawl fresh content for an influencer with none.
#[derive(Parser, Debug)]
#[command(name = "pulse")]
#[command(version)]
#[command(about = "Browse influencers and their posts", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the effective settings without connecting
    #[arg(long, conflicts_with = "search")]
    dry_run: bool,

    /// Run a single search, print the results and exit
    #[arg(long, value_name = "QUERY")]
    search: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = load_config_with_hash(cli.config.as_deref())
        .context("failed to load configuration")?;
    match (&cli.config, config_hash) {
        (Some(path), Some(hash)) => {
            tracing::info!("Configuration loaded from {} (hash: {})", path.display(), hash)
        }
        _ => tracing::info!("Using default configuration"),
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let repository = HttpRepository::new(&config.api, &config.user_agent)
        .context("failed to build API client")?;
    tracing::info!("Content API: {}", repository.base_url());

    let session = Session::new(
        Navigator::from_config(&config),
        Arc::new(repository),
        config.api.request_timeout(),
    );

    match cli.search {
        Some(query) => handle_search(session, query).await,
        None => handle_repl(session).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so they never interleave with rendered screens.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pulse_browser=info,warn"),
            1 => EnvFilter::new("pulse_browser=debug,info"),
            2 => EnvFilter::new("pulse_browser=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Pulse Dry Run ===\n");

    println!("API:");
    println!("  Base URL: {}", config.api.base_url);
    println!("  Request timeout: {}s", config.api.request_timeout_secs);
    println!("  Connect timeout: {}s", config.api.connect_timeout_secs);

    println!("\nMedia:");
    println!("  Base URL: {}", config.media.base_url);
    if !config.media.strip_prefix.is_empty() {
        println!("  Strip prefix: {}", config.media.strip_prefix);
    }

    println!("\nBrowsing:");
    println!("  Prefetch distance: {}", config.browse.prefetch_distance);
    println!("  Crawl settle delay: {}ms", config.browse.crawl_settle_ms);
    println!("  Max collect count: {}", config.browse.max_collect_count);
    println!("  Search fallback: {:?}", config.browse.fallback);

    println!(
        "\nUser agent: {}/{}",
        config.user_agent.client_name, config.user_agent.client_version
    );

    println!("\n✓ Configuration is valid");
}

/// Handles the --search mode: one search, printed, then exit
async fn handle_search(mut session: Session<HttpRepository>, query: String) -> anyhow::Result<()> {
    session.dispatch(Intent::Search(query));
    session.settle().await;
    print!("{}", Screen(session.state()));
    Ok(())
}

/// Interactive loop: typed commands in, rendered screens out
async fn handle_repl(mut session: Session<HttpRepository>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print!("{}", Screen(session.state()));
    println!("Type `help` for commands.");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read input")? else {
                    break;
                };
                match parse_command(&line) {
                    Ok(ReplCommand::Quit) => break,
                    Ok(ReplCommand::Help) => print_help(),
                    Ok(ReplCommand::Show) => print!("{}", Screen(session.state())),
                    Ok(command) => match to_intent(command, session.state()) {
                        Ok(intent) => {
                            session.dispatch(intent);
                            print!("{}", Screen(session.state()));
                        }
                        Err(message) => println!("{}", message),
                    },
                    Err(message) => println!("{}", message),
                }
            }
            Some(completion) = session.recv_completion(), if session.has_pending() => {
                session.dispatch(completion);
                print!("{}", Screen(session.state()));
            }
        }
    }

    Ok(())
}

/// A parsed REPL line
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand {
    Search(String),
    /// 1-based position in the result list
    Open(usize),
    /// 1-based position in the post list
    Post(usize),
    More,
    Scroll(usize),
    Crawl,
    Back,
    Home,
    Show,
    Help,
    Quit,
}

fn parse_position(argument: &str, what: &str) -> Result<usize, String> {
    match argument.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(format!("usage: {} <number>", what)),
    }
}

fn parse_command(line: &str) -> Result<ReplCommand, String> {
    let line = line.trim();
    let (verb, argument) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

    match verb.to_lowercase().as_str() {
        "search" | "s" => {
            if argument.trim().is_empty() {
                Err("usage: search <name>".to_string())
            } else {
                Ok(ReplCommand::Search(argument.trim().to_string()))
            }
        }
        "open" | "o" => parse_position(argument, "open").map(ReplCommand::Open),
        "post" | "p" => parse_position(argument, "post").map(ReplCommand::Post),
        "scroll" => parse_position(argument, "scroll").map(ReplCommand::Scroll),
        "more" | "m" => Ok(ReplCommand::More),
        "crawl" => Ok(ReplCommand::Crawl),
        "back" | "b" => Ok(ReplCommand::Back),
        "home" => Ok(ReplCommand::Home),
        "show" | "" => Ok(ReplCommand::Show),
        "help" | "?" => Ok(ReplCommand::Help),
        "quit" | "exit" | "q" => Ok(ReplCommand::Quit),
        other => Err(format!("unknown command '{}', type `help`", other)),
    }
}

/// Resolves list positions against the current state
fn to_intent(command: ReplCommand, state: &ViewState) -> Result<Intent, String> {
    match command {
        ReplCommand::Search(query) => Ok(Intent::Search(query)),
        ReplCommand::Open(n) => state
            .search_results()
            .get(n - 1)
            .map(|user| Intent::SelectUser(user.id.clone()))
            .ok_or_else(|| format!("no result #{}", n)),
        ReplCommand::Post(n) => state
            .user_posts()
            .get(n - 1)
            .map(|post| Intent::SelectPost(post.id.clone()))
            .ok_or_else(|| format!("no post #{}", n)),
        ReplCommand::More => Ok(Intent::NearEnd),
        ReplCommand::Scroll(n) => Ok(Intent::Scrolled { position: n - 1 }),
        ReplCommand::Crawl => Ok(Intent::RequestCrawl),
        ReplCommand::Back => Ok(Intent::Back),
        ReplCommand::Home => Ok(Intent::Home),
        ReplCommand::Show | ReplCommand::Help | ReplCommand::Quit => {
            Err("not a navigation command".to_string())
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  search <name>   find influencers");
    println!("  open <n>        open result n");
    println!("  post <n>        open post n of the profile");
    println!("  more            load the next page of posts");
    println!("  scroll <n>      move to post n (loads more near the end)");
    println!("  crawl           fetch content for a profile with no posts");
    println!("  back            go up one level");
    println!("  home            start over");
    println!("  show            redraw the screen");
    println!("  quit            exit");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(
            parse_command("search  Elena Voss "),
            Ok(ReplCommand::Search("Elena Voss".to_string()))
        );
        assert_eq!(parse_command("open 2"), Ok(ReplCommand::Open(2)));
        assert_eq!(parse_command("P 10"), Ok(ReplCommand::Post(10)));
        assert_eq!(parse_command("more"), Ok(ReplCommand::More));
        assert_eq!(parse_command(""), Ok(ReplCommand::Show));
        assert_eq!(parse_command("q"), Ok(ReplCommand::Quit));

        assert!(parse_command("search").is_err());
        assert!(parse_command("open 0").is_err());
        assert!(parse_command("open two").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn test_positions_resolve_against_state() {
        let state = ViewState::default();
        assert!(to_intent(ReplCommand::Open(1), &state).is_err());
        assert!(matches!(
            to_intent(ReplCommand::Scroll(4), &state),
            Ok(Intent::Scrolled { position: 3 })
        ));
    }
}
