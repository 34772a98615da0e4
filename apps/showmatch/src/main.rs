//! Showmatch CLI - watch two language models play chess, or play one yourself.
//!
//! Spectator output goes to stdout; tracing is reserved for diagnostics and
//! stays quiet unless asked for.

use std::sync::Arc;

use arbiter::{
    api_key_from_env, available_models, model_by_id, AgentProfile, AgentSettings, DialogEntry,
    GameMode, GameStatus, Match, MatchConfig, MatchEvent, MoveAgent, MoveDecision, RandomAgent,
    Side, Speaker,
};
use clap::{Parser, ValueEnum};
use time::macros::format_description;
use time::OffsetDateTime;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::sync::broadcast::Receiver;
use tracing::warn;

#[derive(Parser)]
#[command(name = "showmatch")]
#[command(about = "Chess matches between language-model agents, streamed to your terminal")]
struct Args {
    /// Who plays: two agents against each other, or you as White
    #[arg(long, default_value = "auto")]
    mode: Mode,

    /// Model identifier for White (see --list-models)
    #[arg(long)]
    white: Option<String>,

    /// Model identifier for Black (see --list-models)
    #[arg(long)]
    black: Option<String>,

    /// Delay between agent moves in auto mode, in milliseconds (300-5000)
    #[arg(long, default_value = "1500")]
    interval_ms: u64,

    /// OpenRouter API key; falls back to the OPENROUTER_API_KEY variable
    #[arg(long)]
    api_key: Option<String>,

    /// Play random legal moves locally instead of calling a provider
    /// (ignores model selection, needs no API key)
    #[arg(long)]
    offline: bool,

    /// RNG seed for --offline, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// List the available models and exit
    #[arg(long)]
    list_models: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON logs instead of plain ones
    #[arg(long)]
    json_logs: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Agent vs agent autoplay
    Auto,
    /// You play White against the Black agent
    Human,
}

impl From<Mode> for GameMode {
    fn from(mode: Mode) -> GameMode {
        match mode {
            Mode::Auto => GameMode::AgentVsAgent,
            Mode::Human => GameMode::HumanVsAgent,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args);

    if args.list_models {
        for model in available_models() {
            println!("{:<44} {}", model.id, model.display_name);
        }
        return Ok(());
    }

    let (agent, credential, white, black): (Arc<dyn MoveAgent>, _, _, _) = if args.offline {
        (
            Arc::new(RandomAgent::new(args.seed)),
            None,
            AgentProfile::new("local/random", "White (random)"),
            AgentProfile::new("local/random", "Black (random)"),
        )
    } else {
        let credential = args.api_key.clone().or_else(api_key_from_env);
        if credential.is_none() {
            return Err(
                "no API key: pass --api-key, set OPENROUTER_API_KEY, or use --offline".into(),
            );
        }
        let settings = AgentSettings::from_env();
        (
            Arc::new(settings.build_agent()?),
            credential,
            resolve_profile(args.white.as_deref(), Side::White)?,
            resolve_profile(args.black.as_deref(), Side::Black)?,
        )
    };

    println!("White: {} ({})", white.name, white.model);
    println!("Black: {} ({})", black.name, black.model);
    println!();

    let mut printer = Printer {
        plies: 0,
        white_name: white.name.clone(),
        black_name: black.name.clone(),
    };
    let m = Match::new(
        agent,
        MatchConfig {
            mode: args.mode.into(),
            white,
            black,
            credential,
            interval_ms: args.interval_ms,
            start_paused: false,
        },
    );

    match args.mode {
        Mode::Auto => run_auto(&m, &mut printer).await,
        Mode::Human => run_human(&m, &mut printer).await,
    }
}

fn init_logging(args: &Args) {
    if args.json_logs {
        arbiter::telemetry::init_tracing();
        return;
    }
    // Silent by default; the transcript is the output.
    let filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn resolve_profile(
    arg: Option<&str>,
    side: Side,
) -> Result<AgentProfile, Box<dyn std::error::Error>> {
    let Some(id) = arg else {
        return Ok(AgentProfile::default_for(side));
    };
    match model_by_id(id) {
        Some(model) => Ok(AgentProfile::new(model.id, model.display_name)),
        None => {
            let roster: Vec<&str> = available_models().iter().map(|m| m.id).collect();
            Err(format!("unknown model '{id}'; available: {}", roster.join(", ")).into())
        }
    }
}

async fn run_auto(m: &Match, printer: &mut Printer) -> Result<(), Box<dyn std::error::Error>> {
    let mut events = m.subscribe();
    m.start_new_game();

    loop {
        match events.recv().await {
            Ok(MatchEvent::StatusChanged(GameStatus::Ended)) => break,
            Ok(MatchEvent::Dialog(entry)) => {
                printer.dialog(&entry);
                if is_failure_notice(&entry) {
                    println!();
                    println!("The match stalled on that failure; rerun to start over.");
                    break;
                }
            }
            Ok(event) => printer.event(&event),
            Err(RecvError::Lagged(skipped)) => warn!(skipped, "event stream lagged"),
            Err(RecvError::Closed) => break,
        }
    }

    print_summary(m);
    Ok(())
}

async fn run_human(m: &Match, printer: &mut Printer) -> Result<(), Box<dyn std::error::Error>> {
    let mut events = m.subscribe();
    m.start_new_game();
    println!("You play White. Enter moves in SAN (e4, Nf3, O-O); 'quit' leaves the game.");
    println!();

    'game: loop {
        print_pending(&mut events, printer);

        let snapshot = m.snapshot();
        if snapshot.status != GameStatus::Playing {
            break;
        }

        if snapshot.side_to_move == Side::White {
            let line = prompt_line("Your move: ").await?;
            if line.is_empty() {
                break; // stdin closed
            }
            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
                break;
            }
            match m.submit_human_move(input) {
                MoveDecision::Applied(_) => {}
                MoveDecision::Rejected(error) => println!("{error}"),
                MoveDecision::Ignored(reason) => println!("move ignored ({reason:?})"),
            }
        } else {
            match wait_for_black(&mut events, printer).await {
                Wait::Moved | Wait::Ended => {}
                Wait::Closed => break,
                Wait::Stalled => loop {
                    let line =
                        prompt_line("Agent failed; press Enter to retry or type 'quit': ").await?;
                    if line.is_empty() || line.trim().eq_ignore_ascii_case("quit") {
                        break 'game;
                    }
                    let outcome = m.request_agent_move().await;
                    print_pending(&mut events, printer);
                    if !matches!(
                        outcome,
                        arbiter::TurnOutcome::Failed(_) | arbiter::TurnOutcome::Rejected(_)
                    ) {
                        break;
                    }
                },
            }
        }
    }

    print_pending(&mut events, printer);
    print_summary(m);
    Ok(())
}

enum Wait {
    Moved,
    Ended,
    Stalled,
    Closed,
}

/// Block until the agent's reply settles the turn one way or another.
async fn wait_for_black(events: &mut Receiver<MatchEvent>, printer: &mut Printer) -> Wait {
    loop {
        match events.recv().await {
            Ok(MatchEvent::MoveApplied { side, san, .. }) => {
                printer.move_applied(side, &san);
                if side == Side::Black {
                    return Wait::Moved;
                }
            }
            Ok(MatchEvent::Dialog(entry)) => {
                printer.dialog(&entry);
                if is_failure_notice(&entry) {
                    return Wait::Stalled;
                }
            }
            Ok(MatchEvent::StatusChanged(GameStatus::Ended)) => return Wait::Ended,
            Ok(MatchEvent::StatusChanged(_)) => {}
            Err(RecvError::Lagged(skipped)) => warn!(skipped, "event stream lagged"),
            Err(RecvError::Closed) => return Wait::Closed,
        }
    }
}

fn print_pending(events: &mut Receiver<MatchEvent>, printer: &mut Printer) {
    loop {
        match events.try_recv() {
            Ok(event) => printer.event(&event),
            Err(TryRecvError::Lagged(skipped)) => warn!(skipped, "event stream lagged"),
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
}

fn print_summary(m: &Match) {
    let snapshot = m.snapshot();
    println!();
    println!("Moves ({}): {}", snapshot.history.len(), snapshot.history.join(" "));
    println!("Final position: {}", snapshot.fen);
}

/// System entries other than the game-over announcement report failures.
fn is_failure_notice(entry: &DialogEntry) -> bool {
    entry.speaker == Speaker::System && !entry.content.starts_with("Game over!")
}

async fn prompt_line(prompt: &str) -> Result<String, Box<dyn std::error::Error>> {
    use std::io::Write;
    print!("{prompt}");
    std::io::stdout().flush()?;
    let line = tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        std::io::stdin().read_line(&mut line).map(|_| line)
    })
    .await??;
    Ok(line)
}

struct Printer {
    plies: usize,
    white_name: String,
    black_name: String,
}

impl Printer {
    fn event(&mut self, event: &MatchEvent) {
        match event {
            MatchEvent::MoveApplied { side, san, .. } => self.move_applied(*side, san),
            MatchEvent::Dialog(entry) => self.dialog(entry),
            MatchEvent::StatusChanged(_) => {}
        }
    }

    fn move_applied(&mut self, side: Side, san: &str) {
        self.plies += 1;
        let number = (self.plies + 1) / 2;
        match side {
            Side::White => println!("{number:>3}. {san}"),
            Side::Black => println!("{number:>3}... {san}"),
        }
    }

    fn dialog(&self, entry: &DialogEntry) {
        let name = match entry.speaker {
            Speaker::White => self.white_name.as_str(),
            Speaker::Black => self.black_name.as_str(),
            Speaker::System => "System",
        };
        println!(
            "      [{}] {name}: {}",
            format_clock(entry.timestamp),
            entry.content
        );
    }
}

fn format_clock(ts: OffsetDateTime) -> String {
    let format = format_description!("[hour]:[minute]:[second]");
    ts.format(&format).unwrap_or_default()
}
