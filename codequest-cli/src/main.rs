use clap::{Parser, Subcommand};
use codequest_cli::presentation::{
    describe_event, help, needs_redraw, parse_line, render_catalog, render_session, ConsoleAction,
};
use codequest_cli::{CliError, HttpRewardStore, LogConfig, Result};
use codequest_core::{
    Activity, ActivityCatalog, ActivityCommand, ActivityEvent, ActivityEventLoop, ActivityId,
    ActivityLoop, ActivityView, ApiConfig, AwardOutcome, CompletionRecord, GameKind, GameSpec,
    GameView, InMemoryRewardStore, RewardDispatcher, RewardStore, SessionView, Stopwatch,
    XpAwardRequest, XpReceipt,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "codequest")]
#[command(
    version,
    about = "CodeQuest Activities - coding mini-games in the terminal"
)]
struct Cli {
    /// Verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also append logs to this file
    #[arg(long, global = true)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the bundled activities
    Catalog {
        /// Print the full catalog (including game content) as JSON
        #[arg(long)]
        json: bool,

        /// Only show one category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Play one activity interactively
    Play {
        /// Activity ID (see `codequest catalog`)
        id: ActivityId,

        /// Seed for shuffles and random targets
        #[arg(long)]
        seed: Option<u64>,

        /// Keep XP awards in memory instead of sending them to the backend
        #[arg(long)]
        offline: bool,

        /// Backend base URL
        #[arg(long, env = "CODEQUEST_API_URL")]
        api_url: Option<String>,

        /// Bearer token for the backend
        #[arg(long, env = "CODEQUEST_API_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },

    /// Write JSON Schemas of the public data types
    Schema {
        /// Output directory
        #[arg(short, long, default_value = "schemas")]
        out_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut log_config = if cli.verbose {
        LogConfig::dev()
    } else {
        LogConfig::quiet()
    };
    if let Some(path) = cli.log_file {
        log_config = log_config.with_file_output(path);
    }
    log_config.init()?;

    match cli.command {
        Commands::Catalog { json, category } => show_catalog(json, category.as_deref())?,
        Commands::Play {
            id,
            seed,
            offline,
            api_url,
            token,
        } => {
            let config = build_api_config(api_url, token)?;
            play(id, seed, offline, config).await?;
        }
        Commands::Schema { out_dir } => write_schemas(&out_dir)?,
    }

    Ok(())
}

fn build_api_config(api_url: Option<String>, token: Option<String>) -> Result<ApiConfig> {
    let mut config = match api_url {
        Some(url) => {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(CliError::InvalidConfig(format!(
                    "API URL must start with http:// or https://, got '{}'",
                    url
                )));
            }
            ApiConfig::new(url)
        }
        None => ApiConfig::default(),
    };

    if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
        config = config.with_token(token);
    }

    Ok(config)
}

fn show_catalog(json: bool, category: Option<&str>) -> Result<()> {
    let catalog = ActivityCatalog::builtin();

    let activities: Vec<&Activity> = match category {
        Some(category) => catalog.by_category(category).collect(),
        None => catalog.iter().collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&activities)?);
        return Ok(());
    }

    let record = CompletionRecord::new();
    let views: Vec<ActivityView> = activities
        .iter()
        .map(|activity| activity.view(record.is_completed(activity.id)))
        .collect();

    print!("{}", render_catalog(&views));
    println!(
        "{} activities, {} points available",
        views.len(),
        views.iter().map(|v| u64::from(v.points)).sum::<u64>()
    );
    Ok(())
}

async fn play(id: ActivityId, seed: Option<u64>, offline: bool, api: ApiConfig) -> Result<()> {
    let mut event_loop = ActivityEventLoop::default();
    if let Some(seed) = seed {
        event_loop = event_loop.with_seed(seed);
    }
    if event_loop.catalog().get(id).is_none() {
        return Err(CliError::ActivityNotFound(id));
    }

    let activities = ActivityLoop::new(event_loop, 10, 100);

    if offline {
        info!("📴 Offline: awards stay in memory");
        run_session(activities, id, RewardDispatcher::new(InMemoryRewardStore::new())).await
    } else {
        info!("🌐 Sending awards to {}", api.xp_url());
        let store = HttpRewardStore::new(api)?;
        run_session(activities, id, RewardDispatcher::new(store)).await
    }
}

fn current_view(activities: &ActivityLoop) -> Option<(String, SessionView)> {
    let event_loop = activities.event_loop();
    let title = event_loop.open_activity()?.title.clone();
    Some((title, event_loop.session_view()?))
}

fn current_kind(activities: &ActivityLoop) -> Option<GameKind> {
    activities.event_loop().session().map(|session| session.kind())
}

fn redraw(activities: &ActivityLoop) {
    if let Some((title, view)) = current_view(activities) {
        println!("{}", render_session(&title, &view));
    }
}

fn show_events(activities: &ActivityLoop, events: &[ActivityEvent]) {
    for notice in events.iter().filter_map(describe_event) {
        println!("{}", notice);
    }
    if events.iter().any(needs_redraw) {
        redraw(activities);
    }
}

fn report_awards(outcomes: &[AwardOutcome]) {
    for outcome in outcomes {
        match outcome {
            AwardOutcome::Awarded {
                receipt: XpReceipt {
                    total_xp: Some(total),
                    ..
                },
                ..
            } => println!("⭐ XP saved (total {})", total),
            AwardOutcome::Awarded { .. } => println!("⭐ XP saved"),
            AwardOutcome::Failed { error, .. } => {
                println!("⚠️ Could not save XP: {} (type 'retry' to try again)", error)
            }
        }
    }
}

async fn run_session<S: RewardStore>(
    mut activities: ActivityLoop,
    id: ActivityId,
    dispatcher: RewardDispatcher<S>,
) -> Result<()> {
    let opened = activities.dispatch(ActivityCommand::OpenActivity { activity_id: id })?;
    show_events(&activities, &opened);

    let Some(kind) = current_kind(&activities) else {
        return Err(CliError::ActivityNotFound(id));
    };
    println!("{}", help(kind));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut interval = tokio::time::interval(Duration::from_millis(100));
    let mut stopwatch = Stopwatch::start();

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let elapsed_ms = stopwatch.lap_ms();
                let events = activities.dispatch(ActivityCommand::Tick { elapsed_ms })?;
                show_events(&activities, &events);
                report_awards(&dispatcher.dispatch_events(&events).await);
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let kind = current_kind(&activities).unwrap_or(kind);

                match parse_line(&line, kind) {
                    Ok(ConsoleAction::Quit) => break,
                    Ok(ConsoleAction::Show) => redraw(&activities),
                    Ok(ConsoleAction::Help) => println!("{}", help(kind)),
                    Ok(ConsoleAction::RetryAwards) => {
                        let outcomes = dispatcher.retry_failed().await;
                        if outcomes.is_empty() {
                            println!("Nothing to retry");
                        }
                        report_awards(&outcomes);
                    }
                    Ok(ConsoleAction::Command(command)) => {
                        let events = activities.dispatch(command)?;
                        show_events(&activities, &events);
                        report_awards(&dispatcher.dispatch_events(&events).await);
                    }
                    Err(e) => println!("{}", e),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down...");
                break;
            }
        }
    }

    let closed = activities.dispatch(ActivityCommand::CloseActivity)?;
    show_events(&activities, &closed);

    let record = activities.event_loop().record();
    println!(
        "Session over: {} completed, {} points this run",
        record.completed_count(),
        record.total_points()
    );

    let failed: Vec<XpAwardRequest> = dispatcher.failed();
    if !failed.is_empty() {
        warn!("{} awards were not saved", failed.len());
        for request in failed {
            println!(
                "⚠️ Unsaved: {} XP for activity {}",
                request.points, request.activity_id
            );
        }
    }

    Ok(())
}

fn write_schemas(out_dir: &Path) -> Result<()> {
    if out_dir.exists() && !out_dir.is_dir() {
        return Err(CliError::invalid_directory(out_dir.to_path_buf()));
    }
    std::fs::create_dir_all(out_dir)?;

    let schemas = [
        ("activity", schemars::schema_for!(Activity)),
        ("activity_view", schemars::schema_for!(ActivityView)),
        ("game_spec", schemars::schema_for!(GameSpec)),
        ("game_view", schemars::schema_for!(GameView)),
        ("session_view", schemars::schema_for!(SessionView)),
        ("xp_award_request", schemars::schema_for!(XpAwardRequest)),
        ("xp_receipt", schemars::schema_for!(XpReceipt)),
    ];

    for (name, schema) in schemas {
        let json = serde_json::to_string_pretty(&schema)
            .map_err(|e| CliError::SchemaGeneration(format!("{}: {}", name, e)))?;
        let path = out_dir.join(format!("{}.schema.json", name));
        std::fs::write(&path, json)?;
        println!("📝 {}", path.display());
    }

    Ok(())
}
