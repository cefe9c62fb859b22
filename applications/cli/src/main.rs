/// Pod Player - terminal host
use anyhow::Context;
use clap::Parser;
use pod_cli::{demo_episodes, load_episodes, Command, Outcome, PlayerSettings, Session};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pod-cli")]
#[command(about = "Podcast player driven from the terminal", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./podplay.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON episode list
    #[arg(short, long)]
    episodes: Option<PathBuf>,

    /// Queue the whole list from this episode on launch
    #[arg(short, long)]
    start: Option<usize>,

    /// Start with shuffle on
    #[arg(long)]
    shuffle: bool,

    /// Start with loop on
    #[arg(long = "loop")]
    looping: bool,

    /// Seed for reproducible shuffle
    #[arg(long)]
    seed: Option<u64>,

    /// Print the player as JSON after each command
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = PlayerSettings::load(cli.config.as_deref())?;
    apply_flags(&mut settings, &cli);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let episodes = match &settings.episodes {
        Some(path) => load_episodes(path)
            .with_context(|| format!("loading episodes from {}", path.display()))?,
        None => demo_episodes(),
    };
    tracing::info!("Loaded {} episodes", episodes.len());

    let mut session = Session::new(&settings, episodes)
        .context("starting session")?
        .with_json_output(cli.json);

    run(&mut session)
}

/// Command-line flags win over file and environment settings
fn apply_flags(settings: &mut PlayerSettings, cli: &Cli) {
    if let Some(path) = &cli.episodes {
        settings.episodes = Some(path.clone());
    }
    if cli.start.is_some() {
        settings.start_index = cli.start;
    }
    if cli.shuffle {
        settings.store.shuffling = true;
    }
    if cli.looping {
        settings.store.looping = true;
    }
    if cli.seed.is_some() {
        settings.store.shuffle_seed = cli.seed;
    }
}

fn run(session: &mut Session) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    writeln!(stdout, "{}", session.render_text())?;
    writeln!(stdout, "type `help` for commands")?;

    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let outcome = line
            .parse::<Command>()
            .and_then(|command| session.execute(command));

        match outcome {
            Ok(Outcome::Output(text)) => writeln!(stdout, "{}", text)?,
            Ok(Outcome::Quit) => break,
            Err(err) => writeln!(stdout, "error: {}", err)?,
        }
        stdout.flush()?;
    }

    Ok(())
}
