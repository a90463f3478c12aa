use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

const EXIT_SUCCESS: i32 = 0;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the ranked leaderboard (default if no subcommand)
    Board,
    /// Print one player's breakdown: verified, completed, progressed
    Player {
        /// Player name (case-insensitive)
        name: String,
    },
    /// Print the ranked level list
    Levels,
    /// Print the list maintainers
    Editors,
    /// Open a level's verification video in the browser
    Open {
        /// Effective rank of the level (1-based, as shown by `levels`)
        rank: usize,
    },
}

#[derive(Parser, Debug)]
#[command(name = "demonboard")]
#[command(about = "Demonlist leaderboard aggregation CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/demonboard/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Board);
    let start_time = Instant::now();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match demonboard::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = demonboard::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    if cli.verbose {
        eprintln!("Loaded {} sources from config", config.sources.len());
        for (i, source) in config.sources.iter().enumerate() {
            eprintln!("  Source {}: {} ({})", i + 1, source.display_name(), source.url);
        }
        eprintln!("Policy: {:?}, timeout: {:?}", config.policy, config.request_timeout());
    }

    let client = match demonboard::list::create_client(config.request_timeout()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create HTTP client: {}", e);
            std::process::exit(EXIT_NETWORK);
        }
    };

    let use_colors = demonboard::output::should_use_colors();

    match command {
        Commands::Board => {
            let result = demonboard::fetch::fetch_leaderboard(&client, &config, cli.verbose).await;

            if result.users.is_empty() && !result.failed_sources.is_empty() {
                eprintln!("All sources failed. Check your network connection and source URLs.");
                std::process::exit(EXIT_NETWORK);
            }

            if let Some(disclaimer) = demonboard::output::format_disclaimer(&result) {
                eprintln!("{}", disclaimer);
            }
            println!("{}", demonboard::output::format_board_table(&result.users, use_colors));

            if cli.verbose {
                eprintln!();
                eprintln!(
                    "Total: {} players in {:?}",
                    result.users.len(),
                    start_time.elapsed()
                );
            }
        }
        Commands::Player { name } => {
            let result = demonboard::fetch::fetch_leaderboard(&client, &config, cli.verbose).await;

            if let Some(disclaimer) = demonboard::output::format_disclaimer(&result) {
                eprintln!("{}", disclaimer);
            }

            let wanted = name.to_lowercase();
            let found = result
                .users
                .iter()
                .enumerate()
                .find(|(_, user)| user.user.to_lowercase() == wanted);

            match found {
                Some((position, user)) => {
                    println!(
                        "{}",
                        demonboard::output::format_user_detail(position, user, use_colors)
                    );
                }
                None => {
                    eprintln!("No player named '{}' on the board.", name);
                    std::process::exit(EXIT_CONFIG);
                }
            }
        }
        Commands::Levels => {
            let outcome = demonboard::fetch::fetch_levels(&client, &config, cli.verbose).await;

            if outcome.levels.is_empty() && !outcome.failed_sources.is_empty() {
                eprintln!("All sources failed. Check your network connection and source URLs.");
                std::process::exit(EXIT_NETWORK);
            }

            println!(
                "{}",
                demonboard::output::format_level_list(&outcome.levels, use_colors)
            );
        }
        Commands::Editors => {
            let editors =
                demonboard::list::fetch_editors(&client, &config.sources, config.policy).await;
            println!("{}", demonboard::output::format_editors(&editors, use_colors));
        }
        Commands::Open { rank } => {
            let outcome = demonboard::fetch::fetch_levels(&client, &config, cli.verbose).await;

            if rank < 1 || rank > outcome.levels.len() {
                eprintln!(
                    "Invalid rank {}. Must be between 1 and {}.",
                    rank,
                    outcome.levels.len()
                );
                std::process::exit(EXIT_CONFIG);
            }

            match &outcome.levels[rank - 1] {
                demonboard::list::LoadOutcome::Loaded(level) => {
                    if let Err(e) = demonboard::browser::open_url(&level.verification) {
                        eprintln!("Failed to open browser: {}", e);
                        std::process::exit(EXIT_NETWORK);
                    }
                    println!(
                        "Opening verification of #{} {} in browser: {}",
                        rank, level.name, level.verification
                    );
                }
                demonboard::list::LoadOutcome::Failed { path } => {
                    eprintln!("Level #{} ({}) could not be loaded.", rank, path);
                    std::process::exit(EXIT_NETWORK);
                }
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
