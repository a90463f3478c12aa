use reqwest::Client;

use crate::config::Config;
use crate::leaderboard::{aggregate, LeaderboardResult};
use crate::list::{fetch_list, ListOutcome};

/// Fetch all levels and build the leaderboard.
///
/// The loader resolves every fetch to a success or a tagged failure before
/// the aggregator runs, so the aggregation never sees a partial set. This is
/// the only place the loader and the aggregator meet; main.rs calls it for
/// the board and player views.
pub async fn fetch_leaderboard(client: &Client, config: &Config, verbose: bool) -> LeaderboardResult {
    let outcome = fetch_levels(client, config, verbose).await;
    let (users, failed_levels) = aggregate(&outcome.levels);

    if verbose {
        eprintln!(
            "Aggregated {} players from {} levels ({} failed)",
            users.len(),
            outcome.levels.len() - failed_levels.len(),
            failed_levels.len()
        );
    }

    LeaderboardResult {
        users,
        failed_levels,
        failed_sources: outcome.failed_sources,
    }
}

/// Fetch the ranked level list without aggregating. Used by the levels and
/// open subcommands, and by `fetch_leaderboard`.
pub async fn fetch_levels(client: &Client, config: &Config, verbose: bool) -> ListOutcome {
    let outcome = fetch_list(client, &config.sources, config.policy).await;

    if verbose {
        eprintln!(
            "Loaded {} level slots from {} sources ({} sources failed)",
            outcome.levels.len(),
            config.sources.len(),
            outcome.failed_sources.len()
        );
    }

    outcome
}
