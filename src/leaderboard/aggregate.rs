use std::collections::HashMap;

use crate::list::types::LoadOutcome;
use crate::scoring::{round_total, score};

use super::types::{ScoreEntry, UserAggregate};

/// Per-player working state while walking the level list.
struct Tally {
    user: String,
    verified: Vec<ScoreEntry>,
    completed: Vec<ScoreEntry>,
    progressed: Vec<ScoreEntry>,
}

/// Build the leaderboard from an ordered sequence of load outcomes.
///
/// Effective rank for scoring is the position in the given sequence, so
/// whatever order the loader merged sources in is the order that determines
/// score weights. Failed slots contribute their identifier to the error list
/// and keep their position (the levels after them are not re-ranked upward
/// relative to the sequence).
///
/// Pure over its input: same sequence in, bit-identical result out.
pub fn aggregate(levels: &[LoadOutcome]) -> (Vec<UserAggregate>, Vec<String>) {
    let mut tallies: Vec<Tally> = Vec::new();
    // Lowercased name -> slot. Canonical spelling is whichever case was
    // encountered first; the index makes the lookup O(1) instead of a rescan
    // of every known player per record.
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut failed_levels = Vec::new();

    for (position, outcome) in levels.iter().enumerate() {
        let level = match outcome {
            LoadOutcome::Loaded(level) => level,
            LoadOutcome::Failed { path } => {
                failed_levels.push(path.clone());
                continue;
            }
        };

        let rank = position as u32 + 1;
        let full_score = score(rank, 100, level.percent_to_qualify);

        let slot = resolve_user(&mut tallies, &mut index, &level.verifier);
        tallies[slot].verified.push(ScoreEntry {
            rank,
            level: level.name.clone(),
            score: full_score,
            link: level.verification.clone(),
            percent: None,
        });

        for record in &level.records {
            let slot = resolve_user(&mut tallies, &mut index, &record.user);
            let tally = &mut tallies[slot];

            if record.percent == 100 {
                tally.completed.push(ScoreEntry {
                    rank,
                    level: level.name.clone(),
                    score: full_score,
                    link: record.link.clone(),
                    percent: None,
                });
            } else {
                tally.progressed.push(ScoreEntry {
                    rank,
                    level: level.name.clone(),
                    score: score(rank, record.percent, level.percent_to_qualify),
                    link: record.link.clone(),
                    percent: Some(record.percent),
                });
            }
        }
    }

    let mut users: Vec<UserAggregate> = tallies
        .into_iter()
        .map(|tally| {
            let total: f64 = tally
                .verified
                .iter()
                .chain(&tally.completed)
                .chain(&tally.progressed)
                .map(|entry| entry.score)
                .sum();

            UserAggregate {
                user: tally.user,
                total: round_total(total),
                verified: tally.verified,
                completed: tally.completed,
                progressed: tally.progressed,
            }
        })
        .collect();

    // Stable sort, so equal totals keep first-encounter order.
    users.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    (users, failed_levels)
}

fn resolve_user(
    tallies: &mut Vec<Tally>,
    index: &mut HashMap<String, usize>,
    name: &str,
) -> usize {
    *index.entry(name.to_lowercase()).or_insert_with(|| {
        tallies.push(Tally {
            user: name.to_string(),
            verified: Vec::new(),
            completed: Vec::new(),
            progressed: Vec::new(),
        });
        tallies.len() - 1
    })
}
