use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::leaderboard::{LeaderboardResult, ScoreEntry, UserAggregate};
use crate::list::{Editor, LoadOutcome};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score or total with thousands separators and at most two
/// decimals, trailing zeros trimmed ("1,204.5", "150"). Scores are never
/// negative, so no sign handling.
pub fn localize(value: f64) -> String {
    let text = format!("{:.2}", value);
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let grouped = group_thousands(int_part);
    let frac = frac_part.trim_end_matches('0');

    if frac.is_empty() {
        grouped
    } else {
        format!("{}.{}", grouped, frac)
    }
}

fn group_thousands(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut out = String::with_capacity(chars.len() + chars.len() / 3);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*c);
    }
    out
}

/// Format the ranked board as one line per player: position, total, name.
pub fn format_board_table(users: &[UserAggregate], use_colors: bool) -> String {
    if users.is_empty() {
        return "No players on the board.".to_string();
    }

    let total_width = users
        .iter()
        .map(|user| localize(user.total).len())
        .max()
        .unwrap_or(0);

    users
        .iter()
        .enumerate()
        .map(|(i, user)| {
            let position = format!("{:>3}.", i + 1);
            let total = format!("{:>width$}", localize(user.total), width = total_width);

            if use_colors {
                format!("{} {}  {}", position.dimmed(), total.bold(), user.user)
            } else {
                format!("{} {}  {}", position, total, user.user)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The partial-data warning printed above the board, mirroring the original
/// site's disclaimer. None when everything loaded.
pub fn format_disclaimer(result: &LeaderboardResult) -> Option<String> {
    if !result.is_partial() {
        return None;
    }

    let mut lines = Vec::new();
    if !result.failed_levels.is_empty() {
        lines.push(format!(
            "Leaderboard may be incorrect, as the following levels could not be loaded: {}",
            result.failed_levels.join(", ")
        ));
    }
    if !result.failed_sources.is_empty() {
        lines.push(format!(
            "The following sources could not be read and contributed nothing: {}",
            result.failed_sources.join(", ")
        ));
    }

    Some(lines.join("\n"))
}

/// Format one player's full breakdown: placement, total, and the verified /
/// completed / progressed sections.
pub fn format_user_detail(position: usize, user: &UserAggregate, use_colors: bool) -> String {
    let mut out = String::new();

    let header = format!("#{} {}", position + 1, user.user);
    if use_colors {
        out.push_str(&format!("{}\n{}\n", header.bold(), localize(user.total)));
    } else {
        out.push_str(&format!("{}\n{}\n", header, localize(user.total)));
    }

    push_section(&mut out, "Verified", &user.verified, use_colors);
    push_section(&mut out, "Completed", &user.completed, use_colors);
    push_section(&mut out, "Progressed", &user.progressed, use_colors);

    out.trim_end().to_string()
}

fn push_section(out: &mut String, title: &str, entries: &[ScoreEntry], use_colors: bool) {
    if entries.is_empty() {
        return;
    }

    out.push('\n');
    out.push_str(&format!("{} ({})\n", title, entries.len()));

    let name_width = entries
        .iter()
        .map(|entry| entry_label(entry).len())
        .max()
        .unwrap_or(0);

    for entry in entries {
        // Pad before styling so ANSI codes don't throw off the columns.
        let rank = format!("{:>5}", format!("#{}", entry.rank));
        let label = format!("{:<width$}", entry_label(entry), width = name_width);
        let gain = format!("{:>8}", format!("+{}", localize(entry.score)));

        if use_colors {
            out.push_str(&format!(
                "  {}  {}  {}  {}\n",
                rank.dimmed(),
                label,
                gain.bold(),
                entry.link.underline()
            ));
        } else {
            out.push_str(&format!("  {}  {}  {}  {}\n", rank, label, gain, entry.link));
        }
    }
}

/// Progressed rows carry their percent in front of the level name, the way
/// the original detail panel renders them.
fn entry_label(entry: &ScoreEntry) -> String {
    match entry.percent {
        Some(percent) => format!("{}% {}", percent, entry.level),
        None => entry.level.clone(),
    }
}

/// Format the ranked level list, marking slots that failed to load.
pub fn format_level_list(levels: &[LoadOutcome], use_colors: bool) -> String {
    if levels.is_empty() {
        return "No levels found.".to_string();
    }

    let term_width = terminal_size().map(|(Width(w), _)| w as usize);

    levels
        .iter()
        .enumerate()
        .map(|(i, outcome)| {
            let position = format!("{:>3}.", i + 1);
            match outcome {
                LoadOutcome::Loaded(level) => {
                    let name = match term_width {
                        Some(width) if width > 40 => truncate_name(&level.name, width - 30),
                        Some(_) => truncate_name(&level.name, 20),
                        None => level.name.clone(),
                    };
                    if use_colors {
                        format!(
                            "{} {}  verified by {}",
                            position.dimmed(),
                            name.bold(),
                            level.verifier
                        )
                    } else {
                        format!("{} {}  verified by {}", position, name, level.verifier)
                    }
                }
                LoadOutcome::Failed { path } => {
                    let line = format!("{} (failed to load: {})", position, path);
                    if use_colors {
                        line.dimmed().to_string()
                    } else {
                        line
                    }
                }
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the maintainer list from the editors document.
pub fn format_editors(editors: &[Editor], use_colors: bool) -> String {
    if editors.is_empty() {
        return "No editors found.".to_string();
    }

    editors
        .iter()
        .map(|editor| {
            let role = editor.role.as_deref().unwrap_or("editor");
            if use_colors {
                format!("{}  {}", editor.name.bold(), role.dimmed())
            } else {
                format!("{}  {}", editor.name, role)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Truncate a level name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::{Level, Record};

    fn entry(rank: u32, level: &str, score: f64, percent: Option<u8>) -> ScoreEntry {
        ScoreEntry {
            rank,
            level: level.to_string(),
            score,
            link: format!("https://youtu.be/{}", rank),
            percent,
        }
    }

    fn sample_user(name: &str, total: f64) -> UserAggregate {
        UserAggregate {
            user: name.to_string(),
            total,
            verified: vec![],
            completed: vec![],
            progressed: vec![],
        }
    }

    #[test]
    fn test_localize_plain_integer() {
        assert_eq!(localize(150.0), "150");
        assert_eq!(localize(0.0), "0");
    }

    #[test]
    fn test_localize_groups_thousands() {
        assert_eq!(localize(1234.5), "1,234.5");
        assert_eq!(localize(1234567.89), "1,234,567.89");
        assert_eq!(localize(1000.0), "1,000");
    }

    #[test]
    fn test_localize_trims_trailing_zeros() {
        assert_eq!(localize(12.5), "12.5");
        assert_eq!(localize(12.25), "12.25");
    }

    #[test]
    fn test_format_board_table_empty() {
        assert_eq!(format_board_table(&[], false), "No players on the board.");
    }

    #[test]
    fn test_format_board_table_positions_and_totals() {
        let users = vec![sample_user("alpha", 1500.25), sample_user("beta", 42.0)];
        let result = format_board_table(&users, false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("1."));
        assert!(lines[0].contains("1,500.25"));
        assert!(lines[0].contains("alpha"));
        assert!(lines[1].contains("2."));
        assert!(lines[1].contains("beta"));
    }

    #[test]
    fn test_format_disclaimer_none_when_complete() {
        let result = LeaderboardResult::default();
        assert!(format_disclaimer(&result).is_none());
    }

    #[test]
    fn test_format_disclaimer_lists_failed_levels_and_sources() {
        let result = LeaderboardResult {
            users: vec![],
            failed_levels: vec!["sonic-wave".to_string(), "cataclysm".to_string()],
            failed_sources: vec!["easy".to_string()],
        };
        let text = format_disclaimer(&result).unwrap();
        assert!(text.contains("could not be loaded: sonic-wave, cataclysm"));
        assert!(text.contains("sources could not be read"));
        assert!(text.contains("easy"));
    }

    #[test]
    fn test_format_user_detail_sections() {
        let user = UserAggregate {
            user: "SpaceUK".to_string(),
            total: 812.5,
            verified: vec![entry(1, "Bloodbath", 500.0, None)],
            completed: vec![entry(2, "Cataclysm", 300.0, None)],
            progressed: vec![entry(3, "Sonic Wave", 12.5, Some(93))],
        };

        let text = format_user_detail(2, &user, false);
        assert!(text.starts_with("#3 SpaceUK"));
        assert!(text.contains("812.5"));
        assert!(text.contains("Verified (1)"));
        assert!(text.contains("Completed (1)"));
        assert!(text.contains("Progressed (1)"));
        assert!(text.contains("93% Sonic Wave"));
        assert!(text.contains("+500"));
        assert!(text.contains("+12.5"));
    }

    #[test]
    fn test_format_user_detail_omits_empty_sections() {
        let user = UserAggregate {
            user: "solo".to_string(),
            total: 500.0,
            verified: vec![entry(1, "Bloodbath", 500.0, None)],
            completed: vec![],
            progressed: vec![],
        };

        let text = format_user_detail(0, &user, false);
        assert!(text.contains("Verified (1)"));
        assert!(!text.contains("Completed"));
        assert!(!text.contains("Progressed"));
    }

    #[test]
    fn test_format_level_list_marks_failures() {
        let levels = vec![
            LoadOutcome::Loaded(Level {
                name: "Bloodbath".to_string(),
                path: "bloodbath".to_string(),
                verifier: "Riot".to_string(),
                verification: String::new(),
                percent_to_qualify: 78,
                records: Vec::<Record>::new(),
            }),
            LoadOutcome::Failed { path: "sonic-wave".to_string() },
        ];

        let text = format_level_list(&levels, false);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].contains("Bloodbath"));
        assert!(lines[0].contains("verified by Riot"));
        assert!(lines[1].contains("failed to load: sonic-wave"));
    }

    #[test]
    fn test_format_editors() {
        let editors = vec![
            Editor { name: "alice".to_string(), role: Some("owner".to_string()), link: None },
            Editor { name: "bob".to_string(), role: None, link: None },
        ];
        let text = format_editors(&editors, false);
        assert!(text.contains("alice  owner"));
        assert!(text.contains("bob  editor"));
    }

    #[test]
    fn test_format_editors_empty() {
        assert_eq!(format_editors(&[], false), "No editors found.");
    }

    #[test]
    fn test_truncate_name_unicode_safe() {
        assert_eq!(truncate_name("Short", 20), "Short");
        assert_eq!(truncate_name("A very long level name", 10), "A very ...");
        assert_eq!(truncate_name("abcdef", 3), "abc");
    }
}
