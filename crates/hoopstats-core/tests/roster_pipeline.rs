// Integration tests: default roster files through normalization, balancing
// and statistics, using only the library's public API.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use hoopstats_core::config::{ensure_config_files, load_config_from};
use hoopstats_core::roster::balance::{BalanceError, LeftoverPolicy};
use hoopstats_core::roster::player::{normalize_players, RawPlayer};
use hoopstats_core::roster::source::load_raw_players;
use hoopstats_core::roster::{assign_roster, RosterError};
use hoopstats_core::stats::TeamStats;

// ===========================================================================
// Test helpers
// ===========================================================================

fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .find(|dir| dir.join("defaults/players.csv").exists())
        .map(Path::to_path_buf)
        .expect("cannot locate defaults/ above the crate directory")
}

fn default_roster() -> Vec<RawPlayer> {
    load_raw_players(&project_root().join("defaults/players.csv")).unwrap()
}

fn default_teams() -> Vec<String> {
    vec!["Panthers".into(), "Bandits".into(), "Warriors".into()]
}

// ===========================================================================
// Default data
// ===========================================================================

#[test]
fn default_roster_has_eighteen_players() {
    let raw = default_roster();
    assert_eq!(raw.len(), 18);

    let players = normalize_players(&raw).unwrap();
    assert_eq!(players.len(), 18);
    assert_eq!(players.iter().filter(|p| p.experience).count(), 9);
    for (r, p) in raw.iter().zip(&players) {
        assert_eq!(r.name, p.name);
        assert_eq!(r.experience, p.experience_label());
    }
}

#[test]
fn guardian_counts_match_joined_names() {
    let raw = default_roster();
    let players = normalize_players(&raw).unwrap();
    for p in &players {
        assert!(
            (1..=2).contains(&p.guardians.len()),
            "{} has {:?}",
            p.name,
            p.guardians
        );
    }
    let matt = players.iter().find(|p| p.name == "Matt Gill").unwrap();
    assert_eq!(matt.guardians, vec!["Charles Gill", "Sylvia Gill"]);
}

#[test]
fn default_roster_balances_into_three_even_teams() {
    let assignment = assign_roster(&default_roster(), &default_teams(), LeftoverPolicy::Reject)
        .unwrap();
    assert!(assignment.unassigned.is_empty());

    let mut seen = HashSet::new();
    for team in &assignment.teams {
        assert_eq!(team.players.len(), 6);
        assert_eq!(team.experienced_count(), 3);
        assert_eq!(team.inexperienced_count(), 3);
        for p in &team.players {
            assert!(seen.insert(p.name.clone()), "{} is on two teams", p.name);
        }
    }
    assert_eq!(seen.len(), 18);
}

#[test]
fn default_team_stats() {
    let assignment = assign_roster(&default_roster(), &default_teams(), LeftoverPolicy::Reject)
        .unwrap();

    let panthers = TeamStats::from_team(&assignment.teams[0]).unwrap();
    assert_eq!(
        panthers.player_names,
        vec![
            "Jill Tanner",
            "Kimmy Stein",
            "Herschel Krustofski",
            "Arnold Willis",
            "Diego Soto",
            "Eva Gordon",
        ]
    );
    assert_eq!(panthers.guardian_names.len(), 11);
    assert_eq!(panthers.guardian_names[0], "Mark");
    assert_eq!(panthers.guardian_names[1], "Karen Tanner");

    let report = panthers.render(100);
    assert!(report.contains("Average height of player on team: 41.8 inches"));

    let bandits = TeamStats::from_team(&assignment.teams[1]).unwrap().render(100);
    assert!(bandits.contains("Average height of player on team: 42.0 inches"));

    let warriors = TeamStats::from_team(&assignment.teams[2]).unwrap().render(100);
    assert!(warriors.contains("Average height of player on team: 43.5 inches"));
}

#[test]
fn four_teams_cannot_split_the_default_roster() {
    let mut teams = default_teams();
    teams.push("Hornets".into());

    let err = assign_roster(&default_roster(), &teams, LeftoverPolicy::Reject).unwrap_err();
    assert!(matches!(
        err,
        RosterError::Balance(BalanceError::UnevenRoster { teams: 4, .. })
    ));

    let spread = assign_roster(&default_roster(), &teams, LeftoverPolicy::RoundRobin).unwrap();
    let sizes: Vec<usize> = spread.teams.iter().map(|t| t.players.len()).collect();
    assert_eq!(sizes.iter().sum::<usize>(), 18);
    assert_eq!(sizes, vec![5, 5, 4, 4]);
}

// ===========================================================================
// Config + roster files together
// ===========================================================================

#[test]
fn first_run_copies_defaults_and_loads_the_roster() {
    let tmp = std::env::temp_dir().join("hoopstats_pipeline_first_run");
    let _ = fs::remove_dir_all(&tmp);
    let defaults = tmp.join("defaults");
    fs::create_dir_all(&defaults).unwrap();
    let root = project_root();
    fs::copy(root.join("defaults/league.toml"), defaults.join("league.toml")).unwrap();
    fs::copy(root.join("defaults/players.csv"), defaults.join("players.csv")).unwrap();

    ensure_config_files(&tmp).unwrap();
    let config = load_config_from(&tmp).unwrap();
    let raw = load_raw_players(&config.roster_path()).unwrap();
    let assignment =
        assign_roster(&raw, &config.league.teams, config.roster.leftover_policy).unwrap();
    assert_eq!(assignment.teams.len(), 3);
    assert_eq!(assignment.teams[2].name, "Warriors");

    let _ = fs::remove_dir_all(&tmp);
}

#[test]
fn toml_roster_with_guardian_lists() {
    let tmp = std::env::temp_dir().join("hoopstats_pipeline_toml_roster");
    let _ = fs::remove_dir_all(&tmp);
    fs::create_dir_all(tmp.join("config")).unwrap();
    fs::write(
        tmp.join("config/league.toml"),
        r#"
[league]
name = "Test League"
teams = ["Home", "Away"]

[roster]
path = "players.toml"
"#,
    )
    .unwrap();
    fs::write(
        tmp.join("config/players.toml"),
        r#"
[[player]]
name = "A"
guardians = ["G1", "G2", "G3"]
experience = "YES"
height = "40 inches"

[[player]]
name = "B"
guardians = "G4"
experience = "NO"
height = "50 inches"

[[player]]
name = "C"
guardians = "G5 and G6"
experience = "YES"
height = "44 inches"

[[player]]
name = "D"
guardians = "G7"
experience = "NO"
height = "46 inches"
"#,
    )
    .unwrap();

    let config = load_config_from(&tmp).unwrap();
    let raw = load_raw_players(&config.roster_path()).unwrap();
    let assignment =
        assign_roster(&raw, &config.league.teams, config.roster.leftover_policy).unwrap();

    let home = TeamStats::from_team(&assignment.teams[0]).unwrap();
    assert_eq!(home.player_names, vec!["C", "D"]);
    assert_eq!(home.guardian_names, vec!["G5", "G6", "G7"]);

    let away = TeamStats::from_team(&assignment.teams[1]).unwrap();
    assert_eq!(away.player_names, vec!["A", "B"]);
    assert_eq!(away.guardian_names, vec!["G1", "G2", "G3", "G4"]);
    assert!((away.average_height - 45.0).abs() < f64::EPSILON);

    let _ = fs::remove_dir_all(&tmp);
}

#[test]
fn malformed_height_stops_the_pipeline() {
    let csv = "\
name,guardians,experience,height
A,G,YES,forty inches
B,G,NO,40 inches";
    let tmp = std::env::temp_dir().join("hoopstats_pipeline_bad_height");
    let _ = fs::remove_dir_all(&tmp);
    fs::create_dir_all(&tmp).unwrap();
    let path = tmp.join("players.csv");
    fs::write(&path, csv).unwrap();

    let raw = load_raw_players(&path).unwrap();
    let err = assign_roster(&raw, &["Only"], LeftoverPolicy::Reject).unwrap_err();
    assert!(matches!(err, RosterError::Normalize(_)));
    assert!(err.to_string().contains("forty inches"));

    let _ = fs::remove_dir_all(&tmp);
}
