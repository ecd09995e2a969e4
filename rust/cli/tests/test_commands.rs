use std::fs;

use tablejudge_cli::{exit_code, run};

fn run_cli(args: &[&str]) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let mut argv = vec!["tablejudge"];
    argv.extend_from_slice(args);
    let code = run(argv, &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
fn tournament_prints_ranked_standings() {
    let (code, out, err) = run_cli(&[
        "tournament",
        "--games",
        "2",
        "--hand-limit",
        "30",
        "--agents",
        "call,baseline",
        "--seed",
        "7",
        "--time-limit",
        "1",
    ]);
    assert_eq!(code, exit_code::SUCCESS, "stderr: {}", err);
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[0].starts_with("Rank"));
    assert!(out.contains("call"));
    assert!(out.contains("baseline"));
    assert!(out.contains("Games: 2"));
}

#[test]
fn hands_report_each_hand_and_final_stacks() {
    let (code, out, err) = run_cli(&[
        "hands",
        "--hands",
        "3",
        "--agents",
        "call,call",
        "--seed",
        "1",
    ]);
    assert_eq!(code, exit_code::SUCCESS, "stderr: {}", err);
    assert!(out.contains("Hand 1:"));
    assert!(out.contains("Hand 3:"));
    assert!(out.contains("Seat 0 (call):"));
    assert!(out.contains("Seat 1 (call):"));
}

#[test]
fn missing_agents_are_filled_with_random() {
    let (code, out, err) = run_cli(&[
        "hands", "--hands", "1", "--seats", "3", "--agents", "call", "--seed", "3",
    ]);
    assert_eq!(code, exit_code::SUCCESS, "stderr: {}", err);
    assert!(err.contains("2 of 3 seats have no agent"));
    assert!(out.contains("Seat 2 (random):"));
}

#[test]
fn output_file_holds_one_record_per_hand() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hands.jsonl");
    let path_str = path.to_string_lossy().to_string();
    let (code, _, err) = run_cli(&[
        "hands",
        "--hands",
        "4",
        "--agents",
        "call,call",
        "--seed",
        "11",
        "--output",
        &path_str,
    ]);
    assert_eq!(code, exit_code::SUCCESS, "stderr: {}", err);

    let contents = fs::read_to_string(&path).unwrap();
    let records: Vec<serde_json::Value> = contents
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 4);
    for r in &records {
        let chips: u64 = r["chips"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c.as_u64().unwrap())
            .sum();
        assert_eq!(chips, 1000);
    }
}

#[test]
fn unknown_agent_is_an_error() {
    let (code, out, err) = run_cli(&["tournament", "--agents", "call,oracle", "--seed", "1"]);
    assert_eq!(code, exit_code::ERROR);
    assert!(out.is_empty());
    assert!(err.contains("Unknown agent type: oracle"), "{}", err);
}

#[test]
fn more_agents_than_seats_is_an_error() {
    let (code, _, err) = run_cli(&["hands", "--seats", "2", "--agents", "call,call,call"]);
    assert_eq!(code, exit_code::ERROR);
    assert!(err.contains("3 agents for 2 seats"), "{}", err);
}

#[test]
fn agent_list_sizes_the_table() {
    let (code, out, err) = run_cli(&[
        "hands", "--hands", "1", "--agents", "call,call,baseline", "--seed", "4",
    ]);
    assert_eq!(code, exit_code::SUCCESS, "stderr: {}", err);
    assert!(!err.contains("have no agent"));
    assert!(out.contains("Seat 2 (baseline):"));
}

#[test]
fn huge_time_limit_is_a_config_error() {
    let (code, _, err) = run_cli(&["hands", "--time-limit", "1e20"]);
    assert_eq!(code, exit_code::ERROR);
    assert!(err.contains("time_limit"), "{}", err);
}

#[test]
fn zero_games_is_rejected() {
    let (code, _, err) = run_cli(&["tournament", "--games", "0"]);
    assert_eq!(code, exit_code::ERROR);
    assert!(err.contains("games must be >= 1"));
}

#[test]
fn invalid_seat_count_is_rejected() {
    let (code, _, err) = run_cli(&["hands", "--seats", "11"]);
    assert_eq!(code, exit_code::ERROR);
    assert!(err.contains("seats must be between 2 and 10"));
}

#[test]
fn bad_flag_value_prints_usage() {
    let (code, out, err) = run_cli(&["tournament", "--games", "many"]);
    assert_eq!(code, exit_code::ERROR);
    assert!(out.is_empty());
    assert!(err.contains("Usage: tablejudge <command> [options]"));
}

#[test]
fn cfg_prints_values_with_sources() {
    let (code, out, _) = run_cli(&["cfg"]);
    assert_eq!(code, exit_code::SUCCESS);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    for key in ["seats", "buy_in", "big_blind", "time_limit", "hand_limit", "agents"] {
        assert!(json[key].get("value").is_some(), "missing {}", key);
        assert!(json[key]["source"].is_string(), "missing source for {}", key);
    }
}
