use assert_cmd::Command;
use graphstats::cli::{CommandLineConfig, build_graph, run_command};
use serde_json::Value;

fn run_json(args: &[&str]) -> Value {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_graphstats"));
    cmd.args(args);
    let output = cmd.output().expect("run");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("json")
}

#[test]
fn test_cli_exits_with_success_on_help() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_graphstats"));
    cmd.arg("--help");
    cmd.assert().success();
}

#[test]
fn test_cli_summary_command() {
    let report = run_json(&["--model", "er", "--nodes", "6", "--density", "1.0", "--command", "summary"]);
    assert_eq!(report["num_edges"], 15);
    assert_eq!(report["num_components"], 1);
    assert_eq!(report["density"], 1.0);
}

#[test]
fn test_cli_components_command() {
    let report = run_json(&[
        "--model",
        "clustered",
        "--nodes",
        "12",
        "--communities",
        "3",
        "--density",
        "1.0",
        "components",
    ]);
    let sizes = report["sizes"].as_array().expect("sizes");
    let total: u64 = sizes.iter().map(|s| s.as_u64().expect("size")).sum();
    assert_eq!(total, 12);
    assert_eq!(report["assignment"].as_array().expect("assignment").len(), 12);
}

#[test]
fn test_cli_threshold_command() {
    let report = run_json(&[
        "--model",
        "sf",
        "--nodes",
        "20",
        "--degree",
        "2",
        "--strategy",
        "pathsharing",
        "--target",
        "3",
        "--command",
        "threshold-components",
    ]);
    assert!(report["summary"]["num_components"].as_u64().expect("count") >= 3);
    assert!(report["log"].as_array().expect("log").len() >= 2);
}

#[test]
fn test_cli_rejects_unknown_flag() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_graphstats"));
    cmd.arg("--bogus");
    cmd.assert().code(2);
}

#[test]
fn test_cli_reports_unknown_command() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_graphstats"));
    cmd.args(["--nodes", "5", "--command", "nope"]);
    cmd.assert().code(1);
}

#[test]
fn test_config_parsing() {
    let args = ["graphstats", "--nodes", "10", "--seed", "9", "--target", "4", "communities"];
    let config = CommandLineConfig::from_args(&args).expect("config");
    assert_eq!(config.nodes, 10);
    assert_eq!(config.seed, 9);
    assert_eq!(config.target, Some(4));
    assert_eq!(config.command, "communities");
    assert!(CommandLineConfig::from_args(&["graphstats", "--nodes"]).is_err());
    assert!(CommandLineConfig::from_args(&["graphstats", "--nodes", "ten"]).is_err());
}

#[test]
fn test_run_command_in_process() {
    let config = CommandLineConfig {
        nodes: 8,
        density: 0.5,
        command: "communities".to_string(),
        ..CommandLineConfig::default()
    };
    let graph = build_graph(&config).expect("graph");
    assert!(graph.stats_cache().is_some());
    let report = run_command(&graph, &config).expect("report");
    let total: u64 = report
        .as_array()
        .expect("communities")
        .iter()
        .map(|c| c["size"].as_u64().expect("size"))
        .sum();
    assert_eq!(total, 8);

    let bad = CommandLineConfig {
        model: "lattice".to_string(),
        ..CommandLineConfig::default()
    };
    assert!(build_graph(&bad).is_err());
}
