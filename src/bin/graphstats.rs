use std::{env, process};

use graphstats::cli::{self, CommandLineConfig};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{}", CommandLineConfig::help());
        return;
    }
    let arg_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    let config = match CommandLineConfig::from_args(&arg_refs) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(2);
        }
    };

    let graph = match cli::build_graph(&config) {
        Ok(graph) => graph,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };

    match cli::run_command(&graph, &config) {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{text}"),
            Err(err) => {
                eprintln!("failed to encode report: {err}");
                process::exit(1);
            }
        },
        Err(err) => {
            eprintln!("command failed: {err}");
            process::exit(1);
        }
    }
}
