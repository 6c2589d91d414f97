//! Command-line front end: generate a graph, run one analysis, report JSON.

use rand::{SeedableRng, rngs::StdRng};
use serde::Serialize;
use serde_json::{Value, json};

use crate::{
    cache,
    communities,
    errors::GraphError,
    generators,
    graph::Graph,
    stats::{components, summary},
    threshold::{self, EdgeBetweennessRemoval, EdgeRemoval, PathSharingRemoval},
};

#[derive(Clone, Debug, PartialEq)]
pub struct CommandLineConfig {
    pub model: String,
    pub nodes: u32,
    pub density: f64,
    pub degree: u32,
    pub communities: u32,
    pub seed: u64,
    pub target: Option<u32>,
    pub strategy: String,
    pub command: String,
}

impl Default for CommandLineConfig {
    fn default() -> Self {
        Self {
            model: String::from("er"),
            nodes: 64,
            density: 0.1,
            degree: 4,
            communities: 4,
            seed: 1,
            target: None,
            strategy: String::from("betweenness"),
            command: String::from("summary"),
        }
    }
}

impl CommandLineConfig {
    pub fn from_args(args: &[&str]) -> Result<Self, String> {
        let mut config = Self::default();
        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            match *arg {
                "--model" => config.model = value_of(&mut iter, arg)?.to_string(),
                "--nodes" => config.nodes = parse_value(&mut iter, arg)?,
                "--density" => config.density = parse_value(&mut iter, arg)?,
                "--degree" => config.degree = parse_value(&mut iter, arg)?,
                "--communities" => config.communities = parse_value(&mut iter, arg)?,
                "--seed" => config.seed = parse_value(&mut iter, arg)?,
                "--target" => config.target = Some(parse_value(&mut iter, arg)?),
                "--strategy" => config.strategy = value_of(&mut iter, arg)?.to_string(),
                "--command" => config.command = value_of(&mut iter, arg)?.to_string(),
                other if other.starts_with('-') => {
                    return Err(format!("unknown flag {other}"));
                }
                _ => {
                    config.command = arg.to_string();
                }
            }
        }
        Ok(config)
    }

    pub fn help() -> &'static str {
        "Usage: graphstats [--model er|sf|sw|clustered] [--nodes N] [--density P] [--degree K]\n\
         \x20                 [--communities C] [--seed S] [--strategy betweenness|pathsharing]\n\
         \x20                 [--target N] [--command summary|components|communities|\n\
         \x20                  threshold-edges|threshold-components|threshold-modularity]\n"
    }
}

fn value_of<'a, 'b: 'a, I>(iter: &mut I, flag: &str) -> Result<&'b str, String>
where
    I: Iterator<Item = &'a &'b str>,
{
    iter.next()
        .copied()
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn parse_value<'a, 'b: 'a, I, T>(iter: &mut I, flag: &str) -> Result<T, String>
where
    I: Iterator<Item = &'a &'b str>,
    T: std::str::FromStr,
{
    let raw = value_of(iter, flag)?;
    raw.parse()
        .map_err(|_| format!("{flag} expects a number, got {raw}"))
}

/// Generates the graph described by `config`, with a statistics cache
/// attached.
pub fn build_graph(config: &CommandLineConfig) -> Result<Graph, GraphError> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut graph = match config.model.as_str() {
        "er" => generators::erdos_renyi(config.nodes, config.density, &mut rng)?,
        "sf" => generators::scale_free(config.nodes, (config.degree / 2).max(1), &mut rng)?,
        "sw" => generators::small_world(config.nodes, config.degree, config.density, &mut rng)?,
        "clustered" => generators::clustered(
            config.nodes,
            config.communities,
            config.density,
            config.density / 10.0,
            &mut rng,
        )?,
        other => {
            return Err(GraphError::invalid_input(format!("unknown model {other}")));
        }
    };
    cache::init(&mut graph);
    Ok(graph)
}

/// Runs `config.command` on `graph` and returns the JSON report.
pub fn run_command(graph: &Graph, config: &CommandLineConfig) -> Result<Value, GraphError> {
    match config.command.as_str() {
        "summary" => to_json(&summary::summarize(graph)?),
        "components" => Ok(json!({
            "sizes": components::component_sizes(graph)?,
            "assignment": components::components(graph)?,
        })),
        "communities" => to_json(&communities::communities(graph)?),
        "threshold-edges" | "threshold-components" | "threshold-modularity" => {
            let mut strategy = strategy_for(&config.strategy)?;
            let result = match config.command.as_str() {
                "threshold-edges" => {
                    let target = config.target.unwrap_or(graph.num_edges() / 2);
                    threshold::threshold_edges(graph, strategy.as_mut(), target)?
                }
                "threshold-components" => {
                    let target = config.target.unwrap_or(2);
                    threshold::threshold_components(graph, strategy.as_mut(), target, 0)?
                }
                _ => {
                    let budget = config.target.unwrap_or(graph.num_edges());
                    threshold::threshold_modularity(graph, strategy.as_mut(), budget)?
                }
            };
            let report = to_json(&summary::summarize(&result)?)?;
            Ok(json!({
                "summary": report,
                "log": result.log().messages(),
            }))
        }
        other => Err(GraphError::invalid_input(format!("unknown command {other}"))),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, GraphError> {
    serde_json::to_value(value)
        .map_err(|err| GraphError::invalid_input(format!("cannot encode report: {err}")))
}

fn strategy_for(name: &str) -> Result<Box<dyn EdgeRemoval>, GraphError> {
    match name {
        "betweenness" => Ok(Box::new(EdgeBetweennessRemoval::new())),
        "pathsharing" => Ok(Box::new(PathSharingRemoval::new())),
        other => Err(GraphError::invalid_input(format!("unknown strategy {other}"))),
    }
}
