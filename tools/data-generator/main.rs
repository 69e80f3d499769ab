use clap::Parser;
use rand::Rng;
use serde_json::json;
use std::fs;

/// A CLI tool to generate random canvas fixtures for the junbi planner
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_canvas.json")]
    output: String,

    /// The number of nodes to generate (including the start node)
    #[arg(long, default_value_t = 12)]
    nodes: usize,

    /// The number of extra random edges beyond the spanning chain
    #[arg(long, default_value_t = 6)]
    edges: usize,

    /// Insert a back-edge so the generated canvas contains a cycle
    #[arg(long, default_value_t = false)]
    cycle: bool,
}

const NODE_TYPES: &[&str] = &["skillResponse", "document", "codeArtifact", "image", "memo"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.nodes == 0 {
        eprintln!("Error: --nodes must be at least 1");
        std::process::exit(1);
    }

    println!(
        "Generating canvas ({} nodes, ~{} extra edges, cycle: {})...",
        cli.nodes, cli.edges, cli.cycle
    );

    let mut nodes = Vec::with_capacity(cli.nodes);
    nodes.push(json!({
        "id": "node-000",
        "type": "start",
        "data": { "entityId": "entity-000", "title": "Start" }
    }));
    for i in 1..cli.nodes {
        let node_type = NODE_TYPES[rng.random_range(0..NODE_TYPES.len())];
        let mut data = json!({
            "entityId": format!("entity-{:03}", i),
            "title": format!("Node {}", i)
        });
        if node_type == "skillResponse" {
            data["metadata"] = json!({
                "query": format!("Summarize step {} for {{{{topic}}}}", i),
                "contextItems": []
            });
        }
        nodes.push(json!({
            "id": format!("node-{:03}", i),
            "type": node_type,
            "data": data
        }));
    }

    // A spanning chain keeps every node reachable from the start node.
    let mut edges = Vec::new();
    for i in 1..cli.nodes {
        let parent = rng.random_range(0..i);
        edges.push(json!({
            "source": format!("node-{:03}", parent),
            "target": format!("node-{:03}", i)
        }));
    }
    for _ in 0..cli.edges {
        let a = rng.random_range(0..cli.nodes);
        let b = rng.random_range(0..cli.nodes);
        if a < b {
            edges.push(json!({
                "source": format!("node-{:03}", a),
                "target": format!("node-{:03}", b)
            }));
        }
    }
    if cli.cycle && cli.nodes > 2 {
        edges.push(json!({
            "source": format!("node-{:03}", cli.nodes - 1),
            "target": "node-001"
        }));
    }

    let edge_count = edges.len();
    let canvas = json!({ "nodes": nodes, "edges": edges });
    fs::write(&cli.output, serde_json::to_string_pretty(&canvas)?)?;

    println!(
        "Successfully generated canvas with {} nodes and {} edges at '{}'",
        cli.nodes, edge_count, cli.output
    );
    Ok(())
}
