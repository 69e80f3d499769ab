use clap::{Parser, ValueEnum};
use junbi::prelude::*;
use std::fs;
use std::time::Instant;

/// Define a CLI-specific enum for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeCli {
    /// Mirror the canvas into fresh identities before planning.
    Create,
    /// Reuse the canvas identities (resume / retry).
    Update,
}

impl From<ModeCli> for RunMode {
    fn from(mode: ModeCli) -> Self {
        match mode {
            ModeCli::Create => RunMode::Create,
            ModeCli::Update => RunMode::Update,
        }
    }
}

/// Prepare a workflow execution plan from a canvas JSON file
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the canvas JSON file (nodes + edges)
    canvas: String,

    /// Path to a workflow variables JSON file
    #[arg(short, long)]
    variables: Option<String>,

    /// Planning mode
    #[arg(short, long, value_enum, default_value_t = ModeCli::Update)]
    mode: ModeCli,

    /// Start node ids (defaults to the graph's roots)
    #[arg(short, long)]
    start: Vec<String>,

    /// Write the prepared plan artifact to this path (bincode)
    #[arg(long)]
    save: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    let canvas_json = fs::read_to_string(&cli.canvas)?;
    let raw: RawCanvasData = serde_json::from_str(&canvas_json)?;
    let canvas = raw.into_canvas()?;

    let variables = match &cli.variables {
        Some(path) => {
            let variables_json = fs::read_to_string(path)?;
            let raw_vars: Vec<RawWorkflowVariable> = serde_json::from_str(&variables_json)?;
            raw_vars
                .into_iter()
                .map(WorkflowVariable::try_from)
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
        None => Vec::new(),
    };

    println!(
        "Preparing plan for '{}' ({} nodes, {} edges, {} variables)...",
        cli.canvas,
        canvas.nodes.len(),
        canvas.edges.len(),
        variables.len()
    );

    let start_time = Instant::now();
    let planner = Planner::builder(canvas, variables)
        .mode(cli.mode.into())
        .start_nodes(cli.start.clone())
        .build();
    let plan = planner.prepare()?;
    println!(
        "Prepared {} records in {:.2?}",
        plan.node_executions.len(),
        start_time.elapsed()
    );

    if plan.node_executions.is_empty() {
        println!("-> Nothing to execute (empty start set).");
        return Ok(());
    }

    println!("Start nodes: {}", plan.start_nodes.join(", "));
    for (position, record) in plan.node_executions.iter().enumerate() {
        println!(
            "{:>3}. [{:<6}] {:<13} {}  (parents: {})",
            position + 1,
            record.status.as_str(),
            record.node_type.as_str(),
            record.node_id,
            if record.parent_node_ids.is_empty() {
                "-".to_string()
            } else {
                record.parent_node_ids.join(", ")
            }
        );
    }

    if let Some(path) = &cli.save {
        PlanArtifact::new(plan).save(path)?;
        println!("Saved plan artifact to '{}'", path);
    }

    Ok(())
}
