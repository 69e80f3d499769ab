//! # Junbi - Workflow Execution Plan Preparation Engine
//!
//! **Junbi** turns a user-authored canvas graph (nodes + edges) and a set of
//! workflow variables into a validated, dependency-ordered list of
//! node-execution records, ready to be dispatched by an execution engine.
//! The canvas may be malformed in all the ways a live editor produces:
//! dangling edges, duplicate ids, disconnected components, diamond
//! dependencies, accidental cycles. Planning recovers from all of them and
//! produces a deterministic plan.
//!
//! ## Core Workflow
//!
//! The engine is format-agnostic. It operates on a canonical internal model
//! of a canvas. The primary workflow is:
//!
//! 1.  **Load Your Data**: Parse your canvas format (e.g., editor JSON) into
//!     your own Rust structs, or use the bundled [`canvas::RawCanvasData`].
//! 2.  **Convert to Junbi's Model**: Implement the [`canvas::IntoCanvas`]
//!     trait to translate into Junbi's [`canvas::CanvasData`].
//! 3.  **Plan**: Use [`plan::Planner::builder`] to configure a planning pass
//!     (run mode, start nodes, collaborators) and call `prepare()`.
//! 4.  **Dispatch**: Hand the ordered [`plan::ExecutionPlan`] to your
//!     execution engine. Running it is not Junbi's job.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use junbi::prelude::*;
//!
//! fn main() -> Result<()> {
//!     // 1. Load the canvas as emitted by the editor.
//!     let canvas_json = std::fs::read_to_string("path/to/canvas.json")?;
//!     let raw: RawCanvasData = serde_json::from_str(&canvas_json)?;
//!
//!     // 2. Convert into the canonical model.
//!     let canvas = raw.into_canvas()?;
//!
//!     // 3. Prepare a plan. Update mode reuses the canvas identities;
//!     //    create mode mirrors the whole graph into fresh ones first.
//!     let planner = Planner::builder(canvas, vec![])
//!         .mode(RunMode::Update)
//!         .build();
//!     let plan = planner.prepare()?;
//!
//!     // 4. Every record appears after all of its parents.
//!     for record in &plan.node_executions {
//!         println!("{} [{}] {}", record.node_id, record.status.as_str(), record.title);
//!     }
//!     Ok(())
//! }
//! ```

pub mod canvas;
pub mod error;
pub mod graph;
pub mod idgen;
pub mod mention;
pub mod plan;
pub mod prelude;
