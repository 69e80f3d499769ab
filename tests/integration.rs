//! Integration tests for Junbi
//!
//! End-to-end tests that walk the full pipeline: editor JSON -> canonical
//! canvas -> prepared plan -> persisted artifact.
mod common;
use junbi::prelude::*;

const CANVAS_JSON: &str = r#"{
    "nodes": [
        {
            "id": "start-1",
            "type": "start",
            "data": { "entityId": "start-entity", "title": "Start" }
        },
        {
            "id": "ask-1",
            "type": "skillResponse",
            "data": {
                "entityId": "ask-entity",
                "title": "Ask",
                "contentPreview": "cached answer",
                "metadata": {
                    "query": "Write a report on {{topic}}",
                    "contextItems": [
                        {
                            "type": "resource",
                            "entityId": "res-1",
                            "title": "old.pdf",
                            "withHistory": false
                        }
                    ]
                }
            }
        },
        {
            "id": "doc-1",
            "type": "document",
            "data": { "entityId": "doc-entity", "title": "Report" }
        }
    ],
    "edges": [
        { "source": "start-1", "target": "ask-1" },
        { "source": "ask-1", "target": "doc-1" },
        { "source": "ask-1", "target": "missing-node" }
    ]
}"#;

const VARIABLES_JSON: &str = r#"[
    {
        "name": "topic",
        "variableType": "string",
        "value": [ { "type": "text", "text": "graph planning" } ]
    },
    {
        "name": "spec_doc",
        "variableType": "resource",
        "value": [
            {
                "type": "resource",
                "resource": { "entityId": "res-1", "name": "spec.pdf", "fileType": "pdf" }
            }
        ]
    }
]"#;

fn load_fixture() -> (CanvasData, Vec<WorkflowVariable>) {
    let raw: RawCanvasData = serde_json::from_str(CANVAS_JSON).expect("canvas JSON parses");
    let canvas = raw.into_canvas().expect("canvas converts");
    let raw_vars: Vec<RawWorkflowVariable> =
        serde_json::from_str(VARIABLES_JSON).expect("variables JSON parses");
    let variables = raw_vars
        .into_iter()
        .map(WorkflowVariable::try_from)
        .collect::<std::result::Result<Vec<_>, _>>()
        .expect("variables convert");
    (canvas, variables)
}

#[test]
fn test_end_to_end_update_plan() {
    let (canvas, variables) = load_fixture();
    let plan = Planner::builder(canvas, variables)
        .build()
        .prepare()
        .expect("plan prepares");

    let ids: Vec<&str> = plan
        .node_executions
        .iter()
        .map(|r| r.node_id.as_str())
        .collect();
    assert_eq!(ids, ["start-1", "ask-1", "doc-1"]);

    // Default start set is the root, so the whole canvas is in scope and
    // both re-runnable nodes re-run.
    let ask = &plan.node_executions[1];
    assert_eq!(ask.status, NodeStatus::Init);
    assert_eq!(
        ask.processed_query.as_deref(),
        Some("Write a report on graph planning")
    );
    assert_eq!(
        ask.original_query.as_deref(),
        Some("Write a report on graph planning")
    );

    // The dangling edge to "missing-node" was dropped during indexing.
    let doc = &plan.node_executions[2];
    assert_eq!(doc.parent_node_ids, ["ask-1"]);
    assert_eq!(doc.connect_to.len(), 1);
    assert_eq!(doc.connect_to[0].entity_id, "ask-entity");
}

#[test]
fn test_end_to_end_statuses_follow_start_subtree() {
    let (canvas, variables) = load_fixture();
    let plan = Planner::builder(canvas, variables)
        .start_nodes(["ask-1".to_string()])
        .build()
        .prepare()
        .unwrap();

    let status_of = |id: &str| {
        plan.node_executions
            .iter()
            .find(|r| r.node_id == id)
            .unwrap()
            .status
    };
    assert_eq!(status_of("start-1"), NodeStatus::Finish);
    assert_eq!(status_of("ask-1"), NodeStatus::Init);
    assert_eq!(status_of("doc-1"), NodeStatus::Init);
}

#[test]
fn test_unknown_node_type_fails_conversion() {
    let json = r#"{
        "nodes": [
            { "id": "n1", "type": "hologram", "data": { "entityId": "e1" } }
        ],
        "edges": []
    }"#;
    let raw: RawCanvasData = serde_json::from_str(json).unwrap();

    match raw.into_canvas() {
        Err(CanvasConversionError::UnknownNodeType { node_id, type_name }) => {
            assert_eq!(node_id, "n1");
            assert_eq!(type_name, "hologram");
        }
        other => panic!("expected UnknownNodeType, got {other:?}"),
    }
}

#[test]
fn test_plan_artifact_round_trip() {
    let (canvas, variables) = load_fixture();
    let plan = Planner::builder(canvas, variables)
        .build()
        .prepare()
        .unwrap();

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("plan.bin");
    let path = path.to_str().expect("utf-8 path");

    PlanArtifact::new(plan.clone()).save(path).expect("artifact saves");
    let loaded = PlanArtifact::from_file(path).expect("artifact loads");

    assert_eq!(loaded.plan, plan);
}

#[test]
fn test_plan_artifact_rejects_garbage() {
    assert!(PlanArtifact::from_bytes(&[0xff, 0x00, 0x13, 0x37]).is_err());
}

#[test]
fn test_plan_serializes_with_camel_case_wire_names() {
    let (canvas, variables) = load_fixture();
    let plan = Planner::builder(canvas, variables)
        .build()
        .prepare()
        .unwrap();

    let json = serde_json::to_value(&plan).unwrap();
    let first = &json["nodeExecutions"][0];
    assert!(first.get("nodeId").is_some());
    assert!(first.get("entityId").is_some());
    assert!(first.get("parentNodeIds").is_some());
    assert_eq!(json["startNodes"][0], "start-1");
}
