//! Tests for create-mode mirroring, variable binding, and the default
//! mention processor.
mod common;
use common::*;
use junbi::prelude::*;

#[test]
fn test_mirror_assigns_fresh_identities() {
    let canvas = fan_out_canvas();
    let ids = SequentialIds::new();
    let mirror = CanvasMirror::new(&ids);

    let mirrored = mirror.mirror(&canvas, |node| node);

    assert_eq!(mirrored.canvas.nodes.len(), canvas.nodes.len());
    assert_eq!(mirrored.canvas.edges.len(), canvas.edges.len());
    for (original, cloned) in canvas.nodes.iter().zip(&mirrored.canvas.nodes) {
        assert_ne!(original.id, cloned.id);
        assert_ne!(original.data.entity_id, cloned.data.entity_id);
    }
    // Edges reference the new node ids, never the old ones.
    for edge in &mirrored.canvas.edges {
        assert!(mirrored.canvas.nodes.iter().any(|n| n.id == edge.source));
        assert!(mirrored.canvas.nodes.iter().any(|n| n.id == edge.target));
    }
}

#[test]
fn test_mirror_leaves_input_untouched() {
    let canvas = fan_out_canvas();
    let before = format!("{canvas:?}");

    let ids = SequentialIds::new();
    CanvasMirror::new(&ids).mirror(&canvas, |node| node);

    assert_eq!(format!("{canvas:?}"), before);
}

#[test]
fn test_mirror_drops_unmappable_edges() {
    let mut canvas = fan_out_canvas();
    canvas.edges.push(edge("A", "ghost"));

    let ids = SequentialIds::new();
    let mirrored = CanvasMirror::new(&ids).mirror(&canvas, |node| node);

    // The dangling edge cannot be remapped and disappears.
    assert_eq!(mirrored.canvas.edges.len(), canvas.edges.len() - 1);
}

#[test]
fn test_mirror_applies_node_processor() {
    let mut canvas = fan_out_canvas();
    canvas.nodes[2].data.content_preview = Some("cached".to_string());

    let ids = SequentialIds::new();
    let mirrored = CanvasMirror::new(&ids).mirror(&canvas, |mut node| {
        node.data.content_preview = None;
        node
    });

    assert!(
        mirrored
            .canvas
            .nodes
            .iter()
            .all(|n| n.data.content_preview.is_none())
    );
}

#[test]
fn test_mirror_remaps_context_item_entities() {
    let mut follow_up = skill_node("q2", "continue");
    if let NodeMetadata::SkillResponse(meta) = &mut follow_up.data.metadata {
        meta.context_items.push(ContextItem {
            item_type: NodeType::SkillResponse,
            entity_id: "q1-entity".to_string(),
            title: "first answer".to_string(),
            with_history: true,
        });
        meta.context_items.push(ContextItem {
            item_type: NodeType::Resource,
            entity_id: "external-upload".to_string(),
            title: "upload.pdf".to_string(),
            with_history: false,
        });
    }
    let canvas = CanvasData {
        nodes: vec![skill_node("q1", "first"), follow_up],
        edges: vec![edge("q1", "q2")],
    };

    let ids = SequentialIds::new();
    let mirrored = CanvasMirror::new(&ids).mirror(&canvas, |node| node);

    let q1_entity = &mirrored.canvas.nodes[0].data.entity_id;
    let meta = mirrored.canvas.nodes[1].skill_metadata().unwrap();
    // In-canvas reference follows the mirrored entity...
    assert_eq!(&meta.context_items[0].entity_id, q1_entity);
    // ...while external entities keep their identity.
    assert_eq!(meta.context_items[1].entity_id, "external-upload");
}

#[test]
fn test_create_mode_ignores_caller_start_ids() {
    let planner = Planner::builder(fan_out_canvas(), vec![])
        .mode(RunMode::Create)
        .start_nodes(["A".to_string()])
        .id_generator(Box::new(SequentialIds::new()))
        .build();
    let plan = planner.prepare().unwrap();

    // "A" names a pre-mirror identity; the fresh run starts from the
    // mirrored graph's roots instead.
    assert_eq!(plan.start_nodes.len(), 1);
    assert!(!plan.start_nodes.contains(&"A".to_string()));
    assert_eq!(plan.node_executions.len(), 4);
}

#[test]
fn test_create_mode_rebinds_queries_from_original_text() {
    let mut canvas = fan_out_canvas();
    canvas.nodes[1].data.content_preview = Some("stale preview".to_string());

    let planner = Planner::builder(canvas, simple_variables())
        .mode(RunMode::Create)
        .id_generator(Box::new(SequentialIds::new()))
        .build();
    let plan = planner.prepare().unwrap();

    let skill = plan
        .node_executions
        .iter()
        .find(|r| r.node_type == NodeType::SkillResponse)
        .expect("mirrored skill node missing");
    // Rebound from the original query text, with values substituted.
    assert_eq!(skill.original_query.as_deref(), Some("Summarize rust graphs"));
    assert_eq!(skill.processed_query.as_deref(), Some("Summarize rust graphs"));
}

#[test]
fn test_create_mode_plans_against_mirrored_identities() {
    let canvas = fan_out_canvas();
    let original_ids: Vec<String> = canvas.nodes.iter().map(|n| n.id.clone()).collect();

    let planner = Planner::builder(canvas, vec![])
        .mode(RunMode::Create)
        .id_generator(Box::new(SequentialIds::new()))
        .build();
    let plan = planner.prepare().unwrap();

    for record in &plan.node_executions {
        assert!(!original_ids.contains(&record.node_id));
    }
}

#[test]
fn test_update_context_items_is_update_only() {
    let items = vec![
        ContextItem {
            item_type: NodeType::Resource,
            entity_id: "res-1".to_string(),
            title: "old title".to_string(),
            with_history: false,
        },
        ContextItem {
            item_type: NodeType::Document,
            entity_id: "res-1".to_string(),
            title: "not a resource item".to_string(),
            with_history: false,
        },
    ];
    let variables = simple_variables();

    let updated = update_context_items_from_variables(&items, &variables);

    // Matching resource item picks up the variable's resource name.
    assert_eq!(updated[0].title, "spec.pdf");
    // Type mismatch leaves the item alone.
    assert_eq!(updated[1].title, "not a resource item");
    // No insertion: the list never grows.
    assert_eq!(updated.len(), items.len());
}

#[test]
fn test_default_processor_substitutes_and_records_references() {
    let variables = simple_variables();
    let ctx = MentionContext {
        variables: &variables,
        replace_vars: true,
        toolset_lookup: None,
    };
    let processed = DefaultMentionProcessor
        .process("Write about {{topic}} using {{spec_doc}} and {{unknown}}", &ctx)
        .unwrap();

    assert_eq!(
        processed.llm_input_query,
        "Write about rust graphs using spec.pdf and {{unknown}}"
    );
    assert_eq!(processed.referenced_variables, ["topic", "spec_doc"]);
    assert_eq!(processed.resource_vars.len(), 1);
    assert_eq!(processed.resource_vars[0].name, "spec_doc");
}

#[test]
fn test_default_processor_without_replacement_keeps_mentions() {
    let variables = simple_variables();
    let ctx = MentionContext {
        variables: &variables,
        replace_vars: false,
        toolset_lookup: None,
    };
    let processed = DefaultMentionProcessor
        .process("About {{topic}}", &ctx)
        .unwrap();

    assert_eq!(processed.updated_query, "About {{topic}}");
    assert_eq!(processed.referenced_variables, ["topic"]);
}

struct StaticToolsets;

impl ToolsetLookup for StaticToolsets {
    fn lookup_by_id(&self, id: &str) -> Option<ToolsetDefinition> {
        (id == "search").then(|| ToolsetDefinition {
            id: "search".to_string(),
            name: "Web Search".to_string(),
        })
    }
}

#[test]
fn test_default_processor_resolves_toolset_display_names() {
    let ctx = MentionContext {
        variables: &[],
        replace_vars: true,
        toolset_lookup: Some(&StaticToolsets),
    };
    let processed = DefaultMentionProcessor
        .process("Use {{toolset:search}} and {{toolset:missing}}", &ctx)
        .unwrap();

    assert_eq!(
        processed.updated_query,
        "Use Web Search and {{toolset:missing}}"
    );
}

#[test]
fn test_default_processor_keeps_unterminated_mention() {
    let ctx = MentionContext {
        variables: &[],
        replace_vars: true,
        toolset_lookup: None,
    };
    let processed = DefaultMentionProcessor.process("broken {{tail", &ctx).unwrap();

    assert_eq!(processed.updated_query, "broken {{tail");
}
