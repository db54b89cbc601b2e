//! Integration tests for the Renderer API
//!
//! None of these tests need Graphviz installed: they exercise DOT output,
//! the built-in engine and the error paths.

use std::path::PathBuf;

use tempfile::tempdir;

use nimbus::{
    Engine, NimbusError, OutputFormat, Renderer,
    color::Color,
    config::{AppConfig, RenderConfig, StyleConfig},
    draw::StrokeDefinition,
    semantic::{Category, Diagram, DiagramBuilder, Direction, EdgeStyle, GraphError},
};

fn three_tier() -> Result<Diagram, NimbusError> {
    let mut builder = DiagramBuilder::new("Three Tier").with_direction(Direction::LeftToRight);
    let root = builder.root();
    let lb = builder.node(root, "Load Balancer", Category::Network)?;
    let app = builder.cluster(root, "App Tier")?;
    let web = builder.node(app, "Web", Category::Compute)?;
    let worker = builder.node(app, "Worker", Category::Compute)?;
    let data = builder.cluster(root, "Data Tier")?;
    let db = builder.node(data, "Postgres", Category::Database)?;

    builder.fan_out(lb, &[web, worker], &EdgeStyle::default())?;
    builder.fan_in(
        &[web, worker],
        db,
        &EdgeStyle::new(StrokeDefinition::dashed(Color::new("blue").unwrap())),
    )?;
    Ok(builder.build())
}

fn renderer(engine: Engine, output_dir: Option<PathBuf>) -> Renderer {
    Renderer::new(AppConfig::new(
        RenderConfig::new(engine, OutputFormat::Svg, output_dir),
        StyleConfig::default(),
    ))
}

#[test]
fn test_to_dot_contains_every_element() {
    let diagram = three_tier().expect("Failed to build diagram");
    let dot = Renderer::default()
        .to_dot(&diagram)
        .expect("Failed to lower diagram");

    for label in ["Load Balancer", "Web", "Worker", "Postgres", "App Tier", "Data Tier"] {
        assert!(dot.contains(label), "DOT should mention {label}");
    }
    assert_eq!(dot.matches("->").count(), 4);
    assert_eq!(dot.matches("subgraph").count(), 2);
}

#[test]
fn test_dot_output_is_engine_independent() {
    let diagram = three_tier().unwrap();

    let from_graphviz = renderer(Engine::Graphviz, None)
        .render(&diagram, OutputFormat::Dot)
        .unwrap();
    let from_builtin = renderer(Engine::Builtin, None)
        .render(&diagram, OutputFormat::Dot)
        .unwrap();

    assert_eq!(from_graphviz, from_builtin);
}

#[test]
fn test_builtin_engine_rejects_raster_formats() {
    let diagram = three_tier().unwrap();
    let result = renderer(Engine::Builtin, None).render(&diagram, OutputFormat::Png);

    match result {
        Err(NimbusError::UnsupportedFormat { engine, format }) => {
            assert_eq!(engine, Engine::Builtin);
            assert_eq!(format, OutputFormat::Png);
        }
        other => panic!("Expected UnsupportedFormat, got {other:?}"),
    }
}

#[test]
fn test_builtin_engine_renders_svg() {
    let diagram = three_tier().unwrap();
    let svg = renderer(Engine::Builtin, None)
        .render(&diagram, OutputFormat::Svg)
        .expect("Built-in engine should render SVG");
    let svg = String::from_utf8(svg).expect("SVG should be UTF-8");

    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains("Postgres"));
}

#[test]
fn test_render_to_file_targets_stable_path() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let out_dir = temp_dir.path().join("nested");
    let diagram = three_tier().unwrap();
    let renderer = renderer(Engine::Builtin, Some(out_dir.clone()));

    let first = renderer
        .render_to_file(&diagram, OutputFormat::Dot)
        .expect("Failed to write diagram");
    let second = renderer
        .render_to_file(&diagram, OutputFormat::Dot)
        .expect("Failed to rewrite diagram");

    assert_eq!(first, out_dir.join("three_tier.dot"));
    assert_eq!(first, second);
    let written = std::fs::read_to_string(&first).unwrap();
    assert!(written.contains("Postgres"));
}

#[test]
fn test_graph_errors_convert_into_nimbus_error() {
    let other = DiagramBuilder::new("other");
    let mut builder = DiagramBuilder::new("mine");

    let err: NimbusError = builder
        .node(other.root(), "Stray", Category::Storage)
        .unwrap_err()
        .into();
    assert!(matches!(
        err,
        NimbusError::Graph(GraphError::ForeignCluster(_))
    ));
}

#[test]
fn test_invalid_style_color_fails_lowering() {
    let diagram = three_tier().unwrap();
    let renderer = Renderer::new(AppConfig::new(
        RenderConfig::default(),
        StyleConfig::default().with_background_color("not-a-color"),
    ));

    let result = renderer.to_dot(&diagram);

    assert!(matches!(result, Err(NimbusError::Config(msg)) if msg.contains("background")));
}
