//! Example: Building a small diagram with explicit cluster handles
//!
//! Renders with the built-in engine so it runs without Graphviz installed.

use nimbus::{
    Engine, OutputFormat, Renderer,
    color::Color,
    config::{AppConfig, RenderConfig, StyleConfig},
    draw::StrokeDefinition,
    semantic::{Category, DiagramBuilder, Direction, EdgeStyle},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building diagram...\n");

    let mut builder = DiagramBuilder::new("Three Tier Web App").with_direction(Direction::LeftToRight);
    let root = builder.root();

    // Edge of the network
    let dns = builder.node(root, "DNS", Category::Network)?;
    let lb = builder.node(root, "Load Balancer", Category::Network)?;

    // Application tier
    let app = builder.cluster(root, "App Tier")?;
    let web = builder.node(app, "Web", Category::Compute)?;
    let worker = builder.node(app, "Worker", Category::Compute)?;

    // Data tier, with a nested replica group
    let data = builder.cluster(root, "Data Tier")?;
    let primary = builder.node(data, "Primary", Category::Database)?;
    let replicas = builder.cluster(data, "Replicas")?;
    let replica = builder.node(replicas, "Replica", Category::Database)?;

    builder.chain(&[dns, lb, web], &EdgeStyle::default())?;
    builder.fan_in(
        &[web, worker],
        primary,
        &EdgeStyle::colored(Color::new("brown")?),
    )?;
    builder.link(
        primary,
        replica,
        &EdgeStyle::new(StrokeDefinition::dotted(Color::new("blue")?)).with_label("replication"),
    )?;

    let diagram = builder.build();

    println!("Created diagram:");
    println!("  Title: {}", diagram.title());
    println!("  Nodes: {}", diagram.nodes().len());
    println!("  Clusters: {}", diagram.clusters().len());
    println!("  Edges: {}", diagram.edges().len());
    println!();

    let renderer = Renderer::new(AppConfig::new(
        RenderConfig::new(Engine::Builtin, OutputFormat::Svg, None),
        StyleConfig::default(),
    ));

    println!("DOT source:\n{}", renderer.to_dot(&diagram)?);

    let path = renderer.render_to_file(&diagram, OutputFormat::Svg)?;
    println!("SVG written to: {}", path.display());

    Ok(())
}
