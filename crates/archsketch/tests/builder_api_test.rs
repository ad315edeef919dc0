//! Integration tests for the DiagramBuilder API

use std::{
    cell::Cell,
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use archsketch::{
    DiagramBuilder,
    config::{AppConfig, IconConfig, OutputConfig, StyleConfig},
    export::{self, Exporter, OutputFormat},
    semantic::{Category, ClusterHandle, Diagram, DiagramOptions, Edge, NodeHandle, Parent},
};

fn dot_builder(output: &Path) -> DiagramBuilder {
    DiagramBuilder::new(AppConfig::new(
        OutputConfig::new(OutputFormat::Dot, Some(output.to_path_buf())),
        IconConfig::default(),
        StyleConfig::default(),
    ))
}

/// Counts exports without drawing anything.
#[derive(Default)]
struct CountingExporter {
    calls: Cell<usize>,
}

impl Exporter for CountingExporter {
    fn export(&self, diagram: &Diagram) -> Result<PathBuf, export::Error> {
        self.calls.set(self.calls.get() + 1);
        Ok(PathBuf::from(diagram.title()))
    }
}

#[test]
fn test_builder_api_exists() {
    let _builder = DiagramBuilder::default();
}

#[test]
fn test_build_simple_diagram() {
    let builder = DiagramBuilder::default();
    let diagram = builder
        .build(DiagramOptions::new("Simple"), |scope| {
            let a = scope.add_node(Category::Ec2, "a");
            let b = scope.add_node(Category::Ec2, "b");
            scope.connect(a, b)?;
            Ok(())
        })
        .expect("Failed to build diagram");

    assert_eq!(diagram.node_count(), 2);
    assert_eq!(diagram.edge_count(), 1);
}

#[test]
fn test_render_dot_contains_clusters_and_edges() {
    let builder = DiagramBuilder::default();
    let diagram = builder
        .build(DiagramOptions::new("Dot Source"), |scope| {
            let mut vpc = scope.open_cluster("VPC");
            let a = vpc.add_node(Category::Ec2, "EC2 A");
            let b = vpc.add_node(Category::Ec2, "EC2 B");
            vpc.connect_with(a, b, Edge::new().with_label("SSM"))?;
            Ok(())
        })
        .expect("Failed to build diagram");

    let source = builder.render_dot(&diagram).expect("Failed to render");
    assert!(source.contains("digraph"), "Output should be a digraph");
    assert!(source.contains("cluster_0"), "Output should contain the VPC");
    assert!(source.contains("\"EC2 A\""), "Node labels should be quoted");
    assert!(source.contains("\"SSM\""), "Edge label should be present");
}

#[test]
fn test_handle_from_finished_diagram_is_reference_error() {
    let dir = tempdir().expect("Failed to create temp directory");
    let builder = dot_builder(dir.path());

    let mut stale: Option<NodeHandle> = None;
    builder
        .build(DiagramOptions::new("First"), |scope| {
            stale = Some(scope.add_node(Category::Ec2, "old"));
            Ok(())
        })
        .expect("Failed to build first diagram");
    let stale = stale.expect("handle captured");

    let result = builder.draw(DiagramOptions::new("Second"), |scope| {
        let fresh = scope.add_node(Category::Ec2, "new");
        scope.connect(fresh, stale)?;
        Ok(())
    });

    let err = result.expect_err("Stale handle should be rejected");
    assert!(err.is_reference_error(), "Unexpected error: {err}");
    assert!(
        fs::read_dir(dir.path()).unwrap().next().is_none(),
        "No output file should be written"
    );
}

#[test]
fn test_closed_cluster_is_scope_error() {
    let builder = DiagramBuilder::default();

    let result = builder.build(DiagramOptions::new("Closed"), |scope| {
        let closed: ClusterHandle = scope.open_cluster("VPC").handle();
        scope.add_node_in(Parent::Cluster(closed), Category::Ec2, "late")?;
        Ok(())
    });

    let err = result.expect_err("Closed cluster should be rejected");
    assert!(err.is_scope_error(), "Unexpected error: {err}");
}

#[test]
fn test_exporter_not_invoked_on_build_error() {
    let builder = DiagramBuilder::default();
    let exporter = CountingExporter::default();

    let mut foreign: Option<NodeHandle> = None;
    builder
        .build(DiagramOptions::new("Other"), |scope| {
            foreign = Some(scope.add_node(Category::Vpc, "elsewhere"));
            Ok(())
        })
        .unwrap();
    let foreign = foreign.unwrap();

    let result = builder.draw_with(&exporter, DiagramOptions::new("Broken"), |scope| {
        let local = scope.add_node(Category::Vpc, "here");
        scope.connect(local, foreign)?;
        Ok(())
    });

    assert!(result.is_err());
    assert_eq!(exporter.calls.get(), 0);

    builder
        .draw_with(&exporter, DiagramOptions::new("Fine"), |scope| {
            scope.add_node(Category::Vpc, "here");
            Ok(())
        })
        .unwrap();
    assert_eq!(exporter.calls.get(), 1);
}

#[test]
fn test_draw_writes_file_named_after_title() {
    let dir = tempdir().expect("Failed to create temp directory");
    let builder = dot_builder(dir.path());

    let path = builder
        .draw(DiagramOptions::new("Private EC2 Access"), |scope| {
            scope.add_node(Category::Ec2, "EC2");
            Ok(())
        })
        .expect("Failed to draw");

    assert_eq!(path, dir.path().join("private_ec2_access.dot"));
    assert!(path.is_file());
}

#[test]
fn test_missing_custom_icon_writes_nothing() {
    let dir = tempdir().expect("Failed to create temp directory");
    let builder = dot_builder(dir.path());

    let err = builder
        .draw(DiagramOptions::new("Missing Icon"), |scope| {
            scope.add_custom_node("Person", "no/such/icon.png");
            Ok(())
        })
        .expect_err("Missing icon should fail");

    assert!(err.is_asset_error(), "Unexpected error: {err}");
    assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[test]
fn test_builder_reusability() {
    let builder = DiagramBuilder::default();

    let first = builder
        .build(DiagramOptions::new("One"), |scope| {
            scope.add_node(Category::Ec2, "a");
            Ok(())
        })
        .unwrap();
    let second = builder
        .build(DiagramOptions::new("One"), |scope| {
            scope.add_node(Category::Ec2, "a");
            Ok(())
        })
        .unwrap();

    assert_ne!(first.id(), second.id());
    assert_eq!(first, second);
    assert_eq!(
        builder.render_dot(&first).unwrap(),
        builder.render_dot(&second).unwrap()
    );
}
