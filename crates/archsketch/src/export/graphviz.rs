//! Graphviz-backed exporter.

use std::{fs, path::PathBuf};

use graphviz_rust::{
    cmd::{CommandArg, Format},
    printer::{DotPrinter, PrinterContext},
};
use log::{debug, info};

use archsketch_core::semantic::Diagram;

use crate::{
    config::{AppConfig, StyleConfig},
    export::{Error, Exporter, OutputFormat, dot::DotBuilder, output_file_name},
    icon::IconResolver,
};

/// Writes diagrams through Graphviz.
///
/// The DOT graph is built completely (including icon resolution) before the
/// output file is touched, so a failing diagram never leaves a file behind.
#[derive(Debug, Clone)]
pub struct GraphvizExporter {
    output_dir: PathBuf,
    format: OutputFormat,
    icons: IconResolver,
    style: StyleConfig,
}

impl GraphvizExporter {
    /// Create an exporter from the application configuration.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            output_dir: config.output().directory().to_path_buf(),
            format: config.output().format(),
            icons: IconResolver::from_config(config.icons()),
            style: config.style().clone(),
        }
    }

    /// Build the DOT source for `diagram` without invoking Graphviz.
    pub fn dot_source(&self, diagram: &Diagram) -> Result<String, Error> {
        let graph = DotBuilder::new(&self.icons, &self.style).build(diagram)?;
        Ok(graph.print(&mut PrinterContext::default()))
    }

    /// Path the rendered diagram will be written to.
    pub fn output_path(&self, diagram: &Diagram) -> PathBuf {
        self.output_dir
            .join(output_file_name(diagram.title(), self.format))
    }
}

impl Exporter for GraphvizExporter {
    fn export(&self, diagram: &Diagram) -> Result<PathBuf, Error> {
        let graph = DotBuilder::new(&self.icons, &self.style).build(diagram)?;
        let path = self.output_path(diagram);
        let mut ctx = PrinterContext::default();

        info!(
            path = path.display().to_string(),
            format:% = self.format;
            "Rendering diagram"
        );

        match self.format {
            OutputFormat::Dot => fs::write(&path, graph.print(&mut ctx))?,
            format => {
                let args = vec![
                    CommandArg::Format(graphviz_format(format)),
                    CommandArg::Output(path.to_string_lossy().into_owned()),
                ];
                graphviz_rust::exec(graph, &mut ctx, args).map_err(Error::Graphviz)?;
            }
        }

        debug!(path = path.display().to_string(); "Diagram written");
        Ok(path)
    }
}

fn graphviz_format(format: OutputFormat) -> Format {
    match format {
        OutputFormat::Png => Format::Png,
        OutputFormat::Svg => Format::Svg,
        OutputFormat::Jpg => Format::Jpg,
        OutputFormat::Pdf => Format::Pdf,
        OutputFormat::Dot => Format::Dot,
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use archsketch_core::{
        scope::DiagramScope,
        semantic::{Category, DiagramOptions, Edge},
    };
    use tempfile::tempdir;

    use super::*;
    use crate::config::{IconConfig, OutputConfig};

    fn exporter(dir: &Path) -> GraphvizExporter {
        let config = AppConfig::new(
            OutputConfig::new(OutputFormat::Dot, Some(dir.to_path_buf())),
            IconConfig::default(),
            StyleConfig::default(),
        );
        GraphvizExporter::new(&config)
    }

    #[test]
    fn test_dot_export_writes_named_file() {
        let dir = tempdir().unwrap();
        let mut scope = DiagramScope::new(DiagramOptions::new("VPC Peering"));
        let a = scope.add_node(Category::Vpc, "VPC-A");
        let b = scope.add_node(Category::Vpc, "VPC-B");
        scope.connect_with(a, b, Edge::bidirectional()).unwrap();
        let diagram = scope.finish();

        let path = exporter(dir.path()).export(&diagram).unwrap();

        assert_eq!(path, dir.path().join("vpc_peering.dot"));
        let source = fs::read_to_string(&path).unwrap();
        assert!(source.contains("digraph"));
        assert!(source.contains("node_0"));
        assert!(source.contains("both"));
    }

    #[test]
    fn test_failed_icon_leaves_no_file() {
        let dir = tempdir().unwrap();
        let mut scope = DiagramScope::new(DiagramOptions::new("Broken"));
        scope.add_custom_node("Person", "missing/person.png");
        let diagram = scope.finish();

        let exporter = exporter(dir.path());
        let result = exporter.export(&diagram);

        assert!(matches!(result, Err(Error::Asset { .. })));
        assert!(!exporter.output_path(&diagram).exists());
    }

    #[test]
    fn test_dot_source_matches_written_file() {
        let dir = tempdir().unwrap();
        let mut scope = DiagramScope::new(DiagramOptions::new("Same"));
        scope.add_node(Category::Ec2, "EC2");
        let diagram = scope.finish();

        let exporter = exporter(dir.path());
        let source = exporter.dot_source(&diagram).unwrap();
        let path = exporter.export(&diagram).unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), source);
    }
}
