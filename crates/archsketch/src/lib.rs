//! archsketch - Architecture diagrams as code.
//!
//! Diagrams are declared through a scoped builder (see [`scope`]) and rendered
//! with Graphviz. Clusters nest lexically, nodes carry an AWS-style
//! [`Category`](semantic::Category), and edges are stored in declaration order.
//!
//! # Example
//!
//! ```rust,no_run
//! use archsketch::{
//!     DiagramBuilder,
//!     semantic::{Category, DiagramOptions, Edge},
//! };
//!
//! let builder = DiagramBuilder::default();
//! let diagram = builder
//!     .build(DiagramOptions::new("Two Instances"), |scope| {
//!         let (a, b) = scope.cluster("VPC", |vpc| {
//!             Ok::<_, archsketch::BuildError>((
//!                 vpc.add_node(Category::Ec2, "EC2 A"),
//!                 vpc.add_node(Category::Ec2, "EC2 B"),
//!             ))
//!         })?;
//!         scope.connect_with(a, b, Edge::bidirectional())?;
//!         Ok(())
//!     })
//!     .expect("Failed to build");
//!
//! let path = builder.render(&diagram).expect("Failed to render");
//! println!("{}", path.display());
//! ```

pub mod architectures;
pub mod config;
pub mod export;
pub mod icon;

mod error;
mod viewer;

pub use archsketch_core::{BuildError, HandleKind, color, scope, semantic};

pub use error::ArchsketchError;

use std::path::PathBuf;

use log::{debug, info, trace, warn};

use config::AppConfig;
use export::{Exporter, GraphvizExporter};
use scope::DiagramScope;
use semantic::{Diagram, DiagramOptions};

/// Builder for declaring and rendering diagrams.
///
/// # Examples
///
/// ```rust,no_run
/// use archsketch::{DiagramBuilder, config::AppConfig};
///
/// // With custom config
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// // Or use default config
/// let builder = DiagramBuilder::default();
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including output, icon and style settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Declare a diagram.
    ///
    /// `declare` receives a fresh [`DiagramScope`]; the diagram is returned
    /// only if every declaration succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`ArchsketchError::Build`] for reference and scope errors.
    pub fn build<F>(&self, options: DiagramOptions, declare: F) -> Result<Diagram, ArchsketchError>
    where
        F: FnOnce(&mut DiagramScope) -> Result<(), BuildError>,
    {
        info!(title = options.title(); "Building diagram");

        let mut scope = DiagramScope::new(options);
        declare(&mut scope)?;
        let diagram = scope.finish();

        debug!("Diagram built successfully");
        trace!(diagram:?; "Built diagram");

        Ok(diagram)
    }

    /// Render a diagram with the Graphviz exporter from the configuration.
    ///
    /// If the diagram asks for it, the written file is opened in the
    /// platform viewer afterwards. A viewer that fails to start is logged and
    /// otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ArchsketchError::Export`] if an icon cannot be resolved or
    /// Graphviz fails.
    pub fn render(&self, diagram: &Diagram) -> Result<PathBuf, ArchsketchError> {
        let exporter = GraphvizExporter::new(&self.config);
        let path = self.render_with(&exporter, diagram)?;

        if diagram.options().auto_open() {
            if let Err(err) = viewer::open(&path) {
                warn!(path = path.display().to_string(), err:% = err; "Failed to open viewer");
            }
        }

        Ok(path)
    }

    /// Render a diagram with an arbitrary exporter.
    pub fn render_with(
        &self,
        exporter: &dyn Exporter,
        diagram: &Diagram,
    ) -> Result<PathBuf, ArchsketchError> {
        let path = exporter.export(diagram)?;
        info!(path = path.display().to_string(); "Diagram rendered");
        Ok(path)
    }

    /// Produce the DOT source for a diagram without running Graphviz.
    pub fn render_dot(&self, diagram: &Diagram) -> Result<String, ArchsketchError> {
        let source = GraphvizExporter::new(&self.config).dot_source(diagram)?;
        Ok(source)
    }

    /// Declare and render a diagram in one step.
    ///
    /// Nothing is written if the declaration fails.
    pub fn draw<F>(&self, options: DiagramOptions, declare: F) -> Result<PathBuf, ArchsketchError>
    where
        F: FnOnce(&mut DiagramScope) -> Result<(), BuildError>,
    {
        let diagram = self.build(options, declare)?;
        self.render(&diagram)
    }

    /// Declare a diagram and render it with `exporter`.
    pub fn draw_with<F>(
        &self,
        exporter: &dyn Exporter,
        options: DiagramOptions,
        declare: F,
    ) -> Result<PathBuf, ArchsketchError>
    where
        F: FnOnce(&mut DiagramScope) -> Result<(), BuildError>,
    {
        let diagram = self.build(options, declare)?;
        self.render_with(exporter, &diagram)
    }
}
