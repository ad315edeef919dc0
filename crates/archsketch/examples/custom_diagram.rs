//! Example: Declaring a diagram with the scoped builder
//!
//! Builds a small three-tier layout and prints its DOT source. Pass
//! `--render` to write a PNG into the current directory instead (requires
//! Graphviz).

use archsketch::{
    DiagramBuilder,
    color::Color,
    semantic::{Category, DiagramOptions, Direction, Edge, LineStyle},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let render = std::env::args().any(|arg| arg == "--render");
    let builder = DiagramBuilder::default();

    let alert = Color::new("#e74c3c")?;
    let options = DiagramOptions::new("Three Tier Web").with_direction(Direction::TopBottom);
    let diagram = builder.build(options, |scope| {
        let user = scope.add_node(Category::User, "Visitor");

        let mut vpc = scope.open_cluster("VPC");
        let igw = vpc.add_node(Category::InternetGateway, "Internet Gateway");

        let web = vpc
            .open_cluster("Public Subnet")
            .add_node(Category::Ec2, "Web");
        let app = vpc
            .open_cluster("Private Subnet")
            .add_node(Category::Ec2, "App");
        let secrets = vpc.add_node(Category::SystemsManagerParameterStore, "Secrets");

        vpc.connect(user, igw)?;
        vpc.connect_with(igw, web, Edge::bidirectional())?;
        vpc.connect_with(web, app, Edge::new().with_label("HTTP"))?;
        vpc.connect_with(
            app,
            secrets,
            Edge::new()
                .with_style(LineStyle::Dashed)
                .with_color(alert),
        )?;
        Ok(())
    })?;

    println!(
        "Declared {} nodes in {} clusters with {} edges",
        diagram.node_count(),
        diagram.cluster_count(),
        diagram.edge_count()
    );

    if render {
        let path = builder.render(&diagram)?;
        println!("Wrote {}", path.display());
    } else {
        println!("{}", builder.render_dot(&diagram)?);
    }

    Ok(())
}
