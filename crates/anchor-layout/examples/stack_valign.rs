//! A stretched stack with a pinned header, a flexible body and a footer.
//!
//! Run with `RUST_LOG=debug` to see the flush trace.

use anchor_layout::{
    Alignment, ConstraintRecord, Edge, LayoutHost, LayoutTree, NodeId, ResolvedConstraints,
    StackOptions,
};
use tracing_subscriber::EnvFilter;

struct PrintingHost {
    names: Vec<(NodeId, &'static str)>,
}

impl LayoutHost for PrintingHost {
    fn apply(&mut self, _tree: &mut LayoutTree, child: NodeId, constraints: &ResolvedConstraints) {
        let name = self
            .names
            .iter()
            .find(|(id, _)| *id == child)
            .map_or("?", |(_, name)| name);
        println!("{:<8} {}", name, constraints);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut tree = LayoutTree::new();
    let stack = tree.create_stack(
        StackOptions::new()
            .with_spacing(16.0)
            .with_alignment(Alignment::StretchX),
    )?;

    let header = tree.create_node_with(ConstraintRecord::new().with_top(Edge::offset(16.0)));
    let body = tree.create_node_with(ConstraintRecord::new().stretch_y());
    let footer = tree.create_node_with(ConstraintRecord::new().with_bottom(Edge::offset(16.0)));
    tree.append_all(stack, [header, body, footer])?;

    let mut host = PrintingHost {
        names: vec![(header, "header"), (body, "body"), (footer, "footer")],
    };
    let report = tree.flush(&mut host);
    println!(
        "resolved {} container(s), {} child(ren), {} warning(s)",
        report.containers, report.applied, report.diagnostics
    );
    Ok(())
}
