//! Network data export for external visualization tools

use anyhow::Result;
use crate::graph::GroupGraph;
use itertools::Itertools;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Write GraphML and CSV exports of the group graph
pub fn generate_exports(graph: &GroupGraph, output_dir: &str) -> Result<()> {
    log::info!("Generating network exports for {} groups", graph.node_count());

    let viz_dir = Path::new(output_dir).join("visualizations");
    fs::create_dir_all(&viz_dir)?;

    write_graphml(graph, &viz_dir.join("group_graph.graphml"))?;
    write_csv_tables(graph, &viz_dir)?;

    log::info!("Network exports generated successfully");

    Ok(())
}

/// Write the graph as undirected GraphML
pub fn write_graphml(graph: &GroupGraph, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;

    writeln!(file, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
    writeln!(file, "<graphml xmlns=\"http://graphml.graphdrawing.org/xmlns\">")?;
    writeln!(file, "  <key id=\"size\" for=\"node\" attr.name=\"size\" attr.type=\"int\"/>")?;
    writeln!(file, "  <key id=\"numbers\" for=\"node\" attr.name=\"numbers\" attr.type=\"string\"/>")?;
    writeln!(file, "  <key id=\"weight\" for=\"edge\" attr.name=\"weight\" attr.type=\"int\"/>")?;
    writeln!(file, "  <graph id=\"G\" edgedefault=\"undirected\">")?;

    for node in graph.nodes() {
        writeln!(
            file,
            "    <node id=\"{}\">\n      <data key=\"size\">{}</data>\n      <data key=\"numbers\">{}</data>\n    </node>",
            node.name,
            node.size,
            node.numbers.iter().join(" ")
        )?;
    }

    for (edge_id, (source, target, weight)) in graph.edges().enumerate() {
        writeln!(
            file,
            "    <edge id=\"e{}\" source=\"{}\" target=\"{}\">\n      <data key=\"weight\">{}</data>\n    </edge>",
            edge_id, source.name, target.name, weight
        )?;
    }

    writeln!(file, "  </graph>")?;
    writeln!(file, "</graphml>")?;

    Ok(())
}

/// Write `nodes.csv` and `links.csv`
pub fn write_csv_tables(graph: &GroupGraph, viz_dir: &Path) -> Result<()> {
    let mut nodes_file = File::create(viz_dir.join("nodes.csv"))?;
    writeln!(nodes_file, "id,size,numbers")?;
    for node in graph.nodes() {
        writeln!(
            nodes_file,
            "{},{},{}",
            node.name,
            node.size,
            node.numbers.iter().join(" ")
        )?;
    }

    let mut links_file = File::create(viz_dir.join("links.csv"))?;
    writeln!(links_file, "source,target,weight")?;
    for (source, target, weight) in graph.edges() {
        writeln!(links_file, "{},{},{}", source.name, target.name, weight)?;
    }

    Ok(())
}
