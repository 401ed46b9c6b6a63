//! Results output module

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde_json::{json, to_string_pretty};

use crate::config::Config;
use crate::data::BinaryMatrix;
use crate::engine::Analysis;
use crate::graph::node::{group_name, node_size};
use crate::graph::GraphPayload;
use crate::group::metrics::GraphSummary;

/// Save analysis results to the specified directory
pub fn save_results(
    analysis: &Analysis,
    matrix: &BinaryMatrix,
    config: &Config,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving {} groups to {}", analysis.groups.len(), output_dir);

    // Ensure output directory exists
    fs::create_dir_all(output_dir)?;

    // The payload exactly as handed to the presentation layer
    save_payload(&analysis.payload(), output_dir)?;

    save_groups(analysis, matrix, config, output_dir)?;

    save_summary(&analysis.summary(matrix), output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save the `{nodes, links}` payload
pub fn save_payload(payload: &GraphPayload, output_dir: &str) -> Result<()> {
    log::info!("Saving graph payload");

    let path = Path::new(output_dir).join("graph.json");
    let mut file = File::create(path)?;
    file.write_all(to_string_pretty(payload)?.as_bytes())?;

    Ok(())
}

/// Save each group with its contributing members
fn save_groups(
    analysis: &Analysis,
    matrix: &BinaryMatrix,
    config: &Config,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving group membership");

    let path = Path::new(output_dir).join("groups.json");
    let mut file = File::create(path)?;

    let groups_json = json!({
        "groups": analysis.groups.iter().enumerate().map(|(i, group)| {
            json!({
                "id": group_name(i + 1),
                "numbers": group.signature,
                "members": group.member_labels(matrix.members()),
                "size": node_size(group.signature.len(), config),
            })
        }).collect::<Vec<_>>()
    });

    file.write_all(to_string_pretty(&groups_json)?.as_bytes())?;

    Ok(())
}

/// Save summary statistics
fn save_summary(summary: &GraphSummary, output_dir: &str) -> Result<()> {
    log::info!("Saving summary information");

    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;
    file.write_all(to_string_pretty(summary)?.as_bytes())?;

    Ok(())
}
