use std::path::Path;

use anyhow::Result;
use clap::Parser;

use cooccurrence_graph::{analyze, load_matrix, storage, viz, CellPolicy, Config, LoadOptions};

#[derive(Parser, Debug)]
#[clap(
    name = "cooccurrence-graph",
    about = "Group members that share items and build a weighted co-occurrence graph"
)]
struct Cli {
    /// Path to input matrix (.json, .csv or .parquet)
    #[clap(long)]
    input: String,

    /// Output directory for results
    #[clap(long, default_value = "group_graph_results")]
    output_dir: String,

    /// Column holding item indices instead of 1-based row numbers
    #[clap(long)]
    item_column: Option<String>,

    /// Minimum number of shared items for a group
    #[clap(long, default_value = "2")]
    min_shared: usize,

    /// Node size for a two-item group
    #[clap(long, default_value = "10")]
    base_size: u32,

    /// Node size increment per extra shared item
    #[clap(long, default_value = "1")]
    scale: u32,

    /// Reject cells that are not 0 or 1 instead of treating them as absent
    #[clap(long)]
    strict: bool,

    /// Member count at which the pairwise scan runs in parallel
    #[clap(long, default_value = "1000")]
    parallel_threshold: usize,

    /// Skip GraphML / CSV exports
    #[clap(long)]
    skip_exports: bool,

    /// Also print the graph payload to stdout
    #[clap(long)]
    print: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    let cell_policy = if args.strict {
        CellPolicy::Strict
    } else {
        CellPolicy::Permissive
    };
    let config = Config::new(
        args.min_shared,
        args.base_size,
        args.scale,
        cell_policy,
        args.parallel_threshold,
    );
    config.validate()?;

    log::info!("Starting co-occurrence analysis");
    log::info!("Input: {}", args.input);
    log::info!("Output: {}", args.output_dir);

    // 1. Load data
    let options = LoadOptions {
        item_column: args.item_column.clone(),
        cell_policy,
    };
    let matrix = load_matrix(Path::new(&args.input), &options)?;

    // 2. Derive groups and graph
    let analysis = analyze(&matrix, &config)?;

    // 3. Save results
    storage::save_results(&analysis, &matrix, &config, &args.output_dir)?;

    // 4. Network exports if requested
    if !args.skip_exports {
        viz::generate_exports(&analysis.graph, &args.output_dir)?;
    }

    if args.print {
        println!("{}", serde_json::to_string_pretty(&analysis.payload())?);
    }

    log::info!("Analysis complete. Results saved to {}", args.output_dir);

    Ok(())
}
