//! Tabgraph CLI: build a graph from CSV tables and inspect it

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use std::path::PathBuf;
use tabgraph::{CsvTable, Graph, GraphBuilder, GraphReport, IngestConfig, ReportGenerator};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tabgraph-cli", version, about = "Build graphs from node/edge tables")]
struct Cli {
    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Log construction progress (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Text,
}

#[derive(Args)]
struct Input {
    /// Edge table (CSV with header)
    #[arg(long)]
    edges: PathBuf,

    /// Optional node table (CSV with header)
    #[arg(long)]
    nodes: Option<PathBuf>,

    /// Ingestion configuration (YAML, or JSON by extension)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Field delimiter of both tables
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Treat edges as directed, overriding the configuration
    #[arg(long)]
    directed: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the graph and print its statistics report
    Report {
        #[command(flatten)]
        input: Input,

        /// Number of highest-degree nodes to list
        #[arg(long, default_value_t = 10)]
        top_k: usize,
    },
    /// Build the graph and list the neighbors of one node
    Neighbors {
        #[command(flatten)]
        input: Input,

        /// Node name
        node: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Report { input, top_k } => run_report(input, *top_k, &cli.format),
        Commands::Neighbors { input, node } => run_neighbors(input, node, &cli.format),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_graph(input: &Input) -> Result<Graph> {
    let mut config = match &input.config {
        Some(path) => IngestConfig::from_path(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => IngestConfig::default(),
    };
    if input.directed {
        config.directed = true;
    }

    let delimiter = u8::try_from(input.delimiter).context("delimiter must be a single byte")?;
    let edges = CsvTable::from_path_with_delimiter(&input.edges, delimiter)
        .with_context(|| format!("reading edge table {}", input.edges.display()))?;
    let builder = GraphBuilder::new(config);

    let graph = match &input.nodes {
        Some(path) => {
            let nodes = CsvTable::from_path_with_delimiter(path, delimiter)
                .with_context(|| format!("reading node table {}", path.display()))?;
            builder.build(&nodes, &edges)?
        }
        None => builder.build_from_edges(&edges)?,
    };
    Ok(graph)
}

fn run_report(input: &Input, top_k: usize, format: &OutputFormat) -> Result<()> {
    let graph = load_graph(input)?;
    let report = ReportGenerator::new(&graph).with_top_k(top_k).generate();

    match format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => print!("{}", report),
        OutputFormat::Table => print_report_tables(&report),
    }
    Ok(())
}

fn run_neighbors(input: &Input, node: &str, format: &OutputFormat) -> Result<()> {
    let graph = load_graph(input)?;
    let id = graph
        .node_id(node)
        .with_context(|| format!("node '{}' is not in the graph", node))?;

    let rows: Vec<(String, f64, String)> = graph
        .edge_slots(id)
        .map(|slot| {
            let dst = graph.edge_destination(slot);
            (
                graph.name_of(dst).unwrap_or_default().to_string(),
                graph.edge_weight(slot),
                graph.edge_type_name(slot).unwrap_or_default().to_string(),
            )
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let json: Vec<serde_json::Value> = rows
                .iter()
                .map(|(name, weight, edge_type)| {
                    serde_json::json!({ "node": name, "weight": weight, "edge_type": edge_type })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => {
            for (name, weight, edge_type) in &rows {
                println!("{}\t{}\t{}", name, weight, edge_type);
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Neighbor", "Weight", "Edge type"]);
            for (name, weight, edge_type) in &rows {
                table.add_row(vec![name.clone(), weight.to_string(), edge_type.clone()]);
            }
            println!("{}", table);
            println!("{} neighbor(s)", rows.len());
        }
    }
    Ok(())
}

fn print_report_tables(report: &GraphReport) {
    let mut summary = Table::new();
    summary.set_content_arrangement(ContentArrangement::Dynamic);
    summary.set_header(vec!["Metric", "Value"]);
    summary.add_row(vec!["Name".to_string(), report.name.clone()]);
    summary.add_row(vec!["Directed".to_string(), report.directed.to_string()]);
    summary.add_row(vec!["Nodes".to_string(), report.node_count.to_string()]);
    summary.add_row(vec!["Edges".to_string(), report.edge_count.to_string()]);
    summary.add_row(vec!["Self-loops".to_string(), report.self_loops.to_string()]);
    summary.add_row(vec!["Zero-degree nodes".to_string(), report.zero_degree_nodes.to_string()]);
    summary.add_row(vec!["Density".to_string(), format!("{:.6}", report.density)]);
    if let Some(d) = &report.degree {
        summary.add_row(vec!["Degree min / max".to_string(), format!("{} / {}", d.min, d.max)]);
        summary.add_row(vec!["Degree mode".to_string(), d.mode.to_string()]);
        summary.add_row(vec!["Degree mean".to_string(), format!("{:.2}", d.mean)]);
        summary.add_row(vec!["Degree median".to_string(), format!("{:.1}", d.median)]);
    }
    summary.add_row(vec!["Array bytes".to_string(), report.memory.array_bytes.to_string()]);
    println!("{}", summary);

    if !report.top_nodes.is_empty() {
        let mut top = Table::new();
        top.set_content_arrangement(ContentArrangement::Dynamic);
        top.set_header(vec!["Node", "Id", "Degree"]);
        for node in &report.top_nodes {
            top.add_row(vec![node.name.clone(), node.id.0.to_string(), node.degree.to_string()]);
        }
        println!("{}", top);
    }

    for (label, catalog) in [("Node type", &report.node_types), ("Edge type", &report.edge_types)] {
        if catalog.types.is_empty() {
            continue;
        }
        let mut types = Table::new();
        types.set_content_arrangement(ContentArrangement::Dynamic);
        types.set_header(vec![label, "Count"]);
        for t in &catalog.types {
            types.add_row(vec![t.name.clone(), t.count.to_string()]);
        }
        if catalog.untyped > 0 {
            types.add_row(vec!["(none)".to_string(), catalog.untyped.to_string()]);
        }
        println!("{}", types);
    }

    for s in &report.singleton_node_types {
        println!("Singleton node type '{}' on node '{}'", s.type_name, s.node_name);
    }
    for s in &report.singleton_edge_types {
        println!(
            "Singleton edge type '{}' on edge {} ({} -> {})",
            s.type_name, s.edge.0, s.source, s.destination
        );
    }
}
