//! depgraph CLI: run projections over a dataset from the terminal
//!
//! The dataset comes from `--dataset`, `--synthetic`, or the same
//! configuration the server reads (`DEPGRAPH_CONFIG`), falling back to the
//! four-entity sample.

use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use depgraph::graph::{Dataset, EntityId};
use depgraph::projection::lineage::{self, LineageGraph};
use depgraph::projection::{self, FilterOptions, FilterSpec};
use depgraph::{AppConfig, DatasetSource};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "depgraph", version, about = "Dependency graph projections")]
struct Cli {
    /// JSON or YAML dataset file
    #[arg(long, global = true, env = "DEPGRAPH_DATASET", conflicts_with = "synthetic")]
    dataset: Option<PathBuf>,

    /// Generate this many synthetic entities instead of loading a file
    #[arg(long, global = true)]
    synthetic: Option<usize>,

    /// Seed for --synthetic
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Project the dataset through a filter
    Project {
        /// Constraint as key=value; "all" is a wildcard
        #[arg(long = "filter", short = 'f', value_parser = parse_key_val)]
        filters: Vec<(String, String)>,

        /// Render every entity as "default" instead of filtering
        #[arg(long, conflicts_with = "filters")]
        overview: bool,
    },
    /// Show the counter boxes for a filter
    Summary {
        #[arg(long = "filter", short = 'f', value_parser = parse_key_val)]
        filters: Vec<(String, String)>,
    },
    /// Show the details panel for one entity
    Details {
        /// Entity id; omitted means nothing selected
        id: Option<String>,
    },
    /// List dropdown options
    Options,
    /// Print the dataset as JSON records
    Generate,
    /// Show the app -> upstream -> table lineage
    Lineage {
        /// JSON or YAML lineage rows; the configured or sample rows otherwise
        #[arg(long)]
        rows: Option<PathBuf>,

        /// List tables read by more than one app instead of the graph
        #[arg(long)]
        shared_tables: bool,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected key=value, got {:?}", s))
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.command {
        Commands::Project { filters, overview } => {
            run_project(&load_dataset(cli)?, filters, *overview, &cli.format)
        }
        Commands::Summary { filters } => run_summary(&load_dataset(cli)?, filters, &cli.format),
        Commands::Details { id } => run_details(&load_dataset(cli)?, id.as_deref(), &cli.format),
        Commands::Options => run_options(&load_dataset(cli)?, &cli.format),
        Commands::Generate => run_generate(&load_dataset(cli)?),
        Commands::Lineage {
            rows,
            shared_tables,
        } => run_lineage(rows.as_deref(), *shared_tables, &cli.format),
    }
}

fn load_dataset(cli: &Cli) -> Result<Dataset, Box<dyn std::error::Error>> {
    let source = match (&cli.dataset, cli.synthetic) {
        (Some(path), _) => DatasetSource::File { path: path.clone() },
        (None, Some(entity_count)) => DatasetSource::Synthetic {
            entity_count,
            seed: cli.seed,
        },
        (None, None) => AppConfig::from_env()?.dataset,
    };
    Ok(source.load()?)
}

fn run_project(
    dataset: &Dataset,
    filters: &[(String, String)],
    overview: bool,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let projection = if overview {
        projection::overview(dataset)
    } else {
        projection::project(dataset, &FilterSpec::from_pairs(filters.iter().cloned()))
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&projection)?);
        }
        OutputFormat::Csv => {
            println!("group,id,label,classes,source,target");
            for node in &projection.elements.nodes {
                println!(
                    "nodes,{},{},{},,",
                    csv_cell(node.id().as_str()),
                    csv_cell(&node.data.label),
                    node.classes
                );
            }
            for edge in &projection.elements.edges {
                println!("edges,,,,{},{}", csv_cell(edge.source().as_str()), csv_cell(edge.target().as_str()));
            }
        }
        OutputFormat::Table => {
            if projection.elements.is_empty() {
                println!("(no matching entities)");
                return Ok(());
            }

            let mut nodes = Table::new();
            nodes.set_content_arrangement(ContentArrangement::Dynamic);
            nodes.set_header(vec!["Id", "Label", "Classes"]);
            for node in &projection.elements.nodes {
                nodes.add_row(vec![
                    node.id().to_string(),
                    node.data.label.clone(),
                    node.classes.to_string(),
                ]);
            }
            println!("{}", nodes);

            let mut edges = Table::new();
            edges.set_content_arrangement(ContentArrangement::Dynamic);
            edges.set_header(vec!["Source", "Target"]);
            for edge in &projection.elements.edges {
                edges.add_row(vec![edge.source().to_string(), edge.target().to_string()]);
            }
            println!("{}", edges);
            println!(
                "{} node(s), {} edge(s)",
                projection.elements.nodes.len(),
                projection.elements.edges.len()
            );
        }
    }

    Ok(())
}

fn run_summary(
    dataset: &Dataset,
    filters: &[(String, String)],
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let summary = projection::summarize(dataset, &FilterSpec::from_pairs(filters.iter().cloned()));

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Csv => {
            println!("total,filtered,online,offline");
            println!("{},{},{},{}", summary.total, summary.filtered, summary.online, summary.offline);
        }
        OutputFormat::Table => {
            for caption in summary.captions() {
                println!("{}", caption);
            }
        }
    }

    Ok(())
}

fn run_details(
    dataset: &Dataset,
    id: Option<&str>,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let selected = id.map(EntityId::from);
    let details = projection::describe(dataset, selected.as_ref());

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&details)?),
        _ => {
            for line in details.lines() {
                println!("{}", line);
            }
        }
    }

    Ok(())
}

fn run_options(dataset: &Dataset, format: &OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let options = FilterOptions::from_dataset(dataset);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&options)?),
        OutputFormat::Csv => {
            println!("filter,label,value");
            for option in &options.labels {
                println!("label,{},{}", csv_cell(&option.label), csv_cell(&option.value.to_string()));
            }
            for (key, list) in &options.attributes {
                for option in list {
                    println!("{},{},{}", key, csv_cell(&option.label), csv_cell(&option.value.to_string()));
                }
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Filter", "Options"]);
            table.add_row(vec![
                "label".to_string(),
                options
                    .labels
                    .iter()
                    .map(|o| o.label.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            ]);
            for (key, list) in &options.attributes {
                table.add_row(vec![
                    key.clone(),
                    list.iter().map(|o| o.label.as_str()).collect::<Vec<_>>().join(", "),
                ]);
            }
            println!("{}", table);
        }
    }

    Ok(())
}

fn run_generate(dataset: &Dataset) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", dataset.to_json_string()?);
    Ok(())
}

fn run_lineage(
    rows: Option<&std::path::Path>,
    shared_tables: bool,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let rows = match rows {
        Some(path) => lineage::load_rows(path)?,
        None => AppConfig::from_env()?.load_lineage()?,
    };

    if shared_tables {
        let shared = lineage::shared_tables(&rows);
        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&shared)?),
            OutputFormat::Csv => {
                println!("table,apps");
                for entry in &shared {
                    println!("{},{}", csv_cell(&entry.table), csv_cell(&entry.apps.join(";")));
                }
            }
            OutputFormat::Table => {
                if shared.is_empty() {
                    println!("(no shared tables)");
                    return Ok(());
                }
                let mut table = Table::new();
                table.set_content_arrangement(ContentArrangement::Dynamic);
                table.set_header(vec!["Table", "Apps"]);
                for entry in &shared {
                    table.add_row(vec![entry.table.clone(), entry.apps.join(", ")]);
                }
                println!("{}", table);
            }
        }
        return Ok(());
    }

    let graph = LineageGraph::from_rows(&rows);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&graph)?),
        OutputFormat::Csv => {
            println!("group,id,type,uses,source,target");
            for node in &graph.nodes {
                println!(
                    "nodes,{},{},{},,",
                    csv_cell(node.id().as_str()),
                    node.data.kind.as_str(),
                    node.data.uses
                );
            }
            for edge in &graph.edges {
                println!("edges,,,,{},{}", csv_cell(edge.source().as_str()), csv_cell(edge.target().as_str()));
            }
        }
        OutputFormat::Table => {
            let mut nodes = Table::new();
            nodes.set_content_arrangement(ContentArrangement::Dynamic);
            nodes.set_header(vec!["Id", "Type", "Uses", "Shared"]);
            for node in &graph.nodes {
                nodes.add_row(vec![
                    node.id().to_string(),
                    node.data.kind.as_str().to_string(),
                    node.data.uses.to_string(),
                    if node.is_shared() { "yes" } else { "" }.to_string(),
                ]);
            }
            println!("{}", nodes);
            println!("{} node(s), {} edge(s)", graph.nodes.len(), graph.edges.len());
        }
    }

    Ok(())
}

fn csv_cell(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
