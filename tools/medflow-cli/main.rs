use clap::{Parser, Subcommand, ValueEnum};
use medflow::export::{summarize, to_dot};
use medflow::prelude::*;
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LayoutCli {
    Grid,
    Pipeline,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatCli {
    Json,
    Dot,
    Summary,
}

/// Assemble mediation flow graphs from the command line
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assemble a flow JSON file into a positioned graph
    Assemble {
        /// Path to the flow JSON (the flow endpoint's response body)
        flow_path: String,

        /// Layout strategy; overrides the config file
        #[arg(short, long, value_enum)]
        layout: Option<LayoutCli>,

        #[arg(short, long, value_enum, default_value = "summary")]
        format: FormatCli,

        /// Optional medflow config JSON
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Print the role tag each stage name classifies as
    Classify {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Assemble the built-in demo flows
    Demo {
        /// Only this flow id
        flow_id: Option<String>,

        #[arg(short, long, value_enum, default_value = "summary")]
        format: FormatCli,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Assemble {
            flow_path,
            layout,
            format,
            config,
        } => run_assemble(&flow_path, layout, format, config.as_deref()),
        Command::Classify { names } => run_classify(&names),
        Command::Demo { flow_id, format } => run_demo(flow_id.as_deref(), format),
    }
}

fn run_assemble(flow_path: &str, layout: Option<LayoutCli>, format: FormatCli, config_path: Option<&str>) {
    let start = Instant::now();

    let mut config = match config_path {
        Some(path) => MedflowConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => MedflowConfig::default(),
    };
    if let Some(layout) = layout {
        config.layout.kind = match layout {
            LayoutCli::Grid => medflow::config::LayoutKind::Grid,
            LayoutCli::Pipeline => medflow::config::LayoutKind::Pipeline,
        };
    }

    let json = fs::read_to_string(flow_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read flow file '{}': {}", flow_path, e)));
    let flow = FlowGraph::from_json(&json).unwrap_or_else(|e| exit_with_error(&e.to_string()));

    let assembler = Assembler::builder().with_layout_config(&config.layout).build();
    let graph = assembler.assemble_flow(&flow);
    print_graph(&graph, &flow.name, format);

    tracing::info!(
        flow_id = %flow.id,
        layout = assembler.layout_name(),
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        omitted = graph.omissions.len(),
        elapsed = ?start.elapsed(),
        "assembled flow"
    );
}

fn run_classify(names: &[String]) {
    let width = names.iter().map(|n| n.len()).max().unwrap_or(0);
    for name in names {
        let tag = classify(name);
        println!("{:<width$}  {:<18} {}", name, tag, contract_for(tag).color, width = width);
    }
}

fn run_demo(flow_id: Option<&str>, format: FormatCli) {
    let service = InMemoryFlowService::seeded();
    let flows = service
        .list_flows()
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    let selected: Vec<FlowSummary> = flows
        .into_iter()
        .filter(|f| flow_id.is_none_or(|id| f.id == id))
        .collect();
    if selected.is_empty() {
        exit_with_error(&format!("No demo flow with id '{}'", flow_id.unwrap_or_default()));
    }

    for summary in selected {
        let mut view = FlowDetailView::new(summary.id.as_str());
        view.load(&service);
        let Some(graph) = view.assembled() else {
            exit_with_error(&format!("Flow '{}' failed to load: {}", summary.id, view.state()));
        };
        println!(
            "\n=== {} [{}] {} / {} / active version {} ===",
            summary.name,
            summary.id,
            summary.mediation_type.title(),
            summary.status,
            view.active_version().map_or("-".to_string(), |v| v.to_string())
        );
        print_graph(graph, &summary.name, format);
    }
}

fn print_graph(graph: &AssembledGraph, name: &str, format: FormatCli) {
    match format {
        FormatCli::Json => {
            let json = serde_json::to_string_pretty(graph)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize graph: {}", e)));
            println!("{}", json);
        }
        FormatCli::Dot => print!("{}", to_dot(graph, name)),
        FormatCli::Summary => print!("{}", summarize(graph)),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
