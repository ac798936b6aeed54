use clap::Parser;
use medflow::flow::{EdgeDescriptor, FlowGraph, StageDescriptor};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::fs;

const COLLECTORS: &[&str] = &["SFTP Collector", "CDR Collector", "SFTP Pull"];
const MIDDLE_STAGES: &[&str] = &[
    "FDC Processor",
    "ASN1 Decoder",
    "ASCII Decoder",
    "Enrichment",
    "Encoder",
    "Diameter Interface",
    "Lookup",
];
const FLOW_NAMES: &[&str] = &[
    "NCC Payment Flow",
    "Convergent Billing Flow",
    "Charging Gateway Integration",
    "Roaming Sync Flow",
];

/// Generates random mediation flow JSON for exercising the assembler
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_flow.json")]
    output: String,

    /// Number of stages between the collector and the backup
    #[arg(long, default_value_t = 6)]
    stages: usize,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Inject duplicate stage ids, dangling edges and unknown conditions
    #[arg(long)]
    noise: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    println!("Generating a flow with {} middle stages...", cli.stages);
    let mut flow = generate_flow(&mut rng, cli.stages);
    if cli.noise {
        add_noise(&mut rng, &mut flow);
        println!("-> Injected noise.");
    }

    let json_output = serde_json::to_string_pretty(&flow)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated '{}' ({} stages, {} edges) to '{}'",
        flow.name,
        flow.nodes.len(),
        flow.edges.len(),
        cli.output
    );
    Ok(())
}

fn pick<'a>(rng: &mut StdRng, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or("Stage")
}

/// A collector, `middle` random stages with one validation fork, and a raw backup
/// fed by the fork's invalid branch.
fn generate_flow(rng: &mut StdRng, middle: usize) -> FlowGraph {
    let mut names = vec![pick(rng, COLLECTORS).to_string()];
    names.extend((0..middle).map(|_| pick(rng, MIDDLE_STAGES).to_string()));
    let fork = rng.random_range(1..=names.len());
    names.insert(fork, "Validation BLN".to_string());
    names.push("Raw Backup".to_string());

    let nodes: Vec<StageDescriptor> = names
        .iter()
        .enumerate()
        .map(|(i, name)| StageDescriptor::new(format!("n{}", i + 1), name.as_str(), i as i64 + 1))
        .collect();

    let backup = nodes.len() - 1;
    let mut edges = Vec::new();
    for i in 0..backup {
        let (from, to) = (&nodes[i].id, &nodes[i + 1].id);
        if i == fork {
            edges.push(EdgeDescriptor::new(format!("e{}-valid", from), from, to).with_condition("Valid"));
            edges.push(
                EdgeDescriptor::new(format!("e{}-invalid", from), from, &nodes[backup].id)
                    .with_condition("Invalid"),
            );
        } else if i + 1 != backup {
            edges.push(EdgeDescriptor::new(format!("e{}-{}", from, to), from, to));
        }
    }

    let name = pick(rng, FLOW_NAMES);
    let mut flow = FlowGraph::new(format!("gen-{}", rng.random_range(1000..10000)), name)
        .with_stages(nodes, edges);
    flow.is_deployed = rng.random_bool(0.5);
    flow.is_running = flow.is_deployed && rng.random_bool(0.5);
    flow
}

fn add_noise(rng: &mut StdRng, flow: &mut FlowGraph) {
    if let Some(stage) = flow.nodes.choose(rng).cloned() {
        let mut duplicate = stage;
        duplicate.name = Some("Duplicate Stage".to_string());
        flow.nodes.push(duplicate);
    }
    flow.edges.push(EdgeDescriptor::new("dangling", "n1", "missing-node"));
    if let Some(fork) = flow.nodes.iter().find(|n| n.name.as_deref() == Some("Validation BLN")) {
        flow.edges.push(
            EdgeDescriptor::new("unknown-branch", &fork.id, "n1").with_condition("Unknown"),
        );
    }
}
