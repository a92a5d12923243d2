//! KineSketch CLI
//!
//! Usage:
//!   kinesketch [OPTIONS] [FILE]
//!
//! Options:
//!   -p, --palette <FILE>  Palette file for solide colors (TOML format)
//!   --svg                 Render the schematic as SVG instead of the summary
//!   --anchors             Draw anchor points in the SVG
//!   -t, --table           Print the liaison table
//!   -g, --graph           Print the liaison graph
//!   --json                Print the analysis as JSON
//!   -v, --verbose         Raise the log level (repeatable)
//!   -h, --help            Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kinesketch::{
    analyze_diagram, liaison_graph, liaison_table, load, render_svg_with_palette, Document,
    Palette, RenderConfig, SvgConfig,
};

#[derive(Parser)]
#[command(name = "kinesketch")]
#[command(about = "Analyze and render kinematic diagrams")]
struct Cli {
    /// Input .kinesketch file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Palette file for solide colors (TOML format)
    #[arg(short, long)]
    palette: Option<PathBuf>,

    /// Render the schematic as SVG instead of the summary
    #[arg(long)]
    svg: bool,

    /// Draw anchor points in the SVG
    #[arg(long)]
    anchors: bool,

    /// Print the liaison table
    #[arg(short, long)]
    table: bool,

    /// Print the liaison graph
    #[arg(short, long)]
    graph: bool,

    /// Print the analysis as JSON
    #[arg(long)]
    json: bool,

    /// Raise the log level (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("kinesketch={}", default_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let palette = match &cli.palette {
        Some(path) => match Palette::from_file(path) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Error loading palette '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Palette::default(),
    };

    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let config = RenderConfig::new()
        .with_palette(palette)
        .with_svg(SvgConfig::new().with_anchors(cli.anchors));
    let document = match load(&source, &config) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.svg {
        println!(
            "{}",
            render_svg_with_palette(&document.diagram, &config.svg, &config.palette)
        );
    } else if cli.json {
        print_json(&document, &cli);
    } else {
        print_summary(&document, &cli);
    }
}

fn print_json(document: &Document, cli: &Cli) {
    let diagram = &document.diagram;
    let mut output = json!({
        "name": document.name,
        "mobility": analyze_diagram(diagram),
    });
    if cli.table {
        output["table"] = json!(liaison_table(diagram));
    }
    if cli.graph {
        output["graph"] = json!(liaison_graph(diagram));
    }

    match serde_json::to_string_pretty(&output) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_summary(document: &Document, cli: &Cli) {
    let diagram = &document.diagram;
    println!("{}", document.name);
    println!(
        "{} joints, {} links, {} solides",
        diagram.nodes().len(),
        diagram.links().len(),
        diagram.solides().len()
    );
    println!();

    match analyze_diagram(diagram) {
        Some(report) => println!("{}", report),
        None => println!("Mobility: needs at least two solides joined by a liaison"),
    }

    if cli.table {
        println!();
        println!("Liaisons");
        for row in liaison_table(diagram) {
            println!(
                "  {:<8} {:<22} {:<8} dof {}",
                row.link, row.liaison, row.solide, row.dof
            );
        }
    }

    if cli.graph {
        println!();
        println!("Liaison graph");
        for edge in liaison_graph(diagram) {
            println!(
                "  {} - {}  {} ({})",
                edge.solide1, edge.solide2, edge.liaison, edge.node
            );
        }
    }
}

fn print_intro() {
    println!(
        r#"KineSketch - kinematic diagram analysis

USAGE:
    kinesketch [OPTIONS] [FILE]
    cat schema.kinesketch | kinesketch

OPTIONS:
    -p, --palette    Custom solide color palette (TOML file)
    --svg            Render the schematic as SVG
    --anchors        Draw anchor points in the SVG
    -t, --table      Print the liaison table
    -g, --graph      Print the liaison graph
    --json           Print the analysis as JSON
    -v, --verbose    More logging on stderr (RUST_LOG also works)
    -h, --help       Print help

QUICK START:
    kinesketch demos/four_bar.kinesketch --table
    kinesketch demos/four_bar.kinesketch --svg > four_bar.svg"#
    );
}
