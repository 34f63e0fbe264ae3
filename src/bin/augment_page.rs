//! Augment a documentation page in place.
//!
//! Reads a protocol reference page, derives the sidebar navigation and the
//! sorted packet table, and writes the augmented page.
//!
//! Usage:
//!   cargo run --release --bin augment_page -- protocol.html
//!   cargo run --release --bin augment_page -- protocol.html --output site/protocol.html
//!   cargo run --release --bin augment_page -- protocol.html --dump-json

use page_oxide::PageDocument;
use serde::Serialize;
use std::path::PathBuf;
use std::process;

struct CliConfig {
    input: PathBuf,
    output: Option<PathBuf>,
    dump_json: bool,
    verbose: bool,
}

impl CliConfig {
    fn from_args() -> Option<Self> {
        let args: Vec<String> = std::env::args().collect();
        let mut input = None;
        let mut output = None;
        let mut dump_json = false;
        let mut verbose = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--output" | "-o" => {
                    i += 1;
                    if i < args.len() {
                        output = Some(PathBuf::from(&args[i]));
                    }
                },
                "--dump-json" => {
                    dump_json = true;
                },
                "--verbose" | "-v" => {
                    verbose = true;
                },
                arg if !arg.starts_with('-') => {
                    input = Some(PathBuf::from(arg));
                },
                _ => {},
            }
            i += 1;
        }

        Some(Self {
            input: input?,
            output,
            dump_json,
            verbose,
        })
    }
}

/// JSON dump of the derived model.
#[derive(Serialize)]
struct ModelDump {
    nav: Vec<page_oxide::NavEntry>,
    packets: Vec<page_oxide::PacketRow>,
}

fn main() {
    env_logger::init();

    let config = match CliConfig::from_args() {
        Some(config) => config,
        None => {
            eprintln!("Usage: augment_page <input.html> [--output PATH] [--dump-json] [--verbose]");
            process::exit(1);
        },
    };

    let doc = match PageDocument::open(&config.input) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("✗ Failed to parse {}: {}", config.input.display(), e);
            process::exit(1);
        },
    };

    let (nav, packets) = match (doc.nav_entries(), doc.packet_rows()) {
        (Ok(nav), Ok(packets)) => (nav, packets),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("✗ Failed to derive model from {}: {}", config.input.display(), e);
            process::exit(1);
        },
    };

    if config.verbose {
        for entry in &nav {
            println!("nav: {} -> #{}", entry.label, entry.target_id);
            for child in &entry.children {
                println!("nav:   {} -> #{}", child.label, child.target_id);
            }
        }
    }

    if config.dump_json {
        let dump = ModelDump { nav, packets };
        match serde_json::to_string_pretty(&dump) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("✗ Failed to serialize model: {}", e);
                process::exit(1);
            },
        }
        return;
    }

    let output = config.output.unwrap_or_else(|| {
        let mut path = config.input.clone();
        path.set_extension("out.html");
        path
    });

    match doc.write_augmented(&output) {
        Ok(()) => {
            println!(
                "✓ {} augmented: {} nav entries, {} packet rows -> {}",
                config.input.display(),
                nav.len() + nav.iter().map(|e| e.children.len()).sum::<usize>(),
                packets.len(),
                output.display()
            );
        },
        Err(e) => {
            eprintln!("✗ Failed to augment {}: {}", config.input.display(), e);
            process::exit(1);
        },
    }
}
