//! Network summary tool.
//!
//! Usage:
//!   dbcinfo [--verbose] [--cache <path>] <file.dbc>
//!
//! Loads a DBC file, prints one line per message with its signals, and lists
//! every soft diagnostic. With `--cache`, the resolved network is read from
//! (or written to) a fingerprinted cache file. With `--verbose`, resolver
//! phases and index statistics are traced to stderr.
//!
//! Exits with status 1 if the file cannot be loaded.

use std::env;
use std::path::PathBuf;
use std::process;

use dbcnet_core::model::Network;
use dbcnet_core::resolver::TraceLevel;
use dbcnet_std::cache::load_network_cached;
use dbcnet_std::{StderrTracer, load_from_file_traced};

struct Options {
    verbose: bool,
    cache: Option<PathBuf>,
    input: PathBuf,
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {program} [--verbose] [--cache <path>] <file.dbc>");
    process::exit(1);
}

fn parse_args() -> Options {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "dbcinfo".to_string());

    let mut verbose = false;
    let mut cache = None;
    let mut input = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--verbose" | "-v" => verbose = true,
            "--cache" => match args.next() {
                Some(path) => cache = Some(PathBuf::from(path)),
                None => usage(&program),
            },
            _ if arg.starts_with('-') => usage(&program),
            _ if input.is_none() => input = Some(PathBuf::from(arg)),
            _ => usage(&program),
        }
    }

    match input {
        Some(input) => Options {
            verbose,
            cache,
            input,
        },
        None => usage(&program),
    }
}

fn print_summary(network: &Network) {
    println!("version:      {:?}", network.version());
    println!(
        "bit timing:   {} ({}, {})",
        network.bit_timing().baudrate,
        network.bit_timing().btr1,
        network.bit_timing().btr2
    );
    println!("nodes:        {}", network.nodes().len());
    println!("value tables: {}", network.value_tables().len());
    println!("messages:     {}", network.messages().len());
    println!("signals:      {}", network.signal_count());
    println!("env vars:     {}", network.environment_variables().len());
    println!("attributes:   {}", network.attribute_definitions().len());
    println!();

    for message in network.messages() {
        println!(
            "{:#x} {} ({} bytes, from {})",
            message.id(),
            message.name(),
            message.size(),
            message.transmitter()
        );
        for signal in message.signals() {
            println!(
                "    {:<24} {:>3}|{:<2} {:?}",
                signal.name(),
                signal.start_bit(),
                signal.bit_size(),
                signal.multiplexer()
            );
        }
    }
}

fn main() {
    let options = parse_args();
    let level = if options.verbose {
        TraceLevel::Debug
    } else {
        TraceLevel::Warn
    };

    let network = match &options.cache {
        Some(cache_path) => match load_network_cached(&options.input, cache_path) {
            Ok(network) => {
                // The cached path does not trace, so report diagnostics here
                for record in network.diagnostics() {
                    eprintln!("[warn] {record}");
                }
                network
            }
            Err(e) => {
                eprintln!("{}: {e}", options.input.display());
                process::exit(1);
            }
        },
        None => {
            let mut tracer = StderrTracer::new(level);
            match load_from_file_traced(&options.input, &mut tracer) {
                Ok(network) => network,
                Err(e) => {
                    eprintln!("{}: {e}", options.input.display());
                    process::exit(1);
                }
            }
        }
    };

    print_summary(&network);

    let count = network.diagnostics().len();
    if count > 0 {
        println!();
        println!("{count} diagnostic(s)");
    }
}
