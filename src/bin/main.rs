use serde_json::json;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use mrt_events::{MrtEventReader, RoutingEvent};

/// mrt-events is a simple cli tool that prints the routing events of an MRT file.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Opts {
    /// File path to a MRT file, plain or compressed with gzip or bzip2.
    #[clap(name = "FILE")]
    file_path: PathBuf,

    /// Output as JSON objects
    #[clap(long)]
    json: bool,

    /// Pretty-print JSON output
    #[clap(long)]
    pretty: bool,

    /// Count events and records instead of printing events
    #[clap(short, long)]
    count: bool,

    /// Stop at the first record that fails to decode
    #[clap(short, long)]
    fallible: bool,
}

fn format_event(event: &RoutingEvent, opts: &Opts) -> Result<String, serde_json::Error> {
    if !opts.json {
        return Ok(event.to_string());
    }
    let val = json!(event);
    if opts.pretty {
        serde_json::to_string_pretty(&val)
    } else {
        Ok(val.to_string())
    }
}

fn main() {
    let opts: Opts = Opts::parse();

    env_logger::init();

    let reader = match oneio::get_reader(&opts.file_path.to_string_lossy()) {
        Ok(r) => r,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };
    let mut parser = MrtEventReader::new(reader);

    let mut stdout = std::io::stdout();
    let mut events_count: u64 = 0;
    loop {
        let event = match parser.read() {
            Ok(Some(e)) => e,
            Ok(None) => break,
            Err(e) if opts.fallible || e.is_fatal() => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
            Err(e) => {
                log::warn!("skipping record: {}", e);
                continue;
            }
        };
        events_count += 1;
        if opts.count {
            continue;
        }

        let output_str = match format_event(&event, &opts) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        };
        if let Err(e) = writeln!(stdout, "{}", &output_str) {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                eprintln!("{}", e);
            }
            std::process::exit(1);
        }
    }

    if opts.count {
        println!("total records: {}", parser.records_decoded());
        println!("skipped records: {}", parser.records_skipped());
        println!("total events:  {}", events_count);
    }
}
