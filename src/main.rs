//! resolve-hits-demo: a minimal driver for the resolve-hits library.
//!
//! Usage: resolve-hits-demo <FILE>
//!
//! Reads a plain-text hit table (one hit per line:
//! `query_id\tlabel\tscore\tstart-stop[,start-stop...]`) and prints the
//! chosen architecture per query.

use clap::Parser;
use resolve_hits::batch::{group_hits_by_query, resolve_all, HitSpec};
use resolve_hits::error::ResolveError;
use resolve_hits::hit_list::HitList;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "resolve-hits-demo")]
#[command(author = "Manish Kumar Bobbili")]
#[command(version)]
#[command(about = "Resolve a table of scored sequence hits into maximum-score non-overlapping architectures per query", long_about = None)]
struct Cli {
    /// Input hit table (use - for stdin)
    input: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        error!(%err, "resolve-hits-demo failed");
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), DemoError> {
    let content = read_input(cli.input)?;
    let specs = parse_hit_table(&content)?;
    info!(num_hits = specs.len(), "parsed hit table");

    let grouped: BTreeMap<String, HitList> = group_hits_by_query(specs)?;
    let resolved = resolve_all(&grouped);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (query_id, architecture) in resolved {
        let hits = &grouped[&query_id];
        print_architecture(&mut out, &query_id, hits, &architecture)?;
    }
    Ok(())
}

fn read_input(input: Option<PathBuf>) -> Result<String, DemoError> {
    let from_stdin = match &input {
        None => true,
        Some(path) => path.as_os_str() == "-",
    };
    if from_stdin {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    Ok(fs::read_to_string(input.expect("checked above"))?)
}

fn parse_hit_table(content: &str) -> Result<Vec<HitSpec>, DemoError> {
    let mut specs = Vec::new();
    for (line_number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(DemoError::Format {
                line: line_number + 1,
                message: format!("expected 4 whitespace-separated fields, got {}", fields.len()),
            });
        }
        let query_id = fields[0].to_string();
        let label = fields[1].to_string();
        let score: f32 = fields[2].parse().map_err(|_| DemoError::Format {
            line: line_number + 1,
            message: format!("invalid score '{}'", fields[2]),
        })?;
        let segments = parse_segments(fields[3], line_number + 1)?;
        specs.push(HitSpec {
            query_id,
            label,
            score,
            segments,
        });
    }
    Ok(specs)
}

fn parse_segments(field: &str, line_number: usize) -> Result<Vec<(u32, u32)>, DemoError> {
    field
        .split(',')
        .map(|seg| {
            let (start, stop) = seg.split_once('-').ok_or_else(|| DemoError::Format {
                line: line_number,
                message: format!("invalid segment '{}', expected start-stop", seg),
            })?;
            let start: u32 = start.parse().map_err(|_| DemoError::Format {
                line: line_number,
                message: format!("invalid segment start '{}'", start),
            })?;
            let stop: u32 = stop.parse().map_err(|_| DemoError::Format {
                line: line_number,
                message: format!("invalid segment stop '{}'", stop),
            })?;
            Ok((start, stop))
        })
        .collect()
}

fn print_architecture(
    out: &mut impl io::Write,
    query_id: &str,
    hits: &HitList,
    architecture: &resolve_hits::resolver::ScoredArchitecture,
) -> io::Result<()> {
    let mut score_buf = ryu::Buffer::new();
    let mut int_buf = itoa::Buffer::new();
    let rendered: Vec<String> = architecture
        .hit_indices()
        .iter()
        .map(|&idx| {
            let hit = hits.get(idx);
            let label = hits.label(hit.label_idx());
            let segs: Vec<String> = hit
                .run()
                .segments()
                .iter()
                .map(|s| {
                    let start_s = int_buf.format(s.start().residue_after()).to_string();
                    let stop_s = int_buf.format(s.stop().residue_before()).to_string();
                    format!("{}-{}", start_s, stop_s)
                })
                .collect();
            format!("{}@{}", label, segs.join(","))
        })
        .collect();
    writeln!(
        out,
        "{}\t{}\t{}",
        query_id,
        score_buf.format(architecture.score()),
        rendered.join(",")
    )
}

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("format error at line {line}: {message}")]
    Format { line: usize, message: String },

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
