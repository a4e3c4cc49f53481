//! Corpus Benchmarking Tool
//!
//! Measures the analysis pipeline on a real exported dataset and doubles as
//! a command-line smoke test for the whole crate.
//!
//! ## Input Format
//!
//! A TSV file: first line is the header, first column is the "Major"
//! grouping identifier, remaining columns are task/essay columns. Cells may
//! contain the annotation markup the normalizer handles. (Loading real
//! spreadsheets is the hosting application's job; TSV keeps this tool
//! dependency-free.)
//!
//! ## Usage
//!
//! ```bash
//! # Frequency + concordance over all columns, searching for "the"
//! ./target/release/corpus_bench /path/to/corpus.tsv
//!
//! # Search a different term
//! ./target/release/corpus_bench /path/to/corpus.tsv learning
//! ```
//!
//! ## Output
//!
//! Per stage: elapsed time, throughput, token/hit counts, then engine
//! metrics showing cache behavior across repeated searches.

use std::env;
use std::fs;
use std::time::{Duration, Instant};

use kwic_core::{Corpus, Kwic, DEFAULT_WINDOW};

const WARMUP_RUNS: usize = 1;
const MEASURE_RUNS: usize = 5;

fn main() -> std::io::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: corpus_bench <path.tsv> [term]");
        std::process::exit(1);
    }

    let path = &args[1];
    let term = args.get(2).map(String::as_str).unwrap_or("the");

    println!("Loading file...");
    let raw = fs::read_to_string(path)?;
    let corpus = parse_tsv(&raw);

    let columns: Vec<String> = corpus.columns().to_vec();
    let selection: Vec<&str> = columns.iter().map(String::as_str).collect();

    println!("Rows:    {}", corpus.len());
    println!("Columns: {}", columns.len());
    println!("Bytes:   {}\n", fmt_bytes(raw.len() as u64));

    let mut kwic = Kwic::new(corpus);

    bench_tokenize(&mut kwic, &selection);
    bench_frequency(&mut kwic, &selection);
    bench_concordance(&mut kwic, &selection, term);

    println!("Metrics: {:?}", kwic.metrics());
    println!("Stats:   {}", kwic.stats());

    Ok(())
}

/// First line: header (column 0 is the Major identifier).
fn parse_tsv(raw: &str) -> Corpus {
    let mut lines = raw.lines();

    let header = lines.next().unwrap_or_default();
    let columns: Vec<&str> = header.split('\t').skip(1).collect();
    let mut builder = Corpus::builder(columns);

    for line in lines {
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split('\t');
        let major = fields.next().unwrap_or_default();
        let cells: Vec<&str> = fields.collect();
        builder = builder.row(major, &cells);
    }

    builder.build()
}

fn bench_tokenize(kwic: &mut Kwic, selection: &[&str]) {
    println!("=== Normalize + Tokenize ===");

    let mut tokens = 0u64;
    let elapsed = measure(|| {
        // First run pays the full normalize+tokenize cost; the rest hit
        // the stream cache, so this reports steady-state lookup time.
        tokens = kwic
            .tokens(selection)
            .map(|t| t.len() as u64)
            .unwrap_or(0);
        std::hint::black_box(tokens);
    });

    print_perf("Tokenize", elapsed, tokens, "tokens");
}

fn bench_frequency(kwic: &mut Kwic, selection: &[&str]) {
    println!("=== Frequency ===");

    warmup(|| {
        let _ = kwic.frequency(selection);
    });

    let mut distinct = 0u64;
    let elapsed = measure(|| {
        distinct = kwic
            .frequency(selection)
            .map(|t| t.len() as u64)
            .unwrap_or(0);
        std::hint::black_box(distinct);
    });

    print_perf("Frequency", elapsed, distinct, "distinct words");
}

fn bench_concordance(kwic: &mut Kwic, selection: &[&str], term: &str) {
    println!("=== Concordance ({term:?}) ===");

    warmup(|| {
        let _ = kwic.concordance(selection, term, DEFAULT_WINDOW);
    });

    let mut hits = 0u64;
    let elapsed = measure(|| {
        hits = kwic
            .concordance(selection, term, DEFAULT_WINDOW)
            .map(|o| o.hits().len() as u64)
            .unwrap_or(0);
        std::hint::black_box(hits);
    });

    print_perf("Concordance", elapsed, hits, "hits");
}

fn warmup<F: FnMut()>(mut f: F) {
    for _ in 0..WARMUP_RUNS {
        f();
    }
}

fn measure<F: FnMut()>(mut f: F) -> Duration {
    let mut total = Duration::ZERO;

    for _ in 0..MEASURE_RUNS {
        let start = Instant::now();
        f();
        total += start.elapsed();
    }

    total / MEASURE_RUNS as u32
}

fn print_perf(label: &str, elapsed: Duration, count: u64, unit: &str) {
    println!("--------------------------------");
    println!("Mode        : {}", label);
    println!("Elapsed     : {:.3} ms", elapsed.as_secs_f64() * 1000.0);
    println!("Count       : {} {}", fmt_count(count), unit);
    println!("--------------------------------\n");
}

fn fmt_bytes(b: u64) -> String {
    if b >= 1024 * 1024 {
        format!("{:.2} MiB", b as f64 / (1024.0 * 1024.0))
    } else if b >= 1024 {
        format!("{:.2} KiB", b as f64 / 1024.0)
    } else {
        format!("{} B", b)
    }
}

fn fmt_count(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);

    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('_');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}
