//! lzw12-cli - Command-line interface for the 12-bit LZW decoder
//!
//! A command-line tool for decompressing, inspecting and timing packed 12-bit
//! LZW files.

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use lzw12::{decode_with_stats, CodeLayout, DecodeStats, DecoderConfig};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(name = "lzw12-cli")]
#[command(about = "A CLI tool for 12-bit LZW decompression")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    dictionary: DictionaryArgs,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Args)]
struct DictionaryArgs {
    /// Size of the base alphabet
    #[arg(long, global = true, default_value_t = lzw12::DICTIONARY_INIT_SIZE)]
    init_size: usize,

    /// Dictionary size that triggers a reset
    #[arg(long, global = true, default_value_t = lzw12::MAX_DICTIONARY_SIZE)]
    max_size: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Decompress a packed LZW file
    Decompress {
        /// Input compressed file
        input: PathBuf,

        /// Output decompressed file
        output: PathBuf,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Get information about a compressed file
    Info {
        /// Compressed file to analyze
        input: PathBuf,
    },

    /// Time decompression of one or more files
    Bench {
        /// Compressed files to decode
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Decodes per file
        #[arg(short = 'n', long, default_value_t = 1)]
        iterations: u32,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = DecoderConfig::new(cli.dictionary.init_size, cli.dictionary.max_size)?;

    match cli.command {
        Commands::Decompress {
            input,
            output,
            force,
        } => decompress_file(&input, &output, &config, force, cli.verbose, cli.quiet),
        Commands::Info { input } => show_file_info(&input, &config, cli.verbose),
        Commands::Bench { inputs, iterations } => {
            bench_files(&inputs, &config, iterations, cli.quiet)
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        LevelFilter::ERROR
    } else if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}",
    )
    .map(|style| style.progress_chars("#>-"))
    .unwrap_or_else(|_| ProgressStyle::default_bar())
}

fn decompress_file(
    input: &Path,
    output: &Path,
    config: &DecoderConfig,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Check if input file exists
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    // Check if output file exists and force flag
    if output.exists() && !force {
        return Err(format!(
            "Output file '{}' already exists. Use --force to overwrite",
            output.display()
        )
        .into());
    }

    if verbose {
        println!(
            "Decompressing '{}' to '{}'",
            input.display(),
            output.display()
        );
        println!(
            "Dictionary: {} base entries, reset at {}",
            config.dictionary_init_size(),
            config.max_dictionary_size()
        );
    }

    let start_time = Instant::now();

    let compressed_data = fs::read(input)?;
    let input_size = compressed_data.len();

    if verbose {
        println!("Compressed size: {} bytes", input_size);
    }

    let (decompressed_data, stats) = decode_with_stats(&compressed_data, config)
        .map_err(|e| format!("Decompression failed: {}", e))?;

    fs::write(output, &decompressed_data)?;

    let decompression_time = start_time.elapsed();

    if !quiet {
        println!("✓ Decompression successful!");
        println!("  Input:  {} bytes", stats.input_bytes);
        println!("  Output: {} bytes", stats.output_bytes);
        println!("  Packed: {}", ratio_label(&stats));
        println!("  Time:   {:.2?}", decompression_time);

        if verbose {
            println!("  Codes:  {}", stats.codes_read);
            println!("  Resets: {}", stats.dictionary_resets);
        }
    }

    Ok(())
}

fn show_file_info(
    input: &Path,
    config: &DecoderConfig,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Check if input file exists
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    let data = fs::read(input)?;
    let layout = CodeLayout::of(data.len());

    println!("LZW File Information:");
    println!("  File: {}", input.display());
    println!("  Size: {} bytes", layout.input_bytes);
    println!("  12-bit Codes: {}", layout.twelve_bit_codes);
    println!(
        "  Trailing 16-bit Code: {}",
        if layout.has_trailing_code {
            "yes"
        } else {
            "no"
        }
    );

    if verbose && !data.is_empty() {
        let head: Vec<String> = data.iter().take(6).map(|b| format!("{b:02x}")).collect();
        println!("  Leading bytes: {}", head.join(" "));
    }

    match decode_with_stats(&data, config) {
        Ok((_, stats)) => {
            print_stats(&stats);
            println!("  Status: ✓ Valid LZW stream");
        }
        Err(e) => {
            println!("  Status: ✗ Invalid or corrupted LZW stream");
            if verbose {
                println!("  Error: {}", e);
            }
        }
    }

    Ok(())
}

fn print_stats(stats: &DecodeStats) {
    if let Some(code) = stats.trailing_code {
        println!("  Trailing Code Value: {}", code);
    }
    println!("  Dictionary Resets: {}", stats.dictionary_resets);
    println!("  KwK Codes: {}", stats.kwk_resolutions);
    println!("  Decompressed Size: {} bytes", stats.output_bytes);
    println!("  Packed/Decoded Size: {}", ratio_label(stats));
}

/// Packed size as a share of the decoded size
fn ratio_label(stats: &DecodeStats) -> String {
    format!(
        "{:.1}% of decoded size ({} / {} bytes)",
        stats.compression_ratio * 100.0,
        stats.input_bytes,
        stats.output_bytes
    )
}

fn bench_files(
    inputs: &[PathBuf],
    config: &DecoderConfig,
    iterations: u32,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let iterations = iterations.max(1);

    let progress = if !quiet && inputs.len() > 1 {
        let pb = ProgressBar::new(inputs.len() as u64);
        pb.set_style(progress_style());
        pb.set_message("Decoding...");
        Some(pb)
    } else {
        None
    };

    let mut report = Vec::with_capacity(inputs.len());
    for input in inputs {
        let data = fs::read(input)
            .map_err(|e| format!("Failed to read {}: {}", input.display(), e))?;

        let elapsed = time_decode(&data, config, iterations)
            .map_err(|e| format!("Failed to decode {}: {}", input.display(), e))?;
        report.push((input, elapsed));

        if let Some(ref pb) = progress {
            pb.inc(1);
        }
    }

    if let Some(ref pb) = progress {
        pb.finish_with_message("Benchmark complete");
    }

    if !quiet {
        for (input, elapsed) in report {
            let name = input
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| input.display().to_string());
            println!("Execution time - {}: {:.2?}", name, elapsed);
        }
    }

    Ok(())
}

/// Average wall time of `iterations` decodes
fn time_decode(data: &[u8], config: &DecoderConfig, iterations: u32) -> lzw12::Result<Duration> {
    let start_time = Instant::now();
    for _ in 0..iterations {
        lzw12::decode_bytes_with_config(data, config)?;
    }
    Ok(start_time.elapsed() / iterations)
}
