use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use huffpress::config::{CodecConfig, DEFAULT_CONFIG_FILE};
use huffpress::{HuffmanCodec, SumCheck};

#[derive(Parser)]
#[command(name = "huffpress")]
#[command(about = "Huffman encode and decode text")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, help = "Config file path")]
    config: Option<String>,

    #[arg(long, help = "Sum-check policy: ignore, warn or raise (overrides config)")]
    policy: Option<String>,

    #[arg(long, help = "Output as JSON")]
    json: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print the bitstream for TEXT
    Encode { text: String },
    /// Build a codec from TEXT and decode BITS (or its own encoding)
    Decode {
        text: String,
        #[arg(long)]
        bits: Option<String>,
    },
    /// Print the code table
    Table { text: String },
    /// Print the breadth-first flattened tree
    Tree { text: String },
    /// Print encoding statistics
    Stats { text: String },
    /// Write a default config file
    GenerateConfig {
        #[arg(long, default_value = DEFAULT_CONFIG_FILE, help = "Config file path")]
        output: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = CodecConfig::load(cli.config.as_deref())?;
    if let Some(policy) = cli.policy {
        config.sum_check = policy;
    }
    if cli.json {
        config.json_output = true;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    debug!(?config, "configuration loaded");

    let json = config.json_output;

    match cli.command {
        Commands::Encode { text } => {
            let codec = HuffmanCodec::new(&text)?;
            let bits = codec.encode()?;
            if json {
                println!("{}", serde_json::json!({ "bits": bits, "length": bits.len() }));
            } else {
                println!("{}", bits);
            }
        }
        Commands::Decode { text, bits } => {
            let policy: SumCheck = config.policy()?;
            let codec = HuffmanCodec::new(&text)?;
            let decoded = codec.decode(bits.as_deref(), policy)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&decoded)?);
            } else {
                println!("{}", decoded.text);
                for warning in &decoded.warnings {
                    eprintln!("warning: {}", warning);
                }
            }
        }
        Commands::Table { text } => {
            let codec = HuffmanCodec::new(&text)?;
            let table = codec.code_table();
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "codes": table,
                        "fingerprint": table.fingerprint(),
                    }))?
                );
            } else {
                for (symbol, code) in table.iter() {
                    println!("{:?}\t{}", symbol, code);
                }
                println!("fingerprint: {}", table.fingerprint());
            }
        }
        Commands::Tree { text } => {
            let codec = HuffmanCodec::new(&text)?;
            let nodes = codec.flatten();
            if json {
                println!("{}", serde_json::to_string_pretty(&nodes)?);
            } else {
                for node in nodes {
                    match node {
                        Some(n) => match n.symbol {
                            Some(symbol) => println!("({}, {:?})", n.weight, symbol),
                            None => println!("({}, '')", n.weight),
                        },
                        None => println!("-"),
                    }
                }
            }
        }
        Commands::Stats { text } => {
            let codec = HuffmanCodec::new(&text)?;
            let stats = codec.stats();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Symbols: {} ({} distinct)", stats.symbols, stats.distinct_symbols);
                println!("Encoded: {} bits (baseline {} bits)", stats.encoded_bits, stats.baseline_bits);
                println!("Ratio: {:.3}", stats.ratio);
                println!("Average code length: {:.3} bits", stats.average_code_length);
            }
        }
        Commands::GenerateConfig { output } => {
            CodecConfig::default().save(&output)?;
            info!("Generated config file: {}", output);
            if json {
                println!("{}", serde_json::json!({ "status": "generated", "path": output }));
            } else {
                println!("Generated config file: {}", output);
            }
        }
    }

    Ok(())
}
