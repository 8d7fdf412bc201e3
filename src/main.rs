use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use procmem::config::{validate_config, Config, ConfigLoader};
use procmem::core::types::NameMatch;
use procmem::memory::{read_bytes, read_value, write_bytes, write_value};
use procmem::process::{
    find_processes_by_name, open_by_id_with_info, open_by_name_with, ProcessEnumerator,
};
use procmem::{Address, MemoryValue, ProcessHandle, ValueType};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "procmem")]
#[command(version, about = "Inspect and patch the memory of running processes")]
struct Cli {
    /// Configuration file; defaults to procmem.toml in the working directory
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List running processes
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Only show processes with this name, compared whole-name under
        /// `process.name_match` (case-insensitive on Windows by default)
        #[arg(long)]
        filter: Option<String>,
    },

    /// Read one typed value
    Read {
        #[command(flatten)]
        target: Target,
        address: Address,
        #[arg(short = 't', long = "type")]
        value_type: ValueType,
    },

    /// Hexdump a block of memory
    Dump {
        #[command(flatten)]
        target: Target,
        address: Address,
        size: usize,
    },

    /// Write one typed value
    Write {
        #[command(flatten)]
        target: Target,
        address: Address,
        #[arg(short = 't', long = "type")]
        value_type: ValueType,
        value: String,
    },

    /// Write raw bytes given as hex
    WriteBytes {
        #[command(flatten)]
        target: Target,
        address: Address,
        /// Bytes as a hex string, e.g. 90909090
        hex: String,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct Target {
    /// Target process id
    #[arg(long)]
    pid: Option<u32>,

    /// Target process name
    #[arg(long)]
    name: Option<String>,
}

impl Target {
    fn open(&self, policy: NameMatch) -> Result<ProcessHandle> {
        let (handle, info) = match (self.pid, self.name.as_deref()) {
            (Some(pid), _) => open_by_id_with_info(pid)
                .with_context(|| format!("failed to open process {}", pid))?,
            (None, Some(name)) => open_by_name_with(name, policy)
                .with_context(|| format!("failed to open process '{}'", name))?,
            (None, None) => bail!("either --pid or --name is required"),
        };
        info!("Attached to {}", info);
        Ok(handle)
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let config = match path {
        Some(path) => ConfigLoader::new(path)
            .load_or_default()
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => procmem::config::load_config().context("failed to load procmem.toml")?,
    };
    validate_config(&config).context("invalid configuration")?;
    Ok(config)
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    init_logging(&config.logging.level)?;
    debug!(?config, "loaded configuration");

    let policy = config.process.name_match.resolve();

    match cli.command {
        Command::List { json, filter } => list(json, filter.as_deref(), policy),
        Command::Read {
            target,
            address,
            value_type,
        } => {
            let handle = target.open(policy)?;
            let value = read_value(&handle, address, value_type)
                .with_context(|| format!("failed to read {} at {}", value_type, address))?;
            println!("{}", value);
            handle.close()?;
            Ok(())
        }
        Command::Dump {
            target,
            address,
            size,
        } => {
            if size > config.memory.max_read_size {
                bail!(
                    "requested {} bytes, limit is {} (memory.max_read_size)",
                    size,
                    config.memory.max_read_size
                );
            }
            let handle = target.open(policy)?;
            let bytes = read_bytes(&handle, address, size)
                .with_context(|| format!("failed to read {} bytes at {}", size, address))?;
            print!("{}", hexdump(address, &bytes, config.memory.hexdump_width));
            handle.close()?;
            Ok(())
        }
        Command::Write {
            target,
            address,
            value_type,
            value,
        } => {
            let value = MemoryValue::parse(value_type, &value)?;
            let handle = target.open(policy)?;
            write_value(&handle, address, &value)
                .with_context(|| format!("failed to write {} at {}", value, address))?;
            info!("Wrote {} ({}) at {}", value, value_type, address);
            handle.close()?;
            Ok(())
        }
        Command::WriteBytes {
            target,
            address,
            hex,
        } => {
            let data = decode_hex(&hex)?;
            let handle = target.open(policy)?;
            write_bytes(&handle, address, &data)
                .with_context(|| format!("failed to write {} bytes at {}", data.len(), address))?;
            info!("Wrote {} bytes at {}", data.len(), address);
            handle.close()?;
            Ok(())
        }
    }
}

fn list(json: bool, filter: Option<&str>, policy: NameMatch) -> Result<()> {
    let processes = match filter {
        Some(name) => find_processes_by_name(name, policy)?,
        None => ProcessEnumerator::new()?.collect::<Result<Vec<_>, _>>()?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&processes)?);
        return Ok(());
    }

    println!("{:>8} {:>8}  NAME", "PID", "PPID");
    for process in &processes {
        println!("{:>8} {:>8}  {}", process.pid, process.parent_pid, process.name);
    }
    Ok(())
}

fn decode_hex(text: &str) -> Result<Vec<u8>> {
    let cleaned: String = text
        .trim_start_matches("0x")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    hex::decode(&cleaned).with_context(|| format!("invalid hex byte string '{}'", text))
}

fn hexdump(base: Address, bytes: &[u8], width: usize) -> String {
    let mut out = String::new();
    for (row, chunk) in bytes.chunks(width.max(1)).enumerate() {
        let offset = base.offset((row * width) as i64);
        let hex = chunk
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join(" ");
        let ascii: String = chunk
            .iter()
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
            .collect();
        out.push_str(&format!(
            "{}  {:<pad$}  {}\n",
            offset,
            hex,
            ascii,
            pad = width * 3 - 1
        ));
    }
    out
}
