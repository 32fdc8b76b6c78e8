use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use pdb_intersect::config::Settings;
use pdb_intersect::output::{CsvSink, ReportSink, TableSink};
use pdb_intersect::peeringdb::{Directory, InMemoryDirectory, PeeringDbClient};
use pdb_intersect::{exchange_for_address, intersect_by_asn, prefixes_for_exchange, PdbError};
use std::error::Error;
use std::path::PathBuf;

/// Query a peering directory for shared exchange presence and address owners.
#[derive(Parser, Debug)]
#[command(name = "pdb-intersect", version)]
struct Cli {
    /// Credentials file: login on line 1, password on line 2
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use a local JSON snapshot instead of the live API
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Table, global = true)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Exchanges where the organizations of both ASNs are present
    Intersect {
        asn1: u32,
        asn2: u32,
        /// Keep only networks of ASN1's org whose notes match this regex
        #[arg(default_value = "")]
        pat1: String,
        /// Keep only networks of ASN2's org whose notes match this regex
        #[arg(default_value = "")]
        pat2: String,
    },
    /// Exchange point owning an IPv4/IPv6 address
    Ix { address: String },
    /// Prefixes of an exchange point
    Prefixes { ix_id: u32 },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Table,
    Csv,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    if let Err(e) = log4rs::init_file("log4rs.yml", Default::default()) {
        eprintln!("{} log4rs.yml not loaded, logging disabled: {e}", "WARN".yellow());
    }
    dotenv::dotenv().ok();
    log::info!("#Start main()");

    let cli = Cli::parse();

    let directory: Box<dyn Directory> = match &cli.snapshot {
        Some(path) => Box::new(InMemoryDirectory::from_json_file(path)?),
        None => Box::new(PeeringDbClient::new(&Settings::load(cli.config.as_deref()))?),
    };

    match cli.command {
        Command::Intersect {
            asn1,
            asn2,
            pat1,
            pat2,
        } => {
            let report = match intersect_by_asn(&*directory, asn1, asn2, &pat1, &pat2) {
                Ok(report) => report,
                Err(e @ (PdbError::UnknownAsn(_) | PdbError::NoNetworks(_))) => {
                    eprintln!("{}", e.to_string().red());
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            };
            if report.rows.is_empty() {
                eprintln!("{}", "No common IXPs found".yellow());
            }
            let stdout = std::io::stdout();
            match cli.format {
                Format::Table => TableSink::new(stdout.lock()).emit(&report.header, &report.rows)?,
                Format::Csv => CsvSink::new(stdout.lock()).emit(&report.header, &report.rows)?,
            }
        }
        Command::Ix { address } => match exchange_for_address(&*directory, &address) {
            Ok(Some(ix)) => println!("{address} -> {ix}"),
            Ok(None) => println!("{} no exchange found for {address}", "NOT FOUND".on_red()),
            Err(e @ PdbError::InvalidAddress(_)) => {
                eprintln!("{}", e.to_string().red());
                std::process::exit(1);
            }
            Err(e) => return Err(e.into()),
        },
        Command::Prefixes { ix_id } => {
            let prefixes = prefixes_for_exchange(&*directory, ix_id)?;
            if prefixes.is_empty() {
                println!("{} no prefixes for ix {ix_id}", "NOT FOUND".on_red());
            }
            for prefix in prefixes {
                println!("{:<5} {:<43} ixlan {}", prefix.protocol, prefix.prefix, prefix.ixlan_id);
            }
        }
    }

    Ok(())
}
