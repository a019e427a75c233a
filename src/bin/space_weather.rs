use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::Parser;
use orbital_decay::spaceweather::SpaceWeatherTable;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Look up F10.7 and Ap indices for a UTC timestamp"
)]
struct Cli {
    /// CelesTrak SW-All.csv export (defaults to the bundled sample)
    #[arg(long, default_value = "data/SW-sample.csv")]
    table: PathBuf,

    /// UTC timestamp, e.g. 2000-01-01T01:30:00
    #[arg(long)]
    at: String,
}

fn main() -> anyhow::Result<()> {
    orbital_decay::logging::init();
    let cli = Cli::parse();
    let at = NaiveDateTime::parse_from_str(&cli.at, "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| anyhow::anyhow!("invalid --at '{}': {e}", cli.at))?;

    let table = SpaceWeatherTable::from_path(&cli.table)?;
    let indices = table.indices_for(&at)?;

    println!("=== Space Weather ===");
    println!("Epoch (UTC)     : {}", at.format("%Y-%m-%d %H:%M:%S"));
    println!("F10.7 observed  : {:.1} sfu", indices.f107);
    println!("F10.7 81-day avg: {:.1} sfu", indices.f107_avg);
    println!("Ap (3-hour)     : {:.0}", indices.ap);

    Ok(())
}
