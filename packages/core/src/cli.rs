use std::path::PathBuf;

use clap::Parser;

/// Power load monitor CLI arguments
#[derive(Debug, Parser)]
#[command(
    name = "power-load-monitor",
    version,
    about = "Rule-based electrical load classification over IoT power telemetry"
)]
pub struct Cli {
    /// Default data source (api or csv)
    #[arg(long)]
    pub source: Option<String>,

    /// Remote channel id
    #[arg(long)]
    pub channel_id: Option<String>,

    /// Path to the local archive CSV
    #[arg(long)]
    pub archive: Option<PathBuf>,

    /// Default electricity rate per kWh
    #[arg(long)]
    pub rate: Option<f64>,

    /// HTTP listen port
    #[arg(long)]
    pub port: Option<u16>,
}
