use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "lrn-fetch")]
#[command(about = "Fetch LRN/porting lookups for a list of phone numbers")]
pub struct FetchArgs {
    /// TOML configuration file holding the API token
    #[arg(short = 'c', long, default_value = "./config.toml")]
    pub config_file: String,

    /// CSV file containing the phone numbers
    #[arg(short = 'i', long, default_value = "./input.csv")]
    pub input_file: String,

    /// Column name containing the phone numbers
    #[arg(short = 'n', long)]
    pub field_name: String,

    /// Directory where lookup responses are written, one JSON file per number
    #[arg(short = 'o', long, default_value = "./lookup_output")]
    pub output_dir: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "lrn-convert")]
#[command(about = "Flatten a directory of lookup responses into a single CSV")]
pub struct ConvertArgs {
    /// Directory containing the persisted lookup JSON files
    #[arg(short = 'i', long)]
    pub input_dir: String,

    /// CSV file to write
    #[arg(short = 'o', long)]
    pub output_file: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,
}
