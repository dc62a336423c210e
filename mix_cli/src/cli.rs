//! CLI definition using clap

use clap::{Parser, ValueEnum};

use mix_core::session::{DEFAULT_LOSS_RATE_PERCENT, DEFAULT_TRUCK_CAPACITY_M3, MAX_LOSS_RATE_PERCENT};

/// Output format for results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "readymix")]
#[command(version)]
#[command(about = "Ready-mix concrete takeoff: slab and wall volumes, loss allowance and truck count")]
#[command(long_about = None)]
pub struct Cli {
    /// Loss allowance in percent (0-15)
    #[arg(long, short = 'l', default_value_t = DEFAULT_LOSS_RATE_PERCENT,
          value_parser = clap::value_parser!(u8).range(0..=MAX_LOSS_RATE_PERCENT as i64))]
    pub loss_rate: u8,

    /// Truck capacity in m³
    #[arg(long, short = 't', default_value_t = DEFAULT_TRUCK_CAPACITY_M3)]
    pub truck_capacity: f64,

    /// Output format (table, json)
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["readymix"]).unwrap();
        assert_eq!(cli.loss_rate, 3);
        assert_eq!(cli.truck_capacity, 6.0);
        assert_eq!(cli.format, OutputFormat::Table);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from(["readymix", "-l", "5", "--truck-capacity", "7.5", "-f", "json", "-v"])
            .unwrap();
        assert_eq!(cli.loss_rate, 5);
        assert_eq!(cli.truck_capacity, 7.5);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
    }

    #[test]
    fn test_loss_rate_out_of_range() {
        assert!(Cli::try_parse_from(["readymix", "--loss-rate", "16"]).is_err());
    }

    #[test]
    fn test_verify_command() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
