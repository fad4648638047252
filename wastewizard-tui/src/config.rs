use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "wastewizard")]
#[command(about = "Remote monitoring dashboard for WasteWizard smart bins", long_about = None)]
#[command(version)]
pub(crate) struct DashboardConfig {
    /// Deployment to open on start (e.g. "wizard" or "classic")
    #[arg(short, long, env = "WASTEWIZARD_DEPLOYMENT")]
    pub deployment: Option<String>,

    /// Seed for reproducible simulated readings
    #[arg(long, env = "WASTEWIZARD_SEED")]
    pub seed: Option<u64>,

    /// Artificial latency before a simulated live update completes
    #[arg(long, env = "WASTEWIZARD_UPDATE_DELAY_MS", default_value_t = 2000)]
    pub update_delay_ms: u64,

    /// Write logs to this file (logging is off otherwise)
    #[arg(long, env = "WASTEWIZARD_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl DashboardConfig {
    pub(crate) fn update_delay(&self) -> Duration {
        Duration::from_millis(self.update_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_is_well_formed() {
        DashboardConfig::command().debug_assert();
    }

    #[test]
    fn flags_override_defaults() {
        let config = DashboardConfig::try_parse_from([
            "wastewizard",
            "--deployment",
            "classic",
            "--seed",
            "11",
            "--update-delay-ms",
            "250",
        ])
        .expect("valid arguments");

        assert_eq!(config.deployment.as_deref(), Some("classic"));
        assert_eq!(config.seed, Some(11));
        assert_eq!(config.update_delay(), Duration::from_millis(250));
    }

    #[test]
    fn rejects_non_numeric_seed() {
        let result = DashboardConfig::try_parse_from(["wastewizard", "--seed", "abc"]);

        assert!(result.is_err());
    }
}
