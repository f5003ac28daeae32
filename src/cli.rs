//! Command-line interface for the AQI daemon.

use std::path::PathBuf;

use clap::Parser;

use crate::config::ConfigSource;

/// Command-line arguments of the `aqi-calculator` binary.
///
/// Every broker and topic flag is optional; unset flags fall back to the
/// configuration file and then to built-in defaults.
#[derive(Debug, Clone, Parser)]
#[command(name = "aqi-calculator")]
#[command(about = "Enriches particulate-matter readings with their Air Quality Index", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// MQTT broker host
    #[arg(long)]
    pub broker: Option<String>,

    /// MQTT broker port
    #[arg(long)]
    pub port: Option<u16>,

    /// Topic filter to read sensor readings from
    #[arg(long)]
    pub input_topic: Option<String>,

    /// Topic to publish enriched readings to
    #[arg(long)]
    pub output_topic: Option<String>,

    /// MQTT client identifier
    #[arg(long)]
    pub client_id: Option<String>,

    /// QoS level for subscribing and publishing (0, 1 or 2)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=2))]
    pub qos: Option<u8>,

    /// MQTT keep-alive interval in seconds
    #[arg(long)]
    pub keep_alive_secs: Option<u64>,

    /// Seconds to wait before reconnecting after a connection error
    #[arg(long)]
    pub reconnect_delay_secs: Option<u64>,
}

impl Cli {
    /// Returns the flags that were given, as a configuration layer.
    pub fn overrides(&self) -> ConfigSource {
        ConfigSource {
            broker: self.broker.clone(),
            port: self.port,
            client_id: self.client_id.clone(),
            input_topic: self.input_topic.clone(),
            output_topic: self.output_topic.clone(),
            qos: self.qos,
            keep_alive_secs: self.keep_alive_secs,
            reconnect_delay_secs: self.reconnect_delay_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_flags_means_no_overrides() {
        let cli = Cli::try_parse_from(["aqi-calculator"]).unwrap();
        assert_eq!(cli.config, None);
        assert_eq!(cli.overrides(), ConfigSource::default());
    }

    #[test]
    fn test_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "aqi-calculator",
            "--broker",
            "localhost",
            "--port",
            "21883",
            "--input-topic",
            "test/airgradient/readings",
            "--output-topic",
            "test/aqi",
            "--client-id",
            "aqi-daemon-test",
        ])
        .unwrap();

        let overrides = cli.overrides();
        assert_eq!(overrides.broker.as_deref(), Some("localhost"));
        assert_eq!(overrides.port, Some(21883));
        assert_eq!(overrides.input_topic.as_deref(), Some("test/airgradient/readings"));
        assert_eq!(overrides.output_topic.as_deref(), Some("test/aqi"));
        assert_eq!(overrides.client_id.as_deref(), Some("aqi-daemon-test"));
        assert_eq!(overrides.qos, None);
    }

    #[test]
    fn test_config_path_flag() {
        let cli = Cli::try_parse_from(["aqi-calculator", "-c", "/etc/aqi.yaml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/aqi.yaml")));
    }

    #[test]
    fn test_out_of_range_qos_is_rejected() {
        assert!(Cli::try_parse_from(["aqi-calculator", "--qos", "3"]).is_err());
    }
}
