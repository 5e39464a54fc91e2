// # acmedns - ACME DNS-01 challenge tool
//
// A THIN integration layer: it reads configuration, registers providers and
// runs exactly one provider operation. All record logic lives in the
// provider crates.
//
// ## Configuration
//
// Every flag can also be supplied through the environment:
//
// ### DNS Provider
// - `ACMEDNS_PROVIDER_TYPE`: Provider type (myaddr)
// - `ACMEDNS_MYADDR_KEY`: myaddr registration key
// - `ACMEDNS_MYADDR_ENDPOINT`: Update endpoint override (optional)
// - `ACMEDNS_HTTP_TIMEOUT_SECS`: Per-request HTTP timeout (optional)
//
// ### Logging
// - `ACMEDNS_LOG_LEVEL`: trace, debug, info, warn, error
//
// ## Example
//
// ```bash
// export ACMEDNS_MYADDR_KEY=your_key
//
// acmedns present example.com "$CHALLENGE_TOKEN"
// acmedns cleanup example.com
// ```

use acmedns_core::record::challenge_record_name;
use acmedns_core::{
    ProviderConfig, ProviderRegistry, Record, RecordAppender, RecordDeleter, RecordSetter,
};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
#[derive(Debug, Clone, Copy)]
enum AcmednsExitCode {
    /// Operation completed
    Success = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Provider or runtime failure
    RuntimeError = 2,
}

impl From<AcmednsExitCode> for ExitCode {
    fn from(code: AcmednsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Publish and clean up ACME DNS-01 challenge records
#[derive(Parser, Debug)]
#[command(name = "acmedns", version, about, long_about = None)]
struct Cli {
    /// DNS provider type
    #[arg(long, env = "ACMEDNS_PROVIDER_TYPE", default_value = "myaddr", global = true)]
    provider: String,

    /// myaddr registration key
    #[arg(long, env = "ACMEDNS_MYADDR_KEY", hide_env_values = true, global = true)]
    key: Option<String>,

    /// Update endpoint override
    #[arg(long, env = "ACMEDNS_MYADDR_ENDPOINT", global = true)]
    endpoint: Option<String>,

    /// Per-request HTTP timeout in seconds
    #[arg(long, env = "ACMEDNS_HTTP_TIMEOUT_SECS", global = true)]
    timeout_secs: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "ACMEDNS_LOG_LEVEL", default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Publish the challenge value for a domain
    Present {
        /// Domain being validated (e.g. example.com or *.example.com)
        domain: String,
        /// Challenge value (the TXT record content)
        value: String,
    },

    /// Add a challenge value for a domain
    Append {
        /// Domain being validated
        domain: String,
        /// Challenge value (the TXT record content)
        value: String,
    },

    /// Remove the challenge record for a domain
    Cleanup {
        /// Domain that was validated
        domain: String,
        /// Challenge value that was published
        value: Option<String>,
    },
}

impl Command {
    fn domain(&self) -> &str {
        match self {
            Command::Present { domain, .. }
            | Command::Append { domain, .. }
            | Command::Cleanup { domain, .. } => domain,
        }
    }
}

impl Cli {
    /// Build the provider configuration from flags/environment
    fn provider_config(&self) -> Result<ProviderConfig> {
        match self.provider.as_str() {
            "myaddr" => {
                let key = self.key.clone().unwrap_or_default();
                if key.is_empty() {
                    anyhow::bail!(
                        "ACMEDNS_MYADDR_KEY is required. \
                        Set it via: export ACMEDNS_MYADDR_KEY=your_key"
                    );
                }
                Ok(ProviderConfig::Myaddr {
                    key,
                    endpoint: self.endpoint.clone(),
                    timeout_secs: self.timeout_secs,
                })
            }
            other => anyhow::bail!(
                "ACMEDNS_PROVIDER_TYPE '{}' is not supported. \
                Supported providers: myaddr",
                other
            ),
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<ProviderConfig> {
        let config = self.provider_config()?;
        config.validate()?;

        parse_log_level(&self.log_level)?;
        validate_domain_name(self.command.domain())?;

        Ok(config)
    }
}

fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!(
            "ACMEDNS_LOG_LEVEL '{}' is not valid. \
            Valid levels: trace, debug, info, warn, error",
            level
        ),
    }
}

/// Validate that a string is a plausible domain name
///
/// Basic RFC 1035 checks plus an optional leading wildcard label.
fn validate_domain_name(domain: &str) -> Result<()> {
    let domain = domain.trim_end_matches('.');
    let domain = domain.strip_prefix("*.").unwrap_or(domain);

    if domain.is_empty() {
        anyhow::bail!("Domain name cannot be empty");
    }

    if domain.len() > 253 {
        anyhow::bail!(
            "Domain name too long: {} chars (max 253). Got: {}",
            domain.len(),
            domain
        );
    }

    for label in domain.split('.') {
        if label.is_empty() {
            anyhow::bail!("Domain name has empty label: '{}'", domain);
        }

        if label.len() > 63 {
            anyhow::bail!(
                "Domain label too long: {} chars (max 63). Label: '{}'",
                label.len(),
                label
            );
        }

        if !label.chars().all(|c| c.is_alphanumeric() || c == '-') {
            anyhow::bail!(
                "Domain label contains invalid characters. Label: '{}'. \
                Valid: alphanumeric and hyphen only.",
                label
            );
        }

        if label.starts_with('-') || label.ends_with('-') {
            anyhow::bail!(
                "Domain label cannot start or end with hyphen. Label: '{}'",
                label
            );
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            eprintln!("{}", e);
            return AcmednsExitCode::ConfigError.into();
        }
    };

    let config = match cli.validate() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration validation error: {}", e);
            return AcmednsExitCode::ConfigError.into();
        }
    };

    // Already validated above
    let log_level = parse_log_level(&cli.log_level).unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return AcmednsExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return AcmednsExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        match run(cli.command, config).await {
            Ok(()) => AcmednsExitCode::Success,
            Err(e) => {
                error!("{}", e);
                AcmednsExitCode::RuntimeError
            }
        }
    })
    .into()
}

/// Register providers and run one operation
async fn run(command: Command, config: ProviderConfig) -> Result<()> {
    let registry = ProviderRegistry::new();

    #[cfg(feature = "myaddr")]
    acmedns_provider_myaddr::register(&registry);

    let provider = registry.create_provider(&config)?;
    info!("Using DNS provider: {}", provider.provider_name());

    match command {
        Command::Present { domain, value } => {
            let (zone, records) = challenge(&domain, value);
            let applied = provider.set_records(&zone, records).await?;
            info!("Presented {} challenge record(s) for {}", applied.len(), domain);
        }
        Command::Append { domain, value } => {
            let (zone, records) = challenge(&domain, value);
            let applied = provider.append_records(&zone, records).await?;
            info!("Appended {} challenge record(s) for {}", applied.len(), domain);
        }
        Command::Cleanup { domain, value } => {
            let (zone, records) = challenge(&domain, value.unwrap_or_default());
            let deleted = provider.delete_records(&zone, records).await?;
            info!("Cleaned up {} challenge record(s) for {}", deleted.len(), domain);
        }
    }

    Ok(())
}

/// Zone and challenge record for a domain
fn challenge(domain: &str, value: String) -> (String, Vec<Record>) {
    let zone = domain
        .trim_end_matches('.')
        .trim_start_matches("*.")
        .to_string();
    let record = Record::txt(challenge_record_name(domain), value);
    (zone, vec![record])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_present_builds_myaddr_config() {
        let cli = parse(&["acmedns", "--key", "secret", "present", "example.com", "token"]);
        let config = cli.validate().unwrap();
        assert_eq!(config.type_name(), "myaddr");
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let cli = Cli {
            provider: "myaddr".to_string(),
            key: None,
            endpoint: None,
            timeout_secs: None,
            log_level: "info".to_string(),
            command: Command::Cleanup {
                domain: "example.com".to_string(),
                value: None,
            },
        };
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let cli = parse(&[
            "acmedns", "--provider", "route53", "--key", "k", "present", "example.com", "t",
        ]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_log_level_validation() {
        assert_eq!(parse_log_level("DEBUG").unwrap(), Level::DEBUG);
        assert!(parse_log_level("verbose").is_err());
    }

    #[test]
    fn test_domain_validation() {
        assert!(validate_domain_name("example.com").is_ok());
        assert!(validate_domain_name("*.example.com").is_ok());
        assert!(validate_domain_name("example.com.").is_ok());
        assert!(validate_domain_name("").is_err());
        assert!(validate_domain_name("exa mple.com").is_err());
        assert!(validate_domain_name("-bad.example.com").is_err());
        assert!(validate_domain_name("a..b").is_err());
    }

    #[test]
    fn test_challenge_record_for_wildcard() {
        let (zone, records) = challenge("*.example.com", "token".to_string());
        assert_eq!(zone, "example.com");
        assert_eq!(records, vec![Record::txt("_acme-challenge.example.com", "token")]);
    }
}
