use clap::Parser;
use std::path::PathBuf;

/// Serve a web form that exports company registry search results as CSV
#[derive(Parser, Debug, Clone)]
#[command(name = "registry-export")]
#[command(version)]
#[command(
    about = "Serve a web form that exports company registry search results, with officers, as CSV",
    long_about = None
)]
pub struct Args {
    /// Registry REST API key
    #[arg(long, env = "COMPANIES_HOUSE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Verbose logging and error chains in HTTP error responses
    #[arg(long, env = "DEBUG")]
    pub debug: bool,

    /// Registry API base URL (overrides the config file)
    #[arg(long, env = "REGISTRY_API_BASE_URL", value_name = "URL")]
    pub base_url: Option<String>,

    /// Maximum number of companies per export (overrides the config file)
    #[arg(long, env = "MAX_RESULTS", value_name = "N")]
    pub max_results: Option<usize>,

    /// Path to a YAML config file (defaults to registry-export.config.yml
    /// in the current directory, if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn declared_default(id: &str) -> Vec<String> {
        Args::command()
            .get_arguments()
            .find(|arg| arg.get_id() == id)
            .unwrap()
            .get_default_values()
            .iter()
            .map(|v| v.to_string_lossy().into_owned())
            .collect()
    }

    // Inspects the declared defaults instead of parsing, since parsing also
    // reads PORT, HOST and friends from the environment
    #[test]
    fn test_defaults() {
        assert_eq!(declared_default("port"), vec!["5000"]);
        assert_eq!(declared_default("host"), vec!["0.0.0.0"]);
        assert!(declared_default("base_url").is_empty());
        assert!(declared_default("max_results").is_empty());
        assert!(declared_default("config").is_empty());
    }

    #[test]
    fn test_env_backed_arguments() {
        let command = Args::command();
        let env_of = |id: &str| {
            command
                .get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_env())
                .map(|env| env.to_string_lossy().into_owned())
        };

        assert_eq!(env_of("api_key").as_deref(), Some("COMPANIES_HOUSE_API_KEY"));
        assert_eq!(env_of("port").as_deref(), Some("PORT"));
        assert_eq!(env_of("host").as_deref(), Some("HOST"));
        assert_eq!(env_of("debug").as_deref(), Some("DEBUG"));
        assert_eq!(env_of("config"), None);
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "registry-export",
            "--api-key",
            "abc",
            "--port",
            "8080",
            "--host",
            "127.0.0.1",
            "--debug",
            "--base-url",
            "http://localhost:9000",
            "--max-results",
            "250",
            "--config",
            "custom.yml",
        ])
        .unwrap();

        assert_eq!(args.port, 8080);
        assert_eq!(args.host, "127.0.0.1");
        assert!(args.debug);
        assert_eq!(args.base_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(args.max_results, Some(250));
        assert_eq!(args.config, Some(PathBuf::from("custom.yml")));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = Args::try_parse_from(["registry-export", "--port", "not-a-port"]);
        assert!(result.is_err());
    }
}
