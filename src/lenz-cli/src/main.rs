use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use lenz_core::message::{MessageSink, ToolMessage};
use lenz_core::params::Credentials;
use lenz_core::secrets::{CredentialStore, SecretsError};
use lenz_core::{init_logging, AppDirs, Config};
use lenz_tools::{CredentialValidator, RandomTool, SearchTool, StdioBridge, Tool};
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use unsplash_provider::{UnsplashClient, UnsplashConfig};

#[derive(Debug, Parser)]
#[command(name = "lenz", version, about = "Unsplash photo search from the command line")]
struct Cli {
    /// Access key override (takes precedence over the environment and keychain)
    #[arg(long, global = true)]
    access_key: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Access key management commands
    #[command(subcommand)]
    Auth(AuthCommand),
    /// Search photos by keyword
    Search(SearchCommand),
    /// Fetch random photos
    Random(RandomCommand),
    /// Serve tool invocations over stdin/stdout
    Serve,
}

#[derive(Debug, Subcommand)]
enum AuthCommand {
    /// Store an access key in the system keychain
    Set {
        /// The Unsplash Access Key to store
        access_key: String,
    },
    /// Validate the configured access key against the live API
    Check,
    /// Remove the stored access key
    Clear,
}

#[derive(Debug, Parser, Clone)]
struct SearchCommand {
    /// Search keywords
    query: String,
    /// Results per page, 1 to 30
    #[arg(long)]
    per_page: Option<u32>,
    /// Restrict results to an orientation (landscape, portrait, squarish)
    #[arg(long)]
    orientation: Option<String>,
    /// Restrict results to a dominant color
    #[arg(long)]
    color: Option<String>,
    /// Directory to save downloaded images into
    #[arg(long)]
    out: Option<PathBuf>,
    /// Print the JSON result envelope and output variables
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Parser, Clone)]
struct RandomCommand {
    /// Number of photos to fetch, 1 to 30
    #[arg(long)]
    count: Option<u32>,
    /// Narrow randomness to photos matching a query
    #[arg(long)]
    query: Option<String>,
    /// Restrict results to an orientation (landscape, portrait, squarish)
    #[arg(long)]
    orientation: Option<String>,
    /// Restrict results to a dominant color
    #[arg(long)]
    color: Option<String>,
    /// Directory to save downloaded images into
    #[arg(long)]
    out: Option<PathBuf>,
    /// Print the JSON result envelope and output variables
    #[arg(long)]
    json: bool,
}

impl SearchCommand {
    fn tool_parameters(&self) -> Value {
        json!({
            "query": self.query,
            "per_page": self.per_page,
            "orientation": self.orientation,
            "color": self.color,
        })
    }
}

impl RandomCommand {
    fn tool_parameters(&self) -> Value {
        json!({
            "count": self.count,
            "query": self.query,
            "orientation": self.orientation,
            "color": self.color,
        })
    }
}

/// Renders a tool's message stream for the terminal. Binary payloads are
/// written under `out_dir` when one was given; a failed save is recorded so
/// the rest of the stream still renders.
struct ConsoleSink {
    out_dir: Option<PathBuf>,
    show_json: bool,
    save_failures: Vec<String>,
}

impl ConsoleSink {
    fn new(out_dir: Option<PathBuf>, show_json: bool) -> Self {
        Self {
            out_dir,
            show_json,
            save_failures: Vec::new(),
        }
    }

    fn save_blob(&mut self, filename: &str, data: &[u8]) {
        let Some(dir) = &self.out_dir else {
            println!("[image] {filename} ({} bytes, pass --out to save)", data.len());
            return;
        };
        let path = dir.join(filename);
        match fs::write(&path, data) {
            Ok(()) => println!("saved {} ({} bytes)", path.display(), data.len()),
            Err(err) => self.save_failures.push(format!("{}: {err}", path.display())),
        }
    }
}

impl MessageSink for ConsoleSink {
    fn emit(&mut self, message: ToolMessage) {
        match message {
            ToolMessage::Text { text } => println!("{text}"),
            ToolMessage::Json { payload } => {
                if self.show_json {
                    let pretty = serde_json::to_string_pretty(&payload)
                        .unwrap_or_else(|_| payload.to_string());
                    println!("{pretty}");
                }
            }
            ToolMessage::Blob { data, meta } => self.save_blob(&meta.filename, &data),
            ToolMessage::Variable { name, value } => {
                if self.show_json {
                    println!("{name} = {value}");
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let dirs = AppDirs::discover()?;
    let config = Config::load_or_default(&dirs)?;
    let mut logging_config = config.logging.clone();
    if matches!(cli.command, Command::Serve) {
        // Reply framing owns stdout while serving.
        logging_config.stdout = false;
    }
    let _logging = init_logging(&logging_config, &dirs)?;

    let client = UnsplashClient::new(&client_config(&config))?;

    match cli.command {
        Command::Auth(auth) => run_auth(auth, cli.access_key.as_deref(), &client).await,
        Command::Search(search) => {
            let credentials = resolve_credentials(cli.access_key.as_deref())?;
            let mut sink = ConsoleSink::new(prepare_out_dir(search.out.clone())?, search.json);
            SearchTool::new(client)
                .invoke(&search.tool_parameters(), &credentials, &mut sink)
                .await;
            finish(sink)
        }
        Command::Random(random) => {
            let credentials = resolve_credentials(cli.access_key.as_deref())?;
            let mut sink = ConsoleSink::new(prepare_out_dir(random.out.clone())?, random.json);
            RandomTool::new(client)
                .invoke(&random.tool_parameters(), &credentials, &mut sink)
                .await;
            finish(sink)
        }
        Command::Serve => serve(client).await,
    }
}

async fn run_auth(
    auth: AuthCommand,
    access_key: Option<&str>,
    client: &UnsplashClient,
) -> Result<()> {
    let store = CredentialStore::new();
    match auth {
        AuthCommand::Set { access_key } => {
            if access_key.trim().is_empty() {
                bail!("Unsplash Access Key cannot be empty");
            }
            store.store_access_key(&access_key)?;
            println!("Access key stored in the system keychain.");
            Ok(())
        }
        AuthCommand::Check => {
            let credentials = resolve_credentials(access_key)?;
            let validator = CredentialValidator::new(client.clone());
            match validator.validate(&credentials).await {
                Ok(()) => {
                    println!("Access key accepted.");
                    Ok(())
                }
                Err(err) if err.is_credential_rejection() => bail!(err.validation_message()),
                Err(err) => bail!(
                    "validation could not complete: {}",
                    err.validation_message()
                ),
            }
        }
        AuthCommand::Clear => {
            store.clear_access_key()?;
            println!("Access key removed from the system keychain.");
            Ok(())
        }
    }
}

async fn serve(client: UnsplashClient) -> Result<()> {
    let bridge = StdioBridge::new(
        CredentialValidator::new(client.clone()),
        vec![
            Box::new(SearchTool::new(client.clone())),
            Box::new(RandomTool::new(client)),
        ],
    );

    tracing::info!("serving tool invocations on stdin/stdout");
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    bridge.serve(stdin.lock(), &mut stdout).await?;
    Ok(())
}

// Key lookup order: the --access-key flag, then UNSPLASH_ACCESS_KEY, then
// the system keychain.
fn resolve_credentials(flag: Option<&str>) -> Result<Credentials> {
    if let Some(key) = flag {
        return Ok(Credentials::new(key));
    }

    if let Ok(key) = std::env::var("UNSPLASH_ACCESS_KEY") {
        if !key.trim().is_empty() {
            return Ok(Credentials::new(key));
        }
    }

    match CredentialStore::new().get_access_key() {
        Ok(key) => Ok(Credentials::new(key)),
        Err(SecretsError::NotFound { .. }) => {
            bail!("no access key configured; run `lenz auth set <key>` or pass --access-key")
        }
        Err(err) => Err(err.into()),
    }
}

fn client_config(config: &Config) -> UnsplashConfig {
    UnsplashConfig {
        base_url: config.api.base_url.clone(),
        timeout: Duration::from_secs(config.api.timeout_secs),
        connect_timeout: Duration::from_secs(config.api.connect_timeout_secs),
    }
}

fn prepare_out_dir(out: Option<PathBuf>) -> Result<Option<PathBuf>> {
    let Some(dir) = out else { return Ok(None) };
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    Ok(Some(dir))
}

fn finish(sink: ConsoleSink) -> Result<()> {
    if sink.save_failures.is_empty() {
        return Ok(());
    }
    for failure in &sink.save_failures {
        eprintln!("failed to save {failure}");
    }
    bail!("{} image(s) could not be saved", sink.save_failures.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lenz_core::params::{RandomParams, SearchParams};

    #[test]
    fn unset_search_options_decode_to_defaults() {
        let command = SearchCommand {
            query: "mountains".into(),
            per_page: None,
            orientation: None,
            color: None,
            out: None,
            json: false,
        };

        let params = SearchParams::from_value(&command.tool_parameters()).unwrap();
        assert_eq!(params.query, "mountains");
        assert_eq!(params.per_page, 10);
        assert_eq!(params.orientation, None);
        assert_eq!(params.color, None);
    }

    #[test]
    fn set_search_options_pass_through() {
        let command = SearchCommand {
            query: "coast".into(),
            per_page: Some(5),
            orientation: Some("portrait".into()),
            color: Some("teal".into()),
            out: None,
            json: true,
        };

        let params = SearchParams::from_value(&command.tool_parameters()).unwrap();
        assert_eq!(params.per_page, 5);
        assert_eq!(params.orientation.as_deref(), Some("portrait"));
        assert_eq!(params.color.as_deref(), Some("teal"));
    }

    #[test]
    fn random_count_defaults_when_unset() {
        let command = RandomCommand {
            count: None,
            query: Some("forest".into()),
            orientation: None,
            color: None,
            out: None,
            json: false,
        };

        let params = RandomParams::from_value(&command.tool_parameters()).unwrap();
        assert_eq!(params.count, 1);
        assert_eq!(params.query.as_deref(), Some("forest"));
    }
}
