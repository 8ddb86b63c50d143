//! Command-line interface implementation

use clap::{Parser, Subcommand, ValueEnum};
use reqwest::Method;
use serde_json::Value;
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::ui::reporter::OutputMode;

/// Command-line arguments for abs-probe
#[derive(Parser, Debug)]
#[command(author, version, about = "Exercise a media server REST API", long_about = None)]
pub struct Args {
    /// Media server URL
    #[arg(short, long, env = "ABS_SERVER_URL", global = true)]
    pub server_url: Option<String>,

    /// Username for login
    #[arg(short, long, env = "ABS_USERNAME", global = true)]
    pub username: Option<String>,

    /// Password for login
    #[arg(short, long, env = "ABS_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Bearer token from an earlier login
    #[arg(short, long, env = "ABS_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Config file path
    #[arg(short, long, env = "ABS_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// How much of each response to print
    #[arg(short, long, value_enum, default_value = "summary", global = true)]
    pub output: OutputMode,

    /// Write every JSON response into this directory
    #[arg(long, global = true)]
    pub save_dir: Option<PathBuf>,

    /// Pause between lifecycle phases, in milliseconds
    #[arg(long, global = true)]
    pub pause_ms: Option<u64>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Check that the server answers
    Ping,
    /// List libraries and the items of the first one
    Libraries,
    /// Issue every read-only GET against an existing library
    LibraryGets {
        /// Library to probe; defaults to the first library
        #[arg(long)]
        library_id: Option<String>,
    },
    /// Create, inspect and delete a throwaway library
    LibraryLifecycle {
        #[arg(long, default_value = "Test library")]
        name: String,
        /// Folder to add to the library (repeatable)
        #[arg(long = "folder", default_value = "/bin")]
        folders: Vec<String>,
    },
    /// Create, update, fill and delete collections
    Collections {
        #[arg(long)]
        library_id: Option<String>,
    },
    /// Fetch, update and match authors of a library
    Authors {
        #[arg(long)]
        library_id: Option<String>,
    },
    /// Fetch one library item
    Item {
        id: String,
    },
    /// Send an arbitrary authenticated request
    Request {
        #[arg(value_enum)]
        method: HttpMethod,
        /// Path below the server URL, e.g. /api/libraries
        path: String,
        /// JSON request body
        #[arg(long, value_parser = parse_json)]
        body: Option<Value>,
        /// Query parameter as key=value (repeatable)
        #[arg(long = "query", value_parser = parse_key_value)]
        query: Vec<(String, String)>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

pub fn parse_json(raw: &str) -> Result<Value, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid JSON: {}", e))
}

pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{}'", raw)),
    }
}

/// CLI user interface for interacting with the application
pub struct Cli {
    pub args: Args,
}

impl Cli {
    /// Create a new CLI instance
    pub fn new() -> Self {
        Cli {
            args: Args::parse(),
        }
    }

    /// Prompt for the password when a username is known but nothing else
    /// would authenticate.
    pub fn prompt_password(&self, username: &str) -> Result<String, Box<dyn Error>> {
        print!("Enter password for {}: ", username);
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }

    /// Display error messages
    pub fn display_error(&self, error: &dyn Error) {
        eprintln!("Error: {}", error);
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self::new()
    }
}
