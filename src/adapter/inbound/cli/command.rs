//! Command-line interface definitions.
//!
//! Defines the CLI structure for the `addon` binary using `clap`. Each
//! subcommand drives one managed add-on: a key-value store, an object
//! storage bucket, or a MySQL/PostgreSQL database.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::Dialect;

/// Interactive demos for managed key-value, object storage and SQL add-ons
#[derive(Parser, Debug)]
#[command(name = "addon")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the configuration file [default: ~/.addon-cli/config.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log line format
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// `--dialect` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum DialectArg {
    #[value(name = "postgres", alias = "postgresql")]
    Postgres,
    Mysql,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Postgres => Dialect::PostgreSql,
            DialectArg::Mysql => Dialect::MySql,
        }
    }
}

impl SqlArgs {
    /// The requested dialect as a domain value.
    #[must_use]
    pub fn dialect(&self) -> Option<Dialect> {
        self.dialect.map(Dialect::from)
    }
}

/// Format of log lines written to stderr.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}

/// Top-level subcommands for the addon CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send one raw command to the key-value store
    Kv(KvArgs),

    /// Work with an S3-compatible bucket (runs the demo by default)
    S3(S3Args),

    /// SQL database utilities
    #[command(subcommand)]
    Sql(SqlCommand),

    /// Manage a todo list stored in MySQL or PostgreSQL (lists by default)
    Todo(TodoArgs),
}

/// Arguments for `addon kv`.
#[derive(Args, Debug)]
pub struct KvArgs {
    /// Connection URL (overrides REDIS_URL)
    #[arg(long)]
    pub url: Option<String>,

    /// Command name, e.g. PING, GET, SET
    pub command: String,

    /// Command arguments, passed through verbatim
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Arguments for `addon s3`.
#[derive(Args, Debug)]
pub struct S3Args {
    /// Bucket to operate on
    #[arg(long, global = true)]
    pub bucket: Option<String>,

    /// Endpoint host (overrides CELLAR_ADDON_HOST)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub action: Option<S3Action>,
}

/// Subcommands for `addon s3`.
#[derive(Subcommand, Debug)]
pub enum S3Action {
    /// List the objects in the bucket.
    List,
    /// Upload a local file.
    Upload {
        /// File to upload.
        file: PathBuf,
        /// Object key (defaults to the file path).
        #[arg(long)]
        key: Option<String>,
        /// Content type (guessed from the extension when omitted).
        #[arg(long)]
        content_type: Option<String>,
    },
    /// Delete an object after confirmation.
    Delete {
        key: String,
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Generate a presigned GET URL.
    Presign {
        key: String,
        /// Lifetime in seconds (1 to 604800).
        seconds: Option<u64>,
    },
    /// Print an object's content.
    Print { key: String },
    /// Show an object's metadata.
    Info { key: String },
    /// Upload, inspect and clean up a set of demo files.
    Demo {
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Subcommands for `addon sql`.
#[derive(Subcommand, Debug)]
pub enum SqlCommand {
    /// Connect, run a test query and print the server version.
    Check(SqlArgs),
}

/// Connection arguments shared by the SQL commands.
#[derive(Args, Debug, Clone, Default)]
pub struct SqlArgs {
    /// Connection URI (overrides MYSQL_ADDON_URI / POSTGRESQL_ADDON_URI)
    #[arg(long, global = true)]
    pub uri: Option<String>,

    /// Database dialect, when both add-on variables are set
    #[arg(long, global = true)]
    pub dialect: Option<DialectArg>,
}

/// Arguments for `addon todo`.
#[derive(Args, Debug)]
pub struct TodoArgs {
    #[command(flatten)]
    pub db: SqlArgs,

    #[command(subcommand)]
    pub action: Option<TodoAction>,
}

/// Subcommands for `addon todo`.
///
/// IDs are taken as text so that a malformed ID is reported like any
/// other validation failure rather than as a usage error.
#[derive(Subcommand, Debug)]
pub enum TodoAction {
    /// List all todos, newest first.
    List,
    /// Add a todo.
    Add {
        /// Task description; words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        task: Vec<String>,
    },
    /// Flip a todo between completed and pending.
    Toggle { id: String },
    /// Delete a todo.
    Delete { id: String },
    /// Show completion counts.
    Stats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    // Tests for kv

    #[test]
    fn test_kv_command_with_args() {
        let cli =
            Cli::try_parse_from(["addon", "kv", "set", "Greeting", "Hello World"]).unwrap();
        if let Commands::Kv(args) = cli.command {
            assert_eq!(args.command, "set");
            assert_eq!(args.args, ["Greeting", "Hello World"]);
            assert_eq!(args.url, None);
        } else {
            panic!("Expected Kv command");
        }
    }

    #[test]
    fn test_kv_hyphen_arguments_pass_through() {
        let cli = Cli::try_parse_from(["addon", "kv", "INCRBY", "counter", "-5"]).unwrap();
        if let Commands::Kv(args) = cli.command {
            assert_eq!(args.args, ["counter", "-5"]);
        } else {
            panic!("Expected Kv command");
        }
    }

    #[test]
    fn test_kv_url_flag() {
        let cli =
            Cli::try_parse_from(["addon", "kv", "--url", "redis://localhost", "PING"]).unwrap();
        if let Commands::Kv(args) = cli.command {
            assert_eq!(args.url.as_deref(), Some("redis://localhost"));
            assert_eq!(args.command, "PING");
        } else {
            panic!("Expected Kv command");
        }
    }

    #[test]
    fn test_kv_requires_command() {
        assert!(Cli::try_parse_from(["addon", "kv"]).is_err());
    }

    // Tests for s3

    #[test]
    fn test_s3_defaults_to_demo() {
        let cli = Cli::try_parse_from(["addon", "s3"]).unwrap();
        if let Commands::S3(args) = cli.command {
            assert!(args.action.is_none());
        } else {
            panic!("Expected S3 command");
        }
    }

    #[test]
    fn test_s3_bucket_after_action() {
        let cli = Cli::try_parse_from(["addon", "s3", "list", "--bucket", "photos"]).unwrap();
        if let Commands::S3(args) = cli.command {
            assert_eq!(args.bucket.as_deref(), Some("photos"));
            assert!(matches!(args.action, Some(S3Action::List)));
        } else {
            panic!("Expected S3 command");
        }
    }

    #[test]
    fn test_s3_upload_options() {
        let cli = Cli::try_parse_from([
            "addon",
            "s3",
            "upload",
            "notes.txt",
            "--key",
            "docs/notes.txt",
            "--content-type",
            "text/plain",
        ])
        .unwrap();
        if let Commands::S3(S3Args {
            action:
                Some(S3Action::Upload {
                    file,
                    key,
                    content_type,
                }),
            ..
        }) = cli.command
        {
            assert_eq!(file, PathBuf::from("notes.txt"));
            assert_eq!(key.as_deref(), Some("docs/notes.txt"));
            assert_eq!(content_type.as_deref(), Some("text/plain"));
        } else {
            panic!("Expected S3 Upload command");
        }
    }

    #[test]
    fn test_s3_presign_seconds_optional() {
        let cli = Cli::try_parse_from(["addon", "s3", "presign", "demo.txt"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::S3(S3Args {
                action: Some(S3Action::Presign { seconds: None, .. }),
                ..
            })
        ));

        let cli = Cli::try_parse_from(["addon", "s3", "presign", "demo.txt", "60"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::S3(S3Args {
                action: Some(S3Action::Presign {
                    seconds: Some(60),
                    ..
                }),
                ..
            })
        ));
    }

    #[test]
    fn test_s3_presign_rejects_non_numeric_seconds() {
        assert!(Cli::try_parse_from(["addon", "s3", "presign", "demo.txt", "soon"]).is_err());
    }

    #[test]
    fn test_s3_delete_yes_flag() {
        let cli = Cli::try_parse_from(["addon", "s3", "delete", "demo.txt", "-y"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::S3(S3Args {
                action: Some(S3Action::Delete { yes: true, .. }),
                ..
            })
        ));
    }

    // Tests for sql and todo

    #[test]
    fn test_sql_check_with_dialect() {
        let cli = Cli::try_parse_from(["addon", "sql", "check", "--dialect", "postgresql"]).unwrap();
        if let Commands::Sql(SqlCommand::Check(args)) = cli.command {
            assert_eq!(args.dialect, Some(DialectArg::Postgres));
            assert_eq!(args.dialect(), Some(Dialect::PostgreSql));
        } else {
            panic!("Expected Sql Check command");
        }
    }

    #[test]
    fn test_todo_defaults_to_list() {
        let cli = Cli::try_parse_from(["addon", "todo"]).unwrap();
        if let Commands::Todo(args) = cli.command {
            assert!(args.action.is_none());
        } else {
            panic!("Expected Todo command");
        }
    }

    #[test]
    fn test_todo_add_collects_words() {
        let cli = Cli::try_parse_from(["addon", "todo", "add", "buy", "milk"]).unwrap();
        if let Commands::Todo(TodoArgs {
            action: Some(TodoAction::Add { task }),
            ..
        }) = cli.command
        {
            assert_eq!(task, ["buy", "milk"]);
        } else {
            panic!("Expected Todo Add command");
        }
    }

    #[test]
    fn test_todo_add_requires_task() {
        assert!(Cli::try_parse_from(["addon", "todo", "add"]).is_err());
    }

    #[test]
    fn test_todo_toggle_keeps_raw_id() {
        let cli = Cli::try_parse_from(["addon", "todo", "toggle", "abc"]).unwrap();
        if let Commands::Todo(TodoArgs {
            action: Some(TodoAction::Toggle { id }),
            ..
        }) = cli.command
        {
            assert_eq!(id, "abc");
        } else {
            panic!("Expected Todo Toggle command");
        }
    }

    #[test]
    fn test_todo_uri_after_action() {
        let cli =
            Cli::try_parse_from(["addon", "todo", "stats", "--uri", "mysql://u:p@h/db"]).unwrap();
        if let Commands::Todo(args) = cli.command {
            assert_eq!(args.db.uri.as_deref(), Some("mysql://u:p@h/db"));
            assert!(matches!(args.action, Some(TodoAction::Stats)));
        } else {
            panic!("Expected Todo command");
        }
    }

    // Tests for error cases

    #[test]
    fn test_unknown_command_fails() {
        assert!(Cli::try_parse_from(["addon", "unknown"]).is_err());
    }

    #[test]
    fn test_invalid_color_value() {
        assert!(Cli::try_parse_from(["addon", "--color", "invalid", "todo"]).is_err());
    }

    #[test]
    fn test_invalid_dialect_value() {
        assert!(Cli::try_parse_from(["addon", "sql", "check", "--dialect", "oracle"]).is_err());
    }

    #[test]
    fn test_missing_subcommand() {
        assert!(Cli::try_parse_from(["addon"]).is_err());
    }

    // Tests for global flag placement

    #[test]
    fn test_global_flags_before_command() {
        let cli = Cli::try_parse_from(["addon", "--json", "--quiet", "-vv", "todo"]).unwrap();
        assert!(cli.json);
        assert!(cli.quiet);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_global_flags_after_command() {
        let cli = Cli::try_parse_from([
            "addon",
            "s3",
            "list",
            "--json",
            "--log-format",
            "json",
            "-v",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.log_format, Some(LogFormat::Json));
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_config_path_flag() {
        let cli = Cli::try_parse_from(["addon", "--config", "/tmp/addon.toml", "todo"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/addon.toml")));
    }
}
