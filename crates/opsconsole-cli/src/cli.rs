//! Subcommands and their execution

use anyhow::{anyhow, bail, Context as _};
use clap::Subcommand;
use opsconsole_client::{
    ClientConfig, ConsoleClient, FileTokenStore, PreferenceType, StaticToken, TokenSource,
};
use opsconsole_sdk::{
    unmanaged_keys, PreferenceExport, PreferenceSync, SettingField, SettingKind, SettingsFilter,
    SettingsReconciler, UpdateOutcome,
};
use serde_json::Value;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Store the bearer token used by every request
    Login {
        /// Token issued by the console
        #[arg(long)]
        token: String,
    },

    /// Forget the stored token
    Logout,

    /// Inspect or write the config file
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Per-user preferences
    #[command(subcommand)]
    Prefs(PrefsCommands),

    /// Admin settings
    #[command(subcommand)]
    Settings(SettingsCommands),
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Write the effective configuration to the config file
    Init,
}

#[derive(Debug, Subcommand)]
pub enum PrefsCommands {
    /// Print one preference, or all of them
    Get {
        key: Option<String>,
    },

    /// Write one preference
    Set {
        key: String,
        /// JSON value; anything that is not valid JSON is taken as a string
        value: String,
        /// Preference type (string, number, boolean, json); inferred when omitted
        #[arg(long = "type")]
        kind: Option<String>,
    },

    /// Write all preferences as a JSON document
    Export {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Push an exported document to the server
    Import {
        file: PathBuf,
    },

    /// Soft-delete every preference in scope
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommands {
    /// List settings; sensitive values are masked
    List {
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
        /// Case-insensitive search over key, label, description and category
        #[arg(short, long, default_value = "")]
        search: String,
        /// Also list server keys the console does not manage
        #[arg(long)]
        unmanaged: bool,
    },

    /// Show one setting
    Show {
        key: String,
    },

    /// Change settings and save them in one request
    Set {
        /// KEY=VALUE pairs
        #[arg(required = true)]
        assignments: Vec<String>,
    },
}

/// Resolved configuration shared by every command
pub struct Context {
    pub config: ClientConfig,
    pub config_path: PathBuf,
    pub token: Option<String>,
}

impl Context {
    fn token_store(&self) -> FileTokenStore {
        FileTokenStore::new(self.config.token_path())
    }

    fn client(&self) -> anyhow::Result<Arc<ConsoleClient>> {
        let tokens: Arc<dyn TokenSource> = match &self.token {
            Some(token) => Arc::new(StaticToken::new(token.clone())),
            None => Arc::new(self.token_store()),
        };
        Ok(Arc::new(ConsoleClient::new(self.config.clone(), tokens)?))
    }

    fn preferences(&self) -> anyhow::Result<PreferenceSync> {
        let prefs = PreferenceSync::new(self.client()?);
        Ok(match &self.config.module_id {
            Some(module_id) => prefs.with_module(module_id.clone()),
            None => prefs,
        })
    }
}

/// Execute a command and return what should be printed
pub async fn execute(ctx: &Context, command: Commands) -> anyhow::Result<String> {
    match command {
        Commands::Login { token } => {
            let store = ctx.token_store();
            store
                .store(&token)
                .with_context(|| format!("writing {}", store.path().display()))?;
            Ok(format!("Token stored in {}", store.path().display()))
        }

        Commands::Logout => {
            ctx.token_store().clear()?;
            Ok("Token removed".to_string())
        }

        Commands::Config(ConfigCommands::Show) => Ok(serde_json::to_string_pretty(&ctx.config)?),

        Commands::Config(ConfigCommands::Init) => {
            ctx.config.save(&ctx.config_path)?;
            Ok(format!("Config written to {}", ctx.config_path.display()))
        }

        Commands::Prefs(command) => execute_prefs(ctx, command).await,
        Commands::Settings(command) => execute_settings(ctx, command).await,
    }
}

async fn execute_prefs(ctx: &Context, command: PrefsCommands) -> anyhow::Result<String> {
    let prefs = ctx.preferences()?;

    match command {
        PrefsCommands::Get { key } => {
            prefs.load_all().await?;
            match key {
                Some(key) => Ok(serde_json::to_string_pretty(&prefs.get(&key, Value::Null))?),
                None => Ok(serde_json::to_string_pretty(&prefs.snapshot())?),
            }
        }

        PrefsCommands::Set { key, value, kind } => {
            let value = parse_value(&value);
            let kind = match kind {
                Some(kind) => PreferenceType::parse(&kind)
                    .ok_or_else(|| anyhow!("unknown preference type '{}'", kind))?,
                None => PreferenceType::infer(&value),
            };
            match prefs.update(key.clone(), value, kind).await {
                UpdateOutcome::Confirmed => Ok(format!("Saved {}", key)),
                UpdateOutcome::Failed(reason) => bail!("{} not saved: {}", key, reason),
            }
        }

        PrefsCommands::Export { output } => {
            prefs.load_all().await?;
            let document = prefs.export().to_json()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &document)
                        .with_context(|| format!("writing {}", path.display()))?;
                    Ok(format!("Exported to {}", path.display()))
                }
                None => Ok(document),
            }
        }

        PrefsCommands::Import { file } => {
            let document = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let export = PreferenceExport::from_json(&document)?;
            let counts = prefs.import(export).await?;
            Ok(format!(
                "{} updated, {} created",
                counts.updated, counts.created
            ))
        }

        PrefsCommands::Reset { yes } => {
            let scope = prefs.module_id().unwrap_or("all modules").to_string();
            let confirm = || yes || prompt(&format!("Reset preferences for {}?", scope));
            match prefs.reset_confirmed(confirm).await? {
                Some(count) => Ok(format!("{} preferences reset", count)),
                None => Ok("Reset cancelled".to_string()),
            }
        }
    }
}

async fn execute_settings(ctx: &Context, command: SettingsCommands) -> anyhow::Result<String> {
    let client = ctx.client()?;
    let mut settings = SettingsReconciler::new(client.clone());
    settings.load_settings().await?;

    match command {
        SettingsCommands::List {
            category,
            search,
            unmanaged,
        } => {
            let filter = SettingsFilter { category, search };
            let mut lines: Vec<String> = settings.visible(&filter).map(format_field).collect();

            if unmanaged {
                let raw = client.get_settings().await?;
                for key in unmanaged_keys(&raw) {
                    lines.push(format!("{:<16} {:<36} (unmanaged)", "-", key));
                }
            }
            Ok(lines.join("\n"))
        }

        SettingsCommands::Show { key } => {
            let field = settings
                .field(&key)
                .ok_or_else(|| anyhow!("unknown setting '{}'", key))?;
            Ok(serde_json::to_string_pretty(&field.view())?)
        }

        SettingsCommands::Set { assignments } => {
            for assignment in &assignments {
                let (key, raw) = parse_assignment(assignment)?;
                let kind = settings
                    .field(key)
                    .map(|f| f.kind)
                    .ok_or_else(|| anyhow!("unknown setting '{}'", key))?;
                settings.commit_edit(key, coerce_setting(kind, raw))?;
            }
            let saved = settings.save_all().await?;
            info!(count = saved, "Settings saved from command line");
            Ok(format!("Saved {} setting(s)", saved))
        }
    }
}

fn format_field(field: &SettingField) -> String {
    let access = if field.editable { "" } else { " (read-only)" };
    format!(
        "{:<16} {:<36} {}{}",
        field.category,
        field.key,
        field.display_value(),
        access
    )
}

/// JSON when it parses, string otherwise
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Only structured kinds are parsed; text-like settings keep the literal input
fn coerce_setting(kind: SettingKind, raw: &str) -> Value {
    match kind {
        SettingKind::Number | SettingKind::Boolean | SettingKind::List => parse_value(raw),
        _ => Value::String(raw.to_string()),
    }
}

fn parse_assignment(assignment: &str) -> anyhow::Result<(&str, &str)> {
    match assignment.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => bail!("expected KEY=VALUE, got '{}'", assignment),
    }
}

fn prompt(question: &str) -> bool {
    print!("{} [y/N] ", question);
    if std::io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("50"), json!(50));
        assert_eq!(parse_value("true"), json!(true));
        assert_eq!(parse_value("dark"), json!("dark"));
        assert_eq!(parse_value("{\"a\":1}"), json!({"a": 1}));
    }

    #[test]
    fn test_text_settings_keep_literal_input() {
        assert_eq!(coerce_setting(SettingKind::Password, "123456"), json!("123456"));
        assert_eq!(coerce_setting(SettingKind::Number, "2525"), json!(2525));
        assert_eq!(
            coerce_setting(SettingKind::List, "[\"pdf\",\"docx\"]"),
            json!(["pdf", "docx"])
        );
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(parse_assignment("email_port=2525").unwrap(), ("email_port", "2525"));
        assert_eq!(parse_assignment("banner=a=b").unwrap(), ("banner", "a=b"));
        assert!(parse_assignment("email_port").is_err());
        assert!(parse_assignment("=2525").is_err());
    }

    #[test]
    fn test_read_only_marker() {
        let field = SettingField {
            key: "environment".into(),
            label: "Environment".into(),
            value: json!("production"),
            kind: SettingKind::Text,
            category: "General".into(),
            description: String::new(),
            editable: false,
        };
        let line = format_field(&field);
        assert!(line.contains("production"));
        assert!(line.ends_with("(read-only)"));
    }
}
