use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Read;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use keystamp_core::constants::{KEY_NAME_ENV, UUID_FIELD_ENV, UUID_VERSION_ENV};
use keystamp_core::{MemoryStore, ModelRepository, StampConfig, SystemUuidGenerator};
use keystamp_uuid::CanonicalUuid;

#[derive(Parser)]
#[command(name = "keystamp")]
#[command(about = "Stamp records with UUIDs before they are stored")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate UUIDs with the configured algorithm version
    Generate {
        /// UUID algorithm version (1 or 4)
        #[arg(long)]
        uuid_version: Option<String>,
        /// Number of UUIDs to print
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Create a record and print it as stored
    Stamp {
        /// Record attributes as a JSON object (read from stdin when omitted)
        record: Option<String>,
        /// Model name used in log output
        #[arg(long, default_value = "records")]
        model: String,
        /// Primary-key field name
        #[arg(long)]
        key_name: Option<String>,
        /// Field to stamp (defaults to the primary key)
        #[arg(long)]
        uuid_field: Option<String>,
        /// UUID algorithm version (1 or 4)
        #[arg(long)]
        uuid_version: Option<String>,
    },
    /// Describe a canonical UUID
    Inspect {
        /// UUID in lowercase 8-4-4-4-12 form
        uuid: String,
    },
}

/// Resolves configuration once, command line values taking precedence over the environment.
fn resolve_config(
    key_name: Option<String>,
    uuid_field: Option<String>,
    uuid_version: Option<String>,
) -> anyhow::Result<StampConfig> {
    let config = StampConfig::from_env_values(
        key_name.or_else(|| std::env::var(KEY_NAME_ENV).ok()),
        uuid_field.or_else(|| std::env::var(UUID_FIELD_ENV).ok()),
        uuid_version.or_else(|| std::env::var(UUID_VERSION_ENV).ok()),
    )?;
    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}

fn read_record(record: Option<String>) -> anyhow::Result<serde_json::Value> {
    let text = match record {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read record from stdin")?;
            buf
        }
    };

    if text.trim().is_empty() {
        return Ok(serde_json::Value::Object(serde_json::Map::new()));
    }
    serde_json::from_str(&text).context("record is not valid JSON")
}

/// Entry point for the keystamp CLI.
///
/// # Environment Variables
/// - `KEYSTAMP_KEY_NAME`: primary-key field name (default: "id")
/// - `KEYSTAMP_UUID_FIELD`: field to stamp (default: the primary key)
/// - `KEYSTAMP_UUID_VERSION`: UUID algorithm version, 1 or 4 (default: 1)
/// - `RUST_LOG`: log filter, logs are written to stderr
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("keystamp=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Generate {
            uuid_version,
            count,
        }) => {
            let config = resolve_config(None, None, uuid_version)?;
            let generator = SystemUuidGenerator::new();
            for _ in 0..count {
                println!("{}", config.policy().generate_uuid(&generator)?);
            }
        }
        Some(Commands::Stamp {
            record,
            model,
            key_name,
            uuid_field,
            uuid_version,
        }) => {
            let config = resolve_config(key_name, uuid_field, uuid_version)?;
            let mut repository = ModelRepository::new(config.model(model), MemoryStore::new());

            let attributes = read_record(record)?;
            let record = repository.record_from_json(attributes)?;
            let created = repository.create(record)?;

            tracing::info!(
                model = repository.model().name(),
                field = repository.model().uuid_field(),
                "created record"
            );
            println!("{}", serde_json::to_string_pretty(&created.to_json())?);
        }
        Some(Commands::Inspect { uuid }) => {
            let uuid = CanonicalUuid::parse(&uuid)?;
            println!("uuid: {}", uuid);
            match uuid.version() {
                Some(version) => println!("version: {} (supported)", version.number()),
                None => println!("version: {} (not supported)", uuid.version_num()),
            }
            println!(
                "variant: {}",
                if uuid.is_rfc4122_variant() {
                    "RFC 4122"
                } else {
                    "other"
                }
            );
            if let Some(created) = uuid.timestamp() {
                println!("created: {}", created.to_rfc3339());
            }
        }
        None => {
            println!("Use 'keystamp --help' for commands");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_read_record_from_argument() {
        let value = read_record(Some(r#"{"name": "Test Name"}"#.into())).unwrap();
        assert_eq!(value, serde_json::json!({"name": "Test Name"}));
    }

    #[test]
    fn test_read_record_blank_is_empty_object() {
        let value = read_record(Some("  ".into())).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }

    #[test]
    fn test_read_record_rejects_invalid_json() {
        assert!(read_record(Some("{not json".into())).is_err());
    }

    #[test]
    fn test_parse_stamp_arguments() {
        let cli = Cli::try_parse_from([
            "keystamp",
            "stamp",
            "--uuid-field",
            "uuid",
            "--uuid-version",
            "4",
            r#"{"name": "x"}"#,
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Stamp {
                record,
                uuid_field,
                uuid_version,
                ..
            }) => {
                assert_eq!(record.as_deref(), Some(r#"{"name": "x"}"#));
                assert_eq!(uuid_field.as_deref(), Some("uuid"));
                assert_eq!(uuid_version.as_deref(), Some("4"));
            }
            _ => panic!("Expected stamp command"),
        }
    }
}
