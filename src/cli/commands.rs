//! CLI command implementations
//!
//! Every command loads the catalog named by the contact string (flag first,
//! config file second), builds a file handle for the target, and dispatches
//! one operation. Environment variables in the contact string are expanded
//! here, before the core ever sees it.

use crate::catalog::TrivialFileCatalog;
use crate::fileops::FederatedFile;
use crate::observability::{Logger, Severity};

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};

/// Parses arguments and runs the selected command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(&cli)
}

/// Runs one already-parsed command.
pub fn run_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::resolve(cli)?;
    let catalog = load_catalog(&settings.contact)?;
    let protocol = settings.protocol.as_deref();

    match &cli.command {
        Command::Resolve { reverse, path } => {
            let resolved = if *reverse {
                catalog.match_pfn(protocol, path)
            } else {
                catalog.match_lfn(protocol, path)
            };
            match resolved {
                Some(result) => println!("{}", result),
                None => return Err(CliError::no_match(path)),
            }
        }
        Command::Stat { lfn } => {
            let file = file_handle(lfn, &catalog, protocol)?;
            let stat = file.stat().map_err(|e| CliError::fileop_error(e.to_string()))?;
            println!("{}", stat);
        }
        Command::Ls { recursive, lfn } => {
            let file = file_handle(lfn, &catalog, protocol)?;
            let listing = file
                .list(*recursive)
                .map_err(|e| CliError::fileop_error(e.to_string()))?;
            println!("{}", listing);
        }
        Command::Rm { recursive, lfn } => {
            let file = file_handle(lfn, &catalog, protocol)?;
            file.remove(*recursive)
                .map_err(|e| CliError::fileop_error(e.to_string()))?;
        }
        Command::Mkdir { parents, lfn } => {
            let file = file_handle(lfn, &catalog, protocol)?;
            file.make_dir(*parents)
                .map_err(|e| CliError::fileop_error(e.to_string()))?;
        }
        Command::Rmdir { parents, lfn } => {
            let file = file_handle(lfn, &catalog, protocol)?;
            file.remove_dir(*parents)
                .map_err(|e| CliError::fileop_error(e.to_string()))?;
        }
    }
    Ok(())
}

/// Effective settings after merging flags and the config file.
struct Settings {
    contact: String,
    protocol: Option<String>,
}

impl Settings {
    fn resolve(cli: &Cli) -> CliResult<Self> {
        let (contact, config_protocol) = match &cli.catalog {
            Some(contact) => (contact.clone(), None),
            None => {
                if !cli.config.exists() {
                    return Err(CliError::config_error(format!(
                        "No catalog given: pass --catalog or create {}",
                        cli.config.display()
                    )));
                }
                let config = Config::load(&cli.config)?;
                (config.catalog, config.default_protocol)
            }
        };

        // contact strings routinely carry site variables like $SITE_CONF
        let contact = shellexpand::env(&contact)
            .map_err(|e| CliError::config_error(format!("Contact string expansion: {}", e)))?
            .into_owned();

        Ok(Self {
            contact,
            protocol: cli.protocol.clone().or(config_protocol),
        })
    }
}

fn load_catalog(contact: &str) -> CliResult<TrivialFileCatalog> {
    let (catalog, report) = TrivialFileCatalog::from_contact(contact)
        .map_err(|e| CliError::catalog_error(e.to_string()))?;
    if report.skipped > 0 {
        Logger::log_stderr(
            Severity::Warn,
            "catalog_entries_skipped",
            &[
                ("catalog", contact),
                ("skipped", &report.skipped.to_string()),
            ],
        );
    }
    Ok(catalog)
}

fn file_handle(
    lfn: &str,
    catalog: &TrivialFileCatalog,
    protocol: Option<&str>,
) -> CliResult<FederatedFile> {
    FederatedFile::new(lfn, catalog, protocol)
        .map_err(|e| CliError::fileop_error(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn write_catalog(dir: &TempDir) -> String {
        let path = dir.path().join("storage.xml");
        fs::write(
            &path,
            r#"<storage-mapping>
                 <lfn-to-pfn protocol="direct" path-match="/+store/(.*)" result="/data/store/$1"/>
               </storage-mapping>"#,
        )
        .unwrap();
        format!("trivialcatalog_file:{}?protocol=direct", path.display())
    }

    #[test]
    fn test_resolve_command_roundtrip() {
        let temp = TempDir::new().unwrap();
        let contact = write_catalog(&temp);
        let cli = Cli::try_parse_from([
            "fedcat",
            "--catalog",
            &contact,
            "resolve",
            "/store/x.root",
        ])
        .unwrap();
        assert!(run_command(&cli).is_ok());
    }

    #[test]
    fn test_resolve_no_match_fails() {
        let temp = TempDir::new().unwrap();
        let contact = write_catalog(&temp);
        let cli = Cli::try_parse_from([
            "fedcat",
            "--catalog",
            &contact,
            "--protocol",
            "srm",
            "resolve",
            "/store/x.root",
        ])
        .unwrap();
        let err = run_command(&cli).unwrap_err();
        assert_eq!(err.code().code(), "FEDCAT_NO_MATCH");
    }

    #[test]
    fn test_missing_catalog_and_config() {
        let cli = Cli::try_parse_from([
            "fedcat",
            "--config",
            "/nonexistent/fedcat.json",
            "resolve",
            "/store/x.root",
        ])
        .unwrap();
        let err = run_command(&cli).unwrap_err();
        assert_eq!(err.code().code(), "FEDCAT_CONFIG_ERROR");
    }
}
