//! Config subcommand handlers.
//!
//! Non-interactive profile management: `init` writes a profile from flags,
//! `show` prints the resolved config with secrets redacted, `path` prints
//! the config file location.

use crate::cli::{ConfigArgs, ConfigCommand, ConfigInitArgs, GlobalOpts};
use crate::config::{self, Profile};
use crate::error::CliError;

pub async fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init(args) => init(args, global),
        ConfigCommand::Show => show(global),
        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }
    }
}

fn init(args: ConfigInitArgs, global: &GlobalOpts) -> Result<(), CliError> {
    // Validate the URL up front so a broken profile never lands on disk.
    args.host
        .parse::<url::Url>()
        .map_err(|_| CliError::Validation {
            message: format!("invalid controller URL: {}", args.host),
        })?;

    let mut cfg = config::load_config_or_default();

    let mut profile = Profile {
        host: args.host,
        username: Some(args.username),
        ..Profile::default()
    };

    if args.keyring {
        let password = global
            .password
            .clone()
            .ok_or_else(|| CliError::Validation {
                message: "supply the password via --password or APIC_PASSWORD to store it".into(),
            })?;
        keyring::Entry::new("apicctl", &format!("{}/password", args.name))
            .and_then(|entry| entry.set_password(&password))
            .map_err(|e| CliError::Config {
                message: format!("keyring storage failed: {e}"),
            })?;
    } else if let Some(ref password) = global.password {
        profile.password = Some(password.clone());
    }

    if cfg.default_profile.is_none() {
        cfg.default_profile = Some(args.name.clone());
    }
    cfg.profiles.insert(args.name.clone(), profile);
    config::save_config(&cfg)?;

    if !global.quiet {
        println!("Profile '{}' written to {}", args.name, config::config_path().display());
    }
    Ok(())
}

fn show(global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = config::load_config_or_default();

    for profile in cfg.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some("<redacted>".into());
        }
    }

    let rendered = toml::to_string_pretty(&cfg).map_err(|e| CliError::Config {
        message: format!("failed to render config: {e}"),
    })?;

    if !global.quiet {
        println!("# {}", config::config_path().display());
        print!("{rendered}");
    }
    Ok(())
}
