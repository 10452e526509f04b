//! Config subcommand handlers.

use dialoguer::{Input, Password, Select};

use adverge_config as cfg;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::active_profile_name;
use crate::error::CliError;
use crate::output;

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn keyring_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "keyring".into(),
        reason: format!("failed to access keyring: {e}"),
    }
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => init(),

        // ── Show: resolved config, secrets redacted ─────────────────
        ConfigCommand::Show => {
            let mut config = cfg::load_config_or_default();
            for profile in config.profiles.values_mut() {
                if profile.developer_token.is_some() {
                    profile.developer_token = Some("<redacted>".into());
                }
                if profile.access_token.is_some() {
                    profile.access_token = Some("<redacted>".into());
                }
            }
            output::Renderer::new(global).yaml(&config);
            Ok(())
        }

        ConfigCommand::Path => {
            println!("{}", cfg::config_path().display());
            Ok(())
        }

        ConfigCommand::Profiles => {
            let config = cfg::load_config_or_default();
            let active = active_profile_name(global, &config);
            let mut names: Vec<&String> = config.profiles.keys().collect();
            names.sort();
            for name in names {
                let marker = if **name == active { " (active)" } else { "" };
                println!("{name}{marker}");
            }
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut config = cfg::load_config_or_default();
            if !config.profiles.contains_key(&name) {
                let mut available: Vec<&str> =
                    config.profiles.keys().map(String::as_str).collect();
                available.sort_unstable();
                return Err(CliError::ProfileNotFound {
                    name,
                    available: available.join(", "),
                });
            }
            config.default_profile = Some(name.clone());
            cfg::save_config(&config)?;
            eprintln!("Default profile set to '{name}'");
            Ok(())
        }
    }
}

fn init() -> Result<(), CliError> {
    let config_path = cfg::config_path();
    eprintln!("adverge — configuration wizard");
    eprintln!("  Config path: {}\n", config_path.display());

    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(prompt_err)?;

    let customer_id: String = Input::new()
        .with_prompt("Customer id (digits only)")
        .validate_with(|s: &String| {
            if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
                Ok(())
            } else {
                Err("customer id must be digits only")
            }
        })
        .interact_text()
        .map_err(prompt_err)?;

    let login_customer: String = Input::new()
        .with_prompt("Manager account id (blank for none)")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;

    let developer_token = Password::new()
        .with_prompt("Developer token")
        .interact()
        .map_err(prompt_err)?;
    let access_token = Password::new()
        .with_prompt("OAuth access token")
        .interact()
        .map_err(prompt_err)?;

    if developer_token.is_empty() || access_token.is_empty() {
        return Err(CliError::Validation {
            field: "credentials".into(),
            reason: "tokens cannot be empty".into(),
        });
    }

    // Offer keyring storage for both tokens.
    let store_choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let store_selection = Select::new()
        .with_prompt("Where to store the tokens?")
        .items(store_choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    let (dev_field, acc_field) = if store_selection == 0 {
        keyring::Entry::new("adverge", &format!("{profile_name}/developer-token"))
            .map_err(keyring_err)?
            .set_password(&developer_token)
            .map_err(keyring_err)?;
        keyring::Entry::new("adverge", &format!("{profile_name}/access-token"))
            .map_err(keyring_err)?
            .set_password(&access_token)
            .map_err(keyring_err)?;
        eprintln!("  Tokens stored in system keyring");
        (None, None)
    } else {
        (Some(developer_token), Some(access_token))
    };

    let mut config = cfg::load_config_or_default();
    config.profiles.insert(
        profile_name.clone(),
        cfg::Profile {
            customer_id,
            login_customer_id: (!login_customer.is_empty()).then_some(login_customer),
            developer_token: dev_field,
            access_token: acc_field,
            ..cfg::Profile::default()
        },
    );
    if config.default_profile.is_none() || config.profiles.len() == 1 {
        config.default_profile = Some(profile_name.clone());
    }
    cfg::save_config(&config)?;

    eprintln!("\nProfile '{profile_name}' saved to {}", config_path.display());
    Ok(())
}
