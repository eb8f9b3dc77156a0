//! `contractorctl`: drive the contractor profile editor from a terminal
//! against the filesystem-backed stores.

mod console;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use contractor_config::{ConfigLoad, ConfigLoader};
use contractor_core::ProfileEditor;
use contractor_core::domain::profile::{
    DeleteRequestOutcome, EditorPorts, SaveOutcome, SelectedImage,
    UploadOutcome,
    phone::{live_format_phone, to_canonical_phone, to_display_phone},
};
use contractor_core::infrastructure::fs::{
    FsImageStore, FsProfileStore, FsReferenceData, FsReputation,
};
use contractor_core::ports::NavigationParams;
use contractor_model::ProfileField;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::console::{
    ConsoleNavigator, ConsoleNotifier, DialoguerConfirmer, EnvSession,
};

#[derive(Parser)]
#[command(
    name = "contractorctl",
    about = "Edit contractor profiles stored on the local filesystem"
)]
struct Cli {
    /// Config file to use instead of the environment/default lookup
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a profile and print the editor view as JSON
    Show {
        /// Account to open; defaults to $CONTRACTOR_USER_ID
        #[arg(long)]
        user: Option<String>,
    },
    /// Apply field edits and save the profile
    Save {
        #[arg(long)]
        user: Option<String>,
        /// Field assignment such as `business_name=Acme`; repeatable
        #[arg(long = "field", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        fields: Vec<(ProfileField, String)>,
    },
    /// Upload a profile image and point the profile at it
    UploadImage {
        #[arg(long)]
        user: Option<String>,
        file: PathBuf,
    },
    /// Show how a phone number is rendered while typing, for display and
    /// for storage
    FormatPhone { input: String },
    /// Confirm and route to the account deletion request flow
    DeleteRequest {
        #[arg(long)]
        user: Option<String>,
        /// Accept the confirmation without prompting
        #[arg(long)]
        yes: bool,
    },
}

fn parse_assignment(raw: &str) -> Result<(ProfileField, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    let field = name.parse::<ProfileField>().map_err(|err| err.to_string())?;
    Ok((field, value.to_string()))
}

fn params(user: Option<String>) -> NavigationParams {
    NavigationParams { user_id: user }
}

fn load_config(path: Option<&PathBuf>) -> Result<ConfigLoad> {
    let loader = ConfigLoader::new();
    let load = match path {
        Some(path) => loader.load_file(path),
        None => loader.load(),
    };
    load.context("failed to load configuration")
}

fn build_editor(load: &ConfigLoad, assume_yes: bool) -> ProfileEditor {
    let data_dir = load.config.storage.data_dir.clone();
    let ports = EditorPorts {
        profiles: Arc::new(FsProfileStore::new(data_dir.clone())),
        reference: Arc::new(FsReferenceData::new(data_dir.clone())),
        reputation: Arc::new(FsReputation::new(data_dir.clone())),
        images: Arc::new(FsImageStore::new(
            data_dir,
            load.public_base_url.clone(),
        )),
        session: Arc::new(EnvSession),
        notifier: Arc::new(ConsoleNotifier),
        confirmer: Arc::new(DialoguerConfirmer::new(assume_yes)),
        navigator: Arc::new(ConsoleNavigator),
    };
    ProfileEditor::with_settings(ports, load.config.editor_settings())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(err) if err.not_found() => {}
        Err(err) => return Err(err).context("failed to read .env"),
    }

    let cli = Cli::parse();

    let config = cli.config;
    let editor = |assume_yes: bool| -> Result<ProfileEditor> {
        let load = load_config(config.as_ref())?;
        Ok(build_editor(&load, assume_yes))
    };

    match cli.command {
        Command::FormatPhone { input } => {
            println!("live: {}", live_format_phone(&input));
            println!("display: {}", to_display_phone(&input));
            println!("canonical: {}", to_canonical_phone(&input));
        }
        Command::Show { user } => {
            let editor = editor(false)?;
            editor.activate(&params(user)).await;
            println!("{}", serde_json::to_string_pretty(&editor.view())?);
        }
        Command::Save { user, fields } => {
            let editor = editor(false)?;
            editor.activate(&params(user)).await;
            for (field, value) in fields {
                editor.set_field(field, value);
            }
            match editor.save().await {
                SaveOutcome::Saved => {}
                SaveOutcome::NoUser => bail!("No user found"),
                SaveOutcome::Invalid(err) => bail!(err),
                SaveOutcome::Failed(message) => bail!(message),
            }
        }
        Command::UploadImage { user, file } => {
            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;
            let file_name = file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .with_context(|| format!("{} has no file name", file.display()))?;

            let editor = editor(false)?;
            editor.activate(&params(user)).await;
            match editor
                .upload_image(SelectedImage::new(file_name, bytes))
                .await
            {
                UploadOutcome::Uploaded { url, .. } => println!("{url}"),
                UploadOutcome::Skipped => bail!("No user found"),
                UploadOutcome::UploadFailed(message) => bail!(message),
                UploadOutcome::PersistFailed { url, message } => {
                    bail!("{message} (image stored at {url})")
                }
            }
        }
        Command::DeleteRequest { user, yes } => {
            let editor = editor(yes)?;
            editor.activate(&params(user)).await;
            if editor.request_deletion().await == DeleteRequestOutcome::Declined
            {
                eprintln!("Delete request cancelled");
            }
        }
    }

    Ok(())
}
