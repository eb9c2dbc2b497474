// src/bin/pragmatic-cli.rs
//
// Headless front end: the same commands the desktop shell exposes.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use pragmatic::app::{build_app_state, build_app_state_with_storage, init_logging};
use pragmatic::application::{commands, AppState, GenerationResultDto, UpdateSettingsDto};
use pragmatic::config::AppConfig;
use pragmatic::repositories::MemoryKeyValueStorage;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = AppConfig::from_env().context("failed to read configuration")?;

    let state = if cli.ephemeral {
        build_app_state_with_storage(&config, Arc::new(MemoryKeyValueStorage::new())).await
    } else {
        build_app_state(&config).await
    }
    .context("failed to open the gallery")?;

    run(cli.command, &state).await
}

#[derive(Parser)]
#[command(author, version, about = "Generate and manage AI wallpapers")]
struct Cli {
    /// Keep everything in memory; nothing is written to disk.
    #[arg(long, global = true)]
    ephemeral: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new wallpaper from a prompt.
    Generate {
        /// What the wallpaper should show.
        prompt: String,
    },
    /// Create a new wallpaper derived from an existing one.
    Edit {
        /// Id of the source wallpaper.
        id: String,
        /// Free-text changes, e.g. "add clouds".
        instructions: String,
    },
    /// List the gallery, newest first.
    List,
    /// Delete a wallpaper.
    Delete { id: String },
    /// Write a wallpaper's image to disk.
    Export(ExportArgs),
    /// Show or change settings.
    #[command(subcommand)]
    Settings(SettingsCommand),
    /// List the available image models.
    Models,
    /// Record the Pro upgrade.
    Upgrade,
    /// Give up Pro, e.g. when signing out.
    Downgrade,
}

#[derive(Args)]
struct ExportArgs {
    id: String,
    /// Target directory (defaults to PRAGMATIC_EXPORT_DIR).
    #[arg(long)]
    dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum SettingsCommand {
    Show,
    /// Choose the image model, e.g. `sd-v1-5`.
    SetModel { model: String },
    SetTheme {
        #[arg(value_enum)]
        theme: Theme,
    },
    Reset,
}

#[derive(Clone, Copy, ValueEnum)]
enum Theme {
    Light,
    Dark,
    System,
}

impl Theme {
    fn key(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }
}

async fn run(command: Commands, state: &AppState) -> Result<()> {
    match command {
        Commands::Generate { prompt } => {
            let result = commands::generate_wallpaper(prompt, state).await?;
            print_generation(&result);
        }
        Commands::Edit { id, instructions } => {
            let result = commands::edit_wallpaper(id, instructions, state).await?;
            print_generation(&result);
        }
        Commands::List => {
            let wallpapers = commands::list_wallpapers(state).await?;
            if wallpapers.is_empty() {
                println!("No wallpapers yet");
            }
            for wallpaper in wallpapers {
                println!("{}  {}  {}", wallpaper.id, wallpaper.created_at, wallpaper.prompt);
            }
        }
        Commands::Delete { id } => {
            if commands::delete_wallpaper(id.clone(), state).await? {
                println!("Deleted {}", id);
            } else {
                println!("No wallpaper with id {}", id);
            }
        }
        Commands::Export(args) => {
            let directory = args.dir.map(|dir| dir.display().to_string());
            let exported = commands::export_wallpaper(args.id, directory, state).await?;
            println!("Saved {}", exported.path);
        }
        Commands::Settings(command) => {
            let settings = match command {
                SettingsCommand::Show => commands::get_settings(state).await?,
                SettingsCommand::SetModel { model } => {
                    let update = UpdateSettingsDto {
                        image_model: Some(model),
                        ..Default::default()
                    };
                    commands::update_settings(update, state).await?
                }
                SettingsCommand::SetTheme { theme } => {
                    let update = UpdateSettingsDto {
                        color_theme: Some(theme.key().to_string()),
                        ..Default::default()
                    };
                    commands::update_settings(update, state).await?
                }
                SettingsCommand::Reset => commands::reset_settings(state).await?,
            };
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        Commands::Models => {
            for model in commands::list_models(state).await? {
                let lock = if model.available { "" } else { "  [Pro]" };
                println!(
                    "{:<14} {:<24} {}x{}{}",
                    model.key, model.label, model.width, model.height, lock
                );
            }
        }
        Commands::Upgrade => {
            commands::upgrade_to_pro(state).await?;
            println!("Pro unlocked");
        }
        Commands::Downgrade => {
            commands::downgrade_from_pro(state).await?;
            println!("Back on the free tier");
        }
    }
    Ok(())
}

fn print_generation(result: &GenerationResultDto) {
    let wallpaper = &result.wallpaper;
    if result.saved {
        println!("Saved {} ({})", wallpaper.id, result.model);
    } else if let Some(warning) = &result.warning {
        eprintln!("{}", warning);
    }
    println!("  prompt: {}", wallpaper.prompt);
    if wallpaper.image_url.starts_with("data:") {
        println!("  image:  embedded, {} bytes", wallpaper.image_url.len());
    } else {
        println!("  image:  {}", wallpaper.image_url);
    }
}
