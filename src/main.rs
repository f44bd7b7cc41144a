use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use emerald_tone::{analyze, NormalizationSettings, Preset};
use tierra_studio::codec::{load_pixels, ImageSource};
use tierra_studio::error::BatchError;
use tierra_studio::models::{resolve_settings, AppConfig, FailurePolicy, SettingsOverrides};
use tierra_studio::services::{BatchProcessor, CancelFlag, ImagePipeline, SettingsStore};

#[derive(Parser)]
#[command(name = "tierra-studio")]
#[command(about = "Tierra Madre Studio - photo normalization for emerald product imagery")]
struct Cli {
    /// Configuration file (defaults to $CONFIG_FILE)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print brightness, contrast, color temperature and saturation
    Analyze {
        input: PathBuf,

        /// Print the full analysis including histograms as JSON
        #[arg(long)]
        json: bool,
    },
    /// Normalize a single image
    Normalize {
        input: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Normalize several images with the same settings
    Batch {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Keep going when a file fails instead of aborting
        #[arg(long)]
        skip_failed: bool,

        /// Print the results and their analyses as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// List the built-in presets
    Presets,
    /// Print the effective configuration as YAML
    Config,
    /// Show or change the stored custom settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the stored settings
    Show,
    /// Forget the stored settings
    Reset,
    /// Store settings built from a preset and overrides
    Set {
        #[command(flatten)]
        settings: SettingsArgs,
    },
}

#[derive(Args, Debug, Default)]
struct SettingsArgs {
    /// Start from a preset: studio or editorial
    #[arg(long)]
    preset: Option<Preset>,

    /// Target brightness (80-200)
    #[arg(long)]
    brightness: Option<f64>,

    /// Target contrast (20-80)
    #[arg(long)]
    contrast: Option<f64>,

    /// Vignette strength (0-50)
    #[arg(long)]
    vignette: Option<f64>,

    /// Disable auto white balance
    #[arg(long)]
    no_white_balance: bool,

    /// Disable the emerald saturation boost
    #[arg(long)]
    no_emeralds: bool,
}

impl SettingsArgs {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            brightness: self.brightness,
            contrast: self.contrast,
            vignette: self.vignette,
            no_white_balance: self.no_white_balance,
            no_emeralds: self.no_emeralds,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tierra_studio=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config_file = cli
        .config
        .or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from));
    let config = match config_file {
        Some(path) => AppConfig::load(&path),
        None => AppConfig::default(),
    };

    match cli.command {
        Commands::Analyze { input, json } => run_analyze_command(&input, json).await,
        Commands::Normalize {
            input,
            output,
            settings,
        } => run_normalize_command(&config, &input, &output, &settings).await,
        Commands::Batch {
            inputs,
            output,
            skip_failed,
            json,
            settings,
        } => run_batch_command(&config, inputs, &output, skip_failed, json, &settings).await,
        Commands::Presets => {
            run_presets_command();
            Ok(())
        }
        Commands::Config => {
            print!("{}", serde_yaml::to_string(&config)?);
            Ok(())
        }
        Commands::Settings { action } => run_settings_command(&config, action).await,
    }
}

/// Settings for a run, from flags, the settings store and the config
async fn settings_for_run(
    config: &AppConfig,
    args: &SettingsArgs,
) -> anyhow::Result<NormalizationSettings> {
    let store = SettingsStore::new(&config.settings_file);
    let stored = match args.preset {
        Some(_) => None,
        None => store.load_stored().await?,
    };
    let settings = resolve_settings(args.preset, &args.overrides(), stored, config.default_preset);
    tracing::info!(preset = settings.preset_kind().label(), "Using settings");
    Ok(settings)
}

async fn run_analyze_command(input: &Path, json: bool) -> anyhow::Result<()> {
    let pixels = load_pixels(&ImageSource::path(input)).await?;
    let analysis = analyze(&pixels);

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    println!("{} ({}x{})", input.display(), pixels.width(), pixels.height());
    println!("  Brightness:  {:.1}", analysis.brightness);
    println!("  Contrast:    {:.1}", analysis.contrast);
    println!(
        "  Color temp:  {:+.1} ({})",
        analysis.color_temp,
        analysis.tone().label()
    );
    println!("  Saturation:  {:.1}%", analysis.saturation);
    Ok(())
}

async fn run_normalize_command(
    config: &AppConfig,
    input: &Path,
    output: &Path,
    args: &SettingsArgs,
) -> anyhow::Result<()> {
    let settings = settings_for_run(config, args).await?;
    let pipeline = ImagePipeline::new(config.output.encode_options());

    let result = pipeline
        .process(&ImageSource::path(input), &settings)
        .await?;

    tokio::fs::write(output, &result.normalized.bytes).await?;
    println!(
        "Normalized {} -> {} ({} bytes)",
        input.display(),
        output.display(),
        result.normalized.len()
    );
    Ok(())
}

async fn run_batch_command(
    config: &AppConfig,
    inputs: Vec<PathBuf>,
    output_dir: &Path,
    skip_failed: bool,
    json: bool,
    args: &SettingsArgs,
) -> anyhow::Result<()> {
    let settings = settings_for_run(config, args).await?;
    let policy = if skip_failed {
        FailurePolicy::SkipAndContinue
    } else {
        config.batch.failure_policy
    };

    let processor =
        BatchProcessor::new(ImagePipeline::new(config.output.encode_options())).failure_policy(policy);
    let sources: Vec<ImageSource> = inputs.into_iter().map(ImageSource::Path).collect();

    let cancel = CancelFlag::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, stopping after the current file");
            on_ctrl_c.cancel();
        }
    });

    let outcome = processor
        .run(
            &sources,
            &settings,
            |done, total| tracing::info!(done, total, "Progress"),
            &cancel,
        )
        .await;

    // Files finished before a cancel are still written
    let (report, cancelled_of) = match outcome {
        Ok(report) => (report, None),
        Err(BatchError::Cancelled { report, total }) => (report, Some(total)),
        Err(e) => return Err(e.into()),
    };

    tokio::fs::create_dir_all(output_dir).await?;
    let paths = report.output_paths(output_dir, config.output.format.extension());
    for (result, path) in report.results.iter().zip(&paths) {
        tokio::fs::write(path, &result.normalized.bytes).await?;
        if !json {
            println!("  + {}", path.display());
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report.results)?);
    }
    if let Some(total) = cancelled_of {
        anyhow::bail!(
            "Batch cancelled after {} of {} files; finished files were written",
            report.total(),
            total
        );
    }

    if json {
        for failure in &report.failures {
            tracing::warn!(name = %failure.name, error = %failure.error, "Skipped file");
        }
        return Ok(());
    }

    println!(
        "Normalized {} of {} files",
        report.results.len(),
        report.total()
    );
    if !report.is_clean() {
        println!("\nSkipped {} files:", report.failures.len());
        for failure in &report.failures {
            println!("  - {}: {}", failure.name, failure.error);
        }
    }
    Ok(())
}

fn run_presets_command() {
    for preset in Preset::ALL {
        let s = preset.settings();
        println!("{} ({})", preset.label(), preset.name());
        println!("  {}", preset.description());
        println!(
            "  brightness {}  contrast {}  white balance {}  emeralds {}  vignette {}",
            s.target_brightness,
            s.target_contrast,
            on_off(s.auto_white_balance),
            on_off(s.enhance_emeralds),
            s.vignette_strength
        );
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

async fn run_settings_command(config: &AppConfig, action: SettingsAction) -> anyhow::Result<()> {
    let store = SettingsStore::new(&config.settings_file);

    match action {
        SettingsAction::Show => {
            match store.load_stored().await? {
                Some(settings) => {
                    println!("# {} ({})", store.path().display(), settings.preset_kind().label());
                    print!("{}", serde_yaml::to_string(&settings)?);
                }
                None => println!("No stored settings at {}", store.path().display()),
            }
        }
        SettingsAction::Reset => {
            store.reset().await?;
            println!("Removed stored settings at {}", store.path().display());
        }
        SettingsAction::Set { settings } => {
            let current = store.load().await?;
            let base = settings.preset.map(Preset::settings).unwrap_or(current);
            let updated = settings.overrides().apply(base);
            store.save(&updated).await?;
            println!(
                "Saved {} settings to {}",
                updated.preset_kind().label(),
                store.path().display()
            );
        }
    }
    Ok(())
}
