use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;

use git_buildversion::changelog::ChangelogGenerator;
use git_buildversion::config::{self, Config};
use git_buildversion::descriptor::{self, BuildDescriptor};
use git_buildversion::git::{Git2Repository, Repository};
use git_buildversion::output;
use git_buildversion::ui;

#[derive(Parser)]
#[command(
    name = "git-buildversion",
    about = "Derive build version codes, names and changelogs from git tags"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, default_value = ".", help = "Path inside the git repository")]
    repo: PathBuf,

    #[arg(long, help = "Enable debug logging")]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the build tag of a variant and write its sidecar file
    Tag {
        #[arg(short, long)]
        variant: String,

        #[arg(short, long, default_value = ".", help = "Directory for the sidecar file")]
        output: PathBuf,
    },
    /// Print the version code and version name of a variant
    Version {
        #[arg(short, long)]
        variant: String,
    },
    /// Render the changelog of a variant's current build
    Changelog {
        #[arg(short, long)]
        variant: String,

        #[arg(short, long, help = "Write the changelog to this directory instead of stdout")]
        output: Option<PathBuf>,
    },
    /// Show the variants configured in the configuration file
    Variants,
}

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("git_buildversion")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    initialize_logger(args.debug)?;

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    match &args.command {
        Command::Variants => list_configured_variants(&config),
        Command::Tag { variant, output } => {
            let repo = open_repository(&args.repo);
            write_tag(&repo, &config, variant, output)
        }
        Command::Version { variant } => {
            let repo = open_repository(&args.repo);
            print_version(&repo, &config, variant)
        }
        Command::Changelog { variant, output } => {
            let repo = open_repository(&args.repo);
            print_changelog(&repo, &config, variant, output.as_deref())
        }
    }
}

fn open_repository(path: &Path) -> Git2Repository {
    match Git2Repository::open(path) {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    }
}

fn describe_variant<R: Repository>(repo: &R, config: &Config, variant: &str) -> BuildDescriptor {
    let output_config = config.output_for(variant);

    match descriptor::describe(repo, variant, &output_config, &config.default_config) {
        Ok(descriptor) => {
            for warning in &descriptor.warnings {
                ui::display_boundary_warning(warning);
            }
            descriptor
        }
        Err(e) => {
            ui::display_error(&format!(
                "Failed to resolve versions of variant '{}': {}",
                variant, e
            ));
            std::process::exit(1);
        }
    }
}

fn write_tag<R: Repository>(repo: &R, config: &Config, variant: &str, output_dir: &Path) -> Result<()> {
    ui::display_status(&format!("Resolving build tag for variant '{}'", variant));
    let descriptor = describe_variant(repo, config, variant);
    ui::display_descriptor(variant, &descriptor);

    match &descriptor.build {
        Some(build) => {
            let path = output::write_build(output_dir, build)?;
            ui::display_success(&format!("Wrote {}", path.display()));
        }
        None => {
            info!("variant '{}' has no build tag to persist", variant);
        }
    }

    if let Some(code) = descriptor.version_code {
        let base_file_name = config.output_for(variant).base_file_name;
        ui::display_status(&format!(
            "Artifact: {}",
            output::artifact_file_name(&base_file_name, variant, code)
        ));
    }

    Ok(())
}

fn print_version<R: Repository>(repo: &R, config: &Config, variant: &str) -> Result<()> {
    let descriptor = describe_variant(repo, config, variant);

    println!(
        "versionCode={}",
        descriptor
            .version_code
            .map(|code| code.to_string())
            .unwrap_or_default()
    );
    println!(
        "versionName={}",
        descriptor.version_name.unwrap_or_default()
    );

    Ok(())
}

fn print_changelog<R: Repository>(
    repo: &R,
    config: &Config,
    variant: &str,
    output_dir: Option<&Path>,
) -> Result<()> {
    let generator = match ChangelogGenerator::new(&config.changelog) {
        Ok(generator) => generator,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let changelog = match generator.generate_for_variant(
        repo,
        variant,
        &config.output_for(variant),
        &config.default_config,
    ) {
        Ok(changelog) => changelog,
        Err(e) => {
            ui::display_error(&format!(
                "Failed to resolve versions of variant '{}': {}",
                variant, e
            ));
            std::process::exit(1);
        }
    };

    for warning in &changelog.warnings {
        ui::display_boundary_warning(warning);
    }
    let text = changelog.text;

    match output_dir {
        Some(dir) => {
            let path = output::write_changelog(dir, variant, &text)?;
            ui::display_success(&format!("Wrote {}", path.display()));
        }
        None => println!("{}", text),
    }

    Ok(())
}

fn list_configured_variants(config: &Config) -> Result<()> {
    let variants: Vec<String> = config.variants.keys().cloned().collect();

    if variants.is_empty() {
        ui::display_error(&format!(
            "No variants configured in {}",
            config::CONFIG_FILE_NAME
        ));
        std::process::exit(1);
    }

    ui::display_available_variants(&variants);
    Ok(())
}
