//! Checks a catalogue and dry-runs every specification against it.
//!
//! Loads the catalogue (schema plus integrity checks), builds each
//! specification in memory without writing anything, and prints the
//! validation findings. With `--records DIR`, previously emitted records are
//! also checked for module ids the catalogue no longer defines.

use anyhow::{Result, anyhow, bail};
use curriculum_forge::config::{CATALOGUE_ENV, DEFAULT_CATALOGUE, DEFAULT_SPECIFICATIONS, SPECS_ENV};
use curriculum_forge::{
    CatalogueRepository, CurriculumBuilder, find_project_root, load_specifications,
    validate_curriculum, validate_record_files,
};
use std::{env, path::PathBuf};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = find_project_root()?;
    let catalogue_path = cli
        .catalogue
        .or_else(|| env_path(CATALOGUE_ENV))
        .unwrap_or_else(|| root.join(DEFAULT_CATALOGUE));
    let specs_path = cli
        .specs
        .or_else(|| env_path(SPECS_ENV))
        .unwrap_or_else(|| root.join(DEFAULT_SPECIFICATIONS));

    let catalogue = CatalogueRepository::load(&catalogue_path)?;
    println!(
        "catalogue {}: {} modules, {} roles",
        catalogue.key().0,
        catalogue.module_count(),
        catalogue.role_count()
    );

    let specs = load_specifications(&specs_path)?;
    let builder = CurriculumBuilder::new(&catalogue);
    let mut errors: Vec<String> = Vec::new();
    for spec in &specs {
        match builder.build(spec) {
            Ok(curriculum) => {
                let report = validate_curriculum(&curriculum);
                for warning in &report.warnings {
                    println!("warning: {warning}");
                }
                errors.extend(report.errors);
            }
            Err(err) => errors.push(format!("{}: {err}", spec.id)),
        }
    }

    if let Some(dir) = cli.records {
        errors.extend(validate_record_files(&catalogue, &[dir])?);
    }

    if errors.is_empty() {
        println!("{} specifications OK", specs.len());
        Ok(())
    } else {
        bail!(
            "{} problem(s) found:\n{}",
            errors.len(),
            errors.join("\n")
        )
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}

struct Cli {
    catalogue: Option<PathBuf>,
    specs: Option<PathBuf>,
    records: Option<PathBuf>,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut args = env::args_os();
        let _program = args.next();
        let mut catalogue = None;
        let mut specs = None;
        let mut records = None;

        while let Some(arg) = args.next() {
            let arg_str = arg
                .to_str()
                .ok_or_else(|| anyhow!("invalid UTF-8 in argument"))?;
            match arg_str {
                "--catalogue" => catalogue = Some(next_path("--catalogue", &mut args)?),
                "--specs" => specs = Some(next_path("--specs", &mut args)?),
                "--records" => records = Some(next_path("--records", &mut args)?),
                "--help" | "-h" => usage(0),
                other => bail!("unknown argument: {other}"),
            }
        }

        Ok(Self {
            catalogue,
            specs,
            records,
        })
    }
}

fn next_path(flag: &str, args: &mut env::ArgsOs) -> Result<PathBuf> {
    let value = args
        .next()
        .ok_or_else(|| anyhow!("{flag} requires a value"))?;
    let path = PathBuf::from(
        value
            .into_string()
            .map_err(|_| anyhow!("{flag} must be valid UTF-8"))?,
    );
    if path.as_os_str().is_empty() {
        bail!("{flag} must not be empty");
    }
    Ok(path)
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: catalogue-lint [--catalogue PATH] [--specs PATH] [--records DIR]\n\nOptions:\n  --catalogue PATH          Module/role catalogue (or set CURRICULUM_CATALOGUE).\n  --specs PATH              Curriculum specifications (or set CURRICULUM_SPECS).\n  --records DIR             Also check emitted records against the catalogue.\n  --help                    Show this help text."
    );
    std::process::exit(code);
}
