//! Builds every curriculum specification and writes one JSON record each.
//!
//! Paths come from the settings file (`--settings`, else `data/settings.json`
//! when present), then `CURRICULUM_*` environment variables, then flags. The
//! batch stops at the first specification that cannot be built; records
//! already written stay on disk.

use anyhow::{Result, anyhow, bail};
use curriculum_forge::output::write_curricula;
use curriculum_forge::{
    CatalogueRepository, CurriculumBuilder, Settings, find_project_root, load_specifications,
    run_batch, validate_curriculum,
};
use std::{env, path::PathBuf};
use tracing_subscriber::EnvFilter;

const DEFAULT_SETTINGS: &str = "data/settings.json";

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse()?;
    init_tracing(cli.verbose);

    let root = find_project_root()?;
    let settings_path = cli
        .settings
        .clone()
        .or_else(|| Some(root.join(DEFAULT_SETTINGS)).filter(|path| path.is_file()));
    let mut settings = match settings_path {
        Some(path) => Settings::load(&path, &root)?,
        None => Settings::defaults(&root),
    };
    settings.apply_env();
    if let Some(path) = cli.catalogue {
        settings.catalogue = path;
    }
    if let Some(path) = cli.specs {
        settings.specifications = path;
    }
    if let Some(path) = cli.output {
        settings.output_dir = path;
    }

    let catalogue = CatalogueRepository::load(&settings.catalogue)?;
    let specs = load_specifications(&settings.specifications)?;
    let builder = CurriculumBuilder::new(&catalogue).with_tie_break(settings.tie_break);

    let report = run_batch(&builder, &specs);
    let written = write_curricula(&settings.output_dir, &report.curricula)?;

    for curriculum in &report.curricula {
        let findings = validate_curriculum(curriculum);
        for warning in &findings.warnings {
            eprintln!("curriculum-build: warning: {warning}");
        }
        for error in &findings.errors {
            eprintln!("curriculum-build: error: {error}");
        }
        let ident = &curriculum.curriculum_identification;
        println!(
            "{}: {} {}, {} credits, {} micro-credentials",
            ident.id,
            ident.total_modules,
            ident.modules_text.to_lowercase(),
            ident.total_ects,
            ident.total_micro_credentials
        );
    }
    println!(
        "wrote {} of {} curricula to {}",
        written.len(),
        specs.len(),
        settings.output_dir.display()
    );

    report.into_result()?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

struct Cli {
    catalogue: Option<PathBuf>,
    specs: Option<PathBuf>,
    output: Option<PathBuf>,
    settings: Option<PathBuf>,
    verbose: bool,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut args = env::args_os();
        let _program = args.next();
        let mut cli = Cli {
            catalogue: None,
            specs: None,
            output: None,
            settings: None,
            verbose: false,
        };

        while let Some(arg) = args.next() {
            let arg_str = arg
                .to_str()
                .ok_or_else(|| anyhow!("invalid UTF-8 in argument"))?;
            match arg_str {
                "--catalogue" => cli.catalogue = Some(next_path("--catalogue", &mut args)?),
                "--specs" => cli.specs = Some(next_path("--specs", &mut args)?),
                "--output" => cli.output = Some(next_path("--output", &mut args)?),
                "--settings" => cli.settings = Some(next_path("--settings", &mut args)?),
                "--verbose" | "-v" => cli.verbose = true,
                "--help" | "-h" => usage(0),
                other => bail!("unknown argument: {other}"),
            }
        }

        Ok(cli)
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
        "Usage: curriculum-build [--catalogue PATH] [--specs PATH] [--output DIR] [--settings PATH] [--verbose]\n\nOptions:\n  --catalogue PATH          Module/role catalogue (or set CURRICULUM_CATALOGUE).\n  --specs PATH              Curriculum specifications (or set CURRICULUM_SPECS).\n  --output DIR              Directory for NN_<id>.json records (or set CURRICULUM_OUTPUT).\n  --settings PATH           Settings file; defaults to data/settings.json when present.\n  --verbose                 Log selection decisions (same as RUST_LOG=debug).\n  --help                    Show this help text."
    );
    std::process::exit(code);
}
