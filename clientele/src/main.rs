use clientele_codegen_java::Emitter;
use clientele_core::{parse::Document, settings::Settings};
use miette::{Context, IntoDiagnostic, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

use self::config::{Command, Generate, Main};

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> Result<()> {
    let Ok(main) = Main::parse().map_err(|err| err.exit());
    init_tracing(main.verbose);

    match main.command {
        Command::Generate(Generate {
            input,
            output,
            overrides,
            check_only,
        }) => {
            let source = std::fs::read_to_string(&input)
                .into_diagnostic()
                .with_context(|| format!("Failed to read `{}`", input.display()))?;

            let mut doc = Document::from_yaml(&source)
                .into_diagnostic()
                .context("Failed to parse API description")?;

            info!(
                title = %doc.info.title,
                version = doc.info.version.as_deref().unwrap_or("unversioned"),
                "Read API description"
            );

            let raw = overrides.apply(std::mem::take(&mut doc.settings));
            let settings = Settings::resolve(raw)?;
            info!(
                namespace = settings.namespace(),
                generation = %settings.pipeline_generation(),
                "Resolved settings"
            );

            let files = Emitter::new(&settings).generate(&doc)?;

            if check_only {
                info!(files = files.len(), "Check complete; no files written");
                return Ok(());
            }

            info!(output = %output.display(), "Writing generated code");
            files.write_to_disk(&output)?;
            info!(files = files.len(), "Generation complete");
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
