mod archive;
mod args;
mod context;
mod error;
mod manifest;
mod result;
mod utils;

use args::Args;
use context::Context;
use manifest::Layout;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> result::Result<()> {
    let Args {
        verbose,
        dry_run,
        root,
        manifest,
        output,
    } = Args::parse();

    let root = utils::resolve_root(root.as_deref())?;
    let ctx = Context::new(root, verbose);

    cliclack::intro("lurti-pack")?;

    let mut layout = match manifest {
        Some(path) => {
            let spinner = cliclack::spinner();
            spinner.start("Loading manifest...");
            match Layout::load(&ctx, &path) {
                Ok(layout) => {
                    spinner.stop(format!("Loaded manifest for {}", layout.name));
                    layout
                }
                Err(e) => {
                    spinner.error("Failed to load manifest");
                    return Err(e);
                }
            }
        }
        None => Layout::default(),
    };

    // relative to where the tool was invoked, not the source root
    if let Some(output) = output {
        layout.output = std::env::current_dir()?.join(output);
    }

    if dry_run {
        let entries = archive::collect(&ctx, &layout)?;
        let listing = entries
            .iter()
            .map(|entry| entry.name.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        cliclack::note(
            format!("{} entries", entries.len()),
            if listing.is_empty() { "(none)" } else { listing.as_str() },
        )?;
        cliclack::outro(format!(
            "Dry run: {} not written",
            layout.output_path(&ctx.root).display()
        ))?;
        return Ok(());
    }

    let progress = Progress::start(&ctx, "Packing archive...")?;
    let packed = match archive::build(&ctx, &layout) {
        Ok(packed) => packed,
        Err(e) => {
            progress.error("Failed to pack archive")?;
            return Err(e);
        }
    };
    progress.stop(format!("Packed {} entries", packed.entries))?;

    cliclack::outro(format!("Archive created: {}", packed.path.display()))?;
    Ok(())
}

/// Spinner for quiet runs; plain log lines when verbose output would
/// otherwise be drawn over a running spinner
enum Progress {
    Spinner(cliclack::ProgressBar),
    Log,
}

impl Progress {
    fn start(ctx: &Context, message: &str) -> std::io::Result<Self> {
        if ctx.verbose {
            cliclack::log::step(message)?;
            return Ok(Progress::Log);
        }

        let spinner = cliclack::spinner();
        spinner.start(message);
        Ok(Progress::Spinner(spinner))
    }

    fn stop(self, message: String) -> std::io::Result<()> {
        match self {
            Progress::Spinner(spinner) => spinner.stop(message),
            Progress::Log => cliclack::log::success(message)?,
        }
        Ok(())
    }

    fn error(self, message: &str) -> std::io::Result<()> {
        match self {
            Progress::Spinner(spinner) => spinner.error(message),
            Progress::Log => cliclack::log::error(message)?,
        }
        Ok(())
    }
}
