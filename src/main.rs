mod archive;
mod args;
mod cmd;
mod collect;
mod context;
mod error;
mod format;
mod manifest;
mod result;
mod tpl;
mod utils;

use args::Args;
use context::Context;
use manifest::Manifest;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> result::Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Resolve the project root and create the context
    let root_dir = utils::resolve_root(args.path.as_deref())?;
    let ctx = Context::new(root_dir, args.verbose);

    // Load the effective configuration (all of it optional)
    let manifest = Manifest::load(&ctx, &args)?;

    if ctx.verbose {
        eprintln!("Packaging {} from {}", manifest.name, ctx.root_dir.display());
    }

    // Execute build commands unless --no-build is specified
    if !args.no_build {
        for command in &manifest.build_commands {
            let parts: Vec<&str> = command.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            cmd::execute(&ctx, parts[0], &parts[1..])?;
        }
    }

    // Enumerate the files to package
    let files = collect::collect_files(&ctx.root_dir, &manifest.rules)?;

    // Drop previous release archives when asked to
    if manifest.prune {
        archive::prune_stale(&ctx, &manifest)?;
    }

    // Write the archive and report it
    let report = archive::create(&ctx, &manifest, &files)?;

    println!("{}", report.path.display());
    println!("files={}", report.files);

    Ok(())
}
