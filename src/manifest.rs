use crate::args::Args;
use crate::collect::ExcludeRules;
use crate::context::Context;
use crate::error::Error;
use crate::format::ArchiveFormat;
use crate::result::Result;
use crate::tpl::Tpl;
use crate::utils;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_FILENAME: &str = "$NAME-release-$TIMESTAMP";
const DEFAULT_OUTPUT_FOLDER: &str = "dist";

#[derive(Debug, Deserialize)]
struct CargoToml {
    package: Option<Package>,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    metadata: Option<Metadata>,
}

#[derive(Debug, Deserialize, Default)]
struct Metadata {
    #[serde(default)]
    bale: Option<BaleConfig>,
}

/// Raw `[package.metadata.bale]` table, or the contents of a standalone
/// manifest file passed with `--manifest`. Every field is optional; an
/// absent manifest means a default run.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct BaleConfig {
    #[serde(default)]
    pub filename: Option<String>,

    #[serde(rename = "output-folder", default)]
    pub output_folder: Option<String>,

    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub build: Vec<String>,

    #[serde(rename = "exclude-dirs", default)]
    pub exclude_dirs: Vec<String>,

    #[serde(rename = "exclude-files", default)]
    pub exclude_files: Vec<String>,

    #[serde(default)]
    pub prune: bool,
}

/// Parsed and processed packaging configuration
pub struct Manifest {
    pub name: String,
    #[allow(dead_code)]
    pub version: String,
    /// Archive stem template; `$TIMESTAMP` stays unresolved until creation
    pub filename: String,
    pub output_folder: PathBuf,
    pub format: ArchiveFormat,
    pub build_commands: Vec<String>,
    pub rules: ExcludeRules,
    pub prune: bool,
}

impl Manifest {
    /// Build the effective configuration from the optional manifest and
    /// command-line overrides
    pub fn load(ctx: &Context, args: &Args) -> Result<Self> {
        let cargo = read_cargo_toml(&ctx.root_dir)?;

        let config = if let Some(path) = args.manifest.as_deref() {
            read_standalone(path)?
        } else {
            cargo
                .as_ref()
                .and_then(|c| c.package.as_ref())
                .and_then(|p| p.metadata.as_ref())
                .and_then(|m| m.bale.clone())
                .unwrap_or_default()
        };

        // A project without a Cargo.toml is named after its root directory.
        let (name, version) = match cargo.as_ref().and_then(|c| c.package.as_ref()) {
            Some(package) => (
                package.name.clone(),
                package.version.clone().unwrap_or_default(),
            ),
            None => (root_name(&ctx.root_dir), String::new()),
        };

        let mut tpl = Tpl::new();
        tpl.register("NAME", &name);
        tpl.register("VERSION", &version);
        tpl.register("PLATFORM", utils::platform_string());

        let filename = tpl.parse(config.filename.as_deref().unwrap_or(DEFAULT_FILENAME));

        let output_folder = args
            .output
            .clone()
            .or_else(|| {
                config
                    .output_folder
                    .as_deref()
                    .map(|f| PathBuf::from(tpl.parse(f)))
            })
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FOLDER));
        let output_folder = ctx.root_dir.join(output_folder);

        let format = match args.format.as_deref().or(config.format.as_deref()) {
            Some(s) => s.parse()?,
            None => ArchiveFormat::default(),
        };

        let build_commands = tpl.parse_vec(&config.build);

        let mut rules = ExcludeRules::standard();
        for dir in &config.exclude_dirs {
            rules.exclude_dir(tpl.parse(dir));
        }
        for file in &config.exclude_files {
            rules.exclude_file(tpl.parse(file));
        }
        // The destination must never end up inside its own archive.
        if let Some(folder) = output_folder.file_name().and_then(|n| n.to_str()) {
            rules.exclude_dir(folder);
        }

        Ok(Manifest {
            name,
            version,
            filename,
            output_folder,
            format,
            build_commands,
            rules,
            prune: args.prune || config.prune,
        })
    }
}

fn read_cargo_toml(root: &Path) -> Result<Option<CargoToml>> {
    let path = root.join("Cargo.toml");
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path)?;
    let cargo = toml::from_str(&content)
        .map_err(|e| Error::InvalidManifest(format!("{}: {}", path.display(), e)))?;
    Ok(Some(cargo))
}

fn read_standalone(path: &Path) -> Result<BaleConfig> {
    if !path.exists() {
        return Err(Error::ManifestNotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::InvalidManifest(format!("{}: {}", path.display(), e)))
}

fn root_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("release"))
}
