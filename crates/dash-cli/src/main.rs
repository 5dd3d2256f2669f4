use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use dash_pub::PubRoot;
use dash_vfs::{LocalFs, VfsPath};
use dash_vm_service::InstanceRef;
use serde::Serialize;

#[derive(Parser)]
#[command(
    name = "dash",
    version,
    about = "Dash CLI (pub root discovery, VM service inspection)"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Locate the pub root for a file or directory
    PubRoot(PubRootArgs),
    /// Summarize a VM service instance document stored as JSON
    Inspect(InspectArgs),
}

#[derive(Args)]
struct PubRootArgs {
    /// Path to a file or directory inside a pub package
    path: PathBuf,
    /// Emit JSON suitable for CI
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct InspectArgs {
    /// Path to a JSON file holding an `@Instance` response
    path: PathBuf,
    /// Emit JSON suitable for CI
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct PubRootReport {
    root: String,
    pubspec: String,
    name: Option<String>,
    declares_flutter: bool,
    packages: usize,
    packages_up_to_date: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::PubRoot(args) => pub_root(args),
        Command::Inspect(args) => inspect(args),
    }
}

fn pub_root(args: PubRootArgs) -> Result<()> {
    let fs = LocalFs::new();
    let path = absolutize(&args.path)?;
    let Some(root) = PubRoot::for_path(&fs, &path) else {
        bail!("no pub root found for {path}");
    };

    let info = root.pubspec_info(&fs);
    let report = PubRootReport {
        root: root.path().to_owned(),
        pubspec: root.pubspec().as_str().to_owned(),
        name: info.name,
        declares_flutter: info.flutter,
        packages: root.packages_map(&fs).map_or(0, |map| map.len()),
        packages_up_to_date: root.has_up_to_date_packages(&fs),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("root: {}", report.root);
        if let Some(name) = &report.name {
            println!("name: {name}");
        }
        println!("declares flutter: {}", report.declares_flutter);
        println!("packages: {}", report.packages);
        println!("packages up to date: {}", report.packages_up_to_date);
    }
    Ok(())
}

fn inspect(args: InspectArgs) -> Result<()> {
    let text = std::fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("invalid JSON in {}", args.path.display()))?;
    let Some(object) = value.as_object() else {
        bail!("expected a JSON object in {}", args.path.display());
    };

    let instance = InstanceRef::new(object);
    if args.json {
        let report = serde_json::json!({
            "kind": instance.kind().as_str(),
            "class": instance.class_ref().and_then(|class| class.name()),
            "value": instance.value_as_string(),
            "truncated": instance.value_as_string_is_truncated(),
            "length": instance.length(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let kind = instance.kind().as_str();
        let class = instance
            .class_ref()
            .and_then(|class| class.name())
            .unwrap_or("<unknown class>");
        match instance.value_as_string() {
            Some(value) if instance.value_as_string_is_truncated() => {
                println!("{kind} {class}: {value}... (truncated)");
            }
            Some(value) => println!("{kind} {class}: {value}"),
            None => println!("{kind} {class}"),
        }
    }
    Ok(())
}

fn absolutize(path: &Path) -> Result<VfsPath> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .context("cannot resolve the current directory")?
            .join(path)
    };
    Ok(VfsPath::from_std_path(&absolute))
}
