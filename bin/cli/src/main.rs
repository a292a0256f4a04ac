use std::path::PathBuf;

use anyhow::bail;
use clap::{Parser, Subcommand};
use descriptor_registry::{
    DescriptorRegistry, FileDescriptorProto, RegistryConfig,
    logging::{TracingConfig, setup_tracing},
    manifest::Manifest,
    scan,
};
use serde::Serialize;
use tracing::info;

#[derive(Parser)]
#[command(name = "descriptor-registry-cli")]
#[command(about = "Descriptor Registry CLI - Inspect aggregated protobuf file descriptors")]
struct Args {
    /// Descriptor manifest path
    #[arg(long, default_value = "descriptors.txt")]
    manifest: PathBuf,

    /// JSON output
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List aggregated file descriptors
    List,

    /// Show details of one file descriptor
    Show {
        /// Descriptor file name (e.g. example.proto)
        file: String,
    },

    /// Load all descriptor sets and report totals
    Check,
}

#[derive(Serialize)]
struct DescriptorSummary {
    name: String,
    package: String,
    messages: usize,
    enums: usize,
    services: usize,
}

impl From<&FileDescriptorProto> for DescriptorSummary {
    fn from(fd: &FileDescriptorProto) -> Self {
        Self {
            name: fd.name().to_string(),
            package: fd.package().to_string(),
            messages: fd.message_type.len(),
            enums: fd.enum_type.len(),
            services: fd.service.len(),
        }
    }
}

#[derive(Serialize)]
struct CheckReport {
    search_paths: usize,
    descriptor_files: usize,
    file_descriptors: usize,
}

fn main() -> anyhow::Result<()> {
    setup_tracing(TracingConfig::from_env())?;
    let args = Args::parse();

    let registry = DescriptorRegistry::new(RegistryConfig {
        manifest_path: args.manifest.clone(),
    });

    match args.command {
        Commands::List => list(&registry, args.json),
        Commands::Show { file } => show(&registry, &file),
        Commands::Check => check(&registry, &args.manifest, args.json),
    }
}

fn list(registry: &DescriptorRegistry, json: bool) -> anyhow::Result<()> {
    let descriptors = registry.file_descriptors()?;

    if json {
        let summaries: Vec<DescriptorSummary> =
            descriptors.iter().map(DescriptorSummary::from).collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    if descriptors.is_empty() {
        println!("No file descriptors found");
        return Ok(());
    }

    for fd in descriptors.iter() {
        let summary = DescriptorSummary::from(fd);
        println!(
            "{:<40} package={:<24} messages={} enums={} services={}",
            summary.name, summary.package, summary.messages, summary.enums, summary.services
        );
    }
    Ok(())
}

fn show(registry: &DescriptorRegistry, file: &str) -> anyhow::Result<()> {
    let descriptors = registry.file_descriptors()?;
    let Some(fd) = descriptors.iter().find(|fd| fd.name() == file) else {
        bail!("No file descriptor named {file}");
    };

    println!("File: {}", fd.name());
    println!("Package: {}", fd.package());

    if !fd.dependency.is_empty() {
        println!("Dependencies:");
        for dep in &fd.dependency {
            println!("  {dep}");
        }
    }

    if !fd.message_type.is_empty() {
        println!("Messages:");
        for message in &fd.message_type {
            println!("  {} ({} fields)", message.name(), message.field.len());
        }
    }

    if !fd.enum_type.is_empty() {
        println!("Enums:");
        for enumeration in &fd.enum_type {
            println!("  {} ({} values)", enumeration.name(), enumeration.value.len());
        }
    }

    if !fd.service.is_empty() {
        println!("Services:");
        for service in &fd.service {
            println!("  {}", service.name());
            for method in &service.method {
                println!(
                    "    {}({}) -> {}",
                    method.name(),
                    method.input_type(),
                    method.output_type()
                );
            }
        }
    }

    Ok(())
}

fn check(
    registry: &DescriptorRegistry,
    manifest_path: &std::path::Path,
    json: bool,
) -> anyhow::Result<()> {
    let manifest = Manifest::load(manifest_path)?;

    let mut descriptor_files = 0;
    for root in manifest.search_paths() {
        descriptor_files += scan::find_descriptor_files(root)?.len();
    }

    let descriptors = registry.file_descriptors()?;
    info!("Descriptor load OK");

    let report = CheckReport {
        search_paths: manifest.search_paths().len(),
        descriptor_files,
        file_descriptors: descriptors.len(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Search paths:     {}", report.search_paths);
        println!("Descriptor files: {}", report.descriptor_files);
        println!("File descriptors: {}", report.file_descriptors);
    }

    Ok(())
}
