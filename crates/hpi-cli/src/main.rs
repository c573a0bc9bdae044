//! `hpigen`: generate the DPI bridge between a SystemVerilog simulator
//! and a Python testbench.
//!
//! The registry is described by JSON manifests passed with a repeatable
//! `-m` option and merged in order; generation renders the whole artifact
//! in memory and writes it only on success, so a failed run leaves no
//! partial output behind.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use hpi_codegen::{gen_wrapper, generate_dpi, launcher};
use hpi_core::WrapperKind;
use hpi_registry::manifest;

#[derive(Parser)]
#[command(name = "hpigen", version, about = "HPI DPI bridge generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the DPI bridge source from registry manifests
    Dpi {
        /// Registry manifest; repeatable, merged in order
        #[arg(short = 'm', long = "module", value_name = "MANIFEST")]
        modules: Vec<PathBuf>,

        /// Output path (defaults to pyhpi_dpi.c)
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Write the fixed HDL wrapper registered for one component type
    Wrapper {
        /// Registry manifest; repeatable, merged in order
        #[arg(short = 'm', long = "module", value_name = "MANIFEST")]
        modules: Vec<PathBuf>,

        /// Component type to select
        #[arg(long, value_name = "NAME")]
        component: String,

        /// Wrapper kind
        #[arg(long, value_name = "KIND", value_parser = parse_wrapper_kind)]
        kind: WrapperKind,

        /// Output path (defaults to <component>.sv or <component>.v)
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Write the fixed launcher assets
    Launcher {
        /// Directory to write into
        #[arg(long, default_value = ".", value_name = "DIR")]
        dir: PathBuf,
    },
}

fn parse_wrapper_kind(s: &str) -> Result<WrapperKind, String> {
    match s {
        "sv-dpi" => Ok(WrapperKind::SvDpi),
        "vl-vpi" => Ok(WrapperKind::VlVpi),
        other => Err(format!(
            "unsupported wrapper kind \"{other}\" (expected sv-dpi or vl-vpi)"
        )),
    }
}

fn main() {
    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Dpi { modules, output } => {
            let registry = manifest::load(&modules)?;
            let output = output.unwrap_or_else(|| PathBuf::from(hpi_codegen::DEFAULT_OUTPUT));
            let filename = output
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| hpi_codegen::DEFAULT_OUTPUT.to_string());
            let command = invocation();

            let artifact = generate_dpi(&registry, &filename, &command)?;
            fs::write(&output, artifact)
                .with_context(|| format!("failed to write {}", output.display()))?;
        }

        Command::Wrapper {
            modules,
            component,
            kind,
            output,
        } => {
            let registry = manifest::load(&modules)?;
            let output =
                output.unwrap_or_else(|| PathBuf::from(kind.default_output(&component)));

            let wrapper = gen_wrapper(&registry, &component, kind)?;
            fs::write(&output, wrapper)
                .with_context(|| format!("failed to write {}", output.display()))?;
        }

        Command::Launcher { dir } => {
            let c_path = dir.join(launcher::LAUNCHER_C_FILE);
            let sv_path = dir.join(launcher::LAUNCHER_SV_FILE);
            fs::write(&c_path, launcher::LAUNCHER_C)
                .with_context(|| format!("failed to write {}", c_path.display()))?;
            fs::write(&sv_path, launcher::LAUNCHER_SV)
                .with_context(|| format!("failed to write {}", sv_path.display()))?;
        }
    }
    Ok(())
}

/// The invocation recorded in the artifact header.
fn invocation() -> String {
    std::env::args().collect::<Vec<_>>().join(" ")
}
