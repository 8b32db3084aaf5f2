use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for glyphgrid")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every gate: fmt, clippy, tests, doc, then the CLI smoke run
    Check,
    /// cargo fmt --check over the workspace
    Fmt,
    /// clippy with warnings denied
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Drive the CLI through every camera mode and check it exits cleanly
    Smoke,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            fmt()?;
            clippy()?;
            test()?;
            doc()?;
            smoke()?;
        }
        Commands::Fmt => fmt()?,
        Commands::Clippy => clippy()?,
        Commands::Test => test()?,
        Commands::Doc => doc()?,
        Commands::Smoke => smoke()?,
    }

    Ok(())
}

/// Run `cargo <args>` and fail with `step` if it does not succeed.
fn cargo(step: &str, args: &[&str]) -> Result<()> {
    println!("==> {step}");
    let status = Command::new("cargo")
        .args(args)
        .status()
        .with_context(|| format!("spawning cargo for {step}"))?;
    if !status.success() {
        anyhow::bail!("{step} failed ({status})");
    }
    Ok(())
}

fn fmt() -> Result<()> {
    cargo("cargo fmt --check", &["fmt", "--all", "--", "--check"])
}

fn clippy() -> Result<()> {
    cargo(
        "cargo clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    )
}

fn test() -> Result<()> {
    cargo("cargo test", &["test", "--workspace"])
}

fn doc() -> Result<()> {
    cargo("cargo doc", &["doc", "--workspace", "--no-deps"])
}

fn smoke() -> Result<()> {
    for mode in ["auto_fit", "free_flight", "first_person", "third_person"] {
        cargo(
            &format!("glyphgrid-cli simulate --mode {mode}"),
            &[
                "run",
                "--quiet",
                "-p",
                "glyphgrid-cli",
                "--",
                "simulate",
                "--frames",
                "90",
                "--mode",
                mode,
                "--hold",
                "w",
                "--press",
                "45:plus",
                "--look",
                "3,1",
                "--json",
            ],
        )?;
    }
    cargo(
        "glyphgrid-cli fit",
        &["run", "--quiet", "-p", "glyphgrid-cli", "--", "fit", "-n", "200", "--spacing", "20"],
    )
}
