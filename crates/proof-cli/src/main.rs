//! verify-bundle: check a signed-message proof bundle offline.
//!
//! Reads one JSON bundle from the first argument (or stdin) and prints its
//! verdict as JSON on stdout. Logs go to stderr; set `RUST_LOG=debug` to see
//! why a bundle was rejected.
//!
//! Exit status is 0 whenever a verdict was printed, including `"ok":false`.

use std::io::{self, BufRead, Read, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use proof_core::{verify_json_with, Verdict, VerifyOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "verify-bundle")]
#[command(version)]
#[command(about = "Verify Cardano CIP-8 and Solana signature proof bundles offline")]
struct Cli {
    /// Bundle JSON. Read from stdin when omitted or "-".
    bundle: Option<String>,

    /// Require COSE keys to declare OKP / Ed25519 / EdDSA
    #[arg(long)]
    strict_cose_key: bool,

    /// Require a CIP-30 signed address, when present, to equal the bundle address
    #[arg(long)]
    bind_signed_address: bool,

    /// Verify one bundle per input line and print one verdict per line
    #[arg(long)]
    ndjson: bool,

    /// Pretty-print the verdict (ignored with --ndjson)
    #[arg(long)]
    pretty: bool,
}

impl Cli {
    fn options(&self) -> VerifyOptions {
        let mut options = if self.strict_cose_key {
            VerifyOptions::strict()
        } else {
            VerifyOptions::default()
        };
        options.bind_signed_address = self.bind_signed_address;
        options
    }

    fn input(&self) -> Result<String> {
        match self.bundle.as_deref() {
            Some(bundle) if bundle != "-" => Ok(bundle.to_owned()),
            _ => {
                let mut input = String::new();
                io::stdin()
                    .read_to_string(&mut input)
                    .context("failed to read bundle from stdin")?;
                Ok(input)
            }
        }
    }
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let options = cli.options();
    let input = cli.input()?;
    let mut stdout = io::stdout().lock();

    if cli.ndjson {
        let all_parsed = verify_lines(input.as_bytes(), &options, &mut stdout)?;
        return Ok(if all_parsed {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let verdict = verify_json_with(&input, &options).context("could not read bundle")?;
    write_verdict(&mut stdout, &verdict, cli.pretty)?;
    Ok(ExitCode::SUCCESS)
}

/// Verify each non-blank line of `input` as its own bundle.
///
/// Lines that are not JSON still get a verdict line, so output lines stay
/// aligned with input lines. Returns `false` if any line failed to parse.
fn verify_lines<R: BufRead, W: Write>(
    input: R,
    options: &VerifyOptions,
    out: &mut W,
) -> Result<bool> {
    let mut all_parsed = true;
    for (index, line) in input.lines().enumerate() {
        let line = line.context("failed to read input line")?;
        if line.trim().is_empty() {
            continue;
        }
        let verdict = match verify_json_with(&line, options) {
            Ok(verdict) => verdict,
            Err(err) => {
                tracing::warn!(line = index + 1, %err, "skipping unreadable bundle");
                all_parsed = false;
                Verdict::reject(err.to_string())
            }
        };
        write_verdict(out, &verdict, false)?;
    }
    Ok(all_parsed)
}

fn write_verdict<W: Write>(out: &mut W, verdict: &Verdict, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, verdict)?;
    } else {
        serde_json::to_writer(&mut *out, verdict)?;
    }
    writeln!(out)?;
    Ok(())
}
