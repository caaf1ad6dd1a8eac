//! Renders a defense document from a template and a JSON case record.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use descargo::{Engine, Value};

#[derive(Parser)]
#[command(name = "descargo")]
#[command(version)]
#[command(about = "Render a defense document from a template and a case record", long_about = None)]
struct Cli {
    /// Template text file
    #[arg(short = 't', long)]
    template: PathBuf,

    /// JSON file with the case data
    #[arg(short = 'c', long = "case")]
    case: PathBuf,

    /// Write output to FILE (use '--output -' for stdout)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Fail if placeholders or conditional tags remain unresolved
    #[arg(long)]
    strict: bool,

    /// Fail if an IF tag is never closed
    #[arg(long)]
    deny_unclosed: bool,

    /// Default for a top-level field (KEY=VALUE), used only if the case lacks it
    #[arg(short = 'D', long = "define", value_name = "KEY=VALUE", value_parser = parse_define)]
    defines: Vec<(String, Value)>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "descargo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let today = chrono::Local::now().date_naive();
    run(&cli, today)
}

fn run(cli: &Cli, today: NaiveDate) -> Result<()> {
    let source = fs::read_to_string(&cli.template)
        .with_context(|| format!("failed to read template `{}`", cli.template.display()))?;

    let mut ctx = load_case(&cli.case)?;
    apply_defaults(&mut ctx, &cli.defines, today);

    let mut engine = Engine::new();
    engine
        .set_strict(cli.strict)
        .set_allow_unclosed(!cli.deny_unclosed);

    let out = engine
        .render(&source, &ctx)
        .with_context(|| format!("failed to render `{}`", cli.template.display()))?;

    match &cli.output {
        Some(path) if path.as_os_str() == "-" => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(out.as_bytes())?;
            stdout.flush()?;
        }
        output => {
            let path = output
                .clone()
                .unwrap_or_else(|| default_output(&ctx, today));
            write_output(&path, &out)?;
            info!(path = %path.display(), "rendered");
        }
    }
    Ok(())
}

fn load_case(path: &Path) -> Result<Value> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read case record `{}`", path.display()))?;
    let ctx: Value = serde_json::from_str(&data)
        .with_context(|| format!("failed to parse case record `{}`", path.display()))?;
    if !matches!(ctx, Value::Map(_)) {
        bail!("case record `{}` must be a JSON object", path.display());
    }
    Ok(ctx)
}

/// Fills in fields the case record left out. Explicit `--define` values come
/// first, then the presentation date defaults to today.
fn apply_defaults(ctx: &mut Value, defines: &[(String, Value)], today: NaiveDate) {
    for (key, value) in defines {
        if !ctx.set_default(key.as_str(), value.clone()) {
            debug!(key = key.as_str(), "case record already sets field");
        }
    }
    ctx.set_default("FECHA_PRESENTACION", today.format("%Y-%m-%d").to_string());
}

/// `DESCARGO_<NRO_ACTA>_<date>.txt` in the current directory.
fn default_output(ctx: &Value, today: NaiveDate) -> PathBuf {
    let acta = descargo::substitute("{{ NRO_ACTA }}", ctx);
    let acta = if acta.trim().is_empty() {
        String::from("SIN_ACTA")
    } else {
        acta.trim().replace(['/', '\\'], "_")
    };
    PathBuf::from(format!("DESCARGO_{}_{}.txt", acta, today.format("%Y-%m-%d")))
}

fn write_output(path: &Path, out: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory `{}`", parent.display()))?;
    }
    fs::write(path, out).with_context(|| format!("failed to write `{}`", path.display()))
}

fn parse_define(s: &str) -> std::result::Result<(String, Value), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, found `{s}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in `{s}`"));
    }
    Ok((key.to_owned(), Value::parse_literal(value)))
}
