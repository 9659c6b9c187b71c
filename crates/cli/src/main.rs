// ABOUTME: CLI for running the lyrix extraction pipeline over a saved lyrics page.
// ABOUTME: Reads HTML from a file or stdin and prints lyrics text, result JSON or a slide deck.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use lyrix_extract::{Client, PipelineResult, RetrievalResult, SourceTag};
use lyrix_slides::{Deck, FontCase};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lyrix")]
#[command(about = "Extract slide-ready lyrics from a saved lyrics page")]
struct Args {
    /// Page URL; its host selects the extraction strategy
    #[arg(long = "url")]
    url: String,

    /// HTML file to read (default: stdin)
    #[arg(long = "html")]
    html: Option<PathBuf>,

    /// Print the full result as JSON, including variants and diagnostics
    #[arg(long = "json")]
    json_output: bool,

    /// Print only one language variant (telugu or english)
    #[arg(long = "variant")]
    variant: Option<String>,

    /// Print the slide deck as JSON
    #[arg(long = "slides")]
    slides: bool,

    /// Letter case for slide text: normal, upper, lower, capitalize
    #[arg(long = "case", default_value = "normal")]
    case: FontCase,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Print elapsed time in ms to stderr
    #[arg(long = "timing")]
    timing: bool,

    /// Extra CSS selector to strip before reading text (repeatable)
    #[arg(long = "noise")]
    noise: Vec<String>,

    /// Log pipeline stages to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_page(path: Option<&PathBuf>) -> Result<RetrievalResult> {
    let bytes = match path {
        Some(path) => fs::read(path).with_context(|| format!("reading {:?}", path))?,
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };
    debug!(bytes = bytes.len(), "html loaded");
    Ok(RetrievalResult::from_bytes(&bytes, None, SourceTag::Fetch))
}

/// Picks the text the user asked for: a single variant or the default lyrics.
fn selected_text<'a>(result: &'a PipelineResult, variant: Option<&str>) -> Result<&'a str> {
    match variant {
        Some(language) => result
            .variant(language)
            .ok_or_else(|| anyhow!("no {} variant found", language)),
        None => Ok(result.lyrics.as_str()),
    }
}

fn format_output(result: &PipelineResult, args: &Args) -> Result<String> {
    if args.slides {
        let text = selected_text(result, args.variant.as_deref())?;
        let deck = Deck::from_lyrics(text, args.case)?;
        return Ok(serde_json::to_string_pretty(&deck)?);
    }
    if args.json_output {
        return Ok(serde_json::to_string_pretty(result)?);
    }
    Ok(selected_text(result, args.variant.as_deref())?.to_string())
}

fn run(args: &Args) -> Result<()> {
    let mut builder = Client::builder();
    for css in &args.noise {
        builder = builder.noise_selector(css.as_str());
    }
    let client = builder.build()?;

    let page = read_page(args.html.as_ref())?;
    let result = client.extract(&page, &args.url)?;
    let output = format_output(&result, args)?;

    match &args.output {
        Some(path) => fs::write(path, &output).with_context(|| format!("writing {:?}", path))?,
        None => println!("{}", output),
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let start = Instant::now();
    let outcome = run(&args);
    let elapsed = start.elapsed();

    if args.timing {
        let _ = writeln!(io::stderr(), "elapsed: {}ms", elapsed.as_millis());
    }

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(1)
        }
    }
}
