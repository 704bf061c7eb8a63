use anyhow::{Context, Result};
use clap::{ArgAction, Parser as ClapParser, ValueEnum};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use textmarkup_cli::save_stages;
use textmarkup_core::{
    DebugConfig, HtmlRenderer, MarkupConfig, OutputFormat, Parser, Recorder,
};

#[derive(ClapParser)]
#[command(name = "textmarkup", version)]
#[command(about = "Convert plain-text documents to HTML")]
struct Args {
    /// Text file to convert (reads standard input if not specified)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file path (writes standard output if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to custom config file (YAML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format, overriding the config file
    #[arg(short = 'f', long, value_enum)]
    format: Option<FormatArg>,

    /// Document title placed in the HTML head
    #[arg(long)]
    title: Option<String>,

    /// Disable every inline substitution (emphasis, links, mail)
    #[arg(long)]
    no_filters: bool,

    /// Log time spent splitting, filtering and classifying
    #[arg(long)]
    profile: bool,

    /// Trace blocks matching a pattern (regex or plain text); repeatable
    #[arg(long = "debug", value_name = "PATTERN")]
    debug_patterns: Vec<String>,

    /// Dump all intermediate pipeline stage outputs to a directory
    /// Captures: blocks, filtered blocks, classifications, events and HTML
    #[arg(long)]
    dump_stages: bool,

    /// Directory for stage dump output
    #[arg(long, default_value = "test_outputs/stages")]
    stages_dir: PathBuf,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Html,
    Events,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Html => OutputFormat::Html,
            FormatArg::Events => OutputFormat::Events,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    let mut config = MarkupConfig::discover(args.config.as_deref());

    // Apply CLI overrides to config
    if let Some(title) = &args.title {
        config.document_title = title.clone();
    }
    if let Some(format) = args.format {
        config.output_format = format.into();
    }
    if args.no_filters {
        config.pipeline.disable_all();
    }

    let input_name = args
        .input
        .as_deref()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .unwrap_or("<stdin>")
        .to_string();
    log::info!("📄 Converting: {input_name}");

    let reader = open_input(args.input.as_deref())?;
    let mut out = open_output(args.output.as_deref())?;

    // Stage dump mode: capture and save all intermediates
    if args.dump_stages {
        log::info!("🔬 Pipeline stage dump mode");
        let renderer = HtmlRenderer::with_title(Vec::new(), config.document_title.as_str());
        let mut parser = configure(Parser::standard(&config)?.with_handler(renderer), &args);
        let stages = parser.parse_capture_stages(reader)?;
        let html = parser
            .into_handler()
            .map(HtmlRenderer::into_string)
            .unwrap_or_default();

        save_stages(&stages, &html, &input_name, &args.stages_dir)?;
        log::info!("✅ All stages dumped to: {}", args.stages_dir.display());

        out.write_all(html.as_bytes())?;
        out.flush()?;
        return Ok(());
    }

    match config.output_format {
        OutputFormat::Html => {
            let renderer = HtmlRenderer::with_title(out, config.document_title.as_str());
            let mut parser = configure(Parser::standard(&config)?.with_handler(renderer), &args);
            parser.parse(reader)?;
        }
        OutputFormat::Events => {
            // Record around the HTML renderer so substitutions carry real
            // replacements; the rendered text itself is discarded.
            let renderer = HtmlRenderer::with_title(io::sink(), config.document_title.as_str());
            let mut parser = configure(
                Parser::standard(&config)?.with_handler(Recorder::new(renderer)),
                &args,
            );
            parser.parse(reader)?;
            let events = parser
                .into_handler()
                .map(Recorder::into_events)
                .unwrap_or_default();
            serde_json::to_writer_pretty(&mut out, &events)?;
            writeln!(out)?;
            out.flush()?;
        }
    }

    log::info!("✅ Successfully converted {input_name}");
    Ok(())
}

fn configure<H: textmarkup_core::Handler>(mut parser: Parser<H>, args: &Args) -> Parser<H> {
    if !args.debug_patterns.is_empty() {
        parser.set_debug_config(DebugConfig::new(true, args.debug_patterns.clone()));
    }
    parser.enable_profiling(args.profile);
    parser
}

/// stderr only: stdout carries the converted document
fn init_logging(args: &Args) {
    let mut verbosity = args.verbose;
    if args.profile {
        verbosity = verbosity.max(1);
    }
    if !args.debug_patterns.is_empty() {
        verbosity = verbosity.max(2);
    }
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .init();
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

fn open_output(path: Option<&Path>) -> Result<BufWriter<Box<dyn Write>>> {
    let sink: Box<dyn Write> = match path {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("Failed to create output {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    Ok(BufWriter::new(sink))
}
