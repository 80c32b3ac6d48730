//! Run subcommand handler: read raw items, normalize, write JSON-Lines.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Args;
use serde_json::Value;
use tracing::info;

use postnorm::{Config, ContentKind, Extractor, JsonlRecorder, UserParams};

#[derive(Args)]
pub struct RunArgs {
    /// Content kind tag (user-timeline, single-work, comment, live,
    /// general-search, user-search, trending).
    #[arg(long)]
    pub kind: String,

    /// Input file holding a JSON array of raw items.
    #[arg(long)]
    pub input: PathBuf,

    /// Output JSON-Lines file; stdout when omitted.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Account nickname used in post mode.
    #[arg(long, default_value = "")]
    pub nickname: String,

    /// Account label; defaults to the nickname when blank.
    #[arg(long, default_value = "")]
    pub mark: String,

    /// Inclusive window start, YYYY-MM-DD; 1970-01-01 when omitted.
    #[arg(long)]
    pub earliest: Option<NaiveDate>,

    /// Inclusive window end, YYYY-MM-DD; today when omitted.
    #[arg(long)]
    pub latest: Option<NaiveDate>,

    /// Use the caller identity instead of each item's author block.
    #[arg(long)]
    pub post: bool,

    /// Override the configured date format for this run.
    #[arg(long)]
    pub date_format: Option<String>,
}

#[cfg(not(tarpaulin_include))]
pub fn handle(args: RunArgs, config: &Config) -> Result<()> {
    let kind: ContentKind = args.kind.parse()?;

    let content = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read input: {}", args.input.display()))?;
    let items: Vec<Value> = serde_json::from_str(&content)
        .with_context(|| format!("Input must be a JSON array of items: {}", args.input.display()))?;

    let params = UserParams {
        nickname: args.nickname,
        mark: args.mark,
        earliest: args
            .earliest
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch date")),
        latest: args.latest.unwrap_or_else(|| Local::now().date_naive()),
        post: args.post,
    };

    let date_format = args.date_format.as_deref().unwrap_or(&config.date_format);
    let extractor = Extractor::new(date_format);

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Failed to create output: {}", path.display())
        })?)),
        None => Box::new(io::stdout().lock()),
    };
    let mut recorder = JsonlRecorder::new(sink);

    let records = extractor.run(kind, &items, &mut recorder, &params)?;
    recorder.into_inner()?;

    info!(
        kind = %kind,
        input = items.len(),
        output = records.len(),
        "batch normalized"
    );
    Ok(())
}
