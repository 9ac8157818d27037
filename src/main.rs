// SPDX-License-Identifier: MPL-2.0
use bucket_lens::app::GalleryController;
use bucket_lens::config::{self, Config};
use bucket_lens::error::{Error, Result};
use bucket_lens::infrastructure::HttpBucket;
use bucket_lens::media::format_file_size;
use chrono::NaiveDate;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
BucketLens - browse the images of an S3-compatible bucket

USAGE:
  bucket_lens [OPTIONS]

OPTIONS:
  --endpoint URL       Bucket URL (overrides the config file)
  --config PATH        Read settings from PATH instead of the default location
  --date YYYY-MM-DD    Only show images from that day (`all` for every day)
  --pages N            Number of pages to print [default: 1]
  --dates              List the days that have images and exit
  -h, --help           Print this help
";

/// Which days to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateArg {
    All,
    Day(NaiveDate),
}

fn parse_date(value: &str) -> std::result::Result<DateArg, String> {
    if value.eq_ignore_ascii_case("all") {
        return Ok(DateArg::All);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(DateArg::Day)
        .map_err(|e| format!("invalid date {value:?}: {e}"))
}

struct Flags {
    endpoint: Option<String>,
    config_path: Option<PathBuf>,
    date: Option<DateArg>,
    pages: usize,
    list_dates: bool,
}

fn parse_flags() -> std::result::Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let flags = Flags {
        endpoint: args.opt_value_from_str("--endpoint")?,
        config_path: args.opt_value_from_str("--config")?,
        date: args.opt_value_from_fn("--date", parse_date)?,
        pages: args.opt_value_from_str::<_, usize>("--pages")?.unwrap_or(1),
        list_dates: args.contains("--dates"),
    };

    let rest = args.finish();
    if !rest.is_empty() {
        tracing::warn!(?rest, "ignoring unexpected arguments");
    }
    Ok(Some(flags))
}

fn load_config(flags: &Flags) -> Result<Config> {
    let mut config = match &flags.config_path {
        Some(path) => config::load_from_path(path)?,
        None => config::load()?,
    };
    if let Some(endpoint) = &flags.endpoint {
        config.endpoint = Some(endpoint.clone());
    }
    Ok(config)
}

async fn run(flags: Flags) -> Result<()> {
    let config = load_config(&flags)?;
    let endpoint = config.endpoint.clone().ok_or_else(|| {
        Error::Config("no endpoint configured; pass --endpoint or set it in settings.toml".into())
    })?;

    let bucket = HttpBucket::new(&endpoint, config.user_agent())?;
    let mut controller = GalleryController::new(Arc::new(bucket), &config);

    let report = controller.refresh().await?;
    for dropped in &report.dropped {
        eprintln!("skipped {}: {}", dropped.key, dropped.reason);
    }

    if flags.list_dates {
        for day in controller.dates().iter() {
            println!("{day}  {}", controller.gallery().count_on(day));
        }
        return Ok(());
    }

    if let Some(DateArg::Day(day)) = flags.date {
        controller.select_date(Some(day));
    }

    for _ in 1..flags.pages.max(1) {
        if !controller.load_more() {
            break;
        }
    }

    for record in controller.visible() {
        println!(
            "{}  {:>10}  {}",
            record.last_modified.format("%Y-%m-%d %H:%M"),
            format_file_size(record.size),
            controller.image_url(&record.key)
        );
    }
    println!(
        "{} of {} images shown{}",
        controller.visible().len(),
        controller.filtered_len(),
        if controller.has_more() { ", more available" } else { "" }
    );
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bucket_lens=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{e}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    match run(flags).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
