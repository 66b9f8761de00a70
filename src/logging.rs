//! Log sink setup.
//!
//! Every line looks like `[2026-01-31 12:00:00][INFO]: message`. Lines always
//! go to stdout; with `persist` enabled they are also appended to the log
//! file behind a mutex so concurrent connections never interleave output.

use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Context;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::format::{DefaultFields, Writer};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats events as `[timestamp][LEVEL]: message fields`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat;

pub fn level_label(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "TRACE",
        Level::DEBUG => "DEBUG",
        Level::INFO => "INFO",
        Level::WARN => "WARNING",
        Level::ERROR => "ERROR",
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let now = chrono::Local::now().format(TIMESTAMP_FORMAT);
        write!(writer, "[{}][{}]: ", now, level_label(event.metadata().level()))?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Installs the process-wide subscriber. Call once, before serving.
pub fn init(cfg: &LoggingConfig) -> anyhow::Result<()> {
    subscriber(cfg)?
        .try_init()
        .context("logger already initialised")?;
    Ok(())
}

/// Plain-text `LineFormat` layer; no ANSI styling on field names.
fn line_layer<S, W>(writer: W) -> fmt::Layer<S, DefaultFields, LineFormat, W>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + 'static,
{
    tracing_subscriber::fmt::layer()
        .event_format(LineFormat)
        .with_ansi(false)
        .with_writer(writer)
}

/// Builds the stdout (+ optional file) subscriber without installing it.
pub fn subscriber(cfg: &LoggingConfig) -> anyhow::Result<impl Subscriber + Send + Sync + 'static> {
    let level: LevelFilter = cfg
        .level
        .parse()
        .with_context(|| format!("unknown log level: {}", cfg.level))?;

    let stdout_layer = line_layer(std::io::stdout);

    let file_layer = if cfg.persist {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&cfg.file)
            .with_context(|| format!("opening log file {}", cfg.file.display()))?;
        Some(line_layer(Mutex::new(file)))
    } else {
        None
    };

    Ok(tracing_subscriber::registry()
        .with(level)
        .with(stdout_layer)
        .with(file_layer))
}
