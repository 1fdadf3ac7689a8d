//! Tracing formatter that stamps every line with the host loop's tick.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use time::macros::format_description;
use time::{format_description::FormatItem, OffsetDateTime};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, FormattedFields};
use tracing_subscriber::registry::LookupSpan;

static TICK_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Ticks wrap at 16 bits in the prefix so it stays fixed-width.
const TICK_DISPLAY_MASK: u64 = 0xFFFF;

const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second].[subsecond digits:3]");

/// Event formatter producing `HH:MM:SS.sss 0xTICK LEVEL spans target: fields`.
///
/// The tick stamp correlates log lines with simulation frames without
/// threading a counter through every call site; the host loop advances it
/// once per frame via [`increment_tick`].
pub struct TickFormatter;

impl<S, N> FormatEvent<S, N> for TickFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let meta = event.metadata();

        let timestamp = OffsetDateTime::now_utc().format(&TIMESTAMP_FORMAT).map_err(|_| fmt::Error)?;
        styled(&mut writer, DIM, timestamp)?;
        writer.write_char(' ')?;

        styled(&mut writer, DIM, format_args!("0x{:04X}", tick_count() & TICK_DISPLAY_MASK))?;
        writer.write_char(' ')?;

        write_level(&mut writer, meta.level())?;
        writer.write_char(' ')?;

        if let Some(scope) = ctx.event_scope() {
            let mut wrote_any = false;
            for span in scope.from_root() {
                styled(&mut writer, BOLD, span.metadata().name())?;
                let extensions = span.extensions();
                if let Some(fields) = extensions.get::<FormattedFields<N>>() {
                    if !fields.is_empty() {
                        styled(&mut writer, BOLD, "{")?;
                        write!(writer, "{fields}")?;
                        styled(&mut writer, BOLD, "}")?;
                    }
                }
                styled(&mut writer, DIM, ":")?;
                wrote_any = true;
            }
            if wrote_any {
                writer.write_char(' ')?;
            }
        }

        styled(&mut writer, DIM, format_args!("{}:", meta.target()))?;
        writer.write_char(' ')?;

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

const DIM: &str = "2";
const BOLD: &str = "1";

/// Wraps `text` in an ANSI style when the writer supports escapes.
fn styled(writer: &mut Writer<'_>, code: &str, text: impl fmt::Display) -> fmt::Result {
    if writer.has_ansi_escapes() {
        write!(writer, "\x1b[{code}m{text}\x1b[0m")
    } else {
        write!(writer, "{text}")
    }
}

/// Five-character level column matching tracing's own `Full` format.
fn write_level(writer: &mut Writer<'_>, level: &Level) -> fmt::Result {
    match *level {
        Level::TRACE => styled(writer, "35", "TRACE"),
        Level::DEBUG => styled(writer, "34", "DEBUG"),
        Level::INFO => styled(writer, "32", " INFO"),
        Level::WARN => styled(writer, "33", " WARN"),
        Level::ERROR => styled(writer, "31", "ERROR"),
    }
}

/// Advances the tick stamp. The host loop calls this once per frame.
pub fn increment_tick() {
    TICK_COUNTER.fetch_add(1, Ordering::Relaxed);
}

/// Current value of the tick stamp.
pub fn tick_count() -> u64 {
    TICK_COUNTER.load(Ordering::Relaxed)
}
