use std::io::{self, IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use prompt_bom_core::pipeline::ValidationReport;
use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(json: bool) {
    JSON_MODE.store(json, Ordering::Relaxed);
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

pub fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    println!("{s}");
    Ok(())
}

/// A one-line human message on stdout; in JSON mode `value` is printed instead.
pub fn status<T: Serialize>(msg: &str, value: &T) -> anyhow::Result<()> {
    if is_json() {
        return print(value);
    }
    let mut out = stdout();
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(out, "OK")?;
    out.reset()?;
    writeln!(out, ": {msg}")?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct ReportOut<'a> {
    ok: bool,
    #[serde(flatten)]
    report: &'a ValidationReport,
}

/// Print a validation report: a summary line when valid, one line per
/// violation on stderr otherwise.
pub fn report(report: &ValidationReport) -> anyhow::Result<()> {
    if is_json() {
        return print(&ReportOut {
            ok: report.is_valid(),
            report,
        });
    }
    if report.is_valid() {
        return status("schema and semantic checks passed", &());
    }
    let mut err = stderr();
    for line in report.lines() {
        err.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
        writeln!(err, "{line}")?;
        err.reset()?;
    }
    Ok(())
}

fn choice(is_terminal: bool) -> ColorChoice {
    if is_terminal {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

pub fn stdout() -> StandardStream {
    StandardStream::stdout(choice(io::stdout().is_terminal()))
}

pub fn stderr() -> StandardStream {
    StandardStream::stderr(choice(io::stderr().is_terminal()))
}
