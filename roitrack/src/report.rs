//! Line-oriented reporting of the tracked region to a consumer process
//!
//! The consumer reads one line per frame from our stdout pipe. Only the first
//! successful tracker is reported and every line is flushed immediately.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;

use crate::bbox::NormalizedBbox;
use crate::error::Result;
use crate::tracker::{Frame, TrackResult};

/// Wire format of a reported box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `(x, y, w, h)`, split on parentheses and commas by the consumer
    #[default]
    Tuple,
    /// One JSON object per line
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tuple" => Ok(Self::Tuple),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{}', expected tuple or json", other)),
        }
    }
}

#[derive(Serialize)]
struct JsonLine<'a> {
    tracker: &'a str,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

/// Writes the normalized box of the first successful tracker
pub struct Reporter<W: Write> {
    out: W,
    format: OutputFormat,
    lines_written: u64,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            lines_written: 0,
        }
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Report the first result, normalized by the frame it was measured on.
    /// Returns the reported box, or `None` when nothing was tracked.
    pub fn report<F: Frame>(
        &mut self,
        results: &[TrackResult],
        frame: &F,
    ) -> Result<Option<NormalizedBbox>> {
        let Some(first) = results.first() else {
            return Ok(None);
        };

        let norm = first.bbox.normalized(frame.width(), frame.height());
        let line = match self.format {
            OutputFormat::Tuple => format_tuple(&norm),
            OutputFormat::Json => serde_json::to_string(&JsonLine {
                tracker: first.kind.name(),
                x: norm.x,
                y: norm.y,
                width: norm.width,
                height: norm.height,
            })
            .map_err(std::io::Error::from)?,
        };

        writeln!(self.out, "{}", line)?;
        self.out.flush()?;
        self.lines_written += 1;
        Ok(Some(norm))
    }
}

/// Float tuple with a decimal point on every value, e.g. `(0.5, 1.0, 0.1, 0.25)`
pub fn format_tuple(norm: &NormalizedBbox) -> String {
    // f64's Debug output is the shortest round-trip form and keeps ".0"
    format!(
        "({:?}, {:?}, {:?}, {:?})",
        norm.x, norm.y, norm.width, norm.height
    )
}
