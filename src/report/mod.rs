//! JSON summary of a completed run.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::batch::BatchOutcome;
use crate::config::ResizeConfig;
use crate::error::Result;
use crate::pipeline::{BatchStats, ResizeResult};

/// Serializable summary of a successful run.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    /// Tool name and version.
    pub tool: String,
    /// Configuration the run used.
    pub config: &'a ResizeConfig,
    /// Geometry string passed to the converter.
    pub resize_spec: String,
    /// Per-file results in processing order.
    pub files: &'a [ResizeResult],
    /// Aggregate statistics.
    pub stats: &'a BatchStats,
}

impl<'a> RunReport<'a> {
    /// Build a report for `outcome` produced with `config`.
    pub fn new(config: &'a ResizeConfig, outcome: &'a BatchOutcome) -> Self {
        Self {
            tool: crate::version::full_version(),
            config,
            resize_spec: config.resize_spec(),
            files: &outcome.results,
            stats: &outcome.stats,
        }
    }

    /// Write the report as pretty-printed JSON to `writer`.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Write the report to a file, replacing it if present.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        log::debug!("Report written to {}", path.display());
        Ok(())
    }
}
