use crate::assemble::Dataset;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::io::Write;

impl Dataset {
    /// Write the table as CSV, header row first.
    ///
    /// Infinite and undefined ratios are written as `inf` and `NaN`, and
    /// unreported counters as empty cells.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        for row in self {
            csv.serialize(row).or_raise(|| ErrorKind::Export)?;
        }
        csv.flush().or_raise(|| ErrorKind::Export)?;
        tracing::debug!(rows = self.len(), "Exported dataset as CSV");
        Ok(())
    }
}
