use crate::core::Pipeline;
use crate::domain::model::{SplitOutput, SplitReport};
use crate::utils::error::Result;
use std::time::Instant;

pub struct SplitEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> SplitEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Read and split without touching the destination folder.
    pub fn plan(&self) -> Result<SplitOutput> {
        tracing::info!("Reading source...");
        let document = self.pipeline.extract()?;
        tracing::info!("Read {} lines", document.len());

        tracing::info!("Splitting...");
        let output = self.pipeline.transform(document)?;
        tracing::info!(
            "Found {} sections, {} files to write",
            output.section_count,
            output.files.len()
        );

        Ok(output)
    }

    pub fn run(&self) -> Result<SplitReport> {
        let started = Instant::now();

        let output = self.plan()?;

        tracing::info!("Writing files...");
        let report = self.pipeline.load(output)?;
        tracing::info!(
            "Wrote {} files to {} in {:?}",
            report.files_written,
            report.output_dir.display(),
            started.elapsed()
        );

        Ok(report)
    }
}
