use sdc_engine::Engine;
use sdc_files::{classify, FileKind, OutputFile};
use tracing::{debug, info};

use crate::{Pipeline, PipelineError};

impl<E: Engine> Pipeline<E> {
    /// Transform a whole batch.
    ///
    /// Files are handled strictly left to right. Pass-through and transformed
    /// files keep the relative order of their inputs; a regenerated map comes
    /// right after its script. Every map lookup goes against the original
    /// batch. The first failure aborts the batch.
    pub fn transform_batch(&self, batch: &[OutputFile]) -> Result<Vec<OutputFile>, PipelineError> {
        let mut output = Vec::with_capacity(batch.len());
        let (mut transformed, mut dropped) = (0usize, 0usize);

        for file in batch {
            match classify(&file.name) {
                FileKind::Script => {
                    output.extend(self.transform_file(file, batch)?);
                    transformed += 1;
                }
                FileKind::SourceMap => {
                    debug!(name = %file.name, "dropping input source map");
                    dropped += 1;
                }
                FileKind::Other => output.push(file.clone()),
            }
        }

        info!(
            inputs = batch.len(),
            outputs = output.len(),
            transformed,
            dropped,
            "batch done"
        );
        Ok(output)
    }

    /// Async entry point for build orchestrators. The work itself is
    /// synchronous and never yields mid-batch.
    pub async fn run(&self, batch: &[OutputFile]) -> Result<Vec<OutputFile>, PipelineError> {
        self.transform_batch(batch)
    }
}
