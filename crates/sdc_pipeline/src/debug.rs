use std::future::Future;

use futures_util::future::try_join_all;
use futures_util::TryFutureExt;
use sdc_engine::Engine;
use sdc_files::OutputFile;

use crate::{Pipeline, PipelineError};

impl<E: Engine> Pipeline<E> {
    /// [`run`](Pipeline::run) with side-effecting hooks around it.
    ///
    /// `on_input` runs for every input file and `on_output` for every result
    /// file. Each set of hooks runs concurrently and must finish before the
    /// next step starts. The first failing hook fails the whole call. The
    /// result is returned exactly as `run` produced it.
    pub async fn run_debug<I, FI, O, FO>(
        &self,
        batch: &[OutputFile],
        on_input: I,
        on_output: O,
    ) -> Result<Vec<OutputFile>, PipelineError>
    where
        I: Fn(&OutputFile) -> FI,
        FI: Future<Output = anyhow::Result<()>>,
        O: Fn(&OutputFile) -> FO,
        FO: Future<Output = anyhow::Result<()>>,
    {
        run_hooks("input", batch, on_input).await?;
        let result = self.run(batch).await?;
        run_hooks("output", &result, on_output).await?;
        Ok(result)
    }
}

async fn run_hooks<H, F>(
    stage: &'static str,
    files: &[OutputFile],
    hook: H,
) -> Result<(), PipelineError>
where
    H: Fn(&OutputFile) -> F,
    F: Future<Output = anyhow::Result<()>>,
{
    try_join_all(files.iter().map(|file| {
        let name = file.name.clone();
        hook(file).map_err(move |source| PipelineError::Hook { stage, name, source })
    }))
    .await?;
    Ok(())
}
