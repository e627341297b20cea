//! Source → pipeline → sink glue
//!
//! [`MixSession`] owns its collaborators explicitly; there is no global
//! catalogue session.

use crate::errors::Result;
use crate::io::{ItemSource, OrderSink};
use crate::pipeline::{MixOutcome, Pipeline, PipelineObserver};
use crate::types::MixConfig;

/// Orders one source's items and submits the result to a sink.
#[derive(Debug)]
pub struct MixSession<S, K> {
    source: S,
    sink: K,
}

impl<S: ItemSource, K: OrderSink> MixSession<S, K> {
    pub fn new(source: S, sink: K) -> Self {
        Self { source, sink }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Give back the collaborators
    pub fn into_parts(self) -> (S, K) {
        (self.source, self.sink)
    }

    /// Load, order and submit.
    ///
    /// The ordering is submitted as `collection_name + config.mix_suffix`.
    /// Nothing reaches the sink when any stage fails.
    pub fn run(
        &mut self,
        config: MixConfig,
        observer: &mut impl PipelineObserver,
    ) -> Result<MixOutcome> {
        let pipeline = Pipeline::new(config)?;
        let items = self.source.items()?;
        let outcome = pipeline.run(&items, self.source.schema(), observer)?;

        let name = format!(
            "{}{}",
            self.source.collection_name(),
            pipeline.config().mix_suffix
        );

        #[cfg(feature = "tracing")]
        tracing::info!(name = %name, items = outcome.len(), "submitting ordering");

        self.sink.submit(&name, &outcome.ordered(&items))?;
        Ok(outcome)
    }
}
