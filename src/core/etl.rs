use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Runs a pipeline phase by phase, with optional system stats per phase.
pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(pipeline: P, enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Extracting data...");
        let raw = self.pipeline.extract().await?;
        self.monitor.log_stats("extract");

        tracing::info!("Transforming data...");
        let prepared = self.pipeline.transform(raw).await?;
        self.monitor.log_stats("transform");

        tracing::info!("Loading data...");
        let output = self.pipeline.load(prepared).await?;
        self.monitor.log_stats("load");
        self.monitor.log_final_stats();

        Ok(output)
    }
}
