use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Parse -> filter -> write. Any stage error ends the run.
    pub fn run(&self) -> Result<String> {
        tracing::info!("🚀 Starting invite run");

        // Extract
        tracing::info!("📥 Reading customer data...");
        let customers = self.pipeline.extract()?;
        tracing::info!("Parsed {} customers", customers.len());

        // Transform
        tracing::info!("📏 Selecting customers within range...");
        let result = self.pipeline.transform(customers)?;
        tracing::info!(
            "{} of {} customers are within range",
            result.invites.len(),
            result.customers_considered
        );

        // Load
        tracing::info!("💾 Writing invite list...");
        let output_path = self.pipeline.load(result)?;
        tracing::info!("📁 Output saved to: {}", output_path);

        Ok(output_path)
    }
}
