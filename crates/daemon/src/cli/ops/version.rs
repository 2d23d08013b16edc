use clap::Args;

use common::build_info;

/// Print build information for this binary.
#[derive(Args, Debug, Clone)]
pub struct Version {
    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum VersionError {
    #[error("failed to encode build info: {0}")]
    Encode(#[from] serde_json::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Version {
    type Error = VersionError;
    type Output = String;

    async fn execute(&self, _ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let info = build_info!();
        if self.json {
            return Ok(serde_json::to_string_pretty(&info)?);
        }
        Ok(info.to_string())
    }
}
