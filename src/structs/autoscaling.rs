// AutoScaling types roughly as defined in kubernetes autoscaling/v1
// https://github.com/kubernetes/kubernetes/blob/master/pkg/apis/autoscaling/types.go

use super::traits::Verify;
use super::Result;

/// Configuration parameters for HorizontalPodAutoScaler
///
/// Only cpu utilization is supported as a target.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct AutoScaling {
    /// Whether an autoscaler is generated at all
    pub enabled: bool,
    #[serde(default)]
    pub minReplicas: i32,
    #[serde(default)]
    pub maxReplicas: i32,
    /// Average cpu utilization across pods, as a percentage of requested cpu
    #[serde(default)]
    pub targetCPUUtilizationPercentage: i32,
}

impl Verify for AutoScaling {
    fn verify(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        if self.minReplicas < 1 {
            bail!("minReplicas must be at least 1");
        }
        if self.minReplicas > self.maxReplicas {
            bail!("maxReplicas ({}) must be >= minReplicas ({})", self.maxReplicas, self.minReplicas);
        }
        if self.targetCPUUtilizationPercentage < 1 {
            bail!("targetCPUUtilizationPercentage must be at least 1");
        }
        Ok(())
    }
}
