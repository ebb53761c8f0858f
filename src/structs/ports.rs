use super::traits::Verify;
use super::Result;

/// Port wiring between the container and the cluster facing service
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ports {
    /// Port the process listens on
    pub container_port: i32,
    /// Port the service exposes inside the cluster
    pub service_port: i32,
}

fn verify_port(name: &str, port: i32) -> Result<()> {
    if port < 1 || port > 65535 {
        bail!("{} must be between 1 and 65535 - got {}", name, port);
    }
    Ok(())
}

impl Verify for Ports {
    fn verify(&self) -> Result<()> {
        verify_port("containerPort", self.container_port)?;
        verify_port("servicePort", self.service_port)?;
        Ok(())
    }
}
