use k8s_openapi::api::core::v1::Probe;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

use super::traits::Verify;
use super::Result;

// Probes are passed verbatim into the container spec, we only reject
// the ones kubernetes would refuse anyway.
impl Verify for Probe {
    fn verify(&self) -> Result<()> {
        let handlers = [
            self.http_get.is_some(),
            self.exec.is_some(),
            self.tcp_socket.is_some(),
            self.grpc.is_some(),
        ];
        match handlers.iter().filter(|h| **h).count() {
            0 => { bail!("Probe needs to define one of 'httpGet', 'exec', 'tcpSocket', 'grpc'") }
            1 => {}
            _ => { bail!("Probe needs to have at most one of 'httpGet', 'exec', 'tcpSocket', 'grpc'") }
        }
        if let Some(ref get) = self.http_get {
            verify_probe_port(&get.port)?;
            if let Some(ref path) = get.path {
                if !path.starts_with('/') {
                    bail!("Probe path '{}' must start with a slash", path);
                }
            }
        }
        if let Some(ref tcp) = self.tcp_socket {
            verify_probe_port(&tcp.port)?;
        }
        for (name, value) in &[
            ("periodSeconds", self.period_seconds),
            ("timeoutSeconds", self.timeout_seconds),
            ("successThreshold", self.success_threshold),
            ("failureThreshold", self.failure_threshold),
        ] {
            if let Some(v) = value {
                if *v < 1 {
                    bail!("Probe {} must be at least 1 - got {}", name, v);
                }
            }
        }
        if let Some(delay) = self.initial_delay_seconds {
            if delay < 0 {
                bail!("Probe initialDelaySeconds cannot be negative");
            }
        }
        Ok(())
    }
}

fn verify_probe_port(port: &IntOrString) -> Result<()> {
    match port {
        IntOrString::Int(p) if *p < 1 || *p > 65535 => { bail!("Probe port {} out of range", p) }
        IntOrString::String(s) if s.is_empty() => { bail!("Probe port cannot be empty") }
        _ => Ok(()),
    }
}
