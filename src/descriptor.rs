use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{HTTPGetAction, Probe};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use regex::Regex;

use super::labels::{Labels, APP_LABEL};
use super::structs::{AutoScaling, Ingress, Ports, Verify};
use super::structs::{RelaxedString, ResourceLimit, ResourceRequest, Resources};
use super::{ErrorKind, Result, ResultExt};

/// Application descriptor, deserializable from json
///
/// Fully specifies the deployable shape of one application.
/// Unknown keys are ignored, missing required keys fail the parse.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ApplicationDescriptor {
    /// Name of the application
    ///
    /// Used for the identity label and to derive every resource name.
    pub name: String,
    /// Container image reference
    pub image: String,
    /// Extra labels merged with the identity label
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: Labels,
    /// Container and service ports
    pub ports: Ports,
    /// External exposure
    pub ingress: Ingress,
    /// Horizontal pod autoscaling
    pub hpa: AutoScaling,
    /// Readiness probe (passed verbatim)
    pub readiness: Probe,
    /// Liveness probe (passed verbatim)
    pub liveness: Probe,
    /// Container resource limits
    pub resourceLimits: ResourceLimit<RelaxedString>,
    /// Container resource requests
    pub resourceRequests: ResourceRequest<RelaxedString>,
    /// Plain configuration injected as environment variables
    #[serde(default)]
    pub config: BTreeMap<String, String>,
    /// Sensitive configuration injected as environment variables
    #[serde(default)]
    pub secret: BTreeMap<String, String>,
}

impl ApplicationDescriptor {
    /// Requests and limits paired up
    pub fn resources(&self) -> Resources<RelaxedString> {
        Resources {
            requests: self.resourceRequests.clone(),
            limits: self.resourceLimits.clone(),
        }
    }

    /// Verify every assumption composition makes about the descriptor
    ///
    /// Must pass before any resource is built.
    pub fn verify(&self) -> Result<()> {
        self.verify_all()
            .chain_err(|| ErrorKind::InvalidDescriptor(self.name.clone()))
    }

    fn verify_all(&self) -> Result<()> {
        // limit to 50 characters, alphanumeric, dashes for sanity.
        // 63 is kube dns limit (13 char buffer for the role suffixes)
        let re = Regex::new(r"^[0-9a-z\-]{1,50}$").unwrap();
        if !re.is_match(&self.name) {
            bail!("Please use a short, lower case application name with dashes - got '{}'", self.name);
        }
        if self.name.ends_with('-') || self.name.starts_with('-') {
            bail!("Please use dashes to separate words only");
        }
        if self.image.trim().is_empty() {
            bail!("image cannot be empty");
        }
        if self.image.chars().any(char::is_whitespace) {
            bail!("image '{}' cannot contain whitespace", self.image);
        }

        for (k, v) in &self.labels {
            if k.is_empty() {
                bail!("label keys cannot be empty");
            }
            if k == APP_LABEL && v != &self.name {
                bail!("label '{}' is reserved for the application name - got '{}'", APP_LABEL, v);
            }
        }

        self.ports.verify().chain_err(|| "invalid ports")?;
        self.ingress.verify().chain_err(|| "invalid ingress")?;
        self.hpa.verify().chain_err(|| "invalid hpa")?;
        self.readiness.verify().chain_err(|| "invalid readiness probe")?;
        self.liveness.verify().chain_err(|| "invalid liveness probe")?;
        self.resources().verify().chain_err(|| "invalid resources")?;

        // kubelet skips environment variables with invalid names
        let evar = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
        for k in self.config.keys().chain(self.secret.keys()) {
            if !evar.is_match(k) {
                warn!("{} will not be a valid environment variable name", k);
            }
        }
        for k in self.config.keys() {
            if self.secret.contains_key(k) {
                warn!("{} is set in both config and secret, the secret value takes precedence", k);
            }
        }
        Ok(())
    }

    /// The fixed descriptor used when no descriptor file is given
    pub fn example() -> ApplicationDescriptor {
        let probe = || Probe {
            http_get: Some(HTTPGetAction {
                host: Some("0.0.0.0".into()),
                path: Some("/health".into()),
                port: IntOrString::String("8080".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let mut labels = Labels::new();
        labels.insert("tier".into(), "backend".into());
        labels.insert("domain".into(), "order".into());
        labels.insert("version".into(), "1.0.0".into());

        let mut config = BTreeMap::new();
        config.insert("app".into(), "aplicacion".into());
        config.insert("iddleTimeout".into(), "3000".into());
        config.insert("numThreads".into(), "3".into());

        let mut secret = BTreeMap::new();
        secret.insert("DATABASE_USERNAME".into(), "username".into());
        secret.insert("DATABASE_PASSWORD".into(), "casa1234".into());

        ApplicationDescriptor {
            name: "hello-k8s".into(),
            image: "gcr.io/pe-intercorpretail-cld-01/micro-service-integ-route".into(),
            labels,
            ports: Ports { container_port: 8080, service_port: 8080 },
            ingress: Ingress {
                enabled: true,
                host: "mca3-templates-dev.cc.cloudintercorpretail.pe".into(),
            },
            hpa: AutoScaling {
                enabled: true,
                minReplicas: 1,
                maxReplicas: 3,
                targetCPUUtilizationPercentage: 70,
            },
            readiness: Probe {
                initial_delay_seconds: Some(3),
                period_seconds: Some(15),
                timeout_seconds: Some(5),
                ..probe()
            },
            liveness: probe(),
            resourceLimits: ResourceLimit { cpu: "2000m".into(), memory: "256Mi".into() },
            resourceRequests: ResourceRequest { cpu: "200m".into(), memory: "128Mi".into() },
            config,
            secret,
        }
    }
}
