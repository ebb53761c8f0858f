use std::fmt;

use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::autoscaling::v1::HorizontalPodAutoscaler;
use k8s_openapi::api::core::v1::{ConfigMap, Secret, Service};
use k8s_openapi::api::networking::v1::Ingress;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use super::labels::Labels;

/// Logical role of a resource within a bundle
///
/// Ordered by construction order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    ConfigMap,
    Secret,
    Service,
    Ingress,
    Deployment,
    HorizontalPodAutoscaler,
}

impl Role {
    /// Suffix used in generated resource names
    pub fn suffix(&self) -> &'static str {
        match self {
            Role::ConfigMap => "configmap",
            Role::Secret => "secret",
            Role::Service => "service",
            Role::Ingress => "ingress",
            Role::Deployment => "deployment",
            Role::HorizontalPodAutoscaler => "hpa",
        }
    }

    /// The generated name of the resource in this role for an application
    pub fn resource_name(&self, app: &str) -> String {
        format!("{}-{}", app, self.suffix())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Name of a built resource, as its siblings must reference it
pub(crate) fn name_of(meta: &ObjectMeta) -> String {
    meta.name.clone().unwrap_or_default()
}

/// The generated resources for one descriptor
///
/// Optional resources are absent rather than present-but-inert.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceBundle {
    /// Merged labels carried by every resource
    pub labels: Labels,
    pub config_map: ConfigMap,
    pub secret: Secret,
    pub service: Service,
    pub ingress: Option<Ingress>,
    pub deployment: Deployment,
    pub autoscaler: Option<HorizontalPodAutoscaler>,
}

/// A borrowed resource of any kind in the bundle
///
/// Serializes exactly as the wrapped kubernetes object.
#[derive(Serialize, Clone, Copy, Debug)]
#[serde(untagged)]
pub enum Document<'a> {
    ConfigMap(&'a ConfigMap),
    Secret(&'a Secret),
    Service(&'a Service),
    Ingress(&'a Ingress),
    Deployment(&'a Deployment),
    HorizontalPodAutoscaler(&'a HorizontalPodAutoscaler),
}

impl<'a> Document<'a> {
    pub fn role(&self) -> Role {
        match self {
            Document::ConfigMap(_) => Role::ConfigMap,
            Document::Secret(_) => Role::Secret,
            Document::Service(_) => Role::Service,
            Document::Ingress(_) => Role::Ingress,
            Document::Deployment(_) => Role::Deployment,
            Document::HorizontalPodAutoscaler(_) => Role::HorizontalPodAutoscaler,
        }
    }

    pub fn metadata(&self) -> &'a ObjectMeta {
        match *self {
            Document::ConfigMap(r) => &r.metadata,
            Document::Secret(r) => &r.metadata,
            Document::Service(r) => &r.metadata,
            Document::Ingress(r) => &r.metadata,
            Document::Deployment(r) => &r.metadata,
            Document::HorizontalPodAutoscaler(r) => &r.metadata,
        }
    }

    pub fn name(&self) -> String {
        name_of(self.metadata())
    }
}

impl ResourceBundle {
    /// All present resources in construction order
    pub fn documents(&self) -> Vec<Document<'_>> {
        let mut res = vec![
            Document::ConfigMap(&self.config_map),
            Document::Secret(&self.secret),
            Document::Service(&self.service),
        ];
        if let Some(ref ing) = self.ingress {
            res.push(Document::Ingress(ing));
        }
        res.push(Document::Deployment(&self.deployment));
        if let Some(ref hpa) = self.autoscaler {
            res.push(Document::HorizontalPodAutoscaler(hpa));
        }
        res
    }

    /// Roles of all present resources in construction order
    pub fn roles(&self) -> Vec<Role> {
        self.documents().iter().map(Document::role).collect()
    }

    /// Look up a present resource by role
    pub fn get(&self, role: Role) -> Option<Document<'_>> {
        self.documents().into_iter().find(|d| d.role() == role)
    }
}
