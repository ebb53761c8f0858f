use std::collections::BTreeMap;

use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::autoscaling::v1::{
    CrossVersionObjectReference, HorizontalPodAutoscaler, HorizontalPodAutoscalerSpec,
};
use k8s_openapi::api::core::v1::{
    ConfigMap, ConfigMapEnvSource, Container, ContainerPort, EnvFromSource, PodSpec,
    PodTemplateSpec, Secret, SecretEnvSource, Service, ServicePort, ServiceSpec,
};
use k8s_openapi::api::networking::v1::{
    HTTPIngressPath, HTTPIngressRuleValue, Ingress, IngressBackend, IngressRule,
    IngressServiceBackend, IngressSpec, ServiceBackendPort,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use k8s_openapi::Resource;

use super::bundle::{name_of, ResourceBundle, Role};
use super::labels::{merged_labels, selector_labels, Labels};
use super::structs::ServiceType;
use super::{ApplicationDescriptor, Result};

/// Issuer cert-manager uses for ingress certificates
pub const CLUSTER_ISSUER: &str = "letsencrypt-prod";
/// Ingress controller class
pub const INGRESS_CLASS: &str = "nginx";
/// Name of the single port on the container and service
pub const PORT_NAME: &str = "http";

/// Compose the full bundle of resources for a descriptor
///
/// The whole descriptor is verified up front, so either every resource
/// is built or none is. Resources are built in `Role` order; later ones
/// read the names of earlier ones off the built objects.
pub fn compose(desc: &ApplicationDescriptor) -> Result<ResourceBundle> {
    desc.verify()?;
    let labels = merged_labels(&desc.name, &desc.labels);

    let config_map = config_map(desc, &labels);
    let secret = secret(desc, &labels);
    let service = service(desc, &labels);
    let ingress = if desc.ingress.enabled {
        Some(ingress(desc, &labels, &service))
    } else {
        debug!("ingress disabled for {}", desc.name);
        None
    };
    let deployment = deployment(desc, &labels, &config_map, &secret);
    let autoscaler = if desc.hpa.enabled {
        Some(autoscaler(desc, &labels, &deployment))
    } else {
        debug!("hpa disabled for {}, replicas stay at 1", desc.name);
        None
    };

    let bundle = ResourceBundle {
        labels,
        config_map,
        secret,
        service,
        ingress,
        deployment,
        autoscaler,
    };
    info!("composed {} resources for {}", bundle.documents().len(), desc.name);
    Ok(bundle)
}

fn metadata(desc: &ApplicationDescriptor, role: Role, labels: &Labels) -> ObjectMeta {
    let name = role.resource_name(&desc.name);
    trace!("building {} {}", role, name);
    ObjectMeta {
        name: Some(name),
        labels: Some(labels.clone()),
        ..Default::default()
    }
}

pub fn config_map(desc: &ApplicationDescriptor, labels: &Labels) -> ConfigMap {
    ConfigMap {
        metadata: metadata(desc, Role::ConfigMap, labels),
        data: Some(desc.config.clone()),
        ..Default::default()
    }
}

/// Secret with values passed through as given
///
/// Values go in `stringData`, the api server does the encoding.
pub fn secret(desc: &ApplicationDescriptor, labels: &Labels) -> Secret {
    Secret {
        metadata: metadata(desc, Role::Secret, labels),
        type_: Some("Opaque".into()),
        string_data: Some(desc.secret.clone()),
        ..Default::default()
    }
}

pub fn service(desc: &ApplicationDescriptor, labels: &Labels) -> Service {
    Service {
        metadata: metadata(desc, Role::Service, labels),
        spec: Some(ServiceSpec {
            type_: Some(ServiceType::ClusterIP.to_string()),
            ports: Some(vec![ServicePort {
                name: Some(PORT_NAME.into()),
                protocol: Some("TCP".into()),
                port: desc.ports.service_port,
                target_port: Some(IntOrString::Int(desc.ports.container_port)),
                ..Default::default()
            }]),
            selector: Some(selector_labels(&desc.name)),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn ingress(desc: &ApplicationDescriptor, labels: &Labels, service: &Service) -> Ingress {
    let mut annotations = BTreeMap::new();
    annotations.insert("cert-manager.io/cluster-issuer".to_string(), CLUSTER_ISSUER.to_string());
    annotations.insert("kubernetes.io/ingress.class".to_string(), INGRESS_CLASS.to_string());

    let backend = IngressBackend {
        service: Some(IngressServiceBackend {
            name: name_of(&service.metadata),
            port: Some(ServiceBackendPort {
                number: Some(desc.ports.service_port),
                ..Default::default()
            }),
        }),
        ..Default::default()
    };
    Ingress {
        metadata: ObjectMeta {
            annotations: Some(annotations),
            ..metadata(desc, Role::Ingress, labels)
        },
        spec: Some(IngressSpec {
            rules: Some(vec![IngressRule {
                host: Some(desc.ingress.host.clone()),
                http: Some(HTTPIngressRuleValue {
                    paths: vec![HTTPIngressPath {
                        path: Some("/".into()),
                        path_type: "Prefix".into(),
                        backend,
                    }],
                }),
            }]),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Deployment with a single container
///
/// Replicas start at 1; with an hpa the autoscaler owns the count afterwards.
pub fn deployment(
    desc: &ApplicationDescriptor,
    labels: &Labels,
    config_map: &ConfigMap,
    secret: &Secret,
) -> Deployment {
    let env_from = vec![
        EnvFromSource {
            config_map_ref: Some(ConfigMapEnvSource {
                name: name_of(&config_map.metadata).into(),
                ..Default::default()
            }),
            ..Default::default()
        },
        EnvFromSource {
            secret_ref: Some(SecretEnvSource {
                name: name_of(&secret.metadata).into(),
                ..Default::default()
            }),
            ..Default::default()
        },
    ];
    let container = Container {
        name: format!("{}-container", desc.name),
        image: Some(desc.image.clone()),
        ports: Some(vec![ContainerPort {
            name: Some(PORT_NAME.into()),
            container_port: desc.ports.container_port,
            protocol: Some("TCP".into()),
            ..Default::default()
        }]),
        readiness_probe: Some(desc.readiness.clone()),
        liveness_probe: Some(desc.liveness.clone()),
        env_from: Some(env_from),
        resources: Some(desc.resources().requirements()),
        ..Default::default()
    };
    Deployment {
        metadata: metadata(desc, Role::Deployment, labels),
        spec: Some(DeploymentSpec {
            replicas: Some(1),
            selector: LabelSelector {
                match_labels: Some(selector_labels(&desc.name)),
                ..Default::default()
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(labels.clone()),
                    ..Default::default()
                }),
                spec: Some(PodSpec {
                    containers: vec![container],
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn autoscaler(
    desc: &ApplicationDescriptor,
    labels: &Labels,
    deployment: &Deployment,
) -> HorizontalPodAutoscaler {
    HorizontalPodAutoscaler {
        metadata: metadata(desc, Role::HorizontalPodAutoscaler, labels),
        spec: Some(HorizontalPodAutoscalerSpec {
            min_replicas: Some(desc.hpa.minReplicas),
            max_replicas: desc.hpa.maxReplicas,
            target_cpu_utilization_percentage: Some(desc.hpa.targetCPUUtilizationPercentage),
            scale_target_ref: CrossVersionObjectReference {
                api_version: Some(Deployment::API_VERSION.into()),
                kind: Deployment::KIND.into(),
                name: name_of(&deployment.metadata),
            },
        }),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::compose;
    use crate::labels::selector_matches;
    use crate::{ApplicationDescriptor, Role};

    #[test]
    fn example_bundle() {
        let bundle = compose(&ApplicationDescriptor::example()).unwrap();
        assert_eq!(bundle.roles(), vec![
            Role::ConfigMap,
            Role::Secret,
            Role::Service,
            Role::Ingress,
            Role::Deployment,
            Role::HorizontalPodAutoscaler,
        ]);
        for doc in bundle.documents() {
            assert_eq!(doc.name(), doc.role().resource_name("hello-k8s"));
            assert_eq!(doc.metadata().labels.as_ref(), Some(&bundle.labels));
        }
        assert_eq!(bundle.labels.len(), 4);
    }

    #[test]
    fn service_selects_pods() {
        let bundle = compose(&ApplicationDescriptor::example()).unwrap();
        let svc = bundle.service.spec.unwrap();
        let selector = svc.selector.unwrap();
        assert_eq!(selector.len(), 1);
        assert_eq!(selector["app"], "hello-k8s");
        assert_eq!(svc.type_.as_deref(), Some("ClusterIP"));

        let dspec = bundle.deployment.spec.unwrap();
        assert_eq!(dspec.selector.match_labels.as_ref(), Some(&selector));
        let podlabels = dspec.template.metadata.unwrap().labels.unwrap();
        assert!(selector_matches(&selector, &podlabels));
        assert_eq!(podlabels, bundle.labels);
    }

    #[test]
    fn hpa_targets_deployment() {
        let bundle = compose(&ApplicationDescriptor::example()).unwrap();
        let spec = bundle.autoscaler.unwrap().spec.unwrap();
        assert_eq!(spec.scale_target_ref.kind, "Deployment");
        assert_eq!(spec.scale_target_ref.api_version.as_deref(), Some("apps/v1"));
        assert_eq!(Some(spec.scale_target_ref.name), bundle.deployment.metadata.name);
        assert_eq!(spec.min_replicas, Some(1));
        assert_eq!(spec.max_replicas, 3);
        assert_eq!(spec.target_cpu_utilization_percentage, Some(70));
    }

    #[test]
    fn invalid_descriptor_builds_nothing() {
        let mut desc = ApplicationDescriptor::example();
        desc.hpa.minReplicas = 5;
        desc.hpa.maxReplicas = 1;
        assert!(compose(&desc).is_err());
    }
}
