use std::fmt;

/// Kubernetes service types the composer emits
///
/// Typed so the name is spelled in exactly one place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServiceType {
    ClusterIP,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::ClusterIP => "ClusterIP",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::ServiceType;

    #[test]
    fn service_type_names() {
        assert_eq!(ServiceType::ClusterIP.to_string(), "ClusterIP");
        assert_ne!(ServiceType::ClusterIP.as_str(), "ClusterIp");
    }
}
