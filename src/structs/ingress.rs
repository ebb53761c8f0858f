use regex::Regex;

use super::traits::Verify;
use super::Result;

/// External exposure of the service through an ingress controller
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Ingress {
    /// Whether an ingress is generated at all
    pub enabled: bool,
    /// Host the single ingress rule matches on
    #[serde(default)]
    pub host: String,
}

impl Verify for Ingress {
    fn verify(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        if self.host.is_empty() {
            bail!("ingress is enabled but has no host");
        }
        if self.host.contains("://") {
            bail!("ingress host '{}' must be a bare hostname without a scheme", self.host);
        }
        // rfc1123 subdomain with an optional leading wildcard label
        let re = Regex::new(r"^(\*\.)?[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$").unwrap();
        if self.host.len() > 253 || !re.is_match(&self.host) {
            bail!("ingress host '{}' is not a valid lower case hostname", self.host);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Ingress;
    use crate::structs::Verify;

    #[test]
    fn disabled_ingress_needs_no_host() {
        let ing: Ingress = serde_json::from_str(r#"{"enabled": false}"#).unwrap();
        assert!(ing.host.is_empty());
        assert!(ing.verify().is_ok());
    }

    #[test]
    fn enabled_ingress_hosts() {
        let mut ing = Ingress { enabled: true, host: "checkout.example.com".into() };
        assert!(ing.verify().is_ok());
        ing.host = "*.example.com".into();
        assert!(ing.verify().is_ok());
        ing.host = "".into();
        assert!(ing.verify().is_err());
        ing.host = "https://checkout.example.com".into();
        assert!(ing.verify().is_err());
        ing.host = "Checkout.example.com".into();
        assert!(ing.verify().is_err());
        ing.host = "checkout example.com".into();
        assert!(ing.verify().is_err());
    }
}
