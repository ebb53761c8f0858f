use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::ResourceRequirements;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

use super::relaxed::RelaxedString;
use super::traits::Verify;
use super::Result;

// Kubernetes resouce structs
//
// These are used in descriptors where T is a RelaxedString
// but is generic herein because we can have a fully parsed version
// where all values are parsed as normalised f64s.

/// Kubernetes resource requests
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ResourceRequest<T> {
    /// CPU request string
    pub cpu: T,
    /// Memory request string
    pub memory: T,
}

/// Kubernetes resource limits
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ResourceLimit<T> {
    /// CPU limit string
    pub cpu: T,
    /// Memory limit string
    pub memory: T,
}

/// Kubernetes resources
///
/// Pairs the separately specified requests and limits of a descriptor.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Resources<T> {
    /// Resource requests for k8s
    pub requests: ResourceRequest<T>,
    /// Resource limits for k8s
    pub limits: ResourceLimit<T>,
}

impl Resources<RelaxedString> {
    /// Convert shorthand strings to raw number of cores and Bytes of memory
    pub fn normalised(&self) -> Result<Resources<f64>> {
        let requests = ResourceRequest {
            memory: parse_memory(self.requests.memory.as_str())?,
            cpu: parse_cpu(self.requests.cpu.as_str())?,
        };
        let limits = ResourceLimit {
            memory: parse_memory(self.limits.memory.as_str())?,
            cpu: parse_cpu(self.limits.cpu.as_str())?,
        };
        Ok(Resources { requests, limits })
    }

    /// The container resources block, quantities passed through verbatim
    pub fn requirements(&self) -> ResourceRequirements {
        let quantities = |cpu: &RelaxedString, memory: &RelaxedString| {
            let mut res = BTreeMap::new();
            res.insert("cpu".to_string(), Quantity(cpu.to_string()));
            res.insert("memory".to_string(), Quantity(memory.to_string()));
            res
        };
        ResourceRequirements {
            requests: Some(quantities(&self.requests.cpu, &self.requests.memory)),
            limits: Some(quantities(&self.limits.cpu, &self.limits.memory)),
            ..Default::default()
        }
    }
}

impl Verify for Resources<RelaxedString> {
    fn verify(&self) -> Result<()> {
        let n = self.normalised()?;
        let req = &n.requests;
        let lim = &n.limits;

        if req.cpu <= 0.0 || req.memory <= 0.0 {
            bail!("Resource requests must be positive");
        }
        // limits >= requests
        if req.cpu > lim.cpu {
            bail!("Requested more CPU than what was limited");
        }
        if req.memory > lim.memory {
            bail!("Requested more memory than what was limited");
        }
        Ok(())
    }
}

fn split_unit(s: &str) -> (String, String) {
    let mut digits = s.chars().take_while(|ch| ch.is_digit(10) || *ch == '.').collect::<String>();
    let mut unit = s.chars().skip_while(|ch| ch.is_digit(10) || *ch == '.').collect::<String>();
    // decimal exponents (1e3, 128E6) are not units, but a bare E (exa) is
    if unit.starts_with(|ch: char| ch == 'e' || ch == 'E') {
        let exp = unit[1..].trim_start_matches(|ch: char| ch == '+' || ch == '-');
        if !exp.is_empty() && exp.chars().all(|ch| ch.is_digit(10)) {
            digits.push_str(&unit);
            unit.clear();
        }
    }
    (digits, unit)
}

fn parse_number(kind: &str, s: &str, digits: &str) -> Result<f64> {
    if digits.is_empty() || digits.starts_with(|ch: char| ch == 'e' || ch == 'E') {
        bail!("Invalid {} quantity '{}' - expected a positive number with an optional unit", kind, s);
    }
    Ok(digits.parse()?)
}

// Decimal SI suffixes shared by cpu and memory quantities, as powers of ten
fn decimal_exponent(unit: &str) -> Option<i32> {
    let exp = match unit {
        "" => 0,
        "n" => -9,
        "u" => -6,
        "m" => -3,
        "k" => 3,
        "M" => 6,
        "G" => 9,
        "T" => 12,
        "P" => 15,
        "E" => 18,
        _ => return None,
    };
    Some(exp)
}

fn scale_decimal(res: f64, exp: i32) -> f64 {
    if exp < 0 {
        res / 10f64.powi(-exp)
    } else {
        res * 10f64.powi(exp)
    }
}

fn binary_scale(unit: &str) -> Option<f64> {
    let exp = match unit {
        "Ki" => 1,
        "Mi" => 2,
        "Gi" => 3,
        "Ti" => 4,
        "Pi" => 5,
        "Ei" => 6,
        _ => return None,
    };
    Some(1024f64.powi(exp))
}

// Parse normal k8s memory resource value into floats
pub fn parse_memory(s: &str) -> Result<f64> {
    let (digits, unit) = split_unit(s);
    let res = parse_number("memory", s, &digits)?;
    trace!("Parsed {} ({})", digits, unit);
    let res = if let Some(scale) = binary_scale(&unit) {
        res * scale
    } else if let Some(exp) = decimal_exponent(&unit) {
        scale_decimal(res, exp)
    } else {
        bail!("Unknown memory unit {}", unit);
    };
    trace!("Returned {} bytes", res);
    Ok(res)
}

// Parse normal k8s cpu resource values into floats
// We don't allow power of two variants here
pub fn parse_cpu(s: &str) -> Result<f64> {
    let (digits, unit) = split_unit(s);
    let res = parse_number("cpu", s, &digits)?;
    trace!("Parsed {} ({})", digits, unit);
    let res = match decimal_exponent(&unit) {
        Some(exp) => scale_decimal(res, exp),
        None => { bail!("Unknown cpu unit {}", unit) }
    };
    trace!("Returned {} cores", res);
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::{parse_cpu, parse_memory, ResourceLimit, ResourceRequest, Resources};
    use crate::structs::Verify;

    fn resources(rcpu: &str, rmem: &str, lcpu: &str, lmem: &str) -> Resources<super::RelaxedString> {
        Resources {
            requests: ResourceRequest { cpu: rcpu.into(), memory: rmem.into() },
            limits: ResourceLimit { cpu: lcpu.into(), memory: lmem.into() },
        }
    }

    #[test]
    fn quantity_parsing() {
        assert_eq!(parse_cpu("200m").unwrap(), 0.2);
        assert_eq!(parse_cpu("2").unwrap(), 2.0);
        assert_eq!(parse_memory("128Mi").unwrap(), 128.0 * 1024.0 * 1024.0);
        assert_eq!(parse_memory("1G").unwrap(), 1e9);
        assert!(parse_cpu("2Gi").is_err());
        assert!(parse_memory("12 parsecs").is_err());
        assert!(parse_memory("").is_err());

        // the rest of the suffix table, and decimal exponents
        assert_eq!(parse_memory("1Pi").unwrap(), 1024f64.powi(5));
        assert_eq!(parse_memory("2Ei").unwrap(), 2.0 * 1024f64.powi(6));
        assert_eq!(parse_memory("1P").unwrap(), 1e15);
        assert_eq!(parse_memory("1E").unwrap(), 1e18);
        assert_eq!(parse_memory("128e6").unwrap(), 128e6);
        assert_eq!(parse_cpu("1e3").unwrap(), 1000.0);
        assert_eq!(parse_cpu("5E-1").unwrap(), 0.5);
        assert_eq!(parse_cpu("500000u").unwrap(), 0.5);
        assert!(parse_cpu("1e").is_err());
    }

    #[test]
    fn negative_quantities_are_named() {
        let err = parse_cpu("-1").unwrap_err();
        assert!(err.to_string().contains("cpu quantity '-1'"), "got '{}'", err);
        let err = parse_memory("-128Mi").unwrap_err();
        assert!(err.to_string().contains("memory quantity '-128Mi'"), "got '{}'", err);
    }

    #[test]
    fn requests_within_limits() {
        assert!(resources("200m", "128Mi", "2000m", "256Mi").verify().is_ok());
        assert!(resources("2", "128Mi", "1", "256Mi").verify().is_err());
        assert!(resources("200m", "1Gi", "2", "256Mi").verify().is_err());
        assert!(resources("0", "128Mi", "1", "256Mi").verify().is_err());
    }

    #[test]
    fn requirements_pass_through() {
        let req = resources("200m", "128Mi", "2000m", "256Mi").requirements();
        let requests = req.requests.unwrap();
        let limits = req.limits.unwrap();
        assert_eq!(requests["cpu"].0, "200m");
        assert_eq!(requests["memory"].0, "128Mi");
        assert_eq!(limits["cpu"].0, "2000m");
        assert_eq!(limits["memory"].0, "256Mi");
    }
}
