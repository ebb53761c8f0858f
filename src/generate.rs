use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use super::bundle::{Document, ResourceBundle};
use super::Result;

/// Manifest output formats
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// One yaml document per resource
    Yaml,
    /// A single kubernetes `List` holding every resource
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self { OutputFormat::Yaml }
}

/// Kubernetes list wrapper for json output
#[derive(Serialize)]
struct List<'a> {
    apiVersion: &'static str,
    kind: &'static str,
    items: Vec<Document<'a>>,
}

/// Render a bundle in construction order
pub fn render(bundle: &ResourceBundle, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => render_yaml(bundle),
        OutputFormat::Json => render_json(bundle),
    }
}

fn render_yaml(bundle: &ResourceBundle) -> Result<String> {
    let mut res = String::new();
    for doc in bundle.documents() {
        let encoded = serde_yaml::to_string(&doc)?;
        // normalise document separators across serde_yaml versions
        let body = encoded.trim_start_matches("---\n").trim_end();
        trace!("rendered {} {}", doc.role(), doc.name());
        res.push_str("---\n");
        res.push_str(body);
        res.push('\n');
    }
    Ok(res)
}

fn render_json(bundle: &ResourceBundle) -> Result<String> {
    let list = List {
        apiVersion: "v1",
        kind: "List",
        items: bundle.documents(),
    };
    let mut res = serde_json::to_string_pretty(&list)?;
    res.push('\n');
    Ok(res)
}

/// Manifests -> stdout wrapper
pub fn to_stdout(bundle: &ResourceBundle, format: OutputFormat) -> Result<()> {
    let encoded = render(bundle, format)?;
    io::stdout().write_all(encoded.as_bytes())?;
    Ok(())
}

/// Manifests -> file wrapper
pub fn to_disk(bundle: &ResourceBundle, format: OutputFormat, output: &Path) -> Result<()> {
    let encoded = render(bundle, format)?;
    info!("Writing {} manifests to {}", bundle.documents().len(), output.display());
    let mut f = File::create(output)?;
    f.write_all(encoded.as_bytes())?;
    debug!("Wrote manifests to {}: \n{}", output.display(), encoded);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{render, OutputFormat};
    use crate::{compose, ApplicationDescriptor};

    #[test]
    fn yaml_documents() {
        let bundle = compose(&ApplicationDescriptor::example()).unwrap();
        let out = render(&bundle, OutputFormat::Yaml).unwrap();
        assert_eq!(out.matches("---\n").count(), 6);
        assert!(out.starts_with("---\n"));
        assert!(out.contains("kind: ConfigMap"));
        assert!(out.contains("kind: HorizontalPodAutoscaler"));
        assert!(out.contains("apiVersion: networking.k8s.io/v1"));
        assert!(out.contains("type: ClusterIP"));

        // every document parses back on its own
        for doc in out.split("---\n").filter(|d| !d.trim().is_empty()) {
            let v: serde_yaml::Value = serde_yaml::from_str(doc).unwrap();
            assert!(v.get("kind").is_some());
        }
    }

    #[test]
    fn json_list() {
        let bundle = compose(&ApplicationDescriptor::example()).unwrap();
        let out = render(&bundle, OutputFormat::Json).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["kind"], "List");
        let items = v["items"].as_array().unwrap();
        assert_eq!(items.len(), 6);
        assert_eq!(items[0]["kind"], "ConfigMap");
        assert_eq!(items[4]["kind"], "Deployment");
        assert_eq!(items[4]["spec"]["replicas"], 1);
    }

    #[test]
    fn rendering_is_deterministic() {
        let a = compose(&ApplicationDescriptor::example()).unwrap();
        let b = compose(&ApplicationDescriptor::example()).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            render(&a, OutputFormat::Yaml).unwrap(),
            render(&b, OutputFormat::Yaml).unwrap()
        );
    }
}
