use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::{ApplicationDescriptor, ErrorKind, Result, ResultExt};

/// Environment variable overriding the default descriptor path
pub const DESCRIPTOR_ENV: &str = "CHARTSMITH_DESCRIPTOR";
/// Descriptor file looked for in the working directory
pub const DEFAULT_DESCRIPTOR: &str = "app.json";

/// Where an application descriptor comes from
#[derive(Clone, Debug, PartialEq)]
pub enum DescriptorSource {
    /// The built-in demo descriptor
    Example,
    /// A json file
    File(PathBuf),
}

impl DescriptorSource {
    /// Resolve the source from an optional explicit path
    ///
    /// Falls back to `CHARTSMITH_DESCRIPTOR`, then `app.json`.
    pub fn resolve(explicit: Option<&str>) -> DescriptorSource {
        let pth = match explicit {
            Some(p) => PathBuf::from(p),
            None => match env::var(DESCRIPTOR_ENV) {
                Ok(p) if !p.is_empty() => {
                    debug!("Using descriptor from {}", DESCRIPTOR_ENV);
                    PathBuf::from(p)
                }
                _ => Path::new(".").join(DEFAULT_DESCRIPTOR),
            },
        };
        DescriptorSource::File(pth)
    }

    /// Load and parse the descriptor
    ///
    /// Does not verify it, `compose` does that.
    pub fn load(&self) -> Result<ApplicationDescriptor> {
        match self {
            DescriptorSource::Example => {
                debug!("Using the built-in example descriptor");
                Ok(ApplicationDescriptor::example())
            }
            DescriptorSource::File(pth) => read_descriptor(pth),
        }
    }
}

/// Read a descriptor json file
pub fn read_descriptor(pth: &Path) -> Result<ApplicationDescriptor> {
    let name = pth.display().to_string();
    if !pth.is_file() {
        bail!(ErrorKind::MissingDescriptor(name));
    }
    debug!("Reading {}", name);
    let data = fs::read_to_string(pth).chain_err(|| ErrorKind::UnreadableDescriptor(name.clone()))?;
    parse_descriptor(&data).chain_err(|| ErrorKind::MalformedDescriptor(name.clone()))
}

/// Parse a descriptor from json text
///
/// Parse errors carry the line and column of the offending input.
pub fn parse_descriptor(data: &str) -> Result<ApplicationDescriptor> {
    let desc: ApplicationDescriptor = serde_json::from_str(data)?;
    trace!("Parsed descriptor for {}", desc.name);
    Ok(desc)
}
