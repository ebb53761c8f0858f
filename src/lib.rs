#![recursion_limit = "1024"]
#![allow(renamed_and_removed_lints)]
#![allow(non_snake_case)]

#[macro_use]
extern crate serde_derive;

#[macro_use]
extern crate log;

#[macro_use]
extern crate error_chain;
error_chain! {
    types {
        Error, ErrorKind, ResultExt, Result;
    }
    links {}
    foreign_links {
        Io(::std::io::Error);
        Float(::std::num::ParseFloatError);
        SerdeY(serde_yaml::Error);
        SerdeJ(serde_json::Error);
    }
    errors {
        MissingDescriptor(path: String) {
            description("application descriptor not found")
            display("application descriptor '{}' does not exist", &path)
        }
        UnreadableDescriptor(path: String) {
            description("application descriptor could not be read")
            display("failed to read application descriptor '{}'", &path)
        }
        MalformedDescriptor(path: String) {
            description("application descriptor is not valid json")
            display("failed to parse application descriptor '{}'", &path)
        }
        InvalidDescriptor(app: String) {
            description("application descriptor does not validate")
            display("application descriptor for '{}' does not validate", &app)
        }
    }
}

/// Structs nested in the application descriptor
pub mod structs;

/// The application descriptor and its validation
pub mod descriptor;
pub use crate::descriptor::ApplicationDescriptor;

/// Label merging and selector helpers
pub mod labels;

/// The set of generated resources
pub mod bundle;
pub use crate::bundle::{ResourceBundle, Role};

/// Building a bundle from a descriptor
pub mod compose;
pub use crate::compose::compose;

/// Manifest rendering to yaml or json
pub mod generate;
pub use crate::generate::OutputFormat;

/// Where descriptors are read from
pub mod config;
pub use crate::config::DescriptorSource;
