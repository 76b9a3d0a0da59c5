//! Resolves Ambari command documents into the flat parameter sets that service
//! lifecycle scripts work with.
//!
//! Resolution is a pure function of a [`ConfigDocument`] and the
//! [`EnvironmentFacts`] derived from it:
//!
//! ```
//! use ambari_service_params::{ConfigDocument, EnvironmentFacts, Service};
//! use serde_json::json;
//!
//! let document = ConfigDocument::new(json!({
//!     "hostLevelParams": {"stack_version": "2.2.1.0-2067"},
//!     "clusterHostInfo": {"knox_gateway_hosts": ["c6403.ambari.apache.org"]},
//!     "configurations": {
//!         "knox-env": {"knox_pid_dir": "/var/run/knox", "knox_master_secret": "sekret"},
//!         "gateway-site": {"gateway.port": "8443"},
//!         "ambari-topology": {"content": ""},
//!         "gateway-log4j": {"content": ""},
//!         "ldap-log4j": {"content": ""},
//!         "users-ldif": {"content": ""}
//!     }
//! }));
//! let facts = EnvironmentFacts::from_document(&document)?;
//! let params = Service::Knox.resolve(&document, &facts)?;
//!
//! assert_eq!(Some(false), params.get_bool("has_namenode"));
//! assert_eq!(Some(50070), params.get_int("namenode_http_port"));
//! # Ok::<(), ambari_service_params::Error>(())
//! ```

pub mod address;
pub mod constants;
pub mod document;
pub mod error;
pub mod facts;
pub mod layout;
pub mod params;
pub mod security;
pub mod services;
pub mod version;

pub use address::resolve_port;
pub use document::{resolve_host, ConfigDocument, HostRef};
pub use error::{Error, Result};
pub use facts::EnvironmentFacts;
pub use layout::{select_path_set, PathSet, RoleDirectories};
pub use params::{ParamValue, ResolvedParams};
pub use services::{Service, ServiceParams};
pub use version::StackVersion;
