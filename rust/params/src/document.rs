//! The command document an Ambari agent hands to a service script.
//!
//! All lookups take slash-delimited paths such as
//! `/configurations/hdfs-site/dfs.namenode.http-address`. Segments are taken
//! literally, so dots inside property names need no escaping.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use snafu::OptionExt;
use tracing::debug;

use crate::error::{
    EmptyHostListSnafu, InvalidBooleanSnafu, InvalidTypeSnafu, MissingKeySnafu, Result,
};

/// Read-only view of one command document.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConfigDocument(Value);

impl ConfigDocument {
    pub fn new(root: Value) -> Self {
        ConfigDocument(root)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Walks `path` through nested mappings, `None` as soon as a segment is missing.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        segments(path).try_fold(&self.0, |node, segment| node.as_object()?.get(segment))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.lookup(path).is_some()
    }

    /// Defaulted lookup: the value at `path`, or `fallback` if any segment is absent.
    pub fn default(&self, path: &str, fallback: Value) -> Value {
        match self.lookup(path) {
            Some(value) => value.clone(),
            None => {
                debug!(path, "key absent, using default");
                fallback
            }
        }
    }

    /// Defaulted lookup of an optional scalar. Absent keys and JSON `null` both yield `None`.
    pub fn optional_str(&self, path: &str) -> Result<Option<String>> {
        match self.lookup(path) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => scalar_to_string(path, value).map(Some),
        }
    }

    pub fn default_str(&self, path: &str, fallback: &str) -> Result<String> {
        Ok(self
            .optional_str(path)?
            .unwrap_or_else(|| fallback.to_string()))
    }

    pub fn required(&self, path: &str) -> Result<&Value> {
        self.lookup(path).context(MissingKeySnafu { path })
    }

    /// Required scalar rendered as text. Numbers and booleans keep their JSON spelling.
    pub fn required_str(&self, path: &str) -> Result<String> {
        scalar_to_string(path, self.required(path)?)
    }

    /// Required flag. Ambari ships these both as JSON booleans and as `"true"`/`"false"`.
    pub fn required_bool(&self, path: &str) -> Result<bool> {
        match self.required(path)? {
            Value::Bool(flag) => Ok(*flag),
            Value::String(text) if text.eq_ignore_ascii_case("true") => Ok(true),
            Value::String(text) if text.eq_ignore_ascii_case("false") => Ok(false),
            other => InvalidBooleanSnafu {
                path,
                value: other.to_string(),
            }
            .fail(),
        }
    }

    pub fn required_section(&self, path: &str) -> Result<&Map<String, Value>> {
        self.required(path)?.as_object().context(InvalidTypeSnafu {
            path,
            expected: "a mapping",
        })
    }

    pub fn host(&self, path: &str) -> Result<HostRef> {
        HostRef::from_value(path, self.lookup(path))
    }

    /// First entry of a required host list, e.g. `/clusterHostInfo/falcon_server_hosts`.
    pub fn required_first(&self, path: &str) -> Result<String> {
        match self.host(path)? {
            HostRef::Absent if matches!(self.lookup(path), Some(Value::Array(_))) => {
                EmptyHostListSnafu { path }.fail()
            }
            host => resolve_host(host).context(MissingKeySnafu { path }),
        }
    }
}

impl From<Value> for ConfigDocument {
    fn from(root: Value) -> Self {
        ConfigDocument::new(root)
    }
}

/// A host field, which Ambari sends either as a single name or as a list of names.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HostRef {
    Single(String),
    List(Vec<String>),
    Absent,
}

impl HostRef {
    pub fn from_value(path: &str, value: Option<&Value>) -> Result<Self> {
        match value {
            None | Some(Value::Null) => Ok(HostRef::Absent),
            Some(Value::Array(entries)) if entries.is_empty() => Ok(HostRef::Absent),
            Some(Value::Array(entries)) => entries
                .iter()
                .map(|entry| {
                    entry.as_str().map(str::to_string).context(InvalidTypeSnafu {
                        path,
                        expected: "a list of host names",
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(HostRef::List),
            Some(Value::String(host)) => Ok(HostRef::Single(host.clone())),
            Some(_) => InvalidTypeSnafu {
                path,
                expected: "a host name or a list of host names",
            }
            .fail(),
        }
    }
}

/// Normalizes a [`HostRef`]: first element of a list, a scalar unchanged, otherwise `None`.
pub fn resolve_host(host: HostRef) -> Option<String> {
    match host {
        HostRef::Single(host) => Some(host),
        HostRef::List(hosts) => hosts.into_iter().next(),
        HostRef::Absent => None,
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

fn scalar_to_string(path: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        _ => InvalidTypeSnafu {
            path,
            expected: "a scalar",
        }
        .fail(),
    }
}
