use tracing::debug;

use crate::{
    constants::{COMMAND_ROLE_PATH, RPM_VERSION_PATH, STACK_VERSION_PATH, UPGRADE_VERSION_PATH},
    document::ConfigDocument,
    error::Result,
    version::StackVersion,
};

/// The handful of environment facts that gate layouts.
///
/// Built once per invocation, either from the command document or explicitly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvironmentFacts {
    pub stack_version_unformatted: String,
    pub stack_version: Option<StackVersion>,
    pub command_role: String,
    pub rpm_version: Option<String>,
    /// Target version of a rolling upgrade, kept verbatim for `hdp-select`.
    pub upgrade_version: Option<String>,
    pub kinit_path: Option<String>,
}

impl EnvironmentFacts {
    pub fn new(stack_version: impl Into<String>, command_role: impl Into<String>) -> Self {
        let stack_version_unformatted = stack_version.into();
        EnvironmentFacts {
            stack_version: StackVersion::parse(&stack_version_unformatted),
            stack_version_unformatted,
            command_role: command_role.into(),
            ..Default::default()
        }
    }

    pub fn from_document(document: &ConfigDocument) -> Result<Self> {
        let stack_version = document.default_str(STACK_VERSION_PATH, "")?;
        let command_role = document.default_str(COMMAND_ROLE_PATH, "")?;
        let facts = EnvironmentFacts {
            rpm_version: document.optional_str(RPM_VERSION_PATH)?.filter(|v| !v.is_empty()),
            upgrade_version: document
                .optional_str(UPGRADE_VERSION_PATH)?
                .filter(|v| !v.is_empty()),
            ..EnvironmentFacts::new(stack_version, command_role)
        };
        if facts.stack_version.is_none() && !facts.stack_version_unformatted.is_empty() {
            debug!(
                stack_version = %facts.stack_version_unformatted,
                "stack version is not dotted numeric, treating it as below every threshold"
            );
        }
        Ok(facts)
    }

    /// Attaches the kinit binary found by the caller.
    pub fn with_kinit_path(mut self, kinit_path: impl Into<String>) -> Self {
        self.kinit_path = Some(kinit_path.into());
        self
    }

    /// Normalized stack version, empty when it did not parse.
    pub fn formatted_stack_version(&self) -> String {
        self.stack_version
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}
