//! Install layouts.
//!
//! Stacks from 2.2 on install every component under a `/usr/hdp/current/<dir>`
//! symlink tree, older stacks use fixed paths per service.

use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    constants::{HDP_CURRENT_ROOT, STACK_SELECT_BIN, VERSIONED_LAYOUT_THRESHOLD},
    facts::EnvironmentFacts,
    version::{self, StackVersion},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSet {
    /// Component root below the `current` symlink tree, e.g. `/usr/hdp/current/falcon-server`.
    Versioned { root: String },
    Legacy,
}

impl PathSet {
    pub fn is_versioned(&self) -> bool {
        matches!(self, PathSet::Versioned { .. })
    }

    /// `root/<relative>` for versioned layouts, `legacy` otherwise.
    pub fn path_or(&self, relative: &str, legacy: &str) -> String {
        match self {
            PathSet::Versioned { root } if relative.is_empty() => root.clone(),
            PathSet::Versioned { root } => format!("{root}/{relative}"),
            PathSet::Legacy => legacy.to_string(),
        }
    }
}

/// Maps command roles to component directories, with a fallback role for unknown roles.
#[derive(Clone, Debug)]
pub struct RoleDirectories {
    directories: BTreeMap<&'static str, &'static str>,
    fallback_role: &'static str,
}

impl RoleDirectories {
    /// `fallback_role` must be one of the mapped roles.
    pub fn new(
        directories: impl IntoIterator<Item = (&'static str, &'static str)>,
        fallback_role: &'static str,
    ) -> Self {
        RoleDirectories {
            directories: directories.into_iter().collect(),
            fallback_role,
        }
    }

    /// The role a command runs as: `role` itself if mapped, the fallback role otherwise.
    pub fn effective_role<'a>(&'a self, role: &'a str) -> &'a str {
        if self.directories.contains_key(role) {
            role
        } else {
            self.fallback_role
        }
    }

    pub fn directory(&self, role: &str) -> &'static str {
        let role = self.effective_role(role);
        self.directories.get(role).copied().unwrap_or_default()
    }
}

/// Picks the versioned layout for stacks at or above 2.2, the legacy layout otherwise.
pub fn select_path_set(
    stack_version: Option<&StackVersion>,
    command_role: &str,
    directories: &RoleDirectories,
) -> PathSet {
    if version::meets(stack_version, VERSIONED_LAYOUT_THRESHOLD) {
        let root = format!("{HDP_CURRENT_ROOT}/{}", directories.directory(command_role));
        debug!(command_role, root = %root, "selected versioned layout");
        PathSet::Versioned { root }
    } else {
        debug!(command_role, "selected legacy layout");
        PathSet::Legacy
    }
}

/// `hdp-select set <component> <version>` for rolling upgrades onto a versioned stack.
pub fn stack_select_command(component: &str, facts: &EnvironmentFacts) -> Option<String> {
    let target = facts.upgrade_version.as_deref()?;
    version::meets(StackVersion::parse(target).as_ref(), VERSIONED_LAYOUT_THRESHOLD)
        .then(|| format!("{STACK_SELECT_BIN} set {component} {target}"))
}
