use crate::{
    constants::{DEFAULT_KINIT_PATH, KINIT_BINARY, KINIT_SEARCH_DIRS},
    facts::EnvironmentFacts,
};

/// Locations a kinit binary is looked up in, in order of preference.
pub fn kinit_candidates() -> impl Iterator<Item = String> {
    KINIT_SEARCH_DIRS
        .iter()
        .map(|dir| format!("{dir}/{KINIT_BINARY}"))
}

/// The kinit binary the caller found, `/usr/bin/kinit` if none was probed.
pub fn kinit_path_local(facts: &EnvironmentFacts) -> String {
    facts
        .kinit_path
        .clone()
        .unwrap_or_else(|| DEFAULT_KINIT_PATH.to_string())
}
