use snafu::{OptionExt, ResultExt};

use crate::error::{InvalidPortSnafu, MissingPortSnafu, Result};

/// Port of a `host:port` or `scheme://host:port[/path]` address, or `fallback` when no
/// address is configured.
///
/// A bare number is taken as the port itself. An address without a port fails instead of
/// silently falling back.
pub fn resolve_port(address: Option<&str>, fallback: u16) -> Result<u16> {
    match address.map(str::trim) {
        None | Some("") => Ok(fallback),
        Some(address) => port_from_address(address),
    }
}

pub fn port_from_address(address: &str) -> Result<u16> {
    let without_scheme = address
        .split_once("://")
        .map_or(address, |(_scheme, rest)| rest);
    let authority = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or(without_scheme);
    if !authority.is_empty() && authority.bytes().all(|b| b.is_ascii_digit()) {
        return parse_port(address, authority);
    }
    let (_host, port) = authority
        .rsplit_once(':')
        .context(MissingPortSnafu { address })?;
    parse_port(address, port)
}

/// Parses a bare port configured on its own, `address` names it in errors.
pub fn parse_port(address: &str, port: &str) -> Result<u16> {
    port.trim()
        .parse::<u16>()
        .context(InvalidPortSnafu { address, port })
}
