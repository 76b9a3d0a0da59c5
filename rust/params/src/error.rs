use std::num::ParseIntError;

use snafu::Snafu;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("required configuration key {path:?} is missing"))]
    MissingKey { path: String },

    #[snafu(display("configuration key {path:?} is not {expected}"))]
    InvalidType { path: String, expected: &'static str },

    #[snafu(display("configuration key {path:?} is {value:?}, expected \"true\" or \"false\""))]
    InvalidBoolean { path: String, value: String },

    #[snafu(display("host list {path:?} is empty"))]
    EmptyHostList { path: String },

    #[snafu(display("no port in address {address:?}"))]
    MissingPort { address: String },

    #[snafu(display("address {address:?} has invalid port {port:?}"))]
    InvalidPort {
        source: ParseIntError,
        address: String,
        port: String,
    },

    #[snafu(display("unknown storm daemon {daemon:?}"))]
    UnknownDaemon { daemon: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
