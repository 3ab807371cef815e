pub(crate) const DEFAULT_USER_AGENT: &str = concat!("paceload/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_REQUESTS: u64 = 100;
pub const DEFAULT_RATE: &str = "10";
pub const DEFAULT_TIMEOUT: &str = "10s";
