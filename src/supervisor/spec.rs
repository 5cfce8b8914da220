//! Server entries from the config's `servers` list.

use std::fmt;

/// A single `host:port` entry.
///
/// Only the port is used. Neither part is validated: whatever follows the last
/// `:` is handed to the external program as the port.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerSpec(String);

impl ServerSpec {
    /// Substring after the last `:`, or the whole entry when there is none.
    pub fn port(&self) -> &str {
        match self.0.rsplit_once(':') {
            Some((_, port)) => port,
            None => &self.0,
        }
    }

    /// Whether the port parses as a TCP port number.
    pub fn has_numeric_port(&self) -> bool {
        self.port().parse::<u16>().is_ok()
    }
}

impl From<String> for ServerSpec {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for ServerSpec {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<&String> for ServerSpec {
    fn from(raw: &String) -> Self {
        Self(raw.clone())
    }
}

impl fmt::Display for ServerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
