use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Default endpoint of a node running on this machine.
const LOCAL_RPC_URL: &str = "http://localhost:8545";

/// The node the dashboard talks to.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// A node on localhost with the default HTTP JSON-RPC port.
    #[default]
    Local,
    /// Any other HTTP(S) JSON-RPC endpoint.
    Custom { rpc_url: String },
}

impl Environment {
    /// Returns the JSON-RPC URL associated with the environment.
    pub fn rpc_url(&self) -> String {
        match self {
            Environment::Local => LOCAL_RPC_URL.to_string(),
            Environment::Custom { rpc_url } => rpc_url.clone(),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("local") || trimmed == LOCAL_RPC_URL {
            return Ok(Environment::Local);
        }
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Ok(Environment::Custom {
                rpc_url: trimmed.to_string(),
            });
        }
        Err(format!(
            "Invalid RPC endpoint '{}': expected 'local' or an http(s):// URL",
            s
        ))
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.rpc_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_local_aliases() {
        assert_eq!("local".parse::<Environment>(), Ok(Environment::Local));
        assert_eq!("LOCAL".parse::<Environment>(), Ok(Environment::Local));
        assert_eq!(
            "http://localhost:8545".parse::<Environment>(),
            Ok(Environment::Local)
        );
    }

    #[test]
    fn parses_custom_urls() {
        let env: Environment = "https://rpc.example.org/".parse().unwrap();
        assert_eq!(env.rpc_url(), "https://rpc.example.org/");
        assert_eq!(env.to_string(), "Custom");
    }

    #[test]
    fn rejects_non_http_endpoints() {
        assert!("ws://localhost:8546".parse::<Environment>().is_err());
        assert!("mainnet".parse::<Environment>().is_err());
    }
}
