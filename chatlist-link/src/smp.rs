use std::str::FromStr;

use crate::{KeyHash, LinkError};

const SMP_SCHEME: &str = "smp://";

/// Address of an SMP relay: `smp://<key hash>@<host>[,<host>...][:<port>]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmpServer {
    pub key_hash: KeyHash,
    // Onion and clearnet hosts of the same server, primary first.
    pub hosts: Vec<String>,
    pub port: Option<u16>,
}

impl SmpServer {
    pub fn primary_host(&self) -> &str {
        // Parsing guarantees at least one host.
        self.hosts.first().map(String::as_str).unwrap_or_default()
    }
}

impl std::fmt::Display for SmpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{SMP_SCHEME}{}@{}", self.key_hash, self.hosts.join(","))?;
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        Ok(())
    }
}

impl SmpServer {
    // `<key hash>@<hosts>[:<port>]`, scheme already stripped.
    fn parse_authority(s: &str) -> Result<Self, LinkError> {
        let (key_hash, authority) = s
            .split_once('@')
            .ok_or_else(|| LinkError::InvalidServer("missing key hash".to_string()))?;
        let key_hash = KeyHash::from_str(key_hash)?;
        let (hosts, port) = match authority.rsplit_once(':') {
            Some((hosts, port)) => {
                let port = port
                    .parse::<u16>()
                    .map_err(|e| LinkError::InvalidServer(format!("invalid port '{port}': {e}")))?;
                (hosts, Some(port))
            }
            None => (authority, None),
        };
        let hosts: Vec<String> = hosts.split(',').map(str::to_string).collect();
        if hosts.iter().any(|h| h.is_empty()) {
            return Err(LinkError::InvalidServer("empty host".to_string()));
        }
        Ok(Self {
            key_hash,
            hosts,
            port,
        })
    }
}

impl FromStr for SmpServer {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix(SMP_SCHEME)
            .ok_or_else(|| LinkError::InvalidServer(format!("expected {SMP_SCHEME} scheme")))?;
        Self::parse_authority(rest)
    }
}

/// Queue address embedded in connection links:
/// `smp://<server>/<queue id>#/?<queue params>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmpQueueUri {
    pub server: SmpServer,
    pub queue_id: String,
}

impl FromStr for SmpQueueUri {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Queue parameters after '#' are negotiated by the agent, not here.
        let address = s.split_once('#').map(|(a, _)| a).unwrap_or(s);
        let rest = address
            .strip_prefix(SMP_SCHEME)
            .ok_or_else(|| LinkError::InvalidServer(format!("expected {SMP_SCHEME} scheme")))?;
        let (server, queue_id) = rest
            .split_once('/')
            .ok_or_else(|| LinkError::InvalidServer("missing queue id".to_string()))?;
        if queue_id.is_empty() {
            return Err(LinkError::InvalidServer("empty queue id".to_string()));
        }
        Ok(Self {
            server: SmpServer::parse_authority(server)?,
            queue_id: queue_id.to_string(),
        })
    }
}
