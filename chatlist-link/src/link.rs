use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{LinkError, SmpQueueUri};

const APP_SCHEME: &str = "simplex:/";
const WEB_PREFIX: &str = "https://simplex.chat/";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LinkType {
    Contact,
    Invitation,
    Group,
}

impl LinkType {
    pub fn description(&self) -> &'static str {
        match self {
            Self::Contact => "SimpleX contact address",
            Self::Invitation => "SimpleX one-time invitation",
            Self::Group => "SimpleX group link",
        }
    }
}

/// Supported agent protocol versions advertised by a link, e.g. `v=2-7`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VersionRange {
    pub min: u16,
    pub max: u16,
}

impl FromStr for VersionRange {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |v: &str| {
            v.parse::<u16>()
                .map_err(|_| LinkError::InvalidVersion(s.to_string()))
        };
        let (min, max) = match s.split_once('-') {
            Some((min, max)) => (parse(min)?, parse(max)?),
            None => {
                let v = parse(s)?;
                (v, v)
            }
        };
        if min > max {
            return Err(LinkError::InvalidVersion(s.to_string()));
        }
        Ok(Self { min, max })
    }
}

/// A parsed connection link: contact address, one-time invitation or group link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimplexLink {
    pub link_type: LinkType,
    pub version: Option<VersionRange>,
    pub queue: SmpQueueUri,
}

impl SimplexLink {
    /// Hosts of the relay that carries the connection queue.
    pub fn smp_hosts(&self) -> &[String] {
        &self.queue.server.hosts
    }

    /// Short human-readable form shown instead of the raw URI,
    /// e.g. `SimpleX contact address (via smp8.simplex.im)`.
    pub fn simplex_link_text(&self) -> String {
        let host = self.smp_hosts().first().map(String::as_str).unwrap_or("?");
        format!("{} (via {})", self.link_type.description(), host)
    }
}

impl FromStr for SimplexLink {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix(APP_SCHEME)
            .or_else(|| s.strip_prefix(WEB_PREFIX))
            .ok_or(LinkError::UnknownScheme)?;
        let (path, fragment) = rest.split_once('#').ok_or(LinkError::MissingQuery)?;
        let base_type = match path {
            "contact" => LinkType::Contact,
            "invitation" => LinkType::Invitation,
            other => return Err(LinkError::UnknownPath(other.to_string())),
        };
        let query = fragment.strip_prefix("/?").ok_or(LinkError::MissingQuery)?;

        let mut smp = None;
        let mut version = None;
        let mut data = None;
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = urlencoding::decode(value)
                .map_err(|_| LinkError::InvalidEncoding(key.to_string()))?;
            match key {
                "smp" => smp = Some(SmpQueueUri::from_str(&value)?),
                "v" => version = Some(VersionRange::from_str(&value)?),
                "data" => data = Some(value.into_owned()),
                _ => tracing::trace!(key, "Ignoring link parameter"),
            }
        }
        let queue = smp.ok_or(LinkError::MissingParam("smp"))?;

        let link_type = match (base_type, data) {
            (LinkType::Contact, Some(data)) => {
                let data: serde_json::Value = serde_json::from_str(&data)
                    .map_err(|e| LinkError::InvalidData(e.to_string()))?;
                if data.get("groupLinkId").is_some() {
                    LinkType::Group
                } else {
                    LinkType::Contact
                }
            }
            (link_type, _) => link_type,
        };

        Ok(Self {
            link_type,
            version,
            queue,
        })
    }
}
