use std::str::FromStr as _;

use crate::SimplexLink;

/// A link found in free text together with the exact text it was parsed from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkMatch {
    pub text: String,
    pub link: SimplexLink,
}

impl LinkMatch {
    pub fn display_text(&self) -> String {
        self.link.simplex_link_text()
    }
}

/// Returns the link if `text` holds exactly one SimpleX link.
///
/// Multi-line input is never treated as a link, and text containing two or
/// more links is ambiguous, so both yield `None`. Tokens that look like links
/// but fail to parse are ordinary words.
pub fn detect_single_link(text: &str) -> Option<LinkMatch> {
    if text.contains('\n') {
        return None;
    }
    let mut found = None;
    for token in text.split_whitespace() {
        let link = match SimplexLink::from_str(token) {
            Ok(link) => link,
            Err(err) => {
                tracing::trace!(?err, "Token is not a link");
                continue;
            }
        };
        if found.is_some() {
            tracing::debug!("Multiple links in text");
            return None;
        }
        found = Some(LinkMatch {
            text: token.to_string(),
            link,
        });
    }
    found
}
