// SPDX-License-Identifier: MIT OR Apache-2.0

//! Editable URL decomposition.

use url::Url;

/// The parts of an absolute URL as owned, editable fields.
///
/// Produced by `url_components_for`; callers can tweak individual parts (swap the
/// host for a staging server, append a query) and recompose with [`to_url`].
///
/// [`to_url`]: UrlComponents::to_url
///
/// # Examples
///
/// ```
/// use mdmcfg::domain::UrlComponents;
///
/// let mut parts = UrlComponents::parse("https://mdm.example.com:8443/enroll?x=1").unwrap();
/// assert_eq!(parts.host.as_deref(), Some("mdm.example.com"));
/// assert_eq!(parts.port, Some(8443));
///
/// parts.host = Some("staging.example.com".to_string());
/// parts.query = None;
/// assert_eq!(
///     parts.to_url().unwrap().as_str(),
///     "https://staging.example.com:8443/enroll"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrlComponents {
    /// Scheme without the trailing `:`.
    pub scheme: String,
    /// User name, if present and non-empty.
    pub user: Option<String>,
    /// Password, if present.
    pub password: Option<String>,
    /// Host, with brackets for IPv6 literals.
    pub host: Option<String>,
    /// Explicit port; default ports are not reported.
    pub port: Option<u16>,
    /// Percent-encoded path.
    pub path: String,
    /// Percent-encoded query without the leading `?`.
    pub query: Option<String>,
    /// Fragment without the leading `#`.
    pub fragment: Option<String>,
}

impl UrlComponents {
    /// Parses an absolute URL and decomposes it.
    pub fn parse(input: &str) -> Result<Self, url::ParseError> {
        Url::parse(input).map(|url| Self::from(&url))
    }

    /// Reassembles the components into a [`Url`].
    pub fn to_url(&self) -> Result<Url, url::ParseError> {
        let mut out = format!("{}:", self.scheme);
        if let Some(host) = &self.host {
            out.push_str("//");
            if let Some(user) = &self.user {
                out.push_str(user);
                if let Some(password) = &self.password {
                    out.push(':');
                    out.push_str(password);
                }
                out.push('@');
            }
            out.push_str(host);
            if let Some(port) = self.port {
                out.push_str(&format!(":{}", port));
            }
        }
        out.push_str(&self.path);
        if let Some(query) = &self.query {
            out.push('?');
            out.push_str(query);
        }
        if let Some(fragment) = &self.fragment {
            out.push('#');
            out.push_str(fragment);
        }
        Url::parse(&out)
    }

    /// Decodes the query into key/value pairs.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        match &self.query {
            Some(query) => url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
            None => Vec::new(),
        }
    }
}

impl From<&Url> for UrlComponents {
    fn from(url: &Url) -> Self {
        Self {
            scheme: url.scheme().to_string(),
            user: Some(url.username())
                .filter(|u| !u.is_empty())
                .map(str::to_string),
            password: url.password().map(str::to_string),
            host: url.host_str().map(str::to_string),
            port: url.port(),
            path: url.path().to_string(),
            query: url.query().map(str::to_string),
            fragment: url.fragment().map(str::to_string),
        }
    }
}
