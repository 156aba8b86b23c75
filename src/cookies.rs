// Cookie reader — pulls named values out of a `name=value; name2=value2` string.
//
// The detection server issues a `csrftoken` cookie that has to be echoed
// back in the `X-CSRFToken` header of every mutating request. Where the
// cookie string comes from is abstracted behind `CookieSource` so the API
// client can be handed a fixed string in tests or the CLI.

use percent_encoding::percent_decode_str;

/// Name of the anti-forgery cookie issued by the server.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Anything that can produce the current cookie string.
pub trait CookieSource: Send + Sync {
    fn cookie_string(&self) -> String;
}

/// A fixed cookie string, e.g. loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticCookies(pub String);

impl CookieSource for StaticCookies {
    fn cookie_string(&self) -> String {
        self.0.clone()
    }
}

/// Find `name` in a cookie string and return its percent-decoded value.
///
/// A segment matches only when its trimmed text starts with `"<name>="`,
/// so `xcsrftoken=...` never answers a lookup for `csrftoken`. The first
/// match wins.
pub fn get_cookie(cookies: &str, name: &str) -> Option<String> {
    if cookies.is_empty() {
        return None;
    }

    let prefix = format!("{name}=");
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|segment| segment.strip_prefix(prefix.as_str()))
        .map(|raw| percent_decode_str(raw).decode_utf8_lossy().into_owned())
}

/// Reads cookies from a `CookieSource`.
pub struct CookieReader<'a> {
    source: &'a dyn CookieSource,
}

impl<'a> CookieReader<'a> {
    pub fn new(source: &'a dyn CookieSource) -> Self {
        Self { source }
    }

    pub fn get(&self, name: &str) -> Option<String> {
        get_cookie(&self.source.cookie_string(), name)
    }

    pub fn csrf_token(&self) -> Option<String> {
        self.get(CSRF_COOKIE)
    }
}
