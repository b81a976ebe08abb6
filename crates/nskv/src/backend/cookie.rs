use std::time::Duration;

use crate::backend::StorageBackend;
use crate::clock::Clock;
use crate::Result;

/// Stored cookies stay valid for one year.
const COOKIE_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// Removal writes an expiry this far in the past so the browser evicts the
/// entry immediately.
const REMOVAL_BACKDATE: Duration = Duration::from_secs(1000);

/// The document's single mutable cookie header, as browsers expose
/// `document.cookie`: reading returns all live cookies joined by `"; "`,
/// writing appends/replaces one cookie without clearing the others.
///
/// This is a trait so the backend can run against an in-memory double on
/// non-browser hosts.
pub trait CookieJar {
    fn read(&self) -> String;

    fn write(&mut self, cookie: &str);
}

/// Key-value backend layered over the cookie header.
///
/// Implements the same `StorageBackend` surface as the native store, so it
/// can be dropped in whenever `localStorage` is unusable. Entries are
/// percent-encoded (keys and values), scoped to `path=/`, and expire one
/// year after the write.
pub struct CookieBackend<J, C> {
    jar: J,
    clock: C,
}

impl<J: CookieJar, C: Clock> CookieBackend<J, C> {
    pub fn new(jar: J, clock: C) -> Self {
        Self { jar, clock }
    }

    fn write_entry(&mut self, key: &str, encoded_value: &str, expires: std::time::SystemTime) {
        self.jar.write(&format!(
            "{}={}; path=/; expires={}",
            urlencoding::encode(key),
            encoded_value,
            httpdate::fmt_http_date(expires)
        ));
    }
}

/// A `name=` needle may only match at the start of a cookie entry, never in
/// the middle of a longer cookie name (`ns=` must not match `other_ns=`).
fn at_entry_boundary(header: &str, pos: usize) -> bool {
    let before = header[..pos].trim_end_matches(' ');
    before.is_empty() || before.ends_with(';')
}

impl<J: CookieJar, C: Clock> StorageBackend for CookieBackend<J, C> {
    fn get(&self, key: &str) -> Option<String> {
        let header = self.jar.read();
        if header.is_empty() {
            return None;
        }

        let needle = format!("{}=", urlencoding::encode(key));
        let mut from = 0;
        while let Some(rel) = header[from..].find(&needle) {
            let pos = from + rel;
            if !at_entry_boundary(&header, pos) {
                from = pos + needle.len();
                continue;
            }

            let start = pos + needle.len();
            let end = header[start..]
                .find(';')
                .map_or(header.len(), |rel| start + rel);
            let raw = &header[start..end];

            // Undecodable percent sequences come back verbatim; the read
            // path never errors.
            return Some(match urlencoding::decode(raw) {
                Ok(decoded) => decoded.into_owned(),
                Err(_) => raw.to_string(),
            });
        }

        None
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let encoded = urlencoding::encode(value).into_owned();
        let expires = self.clock.now() + COOKIE_TTL;
        self.write_entry(key, &encoded, expires);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let expires = self.clock.now() - REMOVAL_BACKDATE;
        self.write_entry(key, "", expires);
        Ok(())
    }
}
