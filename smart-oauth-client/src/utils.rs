use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use http::Uri;
use rand::{rngs::ThreadRng, CryptoRng, RngCore};

pub fn generate_nonce() -> String {
    URL_SAFE_NO_PAD.encode(get_random_values::<_, 16>(&mut ThreadRng::default()))
}

pub fn get_random_values<R, const LEN: usize>(rng: &mut R) -> [u8; LEN]
where
    R: RngCore + CryptoRng,
{
    let mut bytes = [0u8; LEN];
    rng.fill_bytes(&mut bytes);
    bytes
}

/// Appends an already encoded query string to `url`.
pub fn append_query(url: &str, query: &str) -> String {
    if query.is_empty() {
        return url.into();
    }
    let separator = match url.find('?') {
        Some(pos) if pos + 1 == url.len() || url.ends_with('&') => "",
        Some(_) => "&",
        None => "?",
    };
    format!("{url}{separator}{query}")
}

pub fn is_absolute_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Whether both urls share scheme and authority.
pub fn same_origin(a: &str, b: &str) -> bool {
    match (a.parse::<Uri>(), b.parse::<Uri>()) {
        (Ok(a), Ok(b)) => {
            a.scheme().is_some()
                && a.authority().is_some()
                && a.scheme() == b.scheme()
                && a.authority() == b.authority()
        }
        _ => false,
    }
}

/// Resolves `path` against `base`, unless `path` is already an absolute http(s) url.
pub fn join_url(base: &str, path: &str) -> String {
    if is_absolute_url(path) {
        return path.into();
    }
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
