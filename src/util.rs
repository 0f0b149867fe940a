use http::HeaderMap;
use url::Url;

use crate::TyreqResult;
use crate::error::Error;

const MAX_PREVIEW_LEN: usize = 2048;

pub(crate) fn merge_headers(default_headers: &HeaderMap, request_headers: &HeaderMap) -> HeaderMap {
    let mut merged = default_headers.clone();
    for (name, value) in request_headers {
        merged.insert(name.clone(), value.clone());
    }
    merged
}

pub(crate) fn parse_endpoint(endpoint: &str) -> TyreqResult<Url> {
    let url = Url::parse(endpoint).map_err(|_| Error::InvalidUrl {
        url: endpoint.to_owned(),
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::InvalidUrl {
            url: endpoint.to_owned(),
        });
    }
    Ok(url)
}

pub(crate) fn append_query(url: &mut Url, query: &str) {
    if query.is_empty() {
        return;
    }

    let mut pairs = url.query_pairs_mut();
    for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
        pairs.append_pair(&name, &value);
    }
}

pub(crate) fn truncate_body(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.chars().count() <= MAX_PREVIEW_LEN {
        return text.into_owned();
    }

    let truncated: String = text.chars().take(MAX_PREVIEW_LEN).collect();
    format!("{truncated}...(truncated)")
}
