use http::header::{self, HeaderMap, HeaderName};

/// Headers never copied from the inbound request to the upstream request
///
/// The upstream client negotiates its own `accept-encoding` and decodes the
/// response, so relayed bodies are always identity-encoded.
pub static REQUEST_DENY: [HeaderName; 2] = [header::HOST, header::ACCEPT_ENCODING];

/// Headers never copied from the upstream response to the caller
///
/// The serving layer decides the framing of the relayed body itself.
pub static RESPONSE_DENY: [HeaderName; 1] = [header::TRANSFER_ENCODING];

/// Check if a header name is in a deny list
pub fn is_header_denied(name: &HeaderName, deny: &[HeaderName]) -> bool {
    deny.contains(name)
}

/// Copy every header except the denied ones
///
/// Multi-valued headers keep all their values in their original order.
pub fn strip_headers(headers: &HeaderMap, deny: &[HeaderName]) -> HeaderMap {
    let mut result = HeaderMap::with_capacity(headers.len());

    for (name, value) in headers {
        if !is_header_denied(name, deny) {
            result.append(name.clone(), value.clone());
        }
    }

    result
}
