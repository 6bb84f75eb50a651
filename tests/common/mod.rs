#![allow(dead_code)]

pub mod http_server;

/// Client that never goes through a proxy, so local test servers are reached
/// directly whatever the environment says.
pub fn direct_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Deterministic test body.
pub fn body(len: usize) -> Vec<u8> {
    (0u8..251).cycle().take(len).collect()
}
