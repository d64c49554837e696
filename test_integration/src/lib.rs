use adsense_common as common;
use common::adsense_v2 as adsense;

/// Create a service of type `S` talking to the mock server.
#[cfg(test)]
macro_rules! mock_service {
    ($service:ty) => {{
        let mut s = <$service>::new_unauthenticated(common::https_client());
        s.set_base_url(mockito::server_url());
        s
    }};
}
