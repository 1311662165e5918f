use crate::bbb::client::BbbClient;
use crate::core::config::BbbConfig;
use crate::core::errors::BbbError;
use crate::core::kernel::{
    ChecksumSigner, ReqwestRest, RestClient, RestClientBuilder, RestClientConfig,
};

/// Create a client backed by the kernel REST transport.
pub fn build_client(config: &BbbConfig) -> Result<BbbClient<ReqwestRest>, BbbError> {
    let rest_config = RestClientConfig::new(config.base_url.clone(), "bbb".to_string());
    let signer = ChecksumSigner::new(config.shared_secret().to_string());
    let rest = RestClientBuilder::new(rest_config, signer).build()?;

    Ok(BbbClient::with_rest(rest))
}

/// Wrap an already-built transport; used for dependency injection.
pub fn build_client_with_rest<R: RestClient>(rest: R) -> BbbClient<R> {
    BbbClient::with_rest(rest)
}
