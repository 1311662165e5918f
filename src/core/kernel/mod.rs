/// Transport kernel for the conferencing API.
///
/// The kernel contains only generic request plumbing, organized around
/// three components:
///
/// - `ChecksumSigner`: deterministic serialization of a parameter map into
///   a checksum-authenticated query string (`signer`)
/// - body decoding: XML or JSON into one canonical nested mapping (`codec`)
/// - `RestClient` / `ReqwestRest`: request execution plus response
///   normalization into success payload or typed failure (`rest`)
///
/// # Key Principles
///
/// 1. **Transport Only**: no meeting or recording semantics live here
/// 2. **Pluggable**: the transport is trait-based for dependency injection
/// 3. **Deterministic**: the signer is a pure function of its inputs
/// 4. **Observable**: tracing on the request path
///
/// ```rust,no_run
/// use bbbx::core::kernel::{ChecksumSigner, Params, RestClientBuilder, RestClientConfig};
///
/// # fn example() -> Result<(), bbbx::core::errors::BbbError> {
/// let config = RestClientConfig::new(
///     "https://bbb.example.com/bigbluebutton".to_string(),
///     "bbb".to_string(),
/// );
/// let signer = ChecksumSigner::new("shared_secret".to_string());
/// let rest = RestClientBuilder::new(config, signer).build()?;
/// # Ok(())
/// # }
/// ```
pub mod codec;
pub mod rest;
pub mod signer;

// Re-export key types for convenience
pub use codec::{decode_body, ResponseFormat};
pub use rest::{Attachment, ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
pub use signer::{ChecksumSigner, ParamValue, Params};
