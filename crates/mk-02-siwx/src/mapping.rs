//! # SIWE to SIWX Mapping
//!
//! Wires an application SIWE backend into a ready [`DefaultSiwx`]:
//!
//! ```text
//! SiweClient ──┬── get_message_params ──► InformalMessenger (nonce per attempt)
//!              ├── verify_message ──────► NamespaceVerifier(eip155)
//!              └── session hooks ───────► SiweStorage
//! ```

use crate::adapters::{
    ClientNonceProvider, InMemoryNonceIssuer, InformalMessenger, InformalMessengerParams,
    NamespaceVerifier, ReplayGuard, SiweStorage, SiweVerificationBackend,
};
use crate::config::MessengerConfig;
use crate::ports::{NonceProvider, SiweClient, SiweMessageParams, SiwxVerifier};
use crate::service::DefaultSiwx;
use shared_types::ChainNamespace;
use std::sync::Arc;
use tracing::{info, warn};

/// Build a [`DefaultSiwx`] from `client` with default fallbacks.
pub async fn map_to_siwx(client: Arc<dyn SiweClient>) -> DefaultSiwx {
    map_to_siwx_with(client, &MessengerConfig::default()).await
}

/// Build a [`DefaultSiwx`] from `client`, using `config` where the client
/// supplies no challenge parameters.
pub async fn map_to_siwx_with(client: Arc<dyn SiweClient>, config: &MessengerConfig) -> DefaultSiwx {
    let nonces: Arc<dyn NonceProvider> = Arc::new(ClientNonceProvider::new(Arc::clone(&client)));
    let verifier = evm_verifier(&client);
    assemble(client, config, nonces, Arc::new(verifier)).await
}

/// Like [`map_to_siwx_with`], but nonces come from `issuer` and each one
/// is accepted by verification once.
pub async fn map_to_siwx_guarded(
    client: Arc<dyn SiweClient>,
    issuer: Arc<InMemoryNonceIssuer>,
    config: &MessengerConfig,
) -> DefaultSiwx {
    let verifier = ReplayGuard::new(evm_verifier(&client), Arc::clone(&issuer));
    assemble(client, config, issuer, Arc::new(verifier)).await
}

fn evm_verifier(client: &Arc<dyn SiweClient>) -> NamespaceVerifier<SiweVerificationBackend> {
    NamespaceVerifier::new(
        ChainNamespace::EIP155,
        SiweVerificationBackend::new(Arc::clone(client)),
    )
}

async fn assemble(
    client: Arc<dyn SiweClient>,
    config: &MessengerConfig,
    nonces: Arc<dyn NonceProvider>,
    verifier: Arc<dyn SiwxVerifier>,
) -> DefaultSiwx {
    let params = match client.get_message_params().await {
        Ok(params) => params.unwrap_or_default(),
        Err(e) => {
            warn!(error = %e, "[mk-02] Message params unavailable, using fallbacks");
            SiweMessageParams::default()
        }
    };

    let domain = non_empty(params.domain).unwrap_or_else(|| config.fallback_domain.clone());
    let uri = non_empty(params.uri).unwrap_or_else(|| config.fallback_uri.clone());
    info!(domain = %domain, uri = %uri, "[mk-02] SIWX configured");

    let messenger = InformalMessenger::new(
        InformalMessengerParams::new(domain, uri, nonces)
            .with_expiration(params.expiry)
            .with_statement(params.statement.or_else(|| config.default_statement.clone()))
            .with_version(config.version.clone()),
    );

    DefaultSiwx::new(
        Arc::new(messenger),
        vec![verifier],
        Arc::new(SiweStorage::new(client)),
    )
}

/// Empty strings count as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
