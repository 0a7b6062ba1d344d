//! # Outbound Ports
//!
//! Control clients supplied by each namespace adapter. The coordinator
//! stores them and hands them out; it never inspects their internals.

use crate::domain::{ClientError, PublicStateUpdate};
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{mock_signature, CaipAddress, CaipChainId, CaipNetwork, Connector};

/// Approved-network data reported by a network client.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApprovedNetworks {
    /// Chain ids the wallet approved.
    pub approved_caip_network_ids: Vec<CaipChainId>,
    /// Whether the wallet accepts any chain.
    pub supports_all_networks: bool,
}

/// Network control client - outbound port.
#[async_trait]
pub trait NetworkControllerClient: Send + Sync {
    /// Ask the wallet to switch to `network`.
    async fn switch_caip_network(&self, network: &CaipNetwork) -> Result<(), ClientError>;

    /// Networks the connected wallet approved.
    async fn get_approved_caip_networks_data(&self) -> Result<ApprovedNetworks, ClientError>;
}

/// Connection control client - outbound port.
#[async_trait]
pub trait ConnectionControllerClient: Send + Sync {
    /// Connect through `connector`, returning the connected account.
    async fn connect_external(&self, connector: &Connector) -> Result<CaipAddress, ClientError>;

    /// Disconnect the current session.
    async fn disconnect(&self) -> Result<(), ClientError>;

    /// Sign `message` with the connected account.
    async fn sign_message(&self, message: &str) -> Result<String, ClientError>;
}

/// Public-state collaborator - outbound port.
///
/// Receives the active namespace and selected network whenever they change.
pub trait PublicStatePublisher: Send + Sync {
    /// Merge `update` into the published state.
    fn set(&self, update: PublicStateUpdate);
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Mock network client for testing.
#[derive(Default)]
pub struct MockNetworkClient {
    /// Data returned by `get_approved_caip_networks_data`.
    pub approved: ApprovedNetworks,
    /// Should return errors?
    pub should_fail: bool,
    /// Networks requested through `switch_caip_network`.
    switched: Mutex<Vec<CaipChainId>>,
}

impl MockNetworkClient {
    /// Mock reporting `approved` ids.
    #[must_use]
    pub fn approving(approved: Vec<CaipChainId>) -> Self {
        Self {
            approved: ApprovedNetworks {
                approved_caip_network_ids: approved,
                supports_all_networks: false,
            },
            ..Self::default()
        }
    }

    /// Mock failing every request.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Networks requested so far, oldest first.
    #[must_use]
    pub fn switched(&self) -> Vec<CaipChainId> {
        self.switched.lock().clone()
    }
}

#[async_trait]
impl NetworkControllerClient for MockNetworkClient {
    async fn switch_caip_network(&self, network: &CaipNetwork) -> Result<(), ClientError> {
        if self.should_fail {
            return Err(ClientError::Rejected("Mock failure".to_string()));
        }
        self.switched.lock().push(network.id.clone());
        Ok(())
    }

    async fn get_approved_caip_networks_data(&self) -> Result<ApprovedNetworks, ClientError> {
        if self.should_fail {
            return Err(ClientError::Transport("Mock failure".to_string()));
        }
        Ok(self.approved.clone())
    }
}

/// Mock connection client for testing.
pub struct MockConnectionClient {
    /// Account returned on connect and used as signer.
    pub account: CaipAddress,
    /// Should return errors?
    pub should_fail: bool,
    /// Number of `disconnect` calls.
    disconnects: Mutex<u32>,
}

impl MockConnectionClient {
    /// Mock wallet holding `account`.
    #[must_use]
    pub fn new(account: CaipAddress) -> Self {
        Self {
            account,
            should_fail: false,
            disconnects: Mutex::new(0),
        }
    }

    /// Number of `disconnect` calls so far.
    #[must_use]
    pub fn disconnects(&self) -> u32 {
        *self.disconnects.lock()
    }
}

#[async_trait]
impl ConnectionControllerClient for MockConnectionClient {
    async fn connect_external(&self, _connector: &Connector) -> Result<CaipAddress, ClientError> {
        if self.should_fail {
            return Err(ClientError::Rejected("Mock failure".to_string()));
        }
        Ok(self.account.clone())
    }

    async fn disconnect(&self) -> Result<(), ClientError> {
        *self.disconnects.lock() += 1;
        Ok(())
    }

    async fn sign_message(&self, message: &str) -> Result<String, ClientError> {
        if self.should_fail {
            return Err(ClientError::Rejected("Mock failure".to_string()));
        }
        Ok(mock_signature(self.account.address(), message))
    }
}
