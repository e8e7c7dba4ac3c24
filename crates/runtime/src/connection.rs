//! A connected wallet and the collaborators reached through it.

use std::sync::Arc;

use client_blockchain_core::{Address, EncryptionClient, GameContract, ServiceMonitor, ServiceStatus};

/// Wallet address plus contract and encryption clients.
///
/// The service status is checked once, when the connection is made, and
/// reused by every action on this connection.
#[derive(Clone)]
pub struct Connection {
    address: Address,
    contract: Arc<dyn GameContract>,
    encryption: Arc<dyn EncryptionClient>,
    status: ServiceStatus,
}

impl Connection {
    pub async fn connect(
        address: Address,
        contract: Arc<dyn GameContract>,
        encryption: Arc<dyn EncryptionClient>,
        monitor: &dyn ServiceMonitor,
    ) -> Self {
        let status = monitor.check().await;
        tracing::info!(
            %address,
            contract = %contract.address(),
            fhevm = status.fhevm_available,
            contract_available = status.contract_available,
            demo_mode = status.demo_mode_active,
            "Wallet connected"
        );
        Self::with_status(address, contract, encryption, status)
    }

    pub fn with_status(
        address: Address,
        contract: Arc<dyn GameContract>,
        encryption: Arc<dyn EncryptionClient>,
        status: ServiceStatus,
    ) -> Self {
        Self {
            address,
            contract,
            encryption,
            status,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn contract(&self) -> &dyn GameContract {
        self.contract.as_ref()
    }

    pub fn encryption(&self) -> &dyn EncryptionClient {
        self.encryption.as_ref()
    }

    pub fn status(&self) -> ServiceStatus {
        self.status
    }
}
