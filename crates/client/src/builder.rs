//! Builder assembling the collaborators of a [`Client`].
use std::sync::Arc;

use anyhow::Result;
use client_blockchain_core::{
    DemoContract, DemoEncryptionClient, EncryptionClient, GameContract, ServiceMonitor,
    StaticServiceMonitor,
};
use client_frontend_core::FrontendConfig;
use runtime::{Connection, GameActions, RuntimeConfig, StageBus};

use crate::Client;
use crate::config::CliConfig;

/// Builder for [`Client`].
///
/// Collaborators default to the in-memory demo implementations.
#[derive(Default)]
pub struct ClientBuilder {
    runtime: RuntimeConfig,
    frontend: FrontendConfig,
    cli: CliConfig,
    fail_contract: bool,
    contract: Option<Arc<dyn GameContract>>,
    encryption: Option<Arc<dyn EncryptionClient>>,
    monitor: Option<Box<dyn ServiceMonitor>>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn runtime_config(mut self, config: RuntimeConfig) -> Self {
        self.runtime = config;
        self
    }

    pub fn frontend_config(mut self, config: FrontendConfig) -> Self {
        self.frontend = config;
        self
    }

    pub fn cli_config(mut self, config: CliConfig) -> Self {
        self.cli = config;
        self
    }

    /// Replace the default contract with one that is never reachable.
    pub fn fail_contract(mut self, fail: bool) -> Self {
        self.fail_contract = fail;
        self
    }

    pub fn contract(mut self, contract: Arc<dyn GameContract>) -> Self {
        self.contract = Some(contract);
        self
    }

    pub fn encryption(mut self, encryption: Arc<dyn EncryptionClient>) -> Self {
        self.encryption = Some(encryption);
        self
    }

    pub fn monitor(mut self, monitor: Box<dyn ServiceMonitor>) -> Self {
        self.monitor = Some(monitor);
        self
    }

    pub async fn build(self) -> Result<Client> {
        let contract = match (self.contract, self.fail_contract) {
            (_, true) => Arc::new(DemoContract::unreachable()) as Arc<dyn GameContract>,
            (Some(contract), false) => contract,
            (None, false) => match self.runtime.rng_seed {
                Some(seed) => Arc::new(DemoContract::with_seed(seed)),
                None => Arc::new(DemoContract::new()),
            },
        };
        let encryption = self
            .encryption
            .unwrap_or_else(|| Arc::new(DemoEncryptionClient::new()));
        let monitor = self
            .monitor
            .unwrap_or_else(|| Box::new(StaticServiceMonitor::new(self.cli.demo_mode)));

        let connection =
            Connection::connect(self.cli.player, contract, encryption, monitor.as_ref()).await;

        let bus = StageBus::with_capacity(self.runtime.event_buffer);
        let actions = GameActions::new(self.runtime).with_bus(bus.clone());

        Ok(Client {
            connection,
            actions,
            bus,
            frontend: self.frontend,
        })
    }
}
