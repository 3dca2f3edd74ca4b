use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::auth::{CredentialVerifier, SessionStore};
use crate::config::RaffleInfo;
use crate::service::LedgerService;

pub struct ApiState {
    pub ledger: LedgerService,
    pub verifier: Arc<dyn CredentialVerifier>,
    pub sessions: SessionStore,
    pub raffle: RaffleInfo,
    pub start_time: std::time::Instant,
    pub prometheus: PrometheusHandle,
}
