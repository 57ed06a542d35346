//! Background key rotation and retirement sweeps

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use authgate_shared::KeyRotationConfig;

use crate::domain::entities::KeyId;
use crate::errors::DomainError;

use super::key_ring::{KeyRing, SweepReport};

/// Drives rotation and retirement on an independent timer
///
/// Each tick rotates when the active key has outlived the rotation interval,
/// then sweeps grace and retired keys. Issuance and verification never wait
/// on a cycle.
pub struct KeyRotationService {
    key_ring: Arc<KeyRing>,
    config: KeyRotationConfig,
}

impl KeyRotationService {
    pub fn new(key_ring: Arc<KeyRing>, config: KeyRotationConfig) -> Self {
        Self { key_ring, config }
    }

    /// Run a single rotation cycle
    ///
    /// # Returns
    /// * `Ok(RotationCycleResult)` - Summary of the cycle; rotation failures
    ///   are recorded in `errors` and do not prevent the sweep
    /// * `Err(DomainError)` - Reserved for failures that abort the cycle
    pub async fn run_cycle(&self) -> Result<RotationCycleResult, DomainError> {
        if !self.config.enabled {
            return Ok(RotationCycleResult::default());
        }

        let mut result = RotationCycleResult::default();

        if self.key_ring.rotation_due() {
            match self.key_ring.rotate() {
                Ok(kid) => result.rotated = Some(kid),
                Err(e) => {
                    error!("Failed to rotate signing key: {}", e);
                    result.errors.push(format!("Rotation error: {}", e));
                }
            }
        }

        result.sweep = self.key_ring.sweep_retirement();

        if result.rotated.is_some() || !result.sweep.is_empty() {
            info!(
                rotated = ?result.rotated,
                retired = result.sweep.retired.len(),
                purged = result.sweep.purged.len(),
                "Key rotation cycle completed"
            );
        }

        Ok(result)
    }

    /// Start the rotation service as a background task
    ///
    /// Returns `None` when rotation is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Key rotation service is disabled");
            return None;
        }

        let interval = self.config.sweep_interval();

        Some(tokio::spawn(async move {
            info!(
                "Key rotation service started - will run every {} seconds",
                interval.as_secs()
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                match self.run_cycle().await {
                    Ok(result) => {
                        if !result.errors.is_empty() {
                            warn!("Rotation cycle completed with errors: {:?}", result.errors);
                        }
                    }
                    Err(e) => {
                        error!("Key rotation cycle failed: {}", e);
                    }
                }
            }
        }))
    }
}

/// Result of one rotation cycle
#[derive(Debug, Default)]
pub struct RotationCycleResult {
    /// New active key, if the cycle rotated
    pub rotated: Option<KeyId>,
    pub sweep: SweepReport,
    /// Any errors encountered during the cycle
    pub errors: Vec<String>,
}

impl RotationCycleResult {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
