//! Shared application state

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::calibration::Calibration;
use crate::config::{Config, ObjectItem};
use crate::error::NetuiError;
use crate::store::CalibrationStore;

pub struct AppState {
    /// Calibration entries and their store; one lock so a commit updates both together.
    /// Store access blocks, so commit and history run under `spawn_blocking`.
    pub calibration: Arc<Mutex<Calibration>>,
    /// Objects listed by the inspector
    pub objects: Vec<ObjectItem>,
}

impl AppState {
    /// Reads the store; call from a blocking context.
    pub fn new(config: &Config, store: CalibrationStore) -> Result<Arc<Self>, NetuiError> {
        let calibration = Calibration::new(&config.calibration, store)?;
        Ok(Arc::new(Self {
            calibration: Arc::new(Mutex::new(calibration)),
            objects: config.objects.clone(),
        }))
    }

    pub fn calibration(&self) -> MutexGuard<'_, Calibration> {
        lock_calibration(&self.calibration)
    }
}

/// A panic while holding the lock leaves the registry consistent, so the
/// poison flag is ignored.
pub fn lock_calibration(calibration: &Mutex<Calibration>) -> MutexGuard<'_, Calibration> {
    calibration.lock().unwrap_or_else(PoisonError::into_inner)
}
