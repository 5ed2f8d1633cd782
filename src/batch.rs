//! Parallel address derivation.
//!
//! Workers share exactly one piece of mutable state, an atomic work index.
//! Each worker repeatedly claims the next index with `fetch_add`, derives that
//! key with its own [`AddressDeriver`], and fills the matching output slot.
//! Slots are positional, so the result at index `i` is always the address of
//! key `i` whatever the completion order.

use crate::address::{AddressDeriver, EthereumAddress, PublicKey};
use crate::error::{ErrorCode, OracleResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;
use std::thread;
use tracing::{debug, trace};

/// Worker pool sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    /// Upper bound on worker threads per batch call (at least 1)
    pub max_workers: usize,
}

impl BatchConfig {
    /// One worker per available hardware thread, minimum 1.
    pub fn hardware() -> Self {
        let n = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self::with_workers(n)
    }

    /// Fixed worker count, clamped to at least 1.
    pub const fn with_workers(max_workers: usize) -> Self {
        Self {
            max_workers: if max_workers == 0 { 1 } else { max_workers },
        }
    }

    /// Threads actually started for a job of `jobs` keys.
    pub fn workers_for(&self, jobs: usize) -> usize {
        self.max_workers.min(jobs).max(1)
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self::hardware()
    }
}

/// Fans a set of public keys across a scoped worker pool.
#[derive(Debug, Clone, Default)]
pub struct BatchDeriver {
    config: BatchConfig,
}

impl BatchDeriver {
    /// Create a deriver with the given pool configuration.
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    /// Get the pool configuration.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Derive every key; `result[i]` is the address of `keys[i]`.
    ///
    /// Blocks until all workers have joined. A slot left unfilled after the
    /// join is reported as `E300_CountMismatch` rather than dropped.
    pub fn derive_all(&self, keys: &[PublicKey]) -> OracleResult<Vec<EthereumAddress>> {
        collect_slots(self.run(keys))
    }

    /// Derive into caller-provided slots.
    ///
    /// Fails with `E300_CountMismatch` before any work starts when
    /// `slots.len() != keys.len()`.
    pub fn derive_into(
        &self,
        keys: &[PublicKey],
        slots: &mut [Option<EthereumAddress>],
    ) -> OracleResult<()> {
        if keys.len() != slots.len() {
            return Err(ErrorCode::E300_CountMismatch(
                keys.len() as u64,
                slots.len() as u64,
            ));
        }
        let addresses = collect_slots(self.run(keys))?;
        for (slot, address) in slots.iter_mut().zip(addresses) {
            *slot = Some(address);
        }
        Ok(())
    }

    /// Validate raw key buffers, then derive them all.
    ///
    /// Any buffer that is not exactly 64 bytes fails the whole batch with
    /// `E200_InvalidKeySize` and no worker is started.
    pub fn derive_all_raw<K: AsRef<[u8]>>(&self, keys: &[K]) -> OracleResult<Vec<EthereumAddress>> {
        let keys = keys
            .iter()
            .map(|k| PublicKey::from_slice(k.as_ref()))
            .collect::<OracleResult<Vec<_>>>()?;
        self.derive_all(&keys)
    }

    fn run(&self, keys: &[PublicKey]) -> Vec<OnceLock<EthereumAddress>> {
        let slots: Vec<OnceLock<EthereumAddress>> = keys.iter().map(|_| OnceLock::new()).collect();
        if keys.is_empty() {
            return slots;
        }

        let workers = self.config.workers_for(keys.len());
        debug!(keys = keys.len(), workers, "dispatching batch derivation");

        let next = AtomicUsize::new(0);
        thread::scope(|scope| {
            for worker in 0..workers {
                let next = &next;
                let slots = &slots;
                scope.spawn(move || {
                    let mut deriver = AddressDeriver::new();
                    let mut derived = 0usize;
                    loop {
                        let i = next.fetch_add(1, Ordering::Relaxed);
                        let Some(key) = keys.get(i) else { break };
                        // Each index is claimed once, so the slot is always empty here.
                        let _ = slots[i].set(deriver.derive(key));
                        derived += 1;
                    }
                    trace!(worker, derived, "batch worker finished");
                });
            }
        });

        slots
    }
}

/// Unwrap every slot in order; an unfilled slot fails the whole batch.
fn collect_slots(slots: Vec<OnceLock<EthereumAddress>>) -> OracleResult<Vec<EthereumAddress>> {
    let total = slots.len();
    let addresses: Vec<_> = slots.into_iter().filter_map(OnceLock::into_inner).collect();
    if addresses.len() != total {
        return Err(ErrorCode::E300_CountMismatch(
            total as u64,
            addresses.len() as u64,
        ));
    }
    Ok(addresses)
}

/// Derive a batch with the hardware-sized default pool.
pub fn derive_all(keys: &[PublicKey]) -> OracleResult<Vec<EthereumAddress>> {
    BatchDeriver::default().derive_all(keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(n: usize) -> Vec<PublicKey> {
        (0..n)
            .map(|i| {
                let mut k = [0u8; 64];
                k[..8].copy_from_slice(&(i as u64).to_le_bytes());
                PublicKey::from(k)
            })
            .collect()
    }

    #[test]
    fn test_config_clamps() {
        assert_eq!(BatchConfig::with_workers(0).max_workers, 1);
        assert!(BatchConfig::hardware().max_workers >= 1);
        let cfg = BatchConfig::with_workers(8);
        assert_eq!(cfg.workers_for(3), 3);
        assert_eq!(cfg.workers_for(100), 8);
        assert_eq!(cfg.workers_for(0), 1);
    }

    #[test]
    fn test_positional_results() {
        let keys = keys(37);
        let out = BatchDeriver::new(BatchConfig::with_workers(4))
            .derive_all(&keys)
            .unwrap();
        assert_eq!(out.len(), keys.len());
        let mut seq = AddressDeriver::new();
        for (key, addr) in keys.iter().zip(&out) {
            assert_eq!(&seq.derive(key), addr);
        }
    }

    #[test]
    fn test_empty_batch() {
        assert!(derive_all(&[]).unwrap().is_empty());
        let mut slots: Vec<Option<EthereumAddress>> = Vec::new();
        assert!(BatchDeriver::default().derive_into(&[], &mut slots).is_ok());
    }

    #[test]
    fn test_count_mismatch() {
        let keys = keys(3);
        let mut slots = vec![None, None];
        assert_eq!(
            BatchDeriver::default().derive_into(&keys, &mut slots),
            Err(ErrorCode::E300_CountMismatch(3, 2))
        );
        assert!(slots.iter().all(Option::is_none));
    }

    #[test]
    fn test_raw_batch_rejects_bad_key() {
        let raw = vec![vec![0u8; 64], vec![0u8; 65], vec![0u8; 64]];
        assert_eq!(
            BatchDeriver::default().derive_all_raw(&raw).unwrap_err(),
            ErrorCode::E200_InvalidKeySize(65)
        );
    }

    #[test]
    fn test_unfilled_slot_fails_batch() {
        let mut deriver = AddressDeriver::new();
        let keys = keys(3);
        let slots: Vec<OnceLock<EthereumAddress>> = (0..3).map(|_| OnceLock::new()).collect();
        let _ = slots[0].set(deriver.derive(&keys[0]));
        let _ = slots[2].set(deriver.derive(&keys[2]));
        assert_eq!(
            collect_slots(slots).unwrap_err(),
            ErrorCode::E300_CountMismatch(3, 2)
        );

        let full: Vec<OnceLock<EthereumAddress>> =
            keys.iter().map(|k| OnceLock::from(deriver.derive(k))).collect();
        let out = collect_slots(full).unwrap();
        assert_eq!(out[1], deriver.derive(&keys[1]));
    }
}
