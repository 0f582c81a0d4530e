//! secure/wipe.rs
//! Non-elidable buffer zeroing.
//!
//! The zero pass goes through `zeroize`, which uses volatile writes followed by
//! a compiler fence, so the stores survive even when nothing reads the buffer
//! afterwards. Optional randomized passes run first; the final observable
//! state is always all-zero.

use zeroize::Zeroize;

use crate::secure::random::EntropySource;

/// Zero `buf` in a way the optimizer cannot remove.
#[inline]
pub fn secure_wipe(buf: &mut [u8]) {
    buf.zeroize();
}

/// Overwrite `buf` with `passes` rounds of random bytes, then zero it.
///
/// A failing source ends the random rounds early; the zero pass always runs.
pub fn secure_wipe_with_passes<E>(buf: &mut [u8], passes: u8, source: &mut E)
where
    E: EntropySource + ?Sized,
{
    if buf.is_empty() {
        return;
    }
    for _ in 0..passes {
        if source.fill(buf).is_err() {
            break;
        }
    }
    buf.zeroize();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CoreError;

    struct Failing;

    impl EntropySource for Failing {
        fn fill(&mut self, _dest: &mut [u8]) -> Result<(), CoreError> {
            Err(CoreError::EntropySourceUnavailable("offline".into()))
        }
    }

    #[test]
    fn zero_pass_runs_even_when_source_fails() {
        let mut buf = vec![0xAB; 64];
        secure_wipe_with_passes(&mut buf, 3, &mut Failing);
        assert!(buf.iter().all(|&b| b == 0));
    }

    #[test]
    fn empty_buffer_is_noop() {
        let mut buf: [u8; 0] = [];
        secure_wipe(&mut buf);
        secure_wipe_with_passes(&mut buf, 2, &mut Failing);
    }
}
