//! Block source abstraction and overflow recovery.

use log::warn;
use thiserror::Error;

/// Audio capture errors
///
/// Only [`AudioError::Overflow`] is transient; every other variant ends the
/// capture session.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio input buffer overflow")]
    Overflow,

    #[error("no audio input device found")]
    NoDevice,

    #[error("audio input device '{0}' not found")]
    DeviceNotFound(String),

    #[error("unsupported sample format: {0}")]
    UnsupportedFormat(String),

    #[error("audio device error: {0}")]
    Device(String),
}

impl AudioError {
    pub fn is_transient(&self) -> bool {
        matches!(self, AudioError::Overflow)
    }
}

/// Pull-based source of fixed-size signed 16-bit mono blocks
pub trait AudioBlockSource {
    /// Samples per block
    fn block_size(&self) -> usize;

    /// Block until `block` (of length [`block_size`](Self::block_size)) is filled
    fn read_block(&mut self, block: &mut [i16]) -> Result<(), AudioError>;
}

impl<S: AudioBlockSource + ?Sized> AudioBlockSource for Box<S> {
    fn block_size(&self) -> usize {
        (**self).block_size()
    }

    fn read_block(&mut self, block: &mut [i16]) -> Result<(), AudioError> {
        (**self).read_block(block)
    }
}

/// Whether a block holds captured audio or substituted silence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStatus {
    Captured,
    Silence,
}

/// Read one block as `f64`, substituting silence on overflow
///
/// `raw` is scratch space reused across calls. Fatal errors are returned
/// untouched; `block` is left as silence in that case.
pub fn read_block_or_silence<S: AudioBlockSource + ?Sized>(
    source: &mut S,
    raw: &mut Vec<i16>,
    block: &mut Vec<f64>,
) -> Result<BlockStatus, AudioError> {
    let size = source.block_size();
    raw.clear();
    raw.resize(size, 0);
    block.clear();

    let status = match source.read_block(raw) {
        Ok(()) => BlockStatus::Captured,
        Err(e) if e.is_transient() => {
            warn!("{}, substituting silence", e);
            BlockStatus::Silence
        }
        Err(e) => {
            block.resize(size, 0.0);
            return Err(e);
        }
    };

    match status {
        BlockStatus::Captured => block.extend(raw.iter().map(|&s| s as f64)),
        BlockStatus::Silence => block.resize(size, 0.0),
    }
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OneShot {
        size: usize,
        result: Option<Result<i16, AudioError>>,
    }

    impl AudioBlockSource for OneShot {
        fn block_size(&self) -> usize {
            self.size
        }

        fn read_block(&mut self, block: &mut [i16]) -> Result<(), AudioError> {
            match self.result.take().unwrap_or(Ok(0)) {
                Ok(value) => {
                    block.fill(value);
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }
    }

    #[test]
    fn test_captured_block_is_converted() {
        let mut source = OneShot {
            size: 16,
            result: Some(Ok(-1200)),
        };
        let (mut raw, mut block) = (Vec::new(), Vec::new());
        let status = read_block_or_silence(&mut source, &mut raw, &mut block).unwrap();

        assert_eq!(status, BlockStatus::Captured);
        assert_eq!(block, vec![-1200.0; 16]);
    }

    #[test]
    fn test_overflow_substitutes_silence() {
        let mut source = OneShot {
            size: 1024,
            result: Some(Err(AudioError::Overflow)),
        };
        let (mut raw, mut block) = (Vec::new(), vec![5.0; 3]);
        let status = read_block_or_silence(&mut source, &mut raw, &mut block).unwrap();

        assert_eq!(status, BlockStatus::Silence);
        assert_eq!(block.len(), 1024);
        assert!(block.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_fatal_error_is_propagated() {
        let mut source = OneShot {
            size: 8,
            result: Some(Err(AudioError::Device("unplugged".into()))),
        };
        let (mut raw, mut block) = (Vec::new(), Vec::new());
        let err = read_block_or_silence(&mut source, &mut raw, &mut block).unwrap_err();

        assert!(!err.is_transient());
        assert!(matches!(err, AudioError::Device(_)));
    }
}
