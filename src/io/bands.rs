//! Raw band-buffer decoding.
//! Turns the per-index byte buffers delivered by the imagery collaborator
//! into validated sample sequences, with a deterministic synthetic fallback
//! when a buffer yields no usable data.
use std::path::Path;

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::types::SpectralIndexKind;

/// Bytes skipped at each end of a buffer before scanning for samples.
pub const HEADER_MARGIN: usize = 1000;

/// Stride between consecutive sample reads.
const STRIDE: usize = 4;

/// Number of samples generated when a buffer decodes to nothing.
pub const FALLBACK_SAMPLES: usize = 1000;

/// Base seed for the synthetic fallback generator; mixed with the index
/// kind so every index gets its own reproducible sequence.
const FALLBACK_SEED: u64 = 0x5EED_BA5E;

/// A validated sample sequence for one spectral index.
///
/// `is_fallback` marks sequences that were fabricated because the raw
/// buffer contained no valid data; downstream consumers use it to tell
/// real statistics from synthetic ones.
#[derive(Debug, Clone)]
pub struct BandSample {
    pub index: SpectralIndexKind,
    pub values: Array1<f64>,
    pub is_fallback: bool,
}

impl BandSample {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Decode a raw band buffer into a `BandSample`.
///
/// The buffer is scanned in 4-byte strides between the header margins; each
/// stride is read as a little-endian f32. Non-finite reads fall back to a
/// 16-bit secondary decode (first two stride bytes, normalized to [-1, 1]).
/// Values outside the index's valid range are discarded. If nothing
/// survives, a synthetic sample is generated instead so statistics stay
/// defined for every index.
///
/// Pure function of `(buffer, index)`.
pub fn decode_band(buffer: &[u8], index: SpectralIndexKind) -> BandSample {
    let (lo, hi) = index.valid_range();
    let mut values: Vec<f64> = Vec::new();

    if buffer.len() > 2 * HEADER_MARGIN {
        let end = buffer.len() - HEADER_MARGIN;
        let mut i = HEADER_MARGIN;
        while i < end {
            if i + STRIDE <= buffer.len() {
                let raw = f32::from_le_bytes([
                    buffer[i],
                    buffer[i + 1],
                    buffer[i + 2],
                    buffer[i + 3],
                ]);
                let value = if raw.is_finite() {
                    raw as f64
                } else {
                    let word = u16::from_le_bytes([buffer[i], buffer[i + 1]]);
                    (word as f64 / 65535.0) * 2.0 - 1.0
                };

                if value >= lo && value <= hi {
                    values.push(value);
                }
            }
            i += STRIDE;
        }
    }

    if values.is_empty() {
        warn!("no valid samples decoded for {index}, generating synthetic fallback");
        return synthetic_fallback(index);
    }

    debug!("decoded {} valid samples for {index}", values.len());
    BandSample {
        index,
        values: Array1::from_vec(values),
        is_fallback: false,
    }
}

/// Generate the synthetic fallback sample for an index.
///
/// Values are drawn from an index-specific uniform distribution centered on
/// a plausible mean for that index. The generator is seeded per index, so
/// the same call always produces the same sequence.
pub fn synthetic_fallback(index: SpectralIndexKind) -> BandSample {
    let mut rng = StdRng::seed_from_u64(FALLBACK_SEED ^ index as u64);
    let (lo, hi) = match index {
        SpectralIndexKind::Ndvi => (0.1, 0.9),
        SpectralIndexKind::Evi => (0.1, 0.7),
        SpectralIndexKind::Savi => (0.1, 0.8),
        SpectralIndexKind::Urban => (-0.15, 0.15),
        SpectralIndexKind::Water => (-0.2, 0.2),
        SpectralIndexKind::Moisture => (0.1, 0.6),
    };

    let values: Vec<f64> = (0..FALLBACK_SAMPLES).map(|_| rng.gen_range(lo..hi)).collect();

    BandSample {
        index,
        values: Array1::from_vec(values),
        is_fallback: true,
    }
}

/// The six raw band buffers consumed by one analysis.
#[derive(Debug, Clone, Default)]
pub struct BandSet {
    pub ndvi: Vec<u8>,
    pub evi: Vec<u8>,
    pub savi: Vec<u8>,
    pub urban: Vec<u8>,
    pub water: Vec<u8>,
    pub moisture: Vec<u8>,
}

impl BandSet {
    pub fn buffer(&self, index: SpectralIndexKind) -> &[u8] {
        match index {
            SpectralIndexKind::Ndvi => &self.ndvi,
            SpectralIndexKind::Evi => &self.evi,
            SpectralIndexKind::Savi => &self.savi,
            SpectralIndexKind::Urban => &self.urban,
            SpectralIndexKind::Water => &self.water,
            SpectralIndexKind::Moisture => &self.moisture,
        }
    }

    pub fn buffer_mut(&mut self, index: SpectralIndexKind) -> &mut Vec<u8> {
        match index {
            SpectralIndexKind::Ndvi => &mut self.ndvi,
            SpectralIndexKind::Evi => &mut self.evi,
            SpectralIndexKind::Savi => &mut self.savi,
            SpectralIndexKind::Urban => &mut self.urban,
            SpectralIndexKind::Water => &mut self.water,
            SpectralIndexKind::Moisture => &mut self.moisture,
        }
    }

    /// Load all six buffers from a directory using conventional file names
    /// (`ndvi.bin`, `evi.bin`, ...).
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let read = |index: SpectralIndexKind| -> Result<Vec<u8>> {
            let name = format!("{}.bin", index.to_string().to_lowercase());
            let path = dir.join(&name);
            if !path.is_file() {
                return Err(Error::MissingBand { index });
            }
            Ok(std::fs::read(&path)?)
        };

        Ok(Self {
            ndvi: read(SpectralIndexKind::Ndvi)?,
            evi: read(SpectralIndexKind::Evi)?,
            savi: read(SpectralIndexKind::Savi)?,
            urban: read(SpectralIndexKind::Urban)?,
            water: read(SpectralIndexKind::Water)?,
            moisture: read(SpectralIndexKind::Moisture)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Wrap little-endian f32 payloads in zeroed header/trailer margins.
    /// Zeroed margins decode as 0.0, which is in range for every index, so
    /// payload-only assertions must account for the margin reads -- here we
    /// avoid that by making the buffer exactly margins + payload and
    /// scanning values by position.
    fn buffer_with_payload(payload: &[f32]) -> Vec<u8> {
        let mut buf = vec![0u8; HEADER_MARGIN];
        for v in payload {
            buf.extend_from_slice(&v.to_le_bytes());
        }
        buf.extend_from_slice(&vec![0u8; HEADER_MARGIN]);
        buf
    }

    #[test]
    fn decodes_little_endian_floats() {
        let buf = buffer_with_payload(&[0.5, -0.25, 0.75, 0.1]);
        let sample = decode_band(&buf, SpectralIndexKind::Ndvi);
        assert!(!sample.is_fallback);
        assert_eq!(sample.len(), 4);
        assert!((sample.values[0] - 0.5).abs() < 1e-6);
        assert!((sample.values[1] + 0.25).abs() < 1e-6);
    }

    #[test]
    fn discards_out_of_range_values() {
        // 3.0 and -2.0 are outside the NDVI range and must be dropped,
        // not clamped.
        let buf = buffer_with_payload(&[0.5, 3.0, -2.0, 0.2]);
        let sample = decode_band(&buf, SpectralIndexKind::Ndvi);
        assert_eq!(sample.len(), 2);
        assert!(sample.values.iter().all(|v| (-1.0..=1.0).contains(v)));
    }

    #[test]
    fn urban_range_is_tighter() {
        let buf = buffer_with_payload(&[0.4, 0.6, -0.6, -0.3]);
        let sample = decode_band(&buf, SpectralIndexKind::Urban);
        assert_eq!(sample.len(), 2); // 0.6 and -0.6 rejected
    }

    #[test]
    fn non_finite_float_uses_secondary_decode() {
        let mut buf = vec![0u8; HEADER_MARGIN];
        // NaN with a known low word: bytes [0x00, 0x80, 0xc0, 0x7f] is a
        // quiet NaN; secondary decode reads u16 0x8000 -> ~0.0 after
        // normalization.
        buf.extend_from_slice(&[0x00, 0x80, 0xc0, 0x7f]);
        buf.extend_from_slice(&vec![0u8; HEADER_MARGIN]);
        let sample = decode_band(&buf, SpectralIndexKind::Ndvi);
        assert_eq!(sample.len(), 1);
        let expected = (0x8000 as f64 / 65535.0) * 2.0 - 1.0;
        assert!((sample.values[0] - expected).abs() < 1e-9);
    }

    #[test]
    fn degenerate_buffer_produces_fallback() {
        // Too short to contain any payload between the margins.
        let sample = decode_band(&[0u8; 64], SpectralIndexKind::Ndvi);
        assert!(sample.is_fallback);
        assert_eq!(sample.len(), FALLBACK_SAMPLES);
    }

    #[test]
    fn fallback_is_deterministic_and_in_distribution() {
        let a = synthetic_fallback(SpectralIndexKind::Moisture);
        let b = synthetic_fallback(SpectralIndexKind::Moisture);
        assert_eq!(a.values, b.values);
        assert!(a.values.iter().all(|v| (0.1..0.6).contains(v)));

        let urban = synthetic_fallback(SpectralIndexKind::Urban);
        assert!(urban.values.iter().all(|v| (-0.15..0.15).contains(v)));
        assert_ne!(a.values[0], urban.values[0]);
    }
}
