//! QR decoding adapter
//!
//! Wraps the `rqrr` decoder behind the [`Decode`] seam. Failing to
//! decode a frame is the common case while the camera hunts for a code,
//! so the adapter returns `Option` and never surfaces per-frame noise.

use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::frame::Frame;

/// Which luma polarity the decoder attempts.
///
/// Codes printed light-on-dark only decode from the inverted image;
/// `Both` tries the normal polarity first and retries inverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Inversion {
    Original,
    Inverted,
    #[default]
    Both,
}

/// A successfully decoded symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
}

/// Decodes QR symbols out of square frames.
pub trait Decode: Send + Sync {
    /// Attempt to decode a QR symbol from the frame.
    ///
    /// `None` means no code was found in this frame; that is an
    /// expected outcome, not an error.
    fn decode(&self, frame: &Frame, inversion: Inversion) -> Option<Decoded>;
}

/// Decoder backed by the `rqrr` crate.
#[derive(Debug, Default)]
pub struct RqrrDecoder;

impl RqrrDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decode for RqrrDecoder {
    fn decode(&self, frame: &Frame, inversion: Inversion) -> Option<Decoded> {
        let luma = frame.to_luma();
        match inversion {
            Inversion::Original => decode_luma(&luma, false),
            Inversion::Inverted => decode_luma(&luma, true),
            Inversion::Both => decode_luma(&luma, false).or_else(|| decode_luma(&luma, true)),
        }
    }
}

fn decode_luma(luma: &GrayImage, inverted: bool) -> Option<Decoded> {
    let (width, height) = luma.dimensions();
    let mut prepared =
        rqrr::PreparedImage::prepare_from_greyscale(width as usize, height as usize, |x, y| {
            let px = luma.get_pixel(x as u32, y as u32).0[0];
            if inverted {
                255 - px
            } else {
                px
            }
        });

    for grid in prepared.detect_grids() {
        match grid.decode() {
            Ok((_meta, text)) => return Some(Decoded { text }),
            // Detection found a candidate grid that does not decode;
            // treat it like any other frame without a readable code.
            Err(err) => tracing::trace!("grid failed to decode: {err}"),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_frame(width: u32, height: u32) -> Frame {
        Frame::from_rgba(width, height, vec![255; (width * height * 4) as usize]).unwrap()
    }

    #[test]
    fn test_blank_frame_decodes_to_none() {
        let decoder = RqrrDecoder::new();
        let frame = blank_frame(64, 64);
        assert!(decoder.decode(&frame, Inversion::Original).is_none());
        assert!(decoder.decode(&frame, Inversion::Inverted).is_none());
        assert!(decoder.decode(&frame, Inversion::Both).is_none());
    }

    #[test]
    fn test_noise_frame_decodes_to_none() {
        // Deterministic pseudo-noise; nothing resembling finder patterns
        let mut data = Vec::with_capacity(64 * 64 * 4);
        let mut seed = 0x2545_f491u32;
        for _ in 0..(64 * 64) {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let v = (seed >> 16) as u8;
            data.extend_from_slice(&[v, v, v, 255]);
        }
        let frame = Frame::from_rgba(64, 64, data).unwrap();
        assert!(RqrrDecoder::new().decode(&frame, Inversion::Both).is_none());
    }

    #[test]
    fn test_inversion_default_is_both() {
        assert_eq!(Inversion::default(), Inversion::Both);
    }
}
