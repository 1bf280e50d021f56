//
// g726_decode - The ITU G.726 codec, decode part.
//
// Adapted from SpanDSP's g726.c / its Go port.
//

use super::tandem::{tandem_adjust_alaw, tandem_adjust_ulaw};
use super::{CodecState, Error, ExtCoding, Packing, Rate};

/// G.726 decoder: turns a packed ADPCM bit stream back into 16-bit linear PCM.
///
/// One instance per stream direction; not reusable across streams, not
/// shareable with an encoder.
pub struct G726Decoder {
    state: CodecState,
    packing: Packing,
}

impl G726Decoder {
    /// Create a new decoder for `bit_rate` bit/s (16000, 24000, 32000 or 40000).
    pub fn new(bit_rate: u32, packing: Packing, ext_coding: ExtCoding) -> Result<Self, Error> {
        let rate = Rate::from_bits_per_second(bit_rate)?;
        log::debug!("g726 decoder initialized rate={bit_rate} packing={packing:?} ext_coding={ext_coding:?}");
        Ok(G726Decoder {
            state: CodecState::new(rate, ext_coding),
            packing,
        })
    }

    /// Decode packed ADPCM `bytes` and return the reconstructed PCM samples.
    pub fn decode(&mut self, bytes: &[u8]) -> Vec<i16> {
        let bits_per_sample = self.state.tables.bits_per_sample;
        let code_mask = (1u32 << bits_per_sample) - 1;
        let mut out = Vec::with_capacity(bytes.len() * 8 / bits_per_sample as usize);
        let mut pos = 0;

        loop {
            let code = match self.packing {
                Packing::None => {
                    if pos >= bytes.len() {
                        break;
                    }
                    let code = bytes[pos] as u32 & code_mask;
                    pos += 1;
                    code
                }
                Packing::Right => {
                    if self.state.bs.residue < bits_per_sample {
                        if pos >= bytes.len() {
                            break;
                        }
                        self.state.bs.bitstream |= (bytes[pos] as u32) << self.state.bs.residue;
                        pos += 1;
                        self.state.bs.residue += 8;
                    }
                    let code = self.state.bs.bitstream & code_mask;
                    self.state.bs.bitstream >>= bits_per_sample;
                    self.state.bs.residue -= bits_per_sample;
                    code
                }
                Packing::Left => {
                    if self.state.bs.residue < bits_per_sample {
                        if pos >= bytes.len() {
                            break;
                        }
                        self.state.bs.bitstream =
                            (self.state.bs.bitstream << 8) | bytes[pos] as u32;
                        pos += 1;
                        self.state.bs.residue += 8;
                    }
                    let shift = self.state.bs.residue - bits_per_sample;
                    let code = (self.state.bs.bitstream >> shift) & code_mask;
                    self.state.bs.residue -= bits_per_sample;
                    code
                }
            };

            out.push(self.decode_code(code as i32));
        }

        out
    }

    /// Decode one codeword. In linear mode this is a PCM sample; in A-law/u-law
    /// tandem mode it's the re-quantized companded byte, zero-extended.
    fn decode_code(&mut self, code: i32) -> i16 {
        let sign_mask = self.state.tables.sign_mask;
        let (sr, se, y) = self.state.decode_sample(code);

        match self.state.ext_coding {
            ExtCoding::Linear => {
                let shifted = sr << 2;
                if self.state.rate == Rate::R32000 {
                    shifted.clamp(-32768, 32767) as i16
                } else {
                    shifted as i16
                }
            }
            ExtCoding::Alaw => {
                tandem_adjust_alaw(sr, se, y, code, sign_mask, self.state.tables.qtab) as i16
            }
            ExtCoding::Ulaw => {
                tandem_adjust_ulaw(sr, se, y, code, sign_mask, self.state.tables.qtab) as i16
            }
        }
    }
}
