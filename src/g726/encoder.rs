//
// g726_encode - The ITU G.726 codec, encode part.
//
// Adapted from SpanDSP's g726.c / its Go port.
//

use super::{CodecState, Error, ExtCoding, Packing, Rate};

/// G.726 encoder: turns 16-bit linear PCM into a packed ADPCM bit stream.
///
/// One instance per stream direction; not reusable across streams, not
/// shareable with a decoder.
pub struct G726Encoder {
    state: CodecState,
    packing: Packing,
}

impl G726Encoder {
    /// Create a new encoder for `bit_rate` bit/s (16000, 24000, 32000 or 40000).
    pub fn new(bit_rate: u32, packing: Packing, ext_coding: ExtCoding) -> Result<Self, Error> {
        let rate = Rate::from_bits_per_second(bit_rate)?;
        log::debug!("g726 encoder initialized rate={bit_rate} packing={packing:?} ext_coding={ext_coding:?}");
        Ok(G726Encoder {
            state: CodecState::new(rate, ext_coding),
            packing,
        })
    }

    /// Encode `pcm` and return the packed codeword bytes.
    pub fn encode(&mut self, pcm: &[i16]) -> Vec<u8> {
        let bits_per_sample = self.state.tables.bits_per_sample;
        let mut out = Vec::with_capacity(pcm.len() * bits_per_sample as usize / 8 + 1);

        for &amp in pcm {
            let sl = (amp as i32) >> 2;
            let code = self.state.encode_sample(sl) as u32;

            match self.packing {
                Packing::None => out.push(code as u8),
                Packing::Right => {
                    self.state.bs.bitstream |= code << self.state.bs.residue;
                    self.state.bs.residue += bits_per_sample;
                    if self.state.bs.residue >= 8 {
                        out.push((self.state.bs.bitstream & 0xFF) as u8);
                        self.state.bs.bitstream >>= 8;
                        self.state.bs.residue -= 8;
                    }
                }
                Packing::Left => {
                    self.state.bs.bitstream = (self.state.bs.bitstream << bits_per_sample) | code;
                    self.state.bs.residue += bits_per_sample;
                    if self.state.bs.residue >= 8 {
                        let shift = self.state.bs.residue - 8;
                        out.push(((self.state.bs.bitstream >> shift) & 0xFF) as u8);
                        self.state.bs.residue -= 8;
                    }
                }
            }
        }

        out
    }
}
