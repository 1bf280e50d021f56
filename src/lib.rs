//! ITU-T G.726 ADPCM audio codec, with bundled G.711 A-law/u-law companding.
//!
//! G.726 adaptively re-encodes linear PCM at 16, 24, 32 or 40 kbit/s using a
//! backward-adaptive predictor and quantizer. [`g726::G726Encoder`] and
//! [`g726::G726Decoder`] drive one direction of a stream each; [`g711`]
//! exposes the companding functions G.726 tandem-adjusts through when it's
//! carried over an A-law or u-law trunk.

pub(crate) mod bits;
pub mod g711;
pub mod g726;

pub use g726::{Error, ExtCoding, G726Decoder, G726Encoder, Packing, Rate};
