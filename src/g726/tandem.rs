//
// Adapted from SpanDSP - a series of DSP components for telephony
//
// g726.go (ported from g726.c) - The ITU G.726 codec.
//
// Written by Steve Underwood <steveu@coppice.org>
//

use crate::g711::alaw::{alaw_to_linear, linear_to_alaw};
use crate::g711::mulaw::{linear_to_ulaw, ulaw_to_linear};

use super::scalar::quantize;

/// Re-quantize a decoded sample through the A-law companded domain so a
/// tandem G.726/A-law link doesn't drift from a direct A-law link.
///
/// `sr` is the decoder's reconstructed sample (pre `<< 2`), `se` the
/// predictor estimate, `y` the step size, `code` the received codeword and
/// `sign` the rate's sign-bit mask.
pub(crate) fn tandem_adjust_alaw(
    sr: i32,
    se: i32,
    y: i32,
    code: i32,
    sign: i32,
    qtab: &[i32],
) -> u8 {
    let sr = if sr <= -32768 { -1 } else { sr };

    let sp = linear_to_alaw((sr >> 1) << 3);
    let dx = (i32::from(alaw_to_linear(sp)) >> 2) - se;
    let id = quantize(dx, y, qtab);

    if id == code {
        return sp;
    }

    if (id ^ sign) > (code ^ sign) {
        if sp & 0x80 != 0 {
            if sp == 0xD5 { 0x55 } else { ((sp ^ 0x55).wrapping_sub(1)) ^ 0x55 }
        } else if sp == 0x2A {
            0x2A
        } else {
            ((sp ^ 0x55).wrapping_add(1)) ^ 0x55
        }
    } else if sp & 0x80 != 0 {
        if sp == 0xAA { 0xAA } else { ((sp ^ 0x55).wrapping_add(1)) ^ 0x55 }
    } else if sp == 0x55 {
        0xD5
    } else {
        ((sp ^ 0x55).wrapping_sub(1)) ^ 0x55
    }
}

/// Same re-quantization as [`tandem_adjust_alaw`], through the μ-law domain.
pub(crate) fn tandem_adjust_ulaw(
    sr: i32,
    se: i32,
    y: i32,
    code: i32,
    sign: i32,
    qtab: &[i32],
) -> u8 {
    let sr = if sr <= -32768 { 0 } else { sr };

    let sp = linear_to_ulaw(sr << 2);
    let dx = (i32::from(ulaw_to_linear(sp)) >> 2) - se;
    let id = quantize(dx, y, qtab);

    if id == code {
        return sp;
    }

    if (id ^ sign) > (code ^ sign) {
        if sp & 0x80 != 0 {
            if sp == 0xFF { 0x7E } else { sp + 1 }
        } else if sp == 0x00 {
            0x00
        } else {
            sp - 1
        }
    } else if sp & 0x80 != 0 {
        if sp == 0x80 { 0x80 } else { sp - 1 }
    } else if sp == 0x7F {
        0xFE
    } else {
        sp + 1
    }
}
