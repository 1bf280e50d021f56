//
// Adapted from SpanDSP - a series of DSP components for telephony
//
// g726.go (ported from g726.c) - The ITU G.726 codec.
//
// Written by Steve Underwood <steveu@coppice.org>
//

use crate::bits::top_bit;

use super::tables::POWER2;

/// Least index `i` such that `val < table[i]`, or `table.len()` if none.
pub(crate) fn quan(val: i32, table: &[i32]) -> i32 {
    table.iter().position(|&t| val < t).unwrap_or(table.len()) as i32
}

/// Product of the 14-bit signed linear `an` and the floating point (4-exp, 6-mant) `srn`.
pub(crate) fn fmult(an: i32, srn: i32) -> i32 {
    let anmag = if an > 0 { an } else { (-an) & 0x1FFF };
    let anexp = top_bit(anmag as u32) - 5;
    let anmant = if anmag == 0 {
        32
    } else if anexp >= 0 {
        anmag >> anexp
    } else {
        anmag << -anexp
    };

    let wanexp = anexp + ((srn >> 6) & 0xF) - 13;
    let wanmant = (anmant * (srn & 0x3F) + 0x30) >> 4;
    let retval = if wanexp >= 0 {
        (wanmant << wanexp) & 0x7FFF
    } else {
        wanmant >> -wanexp
    };

    if (an ^ srn) < 0 { -retval } else { retval }
}

/// Quantize the prediction difference `d` against step size `y`, returning a code
/// in `0..=2*table.len()+1`.
pub(crate) fn quantize(d: i32, y: i32, table: &[i32]) -> i32 {
    let dqm = d.abs();
    let exp = quan(dqm >> 1, &POWER2);
    let mant = ((dqm << 7) >> exp) & 0x7F;
    let dl = (exp << 7) + mant;
    let dln = dl - (y >> 2);

    let i = quan(dln, table);
    let size = table.len() as i32;

    if d < 0 {
        (size << 1) + 1 - i
    } else if i == 0 {
        (size << 1) + 1
    } else {
        i
    }
}

/// Reconstructed difference signal `dq` from codeword log magnitude `dqln` and
/// step size multiplier `y`.
pub(crate) fn reconstruct(sign: bool, dqln: i32, y: i32) -> i32 {
    let dql = dqln + (y >> 2);

    if dql < 0 {
        return if sign { -0x8000 } else { 0 };
    }

    let dex = (dql >> 7) & 0xF;
    let dqt = 128 + (dql & 0x7F);
    let dq = (dqt << 7) >> (14 - dex);

    if sign { dq - 0x8000 } else { dq }
}
