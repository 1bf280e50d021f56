use ezk_g726::{ExtCoding, G726Decoder, G726Encoder, Packing};

#[test]
fn s1_rate32k_none_packing_is_one_byte_per_sample() {
    let mut enc = G726Encoder::new(32000, Packing::None, ExtCoding::Linear).unwrap();
    let bytes = enc.encode(&[0i16; 8]);
    assert_eq!(bytes.len(), 8);
    assert!(bytes.iter().all(|&b| b & !0x0F == 0));
}

#[test]
fn s2_rate32k_right_packing_dc_tone_settles() {
    let mut enc = G726Encoder::new(32000, Packing::Right, ExtCoding::Linear).unwrap();
    let mut dec = G726Decoder::new(32000, Packing::Right, ExtCoding::Linear).unwrap();

    let samples = vec![-30720i16; 480];
    let bytes = enc.encode(&samples);
    let out = dec.decode(&bytes);

    assert_eq!(out.len(), 480);
    assert!((out[0] as i32 - (-30720)).abs() <= 30720);
    for &s in &out[20..] {
        assert!((s as i32 + 30720).abs() <= 512, "settled sample {s} too far from -30720");
    }
}

#[test]
fn s3_rate16k_left_packing_is_one_byte_for_four_samples() {
    let mut enc = G726Encoder::new(16000, Packing::Left, ExtCoding::Linear).unwrap();
    let mut dec = G726Decoder::new(16000, Packing::Left, ExtCoding::Linear).unwrap();

    let bytes = enc.encode(&[1000, -1000, 1000, -1000]);
    assert_eq!(bytes.len(), 1);

    let out = dec.decode(&bytes);
    assert_eq!(out.len(), 4);
}

#[test]
fn s4_rate40k_right_packing_is_five_bytes_for_eight_samples() {
    let mut enc = G726Encoder::new(40000, Packing::Right, ExtCoding::Linear).unwrap();
    let mut dec = G726Decoder::new(40000, Packing::Right, ExtCoding::Linear).unwrap();

    let samples = vec![500i16, -500, 1000, -1000, 2000, -2000, 0, 0];
    let bytes = enc.encode(&samples);
    assert_eq!(bytes.len(), 5);

    let out = dec.decode(&bytes);
    assert_eq!(out.len(), 8);
}

#[test]
fn s5_rate24k_none_packing_masks_high_bits_on_decode() {
    let mut enc = G726Encoder::new(24000, Packing::None, ExtCoding::Linear).unwrap();
    let mut dec_clean = G726Decoder::new(24000, Packing::None, ExtCoding::Linear).unwrap();
    let mut dec_dirty = G726Decoder::new(24000, Packing::None, ExtCoding::Linear).unwrap();

    let samples = vec![100i16, -100, 200, -200, 300, -300, 400, -400];
    let clean = enc.encode(&samples);
    let dirty: Vec<u8> = clean.iter().map(|&b| b | 0xF8).collect();

    assert_eq!(dec_clean.decode(&clean), dec_dirty.decode(&dirty));
}

#[test]
fn s6_quantize_of_zero_wraps_for_every_rate() {
    // At rates 24/32/40, the initial state step size quantizes d == 0 to the
    // code `(|table| << 1) + 1`, the invalid-zero wraparound; exercised
    // indirectly through a single silent encode step per rate. Rate 16 is the
    // exception: its quantizer_states is even, so the wrap never fires and
    // the rate-16 fixup folds i == 3 back to i == 0 instead.
    for (rate, invalid_code) in [(16000, 0), (24000, 7), (32000, 15), (40000, 31)] {
        let mut enc = G726Encoder::new(rate, Packing::None, ExtCoding::Linear).unwrap();
        let code = enc.encode(&[0i16])[0];
        assert_eq!(code as i32, invalid_code, "rate {rate}");
    }
}

#[test]
fn silence_stays_bounded_for_every_rate() {
    for rate in [16000, 24000, 32000, 40000] {
        let mut enc = G726Encoder::new(rate, Packing::None, ExtCoding::Linear).unwrap();
        let mut dec = G726Decoder::new(rate, Packing::None, ExtCoding::Linear).unwrap();

        let bytes = enc.encode(&vec![0i16; 10_000]);
        let out = dec.decode(&bytes);

        assert!(out.iter().all(|&s| s.abs() <= 8), "rate {rate} didn't settle near zero");
    }
}

#[test]
fn tandem_alaw_round_trip_stays_bounded() {
    let mut enc = G726Encoder::new(32000, Packing::None, ExtCoding::Alaw).unwrap();
    let mut dec = G726Decoder::new(32000, Packing::None, ExtCoding::Alaw).unwrap();

    let samples: Vec<i16> = (0..200).map(|i| ((i * 73) % 4001) as i16 - 2000).collect();
    let bytes = enc.encode(&samples);
    let out = dec.decode(&bytes);

    assert_eq!(out.len(), samples.len());
}
