#![no_main]

use libfuzzer_sys::fuzz_target;

use factcalc_cluster::wire::{decode, encode};
use num_bigint::{BigInt, BigUint};

fuzz_target!(|data: &[u8]| {
    // Interpret the input as a little-endian magnitude and round-trip it.
    let value = BigInt::from(BigUint::from_bytes_le(data));
    let buffer = encode(&value);
    let decoded = decode(&buffer);
    assert_eq!(decoded, value, "wire round-trip changed the value");
});
