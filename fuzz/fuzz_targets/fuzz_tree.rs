#![no_main]

use libfuzzer_sys::fuzz_target;

use factcalc_core::multiplier::{RangeMultiplier, SequentialMultiplier};
use factcalc_core::range::Range;
use factcalc_core::{tree, ComputeOptions};

fuzz_target!(|data: &[u8]| {
    if data.len() < 5 {
        return;
    }
    // Bounded inputs keep each iteration fast: ranges up to 4096 factors,
    // thread budgets up to 8.
    let base = i64::from(u16::from_le_bytes([data[0], data[1]]));
    let len = i64::from(u16::from_le_bytes([data[2], data[3]]) % 4096);
    let threads = usize::from(data[4] % 9);

    let range = Range::section(base, base + len);
    let opts = ComputeOptions {
        thread_budget: threads,
        ..Default::default()
    }
    .normalize();

    let result = tree::execute(range, &opts).expect("pool construction failed");
    let expected = SequentialMultiplier::new().product(range);
    assert_eq!(result, expected, "tree disagrees with sequential product");
});
