#![no_main]

use libfuzzer_sys::fuzz_target;

use factcalc_cluster::partition::node_section;

fuzz_target!(|data: &[u8]| {
    if data.len() < 11 {
        return;
    }
    let start = i64::from_le_bytes(data[0..8].try_into().unwrap()) % 1_000_000;
    let len = i64::from(u16::from_le_bytes(data[8..10].try_into().unwrap()));
    let world = usize::from(data[10] % 32) + 1;
    let end = start.saturating_add(len);

    // Sections must be contiguous, disjoint, and cover the request exactly.
    let mut next_start = start + 1;
    let mut total = 0i64;
    for rank in 0..world {
        let section = node_section(start, end, world, rank);
        if !section.is_empty() {
            assert_eq!(section.start(), next_start, "gap before rank {rank}");
            next_start = section.end() + 1;
            total += section.len();
        }
    }
    assert_eq!(total, end - start, "sections do not cover the request");
});
