#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;
use trunchash::{LeadingHashReader, OffsetConfig, TrailingHashReader, Xxh3Hasher, hash_at_offsets};

fuzz_target!(|input: (Vec<u8>, Vec<u16>)| {
    let (data, raw_offsets) = input;
    let offsets: Vec<u64> = raw_offsets.iter().map(|&o| o as u64).collect();

    // Arbitrary order: must never panic, and must stop at the first offset past the end
    for from_start in [true, false] {
        let pairs: Vec<_> = hash_at_offsets(data.clone(), &offsets, from_start).collect();
        let expected = offsets
            .iter()
            .take_while(|&&o| o <= data.len() as u64)
            .count();
        assert_eq!(pairs.len(), expected);

        if !from_start {
            for pair in &pairs {
                let start = data.len() - pair.offset as usize;
                assert_eq!(pair.digest, Xxh3Hasher::hash(&data[start..]));
            }
        }
    }

    // Ascending: every path agrees with one-shot hashing
    let mut sorted = offsets.clone();
    sorted.sort_unstable();
    sorted.dedup();
    sorted.retain(|&o| o > 0);
    let Ok(config) = OffsetConfig::new(&sorted) else {
        return;
    };

    let leading: Vec<_> = hash_at_offsets(data.clone(), &sorted, true).collect();
    for pair in &leading {
        assert_eq!(pair.digest, Xxh3Hasher::hash(&data[..pair.offset as usize]));
    }

    let streamed = LeadingHashReader::new(Cursor::new(data.clone()), &config)
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(streamed, leading);

    let trailing = TrailingHashReader::new(Cursor::new(data.clone()), &config)
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(trailing, hash_at_offsets(data, &sorted, false).collect::<Vec<_>>());
});
