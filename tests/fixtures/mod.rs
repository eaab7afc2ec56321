//! Shared helpers for integration tests

#![allow(dead_code)]

/// Start offsets of `pattern` in `text` by direct comparison at every offset
pub fn naive_search(text: &[u8], pattern: &[u8]) -> Vec<usize> {
    if pattern.is_empty() || pattern.len() > text.len() {
        return Vec::new();
    }
    text.windows(pattern.len())
        .enumerate()
        .filter(|(_, window)| *window == pattern)
        .map(|(i, _)| i)
        .collect()
}

/// Every string over `symbols` with length in `1..=max_len`
pub fn all_strings(symbols: &[u8], max_len: usize) -> Vec<Vec<u8>> {
    let mut res: Vec<Vec<u8>> = Vec::new();
    let mut frontier: Vec<Vec<u8>> = vec![Vec::new()];
    for _ in 0..max_len {
        let mut next = Vec::with_capacity(frontier.len() * symbols.len());
        for prefix in &frontier {
            for &symbol in symbols {
                let mut s = prefix.clone();
                s.push(symbol);
                next.push(s);
            }
        }
        res.extend(next.iter().cloned());
        frontier = next;
    }
    res
}

/// Deterministic pseudo-random sequence over `symbols` (64-bit LCG)
pub fn pseudo_random_sequence(symbols: &[u8], len: usize, seed: u64) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            symbols[((state >> 33) as usize) % symbols.len()]
        })
        .collect()
}
