#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use seqscan::{Alphabet, Automaton, BoyerMoore, SuffixTree};

#[derive(Arbitrary, Debug)]
struct Input {
    pattern: Vec<u8>,
    text: Vec<u8>,
}

fuzz_target!(|input: Input| {
    // Small alphabet so that matches are frequent
    let map = |b: &u8| b"ACGT"[(*b % 4) as usize];
    let pattern: Vec<u8> = input.pattern.iter().take(8).map(map).collect();
    let text: Vec<u8> = input.text.iter().take(512).map(map).collect();
    if pattern.is_empty() {
        return;
    }

    let alphabet = Alphabet::dna();
    let expected: Vec<usize> = text
        .windows(pattern.len())
        .enumerate()
        .filter(|(_, w)| *w == &pattern[..])
        .map(|(i, _)| i)
        .collect();

    let bm = BoyerMoore::new(&alphabet, &pattern).unwrap();
    assert_eq!(bm.search(&text).unwrap(), expected);

    let automaton = Automaton::new(&alphabet, &pattern).unwrap();
    assert_eq!(automaton.occurrences(&text).unwrap(), expected);

    if let Ok(tree) = SuffixTree::from_sequence(&text) {
        assert_eq!(tree.find_pattern(&pattern), expected);
    }
});
