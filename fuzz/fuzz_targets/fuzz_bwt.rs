#![no_main]

use libfuzzer_sys::fuzz_target;
use seqscan::Bwt;

fuzz_target!(|data: &[u8]| {
    // Terminated texts must invert exactly
    let mut text: Vec<u8> = data.iter().copied().filter(|&b| b != b'$').collect();
    text.push(b'$');

    if let Ok(bwt) = Bwt::build(&text, true) {
        assert_eq!(bwt.inverse().ok(), Some(text.clone()));

        if text.len() > 2 {
            let pattern = &text[..2];
            let count = text.windows(2).filter(|w| *w == pattern).count();
            assert_eq!(bwt.count(pattern), count);
        }
    }
});
