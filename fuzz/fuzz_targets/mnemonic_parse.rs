#![no_main]

use libfuzzer_sys::fuzz_target;
use walletgen_core::seed::parse_mnemonic;

fuzz_target!(|data: &[u8]| {
    // Any UTF-8 input must parse to Ok or Err. Accepted phrases must survive
    // an entropy round trip unchanged.
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(phrase) = parse_mnemonic(s) {
            let entropy = phrase.to_entropy();
            let again = walletgen_core::seed::SeedPhrase::from_entropy(&entropy).unwrap();
            assert_eq!(phrase, again);
        }
    }
});
