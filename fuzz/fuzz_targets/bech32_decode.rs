#![no_main]

use libfuzzer_sys::fuzz_target;
use walletgen_core::encoding::bech32;

fuzz_target!(|data: &[u8]| {
    // Decoding must never panic, and whatever decodes must survive another
    // encode/decode pass unchanged.
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok((hrp, bytes)) = bech32::decode_bytes(s) {
            if let Ok(again) = bech32::encode_bytes(&hrp, &bytes) {
                assert_eq!(bech32::decode_bytes(&again).unwrap(), (hrp, bytes));
            }
        }
    }

    // Arbitrary bytes round-trip through the Sui key HRP up to the code length
    if let Ok(encoded) = bech32::encode_bytes("suiprivkey", data) {
        let (hrp, bytes) = bech32::decode_bytes(&encoded).unwrap();
        assert_eq!(hrp, "suiprivkey");
        assert_eq!(bytes, data);
    }
});
