//! Property tests for the AEAD frame format and the length-prefixed
//! transport framing.

use proptest::prelude::*;
use quill_crypto::{AEAD_KEY_SIZE, SessionKey};
use quill_transport::{DEFAULT_MAX_FRAME_SIZE, recv_frame, send_frame};

fn frame_roundtrip(payload: &[u8]) -> Vec<u8> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    runtime.block_on(async {
        let mut wire = Vec::new();
        send_frame(&mut wire, payload, DEFAULT_MAX_FRAME_SIZE)
            .await
            .unwrap();
        let mut reader = &wire[..];
        recv_frame(&mut reader, DEFAULT_MAX_FRAME_SIZE).await.unwrap()
    })
}

proptest! {
    #[test]
    fn prop_seal_open_roundtrip(
        key in any::<[u8; AEAD_KEY_SIZE]>(),
        plaintext in proptest::collection::vec(any::<u8>(), 0..2048),
    ) {
        let key = SessionKey::from_bytes(key);
        let framed = key.seal(&plaintext).unwrap();
        prop_assert_eq!(key.open(&framed).unwrap(), plaintext);
    }

    #[test]
    fn prop_any_bit_flip_fails_authentication(
        key in any::<[u8; AEAD_KEY_SIZE]>(),
        plaintext in proptest::collection::vec(any::<u8>(), 0..256),
        position in any::<proptest::sample::Index>(),
        bit in 0u8..8,
    ) {
        let key = SessionKey::from_bytes(key);
        let mut framed = key.seal(&plaintext).unwrap();

        let index = position.index(framed.len());
        framed[index] ^= 1 << bit;

        prop_assert!(key.open(&framed).is_err());
    }

    #[test]
    fn prop_wrong_key_fails_authentication(
        key in any::<[u8; AEAD_KEY_SIZE]>(),
        other in any::<[u8; AEAD_KEY_SIZE]>(),
        plaintext in proptest::collection::vec(any::<u8>(), 0..256),
    ) {
        prop_assume!(key != other);

        let framed = SessionKey::from_bytes(key).seal(&plaintext).unwrap();
        prop_assert!(SessionKey::from_bytes(other).open(&framed).is_err());
    }

    #[test]
    fn prop_frame_roundtrip(
        payload in proptest::collection::vec(any::<u8>(), 0..8192),
    ) {
        prop_assert_eq!(frame_roundtrip(&payload), payload);
    }

    #[test]
    fn prop_frames_decode_in_order(
        first in proptest::collection::vec(any::<u8>(), 0..512),
        second in proptest::collection::vec(any::<u8>(), 0..512),
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let (a, b) = runtime.block_on(async {
            let mut wire = Vec::new();
            send_frame(&mut wire, &first, DEFAULT_MAX_FRAME_SIZE).await.unwrap();
            send_frame(&mut wire, &second, DEFAULT_MAX_FRAME_SIZE).await.unwrap();

            let mut reader = &wire[..];
            let a = recv_frame(&mut reader, DEFAULT_MAX_FRAME_SIZE).await.unwrap();
            let b = recv_frame(&mut reader, DEFAULT_MAX_FRAME_SIZE).await.unwrap();
            (a, b)
        });
        prop_assert_eq!(a, first);
        prop_assert_eq!(b, second);
    }
}
