//! Regression tests for the public API.
//!
//! Coverage:
//! - `number_theory` (primality against a sieve, modular arithmetic)
//! - `random::{avalanche, bbs, stretch, MersenneTwister}`
//! - `trapdoor::{QuadraticPermutation, ExponentPermutation}`
//! - `translucent` / `decoy` (single-block integrity, decoy rejection rate)
//! - `AsymmetricCodec` and `SchemeConfig` (end-to-end)
//! - `symmetric` (deniable XOR scenario)

use rand::rngs::StdRng;
use rand::SeedableRng;

use translucent_pde::codec::AsymmetricCodec;
use translucent_pde::config::{PermutationKind, SchemeConfig};
use translucent_pde::decoy;
use translucent_pde::error::PdeError;
use translucent_pde::number_theory::{is_prime, mod_inverse, mod_pow};
use translucent_pde::random::avalanche::avalanche_hash;
use translucent_pde::random::stretch::stretch_key;
use translucent_pde::random::{blum_blum_shub, BlumBlumShub, MersenneTwister};
use translucent_pde::symmetric;
use translucent_pde::translucent::{self, Codeword, Membership, K};
use translucent_pde::trapdoor::{
    predicate, ExponentPermutation, QuadraticPermutation, Trapdoor, TrapdoorPermutation,
};

/// Screened pairs exercised across the suite.
const TRAPDOORS: [Trapdoor; 3] = [
    Trapdoor::DEMO,
    Trapdoor::new(64763, 65063),
    Trapdoor::new(64319, 65123),
];

// ═══════════════════════════════════════════════════════════════════════
// Number theory
// ═══════════════════════════════════════════════════════════════════════

/// `is_prime` agrees with a sieve of Eratosthenes on [0, 100000].
#[test]
fn is_prime_matches_sieve() {
    const LIMIT: usize = 100_000;
    let mut sieve = vec![true; LIMIT + 1];
    sieve[0] = false;
    sieve[1] = false;
    let mut i = 2;
    while i * i <= LIMIT {
        if sieve[i] {
            let mut j = i * i;
            while j <= LIMIT {
                sieve[j] = false;
                j += i;
            }
        }
        i += 1;
    }
    for (n, &expected) in sieve.iter().enumerate() {
        assert_eq!(is_prime(n as u64), expected, "is_prime({}) mismatch", n);
    }
}

/// Every trapdoor in the suite passes the Blum screen.
#[test]
fn suite_trapdoors_pass_screen() {
    for td in TRAPDOORS {
        assert!(td.screen().is_ok(), "{:?} rejected", td);
        assert!(td.modulus() <= u32::MAX as u64);
    }
}

/// `d = e^-1 mod phi(n)` satisfies `x^(e*d) = x` on sampled residues.
#[test]
fn private_exponent_inverts_public_exponent() {
    for td in TRAPDOORS {
        let d = mod_inverse(17, td.phi()).expect("17 is coprime to phi");
        let n = td.modulus();
        for x in [2u64, 3, 1_000_003, n - 2] {
            assert_eq!(mod_pow(mod_pow(x, 17, n), d, n), x);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Random subsystem
// ═══════════════════════════════════════════════════════════════════════

/// `avalanche_hash` is a bijection on a sampled window.
#[test]
fn avalanche_no_collisions_on_window() {
    let mut seen = std::collections::HashSet::new();
    for x in 1_000_000..1_050_000u32 {
        assert!(seen.insert(avalanche_hash(x)));
    }
}

/// `stretch_key("AB", 5)` has length 5 and is deterministic.
#[test]
fn stretch_key_length_and_determinism() {
    let a = stretch_key(b"AB", 5).unwrap();
    let b = stretch_key(b"AB", 5).unwrap();
    assert_eq!(a.len(), 5);
    assert_eq!(a, b);
    assert!(a[2..].iter().all(|&byte| byte >= 32));
}

/// CPRNG rejection produces no output.
#[test]
fn bbs_rejects_unscreened_primes() {
    assert!(matches!(
        blum_blum_shub(17, 23, 5, 10),
        Err(PdeError::TrapdoorRejected { .. })
    ));
}

/// A long run on a tiny modulus hits a cycle but keeps its partial output.
#[test]
fn bbs_cycle_is_not_fatal() {
    let seq = blum_blum_shub(7, 11, 4, 100).unwrap();
    assert!(seq.cycle_detected());
    assert!(!seq.is_empty());
    assert!(matches!(
        seq.into_complete(),
        Err(PdeError::CycleDetected { requested: 100, .. })
    ));
}

// ═══════════════════════════════════════════════════════════════════════
// Trapdoor permutations
// ═══════════════════════════════════════════════════════════════════════

/// `invert(forward(x)) == x` for the quadratic variant over residues.
#[test]
fn quadratic_roundtrip_all_trapdoors() {
    for td in TRAPDOORS {
        let perm = QuadraticPermutation::new(td).unwrap();
        let mut rng = StdRng::seed_from_u64(td.p as u64);
        let bbs = BlumBlumShub::new(td).unwrap();
        for _ in 0..200 {
            let x = translucent::derive_x0(&bbs, 4, &mut rng).unwrap();
            assert_eq!(perm.invert(perm.forward(x)).unwrap(), x, "{:?} x={}", td, x);
        }
    }
}

/// `invert(forward(x)) == x` for the exponent variant over all of `Z_n`.
#[test]
fn exponent_roundtrip_all_trapdoors() {
    for td in TRAPDOORS {
        let perm = ExponentPermutation::with_default_exponent(td).unwrap();
        let n = perm.modulus();
        let mut mt = MersenneTwister::with_seed(td.q as u64);
        for _ in 0..200 {
            let x = mt.next_bounded(n) as u32;
            assert_eq!(perm.invert(perm.forward(x)).unwrap(), x, "{:?} x={}", td, x);
        }
    }
}

/// Predicate is popcount parity through the trait default.
#[test]
fn trait_predicate_is_parity() {
    let perm = QuadraticPermutation::new(Trapdoor::DEMO).unwrap();
    for x in [0u32, 1, 3, 7, 0xFFFF_FFFF, 0x1234_5678] {
        assert_eq!(perm.predicate(x), x.count_ones() % 2 == 1);
        assert_eq!(perm.predicate(x), predicate(x));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Single-block integrity
// ═══════════════════════════════════════════════════════════════════════

/// A fresh translucent element decodes to member for every trapdoor and
/// both variants.
#[test]
fn translucent_element_always_member() {
    for td in TRAPDOORS {
        let bbs = BlumBlumShub::new(td).unwrap();
        let quadratic = QuadraticPermutation::new(td).unwrap();
        let exponent = ExponentPermutation::with_default_exponent(td).unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..30 {
            let cw = translucent::encode_one(&quadratic, &bbs, 16, &mut rng).unwrap();
            assert_eq!(translucent::decode(&quadratic, cw), Ok(Membership::Member));
            let cw = translucent::encode_one(&exponent, &bbs, 16, &mut rng).unwrap();
            assert_eq!(translucent::decode(&exponent, cw), Ok(Membership::Member));
        }
    }
}

/// 10,000 decoy elements: every one is rejected, none surfaces an error.
#[test]
fn decoy_rejection_rate() {
    let quadratic = QuadraticPermutation::new(Trapdoor::DEMO).unwrap();
    let exponent = ExponentPermutation::with_default_exponent(Trapdoor::DEMO).unwrap();
    let bbs = BlumBlumShub::new(Trapdoor::DECOY).unwrap();
    let mut rng = StdRng::seed_from_u64(0xDEC0);
    let mut first_step_rejections = 0;
    for _ in 0..10_000 {
        let cw = decoy::generate(&bbs, 16, &mut rng);
        assert!(
            matches!(translucent::decode(&quadratic, cw), Ok(Membership::Rejected { .. })),
            "quadratic accepted or failed on decoy {:?}",
            cw
        );
        match translucent::decode(&exponent, cw) {
            Ok(Membership::Rejected { step: 0 }) => first_step_rejections += 1,
            Ok(Membership::Rejected { .. }) => {}
            other => panic!("exponent decoded decoy {:?} as {:?}", cw, other),
        }
    }
    // Almost all of Z_2^32 lies below n, so about half fail the first
    // predicate check.
    assert!(
        (4_500..5_500).contains(&first_step_rejections),
        "first-step rejections: {}",
        first_step_rejections
    );
}

/// The decoder walks the predicate half in reverse iteration order.
#[test]
fn decoder_consumes_predicates_in_reverse() {
    let perm = ExponentPermutation::with_default_exponent(Trapdoor::DEMO).unwrap();
    let cw = translucent::encode_one_from_seed(&perm, 123_456);
    for i in 0..K {
        // b_i sits in bit 31 - i of the low half and is checked at step K-1-i.
        let tampered = Codeword::from_u64(cw.as_u64() ^ (1u64 << (31 - i)));
        assert_eq!(
            translucent::decode(&perm, tampered),
            Ok(Membership::Rejected { step: K - 1 - i }),
            "b_{} tamper",
            i
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// AsymmetricCodec — end-to-end
// ═══════════════════════════════════════════════════════════════════════

/// Encoding `1` and `0` as single blocks through the codec.
#[test]
fn codec_single_bits() {
    let codec =
        AsymmetricCodec::new(QuadraticPermutation::new(Trapdoor::DEMO).unwrap()).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let one = codec.encode_bit(true, &mut rng).unwrap();
    assert!(codec.decode_bit(one).unwrap());
    for _ in 0..1000 {
        let zero = codec.encode_bit(false, &mut rng).unwrap();
        assert_eq!(codec.decode_bit(zero), Ok(false), "decoy {:?}", zero);
    }
}

/// An all-zero message is made only of decoys and reports no inversion
/// failures.
#[test]
fn codec_zero_message_clean_decode() {
    let codec = SchemeConfig::default().build().unwrap();
    let mut rng = StdRng::seed_from_u64(16);
    let out = codec
        .decrypt_bytes(&codec.encrypt_to_bytes(&[0u8; 16], &mut rng).unwrap())
        .unwrap();
    assert_eq!(out.plaintext, vec![0u8; 16]);
    assert_eq!(out.inversion_failures, 0);
}

/// Full message round trip for both variants and every trapdoor.
#[test]
fn codec_message_roundtrip_matrix() {
    let message = b"The quick brown fox";
    for trapdoor in TRAPDOORS {
        for permutation in [
            PermutationKind::QuadraticResidue,
            PermutationKind::Exponent { e: 17 },
        ] {
            let codec = SchemeConfig {
                trapdoor,
                permutation,
                ..SchemeConfig::default()
            }
            .build()
            .unwrap();
            let mut rng = StdRng::seed_from_u64(trapdoor.p as u64 ^ 0x55);
            let ct = codec.encrypt_to_bytes(message, &mut rng).unwrap();
            assert_eq!(ct.len(), message.len() * 64);
            let out = codec.decrypt_bytes(&ct).unwrap();
            assert_eq!(out.plaintext, message.to_vec(), "{:?} {:?}", trapdoor, permutation);
        }
    }
}

/// Decrypting with a different trapdoor does not recover the plaintext.
#[test]
fn codec_wrong_trapdoor_garbles() {
    let encoder =
        AsymmetricCodec::new(QuadraticPermutation::new(Trapdoor::DEMO).unwrap()).unwrap();
    let decoder = AsymmetricCodec::new(
        QuadraticPermutation::new(Trapdoor::new(64763, 65063)).unwrap(),
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(2);
    let ct = encoder.encrypt_to_bytes(b"\xFF\xFF", &mut rng).unwrap();
    let out = decoder.decrypt_bytes(&ct).unwrap();
    assert_eq!(out.plaintext, vec![0, 0]);
}

/// A truncated ciphertext surfaces a length error instead of a short decode.
#[test]
fn codec_truncated_ciphertext() {
    let codec = SchemeConfig::default().build().unwrap();
    let mut rng = MersenneTwister::with_seed(3);
    let ct = codec.encrypt_to_bytes(b"ab", &mut rng).unwrap();
    assert_eq!(
        codec.decrypt_bytes(&ct[..ct.len() - 3]),
        Err(PdeError::InvalidBlockLength { len: 125 })
    );
}

/// The wall-clock generator works as an entropy source.
#[test]
fn codec_with_time_seeded_rng() {
    let codec = SchemeConfig::default().build().unwrap();
    let mut rng = MersenneTwister::from_time();
    let ct = codec.encrypt(b"now", &mut rng).unwrap();
    assert_eq!(codec.decrypt(&ct).unwrap().plaintext, b"now".to_vec());
}

// ═══════════════════════════════════════════════════════════════════════
// Symmetric deniable mode
// ═══════════════════════════════════════════════════════════════════════

/// HELLO / WORLD / XO scenario.
#[test]
fn symmetric_hello_world() {
    let sealed = symmetric::encrypt(b"HELLO", b"WORLD", b"XO").unwrap();
    assert_eq!(
        symmetric::xor_bytes(sealed.ciphertext(), b"WORLD").unwrap(),
        b"HELLO".to_vec()
    );
    assert_eq!(sealed.open(sealed.decoy_key()).unwrap(), b"XO   ".to_vec());
    assert_ne!(sealed.real_key(), sealed.decoy_key());
}

/// Every plaintext/decoy pair of equal length yields keys that differ
/// exactly when the plaintexts differ.
#[test]
fn symmetric_keys_differ_iff_plaintexts_differ() {
    let key = b"k3y!";
    for (real, cover) in [(b"abcd", b"abcd"), (b"abcd", b"abce"), (b"wxyz", b"    ")] {
        let sealed = symmetric::encrypt(real, key, cover).unwrap();
        assert_eq!(sealed.real_key() == sealed.decoy_key(), real == cover);
    }
}
