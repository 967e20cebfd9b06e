//! Key Tree Integration Tests
//!
//! ## Test Categories
//!
//! 1. **Golden Tests** - Mnemonic → seed → key against fixed vectors
//! 2. **Determinism** - Same seed and path, same key
//! 3. **Isolation** - Different paths and parameters give unrelated keys
//! 4. **Path Handling** - Textual paths and length bounds
//! 5. **Concurrency** - One tree shared across threads

use once_cell::sync::Lazy;
use seedtree::{Error, KeyTree, KeyTreeConfig, MnemonicCodec, Path, Seed};
use std::sync::Arc;

static CODEC: Lazy<MnemonicCodec> = Lazy::new(MnemonicCodec::english);

const GUESS_WORDS: [&str; 15] = [
    "guess", "rocket", "weird", "sock", "wreck", "pond", "wrist", "tip", "crane", "pet", "wire",
    "tray", "furnace", "friend", "genuine",
];

fn secret_seed() -> Seed {
    CODEC.derive_seed(&GUESS_WORDS, "secret").expect("seed")
}

// ============================================================================
// 1. GOLDEN TESTS - Known Values (Regression Detection)
// ============================================================================

mod golden_tests {
    use super::*;

    /// Full pipeline: words + passphrase → seed → x/44/0/0/1
    #[test]
    fn golden_key_from_mnemonic() {
        let tree = KeyTree::new(secret_seed().as_bytes()).expect("tree");
        let key = tree.jump(&[44, 0, 0, 1]).expect("jump");
        assert_eq!(
            key.to_hex(),
            "4bd1067c24f96e5344447e71708a21a6a2487f123fb7a6da3e93b09a0c96c91e",
            "Golden key mismatch - derivation algorithm changed!"
        );
    }

    #[test]
    fn golden_intermediate_levels() {
        let tree = KeyTree::new(secret_seed().as_bytes()).expect("tree");
        assert_eq!(
            tree.jump(&[44]).unwrap().to_hex(),
            "acda33ef8b3275434a594d5f131513d1e0325a6bce257596d43e1645eb1393bd"
        );
        assert_eq!(
            tree.jump(&[44, 0]).unwrap().to_hex(),
            "8945abe6c754cfe4469f4380aa2df7a7a5d996de0440c5e75cba6ccb4494ac06"
        );
    }

    #[test]
    fn golden_max_index() {
        let tree = KeyTree::new(secret_seed().as_bytes()).expect("tree");
        assert_eq!(
            tree.jump(&[u32::MAX]).unwrap().to_hex(),
            "b9b96e9ab99b9bdb08b52951d3926e6c2062145d50d40f2029afd3848d5325d1"
        );
    }

    #[test]
    fn golden_wide_keys() {
        let config = KeyTreeConfig::new().with_key_entropy_size(64);
        let tree = KeyTree::with_config(secret_seed().as_bytes(), config).expect("tree");
        let key = tree.jump(&[44, 0, 0, 1]).expect("jump");
        assert_eq!(key.len(), 64);
        assert_eq!(
            key.to_hex(),
            "68afb7edcef1da21dfffe2af626d1ea8970d5f165239d6a2d752d523013387d2\
             a3da24db62c882b3e437e57ba254eae1bd0d6789953a519789d4bfd0109cd81f"
        );
    }
}

// ============================================================================
// 2. DETERMINISM TESTS - Reproducibility
// ============================================================================

mod determinism_tests {
    use super::*;

    #[test]
    fn same_tree_same_key() {
        let tree = KeyTree::new(secret_seed().as_bytes()).expect("tree");
        let first = tree.jump(&[44, 0, 0, 1]).unwrap();
        for _ in 0..10 {
            assert_eq!(tree.jump(&[44, 0, 0, 1]).unwrap(), first);
        }
    }

    #[test]
    fn fresh_trees_same_key() {
        let a = KeyTree::new(secret_seed().as_bytes()).unwrap();
        let b = KeyTree::new(secret_seed().as_bytes()).unwrap();
        assert_eq!(a.jump(&[7, 7]).unwrap(), b.jump(&[7, 7]).unwrap());
    }

    /// Larger max level does not change keys at shallower depths
    #[test]
    fn max_level_does_not_affect_keys() {
        let shallow = KeyTree::new(secret_seed().as_bytes()).unwrap();
        let deep = KeyTree::with_config(
            secret_seed().as_bytes(),
            KeyTreeConfig::new().with_max_level(16),
        )
        .unwrap();
        assert_eq!(shallow.jump(&[44, 0, 0, 1]).unwrap(), deep.jump(&[44, 0, 0, 1]).unwrap());
    }
}

// ============================================================================
// 3. ISOLATION TESTS - Key Independence
// ============================================================================

mod isolation_tests {
    use super::*;

    #[test]
    fn sibling_paths_differ() {
        let tree = KeyTree::new(secret_seed().as_bytes()).unwrap();
        let a = tree.jump(&[44, 0, 0, 1]).unwrap();
        let b = tree.jump(&[44, 0, 0, 2]).unwrap();
        let c = tree.jump(&[44, 0, 1, 1]).unwrap();
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    /// A child key is not a prefix or slice of its parent's key
    #[test]
    fn parent_and_child_differ() {
        let tree = KeyTree::new(secret_seed().as_bytes()).unwrap();
        let parent = tree.jump(&[44, 0]).unwrap();
        let child = tree.jump(&[44, 0, 0]).unwrap();
        assert_ne!(parent, child);
    }

    /// Index order matters
    #[test]
    fn permuted_path_differs() {
        let tree = KeyTree::new(secret_seed().as_bytes()).unwrap();
        assert_ne!(tree.jump(&[1, 2]).unwrap(), tree.jump(&[2, 1]).unwrap());
    }

    #[test]
    fn passphrase_isolates_trees() {
        let plain = CODEC.derive_seed(&GUESS_WORDS, "").unwrap();
        let a = KeyTree::new(plain.as_bytes()).unwrap();
        let b = KeyTree::new(secret_seed().as_bytes()).unwrap();
        assert_ne!(a.jump(&[44, 0, 0, 1]).unwrap(), b.jump(&[44, 0, 0, 1]).unwrap());
    }

    /// Derived keys never equal raw seed bytes
    #[test]
    fn key_differs_from_seed() {
        let seed = secret_seed();
        let key = KeyTree::new(seed.as_bytes()).unwrap().jump(&[1]).unwrap();
        assert_ne!(key.as_bytes(), &seed.as_bytes()[..32]);
        assert_ne!(key.as_bytes(), &seed.as_bytes()[32..]);
    }
}

// ============================================================================
// 4. PATH HANDLING - Text Form and Bounds
// ============================================================================

mod path_tests {
    use super::*;

    #[test]
    fn textual_path_matches_indices() {
        let tree = KeyTree::new(secret_seed().as_bytes()).unwrap();
        let path: Path = "x/44/1/1/9".parse().unwrap();
        assert_eq!(tree.jump_path(&path).unwrap(), tree.jump(&[44, 1, 1, 9]).unwrap());
    }

    #[test]
    fn path_setters_walk_the_tree() {
        let tree = KeyTree::new(secret_seed().as_bytes()).unwrap();
        let mut path = Path::new(44, 1, 1, 1);
        let first = tree.jump_path(&path).unwrap();
        path.set_index(2);
        assert_eq!(path.to_string(), "x/44/1/1/2");
        assert_ne!(tree.jump_path(&path).unwrap(), first);
    }

    #[test]
    fn four_level_path_needs_four_levels() {
        let config = KeyTreeConfig::new().with_max_level(3);
        let tree = KeyTree::with_config(secret_seed().as_bytes(), config).unwrap();
        let path = Path::new(44, 1, 1, 1);
        assert_eq!(tree.jump_path(&path).unwrap_err(), Error::InvalidPathLength(4));
        assert!(tree.jump(&[44, 1, 1]).is_ok());
    }

    /// Zero indices are fine at the tree level
    #[test]
    fn zero_index_accepted_by_jump() {
        let tree = KeyTree::new(secret_seed().as_bytes()).unwrap();
        assert!(tree.jump(&[0]).is_ok());
        assert_eq!("x/0/1/1/1".parse::<Path>(), Err(Error::ZeroPathComponent));
    }

    #[test]
    fn length_bounds() {
        let tree = KeyTree::new(secret_seed().as_bytes()).unwrap();
        assert_eq!(tree.jump(&[]).unwrap_err(), Error::InvalidPathLength(0));
        assert_eq!(tree.jump(&[1; 5]).unwrap_err(), Error::InvalidPathLength(5));

        let deep = KeyTree::with_config(
            secret_seed().as_bytes(),
            KeyTreeConfig::new().with_max_level(255),
        )
        .unwrap();
        assert!(deep.jump(&[1; 255]).is_ok());
    }
}

// ============================================================================
// 5. CONCURRENCY - Shared Read-Only Use
// ============================================================================

mod concurrency_tests {
    use super::*;

    #[test]
    fn shared_tree_across_threads() {
        let tree = Arc::new(KeyTree::new(secret_seed().as_bytes()).unwrap());
        let expected: Vec<_> = (1..=8u32).map(|i| tree.jump(&[44, i]).unwrap()).collect();

        let handles: Vec<_> = (1..=8u32)
            .map(|i| {
                let tree = Arc::clone(&tree);
                std::thread::spawn(move || tree.jump(&[44, i]).unwrap())
            })
            .collect();

        for (handle, want) in handles.into_iter().zip(expected) {
            assert_eq!(handle.join().unwrap(), want);
        }
    }

    #[test]
    fn shared_codec_across_threads() {
        std::thread::scope(|s| {
            let workers: Vec<_> = (0..4)
                .map(|_| s.spawn(|| CODEC.derive_seed(&GUESS_WORDS, "secret").unwrap()))
                .collect();
            for worker in workers {
                assert_eq!(worker.join().unwrap().as_bytes(), secret_seed().as_bytes());
            }
        });
    }
}
