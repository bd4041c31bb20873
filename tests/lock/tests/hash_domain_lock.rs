//! Hash domain governance lock tests.
//!
//! Proves:
//! 1. Canonical domain set has expected count (catches forgotten additions)
//! 2. All domain byte strings are unique and none is a prefix of another
//! 3. All domains are null-terminated (wire format invariant)
//! 4. All domains follow the `WAYFINDER::*::V1\0` naming convention
//! 5. `canonical_hash` output is pinned to reference vectors and matches an
//!    independent SHA-256 computation for every domain
//! 6. No raw `WAYFINDER::` domain literals in production source outside `hash.rs`

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use wayfinder_kernel::hash::{
    canonical_hash, ALL_DOMAINS, DOMAIN_RUN_REPORT, DOMAIN_SEARCH_REPORT,
};

// ---------------------------------------------------------------------------
// 1. Canonical set count
// ---------------------------------------------------------------------------

/// ACCEPTANCE: HASH-DOMAIN-LOCK
#[test]
fn hash_domain_canonical_set_count() {
    assert_eq!(
        ALL_DOMAINS.len(),
        4,
        "expected 4 domains; if you added a new domain, update this count"
    );
}

// ---------------------------------------------------------------------------
// 2. Unique, prefix-free
// ---------------------------------------------------------------------------

/// ACCEPTANCE: HASH-DOMAIN-LOCK
#[test]
fn hash_domain_all_unique_and_prefix_free() {
    let mut seen = BTreeSet::new();
    for domain in ALL_DOMAINS {
        assert!(
            seen.insert(domain),
            "duplicate domain bytes: {}",
            String::from_utf8_lossy(domain)
        );
    }
    for a in ALL_DOMAINS {
        for b in ALL_DOMAINS {
            if a != b {
                assert!(
                    !b.starts_with(a),
                    "{} is a prefix of {}",
                    String::from_utf8_lossy(a),
                    String::from_utf8_lossy(b)
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// 3. Null-terminated, 4. Naming convention
// ---------------------------------------------------------------------------

/// ACCEPTANCE: HASH-DOMAIN-LOCK
#[test]
fn hash_domain_naming_convention() {
    for domain in ALL_DOMAINS {
        let (last, body) = domain.split_last().expect("non-empty domain");
        assert_eq!(*last, 0, "{} is not null-terminated", String::from_utf8_lossy(domain));
        assert!(!body.contains(&0), "interior null in domain");

        let text = std::str::from_utf8(body).expect("domain is ASCII");
        let parts: Vec<&str> = text.split("::").collect();
        assert_eq!(parts.len(), 3, "{text} is not WAYFINDER::<NAME>::V1");
        assert_eq!(parts[0], "WAYFINDER");
        assert!(
            !parts[1].is_empty()
                && parts[1]
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c == '_'),
            "{text}: name must be SCREAMING_SNAKE_CASE"
        );
        assert_eq!(parts[2], "V1");
    }
}

// ---------------------------------------------------------------------------
// 5. Reference vectors
// ---------------------------------------------------------------------------

/// ACCEPTANCE: HASH-DOMAIN-LOCK
#[test]
fn canonical_hash_reference_vectors() {
    assert_eq!(
        canonical_hash(DOMAIN_SEARCH_REPORT, b"{}").as_str(),
        "sha256:2a658d48e7238199ceb08adceb68c3f11ffce6df3b9fa2ff023d5c9f1237c892"
    );
    assert_eq!(
        canonical_hash(DOMAIN_RUN_REPORT, b"{}").as_str(),
        "sha256:dfdc1bc46da39654fac6606128782c43f2846b252ced55ba9f8db43566d15e15"
    );
}

/// ACCEPTANCE: HASH-DOMAIN-LOCK
#[test]
fn canonical_hash_matches_independent_sha256() {
    let payload = br#"{"nodes_created":1}"#;
    for domain in ALL_DOMAINS {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        hasher.update(payload);
        let expected = format!("sha256:{}", hex::encode(hasher.finalize()));
        assert_eq!(canonical_hash(domain, payload).as_str(), expected);
    }
}

// ---------------------------------------------------------------------------
// 6. No raw WAYFINDER:: domain literals in production source
// ---------------------------------------------------------------------------

/// Scan kernel/, search/, harness/ source for `b"WAYFINDER::` literals.
/// The only file allowed to contain them is `hash.rs`.
///
/// ACCEPTANCE: HASH-DOMAIN-LOCK
#[test]
fn no_raw_domain_literals_outside_authority() {
    let production_dirs = [
        concat!(env!("CARGO_MANIFEST_DIR"), "/../../kernel/src"),
        concat!(env!("CARGO_MANIFEST_DIR"), "/../../search/src"),
        concat!(env!("CARGO_MANIFEST_DIR"), "/../../harness/src"),
    ];

    let pattern = "b\"WAYFINDER::";
    let authority_file = "hash.rs";
    let mut violations = Vec::new();
    let mut scanned = 0;

    for dir in production_dirs {
        for path in walkdir(Path::new(dir)) {
            if path.extension().and_then(|e| e.to_str()) != Some("rs") {
                continue;
            }
            scanned += 1;
            if path.file_name().and_then(|n| n.to_str()) == Some(authority_file) {
                continue;
            }
            let Ok(content) = std::fs::read_to_string(&path) else {
                continue;
            };
            for (i, line) in content.lines().enumerate() {
                let trimmed = line.trim();
                if !trimmed.starts_with("//") && trimmed.contains(pattern) {
                    violations.push(format!("  {}:{}: {}", path.display(), i + 1, trimmed));
                }
            }
        }
    }

    assert!(scanned > 0, "no production sources found to scan");
    assert!(
        violations.is_empty(),
        "raw WAYFINDER:: domain literals found outside {authority_file}:\n{}",
        violations.join("\n")
    );
}

/// Simple recursive directory walker (avoids adding walkdir dependency).
fn walkdir(dir: &Path) -> Vec<PathBuf> {
    let mut results = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                results.extend(walkdir(&path));
            } else {
                results.push(path);
            }
        }
    }
    results
}
