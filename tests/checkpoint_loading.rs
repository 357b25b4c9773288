//! Integration tests for checkpoint loading, verification and reorg gating

use forkguard::checkpoints::{CheckpointLoader, Checkpoints};
use forkguard::error::CheckpointError;
use forkguard::feed::{FileRecords, StaticRecords};
use forkguard::hardfork::{required_version, ForkVersion, HardForkFeature};
use forkguard::network::NetworkType;
use std::fs;
use tempfile::TempDir;

/// Helper to get test directory
fn get_test_dir() -> Result<TempDir, Box<dyn std::error::Error>> {
    Ok(TempDir::new()?)
}

fn hex_of(byte: u8) -> String {
    hex::encode([byte; 32])
}

#[test]
fn test_file_roundtrip_preserves_mapping() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = get_test_dir()?;
    let path = temp_dir.path().join("exported").join("checkpoints.json");

    let original = Checkpoints::new();
    let loader = CheckpointLoader::without_feed(original.clone());
    loader.load_defaults(NetworkType::Primary)?;
    original.add(60000, [0x60; 32])?;
    original.save_to_file(&path)?;

    let reloaded = Checkpoints::new();
    CheckpointLoader::without_feed(reloaded.clone()).load_from_file(&path)?;

    assert_eq!(original.points(), reloaded.points());
    Ok(())
}

#[test]
fn test_primary_defaults_gate_reorgs() -> Result<(), Box<dyn std::error::Error>> {
    let store = Checkpoints::new();
    CheckpointLoader::without_feed(store.clone()).load_defaults(NetworkType::Primary)?;

    // best chain between checkpoints 200 and 500
    assert!(!store.is_alternative_block_allowed(300, 150));
    assert!(!store.is_alternative_block_allowed(300, 200));
    assert!(store.is_alternative_block_allowed(300, 201));

    let hash_at_10 = forkguard::hash::hash_from_hex(
        "370ef03bafc23e96cc3b8075d9b11d637363a87d6961e6a0497ec32cecb46750",
    )?;
    assert!(store.verify_block(10, &hash_at_10).passed());
    assert!(store.verify_block(10, &[0x01; 32]).failed());
    assert!(store.is_in_checkpoint_zone(58500));
    assert!(!store.is_in_checkpoint_zone(58501));
    Ok(())
}

#[test]
fn test_operator_file_extends_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = get_test_dir()?;
    let path = temp_dir.path().join("checkpoints.json");
    fs::write(
        &path,
        format!(
            r#"{{"hashlines": [
                {{"height": 10, "hash": "{}"}},
                {{"height": 70000, "hash": "{}"}}
            ]}}"#,
            hex_of(0xee),
            hex_of(0x70)
        ),
    )?;

    let store = Checkpoints::new();
    let loader = CheckpointLoader::without_feed(store.clone());
    loader.load_defaults(NetworkType::Primary)?;
    loader.load_all(&path, NetworkType::Primary, false)?;

    assert_eq!(store.highest_height(), Some(70000));
    // height 10 is below the compiled-in max and was ignored
    assert_ne!(store.lookup(10), Some([0xee; 32]));
    Ok(())
}

#[test]
fn test_feed_file_source_through_load_all() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = get_test_dir()?;
    let feed_path = temp_dir.path().join("feed.txt");
    fs::write(
        &feed_path,
        format!("100:{}\nbroken line\n200:{}\n", hex_of(1), hex_of(2)),
    )?;

    let store = Checkpoints::new();
    let loader = CheckpointLoader::new(store.clone(), Box::new(FileRecords::new(&feed_path)));
    loader.load_all(&temp_dir.path().join("absent.json"), NetworkType::Staging, true)?;

    assert_eq!(store.len(), 2);
    assert_eq!(store.lookup(200), Some([2; 32]));
    Ok(())
}

#[test]
fn test_feed_conflict_is_advisory_in_load_all() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = get_test_dir()?;
    let store = Checkpoints::new();
    store.add(100, [1; 32])?;

    let loader = CheckpointLoader::new(
        store.clone(),
        Box::new(StaticRecords::new([format!("100:{}", hex_of(9))])),
    );

    let direct = loader.load_from_feed(NetworkType::Test);
    assert!(matches!(direct, Err(CheckpointError::Conflict { height: 100, .. })));

    loader.load_all(&temp_dir.path().join("absent.json"), NetworkType::Test, true)?;
    assert_eq!(store.lookup(100), Some([1; 32]));
    Ok(())
}

#[test]
fn test_verification_continues_during_load() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = get_test_dir()?;
    let path = temp_dir.path().join("checkpoints.json");
    let lines: Vec<String> = (1..=2000u64)
        .map(|h| {
            format!(
                r#"{{"height": {}, "hash": "{}"}}"#,
                h * 100,
                hex_of((h % 200) as u8 + 1)
            )
        })
        .collect();
    fs::write(&path, format!(r#"{{"hashlines": [{}]}}"#, lines.join(",")))?;

    let store = Checkpoints::new();
    store.add(50, [0x50; 32])?;

    let reader = {
        let store = store.clone();
        std::thread::spawn(move || {
            for _ in 0..1000 {
                assert!(store.verify_block(50, &[0x50; 32]).passed());
                assert!(!store.is_alternative_block_allowed(60, 50));
            }
        })
    };

    CheckpointLoader::without_feed(store.clone()).load_from_file(&path)?;
    reader.join().map_err(|_| "reader thread panicked")?;

    assert_eq!(store.highest_height(), Some(200_000));
    Ok(())
}

#[test]
fn test_fork_table_matches_networks() {
    assert_eq!(
        required_version(NetworkType::Primary, HardForkFeature::Bulletproofs),
        ForkVersion::Version(5)
    );
    assert_eq!(
        required_version(NetworkType::Staging, HardForkFeature::Bulletproofs),
        ForkVersion::Disabled
    );
    assert_eq!(
        required_version(NetworkType::Test, HardForkFeature::DevFundV2),
        ForkVersion::Version(4)
    );
}
