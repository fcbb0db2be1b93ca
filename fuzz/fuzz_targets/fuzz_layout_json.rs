#![no_main]

use bento_core::Block;
use bento_runtime::{BuilderConfig, BuilderStore, EditError, validate_layout};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Saved layouts and configs arrive as untrusted text.
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let _ = BuilderConfig::from_json_str(text);
    let _ = BuilderConfig::from_toml_str(text);

    let Ok(blocks) = serde_json::from_str::<Vec<Block>>(text) else {
        return;
    };
    let config = BuilderConfig::default();
    let (columns, rows) = (config.settings.columns, config.settings.rows);
    let valid = validate_layout(&blocks, columns, rows).is_ok();
    match BuilderStore::from_blocks(config, blocks) {
        Ok(mut store) => {
            assert!(valid, "invalid layout accepted");
            // Ids continue past the largest loaded one and are never repeated.
            for _ in 0..3 {
                let Ok(block) = store.add(None) else {
                    break;
                };
                let max = store.blocks().iter().map(|b| b.id.raw()).max().unwrap_or(0);
                assert_eq!(block.id.raw(), max);
                let repeats = store.blocks().iter().filter(|b| b.id == block.id).count();
                assert_eq!(repeats, 1, "id {} handed out twice", block.id);
            }
        }
        Err(EditError::IdExhausted(_)) => {}
        Err(_) => assert!(!valid, "valid layout refused"),
    }
});
