//! Arena content loading: the boundary rectangle, the static platform set
//! and the two spawn points, read from a versioned JSON file.
//!
//! The platform list is immutable for the lifetime of a match and is passed
//! by reference into collision resolution every frame. Validation is strict
//! up front so the runtime never needs defensive checks on this data.

use duel_core::geom::Rect;
use glam::Vec2;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct ArenaFile {
    pub version: String,
    pub arena_id: String,
    pub bounds: Rect,
    pub platforms: Vec<Rect>,
    pub player_spawn: [f32; 2],
    pub enemy_spawn: [f32; 2],
}

#[derive(Debug, Clone)]
pub struct Arena {
    pub arena_id: String,
    pub bounds: Rect,
    pub platforms: Vec<Rect>,
    pub player_spawn: Vec2,
    pub enemy_spawn: Vec2,
}

impl Arena {
    pub fn from_file(file: ArenaFile) -> Self {
        Self {
            arena_id: file.arena_id,
            bounds: file.bounds,
            platforms: file.platforms,
            player_spawn: Vec2::from(file.player_spawn),
            enemy_spawn: Vec2::from(file.enemy_spawn),
        }
    }
}

pub fn load_arena_from_path(path: &Path) -> Result<Arena, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let file: ArenaFile = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse arena JSON {}: {e}", path.display()))?;
    validate_arena_file(&file)?;
    Ok(Arena::from_file(file))
}

fn validate_arena_file(file: &ArenaFile) -> Result<(), String> {
    if file.version != "0.1" {
        return Err(format!(
            "Arena validation failed: unsupported version '{}'",
            file.version
        ));
    }
    if file.arena_id.is_empty() {
        return Err("Arena validation failed: arena_id is empty".to_string());
    }
    if file.bounds.w <= 0.0 || file.bounds.h <= 0.0 {
        return Err("Arena validation failed: bounds must have positive size".to_string());
    }
    if file.platforms.is_empty() {
        return Err("Arena validation failed: platforms array is empty".to_string());
    }
    for (i, rect) in file.platforms.iter().enumerate() {
        if rect.w <= 0.0 || rect.h <= 0.0 {
            return Err(format!(
                "Arena validation failed: platform {i} has degenerate size ({} x {})",
                rect.w, rect.h
            ));
        }
    }
    for (name, spawn) in [
        ("player_spawn", file.player_spawn),
        ("enemy_spawn", file.enemy_spawn),
    ] {
        let p = Vec2::from(spawn);
        if p.x < file.bounds.x
            || p.x > file.bounds.x + file.bounds.w
            || p.y < file.bounds.y
            || p.y > file.bounds.y + file.bounds.h
        {
            return Err(format!(
                "Arena validation failed: {name} ({}, {}) lies outside the bounds",
                p.x, p.y
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "duel_arena_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    const VALID_ARENA: &str = r#"{
      "version": "0.1",
      "arena_id": "duel",
      "bounds": { "x": 0, "y": 0, "w": 800, "h": 600 },
      "platforms": [
        { "x": 0,   "y": 400, "w": 300, "h": 100 },
        { "x": 300, "y": 400, "w": 500, "h": 100 },
        { "x": 700, "y": 300, "w": 50,  "h": 100 },
        { "x": 700, "y": 100, "w": 50,  "h": 200 }
      ],
      "player_spawn": [100, 200],
      "enemy_spawn": [600, 200]
    }"#;

    #[test]
    fn valid_arena_parses() {
        let path = temp_file_path("valid");
        fs::write(&path, VALID_ARENA).expect("write temp file");

        let arena = load_arena_from_path(&path).expect("valid arena should load");
        assert_eq!(arena.arena_id, "duel");
        assert_eq!(arena.platforms.len(), 4);
        assert_eq!(arena.player_spawn, Vec2::new(100.0, 200.0));
        assert_eq!(arena.bounds.w, 800.0);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn rejects_unsupported_version() {
        let path = temp_file_path("bad_version");
        fs::write(&path, VALID_ARENA.replace("\"0.1\"", "\"9.9\"")).expect("write temp file");
        let err = load_arena_from_path(&path).expect_err("bad version should fail");
        assert!(err.contains("unsupported version"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn rejects_empty_platform_list() {
        let path = temp_file_path("no_platforms");
        let json = r#"{
          "version": "0.1",
          "arena_id": "duel",
          "bounds": { "x": 0, "y": 0, "w": 800, "h": 600 },
          "platforms": [],
          "player_spawn": [100, 200],
          "enemy_spawn": [600, 200]
        }"#;
        fs::write(&path, json).expect("write temp file");
        let err = load_arena_from_path(&path).expect_err("empty platforms should fail");
        assert!(err.contains("platforms array is empty"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn rejects_degenerate_platform() {
        let path = temp_file_path("degenerate");
        let json = VALID_ARENA.replace(
            r#"{ "x": 700, "y": 100, "w": 50,  "h": 200 }"#,
            r#"{ "x": 700, "y": 100, "w": 0,  "h": 200 }"#,
        );
        fs::write(&path, json).expect("write temp file");
        let err = load_arena_from_path(&path).expect_err("zero-width platform should fail");
        assert!(err.contains("degenerate size"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn rejects_spawn_outside_bounds() {
        let path = temp_file_path("bad_spawn");
        let json = VALID_ARENA.replace("[600, 200]", "[900, 200]");
        fs::write(&path, json).expect("write temp file");
        let err = load_arena_from_path(&path).expect_err("out-of-bounds spawn should fail");
        assert!(err.contains("enemy_spawn"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_file_reports_the_path() {
        let path = temp_file_path("missing_never_written");
        let err = load_arena_from_path(&path).expect_err("missing file should fail");
        assert!(err.contains("Failed to read"));
    }
}
