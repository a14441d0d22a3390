#![allow(dead_code)]

use std::path::{Path, PathBuf};

use temp_dir::TempDir;

pub const CATALOG: &str = r#"[
  { "name": "Spaghetti Bolognese", "probability_weight": 1.0, "portions": 4 },
  { "name": "Chicken Curry", "probability_weight": 0.8, "portions": 4 },
  { "name": "Fish Tacos", "probability_weight": 0.6, "portions": 2 },
  { "name": "Vegetable Lasagna", "probability_weight": 0.5, "portions": 6 },
  { "name": "Lentil Soup", "probability_weight": 0.7, "portions": 4 },
  { "name": "Pizza", "probability_weight": 1.2, "portions": 2 },
  { "name": "Meatballs", "probability_weight": 0.8, "portions": 4,
    "items": [{ "name": "Minced meat", "price": 5900, "amount": 500.0, "unit": "g" }] }
]"#;

pub fn write_file(dir: &TempDir, name: &str, content: &str) -> anyhow::Result<PathBuf> {
    let path = dir.child(name);
    std::fs::write(&path, content)?;
    Ok(path)
}

pub fn path_str(path: &Path) -> String {
    path.display().to_string()
}
