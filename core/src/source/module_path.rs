//! Module paths from file locations.

use std::path::{Component, Path};

/// The module path of `file` inside the crate rooted at `src_root`.
///
/// `lib.rs` and `main.rs` at the root and every `mod.rs` name their directory;
/// other files add their stem. Files outside `src_root` are treated as the root.
pub fn module_path(src_root: &Path, file: &Path) -> String {
    let Ok(relative) = file.strip_prefix(src_root) else {
        return "crate".to_string();
    };

    let mut segments: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if let Some(last) = segments.pop() {
        let stem = Path::new(&last)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or(last);
        let is_root_file = segments.is_empty() && (stem == "lib" || stem == "main");
        if !is_root_file && stem != "mod" {
            segments.push(stem);
        }
    }

    std::iter::once("crate".to_string())
        .chain(segments)
        .collect::<Vec<_>>()
        .join("::")
}
