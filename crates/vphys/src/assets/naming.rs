//! Entity names for output files
//!
//! World physics lives at entries like `maps/de_dust2/world_physics.vmdl_c`;
//! the map directory names the outputs.

/// Derive an entity name from a package entry's directory and file name
///
/// Prefers the component after a `maps` directory, then the last directory
/// component. Without a directory the file name is used, minus
/// `world_physics` and `.vmdl_c` and any `_`/`.` left at its ends.
pub fn entity_name_from_entry(directory: Option<&str>, file_name: &str) -> Option<String> {
    let name = match directory.filter(|dir| !dir.is_empty()) {
        Some(dir) => {
            let parts: Vec<&str> = dir.split(|c| c == '/' || c == '\\').collect();
            parts
                .windows(2)
                .find(|pair| pair[0].eq_ignore_ascii_case("maps"))
                .map_or_else(|| parts.last().copied().unwrap_or_default(), |pair| pair[1])
                .to_string()
        }
        None => file_name
            .replace("world_physics", "")
            .replace(".vmdl_c", "")
            .trim_matches(|c| c == '_' || c == '.')
            .to_string(),
    };

    (!name.is_empty()).then_some(name)
}

/// [`entity_name_from_entry`] for a full `dir/file` entry path
pub fn entity_name_from_entry_path(entry_path: &str) -> Option<String> {
    match entry_path.rfind(|c| c == '/' || c == '\\') {
        Some(at) => entity_name_from_entry(Some(&entry_path[..at]), &entry_path[at + 1..]),
        None => entity_name_from_entry(None, entry_path),
    }
}
