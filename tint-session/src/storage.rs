use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::recent::RECENT_COLORS_LIMIT;

/// Current recent-colors file schema version.
pub(crate) const RECENT_COLORS_VERSION: u8 = 1;

/// Payload persisted for a single namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct RecentColorsFile {
    pub(crate) version: u8,
    pub(crate) colors: Vec<String>,
}

/// Persistence seam for the recent-color store.
///
/// Backends move ordered lists of textual colors in and out of storage and
/// know nothing about ordering rules or capacity.
pub trait RecentColorBackend {
    /// Read the list stored under `namespace`, or `None` when nothing was
    /// ever written there.
    fn load(&self, namespace: &str) -> Result<Option<Vec<String>>>;

    /// Replace the list stored under `namespace`.
    fn save(&self, namespace: &str, colors: &[String]) -> Result<()>;
}

impl<B: RecentColorBackend + ?Sized> RecentColorBackend for Rc<B> {
    fn load(&self, namespace: &str) -> Result<Option<Vec<String>>> {
        (**self).load(namespace)
    }

    fn save(&self, namespace: &str, colors: &[String]) -> Result<()> {
        (**self).save(namespace, colors)
    }
}

/// Options for opening a file-backed recent-color store.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Maximum number of remembered colors per namespace.
    pub capacity: usize,
    /// Directory holding one JSON file per namespace.
    pub storage_dir: PathBuf,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            capacity: RECENT_COLORS_LIMIT,
            storage_dir: default_storage_dir(),
        }
    }
}

/// Directory used when no explicit storage location is configured.
pub fn default_storage_dir() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        return Path::new(&home).join(".config").join("tint");
    }

    std::env::temp_dir().join("tint")
}

/// Stores each namespace as `<dir>/<namespace>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds the colors of `namespace`.
    pub fn path_for(&self, namespace: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(namespace)))
    }
}

impl RecentColorBackend for JsonFileBackend {
    fn load(&self, namespace: &str) -> Result<Option<Vec<String>>> {
        let path = self.path_for(namespace);
        let data = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(None);
            },
            Err(err) => return Err(err.into()),
        };

        let parsed: RecentColorsFile = serde_json::from_str(&data)?;
        if parsed.version != RECENT_COLORS_VERSION {
            log::warn!(
                "recent colors file {} has version {}, expected {}",
                path.display(),
                parsed.version,
                RECENT_COLORS_VERSION
            );
        }

        Ok(Some(parsed.colors))
    }

    fn save(&self, namespace: &str, colors: &[String]) -> Result<()> {
        let path = self.path_for(namespace);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let file = RecentColorsFile {
            version: RECENT_COLORS_VERSION,
            colors: colors.to_vec(),
        };
        let payload = serde_json::to_string_pretty(&file)?;
        write_atomic(&path, payload.as_bytes())?;

        Ok(())
    }
}

/// Process-local backend; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RefCell<HashMap<String, Vec<String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecentColorBackend for MemoryBackend {
    fn load(&self, namespace: &str) -> Result<Option<Vec<String>>> {
        Ok(self.entries.borrow().get(namespace).cloned())
    }

    fn save(&self, namespace: &str, colors: &[String]) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(namespace.to_string(), colors.to_vec());
        Ok(())
    }
}

/// Map a namespace to a file stem that cannot escape the storage directory.
///
/// ASCII letters, digits and `-` are kept; every other byte, `_` included,
/// becomes `_XX`. Distinct namespaces therefore never share a file, and
/// the empty namespace maps to the lone `_`, which no escape produces.
fn file_stem(namespace: &str) -> String {
    if namespace.is_empty() {
        return String::from("_");
    }

    let mut stem = String::with_capacity(namespace.len());
    for byte in namespace.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            stem.push(char::from(byte));
        } else {
            stem.push_str(&format!("_{byte:02X}"));
        }
    }
    stem
}

fn write_atomic(path: &Path, payload: &[u8]) -> std::io::Result<()> {
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, payload)?;
    fs::rename(tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    use tint_color::ColorValue;

    use super::{
        JsonFileBackend, MemoryBackend, RECENT_COLORS_VERSION,
        RecentColorBackend, RecentColorsFile, file_stem,
    };
    use crate::error::StoreError;
    use crate::recent::RecentColorStore;

    #[test]
    fn given_saved_colors_when_loaded_then_order_is_preserved() {
        let root = test_temp_dir("round_trip");
        let backend = JsonFileBackend::new(&root);
        let colors = vec![String::from("#000000"), String::from("#FF00FF")];

        backend
            .save("tint.recent_colors", &colors)
            .expect("colors should save successfully");
        let loaded = backend
            .load("tint.recent_colors")
            .expect("colors should load successfully");

        assert_eq!(loaded, Some(colors));

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_missing_file_when_loaded_then_returns_none() {
        let root = test_temp_dir("missing");
        let backend = JsonFileBackend::new(root.join("nested"));

        let loaded = backend
            .load("never-written")
            .expect("missing file should not be an error");

        assert_eq!(loaded, None);

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_invalid_json_when_loaded_then_returns_json_error() {
        let root = test_temp_dir("invalid_json");
        let backend = JsonFileBackend::new(&root);
        fs::write(backend.path_for("broken"), "{ this is not valid json")
            .expect("invalid test payload should be written");

        let loaded = backend.load("broken");

        assert!(matches!(loaded, Err(StoreError::Json(_))));

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_saved_file_when_read_raw_then_contains_versioned_payload() {
        let root = test_temp_dir("layout");
        let backend = JsonFileBackend::new(&root);
        backend
            .save("layout", &[String::from("#ABCDEF")])
            .expect("colors should save successfully");

        let raw = fs::read_to_string(backend.path_for("layout"))
            .expect("saved file should be readable");
        let file: RecentColorsFile =
            serde_json::from_str(&raw).expect("saved file should be JSON");

        assert_eq!(file.version, RECENT_COLORS_VERSION);
        assert_eq!(file.colors, vec![String::from("#ABCDEF")]);
        let tmp_path = backend.path_for("layout").with_extension("json.tmp");
        assert!(!tmp_path.exists());

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_hostile_namespace_when_mapped_then_stays_inside_directory() {
        assert_eq!(
            file_stem("../../etc/passwd"),
            "_2E_2E_2F_2E_2E_2Fetc_2Fpasswd"
        );
        assert_eq!(file_stem("tint.recent_colors"), "tint_2Erecent_5Fcolors");
        assert_eq!(file_stem(""), "_");
        assert_eq!(file_stem(".."), "_2E_2E");
    }

    #[test]
    fn given_lookalike_namespaces_when_saved_then_files_stay_separate() {
        let root = test_temp_dir("lookalike");
        let backend = JsonFileBackend::new(&root);
        let names = ["user/a", "user_a", "user:a", "x", "..x", ""];

        for (index, name) in names.iter().enumerate() {
            backend
                .save(name, &[format!("#00000{index}")])
                .expect("colors should save successfully");
        }

        for (index, name) in names.iter().enumerate() {
            assert_eq!(
                backend.load(name).expect("colors should load successfully"),
                Some(vec![format!("#00000{index}")]),
                "namespace {name:?}"
            );
        }

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_corrupt_file_when_color_added_then_fresh_history_is_written() {
        let root = test_temp_dir("corrupt");
        let backend = JsonFileBackend::new(&root);
        fs::write(backend.path_for("ns"), "{ truncated")
            .expect("corrupt test payload should be written");
        let store = RecentColorStore::new(backend.clone());
        let color = ColorValue::rgb(0x01, 0x02, 0x03);

        store
            .add_color("ns", color)
            .expect("corrupt history should be replaced");

        assert_eq!(store.recent("ns"), vec![color]);
        assert!(matches!(backend.load("ns"), Ok(Some(_))));

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_memory_backend_when_saved_then_namespaces_are_isolated() {
        let backend = MemoryBackend::new();
        backend
            .save("a", &[String::from("#111111")])
            .expect("memory save never fails");

        assert_eq!(
            backend.load("a").expect("memory load never fails"),
            Some(vec![String::from("#111111")])
        );
        assert_eq!(backend.load("b").expect("memory load never fails"), None);
    }

    fn test_temp_dir(test_name: &str) -> std::path::PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be monotonic")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "tint-recent-{test_name}-{stamp}-{}",
            std::process::id()
        ));

        fs::create_dir_all(&dir)
            .expect("temporary directory should be created");
        dir
    }
}
