//! Usage: Translation asset sources (external directory or embedded bundle) behind one walk/load API.

use crate::shared::fs::{copy_dir_recursive_if_missing, write_file_atomic_if_changed};
use rust_embed::RustEmbed;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(RustEmbed)]
#[folder = "translations/"]
struct BundledTranslations;

/// One node visited by [`AssetSource::walk`]. `path` is relative to the source root and always
/// uses `/` as separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AssetEntry {
    pub(crate) path: String,
    pub(crate) name: String,
    pub(crate) is_dir: bool,
}

impl AssetEntry {
    fn file(path: &str) -> Self {
        Self {
            path: path.to_string(),
            name: last_segment(path).to_string(),
            is_dir: false,
        }
    }

    fn dir(path: &str) -> Self {
        Self {
            path: path.to_string(),
            name: last_segment(path).to_string(),
            is_dir: true,
        }
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Snapshot of an embedded resource tree, keyed by relative path.
#[derive(Debug, Clone, Default)]
pub(crate) struct EmbeddedBundle {
    files: BTreeMap<String, Cow<'static, [u8]>>,
}

impl EmbeddedBundle {
    /// The translations compiled into the binary.
    pub(crate) fn bundled() -> Self {
        Self::from_embed::<BundledTranslations>()
    }

    fn from_embed<E: RustEmbed>() -> Self {
        let files = E::iter()
            .filter_map(|path| {
                let file = E::get(&path)?;
                Some((path.replace('\\', "/"), file.data))
            })
            .collect();
        Self { files }
    }

    #[cfg(test)]
    pub(crate) fn from_files<I, P, B>(files: I) -> Self
    where
        I: IntoIterator<Item = (P, B)>,
        P: Into<String>,
        B: Into<Vec<u8>>,
    {
        let files = files
            .into_iter()
            .map(|(path, bytes)| (path.into(), Cow::Owned(bytes.into())))
            .collect();
        Self { files }
    }

    pub(crate) fn len(&self) -> usize {
        self.files.len()
    }

    /// Directories first appear right before the first file below them; files follow path order.
    fn entries(&self) -> Vec<AssetEntry> {
        let mut seen_dirs = BTreeSet::new();
        let mut out = Vec::with_capacity(self.files.len());
        for path in self.files.keys() {
            let mut prefix_end = 0;
            while let Some(pos) = path[prefix_end..].find('/') {
                let dir = &path[..prefix_end + pos];
                if seen_dirs.insert(dir.to_string()) {
                    out.push(AssetEntry::dir(dir));
                }
                prefix_end += pos + 1;
            }
            out.push(AssetEntry::file(path));
        }
        out
    }

    fn has_dir(&self, path: &str) -> bool {
        let path = path.trim_matches('/');
        if path.is_empty() {
            return !self.files.is_empty();
        }
        let prefix = format!("{path}/");
        self.files.keys().any(|file| file.starts_with(&prefix))
    }
}

#[derive(Debug, Clone)]
pub(crate) enum AssetSource {
    Dir(PathBuf),
    Embedded(EmbeddedBundle),
}

impl AssetSource {
    /// Prefers `dir` when it exists on disk. Otherwise the bundle is extracted into `dir` first so
    /// later runs (and external tooling) find the files there, and the bundle itself is served.
    pub(crate) fn resolve(dir: &Path, bundle: EmbeddedBundle) -> Result<Self, String> {
        let external = Self::Dir(dir.to_path_buf());
        if external.has_dir("") {
            tracing::info!(dir = %dir.display(), "从外部目录加载翻译资源");
            return Ok(external);
        }

        let source = Self::Embedded(bundle);
        let written = source.extract(dir)?;
        tracing::info!(
            dir = %dir.display(),
            written,
            "外部翻译目录不存在，已从内置资源解压"
        );
        Ok(source)
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Dir(root) => format!("dir:{}", root.display()),
            Self::Embedded(bundle) => format!("embedded:{} files", bundle.len()),
        }
    }

    /// `path` is relative to the source root; an empty path means the root itself.
    pub(crate) fn has_dir(&self, path: &str) -> bool {
        match self {
            Self::Dir(root) => root.join(path.trim_matches('/')).is_dir(),
            Self::Embedded(bundle) => bundle.has_dir(path),
        }
    }

    /// Writes the resource tree below `dest`. Existing files that already match are not
    /// rewritten; returns how many files were written.
    pub(crate) fn extract(&self, dest: &Path) -> Result<usize, String> {
        match self {
            Self::Dir(root) => {
                if same_dir(root, dest) {
                    return Ok(0);
                }
                copy_dir_recursive_if_missing(root, dest)
                    .map_err(|e| format!("I18N_EXTRACT: {e}"))
            }
            Self::Embedded(bundle) => {
                std::fs::create_dir_all(dest).map_err(|e| {
                    format!("I18N_EXTRACT: failed to create {}: {e}", dest.display())
                })?;
                let mut written = 0;
                for (path, bytes) in &bundle.files {
                    if write_file_atomic_if_changed(&dest.join(path), bytes)
                        .map_err(|e| format!("I18N_EXTRACT: {e}"))?
                    {
                        written += 1;
                    }
                }
                Ok(written)
            }
        }
    }

    /// Visits every entry below the root in a stable order. The first error returned by `visit`
    /// stops the walk and is returned as-is.
    pub(crate) fn walk<F>(&self, mut visit: F) -> Result<(), String>
    where
        F: FnMut(&AssetEntry) -> Result<(), String>,
    {
        match self {
            Self::Dir(root) => {
                for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
                    let entry =
                        entry.map_err(|e| format!("failed to walk {}: {e}", root.display()))?;
                    let rel = entry.path().strip_prefix(root).map_err(|e| {
                        format!("failed to relativize {}: {e}", entry.path().display())
                    })?;
                    let path = rel
                        .components()
                        .map(|c| c.as_os_str().to_string_lossy())
                        .collect::<Vec<_>>()
                        .join("/");
                    visit(&AssetEntry {
                        name: entry.file_name().to_string_lossy().into_owned(),
                        is_dir: entry.file_type().is_dir(),
                        path,
                    })?;
                }
                Ok(())
            }
            Self::Embedded(bundle) => {
                for entry in bundle.entries() {
                    visit(&entry)?;
                }
                Ok(())
            }
        }
    }

    pub(crate) fn load_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, String> {
        match self {
            Self::Dir(root) => {
                let full = root.join(path);
                let bytes = std::fs::read(&full)
                    .map_err(|e| format!("failed to read {}: {e}", full.display()))?;
                serde_json::from_slice(&bytes)
                    .map_err(|e| format!("I18N_DECODE: failed to parse {}: {e}", full.display()))
            }
            Self::Embedded(bundle) => {
                let bytes = bundle
                    .files
                    .get(path)
                    .ok_or_else(|| format!("embedded asset not found: {path}"))?;
                serde_json::from_slice(bytes)
                    .map_err(|e| format!("I18N_DECODE: failed to parse embedded {path}: {e}"))
            }
        }
    }
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::fs::test_support::unique_tmp_dir;

    fn sample_bundle() -> EmbeddedBundle {
        EmbeddedBundle::from_files([
            ("zh.json", r#"{"v":"zh"}"#),
            ("en.json", r#"{"v":"en"}"#),
            ("extra/fr.json", r#"{"v":"fr"}"#),
        ])
    }

    fn collect(source: &AssetSource) -> Vec<AssetEntry> {
        let mut out = Vec::new();
        source
            .walk(|entry| {
                out.push(entry.clone());
                Ok(())
            })
            .expect("walk");
        out
    }

    #[derive(Debug, serde::Deserialize)]
    struct Doc {
        v: String,
    }

    #[test]
    fn bundled_translations_include_english_and_chinese() {
        let source = AssetSource::Embedded(EmbeddedBundle::bundled());
        let names: Vec<String> = collect(&source).into_iter().map(|e| e.path).collect();
        assert!(names.contains(&"en.json".to_string()));
        assert!(names.contains(&"zh.json".to_string()));
    }

    #[test]
    fn embedded_walk_is_stable_and_reports_directories() {
        let source = AssetSource::Embedded(sample_bundle());
        let first = collect(&source);
        assert_eq!(first, collect(&source));
        assert_eq!(
            first,
            vec![
                AssetEntry::file("en.json"),
                AssetEntry::dir("extra"),
                AssetEntry::file("extra/fr.json"),
                AssetEntry::file("zh.json"),
            ]
        );
        assert_eq!(first[2].name, "fr.json");
    }

    #[test]
    fn walk_stops_on_first_visit_error() {
        let source = AssetSource::Embedded(sample_bundle());
        let mut visited = 0;
        let err = source
            .walk(|entry| {
                visited += 1;
                if entry.is_dir {
                    return Err(format!("stop at {}", entry.path));
                }
                Ok(())
            })
            .unwrap_err();
        assert_eq!(err, "stop at extra");
        assert_eq!(visited, 2);
    }

    #[test]
    fn dir_walk_matches_embedded_layout_after_extract() {
        let dir = unique_tmp_dir("assets");
        let embedded = AssetSource::Embedded(sample_bundle());
        assert_eq!(embedded.extract(&dir).expect("extract"), 3);

        let on_disk = AssetSource::Dir(dir.clone());
        assert_eq!(collect(&on_disk), collect(&embedded));
        let doc: Doc = on_disk.load_json("extra/fr.json").expect("load");
        assert_eq!(doc.v, "fr");
        assert!(on_disk.has_dir("extra"));
        assert!(embedded.has_dir("extra"));
        assert!(!embedded.has_dir("missing"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn extract_twice_keeps_files_valid() {
        let dir = unique_tmp_dir("assets");
        let embedded = AssetSource::Embedded(sample_bundle());
        embedded.extract(&dir).expect("first extract");
        assert_eq!(embedded.extract(&dir).expect("second extract"), 0);
        assert_eq!(
            std::fs::read_to_string(dir.join("en.json")).expect("read"),
            r#"{"v":"en"}"#
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_json_reports_decode_error() {
        let source = AssetSource::Embedded(EmbeddedBundle::from_files([("bad.json", "{nope")]));
        let err = source.load_json::<Doc>("bad.json").unwrap_err();
        assert!(err.starts_with("I18N_DECODE:"), "{err}");
    }

    #[test]
    fn resolve_prefers_existing_directory() {
        let dir = unique_tmp_dir("assets");
        std::fs::write(dir.join("en.json"), r#"{"v":"disk"}"#).expect("write");

        let source = AssetSource::resolve(&dir, sample_bundle()).expect("resolve");
        assert!(matches!(source, AssetSource::Dir(_)));
        let doc: Doc = source.load_json("en.json").expect("load");
        assert_eq!(doc.v, "disk");
        assert!(!dir.join("zh.json").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn resolve_extracts_bundle_when_directory_missing() {
        let root = unique_tmp_dir("assets");
        let dir = root.join("translations");

        let source = AssetSource::resolve(&dir, sample_bundle()).expect("resolve");
        assert!(matches!(source, AssetSource::Embedded(_)));
        assert!(dir.join("zh.json").is_file());
        assert!(dir.join("extra").join("fr.json").is_file());

        let _ = std::fs::remove_dir_all(&root);
    }
}
