//! Usage: Small filesystem helpers shared across infra adapters (atomic writes, tree copies).

use std::path::Path;

/// Copies `src` into `dst` recursively. Files already present under `dst` are left untouched.
pub(crate) fn copy_dir_recursive_if_missing(src: &Path, dst: &Path) -> Result<usize, String> {
    std::fs::create_dir_all(dst).map_err(|e| format!("failed to create {}: {e}", dst.display()))?;

    let mut copied = 0;
    let entries =
        std::fs::read_dir(src).map_err(|e| format!("failed to read dir {}: {e}", src.display()))?;
    for entry in entries {
        let entry =
            entry.map_err(|e| format!("failed to read dir entry {}: {e}", src.display()))?;
        let path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if path.is_dir() {
            copied += copy_dir_recursive_if_missing(&path, &dst_path)?;
            continue;
        }

        if dst_path.exists() {
            continue;
        }

        std::fs::copy(&path, &dst_path).map_err(|e| {
            format!(
                "failed to copy {} -> {}: {e}",
                path.display(),
                dst_path.display()
            )
        })?;
        copied += 1;
    }

    Ok(copied)
}

pub(crate) fn read_optional_to_string(path: &Path) -> Result<Option<String>, String> {
    if !path.exists() {
        return Ok(None);
    }
    std::fs::read_to_string(path)
        .map(Some)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))
}

pub(crate) fn write_file_atomic(path: &Path, bytes: &[u8]) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create dir {}: {e}", parent.display()))?;
    }

    let file_name = path.file_name().and_then(|v| v.to_str()).unwrap_or("file");
    let tmp_path = path.with_file_name(format!("{file_name}.hub-tmp"));

    std::fs::write(&tmp_path, bytes)
        .map_err(|e| format!("failed to write temp file {}: {e}", tmp_path.display()))?;

    // Windows rename requires target not to exist.
    if path.exists() {
        let _ = std::fs::remove_file(path);
    }

    std::fs::rename(&tmp_path, path)
        .map_err(|e| format!("failed to finalize file {}: {e}", path.display()))?;

    Ok(())
}

/// Returns `Ok(false)` when the file already holds exactly `bytes`.
pub(crate) fn write_file_atomic_if_changed(path: &Path, bytes: &[u8]) -> Result<bool, String> {
    if let Ok(existing) = std::fs::read(path) {
        if existing == bytes {
            return Ok(false);
        }
    }
    write_file_atomic(path, bytes)?;
    Ok(true)
}


#[cfg(test)]
mod tests {
    use super::test_support::unique_tmp_dir;
    use super::*;

    #[test]
    fn read_optional_to_string_missing_is_none() {
        let dir = unique_tmp_dir("fs");
        let out = read_optional_to_string(&dir.join("missing.json")).expect("read");
        assert!(out.is_none());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn write_file_atomic_creates_parent_and_leaves_no_temp_file() {
        let dir = unique_tmp_dir("fs");
        let path = dir.join("translations").join("en.json");
        write_file_atomic(&path, br#"{"appName":"App"}"#).expect("write_file_atomic");

        let got = read_optional_to_string(&path)
            .expect("read")
            .expect("file exists");
        assert_eq!(got, r#"{"appName":"App"}"#);
        assert!(!path.with_file_name("en.json.hub-tmp").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn write_file_atomic_if_changed_skips_identical_content() {
        let dir = unique_tmp_dir("fs");
        let path = dir.join("zh.json");
        assert!(write_file_atomic_if_changed(&path, b"v1").expect("write"));
        assert!(!write_file_atomic_if_changed(&path, b"v1").expect("write"));
        assert!(write_file_atomic_if_changed(&path, b"v2").expect("write"));
        assert_eq!(std::fs::read(&path).expect("read"), b"v2");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn copy_dir_recursive_if_missing_keeps_existing_files() {
        let dir = unique_tmp_dir("fs");
        let src_dir = dir.join("src");
        let dst_dir = dir.join("dst");

        std::fs::create_dir_all(src_dir.join("extra")).expect("create src dir");
        std::fs::write(src_dir.join("en.json"), "src-en").expect("write");
        std::fs::write(src_dir.join("extra").join("zh.json"), "src-zh").expect("write");

        std::fs::create_dir_all(&dst_dir).expect("create dst dir");
        std::fs::write(dst_dir.join("en.json"), "dst-en").expect("write dst override");

        let copied = copy_dir_recursive_if_missing(&src_dir, &dst_dir).expect("copy dir");
        assert_eq!(copied, 1);
        assert_eq!(
            std::fs::read_to_string(dst_dir.join("en.json")).expect("read"),
            "dst-en"
        );
        assert_eq!(
            std::fs::read_to_string(dst_dir.join("extra").join("zh.json")).expect("read"),
            "src-zh"
        );

        let _ = std::fs::remove_dir_all(&dir);
    }
}
