use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tempfile::NamedTempFile;

/// A serialized table written to a temporary file beside its target, not yet
/// moved into place.
#[derive(Debug)]
pub struct StagedTable {
    target: PathBuf,
    file: NamedTempFile,
}

impl StagedTable {
    pub fn target(&self) -> &Path {
        &self.target
    }
}

/// Render `table` as pretty-printed JSON with a trailing newline.
pub fn render_table<T: Serialize>(table: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(table)?;
    json.push('\n');
    Ok(json)
}

/// Serialize `table` into a temporary file in the directory of `path`,
/// creating that directory as needed.
pub fn stage_table<T: Serialize>(path: &Path, table: &T) -> Result<StagedTable> {
    let json = render_table(table)
        .with_context(|| format!("failed to serialize {}", path.display()))?;

    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
            parent
        }
        None => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
    file.write_all(json.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .with_context(|| format!("failed to set permissions for {}", path.display()))?;
    }

    Ok(StagedTable {
        target: path.to_path_buf(),
        file,
    })
}

/// Move every staged table into place.
///
/// All targets are checked before the first rename, so a target that cannot
/// be replaced leaves every output untouched.
pub fn commit(staged: Vec<StagedTable>) -> Result<()> {
    for table in &staged {
        if table.target.is_dir() {
            bail!("failed to write {}: is a directory", table.target.display());
        }
    }
    for table in staged {
        let StagedTable { target, file } = table;
        file.persist(&target)
            .map_err(|e| e.error)
            .with_context(|| format!("failed to write {}", target.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::descriptor::TypeDescriptor;

    fn write_table<T: Serialize>(path: &Path, table: &T) -> Result<()> {
        commit(vec![stage_table(path, table)?])
    }

    #[test]
    fn pretty_json_with_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/out.json");
        let mut table = BTreeMap::new();
        table.insert("b".to_string(), TypeDescriptor::Number);
        table.insert("a".to_string(), TypeDescriptor::empty_object(true));
        write_table(&path, &table).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let expected = r#"{
  "a": {
    "kind": "object",
    "strict": true
  },
  "b": {
    "kind": "number"
  }
}
"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        fs::write(&path, "stale").unwrap();
        write_table(&path, &BTreeMap::<String, TypeDescriptor>::new()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");
    }

    #[test]
    fn directory_target_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_table(dir.path(), &Vec::<u8>::new()).unwrap_err();
        assert!(err.to_string().starts_with("failed to write"), "{err}");
    }

    #[test]
    fn staging_leaves_target_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let staged = stage_table(&path, &vec![1, 2]).unwrap();
        assert_eq!(staged.target(), path);
        assert!(!path.exists());
        commit(vec![staged]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[\n  1,\n  2\n]\n");
    }

    #[test]
    fn failed_commit_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.json");
        let blocked = dir.path().join("blocked");
        fs::create_dir(&blocked).unwrap();

        let staged = vec![
            stage_table(&first, &vec![1]).unwrap(),
            stage_table(&blocked, &vec![2]).unwrap(),
        ];
        assert!(commit(staged).is_err());
        assert!(!first.exists());
        // Dropped temporaries are removed.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn output_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_table(&path, &Vec::<u8>::new()).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }
}
