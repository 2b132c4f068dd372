use crate::backend::{KvBackend, PrefsError};
use crate::keys::PolicyValue;
use log::{debug, warn};
use parking_lot::Mutex;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use toml::{Table, Value};

/// TOML file written by the configuration surface and read by the patched process.
///
/// The file is left world readable so a process running under another uid can open it.
/// A missing file is an empty store, not an error.
pub struct FileBackend {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileBackend {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PrefsError {
        PrefsError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn load(&self) -> Result<Table, PrefsError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Table::new()),
            Err(err) => return Err(self.io_error(err)),
        };

        toml::from_str(&content).map_err(|source| PrefsError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    fn store(&self, table: &Table) -> Result<(), PrefsError> {
        let content = toml::to_string(table)?;

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;

        // unique per writer, deleted on drop unless persisted
        let mut temp = NamedTempFile::new_in(parent).map_err(|err| self.io_error(err))?;
        temp.write_all(content.as_bytes()).map_err(|err| self.io_error(err))?;
        make_world_readable(temp.as_file()).map_err(|err| self.io_error(err))?;
        temp.persist(&self.path).map_err(|err| self.io_error(err.error))?;

        debug!("wrote {} entries to {}", table.len(), self.path.display());

        Ok(())
    }
}

#[cfg(unix)]
fn make_world_readable(file: &fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn make_world_readable(_file: &fs::File) -> std::io::Result<()> {
    Ok(())
}

fn decode(key: &str, value: &Value) -> Option<PolicyValue> {
    match value {
        Value::Boolean(value) => Some(PolicyValue::Bool(*value)),
        Value::Integer(value) => match i32::try_from(*value) {
            Ok(value) => Some(PolicyValue::Int(value)),
            Err(_) => {
                warn!("value of `{key}` does not fit in 32 bits: {value}");
                None
            }
        },
        other => {
            warn!("unsupported value type for `{key}`: {}", other.type_str());
            None
        }
    }
}

fn encode(value: PolicyValue) -> Value {
    match value {
        PolicyValue::Bool(value) => Value::Boolean(value),
        PolicyValue::Int(value) => Value::Integer(value as i64),
    }
}

impl KvBackend for FileBackend {
    fn name(&self) -> &'static str {
        "file"
    }

    fn get(&self, key: &str) -> Result<Option<PolicyValue>, PrefsError> {
        let table = self.load()?;
        Ok(table.get(key).and_then(|value| decode(key, value)))
    }

    fn put(&self, key: &str, value: PolicyValue) -> Result<(), PrefsError> {
        let _guard = self.write_lock.lock();

        let mut table = self.load()?;
        table.insert(key.into(), encode(value));
        self.store(&table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("absent.toml"));

        assert_eq!(backend.get("enabled").unwrap(), None);
    }

    #[test]
    fn put_then_get() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("nested/prefs.toml"));

        backend.put("enabled", PolicyValue::Bool(true)).unwrap();
        backend.put("resolution", PolicyValue::Int(3)).unwrap();

        assert_eq!(backend.get("enabled").unwrap(), Some(PolicyValue::Bool(true)));
        assert_eq!(backend.get("resolution").unwrap(), Some(PolicyValue::Int(3)));
        assert_eq!(backend.get("aspect_ratio").unwrap(), None);
    }

    #[test]
    fn concurrent_writers_leave_no_scratch_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.toml");

        std::thread::scope(|scope| {
            for n in 0..4 {
                let path = &path;
                scope.spawn(move || {
                    // separate backends, so the in-process lock does not serialise them
                    let backend = FileBackend::new(path);
                    for value in 0..8 {
                        backend.put("resolution", PolicyValue::Int(n * 8 + value)).unwrap();
                    }
                });
            }
        });

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert!(matches!(
            FileBackend::new(&path).get("resolution").unwrap(),
            Some(PolicyValue::Int(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn written_file_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        FileBackend::new(&path)
            .put("enabled", PolicyValue::Bool(true))
            .unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn sees_external_edits() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        let backend = FileBackend::new(&path);

        fs::write(&path, "enabled = false\n").unwrap();
        assert_eq!(backend.get("enabled").unwrap(), Some(PolicyValue::Bool(false)));

        fs::write(&path, "enabled = true\n").unwrap();
        assert_eq!(backend.get("enabled").unwrap(), Some(PolicyValue::Bool(true)));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        fs::write(&path, "enabled = [").unwrap();

        let backend = FileBackend::new(&path);
        assert!(matches!(
            backend.get("enabled"),
            Err(PrefsError::Malformed { .. })
        ));
    }

    #[test]
    fn unsupported_values_read_as_unset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        fs::write(&path, "resolution = \"two\"\naspect_ratio = 99999999999\n").unwrap();

        let backend = FileBackend::new(&path);
        assert_eq!(backend.get("resolution").unwrap(), None);
        assert_eq!(backend.get("aspect_ratio").unwrap(), None);
    }
}
