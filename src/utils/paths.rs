use crate::error::ValidationError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default cscope database file name
pub const DEFAULT_DATABASE: &str = "cscope.out";

/// Turn user input into an absolute path.
///
/// A leading `~` (optionally followed by `/`) is replaced by the home
/// directory, so `~proj` and `~/proj` both name `<home>/proj`. Anything
/// else must already be absolute.
pub fn expand_home<F>(candidate: &str, home: F) -> Result<PathBuf, ValidationError>
where
    F: FnOnce() -> Option<PathBuf>,
{
    if let Some(rest) = candidate.strip_prefix('~') {
        let home = home().ok_or(ValidationError::HomeUnavailable)?;
        let rest = rest.strip_prefix('/').unwrap_or(rest);
        return Ok(if rest.is_empty() {
            home
        } else {
            home.join(rest)
        });
    }

    let path = PathBuf::from(candidate);
    if path.is_absolute() {
        Ok(path)
    } else {
        Err(ValidationError::NotAbsolute(candidate.to_string()))
    }
}

/// Check that `candidate` names a directory holding a cscope database and
/// return its absolute path.
pub fn validate_index_directory(
    candidate: &str,
    database_file: &str,
) -> Result<PathBuf, ValidationError> {
    validate_index_directory_with(candidate, database_file, dirs::home_dir)
}

/// [`validate_index_directory`] with an explicit home lookup
pub fn validate_index_directory_with<F>(
    candidate: &str,
    database_file: &str,
    home: F,
) -> Result<PathBuf, ValidationError>
where
    F: FnOnce() -> Option<PathBuf>,
{
    let dir = expand_home(candidate, home)?;

    let meta = stat(&dir, ValidationError::NotFound)?;
    if !meta.is_dir() {
        return Err(ValidationError::NotADirectory(dir));
    }

    let database = dir.join(database_file);
    let meta = stat(&database, |_| ValidationError::DatabaseMissing(dir.clone()))?;
    if !meta.is_file() {
        return Err(ValidationError::DatabaseNotRegularFile(database));
    }

    Ok(dir)
}

fn stat<F>(path: &Path, missing: F) -> Result<fs::Metadata, ValidationError>
where
    F: FnOnce(PathBuf) -> ValidationError,
{
    fs::metadata(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            missing(path.to_path_buf())
        } else {
            ValidationError::Inaccessible {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn index_fixture() -> TempDir {
        let home = TempDir::new().unwrap();
        let proj = home.path().join("proj");
        fs::create_dir(&proj).unwrap();
        fs::write(proj.join(DEFAULT_DATABASE), b"cscope 15 $HOME/proj -c 0000000000\n").unwrap();
        home
    }

    #[test]
    fn test_expand_tilde_forms() {
        let home = || Some(PathBuf::from("/home/u"));

        assert_eq!(expand_home("~/proj", home).unwrap(), PathBuf::from("/home/u/proj"));
        assert_eq!(expand_home("~proj", home).unwrap(), PathBuf::from("/home/u/proj"));
        assert_eq!(expand_home("~", home).unwrap(), PathBuf::from("/home/u"));
        assert_eq!(expand_home("/abs/dir", home).unwrap(), PathBuf::from("/abs/dir"));
    }

    #[test]
    fn test_tilde_uses_user_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };

        assert_eq!(expand_home("~/proj", dirs::home_dir).unwrap(), home.join("proj"));
        assert_eq!(expand_home("~", dirs::home_dir).unwrap(), home);
    }

    #[test]
    fn test_relative_rejected() {
        let err = expand_home("relative/path", || Some(PathBuf::from("/home/u"))).unwrap_err();
        assert!(matches!(err, ValidationError::NotAbsolute(ref s) if s == "relative/path"));
        assert_eq!(err.to_string(), "Please provide absolute path.");
    }

    #[test]
    fn test_missing_home() {
        let err = expand_home("~/proj", || None).unwrap_err();
        assert!(matches!(err, ValidationError::HomeUnavailable));
    }

    #[test]
    fn test_valid_directory_under_home() {
        let home = index_fixture();
        let home_path = home.path().to_path_buf();

        let dir = validate_index_directory_with("~/proj", DEFAULT_DATABASE, || Some(home_path))
            .unwrap();

        assert_eq!(dir, home.path().join("proj"));
    }

    #[test]
    fn test_database_missing() {
        let home = index_fixture();
        fs::remove_file(home.path().join("proj").join(DEFAULT_DATABASE)).unwrap();
        let home_path = home.path().to_path_buf();

        let err = validate_index_directory_with("~/proj", DEFAULT_DATABASE, || Some(home_path))
            .unwrap_err();

        assert!(matches!(err, ValidationError::DatabaseMissing(_)));
        assert!(err.to_string().starts_with("No cscope database found at: "));
    }

    #[test]
    fn test_database_not_regular_file() {
        let home = index_fixture();
        let proj = home.path().join("proj");
        fs::remove_file(proj.join(DEFAULT_DATABASE)).unwrap();
        fs::create_dir(proj.join(DEFAULT_DATABASE)).unwrap();

        let err = validate_index_directory(proj.to_str().unwrap(), DEFAULT_DATABASE).unwrap_err();

        assert!(matches!(err, ValidationError::DatabaseNotRegularFile(_)));
    }

    #[test]
    fn test_directory_not_found() {
        let home = TempDir::new().unwrap();
        let missing = home.path().join("nope");

        let err = validate_index_directory(missing.to_str().unwrap(), DEFAULT_DATABASE).unwrap_err();

        assert!(matches!(err, ValidationError::NotFound(_)));
        assert_eq!(err.to_string(), "Symbol directory doesn't exist");
    }

    #[test]
    fn test_not_a_directory() {
        let home = TempDir::new().unwrap();
        let file = home.path().join("plain");
        fs::write(&file, b"x").unwrap();

        let err = validate_index_directory(file.to_str().unwrap(), DEFAULT_DATABASE).unwrap_err();

        assert!(matches!(err, ValidationError::NotADirectory(_)));
    }

    #[test]
    fn test_custom_database_name() {
        let home = TempDir::new().unwrap();
        fs::write(home.path().join("tags.out"), b"").unwrap();
        let dir = home.path().to_str().unwrap();

        assert!(validate_index_directory(dir, "tags.out").is_ok());
        assert!(validate_index_directory(dir, DEFAULT_DATABASE).is_err());
    }
}
