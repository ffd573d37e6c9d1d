//! Persists rendered pages. All output lands flat in one directory, which
//! is created on first use with standard permissions.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Writes `contents` to `{directory}/{file_name}`, creating `directory`
/// (and any missing parents) first.
pub fn write_file(directory: &Path, file_name: &str, contents: &[u8]) -> Result<()> {
    fs::create_dir_all(directory).map_err(|err| Error::CreateDirectory {
        path: directory.to_owned(),
        err,
    })?;
    let path = directory.join(file_name);
    fs::write(&path, contents).map_err(|err| Error::WriteFile { path, err })
}

/// The result of a fallible write operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error persisting an output file.
#[derive(Debug)]
pub enum Error {
    /// Returned for I/O problems creating the output directory.
    CreateDirectory { path: PathBuf, err: io::Error },

    /// Returned for I/O problems writing an output file.
    WriteFile { path: PathBuf, err: io::Error },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::CreateDirectory { path, err } => {
                write!(f, "Creating directory '{}': {}", path.display(), err)
            }
            Error::WriteFile { path, err } => {
                write!(f, "Writing file '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::CreateDirectory { path: _, err } => Some(err),
            Error::WriteFile { path: _, err } => Some(err),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_write_file_creates_directory() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("output");
        write_file(&out, "page.html", b"<html></html>")?;
        assert_eq!(fs::read(out.join("page.html")).unwrap(), b"<html></html>");
        Ok(())
    }

    #[test]
    fn test_write_file_overwrites() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "page.html", b"old")?;
        write_file(dir.path(), "page.html", b"new")?;
        assert_eq!(fs::read(dir.path().join("page.html")).unwrap(), b"new");
        Ok(())
    }
}
