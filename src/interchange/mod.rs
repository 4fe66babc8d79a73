//! External interchange: contact-directory XML and file output

pub mod xml;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub use xml::{
    derive_callsign, export_contact_directory, export_filename, parse_contact_directory,
    ContactImport,
};

/// Narrow seam for "download this file" side effects, so the codec and
/// its callers stay independent of the runtime environment.
pub trait FileSink {
    /// Write `contents` under `name`, returning the final path
    fn write_file(&mut self, name: &str, contents: &str) -> io::Result<PathBuf>;
}

/// Writes files into a target directory, creating it on demand.
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FileSink for DirSink {
    fn write_file(&mut self, name: &str, contents: &str) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }
}

/// Collects files in memory; the test stand-in for `DirSink`.
#[derive(Default)]
pub struct MemorySink {
    pub files: Vec<(String, String)>,
}

impl FileSink for MemorySink {
    fn write_file(&mut self, name: &str, contents: &str) -> io::Result<PathBuf> {
        self.files.push((name.to_string(), contents.to_string()));
        Ok(Path::new(name).to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_dir_sink_creates_directory_and_file() {
        let tmp = tempdir().unwrap();
        let target = tmp.path().join("exports");
        let mut sink = DirSink::new(&target);

        let path = sink.write_file("out.xml", "<x/>").unwrap();
        assert_eq!(path, target.join("out.xml"));
        assert_eq!(fs::read_to_string(path).unwrap(), "<x/>");
    }

    #[test]
    fn test_memory_sink_collects() {
        let mut sink = MemorySink::default();
        sink.write_file("a.xml", "one").unwrap();
        sink.write_file("b.xml", "two").unwrap();
        assert_eq!(sink.files.len(), 2);
        assert_eq!(sink.files[1], ("b.xml".to_string(), "two".to_string()));
    }
}
