use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use prompt_bom_core::assemble::ContentSource;

/// Component bodies stored as `<dir>/<id><extension>`.
#[derive(Debug, Clone)]
pub struct DirContentSource {
    dir: PathBuf,
    extension: String,
}

impl DirContentSource {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    pub fn path_for(&self, id: &str) -> io::Result<PathBuf> {
        if id.contains(['/', '\\']) || !is_plain_name(id) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("component id `{id}` is not a plain file name"),
            ));
        }
        Ok(self.dir.join(format!("{id}{}", self.extension)))
    }
}

/// A single normal path component: no separators, `.` or `..`.
fn is_plain_name(id: &str) -> bool {
    let mut parts = Path::new(id).components();
    matches!((parts.next(), parts.next()), (Some(Component::Normal(_)), None))
}

impl ContentSource for DirContentSource {
    fn resolve(&self, id: &str) -> io::Result<Vec<u8>> {
        let path = self.path_for(id)?;
        fs::read(&path).map_err(|e| io::Error::new(e.kind(), format!("{}: {e}", path.display())))
    }
}
