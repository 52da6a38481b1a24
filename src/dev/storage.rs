use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Component, Path, PathBuf};

/// Open mode, combined with `|`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpenFlags(u8);

impl OpenFlags {
    pub const READ: OpenFlags = OpenFlags(1);
    pub const WRITE: OpenFlags = OpenFlags(2);
    pub const CREATE: OpenFlags = OpenFlags(4);
    pub const TRUNCATE: OpenFlags = OpenFlags(8);

    pub fn contains(&self, other: OpenFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for OpenFlags {
    type Output = OpenFlags;
    fn bitor(self, rhs: OpenFlags) -> OpenFlags {
        OpenFlags(self.0 | rhs.0)
    }
}

/// ## Persistent file store
///
/// One file is open at a time, the way a small flash filesystem is
/// driven. Paths are taken relative to the store's root with or without
/// a leading `/`.
pub trait Storage {
    /// Formats the store when it cannot be mounted, then mounts again.
    fn mount(&mut self) -> io::Result<()>;
    fn open(&mut self, path: &str, flags: OpenFlags) -> io::Result<()>;
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;
    fn close(&mut self) -> io::Result<()>;
    fn stat(&mut self, path: &str) -> io::Result<u64>;
    fn remove(&mut self, path: &str) -> io::Result<()>;
    fn list(&mut self, path: &str) -> io::Result<Vec<String>>;
}

/// Reads a whole file.
pub fn read_file<S: Storage + ?Sized>(storage: &mut S, path: &str) -> io::Result<Vec<u8>> {
    let size = storage.stat(path)? as usize;
    storage.open(path, OpenFlags::READ)?;
    let mut buf = vec![0; size];
    let mut len = 0;
    while len < size {
        match storage.read(&mut buf[len..]) {
            Ok(0) => break,
            Ok(n) => len += n,
            Err(e) => {
                storage.close()?;
                return Err(e);
            }
        }
    }
    buf.truncate(len);
    storage.close()?;
    Ok(buf)
}

fn not_open() -> io::Error {
    io::Error::new(io::ErrorKind::Other, "no file open")
}

fn clean(path: &str) -> String {
    path.trim_matches('/').to_string()
}

/// Store held in memory, for tests and for running without a disk.
#[derive(Debug, Default)]
pub struct MemStorage {
    files: BTreeMap<String, Vec<u8>>,
    open: Option<(String, usize)>,
    mounted: bool,
    broken: bool,
    formats: usize,
}

impl MemStorage {
    pub fn new() -> MemStorage {
        MemStorage::default()
    }

    /// A store whose first mount fails, as an unformatted one would.
    pub fn unformatted() -> MemStorage {
        MemStorage {
            broken: true,
            ..MemStorage::default()
        }
    }

    pub fn with_file(mut self, path: &str, contents: &[u8]) -> MemStorage {
        self.files.insert(clean(path), contents.to_vec());
        self
    }

    pub fn file(&self, path: &str) -> Option<&[u8]> {
        self.files.get(&clean(path)).map(|v| v.as_slice())
    }

    pub fn formats(&self) -> usize {
        self.formats
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }
}

impl Storage for MemStorage {
    fn mount(&mut self) -> io::Result<()> {
        if self.broken {
            log::warn!("mount failed, formatting");
            self.files.clear();
            self.broken = false;
            self.formats += 1;
        }
        self.open = None;
        self.mounted = true;
        Ok(())
    }

    fn open(&mut self, path: &str, flags: OpenFlags) -> io::Result<()> {
        let path = clean(path);
        if !self.files.contains_key(&path) {
            if !flags.contains(OpenFlags::CREATE) {
                return Err(io::Error::new(io::ErrorKind::NotFound, path));
            }
            self.files.insert(path.clone(), vec![]);
        }
        if flags.contains(OpenFlags::TRUNCATE) {
            if let Some(f) = self.files.get_mut(&path) {
                f.clear();
            }
        }
        self.open = Some((path, 0));
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let (path, cursor) = self.open.as_mut().ok_or_else(not_open)?;
        let data = self.files.get(path.as_str()).ok_or_else(not_open)?;
        let n = std::cmp::min(buf.len(), data.len().saturating_sub(*cursor));
        buf[..n].copy_from_slice(&data[*cursor..*cursor + n]);
        *cursor += n;
        Ok(n)
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let (path, cursor) = self.open.as_mut().ok_or_else(not_open)?;
        let data = self.files.get_mut(path.as_str()).ok_or_else(not_open)?;
        data.truncate(*cursor);
        data.extend_from_slice(buf);
        *cursor += buf.len();
        Ok(buf.len())
    }

    fn close(&mut self) -> io::Result<()> {
        self.open.take().map(|_| ()).ok_or_else(not_open)
    }

    fn stat(&mut self, path: &str) -> io::Result<u64> {
        let path = clean(path);
        match self.files.get(&path) {
            Some(f) => Ok(f.len() as u64),
            None => Err(io::Error::new(io::ErrorKind::NotFound, path)),
        }
    }

    fn remove(&mut self, path: &str) -> io::Result<()> {
        let path = clean(path);
        match self.files.remove(&path) {
            Some(_) => Ok(()),
            None => Err(io::Error::new(io::ErrorKind::NotFound, path)),
        }
    }

    fn list(&mut self, path: &str) -> io::Result<Vec<String>> {
        let dir = clean(path);
        let prefix = if dir.is_empty() {
            String::new()
        } else {
            format!("{}/", dir)
        };
        let mut names: Vec<String> = self
            .files
            .keys()
            .filter_map(|k| k.strip_prefix(prefix.as_str()))
            .map(|rest| rest.split('/').next().unwrap_or(rest).to_string())
            .collect();
        names.dedup();
        Ok(names)
    }
}

/// Store backed by a host directory.
#[derive(Debug)]
pub struct DirStorage {
    root: PathBuf,
    open: Option<File>,
}

impl DirStorage {
    pub fn new<P: Into<PathBuf>>(root: P) -> DirStorage {
        DirStorage {
            root: root.into(),
            open: None,
        }
    }

    fn resolve(&self, path: &str) -> io::Result<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("path escapes storage: {}", path),
            ));
        }
        Ok(self.root.join(relative))
    }

    fn file(&mut self) -> io::Result<&mut File> {
        self.open.as_mut().ok_or_else(not_open)
    }
}

impl Storage for DirStorage {
    fn mount(&mut self) -> io::Result<()> {
        if !self.root.is_dir() {
            log::warn!("{} not found, formatting", self.root.display());
            std::fs::create_dir_all(&self.root)?;
        }
        self.open = None;
        Ok(())
    }

    fn open(&mut self, path: &str, flags: OpenFlags) -> io::Result<()> {
        let full = self.resolve(path)?;
        let file = OpenOptions::new()
            .read(flags.contains(OpenFlags::READ))
            .write(flags.contains(OpenFlags::WRITE))
            .create(flags.contains(OpenFlags::CREATE))
            .truncate(flags.contains(OpenFlags::TRUNCATE))
            .open(full)?;
        self.open = Some(file);
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file()?.read(buf)
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let file = self.file()?;
        file.write_all(buf)?;
        Ok(buf.len())
    }

    fn close(&mut self) -> io::Result<()> {
        let mut file = self.open.take().ok_or_else(not_open)?;
        file.flush()
    }

    fn stat(&mut self, path: &str) -> io::Result<u64> {
        Ok(std::fs::metadata(self.resolve(path)?)?.len())
    }

    fn remove(&mut self, path: &str) -> io::Result<()> {
        std::fs::remove_file(self.resolve(path)?)
    }

    fn list(&mut self, path: &str) -> io::Result<Vec<String>> {
        let mut names = vec![];
        for entry in std::fs::read_dir(self.resolve(path)?)? {
            names.push(entry?.file_name().to_string_lossy().to_string());
        }
        names.sort();
        Ok(names)
    }
}
