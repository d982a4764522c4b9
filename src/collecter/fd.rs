use std::{
    fs::File,
    io::{Stdout, Write},
};

use flate2::{write::GzEncoder, Compression};

/// Output sink
pub enum FileDescriptor {
    Stdout(Stdout),
    Plain(File),
    Gzip(GzEncoder<File>),
}

impl FileDescriptor {
    pub fn new(gzip: bool, filename: &str) -> Self {
        let fd = File::create(filename)
            .unwrap_or_else(|e| panic!("Failed to create {}: {}", filename, e));

        if gzip {
            Self::Gzip(GzEncoder::new(fd, Compression::new(5)))
        } else {
            Self::Plain(fd)
        }
    }

    pub fn stdout() -> Self {
        Self::Stdout(std::io::stdout())
    }

    /// Terminates the stream. Writes the gzip trailer when compressing.
    pub fn finish(self) -> std::io::Result<()> {
        match self {
            Self::Stdout(mut fd) => fd.flush(),
            Self::Plain(mut fd) => fd.flush(),
            Self::Gzip(fd) => fd.finish().map(|_| ()),
        }
    }
}

impl Write for FileDescriptor {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Self::Stdout(fd) => fd.write(buf),
            Self::Plain(fd) => fd.write(buf),
            Self::Gzip(fd) => fd.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(fd) => fd.flush(),
            Self::Plain(fd) => fd.flush(),
            Self::Gzip(fd) => fd.flush(),
        }
    }
}
