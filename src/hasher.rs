use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::HashError;

/// Default read size when streaming a file into the digest (64KB)
pub const DEFAULT_BLOCK_SIZE: usize = 64 * 1024;

/// Digest of a file's full contents
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.to_hex())
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Digest used to fingerprint file contents.
///
/// Fingerprints are only comparable between runs that used the same algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// SHA-256
    #[default]
    Sha256,
    /// BLAKE3
    Blake3,
}

enum Digester {
    Sha256(Sha256),
    Blake3(Box<blake3::Hasher>),
}

impl Digester {
    fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Sha256 => Self::Sha256(Sha256::new()),
            HashAlgorithm::Blake3 => Self::Blake3(Box::new(blake3::Hasher::new())),
        }
    }

    fn update(&mut self, block: &[u8]) {
        match self {
            Self::Sha256(hasher) => hasher.update(block),
            Self::Blake3(hasher) => {
                hasher.update(block);
            }
        }
    }

    fn finalize(self) -> Fingerprint {
        match self {
            Self::Sha256(hasher) => Fingerprint(hasher.finalize().into()),
            Self::Blake3(hasher) => Fingerprint(*hasher.finalize().as_bytes()),
        }
    }
}

/// Fill `buf` as far as possible, stopping early only at end of file.
fn read_block<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Compute the fingerprint of a file's entire contents.
///
/// The file is read in `block_size` chunks, so memory use does not grow with
/// file size. The block size does not affect the result.
pub fn hash_file(
    path: &Path,
    block_size: usize,
    algorithm: HashAlgorithm,
) -> Result<Fingerprint, HashError> {
    let io_err = |source: io::Error| HashError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => HashError::NotFound {
            path: path.to_path_buf(),
        },
        _ => io_err(e),
    })?;

    let mut buffer = vec![0u8; block_size.max(1)];
    let mut digester = Digester::new(algorithm);

    loop {
        let bytes_read = read_block(&mut file, &mut buffer).map_err(io_err)?;
        if bytes_read == 0 {
            break;
        }
        digester.update(&buffer[..bytes_read]);
    }

    Ok(digester.finalize())
}

/// Byte-for-byte comparison of two files, streamed in `block_size` chunks.
pub fn contents_equal(a: &Path, b: &Path, block_size: usize) -> io::Result<bool> {
    let mut file_a = File::open(a)?;
    let mut file_b = File::open(b)?;

    if file_a.metadata()?.len() != file_b.metadata()?.len() {
        return Ok(false);
    }

    let block_size = block_size.max(1);
    let mut buf_a = vec![0u8; block_size];
    let mut buf_b = vec![0u8; block_size];

    loop {
        let n_a = read_block(&mut file_a, &mut buf_a)?;
        let n_b = read_block(&mut file_b, &mut buf_b)?;
        if n_a != n_b || buf_a[..n_a] != buf_b[..n_b] {
            return Ok(false);
        }
        if n_a == 0 {
            return Ok(true);
        }
    }
}
