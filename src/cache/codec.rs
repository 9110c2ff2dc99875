//! Payload Codec Module
//!
//! Optional transparent compression of cached bodies.

use std::io::{self, Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

// == Codec ==
/// How payloads are stored in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Codec {
    /// Store bytes as given
    #[default]
    Identity,
    /// Store bytes gzip-compressed
    Gzip,
}

impl Codec {
    /// Picks gzip when `compress` is set, identity otherwise.
    pub fn from_flag(compress: bool) -> Self {
        if compress {
            Codec::Gzip
        } else {
            Codec::Identity
        }
    }

    /// Encodes a payload for storage.
    pub fn encode(self, data: &[u8]) -> io::Result<Vec<u8>> {
        match self {
            Codec::Identity => Ok(data.to_vec()),
            Codec::Gzip => {
                let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(data)?;
                encoder.finish()
            }
        }
    }

    /// Decodes a stored payload back into the original bytes.
    pub fn decode(self, data: &[u8]) -> io::Result<Vec<u8>> {
        match self {
            Codec::Identity => Ok(data.to_vec()),
            Codec::Gzip => {
                let mut decoder = GzDecoder::new(data);
                let mut out = Vec::new();
                decoder.read_to_end(&mut out)?;
                Ok(out)
            }
        }
    }
}
