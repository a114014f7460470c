use std::io::Read;
use thiserror::Error;

pub mod checksum;
pub mod image;
pub mod report;
pub mod rom;

pub use checksum::{CHECKSUM_TARGET, sum_words};
pub use image::RomImage;
pub use report::{Report, inspect};
pub use rom::SizeClass;

#[derive(Error, Debug)]
pub enum RomError {
    #[error("Input is not whole 32 bit words ({trailing} trailing bytes)")]
    TruncatedInput { trailing: usize },
    #[error("ROM file will exceed 512 kb")]
    CapacityExceededLarge,
    #[error("ROM file will exceed 256 kb. Use --large to create 512 kb ROM")]
    CapacityExceededSmall,
    #[error("Cannot fix checksum, wrong file length")]
    AlignmentRequired,
    #[error("Image is too short to hold a checksum field")]
    ImageTooShort,
    #[error("Failed to read input")]
    FailedToRead(std::io::Error),
    #[error("Failed to write to output")]
    FailedToWrite(std::io::Error),
}

/// Builds a ROM image from input streams, ready for serialization.
pub fn build_image<R: Read>(
    inputs: impl IntoIterator<Item = R>,
    size: SizeClass,
) -> Result<RomImage, RomError> {
    RomImage::build(inputs, size)
}
