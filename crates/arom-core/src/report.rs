use crate::{
    checksum::{CHECKSUM_TARGET, correction, sum_words},
    image::RomImage,
    rom::{self, SizeClass},
};

/// Everything the verifier derives from an image on disk. Pure facts; the
/// CLI renders them, property tests assert against them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// On-disk length in bytes, including any partial trailing word.
    pub byte_len: usize,
    /// Upper 16 bits of word 0, absent for an empty image.
    pub magic_id: Option<u16>,
    /// Size class recognized from the magic id.
    pub size_class: Option<SizeClass>,
    pub dword_aligned: bool,
    pub kb_aligned: bool,
    pub rom256k_aligned: bool,
    /// Value of the stored length field, absent when the image is too
    /// short to hold one.
    pub stored_len: Option<u32>,
    /// End-around-carry sum over the whole words present.
    pub sum: u32,
    /// Correction needed to reach a valid sum; zero for a valid image.
    pub err: u32,
}

impl Report {
    pub fn checksum_ok(&self) -> bool {
        self.sum == CHECKSUM_TARGET
    }

    /// Whether the byte length matches what the magic id implies, when the
    /// id is recognized.
    pub fn len_matches_magic(&self) -> Option<bool> {
        self.size_class
            .map(|class| self.byte_len == class.byte_len())
    }

    /// Whether the stored length field agrees with the on-disk length.
    pub fn stored_len_ok(&self) -> bool {
        self.stored_len
            .is_some_and(|len| len as usize == self.byte_len)
    }
}

/// Derives a report from raw image bytes. Misalignment and field mismatches
/// are reportable conditions, never parse failures.
pub fn inspect(bytes: &[u8]) -> Report {
    let image = RomImage::parse(bytes);
    let words = image.words();
    let byte_len = bytes.len();

    let magic_id = words.first().map(|&word| (word >> 16) as u16);
    let size_class = magic_id.and_then(SizeClass::from_magic_id);

    let stored_len = (byte_len / 4)
        .checked_sub(5)
        .and_then(|index| words.get(index))
        .copied();

    let sum = sum_words(words);

    Report {
        byte_len,
        magic_id,
        size_class,
        dword_aligned: rom::dword_aligned(byte_len),
        kb_aligned: rom::kb_aligned(byte_len),
        rom256k_aligned: rom::rom256k_aligned(byte_len),
        stored_len,
        sum,
        err: correction(sum),
    }
}
