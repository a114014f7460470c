use crate::{
    RomError,
    checksum::{add_carry, correction, sum_words},
    report::Report,
    rom::SizeClass,
};
use assert_into::AssertInto;
use log::{debug, info};
use std::io::{Read, Write};
use zerocopy::{
    IntoBytes,
    byteorder::{BigEndian, U32},
};

/// An in-memory ROM image: an ordered sequence of 32 bit words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomImage {
    words: Vec<u32>,
}

impl RomImage {
    /// Builds a complete image: the magic word, the payload streams in
    /// order, zero padding to capacity, then the length and checksum fields.
    pub fn build<R: Read>(
        inputs: impl IntoIterator<Item = R>,
        size: SizeClass,
    ) -> Result<RomImage, RomError> {
        let mut payload = Vec::new();
        for mut input in inputs {
            input
                .read_to_end(&mut payload)
                .map_err(RomError::FailedToRead)?;
        }

        let mut words = Vec::with_capacity(size.capacity());
        words.push(size.magic());

        let mut chunks = payload.chunks_exact(4);
        for chunk in &mut chunks {
            words.push(u32::from_be_bytes(
                chunk.try_into().expect("chunks_exact yields 4 byte groups"),
            ));
        }
        let trailing = chunks.remainder().len();
        if trailing != 0 {
            return Err(RomError::TruncatedInput { trailing });
        }

        if words.len() > SizeClass::Large.capacity() {
            return Err(RomError::CapacityExceededLarge);
        } else if words.len() > SizeClass::Small.capacity() && size == SizeClass::Small {
            return Err(RomError::CapacityExceededSmall);
        }

        debug!(
            "Payload is {} words, padding to {}",
            words.len(),
            size.capacity()
        );
        words.resize(size.capacity(), 0);

        words[size.length_field_index()] = size.byte_len().assert_into();

        // The correction field sits inside the zero padding, so the stored
        // value after this step equals the correction itself.
        let err = correction(sum_words(&words));
        if err != 0 {
            let index = size.checksum_field_index();
            words[index] = add_carry(words[index], err);
        }

        Ok(RomImage { words })
    }

    /// Parses the whole words of `bytes`. A trailing partial word is dropped
    /// here; `inspect` reports it, it is not a parse failure.
    pub fn parse(bytes: &[u8]) -> RomImage {
        let mut words = Vec::with_capacity(bytes.len() / 4);
        for chunk in bytes.chunks_exact(4) {
            words.push(u32::from_be_bytes(
                chunk.try_into().expect("chunks_exact yields 4 byte groups"),
            ));
        }
        RomImage { words }
    }

    pub fn words(&self) -> &[u32] {
        &self.words
    }

    pub fn byte_len(&self) -> usize {
        self.words.len() * 4
    }

    /// Applies the requested repairs against facts from a prior `inspect`
    /// of the same bytes. Returns whether the image changed; writing it
    /// back is the caller's responsibility.
    pub fn fix(&mut self, report: &Report, extend: bool, correct: bool) -> Result<bool, RomError> {
        let mut changed = false;

        if !report.dword_aligned && extend {
            // The reference tool extends with a single word holding the
            // byte shortfall, not with zero bytes. Kept for bit
            // compatibility with images fixed by it.
            self.words.push((4 - report.byte_len % 4).assert_into());
            changed = true;
        }

        if report.err != 0 && correct {
            if !report.dword_aligned && !extend {
                return Err(RomError::AlignmentRequired);
            }
            let index = self
                .words
                .len()
                .checked_sub(6)
                .ok_or(RomError::ImageTooShort)?;
            self.words[index] = add_carry(self.words[index], report.err);
            info!("Correction dword: {:#010x}", self.words[index]);
            changed = true;
        }

        Ok(changed)
    }

    /// Serializes the image as big-endian words.
    pub fn write_to(&self, mut output: impl Write) -> Result<(), RomError> {
        let words: Vec<U32<BigEndian>> = self.words.iter().map(|&w| U32::new(w)).collect();
        output
            .write_all(words.as_bytes())
            .map_err(RomError::FailedToWrite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::inspect;

    #[test]
    fn parse_drops_partial_tail() {
        let image = RomImage::parse(&[0xAA, 0xBB, 0xCC, 0xDD, 0x01, 0x02]);
        assert_eq!(image.words(), &[0xAABB_CCDD]);
        assert_eq!(image.byte_len(), 4);
    }

    #[test]
    fn write_emits_big_endian_words() {
        let image = RomImage::parse(&[0x11, 0x11, 0x4E, 0xF9]);
        let mut bytes = Vec::new();
        image.write_to(&mut bytes).unwrap();
        assert_eq!(bytes, [0x11, 0x11, 0x4E, 0xF9]);
    }

    #[test]
    fn extend_appends_shortfall_word() {
        let bytes = [0u8; 10];
        let report = inspect(&bytes);
        assert!(!report.dword_aligned);

        let mut image = RomImage::parse(&bytes);
        let changed = image.fix(&report, true, false).unwrap();
        assert!(changed);
        assert_eq!(image.words(), &[0, 0, 2]);
    }

    #[test]
    fn correct_without_extend_requires_alignment() {
        let bytes = [0u8; 10];
        let report = inspect(&bytes);

        let mut image = RomImage::parse(&bytes);
        let result = image.fix(&report, false, true);
        assert!(matches!(result, Err(RomError::AlignmentRequired)));
    }

    #[test]
    fn correct_adjusts_sixth_word_from_the_end() {
        let bytes = [0u8; 32];
        let report = inspect(&bytes);
        assert_eq!(report.err, 0xFFFF_FFFF);

        let mut image = RomImage::parse(&bytes);
        assert!(image.fix(&report, false, true).unwrap());
        assert_eq!(image.words()[2], 0xFFFF_FFFF);
        assert_eq!(sum_words(image.words()), 0xFFFF_FFFF);
    }

    #[test]
    fn correct_on_a_tiny_image_fails() {
        let bytes = [0u8; 8];
        let report = inspect(&bytes);

        let mut image = RomImage::parse(&bytes);
        let result = image.fix(&report, false, true);
        assert!(matches!(result, Err(RomError::ImageTooShort)));
    }
}
