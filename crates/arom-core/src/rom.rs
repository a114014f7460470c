use static_assertions::const_assert;

pub const SMALL_MAGIC: u32 = 0x1111_4EF9;
pub const LARGE_MAGIC: u32 = 0x1114_4EF9;

const SMALL_CAPACITY: usize = 1 << 16;
const LARGE_CAPACITY: usize = 1 << 17;

const_assert!(SMALL_CAPACITY * 4 == 256 * 1024);
const_assert!(LARGE_CAPACITY * 4 == 512 * 1024);

/// The two defined image sizes, distinguished by the upper half of word 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeClass {
    /// 256 KiB, magic id `0x1111`.
    Small,
    /// 512 KiB, magic id `0x1114`.
    Large,
}

impl SizeClass {
    /// Image size in words.
    pub fn capacity(self) -> usize {
        match self {
            SizeClass::Small => SMALL_CAPACITY,
            SizeClass::Large => LARGE_CAPACITY,
        }
    }

    /// Image size in bytes.
    pub fn byte_len(self) -> usize {
        self.capacity() * 4
    }

    /// Word 0 of an image of this class.
    pub fn magic(self) -> u32 {
        match self {
            SizeClass::Small => SMALL_MAGIC,
            SizeClass::Large => LARGE_MAGIC,
        }
    }

    /// Word index of the stored byte length.
    pub fn length_field_index(self) -> usize {
        self.capacity() - 5
    }

    /// Word index of the checksum correction dword.
    pub fn checksum_field_index(self) -> usize {
        self.capacity() - 6
    }

    /// Recognizes a size class from the upper 16 bits of word 0. Any other
    /// id is unrecognized, which the verifier surfaces as a warning.
    pub fn from_magic_id(id: u16) -> Option<SizeClass> {
        match id {
            0x1111 => Some(SizeClass::Small),
            0x1114 => Some(SizeClass::Large),
            _ => None,
        }
    }
}

pub fn dword_aligned(byte_len: usize) -> bool {
    byte_len % 4 == 0
}

pub fn kb_aligned(byte_len: usize) -> bool {
    byte_len % 1024 == 0
}

pub fn rom256k_aligned(byte_len: usize) -> bool {
    byte_len % (256 * 1024) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_layout() {
        assert_eq!(SizeClass::Small.capacity(), 65536);
        assert_eq!(SizeClass::Large.capacity(), 131072);
        assert_eq!(SizeClass::Small.byte_len(), 1 << 18);
        assert_eq!(SizeClass::Large.byte_len(), 1 << 19);
        assert_eq!(SizeClass::Small.length_field_index(), 65531);
        assert_eq!(SizeClass::Small.checksum_field_index(), 65530);
        assert_eq!(SizeClass::Small.magic(), 0x1111_4EF9);
        assert_eq!(SizeClass::Large.magic(), 0x1114_4EF9);
    }

    #[test]
    fn magic_id_recognition() {
        assert_eq!(SizeClass::from_magic_id(0x1111), Some(SizeClass::Small));
        assert_eq!(SizeClass::from_magic_id(0x1114), Some(SizeClass::Large));
        assert_eq!(SizeClass::from_magic_id(0x4EF9), None);
        assert_eq!(SizeClass::from_magic_id(0), None);
    }

    #[test]
    fn alignment_predicates() {
        assert!(dword_aligned(0) && dword_aligned(8));
        assert!(!dword_aligned(10));
        assert!(kb_aligned(2048) && !kb_aligned(2049));
        assert!(rom256k_aligned(1 << 18) && rom256k_aligned(1 << 19));
        assert!(!rom256k_aligned(1 << 17));
    }
}
