//! Stable display color tags for subjects

use serde::{Deserialize, Serialize};

/// One of the eight fixed display colors.
///
/// The palette is deliberately small; distinct subjects may share a tag and
/// that is acceptable. What matters is stability: the same subject name always
/// maps to the same tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorTag {
    Blue,
    Green,
    Purple,
    Orange,
    Pink,
    Indigo,
    Yellow,
    Red,
}

/// The fixed palette, in hash-index order.
pub const PALETTE: [ColorTag; 8] = [
    ColorTag::Blue,
    ColorTag::Green,
    ColorTag::Purple,
    ColorTag::Orange,
    ColorTag::Pink,
    ColorTag::Indigo,
    ColorTag::Yellow,
    ColorTag::Red,
];

impl ColorTag {
    /// Derive the stable tag for a subject name.
    ///
    /// Uses the classic `hash = code + (hash << 5) - hash` rolling hash over
    /// UTF-16 code units with 32-bit wrapping, then the absolute value modulo
    /// the palette size. Hashing code units rather than chars keeps the
    /// mapping stable for non-ASCII subject names across host runtimes that
    /// index strings the same way.
    pub fn for_subject(subject: &str) -> ColorTag {
        let mut hash: i32 = 0;
        for unit in subject.encode_utf16() {
            hash = (unit as i32).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash));
        }
        PALETTE[hash.unsigned_abs() as usize % PALETTE.len()]
    }
}

/// Derive the stable display tag for a subject name.
///
/// Free-function form of [`ColorTag::for_subject`].
pub fn subject_color_tag(subject: &str) -> ColorTag {
    ColorTag::for_subject(subject)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn same_subject_same_tag() {
        assert_eq!(subject_color_tag("Mathematics"), subject_color_tag("Mathematics"));
        assert_eq!(subject_color_tag(""), subject_color_tag(""));
    }

    #[test]
    fn empty_subject_maps_to_first_palette_slot() {
        assert_eq!(subject_color_tag(""), ColorTag::Blue);
    }

    #[test]
    fn non_ascii_subjects_hash_over_utf16_units() {
        // CJK subject names must produce a stable tag, not panic or vary.
        let tag = subject_color_tag("數學");
        assert_eq!(subject_color_tag("數學"), tag);
    }

    proptest! {
        #[test]
        fn tag_is_deterministic_and_in_palette(subject in ".*") {
            let first = subject_color_tag(&subject);
            let second = subject_color_tag(&subject);
            prop_assert_eq!(first, second);
            prop_assert!(PALETTE.contains(&first));
        }
    }
}
