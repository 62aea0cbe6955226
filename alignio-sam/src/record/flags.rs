//! The alignment `FLAG` field.

use bitflags::bitflags;

bitflags! {
    /// The bitwise `FLAG` field of an alignment record.
    ///
    /// Bit positions and names follow the SAM v1.6 spec (§1.4).
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, PartialOrd, Ord, Hash)]
    pub struct Flags: u16 {
        /// The record is paired (0x001).
        const PAIRED = 0x001;
        /// Each segment is properly aligned (0x002).
        const PROPERLY_ALIGNED = 0x002;
        /// The record is unmapped (0x004).
        const UNMAPPED = 0x004;
        /// The mate is unmapped (0x008).
        const MATE_UNMAPPED = 0x008;
        /// The sequence is reverse complemented (0x010).
        const REVERSE_COMPLEMENTED = 0x010;
        /// The mate is reverse complemented (0x020).
        const MATE_REVERSE_COMPLEMENTED = 0x020;
        /// The record is the first segment (0x040).
        const FIRST_SEGMENT = 0x040;
        /// The record is the last segment (0x080).
        const LAST_SEGMENT = 0x080;
        /// The alignment is secondary (0x100).
        const SECONDARY = 0x100;
        /// The record did not pass quality controls (0x200).
        const QC_FAIL = 0x200;
        /// The record is a PCR or optical duplicate (0x400).
        const DUPLICATE = 0x400;
        /// The alignment is supplementary (0x800).
        const SUPPLEMENTARY = 0x800;
    }
}

impl Flags {
    /// Returns whether the `PAIRED` bit is set.
    pub fn is_paired(self) -> bool {
        self.contains(Self::PAIRED)
    }

    /// Returns whether the `PROPERLY_ALIGNED` bit is set.
    pub fn is_properly_paired(self) -> bool {
        self.contains(Self::PROPERLY_ALIGNED)
    }

    /// Returns whether the record is mapped, i.e., the `UNMAPPED` bit is clear.
    pub fn is_mapped(self) -> bool {
        !self.contains(Self::UNMAPPED)
    }

    /// Returns whether the `MATE_UNMAPPED` bit is set.
    pub fn is_mate_unmapped(self) -> bool {
        self.contains(Self::MATE_UNMAPPED)
    }

    /// Returns whether the `REVERSE_COMPLEMENTED` bit is set.
    pub fn is_reverse(self) -> bool {
        self.contains(Self::REVERSE_COMPLEMENTED)
    }

    /// Returns whether the `MATE_REVERSE_COMPLEMENTED` bit is set.
    pub fn is_mate_reverse(self) -> bool {
        self.contains(Self::MATE_REVERSE_COMPLEMENTED)
    }

    /// Returns whether the `FIRST_SEGMENT` bit is set.
    pub fn is_first_segment(self) -> bool {
        self.contains(Self::FIRST_SEGMENT)
    }

    /// Returns whether the `LAST_SEGMENT` bit is set.
    pub fn is_last_segment(self) -> bool {
        self.contains(Self::LAST_SEGMENT)
    }

    /// Returns whether the `SECONDARY` bit is set.
    pub fn is_secondary(self) -> bool {
        self.contains(Self::SECONDARY)
    }

    /// Returns whether the `QC_FAIL` bit is set.
    pub fn is_filtered(self) -> bool {
        self.contains(Self::QC_FAIL)
    }

    /// Returns whether the `DUPLICATE` bit is set.
    pub fn is_duplicate(self) -> bool {
        self.contains(Self::DUPLICATE)
    }

    /// Returns whether the `SUPPLEMENTARY` bit is set.
    pub fn is_supplementary(self) -> bool {
        self.contains(Self::SUPPLEMENTARY)
    }
}

/// The twelve named booleans decoded from a `FLAG` value.
///
/// This is the "exploded" counterpart to [`Flags`], for callers who want
/// plain field access without learning the `bitflags` API.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FlagBooleans {
    pub paired: bool,
    pub proper_pair: bool,
    pub unmapped: bool,
    pub next_unmapped: bool,
    pub reversed: bool,
    pub next_reversed: bool,
    pub first: bool,
    pub last: bool,
    pub secondary: bool,
    pub filtered: bool,
    pub duplicate: bool,
    pub supplementary: bool,
}

/// Decomposes a raw `FLAG` value into its twelve named booleans.
pub fn interpret_flags(flag: u16) -> FlagBooleans {
    let flags = Flags::from_bits_truncate(flag);

    FlagBooleans {
        paired: flags.is_paired(),
        proper_pair: flags.is_properly_paired(),
        unmapped: flags.contains(Flags::UNMAPPED),
        next_unmapped: flags.is_mate_unmapped(),
        reversed: flags.is_reverse(),
        next_reversed: flags.is_mate_reverse(),
        first: flags.is_first_segment(),
        last: flags.is_last_segment(),
        secondary: flags.is_secondary(),
        filtered: flags.is_filtered(),
        duplicate: flags.is_duplicate(),
        supplementary: flags.is_supplementary(),
    }
}

/// Recomposes a raw `FLAG` value from its twelve named booleans.
///
/// `build_flag` is the exact inverse of [`interpret_flags`] for every value
/// in `0..=0xFFF`.
pub fn build_flag(booleans: FlagBooleans) -> u16 {
    let mut flags = Flags::empty();

    flags.set(Flags::PAIRED, booleans.paired);
    flags.set(Flags::PROPERLY_ALIGNED, booleans.proper_pair);
    flags.set(Flags::UNMAPPED, booleans.unmapped);
    flags.set(Flags::MATE_UNMAPPED, booleans.next_unmapped);
    flags.set(Flags::REVERSE_COMPLEMENTED, booleans.reversed);
    flags.set(Flags::MATE_REVERSE_COMPLEMENTED, booleans.next_reversed);
    flags.set(Flags::FIRST_SEGMENT, booleans.first);
    flags.set(Flags::LAST_SEGMENT, booleans.last);
    flags.set(Flags::SECONDARY, booleans.secondary);
    flags.set(Flags::QC_FAIL, booleans.filtered);
    flags.set(Flags::DUPLICATE, booleans.duplicate);
    flags.set(Flags::SUPPLEMENTARY, booleans.supplementary);

    flags.bits()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        let flags = Flags::PAIRED | Flags::REVERSE_COMPLEMENTED;
        assert!(flags.is_paired());
        assert!(flags.is_reverse());
        assert!(flags.is_mapped());
        assert!(!flags.is_secondary());
    }

    #[test]
    fn test_interpret_and_build_are_inverses() {
        for flag in 0..=0xFFFu16 {
            let booleans = interpret_flags(flag);
            assert_eq!(build_flag(booleans), flag, "flag = {flag:#06x}");
        }
    }

    #[test]
    fn test_scenario_s3() {
        for flag in [
            0x0, 0x1, 0x3, 0x5, 0x9, 0x11, 0x43, 0x83, 0x103, 0x203, 0x403, 0x803, 0xFFF,
        ] {
            assert_eq!(build_flag(interpret_flags(flag)), flag);
        }
    }
}
