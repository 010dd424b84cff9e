#![allow(non_upper_case_globals)]

use bitflags::bitflags;

bitflags! {
    /// The subset of flags that have crate-understood meaning, as opposed
    /// to the arbitrary affix-class flags tracked in a word's `FlagSet`.
    /// Precomputed once per `WordEntry` (and per affix entry, for the
    /// compound-gating ones) so hot paths never need to consult `AffConfig`
    /// to ask "is this the FORBIDDENWORD flag".
    #[derive(Default)]
    pub struct WordFlags: u16 {
        /// This word must not be accepted as good.
        const Forbidden = 0x0001;
        /// This word may appear at the beginning of compound words.
        const CompoundBegin = 0x0002;
        /// This word may appear as a middle word in compound words.
        const CompoundMiddle = 0x0004;
        /// This word may appear at the end of compound words.
        const CompoundEnd = 0x0008;
        /// This word may have affixes even inside a compound word.
        const CompoundPermit = 0x0010;
        /// Affixes carrying this flag disqualify a compound candidate.
        const CompoundForbid = 0x0020;
        /// This word can only appear as part of compound words.
        const OnlyInCompound = 0x0040;
        /// This word must not be suggested as a correction.
        const NoSuggest = 0x0080;
        /// A continuation flag, for PFX and SFX that must surround a word.
        const Circumfix = 0x0100;
        /// This word is not valid without an affix.
        const NeedAffix = 0x0200;
        /// This word should not have its case changed.
        const KeepCase = 0x0400;
        /// This word may appear in compounds.
        /// (predates the CompoundBegin, Middle, End flags)
        const CompoundFlag = 0x0800;
        /// This is a very rare word that is likely a spelling error.
        const Warn = 0x1000;
        /// COMPOUNDROOT-bearing segments count at most once per compound.
        const CompoundRoot = 0x2000;
        /// A compound using this part must be rendered in title case.
        const ForceUcase = 0x4000;
    }
}
