use core::fmt;

use crate::trie::{Match, MatchIndex};

#[cfg(feature = "std")]
extern crate std;

/// Escape code: the next byte is a literal
pub const VERBATIM_BYTE: u8 = 254;
/// Escape code: the next byte is a length `L`, followed by `L` literals
pub const VERBATIM_RUN: u8 = 255;

/// Codes `0..MAX_ENTRIES` index the codebook; the rest are escapes
pub const MAX_ENTRIES: usize = VERBATIM_BYTE as usize;
/// Longest codebook entry, and so the encoder's lookahead
pub const MAX_ENTRY_LEN: usize = 7;
/// Longest literal run a single [VERBATIM_RUN] escape can carry
pub const MAX_VERBATIM_RUN: usize = u8::MAX as usize;

/// The standard Smaz codebook, tuned for English text and HTML
#[rustfmt::skip]
pub const SMAZ_CODES: &[&[u8]] = &[
    b" ", b"the", b"e", b"t", b"a", b"of", b"o", b"and", b"i", b"n", b"s", b"e ", b"r", b" th",
    b" t", b"in", b"he", b"th", b"h", b"he ", b"to", b"\r\n", b"l", b"s ", b"d", b" a", b"an",
    b"er", b"c", b" o", b"d ", b"on", b" of", b"re", b"of ", b"t ", b", ", b"is", b"u", b"at",
    b"   ", b"n ", b"or", b"which", b"f", b"m", b"as", b"it", b"that", b"\n", b"was", b"en",
    b"  ", b" w", b"es", b" an", b" i", b"\r", b"f ", b"g", b"p", b"nd", b" s", b"nd ", b"ed ",
    b"w", b"ed", b"http://", b"for", b"te", b"ing", b"y ", b"The", b" c", b"ti", b"r ", b"his",
    b"st", b" in", b"ar", b"nt", b",", b" to", b"y", b"ng", b" h", b"with", b"le", b"al", b"to ",
    b"b", b"ou", b"be", b"were", b" b", b"se", b"o ", b"ent", b"ha", b"ng ", b"their", b"\"",
    b"hi", b"from", b" f", b"in ", b"de", b"ion", b"me", b"v", b".", b"ve", b"all", b"re ",
    b"ri", b"ro", b"is ", b"co", b"f t", b"are", b"ea", b". ", b"her", b" m", b"er ", b" p",
    b"es ", b"by", b"they", b"di", b"ra", b"ic", b"not", b"s, ", b"d t", b"at ", b"ce", b"la",
    b"h ", b"ne", b"as ", b"tio", b"on ", b"n t", b"io", b"we", b" a ", b"om", b", a", b"s o",
    b"ur", b"li", b"ll", b"ch", b"had", b"this", b"e t", b"g ", b"e\r\n", b" wh", b"ere",
    b" co", b"e o", b"a ", b"us", b" d", b"ss", b"\n\r\n", b"\r\n\r", b"=\"", b" be", b" e",
    b"s a", b"ma", b"one", b"t t", b"or ", b"but", b"el", b"so", b"l ", b"e s", b"s,", b"no",
    b"ter", b" wa", b"iv", b"ho", b"e a", b" r", b"hat", b"s t", b"ns", b"ch ", b"wh", b"tr",
    b"ut", b"/", b"have", b"ly ", b"ta", b" ha", b" on", b"tha", b"-", b" l", b"ati", b"en ",
    b"pe", b" re", b"there", b"ass", b"si", b" fo", b"wa", b"ec", b"our", b"who", b"its", b"z",
    b"fo", b"rs", b">", b"ot", b"un", b"<", b"im", b"th ", b"nc", b"ate", b"><", b"ver", b"ad",
    b" we", b"ly", b"ee", b" n", b"id", b" cl", b"ac", b"il", b"</", b"rt", b" wi", b"div",
    b"e, ", b" it", b"whi", b" ma", b"ge", b"x", b"e c", b"men", b".com",
];

/// The standard codebook, with its match index built at compile time
pub static SMAZ: Codebook<'static> = Codebook::new(SMAZ_CODES);

/// Codebook construction errors
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum CodebookError {
    /// More entries than there are non-escape codes
    TooManyEntries { count: usize },
    /// An entry is empty or longer than [MAX_ENTRY_LEN]
    InvalidEntryLength { index: usize, len: usize },
    /// Entry `index` repeats entry `first`
    DuplicateEntry { index: usize, first: usize },
}
impl fmt::Display for CodebookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodebookError::TooManyEntries { count } => write!(
                f,
                "codebook has {} entries, at most {} are allowed",
                count, MAX_ENTRIES
            ),
            CodebookError::InvalidEntryLength { index, len } => write!(
                f,
                "codebook entry {} has length {}, expected 1 to {}",
                index, len, MAX_ENTRY_LEN
            ),
            CodebookError::DuplicateEntry { index, first } => {
                write!(f, "codebook entry {} duplicates entry {}", index, first)
            }
        }
    }
}
#[cfg(feature = "std")]
impl std::error::Error for CodebookError {}

/// A fixed table of short strings, indexed by their one-byte codes
///
/// Both directions are served from here: decoding looks entries up by code,
/// encoding walks the prefix trie built alongside the table. A codebook is
/// immutable once built and can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct Codebook<'a> {
    entries: &'a [&'a [u8]],
    index: MatchIndex,
}

impl<'a> Codebook<'a> {
    /// Build a codebook, validating the table
    pub const fn try_new(entries: &'a [&'a [u8]]) -> Result<Self, CodebookError> {
        if entries.len() > MAX_ENTRIES {
            return Err(CodebookError::TooManyEntries {
                count: entries.len(),
            });
        }
        match MatchIndex::build(entries) {
            Ok(index) => Ok(Self { entries, index }),
            Err(e) => Err(e),
        }
    }

    /// Build a codebook from a table known to be valid
    ///
    /// Panics on an invalid table, which is a compile error when used to
    /// initialize a `static` or `const`.
    pub const fn new(entries: &'a [&'a [u8]]) -> Self {
        match Self::try_new(entries) {
            Ok(codebook) => codebook,
            Err(_) => panic!("invalid smaz codebook"),
        }
    }

    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub const fn entries(&self) -> &'a [&'a [u8]] {
        self.entries
    }

    /// The string for `code`, or `None` if `code` is outside this codebook
    pub fn entry(&self, code: u8) -> Option<&'a [u8]> {
        self.entries.get(code as usize).copied()
    }

    /// The longest entry that is a prefix of `input`
    pub fn longest_match(&self, input: &[u8]) -> Option<Match> {
        self.index.longest_match(input)
    }

    pub fn match_index(&self) -> &MatchIndex {
        &self.index
    }
}
