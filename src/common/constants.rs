//! Constants shared by the codec and the converter

/// Sign bit of a 64-bit integer, flipped to make signed encodings sortable
pub const SIGN_MASK: u64 = 0x8000_0000_0000_0000;

/// Width in bytes of every fixed-size integer encoding
pub const INT_ENCODED_LEN: usize = 8;

/// Collation id used when a collation name is not in the table (`utf8_bin`)
pub const DEFAULT_COLLATION_ID: i32 = 83;

/// Default charset for string columns
pub const DEFAULT_CHARSET: &str = "utf8";

/// Default collation for string columns
pub const DEFAULT_COLLATION: &str = "utf8_bin";

/// Charset and collation of binary strings
pub const CHARSET_BIN: &str = "binary";

/// Maximum number of digits in a decimal
pub const MAX_DECIMAL_PRECISION: u8 = 65;

/// Maximum number of fractional digits in a decimal
pub const MAX_DECIMAL_SCALE: u8 = 30;

/// Decimal digits packed into one 4-byte word of the binary decimal layout
pub const DIGITS_PER_WORD: usize = 9;

/// Bytes needed for a leading or trailing group of `n` decimal digits
pub const DIG_TO_BYTES: [usize; DIGITS_PER_WORD + 1] = [0, 1, 1, 2, 2, 3, 3, 4, 4, 4];

/// Largest year the packed time layout can carry
pub const MAX_PACKED_YEAR: i32 = 9999;

/// Column ids that mark a column with no stable identity on the remote side
pub const UNSTABLE_COLUMN_IDS: [i64; 2] = [0, -1];
