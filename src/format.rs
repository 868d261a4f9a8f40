use crate::marker::*;

/// The classification of a MessagePack leading byte.
///
/// Variants with an inline value carry it: the fixint value, the fixstr
/// length or the fixarray/fixmap element count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatTag {
    PosFixint(u8),
    NegFixint(i8),
    Nil,
    Reserved,
    False,
    True,
    FixMap(u8),
    FixArray(u8),
    FixStr(u8),
    Bin8,
    Bin16,
    Bin32,
    Ext8,
    Ext16,
    Ext32,
    Float32,
    Float64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Int8,
    Int16,
    Int32,
    Int64,
    FixExt1,
    FixExt2,
    FixExt4,
    FixExt8,
    FixExt16,
    Str8,
    Str16,
    Str32,
    Array16,
    Array32,
    Map16,
    Map32,
}

/// How many bytes or items follow a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Length {
    /// Known from the tag alone
    Inline(usize),
    /// Stored in a big-endian prefix of this many bytes right after the tag
    Prefix(usize),
}

/// The shape of an encoded value as announced by its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// A leaf with a payload of `Length` bytes
    Scalar(Length),
    /// An extension: `Length` payload bytes preceded by a one byte type
    Ext(Length),
    /// An array of `Length` elements
    Array(Length),
    /// A map of `Length` key/value pairs
    Map(Length),
    /// `0xc1`, never used
    Reserved,
}

impl FormatTag {
    /// Classify a leading byte.
    pub const fn from_byte(byte: u8) -> FormatTag {
        use FormatTag::*;
        match byte {
            MIN_POSFIXINT..=MAX_POSFIXINT => PosFixint(byte),
            FIXMAP..=FIXMAP_MAX => FixMap(byte & MAX_FIXMAP_SIZE as u8),
            FIXARRAY..=FIXARRAY_MAX => FixArray(byte & MAX_FIXARRAY_SIZE as u8),
            FIXSTR..=FIXSTR_MAX => FixStr(byte & MAX_FIXSTR_SIZE as u8),
            NIL => Nil,
            RESERVED => Reserved,
            FALSE => False,
            TRUE => True,
            BIN_8 => Bin8,
            BIN_16 => Bin16,
            BIN_32 => Bin32,
            EXT_8 => Ext8,
            EXT_16 => Ext16,
            EXT_32 => Ext32,
            FLOAT_32 => Float32,
            FLOAT_64 => Float64,
            UINT_8 => Uint8,
            UINT_16 => Uint16,
            UINT_32 => Uint32,
            UINT_64 => Uint64,
            INT_8 => Int8,
            INT_16 => Int16,
            INT_32 => Int32,
            INT_64 => Int64,
            FIXEXT_1 => FixExt1,
            FIXEXT_2 => FixExt2,
            FIXEXT_4 => FixExt4,
            FIXEXT_8 => FixExt8,
            FIXEXT_16 => FixExt16,
            STR_8 => Str8,
            STR_16 => Str16,
            STR_32 => Str32,
            ARRAY_16 => Array16,
            ARRAY_32 => Array32,
            MAP_16 => Map16,
            MAP_32 => Map32,
            NEGFIXINT..=0xff => NegFixint(byte as i8),
        }
    }

    /// The payload layout following this tag.
    pub const fn layout(self) -> Layout {
        use FormatTag::*;
        use Length::*;
        match self {
            PosFixint(_)|NegFixint(_)|Nil|False|True => Layout::Scalar(Inline(0)),
            Reserved => Layout::Reserved,
            FixMap(n) => Layout::Map(Inline(n as usize)),
            FixArray(n) => Layout::Array(Inline(n as usize)),
            FixStr(n) => Layout::Scalar(Inline(n as usize)),
            Uint8|Int8 => Layout::Scalar(Inline(1)),
            Uint16|Int16 => Layout::Scalar(Inline(2)),
            Uint32|Int32|Float32 => Layout::Scalar(Inline(4)),
            Uint64|Int64|Float64 => Layout::Scalar(Inline(8)),
            Bin8|Str8 => Layout::Scalar(Prefix(1)),
            Bin16|Str16 => Layout::Scalar(Prefix(2)),
            Bin32|Str32 => Layout::Scalar(Prefix(4)),
            FixExt1 => Layout::Ext(Inline(1)),
            FixExt2 => Layout::Ext(Inline(2)),
            FixExt4 => Layout::Ext(Inline(4)),
            FixExt8 => Layout::Ext(Inline(8)),
            FixExt16 => Layout::Ext(Inline(16)),
            Ext8 => Layout::Ext(Prefix(1)),
            Ext16 => Layout::Ext(Prefix(2)),
            Ext32 => Layout::Ext(Prefix(4)),
            Array16 => Layout::Array(Prefix(2)),
            Array32 => Layout::Array(Prefix(4)),
            Map16 => Layout::Map(Prefix(2)),
            Map32 => Layout::Map(Prefix(4)),
        }
    }

    /// Return `true` for any of the fixint, int or uint tags.
    pub const fn is_integer(self) -> bool {
        use FormatTag::*;
        matches!(self, PosFixint(_)|NegFixint(_)|
                       Uint8|Uint16|Uint32|Uint64|
                       Int8|Int16|Int32|Int64)
    }

    /// Return `true` for any of the str tags.
    pub const fn is_str(self) -> bool {
        matches!(self, FormatTag::FixStr(_)|FormatTag::Str8|FormatTag::Str16|FormatTag::Str32)
    }
}
