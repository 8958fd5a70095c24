//! Small value types shared across model entities.

/// Bit numbering / byte order of a signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ByteOrder {
    /// Motorola (`@0`).
    BigEndian,
    /// Intel (`@1`).
    LittleEndian,
}

impl ByteOrder {
    /// Map the DBC byte order character; only `'0'` is big endian.
    #[must_use]
    pub const fn from_dbc_char(c: char) -> Self {
        if c == '0' {
            Self::BigEndian
        } else {
            Self::LittleEndian
        }
    }
}

/// Signedness of the raw value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueType {
    /// Two's complement (`-`).
    Signed,
    /// Unsigned (`+`).
    Unsigned,
}

impl ValueType {
    /// Map the DBC value type character; only `'+'` is unsigned.
    #[must_use]
    pub const fn from_dbc_char(c: char) -> Self {
        if c == '+' {
            Self::Unsigned
        } else {
            Self::Signed
        }
    }
}

/// Raw encoding of a signal value (`SIG_VALTYPE_`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExtendedValueType {
    /// Fixed-point integer (the default).
    #[default]
    Integer,
    /// IEEE 754 binary32.
    Float,
    /// IEEE 754 binary64.
    Double,
}

impl ExtendedValueType {
    /// Map a `SIG_VALTYPE_` tag: `1` float, `2` double, anything else integer.
    #[must_use]
    pub const fn from_tag(tag: u64) -> Self {
        match tag {
            1 => Self::Float,
            2 => Self::Double,
            _ => Self::Integer,
        }
    }

    /// Bit size the encoding requires, `None` for integers.
    #[must_use]
    pub const fn required_bit_size(self) -> Option<u64> {
        match self {
            Self::Integer => None,
            Self::Float => Some(32),
            Self::Double => Some(64),
        }
    }
}

/// The kind of object an attribute applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectType {
    /// The network itself.
    Network,
    /// A node (`BU_`).
    Node,
    /// A message (`BO_`).
    Message,
    /// A signal (`SG_`).
    Signal,
    /// An environment variable (`EV_`).
    EnvironmentVariable,
}

impl ObjectType {
    /// Map a `BA_DEF_` object type tag.
    ///
    /// No tag means network; any tag other than `BU_`, `BO_` and `SG_` is
    /// taken as an environment variable.
    #[must_use]
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            None => Self::Network,
            Some("BU_") => Self::Node,
            Some("BO_") => Self::Message,
            Some("SG_") => Self::Signal,
            Some(_) => Self::EnvironmentVariable,
        }
    }

    /// Get the DBC tag for this object type (empty for network).
    #[must_use]
    pub const fn as_tag(self) -> &'static str {
        match self {
            Self::Network => "",
            Self::Node => "BU_",
            Self::Message => "BO_",
            Self::Signal => "SG_",
            Self::EnvironmentVariable => "EV_",
        }
    }
}

/// Data kind of an environment variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VarType {
    /// Integer variable (tag `0`).
    Integer,
    /// Float variable (tag `1`).
    Float,
    /// String variable (tag `2`).
    String,
    /// Byte array; only produced by an `ENVVAR_DATA_` declaration.
    Data,
}

impl VarType {
    /// Map an `EV_` type tag. Unknown tags fall back to integer.
    #[must_use]
    pub const fn from_tag(tag: u64) -> Self {
        match tag {
            1 => Self::Float,
            2 => Self::String,
            _ => Self::Integer,
        }
    }
}

/// Access type of an environment variable.
///
/// The `...Extended` variants are the `DUMMY_NODE_VECTOR800x` tokens some
/// tools emit instead of the plain `DUMMY_NODE_VECTORx` ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AccessType {
    /// `DUMMY_NODE_VECTOR0`
    #[default]
    Unrestricted,
    /// `DUMMY_NODE_VECTOR1`
    Read,
    /// `DUMMY_NODE_VECTOR2`
    Write,
    /// `DUMMY_NODE_VECTOR3`
    ReadWrite,
    /// `DUMMY_NODE_VECTOR8000`
    UnrestrictedExtended,
    /// `DUMMY_NODE_VECTOR8001`
    ReadExtended,
    /// `DUMMY_NODE_VECTOR8002`
    WriteExtended,
    /// `DUMMY_NODE_VECTOR8003`
    ReadWriteExtended,
}

impl AccessType {
    /// Map an access type token. Unrecognized tokens are unrestricted.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token {
            "DUMMY_NODE_VECTOR1" => Self::Read,
            "DUMMY_NODE_VECTOR2" => Self::Write,
            "DUMMY_NODE_VECTOR3" => Self::ReadWrite,
            "DUMMY_NODE_VECTOR8000" => Self::UnrestrictedExtended,
            "DUMMY_NODE_VECTOR8001" => Self::ReadExtended,
            "DUMMY_NODE_VECTOR8002" => Self::WriteExtended,
            "DUMMY_NODE_VECTOR8003" => Self::ReadWriteExtended,
            _ => Self::Unrestricted,
        }
    }

    /// Get the DBC token for this access type.
    #[must_use]
    pub const fn as_token(self) -> &'static str {
        match self {
            Self::Unrestricted => "DUMMY_NODE_VECTOR0",
            Self::Read => "DUMMY_NODE_VECTOR1",
            Self::Write => "DUMMY_NODE_VECTOR2",
            Self::ReadWrite => "DUMMY_NODE_VECTOR3",
            Self::UnrestrictedExtended => "DUMMY_NODE_VECTOR8000",
            Self::ReadExtended => "DUMMY_NODE_VECTOR8001",
            Self::WriteExtended => "DUMMY_NODE_VECTOR8002",
            Self::ReadWriteExtended => "DUMMY_NODE_VECTOR8003",
        }
    }

    /// Check whether this is one of the `DUMMY_NODE_VECTOR800x` variants.
    #[must_use]
    pub const fn is_extended(self) -> bool {
        matches!(
            self,
            Self::UnrestrictedExtended
                | Self::ReadExtended
                | Self::WriteExtended
                | Self::ReadWriteExtended
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_order_chars() {
        assert_eq!(ByteOrder::from_dbc_char('0'), ByteOrder::BigEndian);
        assert_eq!(ByteOrder::from_dbc_char('1'), ByteOrder::LittleEndian);
    }

    #[test]
    fn test_value_type_chars() {
        assert_eq!(ValueType::from_dbc_char('+'), ValueType::Unsigned);
        assert_eq!(ValueType::from_dbc_char('-'), ValueType::Signed);
    }

    #[test]
    fn test_extended_value_type_tags() {
        assert_eq!(ExtendedValueType::from_tag(0), ExtendedValueType::Integer);
        assert_eq!(ExtendedValueType::from_tag(1), ExtendedValueType::Float);
        assert_eq!(ExtendedValueType::from_tag(2), ExtendedValueType::Double);
        assert_eq!(ExtendedValueType::from_tag(7), ExtendedValueType::Integer);
        assert_eq!(ExtendedValueType::Float.required_bit_size(), Some(32));
        assert_eq!(ExtendedValueType::Integer.required_bit_size(), None);
    }

    #[test]
    fn test_object_type_tags() {
        assert_eq!(ObjectType::from_tag(None), ObjectType::Network);
        assert_eq!(ObjectType::from_tag(Some("BU_")), ObjectType::Node);
        assert_eq!(ObjectType::from_tag(Some("BO_")), ObjectType::Message);
        assert_eq!(ObjectType::from_tag(Some("SG_")), ObjectType::Signal);
        assert_eq!(
            ObjectType::from_tag(Some("EV_")),
            ObjectType::EnvironmentVariable
        );
        assert_eq!(
            ObjectType::from_tag(Some("anything")),
            ObjectType::EnvironmentVariable
        );
        assert_eq!(ObjectType::Network.as_tag(), "");
        assert_eq!(ObjectType::Signal.as_tag(), "SG_");
    }

    #[test]
    fn test_var_type_tags() {
        assert_eq!(VarType::from_tag(0), VarType::Integer);
        assert_eq!(VarType::from_tag(1), VarType::Float);
        assert_eq!(VarType::from_tag(2), VarType::String);
        assert_eq!(VarType::from_tag(9), VarType::Integer);
    }

    #[test]
    fn test_access_type_tokens() {
        let all = [
            AccessType::Unrestricted,
            AccessType::Read,
            AccessType::Write,
            AccessType::ReadWrite,
            AccessType::UnrestrictedExtended,
            AccessType::ReadExtended,
            AccessType::WriteExtended,
            AccessType::ReadWriteExtended,
        ];
        for access in all {
            assert_eq!(AccessType::from_token(access.as_token()), access);
        }
        assert_eq!(AccessType::from_token("bogus"), AccessType::Unrestricted);
        assert!(AccessType::ReadExtended.is_extended());
        assert!(!AccessType::Read.is_extended());
    }
}
