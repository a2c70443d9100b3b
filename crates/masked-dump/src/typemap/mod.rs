//! Mapping from native column type names to portable logical types.

use crate::core::schema::LogicalType;

/// Native type name → logical type. Matching is exact and case-sensitive.
///
/// The PostgreSQL entries use `udt_name` spellings as reported by
/// `information_schema.columns`.
pub const NATIVE_TYPES: &[(&str, LogicalType)] = &[
    // String types
    ("char", LogicalType::String),
    ("varchar", LogicalType::String),
    ("bpchar", LogicalType::String),
    // Integer types
    ("int", LogicalType::Integer),
    ("integer", LogicalType::Integer),
    ("int4", LogicalType::Integer),
    ("bigint", LogicalType::BigInt),
    ("mediumint", LogicalType::BigInt),
    ("int8", LogicalType::BigInt),
    ("tinyint", LogicalType::SmallInt),
    ("smallint", LogicalType::SmallInt),
    ("int2", LogicalType::SmallInt),
    // Text types
    ("text", LogicalType::Text),
    ("longtext", LogicalType::Text),
    ("mediumtext", LogicalType::Text),
    // Date/time types
    ("date", LogicalType::Date),
    ("datetime", LogicalType::DateTime),
    ("timestamp", LogicalType::DateTime),
    ("timestamptz", LogicalType::DateTime),
    // Binary types
    ("binary", LogicalType::Binary),
    ("bytea", LogicalType::Binary),
    // Special types
    ("json", LogicalType::Json),
    ("jsonb", LogicalType::Json),
    ("decimal", LogicalType::Decimal),
    ("numeric", LogicalType::Decimal),
];

/// Map a native type name to its logical type, if the name is known.
pub fn lookup(native_type: &str) -> Option<LogicalType> {
    NATIVE_TYPES
        .iter()
        .find(|(name, _)| *name == native_type)
        .map(|(_, logical)| *logical)
}

/// Map a native type name to a logical type.
///
/// Total: names missing from [`NATIVE_TYPES`] map to [`LogicalType::Text`].
pub fn map_type(native_type: &str) -> LogicalType {
    lookup(native_type).unwrap_or(LogicalType::Text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_types() {
        assert_eq!(map_type("int"), LogicalType::Integer);
        assert_eq!(map_type("integer"), LogicalType::Integer);
        assert_eq!(map_type("bigint"), LogicalType::BigInt);
        assert_eq!(map_type("mediumint"), LogicalType::BigInt);
        assert_eq!(map_type("smallint"), LogicalType::SmallInt);
        assert_eq!(map_type("tinyint"), LogicalType::SmallInt);
    }

    #[test]
    fn test_string_types() {
        assert_eq!(map_type("char"), LogicalType::String);
        assert_eq!(map_type("varchar"), LogicalType::String);
        assert_eq!(map_type("text"), LogicalType::Text);
        assert_eq!(map_type("longtext"), LogicalType::Text);
        assert_eq!(map_type("mediumtext"), LogicalType::Text);
    }

    #[test]
    fn test_datetime_types() {
        assert_eq!(map_type("date"), LogicalType::Date);
        assert_eq!(map_type("datetime"), LogicalType::DateTime);
        assert_eq!(map_type("timestamp"), LogicalType::DateTime);
    }

    #[test]
    fn test_special_types() {
        assert_eq!(map_type("binary"), LogicalType::Binary);
        assert_eq!(map_type("json"), LogicalType::Json);
        assert_eq!(map_type("decimal"), LogicalType::Decimal);
    }

    #[test]
    fn test_synonyms_agree() {
        let synonyms = [
            ("int", "integer"),
            ("datetime", "timestamp"),
            ("char", "varchar"),
            ("bigint", "mediumint"),
            ("tinyint", "smallint"),
            ("text", "longtext"),
            ("int4", "int"),
            ("jsonb", "json"),
        ];
        for (a, b) in synonyms {
            assert_eq!(map_type(a), map_type(b), "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_unknown_types_fall_back_to_text() {
        for name in ["geometry", "uuid", "enum", "blob", "", "float", "double precision"] {
            assert_eq!(lookup(name), None);
            assert_eq!(map_type(name), LogicalType::Text, "{}", name);
        }
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert_eq!(map_type("INT"), LogicalType::Text);
        assert_eq!(map_type("VarChar"), LogicalType::Text);
        assert_eq!(map_type(" int"), LogicalType::Text);
    }

    #[test]
    fn test_table_has_no_duplicate_names() {
        for (i, (name, _)) in NATIVE_TYPES.iter().enumerate() {
            assert!(
                NATIVE_TYPES[i + 1..].iter().all(|(other, _)| other != name),
                "duplicate entry {}",
                name
            );
        }
    }
}
