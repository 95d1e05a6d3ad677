//! Type mapping between database column types and language-specific types.

/// Column types recognized by the mapper.
///
/// This is a language-agnostic classification of source database types.
/// Use a `TypeMapper` to turn it into a language-specific type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Int,
    BigInt,
    Text,
    DateTime,
    Bit,
    Decimal,
    Float,
    Real,
    UniqueIdentifier,
    Binary,
}

impl SqlType {
    /// Classify a source type name. Matching is case-insensitive.
    pub fn parse(name: &str) -> Option<Self> {
        let ty = match name.to_ascii_lowercase().as_str() {
            "int" | "integer" | "smallint" | "tinyint" => SqlType::Int,
            "bigint" => SqlType::BigInt,
            "nvarchar" | "varchar" | "char" | "text" | "ntext" => SqlType::Text,
            "datetime" | "smalldatetime" | "date" | "time" => SqlType::DateTime,
            "bit" => SqlType::Bit,
            "decimal" | "numeric" | "money" | "smallmoney" => SqlType::Decimal,
            "float" => SqlType::Float,
            "real" => SqlType::Real,
            "uniqueidentifier" => SqlType::UniqueIdentifier,
            "varbinary" | "binary" | "image" | "rowversion" | "timestamp" => SqlType::Binary,
            _ => return None,
        };
        Some(ty)
    }
}

/// Trait for mapping source column types to language-specific type names.
///
/// Implement this trait for each target language to provide type mappings.
pub trait TypeMapper {
    /// The target language name
    fn language(&self) -> &'static str;

    /// Map a recognized column type to a language-specific type name
    fn map_sql_type(&self, ty: SqlType) -> &'static str;

    /// Type used for blank or unrecognized column types
    fn fallback_type(&self) -> &'static str;

    /// Map a raw source type name.
    ///
    /// Never fails: blank input and unknown types degrade to
    /// [`fallback_type`](TypeMapper::fallback_type), the latter with a warning.
    fn map_type(&self, source: &str) -> &'static str {
        if source.trim().is_empty() {
            return self.fallback_type();
        }

        match SqlType::parse(source) {
            Some(ty) => self.map_sql_type(ty),
            None => {
                log::warn!(
                    "unknown {} column type '{}' mapped to '{}'",
                    self.language(),
                    source,
                    self.fallback_type()
                );
                self.fallback_type()
            }
        }
    }
}

/// C# type mapper implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct CSharpTypeMapper;

impl TypeMapper for CSharpTypeMapper {
    fn language(&self) -> &'static str {
        "csharp"
    }

    fn map_sql_type(&self, ty: SqlType) -> &'static str {
        match ty {
            SqlType::Int => "int",
            SqlType::BigInt => "long",
            SqlType::Text => "string",
            SqlType::DateTime => "DateTime",
            SqlType::Bit => "bool",
            SqlType::Decimal => "decimal",
            // SQL float is double precision, SQL real is single precision
            SqlType::Float => "double",
            SqlType::Real => "float",
            SqlType::UniqueIdentifier => "Guid",
            SqlType::Binary => "byte[]",
        }
    }

    fn fallback_type(&self) -> &'static str {
        "object"
    }
}

/// Map a source column type with the default (C#) mapper.
pub fn map_type(source: &str) -> &'static str {
    CSharpTypeMapper.map_type(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csharp_type_mapper() {
        let mapper = CSharpTypeMapper;

        assert_eq!(mapper.map_type("int"), "int");
        assert_eq!(mapper.map_type("tinyint"), "int");
        assert_eq!(mapper.map_type("bigint"), "long");
        assert_eq!(mapper.map_type("nvarchar"), "string");
        assert_eq!(mapper.map_type("ntext"), "string");
        assert_eq!(mapper.map_type("smalldatetime"), "DateTime");
        assert_eq!(mapper.map_type("bit"), "bool");
        assert_eq!(mapper.map_type("money"), "decimal");
        assert_eq!(mapper.map_type("float"), "double");
        assert_eq!(mapper.map_type("real"), "float");
        assert_eq!(mapper.map_type("uniqueidentifier"), "Guid");
        assert_eq!(mapper.map_type("rowversion"), "byte[]");
        assert_eq!(mapper.map_type("timestamp"), "byte[]");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(map_type("INT"), map_type("int"));
        assert_eq!(map_type("INT"), "int");
        assert_eq!(map_type("NVarChar"), "string");
    }

    #[test]
    fn test_fallback_types() {
        assert_eq!(map_type(""), "object");
        assert_eq!(map_type("   "), "object");
        assert_eq!(map_type("mystery_type"), "object");
        assert_eq!(map_type("geography"), "object");
    }

    #[test]
    fn test_sql_type_parse() {
        assert_eq!(SqlType::parse("Integer"), Some(SqlType::Int));
        assert_eq!(SqlType::parse("IMAGE"), Some(SqlType::Binary));
        assert_eq!(SqlType::parse("varchar(50)"), None);
    }
}
