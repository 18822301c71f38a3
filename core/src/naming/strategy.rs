//! PostgreSQL naming strategy: reserved-word escaping and identifier length limit.

use super::convention::{IndexKind, NamingConvention, UnderscoreConvention};
use super::reserved::is_reserved;

/// PostgreSQL's maximum identifier length (`NAMEDATALEN - 1` in default builds).
pub const PG_IDENT_MAX: usize = 63;

/// Naming operation that produced an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ClassToTableName,
    PropertyToColumnName,
    JoinColumnName,
    JoinKeyColumnName,
    JoinTableName,
    IndexName,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::ClassToTableName => "class_to_table_name",
            Operation::PropertyToColumnName => "property_to_column_name",
            Operation::JoinColumnName => "join_column_name",
            Operation::JoinKeyColumnName => "join_key_column_name",
            Operation::JoinTableName => "join_table_name",
            Operation::IndexName => "index_name",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A derived identifier exceeds the configured length limit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "{operation} {} => {candidate} length {length} > max {limit}",
    .inputs.join(" & ")
)]
pub struct IdentifierTooLong {
    /// Operation that derived the identifier.
    pub operation: Operation,
    /// Names the caller passed in, in argument order.
    pub inputs: Vec<String>,
    /// The derived (and possibly escaped) identifier.
    pub candidate: String,
    /// Length of `candidate` in bytes.
    pub length: usize,
    /// Limit that was exceeded.
    pub limit: usize,
}

/// Naming strategy producing PostgreSQL-safe identifiers.
///
/// Table and column names are escaped with a trailing `_` when they collide
/// with a reserved key word. Join and index names are only length-checked.
/// Every operation fails with [`IdentifierTooLong`] when the result is longer
/// than the limit; a result exactly at the limit is accepted.
#[derive(Debug, Clone)]
pub struct PgNamingStrategy<C = UnderscoreConvention> {
    convention: C,
    max_identifier_length: usize,
}

impl Default for PgNamingStrategy<UnderscoreConvention> {
    fn default() -> Self {
        Self::new(UnderscoreConvention)
    }
}

impl<C: NamingConvention> PgNamingStrategy<C> {
    pub fn new(convention: C) -> Self {
        Self {
            convention,
            max_identifier_length: PG_IDENT_MAX,
        }
    }

    /// Override the length limit, for servers built with a non-default `NAMEDATALEN`.
    pub fn with_max_identifier_length(mut self, limit: usize) -> Self {
        self.max_identifier_length = limit;
        self
    }

    pub fn max_identifier_length(&self) -> usize {
        self.max_identifier_length
    }

    pub fn convention(&self) -> &C {
        &self.convention
    }

    pub fn class_to_table_name(&self, class_name: &str) -> Result<String, IdentifierTooLong> {
        let output = escape_reserved(self.convention.class_to_table_name(class_name));
        self.check_length(Operation::ClassToTableName, &[class_name], output)
    }

    pub fn property_to_column_name(&self, property_name: &str) -> Result<String, IdentifierTooLong> {
        let output = escape_reserved(self.convention.property_to_column_name(property_name));
        self.check_length(Operation::PropertyToColumnName, &[property_name], output)
    }

    pub fn join_column_name(&self, property_name: &str) -> Result<String, IdentifierTooLong> {
        let output = self.convention.join_column_name(property_name);
        self.check_length(Operation::JoinColumnName, &[property_name], output)
    }

    pub fn join_key_column_name(
        &self,
        entity_name: &str,
        referenced_column_name: Option<&str>,
    ) -> Result<String, IdentifierTooLong> {
        let output = self
            .convention
            .join_key_column_name(entity_name, referenced_column_name);
        self.check_length(
            Operation::JoinKeyColumnName,
            &[entity_name, referenced_column_name.unwrap_or_default()],
            output,
        )
    }

    pub fn join_table_name(
        &self,
        source_entity: &str,
        target_entity: &str,
        property_name: &str,
    ) -> Result<String, IdentifierTooLong> {
        let output = self
            .convention
            .join_table_name(source_entity, target_entity, property_name);
        self.check_length(
            Operation::JoinTableName,
            &[source_entity, target_entity, property_name],
            output,
        )
    }

    pub fn index_name(
        &self,
        table_name: &str,
        columns: &[&str],
        kind: IndexKind,
    ) -> Result<String, IdentifierTooLong> {
        let output = self.convention.index_name(table_name, columns, kind);
        let mut inputs = vec![table_name];
        inputs.extend_from_slice(columns);
        self.check_length(Operation::IndexName, &inputs, output)
    }

    fn check_length(
        &self,
        operation: Operation,
        inputs: &[&str],
        candidate: String,
    ) -> Result<String, IdentifierTooLong> {
        let length = candidate.len();
        if length > self.max_identifier_length {
            return Err(IdentifierTooLong {
                operation,
                inputs: inputs.iter().map(|s| s.to_string()).collect(),
                candidate,
                length,
                limit: self.max_identifier_length,
            });
        }
        log::debug!("{operation} {} => {candidate}", inputs.join(" & "));
        Ok(candidate)
    }
}

/// Append a single `_` to reserved key words.
fn escape_reserved(mut candidate: String) -> String {
    if is_reserved(&candidate) {
        candidate.push('_');
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy() -> PgNamingStrategy {
        PgNamingStrategy::default()
    }

    /// PascalCase class name whose underscored form is exactly `len` bytes.
    fn class_of_len(len: usize) -> String {
        let mut s = String::from("A");
        s.push_str(&"b".repeat(len - 1));
        s
    }

    #[test]
    fn test_class_to_table_name_plain() {
        assert_eq!(strategy().class_to_table_name("UserOrder").unwrap(), "user_order");
    }

    #[test]
    fn test_class_to_table_name_reserved_is_escaped() {
        assert_eq!(strategy().class_to_table_name("Order").unwrap(), "order_");
        assert_eq!(strategy().class_to_table_name("User").unwrap(), "user_");
    }

    #[test]
    fn test_property_to_column_name() {
        let s = strategy();
        assert_eq!(s.property_to_column_name("createdAt").unwrap(), "created_at");
        assert_eq!(s.property_to_column_name("order").unwrap(), "order_");
        assert_eq!(s.property_to_column_name("default").unwrap(), "default_");
    }

    #[test]
    fn test_seventy_chars_fails() {
        let name = class_of_len(70);
        let err = strategy().class_to_table_name(&name).unwrap_err();
        assert_eq!(err.operation, Operation::ClassToTableName);
        assert_eq!(err.inputs, vec![name.clone()]);
        assert_eq!(err.candidate, name.to_lowercase());
        assert_eq!(err.length, 70);
        assert_eq!(err.limit, 63);
    }

    #[test]
    fn test_limit_boundary() {
        let s = strategy();
        assert_eq!(s.class_to_table_name(&class_of_len(63)).unwrap().len(), 63);
        assert!(s.class_to_table_name(&class_of_len(64)).is_err());
        assert_eq!(s.property_to_column_name(&"c".repeat(63)).unwrap().len(), 63);
        assert!(s.property_to_column_name(&"c".repeat(64)).is_err());
    }

    #[test]
    fn test_escape_counts_towards_limit() {
        let s = strategy().with_max_identifier_length(5);
        assert_eq!(s.class_to_table_name("Order").unwrap_err().candidate, "order_");
        assert_eq!(s.class_to_table_name("Order").unwrap_err().length, 6);

        let s = strategy().with_max_identifier_length(6);
        assert_eq!(s.class_to_table_name("Order").unwrap(), "order_");
    }

    #[test]
    fn test_join_column_name_not_escaped() {
        let s = strategy();
        assert_eq!(s.join_column_name("customer").unwrap(), "customer_id");
        // `order` is reserved, but join names are never escaped
        assert_eq!(s.join_column_name("order").unwrap(), "order_id");
        assert_eq!(s.property_to_column_name("order").unwrap(), "order_");
    }

    #[test]
    fn test_join_names_keep_reserved_words() {
        let s = strategy();
        assert_eq!(s.join_key_column_name("User", Some("order")).unwrap(), "user_order");
        assert_eq!(s.join_key_column_name("Order", None).unwrap(), "order_id");
        assert_eq!(s.join_table_name("Order", "Tag", "tags").unwrap(), "order_tags");
        assert_eq!(s.join_table_name("Tag", "Order", "user").unwrap(), "tag_user");
    }

    #[test]
    fn test_join_column_name_too_long() {
        let prop = "p".repeat(61);
        let err = strategy().join_column_name(&prop).unwrap_err();
        assert_eq!(err.operation, Operation::JoinColumnName);
        assert_eq!(err.length, 64);
        assert_eq!(strategy().join_column_name(&"p".repeat(60)).unwrap().len(), 63);
    }

    #[test]
    fn test_join_key_column_name_error_carries_both_inputs() {
        let entity = class_of_len(60);
        let err = strategy()
            .join_key_column_name(&entity, Some("uuid"))
            .unwrap_err();
        assert_eq!(err.inputs, vec![entity.clone(), "uuid".to_string()]);
        assert_eq!(err.length, 65);
        let msg = err.to_string();
        assert!(msg.contains(&entity));
        assert!(msg.contains("uuid"));
    }

    #[test]
    fn test_join_key_column_name_matches_index_name_schema_handling() {
        let s = strategy();
        assert_eq!(
            s.join_key_column_name("public.UserOrder", None).unwrap(),
            "user_order_id"
        );
        assert_eq!(
            s.index_name("public.user_order", &[], IndexKind::Primary).unwrap(),
            "user_order_pkey"
        );
    }

    #[test]
    fn test_join_key_column_name_limit_boundary() {
        let s = strategy();
        // 60 + "_id" = 63
        assert_eq!(s.join_key_column_name(&class_of_len(60), None).unwrap().len(), 63);
        let err = s.join_key_column_name(&class_of_len(61), None).unwrap_err();
        assert_eq!(err.operation, Operation::JoinKeyColumnName);
        assert_eq!(err.length, 64);
    }

    #[test]
    fn test_join_table_name_limit_boundary() {
        let s = strategy();
        // 31 + "_" + 31 = 63
        let name = s
            .join_table_name(&class_of_len(31), "Tag", &"t".repeat(31))
            .unwrap();
        assert_eq!(name.len(), 63);
        let err = s
            .join_table_name(&class_of_len(31), "Tag", &"t".repeat(32))
            .unwrap_err();
        assert_eq!(err.operation, Operation::JoinTableName);
        assert_eq!(err.length, 64);
    }

    #[test]
    fn test_join_table_name_error_carries_all_inputs() {
        let source = class_of_len(40);
        let err = strategy()
            .join_table_name(&source, "Tag", &"t".repeat(30))
            .unwrap_err();
        assert_eq!(err.operation, Operation::JoinTableName);
        assert_eq!(err.inputs.len(), 3);
        assert_eq!(err.inputs[1], "Tag");
        assert_eq!(err.length, 71);
    }

    #[test]
    fn test_index_name_checked() {
        let s = strategy();
        assert_eq!(s.index_name("user_", &[], IndexKind::Primary).unwrap(), "user__pkey");
        let col = "c".repeat(60);
        let err = s.index_name("t", &[col.as_str()], IndexKind::Unique).unwrap_err();
        assert_eq!(err.operation, Operation::IndexName);
        assert_eq!(err.inputs, vec!["t".to_string(), col]);
    }

    #[test]
    fn test_error_message() {
        let err = strategy()
            .join_table_name("A", "B", &"c".repeat(70))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "join_table_name A & B & {} => a_{} length 72 > max 63",
                "c".repeat(70),
                "c".repeat(70)
            )
        );
    }

    #[test]
    fn test_table_and_column_names_idempotent() {
        let s = strategy();
        for name in ["UserOrder", "Order", "createdAt", "select", "HTTPServer"] {
            let once = s.class_to_table_name(name).unwrap();
            assert_eq!(s.class_to_table_name(&once).unwrap(), once);
            let once = s.property_to_column_name(name).unwrap();
            assert_eq!(s.property_to_column_name(&once).unwrap(), once);
        }
    }

    #[test]
    fn test_join_names_not_idempotent() {
        // Join derivations append the reference column on every call.
        let s = strategy();
        let once = s.join_column_name("customer").unwrap();
        assert_eq!(s.join_column_name(&once).unwrap(), "customer_id_id");
        let once = s.join_key_column_name("Tag", None).unwrap();
        assert_eq!(s.join_key_column_name(&once, None).unwrap(), "tag_id_id");
    }

    #[test]
    fn test_byte_length() {
        // 31 two-byte characters: 31 chars but 62 bytes, plus "_id" = 65 bytes
        let prop = "é".repeat(31);
        let err = strategy().join_column_name(&prop).unwrap_err();
        assert_eq!(err.length, 65);
    }

    #[test]
    fn test_custom_convention() {
        struct Verbatim;
        impl NamingConvention for Verbatim {
            fn class_to_table_name(&self, class_name: &str) -> String {
                class_name.to_lowercase()
            }
            fn property_to_column_name(&self, property_name: &str) -> String {
                property_name.to_lowercase()
            }
            fn reference_column_name(&self) -> String {
                "pk".to_string()
            }
        }

        let s = PgNamingStrategy::new(Verbatim);
        assert_eq!(s.class_to_table_name("UserOrder").unwrap(), "userorder");
        assert_eq!(s.class_to_table_name("Table").unwrap(), "table_");
        assert_eq!(s.join_column_name("owner").unwrap(), "owner_pk");
    }

    #[test]
    fn test_strategy_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgNamingStrategy>();
    }
}
