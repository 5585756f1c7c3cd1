use nestforge_schema::RelationType;

/// Infer the cardinality of a foreign key from its column's constraints.
///
/// A foreign-key column that is also unique, or is itself the primary key,
/// can reference at most one row per owner: `OneToOne`. Anything else is
/// `ManyToOne`. The collection variants are never inferred.
pub fn infer_relation_type(is_unique: bool, is_primary_key: bool) -> RelationType {
    if is_unique || is_primary_key {
        RelationType::OneToOne
    } else {
        RelationType::ManyToOne
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_foreign_key_is_many_to_one() {
        assert_eq!(infer_relation_type(false, false), RelationType::ManyToOne);
    }

    #[test]
    fn test_unique_or_primary_key_is_one_to_one() {
        assert_eq!(infer_relation_type(true, false), RelationType::OneToOne);
        assert_eq!(infer_relation_type(false, true), RelationType::OneToOne);
        assert_eq!(infer_relation_type(true, true), RelationType::OneToOne);
    }

    #[test]
    fn test_collection_variants_never_inferred() {
        let inferred: Vec<_> = [(false, false), (true, false), (false, true), (true, true)]
            .into_iter()
            .map(|(u, p)| infer_relation_type(u, p))
            .collect();

        assert!(!inferred.contains(&RelationType::OneToMany));
        assert!(!inferred.contains(&RelationType::ManyToMany));
    }
}
