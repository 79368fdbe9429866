#[cfg(test)]
mod tests {
    use roster::db::entities::{self, Rule};

    #[test]
    fn test_registry_lists_all_entities() {
        let keys: Vec<&str> = entities::ALL.iter().map(|spec| spec.key).collect();
        assert_eq!(keys, ["teacher", "student", "group"]);
    }

    #[test]
    fn test_teacher_columns_are_in_declaration_order() {
        assert_eq!(
            entities::TEACHER.column_names(),
            ["f_fio", "f_phone", "f_email", "f_comment"]
        );
        assert_eq!(entities::STUDENT.column_names(), ["f_fio", "f_email", "f_comment"]);
        assert_eq!(entities::ST_GROUP.column_names(), ["f_title", "f_comment"]);
    }

    #[test]
    fn test_field_lookup_by_name_and_label() {
        let spec = &entities::TEACHER;
        assert_eq!(spec.field("f_email").unwrap().name, "f_email");
        assert_eq!(spec.field("Email").unwrap().name, "f_email");
        assert_eq!(spec.field("email").unwrap().name, "f_email");
        assert!(spec.field("nonsense").is_none());
        assert!(spec.field("id").is_none());
    }

    #[test]
    fn test_column_index_accounts_for_leading_id() {
        let spec = &entities::ST_GROUP;
        assert_eq!(spec.column_index("f_title"), Some(1));
        assert_eq!(spec.column_index("Comment"), Some(2));
        assert_eq!(spec.column_index("id"), None);
    }

    #[test]
    fn test_field_names_are_unique_per_entity() {
        for spec in entities::ALL {
            let mut names: Vec<&str> = spec.fields.iter().map(|f| f.name).collect();
            let total = names.len();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), total, "duplicate field in {}", spec.key);
            assert!(total > 0, "entity {} has no fields", spec.key);
        }
    }

    #[test]
    fn test_comment_fields_are_multiline_and_unvalidated() {
        for spec in entities::ALL {
            let comment = spec.field("f_comment").unwrap();
            assert!(comment.multiline);
            assert!(comment.rule.is_none());
        }
    }

    #[test]
    fn test_email_fields_carry_the_email_rule() {
        assert_eq!(entities::TEACHER.field("f_email").unwrap().rule, Some(Rule::Email));
        assert_eq!(entities::STUDENT.field("f_email").unwrap().rule, Some(Rule::Email));
    }
}
