// metaindex-core/src/domain/search/test_case.rs
//
// Test case specific part of the search document. Lookups are done by the
// application layer; everything here works on already resolved entities.

use serde_json::Value;

use super::document::{
    DEFAULT_EXCLUDED_FIELDS, SearchDocument, owners_with_display_name, parse_followers, put,
    remove_fields,
};
use super::fields::{self, FieldWeights};
use super::suggest::SearchSuggest;
use crate::domain::catalog::{EntityLink, TEST_CASE, TestCase, TestDefinition, fqn};
use crate::domain::error::DomainError;

pub const FQN_SUGGEST_WEIGHT: u32 = 5;
pub const NAME_SUGGEST_WEIGHT: u32 = 10;

/// Removed from test case documents and from every embedded test suite.
pub const EXCLUDED_FIELDS: [&str; 2] = ["changeDescription", "failedRowsSample"];

pub fn remove_non_indexable_fields(doc: &mut SearchDocument) {
    remove_fields(doc, &DEFAULT_EXCLUDED_FIELDS);
    remove_fields(doc, &EXCLUDED_FIELDS);

    if let Some(Value::Array(suites)) = doc.get_mut("testSuites") {
        for suite in suites.iter_mut() {
            if let Value::Object(suite) = suite {
                remove_fields(suite, &DEFAULT_EXCLUDED_FIELDS);
                remove_fields(suite, &EXCLUDED_FIELDS);
            }
        }
    }
}

pub fn suggestions(test_case: &TestCase) -> Vec<SearchSuggest> {
    vec![
        SearchSuggest::new(&test_case.fully_qualified_name, FQN_SUGGEST_WEIGHT),
        SearchSuggest::new(&test_case.name, NAME_SUGGEST_WEIGHT),
    ]
}

/// Writes the fields derived from the test case and its definition.
/// Returns the parsed entity link for the table resolution step.
pub fn put_test_case_fields(
    doc: &mut SearchDocument,
    test_case: &TestCase,
    definition: &TestDefinition,
) -> Result<EntityLink, DomainError> {
    let suggest = suggestions(test_case);
    let inputs: Vec<&str> = suggest.iter().map(|s| s.input.as_str()).collect();

    put(doc, "fqnParts", fqn::fqn_parts(&test_case.fully_qualified_name, &inputs)?)?;
    put(doc, "suggest", &suggest)?;
    put(doc, "entityType", TEST_CASE)?;
    put(doc, "owners", owners_with_display_name(&test_case.owners))?;
    put(doc, "tags", &test_case.tags)?;
    put(doc, "testPlatforms", &definition.test_platforms)?;
    put(doc, "dataQualityDimension", definition.data_quality_dimension)?;
    put(doc, "followers", parse_followers(&test_case.followers))?;
    put(doc, "testCaseType", definition.entity_type)?;

    let link = EntityLink::parse(&test_case.entity_link)?;
    put(doc, "originEntityFQN", &link.entity_fqn)?;

    Ok(link)
}

/// Field boosts for test case queries.
pub fn search_fields() -> FieldWeights {
    let mut weights = fields::default_fields();
    weights.insert("testSuites.fullyQualifiedName".into(), 10.0);
    weights.insert("testSuites.name".into(), 10.0);
    weights.insert("testSuites.description".into(), 1.0);
    weights.insert("entityLink".into(), 3.0);
    weights.insert("originEntityFQN".into(), 10.0);
    weights
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::catalog::{
        DataQualityDimension, EntityReference, TestDefinitionEntityType, TestPlatform,
    };
    use serde_json::json;
    use uuid::Uuid;

    fn test_case(entity_link: &str) -> TestCase {
        TestCase {
            id: Uuid::new_v4(),
            name: "amount_positive".into(),
            fully_qualified_name: "svc.db.sch.orders.amount.amount_positive".into(),
            display_name: None,
            description: None,
            entity_link: entity_link.into(),
            test_definition: EntityReference::new(Uuid::new_v4(), "testDefinition"),
            test_suites: vec![],
            tags: vec![],
            owners: vec![EntityReference::new(Uuid::new_v4(), "user").with_name("bob", "bob")],
            followers: vec![],
            change_description: None,
            failed_rows_sample: None,
            version: None,
            updated_at: None,
            updated_by: None,
            deleted: false,
        }
    }

    fn definition() -> TestDefinition {
        TestDefinition {
            id: Uuid::new_v4(),
            name: "columnValuesToBeBetween".into(),
            fully_qualified_name: None,
            description: None,
            test_platforms: vec![TestPlatform::OpenMetadata],
            data_quality_dimension: Some(DataQualityDimension::Accuracy),
            entity_type: TestDefinitionEntityType::Column,
            deleted: false,
        }
    }

    #[test]
    fn test_suggestions_weights() {
        let tc = test_case("column::svc.db.sch.orders.amount");
        let suggest = suggestions(&tc);
        assert_eq!(suggest.len(), 2);
        assert_eq!(suggest[0], SearchSuggest::new(&tc.fully_qualified_name, 5));
        assert_eq!(suggest[1], SearchSuggest::new("amount_positive", 10));
    }

    #[test]
    fn test_put_test_case_fields() -> anyhow::Result<()> {
        let tc = test_case("<#E::table::svc.db.sch.orders::columns::amount>");
        let mut doc = SearchDocument::new();
        let link = put_test_case_fields(&mut doc, &tc, &definition())?;

        assert_eq!(link.entity_fqn, "svc.db.sch.orders");
        assert_eq!(doc["originEntityFQN"], json!("svc.db.sch.orders"));
        assert_eq!(doc["entityType"], json!("testCase"));
        assert_eq!(doc["testPlatforms"], json!(["OpenMetadata"]));
        assert_eq!(doc["dataQualityDimension"], json!("Accuracy"));
        assert_eq!(doc["testCaseType"], json!("COLUMN"));
        assert_eq!(doc["owners"][0]["displayName"], json!("bob"));
        assert_eq!(doc["followers"], json!([]));

        let parts = doc["fqnParts"].as_array().unwrap();
        assert!(parts.contains(&json!("svc.db.sch.orders")));
        assert!(parts.contains(&json!("amount_positive")));
        Ok(())
    }

    #[test]
    fn test_malformed_entity_link_fails() {
        let tc = test_case("not a link");
        let mut doc = SearchDocument::new();
        let result = put_test_case_fields(&mut doc, &tc, &definition());
        assert!(matches!(result, Err(DomainError::MalformedEntityLink(_))));
    }

    #[test]
    fn test_remove_non_indexable_fields_top_level_and_nested() {
        let mut doc = json!({
            "name": "t",
            "changeDescription": { "fieldsAdded": [] },
            "failedRowsSample": { "rows": [[1]] },
            "testSuites": [
                { "name": "s1", "changeDescription": {}, "failedRowsSample": {} },
                { "name": "s2", "description": "kept" },
                null
            ]
        })
        .as_object()
        .cloned()
        .unwrap();

        remove_non_indexable_fields(&mut doc);

        assert!(!doc.contains_key("changeDescription"));
        assert!(!doc.contains_key("failedRowsSample"));
        let suites = doc["testSuites"].as_array().unwrap();
        assert_eq!(suites[0], json!({ "name": "s1" }));
        assert_eq!(suites[1], json!({ "name": "s2", "description": "kept" }));
        assert_eq!(suites[2], Value::Null);
    }

    #[test]
    fn test_search_fields_merge_baseline() {
        let weights = search_fields();
        assert_eq!(weights["testSuites.fullyQualifiedName"], 10.0);
        assert_eq!(weights["testSuites.name"], 10.0);
        assert_eq!(weights["testSuites.description"], 1.0);
        assert_eq!(weights["entityLink"], 3.0);
        assert_eq!(weights["originEntityFQN"], 10.0);
        assert_eq!(weights["description"], 2.0);
    }
}
