use std::collections::BTreeMap;

use crate::domain::{CategorySummary, Emission, EmissionRecord, EmissionSummary, ScopeSummary};

/// Bucket for records missing a scope or category. A defined fallback, not an
/// error: upstream data is assumed pre-validated and the tolerance is
/// deliberate.
pub const UNKNOWN_BUCKET: &str = "unknown";

/// Group records by scope, then by category within each scope, summing values
/// at every level. Pure function of its input; plain f64 addition, no
/// rounding, no unit conversion. Output ordering is not part of the contract.
pub fn aggregate(records: &[EmissionRecord]) -> EmissionSummary {
    let mut by_scope: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();

    for record in records {
        let scope = record
            .scope
            .map(|s| s.label().to_string())
            .unwrap_or_else(|| UNKNOWN_BUCKET.to_string());
        let category = record
            .category
            .clone()
            .unwrap_or_else(|| UNKNOWN_BUCKET.to_string());

        *by_scope.entry(scope).or_default().entry(category).or_insert(0.0) += record.value;
    }

    let mut total = 0.0;
    let scopes = by_scope
        .into_iter()
        .map(|(scope, categories)| {
            let category_breakdown: Vec<CategorySummary> = categories
                .into_iter()
                .map(|(category, value)| CategorySummary { category, emission: Emission::new(value) })
                .collect();
            let scope_total: f64 = category_breakdown.iter().map(|c| c.emission.value).sum();
            total += scope_total;
            ScopeSummary { scope, emission: Emission::new(scope_total), category_breakdown }
        })
        .collect();

    EmissionSummary { total_emissions: Emission::new(total), scopes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmissionScope, EMISSION_UNIT};
    use uuid::Uuid;

    fn record(scope: Option<EmissionScope>, category: Option<&str>, value: f64) -> EmissionRecord {
        EmissionRecord {
            organization_id: Uuid::nil(),
            data_source_id: Uuid::nil(),
            scope,
            category: category.map(String::from),
            value,
        }
    }

    fn scope_by_label<'a>(summary: &'a EmissionSummary, label: &str) -> &'a ScopeSummary {
        summary
            .scopes
            .iter()
            .find(|s| s.scope == label)
            .unwrap_or_else(|| panic!("missing scope {label}"))
    }

    fn category_value(scope: &ScopeSummary, label: &str) -> f64 {
        scope
            .category_breakdown
            .iter()
            .find(|c| c.category == label)
            .unwrap_or_else(|| panic!("missing category {label}"))
            .emission
            .value
    }

    #[test]
    fn empty_input_yields_zero_total_and_no_scopes() {
        let summary = aggregate(&[]);
        assert_eq!(summary.total_emissions.value, 0.0);
        assert_eq!(summary.total_emissions.unit, EMISSION_UNIT);
        assert!(summary.scopes.is_empty());
    }

    #[test]
    fn groups_and_sums_by_scope_and_category() {
        let records = vec![
            record(Some(EmissionScope::Scope1), Some("c1"), 10.0),
            record(Some(EmissionScope::Scope1), Some("c2"), 20.0),
            record(Some(EmissionScope::Scope2), Some("c3"), 5.0),
        ];
        let summary = aggregate(&records);

        assert_eq!(summary.total_emissions.value, 35.0);

        let scope1 = scope_by_label(&summary, "Scope 1");
        assert_eq!(scope1.emission.value, 30.0);
        assert_eq!(category_value(scope1, "c1"), 10.0);
        assert_eq!(category_value(scope1, "c2"), 20.0);

        let scope2 = scope_by_label(&summary, "Scope 2");
        assert_eq!(scope2.emission.value, 5.0);
        assert_eq!(category_value(scope2, "c3"), 5.0);
    }

    #[test]
    fn missing_scope_and_category_fall_back_to_unknown() {
        let records = vec![
            record(None, None, 3.0),
            record(None, Some("travel"), 4.0),
            record(Some(EmissionScope::Scope3), None, 2.0),
        ];
        let summary = aggregate(&records);

        let unknown = scope_by_label(&summary, UNKNOWN_BUCKET);
        assert_eq!(unknown.emission.value, 7.0);
        assert_eq!(category_value(unknown, UNKNOWN_BUCKET), 3.0);
        assert_eq!(category_value(unknown, "travel"), 4.0);

        let scope3 = scope_by_label(&summary, "Scope 3");
        assert_eq!(category_value(scope3, UNKNOWN_BUCKET), 2.0);
    }

    #[test]
    fn total_is_invariant_under_permutation() {
        let records = vec![
            record(Some(EmissionScope::Scope1), Some("fleet"), 1.5),
            record(Some(EmissionScope::Scope2), Some("electricity"), 2.25),
            record(Some(EmissionScope::Scope1), Some("fleet"), 0.75),
            record(None, Some("misc"), 4.0),
            record(Some(EmissionScope::Scope3), None, 8.5),
        ];

        let baseline = aggregate(&records);

        // A few hand-rolled permutations; grouping must not depend on order
        let permutations: Vec<Vec<usize>> =
            vec![vec![4, 3, 2, 1, 0], vec![2, 0, 4, 1, 3], vec![1, 4, 0, 3, 2]];
        for perm in permutations {
            let shuffled: Vec<EmissionRecord> =
                perm.iter().map(|&i| records[i].clone()).collect();
            let summary = aggregate(&shuffled);
            assert_eq!(summary.total_emissions.value, baseline.total_emissions.value);
            for scope in &baseline.scopes {
                let other = scope_by_label(&summary, &scope.scope);
                assert_eq!(other.emission.value, scope.emission.value);
            }
        }
    }

    #[test]
    fn scope_totals_decompose_into_category_sums() {
        let records = vec![
            record(Some(EmissionScope::Scope1), Some("a"), 1.0),
            record(Some(EmissionScope::Scope1), Some("b"), 2.0),
            record(Some(EmissionScope::Scope2), Some("c"), 3.0),
            record(None, None, 4.0),
        ];
        let summary = aggregate(&records);

        let mut scope_sum = 0.0;
        for scope in &summary.scopes {
            let category_sum: f64 =
                scope.category_breakdown.iter().map(|c| c.emission.value).sum();
            assert_eq!(scope.emission.value, category_sum, "scope {}", scope.scope);
            scope_sum += scope.emission.value;
        }
        assert_eq!(summary.total_emissions.value, scope_sum);
    }
}
