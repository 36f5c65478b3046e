//! The submission planner.
//!
//! Given the live record, the draft (or raw request values), and the outcome
//! of the directory lookup, decide what a Submit does to each store:
//! which fields are written to the subscription table, whether an approval
//! ticket is staged, and whether the draft is consumed. The planner is pure;
//! `ssp-api::workflow` executes the plan in one transaction.

use crate::costcenter::CostCenterDetails;
use crate::draft::{CurrentValues, DraftValues};
use crate::fields::{normalize_on_submit, EditableField};
use crate::platform::Platform;

/// A staged cost-center change, destined for the approval gate.
///
/// These values are written to the approval ticket only; the subscription
/// table keeps its current cost-center fields until the ticket is approved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostCenterChange {
    pub new_code: String,
    pub responsible: String,
    pub responsible_wom: String,
    pub name: String,
    /// Whether the change was resolved by the directory or taken from the
    /// manually entered override fields.
    pub from_directory: bool,
}

/// Everything a Submit will do, decided up front.
#[derive(Debug, Clone, Default)]
pub struct SubmissionPlan {
    /// Non-cost-center field updates to apply to the subscription table,
    /// normalized and with empty values already skipped.
    pub updates: Vec<(EditableField, String)>,
    /// The new IT owner, when the staged owner differs from the live one.
    /// Triggers a WOM reference lookup in the executor.
    pub owner_change: Option<String>,
    /// Cost-center change staged for the approval gate, if any.
    pub cost_center: Option<CostCenterChange>,
    /// The draft is retained exactly when a cost-center change was staged;
    /// its manual WOM field may still be needed when the ticket is resolved.
    pub retain_draft: bool,
}

/// The proposed cost-center code, when it differs from the live one.
///
/// The executor calls the directory only for this code; an unchanged or
/// empty code never triggers a lookup.
pub fn proposed_cost_center(current: &CurrentValues, values: &DraftValues) -> Option<String> {
    let proposed = values.cleaned(EditableField::CostCenter);
    let live = current
        .get(&EditableField::CostCenter)
        .map(|v| v.trim())
        .unwrap_or_default();
    (!proposed.is_empty() && proposed != live).then_some(proposed)
}

/// Build the submission plan.
///
/// `lookup` is the directory outcome for the proposed cost-center code:
/// `None` both when no lookup was needed and when the directory exhausted
/// its retries or failed. A lookup answer with a blank responsible party is
/// treated as unusable, falling back to the manual override like a miss.
/// The cost-center change is dropped silently when neither path yields a
/// responsible party and WOM.
pub fn plan(
    platform: Platform,
    current: &CurrentValues,
    values: &DraftValues,
    lookup: Option<&CostCenterDetails>,
) -> SubmissionPlan {
    let mut updates = Vec::new();
    let mut owner_change = None;

    for field in EditableField::ALL {
        if field == EditableField::CostCenter {
            continue;
        }
        let value = values.cleaned(field);
        if value.is_empty() {
            continue;
        }
        let value = normalize_on_submit(field, platform, &value);
        if field == EditableField::ItOwner {
            let live = current
                .get(&EditableField::ItOwner)
                .map(|v| v.trim())
                .unwrap_or_default();
            if value != live {
                owner_change = Some(value.clone());
            }
        }
        updates.push((field, value));
    }

    let cost_center = proposed_cost_center(current, values).and_then(|new_code| {
        match lookup {
            Some(details) if !details.responsible.trim().is_empty() => Some(CostCenterChange {
                new_code,
                responsible: details.responsible_email(),
                responsible_wom: details.responsible_org_office.trim().to_string(),
                name: details.display_name(),
                from_directory: true,
            }),
            _ => {
                // Manual override needs both the responsible party and WOM;
                // otherwise the cost-center change is dropped for this
                // submission.
                let responsible = values.cost_center_responsible_manual.trim();
                let wom = values.cost_center_responsible_wom_manual.trim();
                (!responsible.is_empty() && !wom.is_empty()).then(|| CostCenterChange {
                    new_code,
                    responsible: responsible.to_string(),
                    responsible_wom: wom.to_string(),
                    name: values.cost_center_name_manual.trim().to_string(),
                    from_directory: false,
                })
            }
        }
    });

    SubmissionPlan {
        updates,
        owner_change,
        retain_draft: cost_center.is_some(),
        cost_center,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current() -> CurrentValues {
        let mut map = CurrentValues::new();
        map.insert(EditableField::ItOwner, "a@x.com".to_string());
        map.insert(EditableField::CostCenter, "1000000001".to_string());
        map.insert(EditableField::OrganizationalUnit, "OU-1".to_string());
        map
    }

    fn values_with(field: EditableField, value: &str) -> DraftValues {
        let mut values = DraftValues::default();
        values.fields.insert(field, value.to_string());
        values
    }

    fn lookup_details() -> CostCenterDetails {
        CostCenterDetails {
            cost_center: "1000000099".into(),
            name3: "Services".into(),
            name4: "CI".into(),
            department: "OSP".into(),
            responsible: "DOEJ".into(),
            responsible_org_office: "WOM-9".into(),
        }
    }

    #[test]
    fn unchanged_cost_center_needs_no_lookup() {
        let values = values_with(EditableField::CostCenter, "1000000001");
        assert_eq!(proposed_cost_center(&current(), &values), None);
    }

    #[test]
    fn changed_cost_center_is_proposed() {
        let values = values_with(EditableField::CostCenter, "1000000099");
        assert_eq!(
            proposed_cost_center(&current(), &values),
            Some("1000000099".to_string())
        );
    }

    #[test]
    fn cost_center_never_appears_in_staged_updates() {
        let values = values_with(EditableField::CostCenter, "1000000099");
        let plan = plan(Platform::Azure, &current(), &values, Some(&lookup_details()));
        assert!(plan
            .updates
            .iter()
            .all(|(f, _)| *f != EditableField::CostCenter));
    }

    #[test]
    fn directory_hit_stages_derived_cost_center_change() {
        let values = values_with(EditableField::CostCenter, "1000000099");
        let plan = plan(Platform::Azure, &current(), &values, Some(&lookup_details()));
        let cc = plan.cost_center.expect("change staged");
        assert_eq!(cc.new_code, "1000000099");
        assert_eq!(cc.responsible, "doej@bosch.com");
        assert_eq!(cc.responsible_wom, "WOM-9");
        assert_eq!(cc.name, "CI Services (OSP)");
        assert!(cc.from_directory);
        assert!(plan.retain_draft);
    }

    #[test]
    fn lookup_miss_with_manual_override_stages_manual_change() {
        let mut values = values_with(EditableField::CostCenter, "1000000099");
        values.cost_center_responsible_manual = "m@x.com".into();
        values.cost_center_responsible_wom_manual = "WOM-5".into();
        values.cost_center_name_manual = "Manual Name".into();

        let plan = plan(Platform::Azure, &current(), &values, None);
        let cc = plan.cost_center.expect("manual change staged");
        assert_eq!(cc.responsible, "m@x.com");
        assert_eq!(cc.responsible_wom, "WOM-5");
        assert_eq!(cc.name, "Manual Name");
        assert!(!cc.from_directory);
        assert!(plan.retain_draft);
    }

    #[test]
    fn lookup_miss_without_full_manual_override_drops_the_change() {
        // Responsible present but WOM blank: still dropped.
        let mut values = values_with(EditableField::CostCenter, "1000000099");
        values.cost_center_responsible_manual = "m@x.com".into();

        let plan = plan(Platform::Azure, &current(), &values, None);
        assert!(plan.cost_center.is_none());
        assert!(!plan.retain_draft);
    }

    #[test]
    fn directory_answer_without_responsible_falls_back_to_manual() {
        let mut details = lookup_details();
        details.responsible = " ".into();
        let mut values = values_with(EditableField::CostCenter, "1000000099");
        values.cost_center_responsible_manual = "m@x.com".into();
        values.cost_center_responsible_wom_manual = "WOM-5".into();

        let plan = plan(Platform::Azure, &current(), &values, Some(&details));
        let cc = plan.cost_center.expect("manual fallback staged");
        assert!(!cc.from_directory);
        assert_eq!(cc.responsible, "m@x.com");
    }

    #[test]
    fn owner_change_is_detected_only_when_value_differs() {
        let values = values_with(EditableField::ItOwner, "b@x.com");
        let plan = plan(Platform::Azure, &current(), &values, None);
        assert_eq!(plan.owner_change.as_deref(), Some("b@x.com"));

        let values = values_with(EditableField::ItOwner, "a@x.com");
        let plan = super::plan(Platform::Azure, &current(), &values, None);
        assert_eq!(plan.owner_change, None);
        // The unchanged owner is still staged as an update.
        assert!(plan
            .updates
            .iter()
            .any(|(f, v)| *f == EditableField::ItOwner && v == "a@x.com"));
    }

    #[test]
    fn empty_and_placeholder_values_are_skipped() {
        let mut values = DraftValues::default();
        values.fields.insert(EditableField::ISc, "'".to_string());
        values
            .fields
            .insert(EditableField::OrganizationalUnit, "  ".to_string());
        let plan = plan(Platform::Azure, &current(), &values, None);
        assert!(plan.updates.is_empty());
    }

    #[test]
    fn sc_codes_are_prefix_normalized_in_staged_updates() {
        let values = values_with(EditableField::ISc, "SC42");
        let plan = plan(Platform::Gcp, &current(), &values, None);
        assert_eq!(
            plan.updates,
            vec![(EditableField::ISc, "I-SC42".to_string())]
        );
    }

    #[test]
    fn no_cost_center_change_means_draft_is_consumed() {
        let values = values_with(EditableField::OrganizationalUnit, "OU-2");
        let plan = plan(Platform::Azure, &current(), &values, None);
        assert!(!plan.retain_draft);
        assert!(plan.cost_center.is_none());
    }
}
