//! Draft staging: turning user-submitted field values into a proposed-change
//! record with `original` snapshots taken from the live row.

use std::collections::BTreeMap;

use crate::fields::{clean_value, normalize_sc_on_save, EditableField};
use crate::platform::Platform;

/// Current (live) values of the editable fields, keyed by field.
///
/// Absent columns are represented by empty strings.
pub type CurrentValues = BTreeMap<EditableField, String>;

/// User-submitted values for a save or submit action.
///
/// Field values are raw as received; cleaning and normalization happen when
/// the draft is staged or the submission planned. The three manual fields
/// carry the cost-center override used when the directory cannot resolve a
/// code.
#[derive(Debug, Clone, Default)]
pub struct DraftValues {
    pub fields: BTreeMap<EditableField, String>,
    pub cost_center_name_manual: String,
    pub cost_center_responsible_manual: String,
    pub cost_center_responsible_wom_manual: String,
}

impl DraftValues {
    /// Cleaned value for a field; empty string when absent.
    pub fn cleaned(&self, field: EditableField) -> String {
        self.fields.get(&field).map(|v| clean_value(v)).unwrap_or_default()
    }
}

/// One staged field: the live value at save time plus the proposed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: EditableField,
    pub original: String,
    pub proposed: String,
}

/// A fully staged draft, ready to upsert into the proposal store.
///
/// `entries` always contains all eight editable fields in
/// [`EditableField::ALL`] order, so the upsert column list is static.
#[derive(Debug, Clone)]
pub struct StagedDraft {
    pub entries: Vec<FieldChange>,
    pub cost_center_name_manual: String,
    pub cost_center_responsible_manual: String,
    pub cost_center_responsible_wom_manual: String,
}

/// Stage a draft for persistence.
///
/// Originals come from the live row *at save time*, never from an earlier
/// draft, so repeated saves track drift in the authoritative record.
/// Proposed values are cleaned (placeholder quotes dropped) and SC codes
/// corrected for the platform.
pub fn stage_draft(
    platform: Platform,
    current: &CurrentValues,
    values: &DraftValues,
) -> StagedDraft {
    let entries = EditableField::ALL
        .iter()
        .map(|&field| {
            let original = current.get(&field).map(|v| clean_value(v)).unwrap_or_default();
            let proposed = normalize_sc_on_save(field, platform, &values.cleaned(field));
            FieldChange {
                field,
                original,
                proposed,
            }
        })
        .collect();

    StagedDraft {
        entries,
        cost_center_name_manual: clean_value(&values.cost_center_name_manual),
        cost_center_responsible_manual: clean_value(&values.cost_center_responsible_manual),
        cost_center_responsible_wom_manual: clean_value(&values.cost_center_responsible_wom_manual),
    }
}
