//! Proposed-change (draft) models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use ssp_core::draft::DraftValues;
use ssp_core::fields::EditableField;
use ssp_core::types::{DbId, Timestamp};

/// A row from the `proposed_changes` table: per-field original snapshot and
/// proposed value, plus the manual cost-center override fields.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProposedChange {
    pub id: DbId,
    pub sub_id: String,
    pub platform: String,
    pub i_sc_original: Option<String>,
    pub i_sc_proposed: Option<String>,
    pub a_sc_original: Option<String>,
    pub a_sc_proposed: Option<String>,
    pub c_sc_original: Option<String>,
    pub c_sc_proposed: Option<String>,
    pub organizational_unit_original: Option<String>,
    pub organizational_unit_proposed: Option<String>,
    pub environment_original: Option<String>,
    pub environment_proposed: Option<String>,
    pub cost_center_original: Option<String>,
    pub cost_center_proposed: Option<String>,
    pub it_owner_original: Option<String>,
    pub it_owner_proposed: Option<String>,
    pub person_related_original: Option<String>,
    pub person_related_proposed: Option<String>,
    pub cost_center_name_manual: Option<String>,
    pub cost_center_responsible_manual: Option<String>,
    pub cost_center_responsible_wom_manual: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProposedChange {
    /// Proposed value of a field; empty string for NULL columns.
    pub fn proposed(&self, field: EditableField) -> &str {
        let value = match field {
            EditableField::ISc => &self.i_sc_proposed,
            EditableField::ASc => &self.a_sc_proposed,
            EditableField::CSc => &self.c_sc_proposed,
            EditableField::OrganizationalUnit => &self.organizational_unit_proposed,
            EditableField::Environment => &self.environment_proposed,
            EditableField::CostCenter => &self.cost_center_proposed,
            EditableField::ItOwner => &self.it_owner_proposed,
            EditableField::PersonRelated => &self.person_related_proposed,
        };
        value.as_deref().unwrap_or_default()
    }

    /// Convert the stored draft back into planner input.
    pub fn draft_values(&self) -> DraftValues {
        let mut values = DraftValues::default();
        for field in EditableField::ALL {
            let proposed = self.proposed(field);
            if !proposed.is_empty() {
                values.fields.insert(field, proposed.to_string());
            }
        }
        values.cost_center_name_manual = self
            .cost_center_name_manual
            .clone()
            .unwrap_or_default();
        values.cost_center_responsible_manual = self
            .cost_center_responsible_manual
            .clone()
            .unwrap_or_default();
        values.cost_center_responsible_wom_manual = self
            .cost_center_responsible_wom_manual
            .clone()
            .unwrap_or_default();
        values
    }
}

/// Request body for saving a draft or submitting raw field values.
///
/// All fields optional; absent fields are treated as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DraftInput {
    pub i_sc: Option<String>,
    pub a_sc: Option<String>,
    pub c_sc: Option<String>,
    pub organizational_unit: Option<String>,
    pub environment: Option<String>,
    pub cost_center: Option<String>,
    pub it_owner: Option<String>,
    pub person_related: Option<String>,
    /// Manual cost-center override: display name.
    pub cc_name: Option<String>,
    /// Manual cost-center override: responsible party email.
    pub cc_responsible: Option<String>,
    /// Manual cost-center override: responsible party WOM code.
    pub cc_responsible_wom: Option<String>,
}

impl DraftInput {
    /// Convert the request body into planner input.
    pub fn draft_values(&self) -> DraftValues {
        let mut values = DraftValues::default();
        let pairs = [
            (EditableField::ISc, &self.i_sc),
            (EditableField::ASc, &self.a_sc),
            (EditableField::CSc, &self.c_sc),
            (EditableField::OrganizationalUnit, &self.organizational_unit),
            (EditableField::Environment, &self.environment),
            (EditableField::CostCenter, &self.cost_center),
            (EditableField::ItOwner, &self.it_owner),
            (EditableField::PersonRelated, &self.person_related),
        ];
        for (field, value) in pairs {
            if let Some(value) = value {
                values.fields.insert(field, value.clone());
            }
        }
        values.cost_center_name_manual = self.cc_name.clone().unwrap_or_default();
        values.cost_center_responsible_manual = self.cc_responsible.clone().unwrap_or_default();
        values.cost_center_responsible_wom_manual =
            self.cc_responsible_wom.clone().unwrap_or_default();
        values
    }
}
