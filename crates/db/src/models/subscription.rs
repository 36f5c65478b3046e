//! Subscription row model, shared across the three platform tables.

use serde::Serialize;
use sqlx::FromRow;

use ssp_core::draft::CurrentValues;
use ssp_core::fields::EditableField;
use ssp_core::types::ReviewDate;

/// One subscription, read with logical column aliases so the same struct
/// covers `azure_assets`, `aws_assets`, and `gcp_assets`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Subscription {
    /// Platform-specific natural key (subscription/account/project id).
    pub id: String,
    pub name: Option<String>,
    pub management_group_oe: Option<String>,
    pub it_owner: Option<String>,
    pub it_owner_wom: Option<String>,
    pub cost_center: Option<String>,
    pub cost_center_name: Option<String>,
    pub cost_center_responsible: Option<String>,
    pub cost_center_responsible_wom: Option<String>,
    pub environment: Option<String>,
    pub i_sc: Option<String>,
    pub a_sc: Option<String>,
    pub c_sc: Option<String>,
    pub person_related: Option<String>,
    pub last_review_date: Option<ReviewDate>,
}

impl Subscription {
    /// Current value of an editable field; empty string for NULL columns.
    pub fn field(&self, field: EditableField) -> &str {
        let value = match field {
            EditableField::ISc => &self.i_sc,
            EditableField::ASc => &self.a_sc,
            EditableField::CSc => &self.c_sc,
            EditableField::OrganizationalUnit => &self.management_group_oe,
            EditableField::Environment => &self.environment,
            EditableField::CostCenter => &self.cost_center,
            EditableField::ItOwner => &self.it_owner,
            EditableField::PersonRelated => &self.person_related,
        };
        value.as_deref().unwrap_or_default()
    }

    /// Snapshot of all editable fields, as the draft and submit logic
    /// consume them.
    pub fn current_values(&self) -> CurrentValues {
        EditableField::ALL
            .iter()
            .map(|&f| (f, self.field(f).to_string()))
            .collect()
    }
}
