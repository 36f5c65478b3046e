//! Cost-center directory contract and derived display fields.
//!
//! The external controlling directory resolves a cost-center code to its
//! canonical metadata. Only the contract lives here; the reqwest client is
//! in `ssp-directory`, and tests substitute a stub through the
//! [`CostCenterDirectory`] trait.

use async_trait::async_trait;

/// Mail domain appended to the directory's responsible-party local part.
pub const RESPONSIBLE_MAIL_DOMAIN: &str = "bosch.com";

/// Canonical cost-center metadata returned by the directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CostCenterDetails {
    /// Full (possibly zero-padded) cost-center code.
    pub cost_center: String,
    /// Second organizational name part.
    pub name3: String,
    /// First organizational name part.
    pub name4: String,
    /// Department name; may be empty.
    pub department: String,
    /// Responsible party's email local part.
    pub responsible: String,
    /// Responsible party's work-office-mapping code.
    pub responsible_org_office: String,
}

impl CostCenterDetails {
    /// Cost-center display name: `"{Name4} {Name3} ({Department})"`, with
    /// the parenthesized department omitted when blank.
    pub fn display_name(&self) -> String {
        let base = format!("{} {}", self.name4.trim(), self.name3.trim())
            .trim()
            .to_string();
        let department = self.department.trim();
        if department.is_empty() {
            base
        } else {
            format!("{base} ({department})")
        }
    }

    /// Responsible party's email: lowercased local part at the fixed domain.
    pub fn responsible_email(&self) -> String {
        format!(
            "{}@{RESPONSIBLE_MAIL_DOMAIN}",
            self.responsible.trim().to_lowercase()
        )
    }
}

/// Directory lookup failure (unreachable endpoint or malformed payload).
///
/// Submit degrades to the manual-override path on this error; it is never
/// fatal there.
#[derive(Debug, thiserror::Error)]
#[error("Cost-center directory lookup failed: {0}")]
pub struct LookupError(pub String);

/// Lookup seam between the change workflow and the external directory.
#[async_trait]
pub trait CostCenterDirectory: Send + Sync {
    /// Resolve a cost-center code. `Ok(None)` means the directory has no
    /// entry for the code even after the widening retry.
    async fn lookup(&self, code: &str) -> Result<Option<CostCenterDetails>, LookupError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> CostCenterDetails {
        CostCenterDetails {
            cost_center: "0001234567".into(),
            name3: "Platform Services".into(),
            name4: "CI".into(),
            department: "CI/OSP".into(),
            responsible: "DOEJ".into(),
            responsible_org_office: "WOM-77".into(),
        }
    }

    #[test]
    fn display_name_includes_department_when_present() {
        assert_eq!(details().display_name(), "CI Platform Services (CI/OSP)");
    }

    #[test]
    fn display_name_omits_blank_department() {
        let mut d = details();
        d.department = "  ".into();
        assert_eq!(d.display_name(), "CI Platform Services");
    }

    #[test]
    fn responsible_email_is_lowercased_at_fixed_domain() {
        assert_eq!(details().responsible_email(), "doej@bosch.com");
    }
}
