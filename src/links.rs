//! Membership verification links against the Saudi Authority for
//! Accredited Valuers public register.

use crate::pipeline::types::Record;
use crate::schema::ABSENT;

const INDIVIDUAL_LOOKUP: &str =
    "https://taqeem.gov.sa/en/authority-members?sector=real_estate&search[name_or_membership]=";
const FACILITY_LOOKUP: &str =
    "https://taqeem.gov.sa/en/facilities?sector=real_estate&search[name_or_membership]=";

/// Register lookup URLs for a record's membership number, individual
/// and facility variants. `None` when no usable number was extracted.
pub fn membership_links(record: &Record) -> Option<MembershipLinks> {
    let number = record.get("membershipNumber")?;
    let number = match number {
        serde_json::Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() || trimmed == ABSENT {
                return None;
            }
            trimmed.to_string()
        }
        serde_json::Value::Number(n) => n.to_string(),
        _ => return None,
    };
    Some(MembershipLinks {
        individual: format!("{INDIVIDUAL_LOOKUP}{number}"),
        facility: format!("{FACILITY_LOOKUP}{number}"),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipLinks {
    pub individual: String,
    pub facility: String,
}
