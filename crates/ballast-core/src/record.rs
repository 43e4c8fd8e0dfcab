use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Status {
    Active,
    Inactive,
    Pending,
}

/// One synthetic person in the dataset.
///
/// Field casing on the wire is camelCase to match the persisted document
/// format. `id` is fixed at generation time; every other field may be
/// replaced by a patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Unique id, v4 uuid shaped.
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub department: String,
    pub status: Status,
    /// Calendar date only, serialized `YYYY-MM-DD`.
    pub joined_date: NaiveDate,
    /// Full RFC 3339 timestamp.
    pub last_login: DateTime<Utc>,
    pub location: String,
    /// Plausible at generation time (30k to 150k); not re-validated on
    /// update.
    pub salary: i64,
    /// Plausible at generation time (1 to 10); not re-validated on update.
    pub performance: i64,
    pub bio: String,
}

/// Partial update for a single record.
///
/// Every supplied field replaces the stored one wholesale; every absent
/// field is left untouched. There is deliberately no `id` member: the target
/// id travels next to the patch, and an `id` key inside an update payload is
/// ignored rather than rejected, because clients tend to echo whole rows
/// back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl RecordPatch {
    /// True when no field is supplied; applying such a patch is a no-op.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.role.is_none()
            && self.department.is_none()
            && self.status.is_none()
            && self.joined_date.is_none()
            && self.last_login.is_none()
            && self.location.is_none()
            && self.salary.is_none()
            && self.performance.is_none()
            && self.bio.is_none()
    }

    /// Field-level merge: last write wins per field, absent fields keep
    /// their stored value.
    pub fn apply_to(&self, record: &mut Record) {
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(email) = &self.email {
            record.email = email.clone();
        }
        if let Some(role) = &self.role {
            record.role = role.clone();
        }
        if let Some(department) = &self.department {
            record.department = department.clone();
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(joined_date) = self.joined_date {
            record.joined_date = joined_date;
        }
        if let Some(last_login) = self.last_login {
            record.last_login = last_login;
        }
        if let Some(location) = &self.location {
            record.location = location.clone();
        }
        if let Some(salary) = self.salary {
            record.salary = salary;
        }
        if let Some(performance) = self.performance {
            record.performance = performance;
        }
        if let Some(bio) = &self.bio {
            record.bio = bio.clone();
        }
    }
}
