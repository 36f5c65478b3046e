/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Review dates are calendar dates, no time component.
pub type ReviewDate = chrono::NaiveDate;
