//! Request and response shapes for the absence workflow boundary.
//!
//! Request fields are all optional so that a missing or mistyped field is
//! reported as `ValidationFailed` naming the field, instead of a generic
//! deserialization error.

use serde::{Deserialize, Serialize};

use crate::common::{AbsenceRequestId, Id};
use crate::domains::absences::errors::AbsenceError;
use crate::domains::absences::models::{AbsenceStatus, NewAbsence};

/// Outcome of a decision call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn from_approve(approve: bool) -> Self {
        if approve {
            Decision::Approve
        } else {
            Decision::Reject
        }
    }

    /// Terminal status this decision moves a pending request to
    pub fn status(self) -> AbsenceStatus {
        match self {
            Decision::Approve => AbsenceStatus::Approved,
            Decision::Reject => AbsenceStatus::Rejected,
        }
    }
}

/// Body of `POST /api/absences`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitAbsenceInput {
    pub group_id: Option<serde_json::Value>,
    pub session_id: Option<serde_json::Value>,
    pub reason: Option<serde_json::Value>,
}

impl SubmitAbsenceInput {
    /// Field-level validation. Existence of the group and session is checked
    /// later by the workflow, against the store.
    pub fn validate(self, max_reason_chars: usize) -> Result<NewAbsence, AbsenceError> {
        let group_id = require_id("group_id", self.group_id)?;
        let session_id = require_id("session_id", self.session_id)?;

        let reason = match self.reason {
            None | Some(serde_json::Value::Null) => String::new(),
            Some(serde_json::Value::String(s)) => s,
            Some(_) => return Err(AbsenceError::validation("reason must be a string")),
        };
        check_reason(&reason, max_reason_chars)?;

        Ok(NewAbsence {
            group_id,
            session_id,
            reason,
        })
    }
}

/// Body of `POST /api/absences/decide`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DecideAbsenceInput {
    pub request_id: Option<serde_json::Value>,
    pub approve: Option<serde_json::Value>,
}

impl DecideAbsenceInput {
    pub fn validate(self) -> Result<(AbsenceRequestId, Decision), AbsenceError> {
        let request_id = require_id("request_id", self.request_id)?;
        let approve = match self.approve {
            Some(serde_json::Value::Bool(b)) => b,
            None | Some(serde_json::Value::Null) => {
                return Err(AbsenceError::validation("approve is required"))
            }
            Some(_) => return Err(AbsenceError::validation("approve must be a boolean")),
        };
        Ok((request_id, Decision::from_approve(approve)))
    }
}

/// Query string of the list endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAbsencesQuery {
    pub status: Option<String>,
}

impl ListAbsencesQuery {
    pub fn validate(self) -> Result<Option<AbsenceStatus>, AbsenceError> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| AbsenceError::validation(format!("unknown status '{}'", raw))),
        }
    }
}

/// Response of a successful decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionResponse {
    pub message: String,
}

impl DecisionResponse {
    pub fn success() -> Self {
        Self {
            message: "success".to_string(),
        }
    }
}

/// Parse a path parameter into a typed id
pub fn parse_id<T>(field: &str, raw: &str) -> Result<Id<T>, AbsenceError> {
    let id = Id::<T>::parse(raw)
        .map_err(|_| AbsenceError::validation(format!("{} must be an integer", field)))?;
    if !id.is_valid() {
        return Err(AbsenceError::validation(format!("{} must be positive", field)));
    }
    Ok(id)
}

/// Reject reasons longer than the configured bound (counted in chars)
pub fn check_reason(reason: &str, max_reason_chars: usize) -> Result<(), AbsenceError> {
    let len = reason.chars().count();
    if len > max_reason_chars {
        return Err(AbsenceError::validation(format!(
            "reason is {} characters, at most {} allowed",
            len, max_reason_chars
        )));
    }
    Ok(())
}

fn require_id<T>(field: &str, value: Option<serde_json::Value>) -> Result<Id<T>, AbsenceError> {
    let raw = match value {
        None | Some(serde_json::Value::Null) => {
            return Err(AbsenceError::validation(format!("{} is required", field)))
        }
        Some(serde_json::Value::Number(n)) => n.as_i64(),
        Some(_) => None,
    };
    match raw {
        Some(v) if v > 0 => Ok(Id::from_i64(v)),
        Some(_) => Err(AbsenceError::validation(format!("{} must be positive", field))),
        None => Err(AbsenceError::validation(format!("{} must be an integer", field))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{GroupId, SessionId};
    use serde_json::json;

    fn submit(value: serde_json::Value) -> SubmitAbsenceInput {
        serde_json::from_value(value).unwrap()
    }

    fn message(err: AbsenceError) -> String {
        match err {
            AbsenceError::ValidationFailed(m) => m,
            other => panic!("expected ValidationFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_submit_valid() {
        let new = submit(json!({"group_id": 7, "session_id": 42, "reason": "sick"}))
            .validate(1000)
            .unwrap();
        assert_eq!(new.group_id, GroupId::from_i64(7));
        assert_eq!(new.session_id, SessionId::from_i64(42));
        assert_eq!(new.reason, "sick");
    }

    #[test]
    fn test_submit_reason_may_be_missing() {
        let new = submit(json!({"group_id": 7, "session_id": 42}))
            .validate(1000)
            .unwrap();
        assert_eq!(new.reason, "");
    }

    #[test]
    fn test_submit_field_errors() {
        let err = submit(json!({"session_id": 42})).validate(1000).unwrap_err();
        assert_eq!(message(err), "group_id is required");

        let err = submit(json!({"group_id": "seven", "session_id": 42}))
            .validate(1000)
            .unwrap_err();
        assert_eq!(message(err), "group_id must be an integer");

        let err = submit(json!({"group_id": 7, "session_id": 0}))
            .validate(1000)
            .unwrap_err();
        assert_eq!(message(err), "session_id must be positive");

        let err = submit(json!({"group_id": 7, "session_id": 1.5}))
            .validate(1000)
            .unwrap_err();
        assert_eq!(message(err), "session_id must be an integer");

        let err = submit(json!({"group_id": 7, "session_id": 42, "reason": 5}))
            .validate(1000)
            .unwrap_err();
        assert_eq!(message(err), "reason must be a string");
    }

    #[test]
    fn test_reason_bound_counts_chars() {
        // four chars, twelve bytes
        assert!(check_reason("ééé€", 4).is_ok());
        assert!(check_reason("ééé€x", 4).is_err());
    }

    #[test]
    fn test_decide_validation() {
        let input: DecideAbsenceInput =
            serde_json::from_value(json!({"request_id": 101, "approve": false})).unwrap();
        let (id, decision) = input.validate().unwrap();
        assert_eq!(id, AbsenceRequestId::from_i64(101));
        assert_eq!(decision, Decision::Reject);

        let input: DecideAbsenceInput =
            serde_json::from_value(json!({"request_id": 101, "approve": "yes"})).unwrap();
        assert_eq!(message(input.validate().unwrap_err()), "approve must be a boolean");

        let input: DecideAbsenceInput = serde_json::from_value(json!({"request_id": 101})).unwrap();
        assert_eq!(message(input.validate().unwrap_err()), "approve is required");
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id::<crate::common::Group>("group_id", "7").unwrap(), GroupId::from_i64(7));
        assert!(parse_id::<crate::common::Group>("group_id", "-7").is_err());
        assert!(parse_id::<crate::common::Group>("group_id", "abc").is_err());
    }

    #[test]
    fn test_list_query_status() {
        let query = ListAbsencesQuery {
            status: Some("approved".to_string()),
        };
        assert_eq!(query.validate().unwrap(), Some(AbsenceStatus::Approved));
        assert_eq!(ListAbsencesQuery::default().validate().unwrap(), None);
        let query = ListAbsencesQuery {
            status: Some("maybe".to_string()),
        };
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_decision_status() {
        assert_eq!(Decision::from_approve(true).status(), AbsenceStatus::Approved);
        assert_eq!(Decision::from_approve(false).status(), AbsenceStatus::Rejected);
    }
}
