//! Extra operations beyond create/edit/delete.
//!
//! A [`GuardedAction`] targets one row and is only allowed when a
//! predicate on that row holds. A [`BulkAction`] targets the whole
//! collection. Both always go through the controller, which owns
//! confirmation, notices, and the reload that follows.

use std::fmt;
use std::sync::Arc;

use schooladmin_core::traits::HttpMethod;
use schooladmin_entity::{Bill, Student};

type RowPredicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;
type RowMessage<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// A per-row operation issued against `{resource_path}/{id}/{suffix}`.
pub struct GuardedAction<T> {
    /// Name the action is invoked by.
    pub name: String,
    /// Verb.
    pub method: HttpMethod,
    /// Path segment appended after the row id.
    pub suffix: String,
    /// Parameters that must be present and non-empty.
    pub required_params: Vec<String>,
    /// Only rows passing this may run the action.
    pub guard: RowPredicate<T>,
    /// Shown when the guard refuses a row.
    pub refusal: String,
    /// Question asked before issuing the request; `None` skips asking.
    pub confirmation: Option<RowMessage<T>>,
    /// Notice posted on success.
    pub success: RowMessage<T>,
}

impl<T: 'static> GuardedAction<T> {
    /// An unguarded, unconfirmed action.
    pub fn new(name: impl Into<String>, method: HttpMethod, suffix: impl Into<String>) -> Self {
        let name = name.into();
        let done = format!("{name} done");
        Self {
            name,
            method,
            suffix: suffix.into(),
            required_params: Vec::new(),
            guard: Arc::new(|_: &T| true),
            refusal: "This action is not available for the selected row".to_string(),
            confirmation: None,
            success: Arc::new(move |_: &T| done.clone()),
        }
    }

    /// Restrict the action to rows for which `guard` holds.
    pub fn guarded_by(
        mut self,
        guard: impl Fn(&T) -> bool + Send + Sync + 'static,
        refusal: impl Into<String>,
    ) -> Self {
        self.guard = Arc::new(guard);
        self.refusal = refusal.into();
        self
    }

    /// Ask before running.
    pub fn confirmed_by(mut self, message: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.confirmation = Some(Arc::new(message));
        self
    }

    /// Notice to post on success.
    pub fn on_success(mut self, message: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.success = Arc::new(message);
        self
    }

    /// Require a request parameter.
    pub fn requires(mut self, param: impl Into<String>) -> Self {
        self.required_params.push(param.into());
        self
    }

    /// Whether `row` may run this action.
    pub fn allows(&self, row: &T) -> bool {
        (self.guard)(row)
    }
}

impl GuardedAction<Student> {
    /// Move a student up to the next grade level.
    pub fn promote() -> Self {
        Self::new("promote", HttpMethod::Post, "promote")
            .confirmed_by(|s: &Student| {
                format!(
                    "Promote {} to the next grade? Make sure the next level's class exists.",
                    s.name
                )
            })
            .on_success(|s: &Student| format!("{} has been promoted to the next level", s.name))
    }

    /// Activate a pending student account, placing it at `level`.
    pub fn activate() -> Self {
        Self::new("activate", HttpMethod::Post, "activate")
            .requires("level")
            .guarded_by(|s: &Student| !s.is_active, "Student is already active")
            .on_success(|s: &Student| format!("{} has been activated", s.name))
    }
}

impl GuardedAction<Bill> {
    /// Mark a bill as paid after checking the uploaded proof.
    pub fn verify_payment() -> Self {
        Self::new("verify", HttpMethod::Put, "pay")
            .guarded_by(|b: &Bill| b.status.can_verify(), "Bill is already paid")
            .confirmed_by(|b: &Bill| format!("Verify payment of bill {} as PAID?", b.bill_number))
            .on_success(|_| "Payment verified".to_string())
    }
}

impl<T> fmt::Debug for GuardedAction<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardedAction")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("suffix", &self.suffix)
            .field("required_params", &self.required_params)
            .field("confirmed", &self.confirmation.is_some())
            .finish()
    }
}

/// A collection-level operation issued against
/// `{resource_path}[/{suffix}]`, always confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkAction {
    /// Name the action is invoked by.
    pub name: String,
    /// Verb.
    pub method: HttpMethod,
    /// Optional path segment after the collection path.
    pub suffix: Option<String>,
    /// Question asked before issuing the request.
    pub confirmation: String,
    /// Notice on success when the server sends no `message`.
    pub success: String,
}

impl BulkAction {
    /// Ask the server to generate the timetable from teacher and class data.
    pub fn auto_generate() -> Self {
        Self {
            name: "auto-generate".to_string(),
            method: HttpMethod::Post,
            suffix: Some("auto-generate".to_string()),
            confirmation: "WARNING: this generates the schedule automatically from teacher and class data. Continue?".to_string(),
            success: "Schedule generated".to_string(),
        }
    }

    /// Delete every schedule entry.
    pub fn reset_all() -> Self {
        Self {
            name: "reset".to_string(),
            method: HttpMethod::Delete,
            suffix: None,
            confirmation: "DANGER: all schedule entries will be DELETED. Are you sure?".to_string(),
            success: "All schedules deleted".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn student(active: bool) -> Student {
        serde_json::from_value(json!({"id": 1, "name": "Ahmad", "isActive": active})).unwrap()
    }

    #[test]
    fn test_activate_guard() {
        let action = GuardedAction::<Student>::activate();
        assert!(action.allows(&student(false)));
        assert!(!action.allows(&student(true)));
        assert_eq!(action.required_params, vec!["level".to_string()]);
        assert!(action.confirmation.is_none());
    }

    #[test]
    fn test_promote_is_confirmed() {
        let action = GuardedAction::<Student>::promote();
        let ask = action.confirmation.as_ref().unwrap();
        assert!(ask(&student(true)).contains("Ahmad"));
        assert!(action.allows(&student(false)));
    }

    #[test]
    fn test_verify_payment_refuses_paid() {
        let paid: Bill =
            serde_json::from_value(json!({"id": 2, "amount": "1", "status": "Paid"})).unwrap();
        let action = GuardedAction::<Bill>::verify_payment();
        assert!(!action.allows(&paid));
        assert_eq!(action.method, HttpMethod::Put);
    }
}
