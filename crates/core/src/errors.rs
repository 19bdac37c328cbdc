use thiserror::Error;

use crate::domain::stay::RangeError;
use crate::lifecycle::TransitionError;
use crate::pricing::{DraftError, SelectionError};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Draft(#[from] DraftError),
    #[error(transparent)]
    Range(#[from] RangeError),
}

impl DomainError {
    /// Stable token interface layers switch on to pick user-facing copy.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transition(TransitionError::IllegalTransition { .. }) => "illegal_transition",
            Self::Transition(TransitionError::NoOp { .. }) => "no_op_transition",
            Self::Selection(SelectionError::InvalidQuantity { .. }) => "invalid_quantity",
            Self::Selection(SelectionError::NegativeUnitPrice { .. }) => "negative_unit_price",
            Self::Selection(SelectionError::QuantityExceeded { .. }) => "quantity_exceeded",
            Self::Selection(SelectionError::InvalidOccupants { .. }) => "invalid_occupants",
            Self::Draft(DraftError::NoStayRange) => "no_stay_range",
            Self::Draft(DraftError::EmptySelection) => "empty_selection",
            Self::Range(RangeError::InvalidRange { .. }) => "invalid_range",
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("persistence failure: {0}")]
    Persistence(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request ({kind}): {message}")]
    BadRequest { kind: &'static str, message: String, correlation_id: String },
    #[error("not found: {message}")]
    NotFound { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => {
                "The request could not be processed. Check inputs and try again."
            }
            Self::NotFound { .. } => "The requested record does not exist.",
            Self::Internal { .. } => "An unexpected internal error occurred.",
        }
    }
}

impl ApplicationError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::BadRequest { correlation_id: id, .. }
            | InterfaceError::NotFound { correlation_id: id, .. }
            | InterfaceError::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        match value {
            ApplicationError::Domain(domain) => Self::BadRequest {
                kind: domain.kind(),
                message: domain.to_string(),
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::Persistence(message) => {
                Self::NotFound { message, correlation_id: "unassigned".to_owned() }
            }
            ApplicationError::Configuration(message) => {
                Self::Internal { message, correlation_id: "unassigned".to_owned() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::booking::BookingStatus;
    use crate::errors::{ApplicationError, DomainError, InterfaceError};
    use crate::lifecycle::TransitionError;
    use crate::pricing::DraftError;

    #[test]
    fn domain_errors_map_to_bad_request_with_a_stable_kind() {
        let domain = DomainError::from(TransitionError::NoOp { status: BookingStatus::Paid });
        let interface = ApplicationError::from(domain).into_interface("req-1");

        assert!(matches!(
            interface,
            InterfaceError::BadRequest {
                kind: "no_op_transition",
                ref correlation_id,
                ..
            } if correlation_id == "req-1"
        ));
        assert_eq!(
            interface.user_message(),
            "The request could not be processed. Check inputs and try again."
        );
    }

    #[test]
    fn every_draft_error_has_its_own_kind() {
        assert_eq!(DomainError::from(DraftError::NoStayRange).kind(), "no_stay_range");
        assert_eq!(DomainError::from(DraftError::EmptySelection).kind(), "empty_selection");
    }

    #[test]
    fn persistence_errors_surface_as_not_found() {
        let interface =
            ApplicationError::Persistence("unknown booking".to_owned()).into_interface("req-2");
        assert!(matches!(interface, InterfaceError::NotFound { .. }));
        assert_eq!(interface.user_message(), "The requested record does not exist.");
    }
}
