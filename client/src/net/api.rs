//! REST endpoint declarations, grouped by backend resource.
//!
//! Each function only describes a request (method, path, query, body); the
//! [`Gateway`](super::gateway::Gateway) sends it. Builders that take an update
//! payload validate it first so malformed bodies never leave the client.
//!
//! ERROR HANDLING
//! ==============
//! Builders with bodies return `Result` so validation and encoding failures
//! surface as [`ApiError`] before any network traffic.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::gateway::{ApiError, ApiRequest};

/// `/auth/*`: credential exchange.
pub mod auth {
    use super::{ApiError, ApiRequest};
    use crate::net::types::{LoginRequest, RegisterData};

    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if the body cannot be serialized.
    pub fn login(email: &str, password: &str) -> Result<ApiRequest, ApiError> {
        let body = LoginRequest { email: email.to_owned(), password: password.to_owned() };
        Ok(ApiRequest::post("/auth/login").json(&body)?.credential_exchange())
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Invalid`] when a required field is missing.
    pub fn register(data: &RegisterData) -> Result<ApiRequest, ApiError> {
        data.validate().map_err(|e| ApiError::Invalid(e.to_owned()))?;
        Ok(ApiRequest::post("/auth/register").json(data)?.credential_exchange())
    }

    pub fn refresh() -> ApiRequest {
        ApiRequest::post("/auth/refresh")
    }
}

/// `/appointments`: booking CRUD.
pub mod appointments {
    use super::{ApiError, ApiRequest, invalid};
    use crate::net::types::{AppointmentQuery, AppointmentUpdate, NewAppointment};

    /// # Errors
    ///
    /// Returns [`ApiError::Invalid`] for a blank or reversed time slot.
    pub fn create(appointment: &NewAppointment) -> Result<ApiRequest, ApiError> {
        appointment.validate().map_err(invalid)?;
        ApiRequest::post("/appointments").json(appointment)
    }

    pub fn list(query: &AppointmentQuery) -> ApiRequest {
        ApiRequest::get("/appointments").query(query.to_pairs())
    }

    pub fn get(id: i64) -> ApiRequest {
        ApiRequest::get(format!("/appointments/{id}"))
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Invalid`] for an empty or inconsistent update.
    pub fn update(id: i64, update: &AppointmentUpdate) -> Result<ApiRequest, ApiError> {
        update.validate().map_err(invalid)?;
        ApiRequest::patch(format!("/appointments/{id}")).json(update)
    }

    /// The backend reads the cancellation reason from the query string.
    pub fn cancel(id: i64, reason: &str) -> ApiRequest {
        let request = ApiRequest::delete(format!("/appointments/{id}"));
        let reason = reason.trim();
        if reason.is_empty() {
            return request;
        }
        request.query(vec![("reason".to_owned(), reason.to_owned())])
    }
}

/// `/staff`: staff directory, availability, and schedules.
pub mod staff {
    use super::{ApiError, ApiRequest, invalid};
    use crate::net::types::ScheduleUpdate;

    pub fn list() -> ApiRequest {
        ApiRequest::get("/staff")
    }

    pub fn get(id: i64) -> ApiRequest {
        ApiRequest::get(format!("/staff/{id}"))
    }

    /// `date` is an ISO-8601 calendar date (`YYYY-MM-DD`).
    pub fn availability(id: i64, date: &str) -> ApiRequest {
        ApiRequest::get(format!("/staff/{id}/availability")).query(vec![("date".to_owned(), date.to_owned())])
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Invalid`] when the schedule does not validate.
    pub fn update_schedule(id: i64, update: &ScheduleUpdate) -> Result<ApiRequest, ApiError> {
        update.validate().map_err(invalid)?;
        ApiRequest::patch(format!("/staff/{id}/schedule")).json(update)
    }
}

/// `/services`: service catalog.
pub mod services {
    use super::ApiRequest;

    pub fn list() -> ApiRequest {
        ApiRequest::get("/services")
    }

    pub fn get(id: i64) -> ApiRequest {
        ApiRequest::get(format!("/services/{id}"))
    }
}

/// `/admin/*`: reporting.
pub mod admin {
    use super::ApiRequest;

    pub fn analytics() -> ApiRequest {
        ApiRequest::get("/admin/analytics")
    }

    pub fn activity_log() -> ApiRequest {
        ApiRequest::get("/admin/activity-log")
    }

    pub fn staff_load() -> ApiRequest {
        ApiRequest::get("/admin/staff-load")
    }
}

/// `/users/me`: the signed-in user's own profile.
pub mod users {
    use super::{ApiError, ApiRequest, invalid};
    use crate::net::types::ProfileUpdate;

    pub fn profile() -> ApiRequest {
        ApiRequest::get("/users/me")
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Invalid`] for an empty update or blank names.
    pub fn update_profile(update: &ProfileUpdate) -> Result<ApiRequest, ApiError> {
        update.validate().map_err(invalid)?;
        ApiRequest::patch("/users/me").json(update)
    }
}

fn invalid(message: String) -> ApiError {
    ApiError::Invalid(message)
}
