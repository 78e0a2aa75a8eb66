//! Wire DTOs for the REST backend.
//!
//! DESIGN
//! ======
//! Field names follow the backend's camelCase JSON. Update payloads are
//! explicit partial structs: every updatable field is listed with its type,
//! absent fields are omitted from the body, and each struct validates itself
//! before a request is built from it.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

// =============================================================================
// IDENTITY
// =============================================================================

/// Account role. Controls which navigation entries are visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Staff,
    Admin,
}

impl Role {
    /// Badge text shown next to the user's name.
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Staff => "STAFF",
            Self::Admin => "ADMIN",
        }
    }
}

/// The signed-in user as returned by the auth endpoints and persisted
/// alongside the token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl UserProfile {
    /// "First Last", trimmed when either part is blank.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_owned()
    }
}

/// Body of `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/register`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterData {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl RegisterData {
    /// Check the required fields. Phone and timezone are optional.
    ///
    /// # Errors
    ///
    /// Returns a human-readable message naming the first missing field.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.email.trim().is_empty() {
            return Err("Email is required");
        }
        if self.password.is_empty() {
            return Err("Password is required");
        }
        if self.first_name.trim().is_empty() {
            return Err("First name is required");
        }
        if self.last_name.trim().is_empty() {
            return Err("Last name is required");
        }
        Ok(())
    }
}

/// Successful login/registration reply.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: UserProfile,
}

/// Optional error payload the backend attaches to failures.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// APPOINTMENTS
// =============================================================================

/// Appointment lifecycle as reported by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    NoShow,
}

/// An appointment row. Timestamps are ISO-8601 local date-times.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub staff_id: i64,
    pub service_id: i64,
    pub start_time: String,
    pub end_time: String,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of `POST /appointments`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub staff_id: i64,
    pub service_id: i64,
    pub start_time: String,
    pub end_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewAppointment {
    /// # Errors
    ///
    /// Returns a message when either time is blank or the slot is empty.
    pub fn validate(&self) -> Result<(), String> {
        check_slot(&self.start_time, &self.end_time)
    }
}

/// Filters for `GET /appointments`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppointmentQuery {
    pub user_id: Option<i64>,
    pub staff_id: Option<i64>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl AppointmentQuery {
    /// Query-string pairs for the set filters, in a stable order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(user_id) = self.user_id {
            pairs.push(("userId".to_owned(), user_id.to_string()));
        }
        if let Some(staff_id) = self.staff_id {
            pairs.push(("staffId".to_owned(), staff_id.to_string()));
        }
        if let Some(from) = &self.from {
            pairs.push(("from".to_owned(), from.clone()));
        }
        if let Some(to) = &self.to {
            pairs.push(("to".to_owned(), to.clone()));
        }
        pairs
    }
}

/// Partial body of `PATCH /appointments/{id}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl AppointmentUpdate {
    /// # Errors
    ///
    /// Rejects empty updates, blank times, and a reversed slot.
    pub fn validate(&self) -> Result<(), String> {
        if *self == Self::default() {
            return Err("appointment update has no fields".to_owned());
        }
        match (&self.start_time, &self.end_time) {
            (Some(start), Some(end)) => check_slot(start, end),
            (Some(time), None) | (None, Some(time)) if time.trim().is_empty() => {
                Err("appointment time must not be blank".to_owned())
            }
            _ => Ok(()),
        }
    }
}

fn check_slot(start: &str, end: &str) -> Result<(), String> {
    if start.trim().is_empty() || end.trim().is_empty() {
        return Err("start and end time are required".to_owned());
    }
    // ISO-8601 date-times in the same format order lexicographically.
    if start.len() == end.len() && start >= end {
        return Err("end time must be after start time".to_owned());
    }
    Ok(())
}

// =============================================================================
// STAFF SCHEDULE
// =============================================================================

/// Whether a break repeats weekly or occurs once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BreakType {
    Recurring,
    OneTime,
}

/// One weekday's working window. `day_of_week` is 0 (Sunday) through 6.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHours {
    pub day_of_week: u8,
    /// `HH:MM` or `HH:MM:SS`.
    pub start_time: String,
    pub end_time: String,
    pub is_active: bool,
}

/// A break in a staff member's schedule.
///
/// Recurring breaks carry a weekday and clock times; one-time breaks carry
/// full date-times and no weekday.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleBreak {
    pub break_type: BreakType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<u8>,
    pub start_time: String,
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Partial body of `PATCH /staff/{id}/schedule`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_hours: Option<Vec<WorkingHours>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breaks: Option<Vec<ScheduleBreak>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

impl ScheduleUpdate {
    /// # Errors
    ///
    /// Rejects empty updates, weekdays outside 0..=6, unparseable or
    /// reversed clock times, and breaks whose weekday does not match their
    /// type.
    pub fn validate(&self) -> Result<(), String> {
        if *self == Self::default() {
            return Err("schedule update has no fields".to_owned());
        }
        for hours in self.working_hours.iter().flatten() {
            check_weekday(hours.day_of_week)?;
            check_clock_window(&hours.start_time, &hours.end_time)?;
        }
        for brk in self.breaks.iter().flatten() {
            match (brk.break_type, brk.day_of_week) {
                (BreakType::Recurring, Some(day)) => {
                    check_weekday(day)?;
                    check_clock_window(&brk.start_time, &brk.end_time)?;
                }
                (BreakType::Recurring, None) => {
                    return Err("recurring break needs a day of week".to_owned());
                }
                (BreakType::OneTime, Some(_)) => {
                    return Err("one-time break must not set a day of week".to_owned());
                }
                (BreakType::OneTime, None) => check_slot(&brk.start_time, &brk.end_time)?,
            }
        }
        Ok(())
    }
}

fn check_weekday(day: u8) -> Result<(), String> {
    if day > 6 {
        return Err(format!("day of week {day} is out of range 0-6"));
    }
    Ok(())
}

fn check_clock_window(start: &str, end: &str) -> Result<(), String> {
    let start_secs = parse_clock(start).ok_or_else(|| format!("invalid time {start:?}"))?;
    let end_secs = parse_clock(end).ok_or_else(|| format!("invalid time {end:?}"))?;
    if start_secs >= end_secs {
        return Err(format!("{end} is not after {start}"));
    }
    Ok(())
}

/// Parse `HH:MM` or `HH:MM:SS` into seconds past midnight.
pub(crate) fn parse_clock(raw: &str) -> Option<u32> {
    let mut parts = raw.trim().split(':');
    let hours: u32 = parts.next()?.parse().ok()?;
    let minutes: u32 = parts.next()?.parse().ok()?;
    let seconds: u32 = match parts.next() {
        Some(s) => s.parse().ok()?,
        None => 0,
    };
    if parts.next().is_some() || hours > 23 || minutes > 59 || seconds > 59 {
        return None;
    }
    Some(hours * 3600 + minutes * 60 + seconds)
}

// =============================================================================
// USER PROFILE
// =============================================================================

/// Partial body of `PATCH /users/me`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl ProfileUpdate {
    /// # Errors
    ///
    /// Rejects empty updates and blank names or timezone.
    pub fn validate(&self) -> Result<(), String> {
        if *self == Self::default() {
            return Err("profile update has no fields".to_owned());
        }
        for (field, value) in [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("timezone", &self.timezone),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(format!("{field} must not be blank"));
            }
        }
        Ok(())
    }
}
