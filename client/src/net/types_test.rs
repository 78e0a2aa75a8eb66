use super::*;

fn sample_user() -> UserProfile {
    UserProfile {
        id: 7,
        email: "ana@example.com".to_owned(),
        first_name: "Ana".to_owned(),
        last_name: "Silva".to_owned(),
        role: Role::Staff,
        phone: None,
        timezone: None,
    }
}

// =============================================================
// Identity
// =============================================================

#[test]
fn user_profile_deserializes_backend_shape() {
    let raw = r#"{"id":7,"email":"ana@example.com","firstName":"Ana","lastName":"Silva","role":"STAFF"}"#;
    let user: UserProfile = serde_json::from_str(raw).unwrap();
    assert_eq!(user, sample_user());
}

#[test]
fn user_profile_rejects_unknown_role() {
    let raw = r#"{"id":7,"email":"a@b.com","firstName":"A","lastName":"B","role":"ROOT"}"#;
    assert!(serde_json::from_str::<UserProfile>(raw).is_err());
}

#[test]
fn user_profile_serializes_camel_case_without_empty_optionals() {
    let json = serde_json::to_value(sample_user()).unwrap();
    assert_eq!(json["firstName"], "Ana");
    assert_eq!(json["role"], "STAFF");
    assert!(json.get("phone").is_none());
}

#[test]
fn display_name_joins_and_trims() {
    let mut user = sample_user();
    assert_eq!(user.display_name(), "Ana Silva");
    user.last_name.clear();
    assert_eq!(user.display_name(), "Ana");
}

#[test]
fn role_labels_match_wire_names() {
    for role in [Role::User, Role::Staff, Role::Admin] {
        let wire = serde_json::to_value(role).unwrap();
        assert_eq!(wire, role.label());
    }
}

#[test]
fn register_data_requires_core_fields() {
    let mut data = RegisterData {
        email: "a@b.com".to_owned(),
        password: "pw".to_owned(),
        first_name: "A".to_owned(),
        last_name: "B".to_owned(),
        ..RegisterData::default()
    };
    assert_eq!(data.validate(), Ok(()));

    data.first_name = "   ".to_owned();
    assert_eq!(data.validate(), Err("First name is required"));

    data.first_name = "A".to_owned();
    data.password.clear();
    assert_eq!(data.validate(), Err("Password is required"));
}

#[test]
fn register_data_omits_missing_phone() {
    let data = RegisterData {
        email: "a@b.com".to_owned(),
        password: "pw".to_owned(),
        first_name: "A".to_owned(),
        last_name: "B".to_owned(),
        ..RegisterData::default()
    };
    let json = serde_json::to_value(&data).unwrap();
    assert_eq!(json["firstName"], "A");
    assert!(json.get("phone").is_none());
}

#[test]
fn auth_response_refresh_token_is_optional() {
    let raw = r#"{"token":"T","user":{"id":1,"email":"a@b.com","firstName":"A","lastName":"B","role":"USER"}}"#;
    let resp: AuthResponse = serde_json::from_str(raw).unwrap();
    assert_eq!(resp.token, "T");
    assert_eq!(resp.refresh_token, None);
    assert_eq!(resp.user.role, Role::User);
}

// =============================================================
// Appointments
// =============================================================

#[test]
fn appointment_query_emits_only_set_filters() {
    let query = AppointmentQuery {
        staff_id: Some(3),
        from: Some("2026-10-16T09:00:00".to_owned()),
        to: Some("2026-10-16T17:00:00".to_owned()),
        ..AppointmentQuery::default()
    };
    assert_eq!(
        query.to_pairs(),
        vec![
            ("staffId".to_owned(), "3".to_owned()),
            ("from".to_owned(), "2026-10-16T09:00:00".to_owned()),
            ("to".to_owned(), "2026-10-16T17:00:00".to_owned()),
        ]
    );
    assert!(AppointmentQuery::default().to_pairs().is_empty());
}

#[test]
fn appointment_status_parses_no_show() {
    let status: AppointmentStatus = serde_json::from_str(r#""NO_SHOW""#).unwrap();
    assert_eq!(status, AppointmentStatus::NoShow);
}

#[test]
fn new_appointment_rejects_reversed_slot() {
    let appt = NewAppointment {
        staff_id: 1,
        service_id: 2,
        start_time: "2026-10-16T10:00:00".to_owned(),
        end_time: "2026-10-16T09:30:00".to_owned(),
        notes: None,
    };
    assert_eq!(appt.validate(), Err("end time must be after start time".to_owned()));
}

#[test]
fn appointment_update_rejects_empty_and_blank_time() {
    assert!(AppointmentUpdate::default().validate().is_err());
    let update = AppointmentUpdate { start_time: Some(" ".to_owned()), ..AppointmentUpdate::default() };
    assert!(update.validate().is_err());
    let update = AppointmentUpdate { notes: Some("bring forms".to_owned()), ..AppointmentUpdate::default() };
    assert_eq!(update.validate(), Ok(()));
}

// =============================================================
// Staff schedule
// =============================================================

fn hours(day: u8, start: &str, end: &str) -> WorkingHours {
    WorkingHours { day_of_week: day, start_time: start.to_owned(), end_time: end.to_owned(), is_active: true }
}

#[test]
fn schedule_update_accepts_valid_week() {
    let update = ScheduleUpdate {
        working_hours: Some(vec![hours(1, "09:00", "17:00"), hours(2, "09:00:00", "12:30:00")]),
        breaks: Some(vec![ScheduleBreak {
            break_type: BreakType::Recurring,
            day_of_week: Some(1),
            start_time: "12:00".to_owned(),
            end_time: "12:45".to_owned(),
            reason: Some("lunch".to_owned()),
        }]),
        is_available: None,
    };
    assert_eq!(update.validate(), Ok(()));
}

#[test]
fn schedule_update_rejects_bad_weekday_and_window() {
    let update = ScheduleUpdate { working_hours: Some(vec![hours(7, "09:00", "17:00")]), ..ScheduleUpdate::default() };
    assert!(update.validate().is_err());
    let update = ScheduleUpdate { working_hours: Some(vec![hours(1, "17:00", "09:00")]), ..ScheduleUpdate::default() };
    assert!(update.validate().is_err());
    let update = ScheduleUpdate { working_hours: Some(vec![hours(1, "9am", "17:00")]), ..ScheduleUpdate::default() };
    assert!(update.validate().is_err());
}

#[test]
fn schedule_update_checks_break_kind_against_weekday() {
    let recurring_without_day = ScheduleBreak {
        break_type: BreakType::Recurring,
        day_of_week: None,
        start_time: "12:00".to_owned(),
        end_time: "13:00".to_owned(),
        reason: None,
    };
    let update = ScheduleUpdate { breaks: Some(vec![recurring_without_day]), ..ScheduleUpdate::default() };
    assert_eq!(update.validate(), Err("recurring break needs a day of week".to_owned()));

    let one_time = ScheduleBreak {
        break_type: BreakType::OneTime,
        day_of_week: None,
        start_time: "2026-12-24T12:00:00".to_owned(),
        end_time: "2026-12-24T18:00:00".to_owned(),
        reason: Some("holiday".to_owned()),
    };
    let update = ScheduleUpdate { breaks: Some(vec![one_time]), ..ScheduleUpdate::default() };
    assert_eq!(update.validate(), Ok(()));
}

#[test]
fn parse_clock_bounds() {
    assert_eq!(parse_clock("00:00"), Some(0));
    assert_eq!(parse_clock("23:59:59"), Some(86_399));
    assert_eq!(parse_clock("24:00"), None);
    assert_eq!(parse_clock("12:60"), None);
    assert_eq!(parse_clock("12"), None);
    assert_eq!(parse_clock("12:00:00:00"), None);
}

// =============================================================
// Profile
// =============================================================

#[test]
fn profile_update_rejects_blank_names() {
    assert!(ProfileUpdate::default().validate().is_err());
    let update = ProfileUpdate { last_name: Some(String::new()), ..ProfileUpdate::default() };
    assert_eq!(update.validate(), Err("last name must not be blank".to_owned()));
    let update = ProfileUpdate { phone: Some(String::new()), ..ProfileUpdate::default() };
    assert_eq!(update.validate(), Ok(()));
}

#[test]
fn profile_update_serializes_only_set_fields() {
    let update = ProfileUpdate { timezone: Some("Europe/Lisbon".to_owned()), ..ProfileUpdate::default() };
    let json = serde_json::to_value(&update).unwrap();
    assert_eq!(json, serde_json::json!({ "timezone": "Europe/Lisbon" }));
}
