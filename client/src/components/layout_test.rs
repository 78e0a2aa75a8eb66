use super::*;

fn hrefs(role: Option<Role>) -> Vec<&'static str> {
    nav_links(role).into_iter().map(|l| l.href).collect()
}

#[test]
fn user_sees_core_links_only() {
    assert_eq!(hrefs(Some(Role::User)), vec!["/", "/bookings", "/appointments"]);
}

#[test]
fn staff_sees_schedule_but_not_admin() {
    let links = hrefs(Some(Role::Staff));
    assert!(links.contains(&"/schedule"));
    assert!(!links.contains(&"/admin"));
}

#[test]
fn admin_sees_admin_but_not_schedule() {
    let links = hrefs(Some(Role::Admin));
    assert!(links.contains(&"/admin"));
    assert!(!links.contains(&"/schedule"));
}

#[test]
fn anonymous_gets_core_links() {
    assert_eq!(nav_links(None).len(), 3);
}

#[test]
fn active_link_matches_exact_path() {
    assert_eq!(nav_link_class("/", "/"), "nav-link nav-link--active");
    assert_eq!(nav_link_class("/", "/bookings"), "nav-link");
    assert_eq!(nav_link_class("/bookings", "/bookings"), "nav-link nav-link--active");
}
