#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use ecowatch_api::{CategoryId, NewReport, NewSession, Remote, ReportId, Severity, UserId};
use ecowatch_client::{Session, ThreadManager};
use ecowatch_mock_server::{MockClient, MockServer};

/// A mock server with three known users (two regulars, one staff member),
/// two categories and one public report to hang comments off.
pub struct TestBed {
    pub server: Arc<Mutex<MockServer>>,
    pub alice: MockClient,
    pub bob: MockClient,
    pub staff: MockClient,
    pub alice_id: UserId,
    pub bob_id: UserId,
    pub staff_id: UserId,
    pub waste: CategoryId,
    pub water: CategoryId,
    pub report: ReportId,
}

pub fn new_session(email: &str, password: &str) -> NewSession {
    NewSession {
        email: email.to_string(),
        password: password.to_string(),
        device: String::from("tests"),
    }
}

pub async fn log_in(client: &mut MockClient, email: &str, password: &str) -> Session {
    Session::open(client, new_session(email, password))
        .await
        .expect("opening session")
}

pub fn report_in(title: &str, category: Option<CategoryId>, severity: Severity) -> NewReport {
    NewReport {
        title: title.to_string(),
        description: String::from("Spotted on the morning walk"),
        location_name: String::from("Riverside park"),
        latitude: 48.148,
        longitude: 17.107,
        category,
        severity,
        is_public: true,
    }
}

pub async fn manager_for(
    client: &MockClient,
    user: UserId,
    report: ReportId,
) -> ThreadManager<MockClient> {
    ThreadManager::open(client.clone(), user, report)
        .await
        .expect("opening comment thread")
}

pub async fn test_bed() -> TestBed {
    let mut server = MockServer::new();
    let alice_id = server
        .admin_create_user("alice", "alice@example.com", "alice-pass", false)
        .expect("creating alice");
    let bob_id = server
        .admin_create_user("bob", "bob@example.com", "bob-pass", false)
        .expect("creating bob");
    let staff_id = server
        .admin_create_user("staff", "staff@example.com", "staff-pass", true)
        .expect("creating staff");
    let waste = server.admin_create_category("Waste", "#805AD5");
    let water = server.admin_create_category("Water", "#3182CE");
    let server = server.shared();

    let mut alice = MockClient::new(server.clone());
    log_in(&mut alice, "alice@example.com", "alice-pass").await;
    let mut bob = MockClient::new(server.clone());
    log_in(&mut bob, "bob@example.com", "bob-pass").await;
    let mut staff = MockClient::new(server.clone());
    log_in(&mut staff, "staff@example.com", "staff-pass").await;

    let report = alice
        .create_report(report_in(
            "Illegal dumping by the river",
            None,
            Severity::Medium,
        ))
        .await
        .expect("creating report")
        .id;

    TestBed {
        server,
        alice,
        bob,
        staff,
        alice_id,
        bob_id,
        staff_id,
        waste,
        water,
        report,
    }
}
