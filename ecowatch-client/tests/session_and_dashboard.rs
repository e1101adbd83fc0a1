mod helpers;

use ecowatch_api::{Error, Remote, Severity, SeverityCount};
use ecowatch_client::{Dashboard, Session};
use ecowatch_mock_server::MockClient;

use crate::helpers::{new_session, report_in, test_bed};

#[tokio::test]
async fn session_opens_and_exposes_the_user() {
    let bed = test_bed().await;
    let mut client = MockClient::new(bed.server.clone());

    let session = Session::open(&mut client, new_session("alice@example.com", "alice-pass"))
        .await
        .unwrap();
    assert_eq!(session.user_id(), bed.alice_id);
    assert_eq!(session.user().username, "alice");
    assert!(!session.is_staff());

    let staff = Session::open(&mut client, new_session("staff@example.com", "staff-pass"))
        .await
        .unwrap();
    assert!(staff.is_staff());
}

#[tokio::test]
async fn wrong_credentials_are_rejected() {
    let bed = test_bed().await;
    let mut client = MockClient::new(bed.server.clone());

    assert_eq!(
        Session::open(&mut client, new_session("alice@example.com", "wrong")).await,
        Err(Error::PermissionDenied),
    );
    assert_eq!(
        Session::open(&mut client, new_session("nobody@example.com", "alice-pass")).await,
        Err(Error::PermissionDenied),
    );
}

#[tokio::test]
async fn closing_tears_the_session_down() {
    let bed = test_bed().await;
    let mut client = MockClient::new(bed.server.clone());

    let session = Session::open(&mut client, new_session("alice@example.com", "alice-pass"))
        .await
        .unwrap();
    session.close(&mut client).await;

    assert_eq!(client.current_user().await, Err(Error::PermissionDenied));
}

#[tokio::test]
async fn session_refresh_refetches_the_user() {
    let mut bed = test_bed().await;
    let mut session = Session::open(
        &mut bed.alice,
        new_session("alice@example.com", "alice-pass"),
    )
    .await
    .unwrap();

    session.refresh(&mut bed.alice).await.unwrap();
    assert_eq!(session.user_id(), bed.alice_id);
}

#[tokio::test]
async fn dashboard_aggregates_the_report_table() {
    let mut bed = test_bed().await;

    // the bed already holds one of alice's reports: Medium, uncategorized
    bed.bob
        .create_report(report_in("Overflowing bins", Some(bed.waste), Severity::High))
        .await
        .unwrap();
    bed.bob
        .create_report(report_in("Fly-tipping again", Some(bed.waste), Severity::High))
        .await
        .unwrap();
    bed.bob
        .create_report(report_in("Oil slick on the creek", Some(bed.water), Severity::Critical))
        .await
        .unwrap();

    let dash = Dashboard::fetch(&mut bed.alice).await.unwrap();
    let stats = dash.stats();
    assert_eq!(stats.total_reports, 4);
    assert_eq!(stats.recent_reports, 4);
    assert_eq!(stats.user_reports, 1);

    let waste = stats
        .reports_by_category
        .iter()
        .find(|c| c.name == "Waste")
        .unwrap();
    assert_eq!(waste.count, 2);
    let water = stats
        .reports_by_category
        .iter()
        .find(|c| c.name == "Water")
        .unwrap();
    assert_eq!(water.count, 1);

    assert_eq!(
        stats.reports_by_severity,
        vec![
            SeverityCount { severity: Severity::Medium, count: 1 },
            SeverityCount { severity: Severity::High, count: 2 },
            SeverityCount { severity: Severity::Critical, count: 1 },
        ],
    );

    // the same snapshot counted from bob's side
    let dash = Dashboard::fetch(&mut bed.bob).await.unwrap();
    assert_eq!(dash.stats().user_reports, 3);
}

#[tokio::test]
async fn dashboard_refresh_picks_up_new_reports() {
    let mut bed = test_bed().await;
    let mut dash = Dashboard::fetch(&mut bed.alice).await.unwrap();
    assert_eq!(dash.stats().total_reports, 1);

    bed.bob
        .create_report(report_in("Dead fish downstream", Some(bed.water), Severity::High))
        .await
        .unwrap();
    dash.refresh(&mut bed.alice).await.unwrap();
    assert_eq!(dash.stats().total_reports, 2);
}

#[tokio::test]
async fn private_reports_stay_between_reporter_and_staff() {
    let mut bed = test_bed().await;
    let mut private = report_in("Asbestos in the old mill", None, Severity::Critical);
    private.is_public = false;
    let private = bed.alice.create_report(private).await.unwrap();

    let alice_sees = bed.alice.fetch_reports().await.unwrap();
    assert!(alice_sees.iter().any(|r| r.id == private.id));

    let bob_sees = bed.bob.fetch_reports().await.unwrap();
    assert!(!bob_sees.iter().any(|r| r.id == private.id));
    assert_eq!(
        bed.bob.fetch_report(private.id).await,
        Err(Error::ReportNotFound(private.id)),
    );

    let staff_sees = bed.staff.fetch_reports().await.unwrap();
    assert!(staff_sees.iter().any(|r| r.id == private.id));
}
