mod helpers;

use chrono::{Duration, SecondsFormat, Utc};
use helpers::setup::spawn_app;
use pillbox_api_structs::route_not_found;
use pillbox_sdk::{
    AdherenceGrade, AdherencePeriod, CreateMedicineInput, CreateReminderInput, DayStat, Dosage,
    DosageUnit, Frequency, LogAdherenceInput, MedicineType, PillboxSDK, Priority, ReminderRecord,
    ReminderStatus, ReminderTime, UpcomingView, UpdateMedicineInput, UpdateProfileInput, ID,
};
use reqwest::StatusCode;

fn iso_in(offset: Duration) -> String {
    (Utc::now() + offset).to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn vitamin_d() -> CreateMedicineInput {
    CreateMedicineInput {
        name: "Vitamin D3".into(),
        dosage: Dosage {
            amount: "2000".into(),
            unit: DosageUnit::InternationalUnit,
        },
        medicine_type: MedicineType::Tablet,
        frequency: Some(Frequency::OnceDaily),
        instructions: Some("Take with breakfast".into()),
        reminder_times: Some(vec![ReminderTime::new(8, 0).unwrap()]),
        priority: Some(Priority::High),
        stock_quantity: Some(30),
    }
}

async fn create_medicine(sdk: &PillboxSDK) -> ID {
    sdk.medicine
        .create(vitamin_d())
        .await
        .expect("To create medicine")
        .medicine
        .id
}

#[actix_web::main]
#[test]
async fn test_status_ok() {
    let (_, sdk, _) = spawn_app().await;
    let health = sdk.status.check_health().await.expect("To be healthy");
    assert_eq!(health.status, "OK");
    assert_eq!(health.storage, "inmemory");

    let docs = sdk.status.docs().await.expect("To get docs");
    assert!(docs
        .endpoints
        .contains(&"POST /api/medicines/{id}/adherence".to_string()));
}

#[actix_web::main]
#[test]
async fn test_unknown_route_is_json_404() {
    let (_, _, address) = spawn_app().await;
    let res = reqwest::get(format!("{}/api/pills", address))
        .await
        .expect("To send request");
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body = res
        .json::<route_not_found::APIResponse>()
        .await
        .expect("To get json body");
    assert!(!body.success);
    assert_eq!(body.path, "/api/pills");
    assert!(body.available_routes.contains(&"GET /api/health".to_string()));
}

#[actix_web::main]
#[test]
async fn test_protected_routes_require_valid_token() {
    let (app, sdk, address) = spawn_app().await;

    let err = sdk.medicine.list().await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));

    let forged = PillboxSDK::new(address, "not.a.token");
    let err = forged.user.get_profile().await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));

    let sdk = app.sdk_for("google|1");
    assert!(sdk.user.get_profile().await.is_ok());
}

#[actix_web::main]
#[test]
async fn test_google_login_provisions_user_once() {
    let (app, sdk, _) = spawn_app().await;
    let token = app.token("google|42");

    let res = sdk.auth.google_login(token.clone()).await.unwrap();
    assert!(res.created);
    assert_eq!(res.user.name, "Priya Sharma");
    assert_eq!(res.user.email.as_deref(), Some("google-42@example.com"));

    let again = sdk.auth.google_login(token).await.unwrap();
    assert!(!again.created);
    assert_eq!(again.user.id, res.user.id);

    let err = sdk.auth.google_login("").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    let err = sdk.auth.google_login("garbage").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
}

#[actix_web::main]
#[test]
async fn test_update_profile() {
    let (app, _, _) = spawn_app().await;
    let sdk = app.sdk_for("google|1");

    let res = sdk
        .user
        .update_profile(UpdateProfileInput {
            phone: Some("+919876543210".into()),
            timezone: Some("Asia/Kolkata".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(res.user.phone.as_deref(), Some("+919876543210"));
    assert_eq!(res.user.timezone, "Asia/Kolkata");
    assert_eq!(res.user.name, "Priya Sharma");

    let err = sdk
        .user
        .update_profile(UpdateProfileInput {
            timezone: Some("Mars/Olympus".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
}

#[actix_web::main]
#[test]
async fn test_medicine_crud() {
    let (app, _, _) = spawn_app().await;
    let sdk = app.sdk_for("google|1");
    let other = app.sdk_for("google|2");

    let medicine = sdk.medicine.create(vitamin_d()).await.unwrap().medicine;
    assert!(medicine.is_active);
    assert!(!medicine.low_stock);
    assert_eq!(medicine.priority, Priority::High);

    let medicines = sdk.medicine.list().await.unwrap().medicines;
    assert_eq!(medicines.len(), 1);
    assert!(other.medicine.list().await.unwrap().medicines.is_empty());

    let err = other.medicine.get(medicine.id).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));

    let updated = sdk
        .medicine
        .update(UpdateMedicineInput {
            medicine_id: medicine.id,
            stock_quantity: Some(5),
            ..Default::default()
        })
        .await
        .unwrap()
        .medicine;
    assert!(updated.low_stock);
    assert_eq!(updated.name, "Vitamin D3");

    let deleted = sdk.medicine.delete(medicine.id).await.unwrap().medicine;
    assert!(!deleted.is_active);
    assert!(sdk.medicine.list().await.unwrap().medicines.is_empty());
    let err = sdk.medicine.get(medicine.id).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
}

#[actix_web::main]
#[test]
async fn test_create_medicine_validation() {
    let (app, _, _) = spawn_app().await;
    let sdk = app.sdk_for("google|1");

    let mut input = vitamin_d();
    input.name = "D".into();
    let err = sdk.medicine.create(input).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    assert!(err.message.contains("\"success\":false"));
}

#[actix_web::main]
#[test]
async fn test_one_off_reminders() {
    let (app, _, _) = spawn_app().await;
    let sdk = app.sdk_for("google|1");
    let medicine_id = create_medicine(&sdk).await;

    let scheduled_time = iso_in(Duration::hours(48));
    let reminder = sdk
        .reminder
        .create(CreateReminderInput {
            medicine_id,
            scheduled_time: scheduled_time.clone(),
            priority: None,
            notes: Some("Before the flight".into()),
        })
        .await
        .unwrap()
        .reminder;
    assert_eq!(reminder.status, ReminderStatus::Upcoming);
    assert_eq!(reminder.priority, Priority::High);

    let err = sdk
        .reminder
        .create(CreateReminderInput {
            medicine_id,
            scheduled_time,
            priority: None,
            notes: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::CONFLICT));

    let week = sdk
        .reminder
        .upcoming(Some(UpcomingView::Week))
        .await
        .unwrap();
    assert!(week.doses.iter().any(|d| d.reminder.id == reminder.id));

    let err = sdk
        .reminder
        .create(CreateReminderInput {
            medicine_id,
            scheduled_time: "next tuesday".into(),
            priority: None,
            notes: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
}

#[actix_web::main]
#[test]
async fn test_mark_reminder_taken_and_skipped() {
    let (app, _, _) = spawn_app().await;
    let sdk = app.sdk_for("google|1");
    let medicine_id = create_medicine(&sdk).await;

    let reminder = sdk
        .reminder
        .create(CreateReminderInput {
            medicine_id,
            scheduled_time: iso_in(Duration::hours(-2)),
            priority: None,
            notes: None,
        })
        .await
        .unwrap()
        .reminder;
    assert_eq!(reminder.status, ReminderStatus::Missed);

    let taken = sdk
        .reminder
        .mark_taken(reminder.id, Some("Late".into()))
        .await
        .unwrap()
        .reminder;
    assert_eq!(taken.status, ReminderStatus::Taken);
    assert!(taken.taken_at.is_some());
    assert_eq!(taken.notes.as_deref(), Some("Late"));

    let medicine = sdk.medicine.get(medicine_id).await.unwrap().medicine;
    assert_eq!(medicine.stock_quantity, Some(29));
    assert!(medicine.adherence_rate > 0);

    let skipped = sdk
        .reminder
        .mark_skipped(reminder.id, None)
        .await
        .unwrap()
        .reminder;
    assert_eq!(skipped.status, ReminderStatus::Skipped);
    assert!(!skipped.taken);
    assert!(skipped.taken_at.is_none());

    let other = app.sdk_for("google|2");
    let err = other.reminder.mark_taken(reminder.id, None).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
}

#[actix_web::main]
#[test]
async fn test_log_adherence_for_reminder() {
    let (app, _, _) = spawn_app().await;
    let sdk = app.sdk_for("google|1");
    let medicine_id = create_medicine(&sdk).await;
    let other_medicine_id = create_medicine(&sdk).await;

    let reminder = sdk
        .reminder
        .create(CreateReminderInput {
            medicine_id,
            scheduled_time: iso_in(Duration::hours(-1)),
            priority: None,
            notes: None,
        })
        .await
        .unwrap()
        .reminder;

    let res = sdk
        .medicine
        .log_adherence(LogAdherenceInput {
            medicine_id,
            taken: true,
            reminder_id: Some(reminder.id),
            notes: None,
        })
        .await
        .unwrap();
    assert_eq!(res.reminder.id, reminder.id);
    assert!(res.reminder.taken);
    assert_eq!(res.medicine.stock_quantity, Some(29));

    let err = sdk
        .medicine
        .log_adherence(LogAdherenceInput {
            medicine_id: other_medicine_id,
            taken: true,
            reminder_id: Some(reminder.id),
            notes: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
}

#[actix_web::main]
#[test]
async fn test_evaluate_reminder_records() {
    let (_, sdk, _) = spawn_app().await;

    let record = |offset: Duration, taken: bool, skipped: bool| ReminderRecord {
        scheduled_time: Some(iso_in(offset)),
        taken,
        skipped,
    };
    let res = sdk
        .reminder
        .evaluate(vec![
            record(Duration::hours(-3), true, false),
            record(Duration::hours(-3), false, true),
            record(Duration::hours(-3), false, false),
            record(Duration::minutes(-10), false, false),
            record(Duration::hours(3), false, false),
        ])
        .await
        .unwrap();
    assert_eq!(
        res.statuses,
        vec![
            ReminderStatus::Taken,
            ReminderStatus::Skipped,
            ReminderStatus::Missed,
            ReminderStatus::Due,
            ReminderStatus::Upcoming,
        ]
    );

    let err = sdk
        .reminder
        .evaluate(vec![record(Duration::hours(-3), true, true)])
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
}

#[actix_web::main]
#[test]
async fn test_adherence() {
    let (app, sdk, _) = spawn_app().await;

    let summary = sdk
        .adherence
        .summarize(vec![
            DayStat::new("2021-03-09".into(), 10, 8),
            DayStat::new("2021-03-10".into(), 10, 10),
        ])
        .await
        .unwrap()
        .adherence;
    assert_eq!(summary.percent, 90);
    assert_eq!(summary.grade, AdherenceGrade::A);
    assert_eq!(summary.total_scheduled, 20);

    let err = sdk
        .adherence
        .summarize(vec![DayStat::new("2021-03-10".into(), 1, 2)])
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));

    let sdk = app.sdk_for("google|1");
    let res = sdk.adherence.get(AdherencePeriod::Week).await.unwrap();
    assert_eq!(res.period, AdherencePeriod::Week);
    assert_eq!(res.adherence.days.len(), 7);
    assert_eq!(res.adherence.percent, 0);
}
