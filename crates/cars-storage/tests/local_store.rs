//! LocalStore behaviour against a temporary directory.

use std::collections::BTreeMap;

use cars_core::models::record::AssessmentRecord;
use cars_core::models::risk::RiskLevel;
use cars_scoring::Screening;
use cars_scoring::collect::field_name;
use cars_storage::error::StorageError;
use cars_storage::export;
use cars_storage::local::LocalStore;
use cars_storage::repository::{AssessmentRepository, RecordFilter, save_all};
use cars_storage::stats;

/// Score a form with items 1–24 at `value`, taken `offset` seconds after a
/// fixed instant.
fn record(value: i32, self_harm: i32, respondent: Option<&str>, offset: i64) -> AssessmentRecord {
    let fields: BTreeMap<String, String> = (0..25)
        .map(|i| {
            let v = if i == 24 { self_harm } else { value };
            (field_name(i), v.to_string())
        })
        .collect();
    let at = jiff::Timestamp::from_second(1_700_000_000 + offset).unwrap();
    let result = Screening::standard().run_at(&fields, at).unwrap();
    AssessmentRecord::new(result, respondent.map(str::to_string))
}

fn store() -> (tempfile::TempDir, LocalStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path().join("data").join("assessments.json"));
    (dir, store)
}

#[tokio::test]
async fn missing_file_is_an_empty_store() {
    let (_dir, store) = store();
    assert!(store.list(&RecordFilter::all()).await.unwrap().is_empty());
    assert_eq!(store.delete_all().await.unwrap(), 0);
}

#[tokio::test]
async fn saved_record_can_be_fetched() {
    let (_dir, store) = store();
    let rec = record(2, 0, Some("s-1"), 0);
    store.save(&rec).await.unwrap();

    assert!(store.path().exists());
    assert_eq!(store.get(rec.id).await.unwrap(), rec);
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let (_dir, store) = store();
    store.save(&record(0, 0, None, 0)).await.unwrap();
    let err = store.get(uuid::Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));
}

#[tokio::test]
async fn saving_the_same_id_replaces_the_record() {
    let (_dir, store) = store();
    let rec = record(1, 0, None, 0);
    store.save(&rec).await.unwrap();
    store.save(&rec).await.unwrap();
    assert_eq!(store.list(&RecordFilter::all()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn list_is_newest_first_and_filterable() {
    let (_dir, store) = store();
    let old = record(0, 0, Some("a"), 0);
    let mid = record(2, 0, Some("b"), 60);
    let new = record(0, 1, Some("a"), 120);
    save_all(&store, &[old.clone(), mid.clone(), new.clone()]).await.unwrap();

    let all = store.list(&RecordFilter::all()).await.unwrap();
    let ids: Vec<_> = all.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![new.id, mid.id, old.id]);

    let at_risk = RecordFilter {
        risk_level: Some(RiskLevel::AtRisk),
        ..RecordFilter::default()
    };
    assert_eq!(store.list(&at_risk).await.unwrap(), vec![mid]);

    let flagged = RecordFilter {
        self_harm_only: true,
        ..RecordFilter::default()
    };
    assert_eq!(store.list(&flagged).await.unwrap(), vec![new.clone()]);

    let latest = store.list(&RecordFilter::latest_for("a")).await.unwrap();
    assert_eq!(latest, vec![new]);
}

#[tokio::test]
async fn delete_all_removes_the_file() {
    let (_dir, store) = store();
    save_all(&store, &[record(0, 0, None, 0), record(1, 0, None, 1)])
        .await
        .unwrap();
    assert_eq!(store.delete_all().await.unwrap(), 2);
    assert!(!store.path().exists());
    assert!(store.list(&RecordFilter::all()).await.unwrap().is_empty());
}

#[tokio::test]
async fn corrupt_file_is_an_error() {
    let (_dir, store) = store();
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), "not json").unwrap();
    let err = store.list(&RecordFilter::all()).await.unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));
}

#[cfg(unix)]
#[tokio::test]
async fn store_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, store) = store();
    store.save(&record(0, 0, None, 0)).await.unwrap();
    let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[tokio::test]
async fn backup_restores_into_a_fresh_store() {
    let (_dir, source) = store();
    let records = vec![record(1, 0, Some("x"), 0), record(3, 0, Some("y"), 10)];
    save_all(&source, &records).await.unwrap();

    let backup = export::to_json(&source.list(&RecordFilter::all()).await.unwrap()).unwrap();
    let restored = export::from_json(&backup).unwrap();

    let (_dir2, target) = store();
    assert_eq!(save_all(&target, &restored).await.unwrap(), 2);
    for rec in &records {
        assert_eq!(&target.get(rec.id).await.unwrap(), rec);
    }
}

#[tokio::test]
async fn restoring_a_backup_drops_records_it_does_not_contain() {
    let (_dir, store) = store();
    let stale = record(4, 0, Some("old"), 0);
    store.save(&stale).await.unwrap();

    let backup = vec![record(1, 0, Some("x"), 10), record(2, 0, Some("y"), 20)];
    let restored = export::from_json(&export::to_json(&backup).unwrap()).unwrap();
    assert_eq!(store.replace_all(&restored).await.unwrap(), 2);

    let ids: Vec<_> = store
        .list(&RecordFilter::all())
        .await
        .unwrap()
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec![backup[1].id, backup[0].id]);
    assert!(matches!(
        store.get(stale.id).await.unwrap_err(),
        StorageError::NotFound { .. }
    ));
}

#[tokio::test]
async fn replacing_with_nothing_leaves_an_empty_store() {
    let (_dir, store) = store();
    store.save(&record(0, 0, None, 0)).await.unwrap();
    assert_eq!(store.replace_all(&[]).await.unwrap(), 0);
    assert!(store.list(&RecordFilter::all()).await.unwrap().is_empty());
}

#[test]
fn csv_has_one_row_per_record() {
    let rec = record(2, 0, None, 0);
    let csv = export::to_csv(std::slice::from_ref(&rec)).unwrap();
    let lines: Vec<_> = csv.split("\r\n").filter(|l| !l.is_empty()).collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Date,Risk Level,Self Harm Override,Externalizing Raw"));
    assert_eq!(
        lines[1],
        "2023-11-14T22:13:20Z,At-risk,false,12,65,12,53,12,72,12,67,48,66"
    );
}

#[test]
fn statistics_group_by_risk_level() {
    let records = vec![
        record(0, 0, Some("a"), 0),
        record(0, 0, Some("a"), 1),
        record(0, 0, None, 2),
        record(2, 0, Some("b"), 3),
        record(0, 1, Some("c"), 4),
    ];
    let s = stats::statistics(&records);
    assert_eq!(s.total, 5);
    assert_eq!(s.by_risk_level[&RiskLevel::Normal].count, 3);
    assert_eq!(s.by_risk_level[&RiskLevel::Normal].unique_respondents, 1);
    assert_eq!(s.by_risk_level[&RiskLevel::AtRisk].count, 1);
    assert_eq!(s.by_risk_level[&RiskLevel::HighRisk].unique_respondents, 1);
    assert_eq!(stats::count_self_harm(&records), 1);

    let summary = stats::summarize(&records).unwrap();
    assert_eq!(summary.stored, 5);
    assert_eq!(summary.latest.map(|r| r.id), Some(records[4].id));
    assert!(summary.approx_size_bytes > 0);
}
