//! Project store tests: CRUD, guarded transitions, cascade deletion,
//! expert dedup under concurrency, and the progress snapshot.

use rstest::rstest;
use std::sync::Arc;
use verity::db::ProjectStore;
use verity::types::{
    AnalystProfile, AnalystStatus, ExpertProfile, InterviewStatus, ProjectStatus,
};

fn analyst_profile(name: &str) -> AnalystProfile {
    AnalystProfile {
        name: name.to_string(),
        specialization: "Energy policy".to_string(),
        research_focus: "Grid reliability claims".to_string(),
    }
}

fn expert_profile(name: &str) -> ExpertProfile {
    ExpertProfile {
        name: name.to_string(),
        expertise_area: "Power systems".to_string(),
        background: "Utility engineer".to_string(),
        credibility_score: 0.9,
    }
}

#[tokio::test]
async fn test_project_round_trip() {
    let store = ProjectStore::new_memory().await.unwrap();

    let project = store.create_project("blackout rumors").await.unwrap();
    assert_eq!(project.status, ProjectStatus::Created);
    assert!(project.final_report.is_none());
    assert!(project.human_notes.is_none());

    let fetched = store.get_project(&project.id).await.unwrap().unwrap();
    assert_eq!(fetched.topic, "blackout rumors");
    assert!(fetched.updated_at >= fetched.created_at);

    assert!(store.get_project("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_status_update_bumps_updated_at() {
    let store = ProjectStore::new_memory().await.unwrap();
    let project = store.create_project("topic").await.unwrap();

    store
        .update_project_status(&project.id, ProjectStatus::Analyzing)
        .await
        .unwrap();

    let fetched = store.get_project(&project.id).await.unwrap().unwrap();
    assert_eq!(fetched.status, ProjectStatus::Analyzing);
    assert!(fetched.updated_at >= project.updated_at);
}

#[tokio::test]
async fn test_guarded_transition_requires_expected_status() {
    let store = ProjectStore::new_memory().await.unwrap();
    let project = store.create_project("topic").await.unwrap();

    // Not reviewing yet: the guarded write must not apply.
    let applied = store
        .transition_project_status(&project.id, ProjectStatus::Reviewing, ProjectStatus::Stopped)
        .await
        .unwrap();
    assert!(!applied);
    let fetched = store.get_project(&project.id).await.unwrap().unwrap();
    assert_eq!(fetched.status, ProjectStatus::Created);

    store
        .update_project_status(&project.id, ProjectStatus::Reviewing)
        .await
        .unwrap();
    let applied = store
        .transition_project_status(&project.id, ProjectStatus::Reviewing, ProjectStatus::Stopped)
        .await
        .unwrap();
    assert!(applied);
}

#[tokio::test]
async fn test_human_notes_only_written_during_review() {
    let store = ProjectStore::new_memory().await.unwrap();
    let project = store.create_project("topic").await.unwrap();

    assert!(!store.set_human_notes(&project.id, "too early").await.unwrap());

    store
        .update_project_status(&project.id, ProjectStatus::Reviewing)
        .await
        .unwrap();
    assert!(store
        .set_human_notes(&project.id, "focus on primary sources")
        .await
        .unwrap());

    let fetched = store.get_project(&project.id).await.unwrap().unwrap();
    assert_eq!(
        fetched.human_notes.as_deref(),
        Some("focus on primary sources")
    );
}

#[tokio::test]
async fn test_complete_project_with_report_is_atomic() {
    let store = ProjectStore::new_memory().await.unwrap();
    let project = store.create_project("topic").await.unwrap();

    store
        .complete_project_with_report(&project.id, r#"{"executive_summary":"done"}"#)
        .await
        .unwrap();

    let fetched = store.get_project(&project.id).await.unwrap().unwrap();
    assert_eq!(fetched.status, ProjectStatus::Completed);
    assert!(fetched.final_report.is_some());
}

#[tokio::test]
async fn test_expert_get_or_create_is_idempotent() {
    let store = ProjectStore::new_memory().await.unwrap();

    let first = store
        .get_or_create_expert(&expert_profile("Dr. Alvarez"))
        .await
        .unwrap();
    let second = store
        .get_or_create_expert(&expert_profile("Dr. Alvarez"))
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    // The original row wins; a re-encounter never updates it.
    assert_eq!(second.credibility_score, 0.9);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_expert_get_or_create_converges_under_concurrency() {
    let store = Arc::new(ProjectStore::new_memory().await.unwrap());

    let mut handles = Vec::new();
    for _ in 0..10 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .get_or_create_expert(&expert_profile("Dr. Contested"))
                .await
                .unwrap()
                .id
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }

    let first = &ids[0];
    assert!(ids.iter().all(|id| id == first));
}

#[tokio::test]
async fn test_interview_lifecycle() {
    let store = ProjectStore::new_memory().await.unwrap();
    let project = store.create_project("topic").await.unwrap();
    let analyst = store
        .create_analyst(&project.id, &analyst_profile("Rivera"))
        .await
        .unwrap();
    assert_eq!(analyst.status, AnalystStatus::Assigned);
    let expert = store
        .get_or_create_expert(&expert_profile("Dr. Alvarez"))
        .await
        .unwrap();

    let interview = store
        .create_interview(&project.id, &analyst.id, &expert.id)
        .await
        .unwrap();
    assert_eq!(interview.status, InterviewStatus::Scheduled);
    assert!(interview.completed_at.is_none());

    store
        .update_interview_status(&interview.id, InterviewStatus::InProgress)
        .await
        .unwrap();
    store
        .complete_interview(
            &interview.id,
            r#"["q1"]"#,
            r#"[]"#,
            r#"{"key_insights":[],"sources":[],"credibility_notes":[]}"#,
            r#"{"overall_credibility":0.8}"#,
            r#"[]"#,
        )
        .await
        .unwrap();

    let fetched = store.get_interview(&interview.id).await.unwrap().unwrap();
    assert_eq!(fetched.status, InterviewStatus::Completed);
    assert!(fetched.completed_at.unwrap() >= fetched.created_at);
    assert_eq!(fetched.questions.as_deref(), Some(r#"["q1"]"#));

    let completed = store.list_completed_interviews(&project.id).await.unwrap();
    assert_eq!(completed.len(), 1);
}

#[tokio::test]
async fn test_delete_project_cascades_but_spares_experts() {
    let store = ProjectStore::new_memory().await.unwrap();
    let project = store.create_project("topic").await.unwrap();
    let analyst = store
        .create_analyst(&project.id, &analyst_profile("Rivera"))
        .await
        .unwrap();
    let expert = store
        .get_or_create_expert(&expert_profile("Dr. Alvarez"))
        .await
        .unwrap();
    store
        .create_interview(&project.id, &analyst.id, &expert.id)
        .await
        .unwrap();

    assert!(store.delete_project(&project.id).await.unwrap());

    assert!(store.get_project(&project.id).await.unwrap().is_none());
    assert!(store.list_analysts(&project.id).await.unwrap().is_empty());
    assert!(store.list_interviews(&project.id).await.unwrap().is_empty());
    // Experts are shared across projects and survive the cascade.
    assert!(store.get_expert(&expert.id).await.unwrap().is_some());

    assert!(!store.delete_project(&project.id).await.unwrap());
}

#[rstest]
#[case(0, 3, 0.0)]
#[case(2, 3, 200.0 / 3.0)]
#[case(3, 3, 100.0)]
#[tokio::test]
async fn test_snapshot_progress(
    #[case] completed: usize,
    #[case] total: usize,
    #[case] expected: f64,
) {
    let store = ProjectStore::new_memory().await.unwrap();
    let project = store.create_project("topic").await.unwrap();
    let analyst = store
        .create_analyst(&project.id, &analyst_profile("Rivera"))
        .await
        .unwrap();
    let expert = store
        .get_or_create_expert(&expert_profile("Dr. Alvarez"))
        .await
        .unwrap();

    let mut interviews = Vec::new();
    for _ in 0..total {
        interviews.push(
            store
                .create_interview(&project.id, &analyst.id, &expert.id)
                .await
                .unwrap(),
        );
    }
    for interview in interviews.iter().take(completed) {
        store
            .update_interview_status(&interview.id, InterviewStatus::Completed)
            .await
            .unwrap();
    }

    let snapshot = store.status_snapshot(&project.id).await.unwrap().unwrap();
    assert_eq!(snapshot.analysts_created, 1);
    assert_eq!(snapshot.interviews_scheduled, total as u64);
    assert_eq!(snapshot.interviews_completed, completed as u64);
    assert!((snapshot.progress - expected).abs() < 1e-9);
    assert!(snapshot.progress <= 100.0);

    assert!(store.status_snapshot("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("verity-test.db");
    let path = path.to_str().unwrap();

    let project_id = {
        let store = ProjectStore::new_local(path).await.unwrap();
        store.create_project("durable topic").await.unwrap().id
    };

    let store = ProjectStore::new_local(path).await.unwrap();
    let project = store.get_project(&project_id).await.unwrap().unwrap();
    assert_eq!(project.topic, "durable topic");
}
