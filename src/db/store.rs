use crate::types::{
    Analyst, AnalystProfile, AnalystStatus, AppError, Expert, ExpertProfile, Interview,
    InterviewStatus, NewsSource, Project, ProjectStatus, Result, StatusSnapshot,
    progress_percentage,
};
use chrono::{DateTime, Utc};
use libsql::{Builder, Connection, Database, Row, Value};
use uuid::Uuid;

/// Durable store for the research domain.
///
/// Status updates are single atomic statements that bump `updated_at`;
/// the conditional variants return whether the guarded transition
/// actually happened, which is how callers outside the orchestrator are
/// kept inside the state machine.
pub struct ProjectStore {
    db: Database,
}

impl ProjectStore {
    /// Open (or create) a local database file.
    pub async fn new_local(path: &str) -> Result<Self> {
        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {}", e)))?;

        let store = Self { db };
        store.initialize_schema().await?;

        Ok(store)
    }

    /// In-memory database for tests.
    pub async fn new_memory() -> Result<Self> {
        Self::new_local(":memory:").await
    }

    pub fn connection(&self) -> Result<Connection> {
        self.db
            .connect()
            .map_err(|e| AppError::Database(format!("Failed to get connection: {}", e)))
    }

    async fn initialize_schema(&self) -> Result<()> {
        let conn = self.connection()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS projects (
                id TEXT PRIMARY KEY,
                topic TEXT NOT NULL,
                status TEXT NOT NULL,
                human_notes TEXT,
                final_report TEXT,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create projects table: {}", e)))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS analysts (
                id TEXT PRIMARY KEY,
                project_id TEXT NOT NULL,
                name TEXT NOT NULL,
                specialization TEXT NOT NULL,
                research_focus TEXT NOT NULL,
                status TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                FOREIGN KEY (project_id) REFERENCES projects(id)
            )",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create analysts table: {}", e)))?;

        // The unique natural key is what makes concurrent get-or-create
        // converge on a single row.
        conn.execute(
            "CREATE TABLE IF NOT EXISTS experts (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                expertise_area TEXT NOT NULL,
                background TEXT NOT NULL,
                credibility_score REAL NOT NULL,
                UNIQUE(name, expertise_area)
            )",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create experts table: {}", e)))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS interviews (
                id TEXT PRIMARY KEY,
                project_id TEXT NOT NULL,
                analyst_id TEXT NOT NULL,
                expert_id TEXT NOT NULL,
                questions TEXT,
                responses TEXT,
                insights TEXT,
                credibility_assessment TEXT,
                fake_news_flags TEXT,
                status TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                completed_at INTEGER,
                FOREIGN KEY (project_id) REFERENCES projects(id),
                FOREIGN KEY (analyst_id) REFERENCES analysts(id),
                FOREIGN KEY (expert_id) REFERENCES experts(id)
            )",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create interviews table: {}", e)))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS sources (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                url TEXT,
                credibility_rating REAL NOT NULL,
                bias_rating TEXT NOT NULL,
                fact_check_rating TEXT NOT NULL,
                is_verified INTEGER NOT NULL
            )",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create sources table: {}", e)))?;

        Ok(())
    }

    // ============= Project operations =============

    pub async fn create_project(&self, topic: &str) -> Result<Project> {
        let conn = self.connection()?;
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().timestamp();

        conn.execute(
            "INSERT INTO projects (id, topic, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
            (
                id.clone(),
                topic,
                ProjectStatus::Created.as_str(),
                now,
                now,
            ),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create project: {}", e)))?;

        self.get_project(&id)
            .await?
            .ok_or_else(|| AppError::Database("Project vanished after insert".to_string()))
    }

    pub async fn get_project(&self, project_id: &str) -> Result<Option<Project>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, topic, status, human_notes, final_report, created_at, updated_at
                 FROM projects WHERE id = ?",
                [project_id],
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query project: {}", e)))?;

        match rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Some(row) => Ok(Some(row_to_project(&row)?)),
            None => Ok(None),
        }
    }

    /// Unconditional status update, used by the orchestrator which owns
    /// the state machine.
    pub async fn update_project_status(
        &self,
        project_id: &str,
        status: ProjectStatus,
    ) -> Result<()> {
        let conn = self.connection()?;
        let now = Utc::now().timestamp();

        let affected = conn
            .execute(
                "UPDATE projects SET status = ?, updated_at = ? WHERE id = ?",
                (status.as_str(), now, project_id),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to update project status: {}", e)))?;

        if affected == 0 {
            return Err(AppError::NotFound(format!("Project {}", project_id)));
        }

        Ok(())
    }

    /// Guarded transition: only applies when the project currently holds
    /// `from`. Returns whether the transition happened. Used by the
    /// human-intervention surface, which may only act during review.
    pub async fn transition_project_status(
        &self,
        project_id: &str,
        from: ProjectStatus,
        to: ProjectStatus,
    ) -> Result<bool> {
        let conn = self.connection()?;
        let now = Utc::now().timestamp();

        let affected = conn
            .execute(
                "UPDATE projects SET status = ?, updated_at = ? WHERE id = ? AND status = ?",
                (to.as_str(), now, project_id, from.as_str()),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to transition project: {}", e)))?;

        Ok(affected > 0)
    }

    /// Record reviewer notes; legal only while the project is reviewing.
    /// Returns whether the write happened.
    pub async fn set_human_notes(&self, project_id: &str, notes: &str) -> Result<bool> {
        let conn = self.connection()?;
        let now = Utc::now().timestamp();

        let affected = conn
            .execute(
                "UPDATE projects SET human_notes = ?, updated_at = ? WHERE id = ? AND status = ?",
                (notes, now, project_id, ProjectStatus::Reviewing.as_str()),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to set human notes: {}", e)))?;

        Ok(affected > 0)
    }

    /// Persist the final report and mark the project completed in one
    /// statement, so no reader ever observes a report on an incomplete
    /// project.
    pub async fn complete_project_with_report(
        &self,
        project_id: &str,
        report_json: &str,
    ) -> Result<()> {
        let conn = self.connection()?;
        let now = Utc::now().timestamp();

        let affected = conn
            .execute(
                "UPDATE projects SET final_report = ?, status = ?, updated_at = ? WHERE id = ?",
                (
                    report_json,
                    ProjectStatus::Completed.as_str(),
                    now,
                    project_id,
                ),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to store final report: {}", e)))?;

        if affected == 0 {
            return Err(AppError::NotFound(format!("Project {}", project_id)));
        }

        Ok(())
    }

    /// Delete a project and everything it owns. Shared experts survive.
    pub async fn delete_project(&self, project_id: &str) -> Result<bool> {
        let conn = self.connection()?;

        conn.execute("DELETE FROM interviews WHERE project_id = ?", [project_id])
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete interviews: {}", e)))?;
        conn.execute("DELETE FROM analysts WHERE project_id = ?", [project_id])
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete analysts: {}", e)))?;
        let affected = conn
            .execute("DELETE FROM projects WHERE id = ?", [project_id])
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete project: {}", e)))?;

        Ok(affected > 0)
    }

    // ============= Analyst operations =============

    pub async fn create_analyst(
        &self,
        project_id: &str,
        profile: &AnalystProfile,
    ) -> Result<Analyst> {
        let conn = self.connection()?;
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().timestamp();

        conn.execute(
            "INSERT INTO analysts (id, project_id, name, specialization, research_focus, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            (
                id.clone(),
                project_id,
                profile.name.as_str(),
                profile.specialization.as_str(),
                profile.research_focus.as_str(),
                AnalystStatus::Assigned.as_str(),
                now,
            ),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create analyst: {}", e)))?;

        self.get_analyst(&id)
            .await?
            .ok_or_else(|| AppError::Database("Analyst vanished after insert".to_string()))
    }

    pub async fn get_analyst(&self, analyst_id: &str) -> Result<Option<Analyst>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, project_id, name, specialization, research_focus, status, created_at
                 FROM analysts WHERE id = ?",
                [analyst_id],
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query analyst: {}", e)))?;

        match rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Some(row) => Ok(Some(row_to_analyst(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn list_analysts(&self, project_id: &str) -> Result<Vec<Analyst>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, project_id, name, specialization, research_focus, status, created_at
                 FROM analysts WHERE project_id = ? ORDER BY created_at ASC",
                [project_id],
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query analysts: {}", e)))?;

        let mut analysts = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            analysts.push(row_to_analyst(&row)?);
        }

        Ok(analysts)
    }

    pub async fn update_analyst_status(
        &self,
        analyst_id: &str,
        status: AnalystStatus,
    ) -> Result<()> {
        let conn = self.connection()?;

        let affected = conn
            .execute(
                "UPDATE analysts SET status = ? WHERE id = ?",
                (status.as_str(), analyst_id),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to update analyst status: {}", e)))?;

        if affected == 0 {
            return Err(AppError::NotFound(format!("Analyst {}", analyst_id)));
        }

        Ok(())
    }

    // ============= Expert operations =============

    /// Insert-or-fetch by the natural key. `INSERT OR IGNORE` against the
    /// unique constraint means two workers racing on the same expert both
    /// end up reading the one row that won; experts are immutable after
    /// creation, so the fetch never returns a half-updated record.
    pub async fn get_or_create_expert(&self, profile: &ExpertProfile) -> Result<Expert> {
        let conn = self.connection()?;
        let id = Uuid::new_v4().to_string();

        conn.execute(
            "INSERT OR IGNORE INTO experts (id, name, expertise_area, background, credibility_score)
             VALUES (?, ?, ?, ?, ?)",
            (
                id,
                profile.name.as_str(),
                profile.expertise_area.as_str(),
                profile.background.as_str(),
                profile.credibility_score,
            ),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to insert expert: {}", e)))?;

        let mut rows = conn
            .query(
                "SELECT id, name, expertise_area, background, credibility_score
                 FROM experts WHERE name = ? AND expertise_area = ?",
                (profile.name.as_str(), profile.expertise_area.as_str()),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query expert: {}", e)))?;

        match rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Some(row) => row_to_expert(&row),
            None => Err(AppError::Database(
                "Expert missing after insert-or-ignore".to_string(),
            )),
        }
    }

    pub async fn get_expert(&self, expert_id: &str) -> Result<Option<Expert>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, name, expertise_area, background, credibility_score
                 FROM experts WHERE id = ?",
                [expert_id],
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query expert: {}", e)))?;

        match rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Some(row) => Ok(Some(row_to_expert(&row)?)),
            None => Ok(None),
        }
    }

    // ============= Interview operations =============

    pub async fn create_interview(
        &self,
        project_id: &str,
        analyst_id: &str,
        expert_id: &str,
    ) -> Result<Interview> {
        let conn = self.connection()?;
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().timestamp();

        conn.execute(
            "INSERT INTO interviews (id, project_id, analyst_id, expert_id, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            (
                id.clone(),
                project_id,
                analyst_id,
                expert_id,
                InterviewStatus::Scheduled.as_str(),
                now,
            ),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create interview: {}", e)))?;

        self.get_interview(&id)
            .await?
            .ok_or_else(|| AppError::Database("Interview vanished after insert".to_string()))
    }

    pub async fn get_interview(&self, interview_id: &str) -> Result<Option<Interview>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, project_id, analyst_id, expert_id, questions, responses, insights,
                        credibility_assessment, fake_news_flags, status, created_at, completed_at
                 FROM interviews WHERE id = ?",
                [interview_id],
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query interview: {}", e)))?;

        match rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Some(row) => Ok(Some(row_to_interview(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn list_interviews(&self, project_id: &str) -> Result<Vec<Interview>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, project_id, analyst_id, expert_id, questions, responses, insights,
                        credibility_assessment, fake_news_flags, status, created_at, completed_at
                 FROM interviews WHERE project_id = ? ORDER BY created_at ASC",
                [project_id],
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query interviews: {}", e)))?;

        let mut interviews = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            interviews.push(row_to_interview(&row)?);
        }

        Ok(interviews)
    }

    pub async fn list_completed_interviews(&self, project_id: &str) -> Result<Vec<Interview>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, project_id, analyst_id, expert_id, questions, responses, insights,
                        credibility_assessment, fake_news_flags, status, created_at, completed_at
                 FROM interviews WHERE project_id = ? AND status = ? ORDER BY created_at ASC",
                (project_id, InterviewStatus::Completed.as_str()),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query interviews: {}", e)))?;

        let mut interviews = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            interviews.push(row_to_interview(&row)?);
        }

        Ok(interviews)
    }

    pub async fn update_interview_status(
        &self,
        interview_id: &str,
        status: InterviewStatus,
    ) -> Result<()> {
        let conn = self.connection()?;

        let affected = conn
            .execute(
                "UPDATE interviews SET status = ? WHERE id = ?",
                (status.as_str(), interview_id),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to update interview status: {}", e)))?;

        if affected == 0 {
            return Err(AppError::NotFound(format!("Interview {}", interview_id)));
        }

        Ok(())
    }

    /// Persist every interview artifact and mark the interview completed
    /// in one statement.
    #[allow(clippy::too_many_arguments)]
    pub async fn complete_interview(
        &self,
        interview_id: &str,
        questions_json: &str,
        responses_json: &str,
        insights_json: &str,
        assessment_json: &str,
        fake_news_flags_json: &str,
    ) -> Result<()> {
        let conn = self.connection()?;
        let now = Utc::now().timestamp();

        let affected = conn
            .execute(
                "UPDATE interviews
                 SET questions = ?, responses = ?, insights = ?, credibility_assessment = ?,
                     fake_news_flags = ?, status = ?, completed_at = ?
                 WHERE id = ?",
                (
                    questions_json,
                    responses_json,
                    insights_json,
                    assessment_json,
                    fake_news_flags_json,
                    InterviewStatus::Completed.as_str(),
                    now,
                    interview_id,
                ),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to complete interview: {}", e)))?;

        if affected == 0 {
            return Err(AppError::NotFound(format!("Interview {}", interview_id)));
        }

        Ok(())
    }

    // ============= Source operations =============

    pub async fn count_sources(&self) -> Result<u64> {
        let conn = self.connection()?;

        let mut rows = conn
            .query("SELECT COUNT(*) FROM sources", ())
            .await
            .map_err(|e| AppError::Database(format!("Failed to count sources: {}", e)))?;

        match rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Some(row) => {
                let count: i64 = row.get(0).map_err(|e| AppError::Database(e.to_string()))?;
                Ok(count as u64)
            }
            None => Ok(0),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_source(
        &self,
        name: &str,
        url: Option<&str>,
        credibility_rating: f64,
        bias_rating: &str,
        fact_check_rating: &str,
        is_verified: bool,
    ) -> Result<NewsSource> {
        let conn = self.connection()?;
        let id = Uuid::new_v4().to_string();

        conn.execute(
            "INSERT INTO sources (id, name, url, credibility_rating, bias_rating, fact_check_rating, is_verified)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            (
                id.clone(),
                name,
                url,
                credibility_rating,
                bias_rating,
                fact_check_rating,
                is_verified as i64,
            ),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to insert source: {}", e)))?;

        Ok(NewsSource {
            id,
            name: name.to_string(),
            url: url.map(|u| u.to_string()),
            credibility_rating,
            bias_rating: bias_rating.to_string(),
            fact_check_rating: fact_check_rating.to_string(),
            is_verified,
        })
    }

    pub async fn list_sources(&self) -> Result<Vec<NewsSource>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, name, url, credibility_rating, bias_rating, fact_check_rating, is_verified
                 FROM sources ORDER BY credibility_rating DESC",
                (),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query sources: {}", e)))?;

        let mut sources = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            sources.push(row_to_source(&row)?);
        }

        Ok(sources)
    }

    pub async fn get_source_by_name(&self, name: &str) -> Result<Option<NewsSource>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT id, name, url, credibility_rating, bias_rating, fact_check_rating, is_verified
                 FROM sources WHERE name = ?",
                [name],
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query source: {}", e)))?;

        match rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Some(row) => Ok(Some(row_to_source(&row)?)),
            None => Ok(None),
        }
    }

    // ============= Status snapshot =============

    /// Best-effort progress view; never fails over partially-populated
    /// projects, only over missing ones.
    pub async fn status_snapshot(&self, project_id: &str) -> Result<Option<StatusSnapshot>> {
        let Some(project) = self.get_project(project_id).await? else {
            return Ok(None);
        };

        let conn = self.connection()?;
        let analysts_created = count_where(
            &conn,
            "SELECT COUNT(*) FROM analysts WHERE project_id = ?",
            project_id,
        )
        .await?;
        let interviews_scheduled = count_where(
            &conn,
            "SELECT COUNT(*) FROM interviews WHERE project_id = ?",
            project_id,
        )
        .await?;

        let mut rows = conn
            .query(
                "SELECT COUNT(*) FROM interviews WHERE project_id = ? AND status = ?",
                (project_id, InterviewStatus::Completed.as_str()),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to count interviews: {}", e)))?;
        let interviews_completed = match rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Some(row) => {
                let count: i64 = row.get(0).map_err(|e| AppError::Database(e.to_string()))?;
                count as u64
            }
            None => 0,
        };

        Ok(Some(StatusSnapshot {
            status: project.status,
            analysts_created,
            interviews_scheduled,
            interviews_completed,
            progress: progress_percentage(interviews_completed, interviews_scheduled),
            last_updated: project.updated_at,
        }))
    }
}

async fn count_where(conn: &Connection, sql: &str, param: &str) -> Result<u64> {
    let mut rows = conn
        .query(sql, [param])
        .await
        .map_err(|e| AppError::Database(format!("Failed to count rows: {}", e)))?;

    match rows
        .next()
        .await
        .map_err(|e| AppError::Database(e.to_string()))?
    {
        Some(row) => {
            let count: i64 = row.get(0).map_err(|e| AppError::Database(e.to_string()))?;
            Ok(count as u64)
        }
        None => Ok(0),
    }
}

// ============= Row decoding =============

fn timestamp(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

fn opt_text(row: &Row, idx: i32) -> Result<Option<String>> {
    match row
        .get_value(idx)
        .map_err(|e| AppError::Database(e.to_string()))?
    {
        Value::Null => Ok(None),
        Value::Text(text) => Ok(Some(text)),
        other => Err(AppError::Database(format!(
            "Unexpected value in text column {}: {:?}",
            idx, other
        ))),
    }
}

fn opt_timestamp(row: &Row, idx: i32) -> Result<Option<DateTime<Utc>>> {
    match row
        .get_value(idx)
        .map_err(|e| AppError::Database(e.to_string()))?
    {
        Value::Null => Ok(None),
        Value::Integer(secs) => Ok(Some(timestamp(secs))),
        other => Err(AppError::Database(format!(
            "Unexpected value in timestamp column {}: {:?}",
            idx, other
        ))),
    }
}

fn row_to_project(row: &Row) -> Result<Project> {
    let status_raw: String = row.get(2).map_err(|e| AppError::Database(e.to_string()))?;
    let status = ProjectStatus::parse(&status_raw)
        .ok_or_else(|| AppError::Database(format!("Unknown project status '{}'", status_raw)))?;

    Ok(Project {
        id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
        topic: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
        status,
        human_notes: opt_text(row, 3)?,
        final_report: opt_text(row, 4)?,
        created_at: timestamp(row.get::<i64>(5).map_err(|e| AppError::Database(e.to_string()))?),
        updated_at: timestamp(row.get::<i64>(6).map_err(|e| AppError::Database(e.to_string()))?),
    })
}

fn row_to_analyst(row: &Row) -> Result<Analyst> {
    let status_raw: String = row.get(5).map_err(|e| AppError::Database(e.to_string()))?;
    let status = AnalystStatus::parse(&status_raw)
        .ok_or_else(|| AppError::Database(format!("Unknown analyst status '{}'", status_raw)))?;

    Ok(Analyst {
        id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
        project_id: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
        name: row.get(2).map_err(|e| AppError::Database(e.to_string()))?,
        specialization: row.get(3).map_err(|e| AppError::Database(e.to_string()))?,
        research_focus: row.get(4).map_err(|e| AppError::Database(e.to_string()))?,
        status,
        created_at: timestamp(row.get::<i64>(6).map_err(|e| AppError::Database(e.to_string()))?),
    })
}

fn row_to_expert(row: &Row) -> Result<Expert> {
    Ok(Expert {
        id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
        name: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
        expertise_area: row.get(2).map_err(|e| AppError::Database(e.to_string()))?,
        background: row.get(3).map_err(|e| AppError::Database(e.to_string()))?,
        credibility_score: row.get(4).map_err(|e| AppError::Database(e.to_string()))?,
    })
}

fn row_to_interview(row: &Row) -> Result<Interview> {
    let status_raw: String = row.get(9).map_err(|e| AppError::Database(e.to_string()))?;
    let status = InterviewStatus::parse(&status_raw)
        .ok_or_else(|| AppError::Database(format!("Unknown interview status '{}'", status_raw)))?;

    Ok(Interview {
        id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
        project_id: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
        analyst_id: row.get(2).map_err(|e| AppError::Database(e.to_string()))?,
        expert_id: row.get(3).map_err(|e| AppError::Database(e.to_string()))?,
        questions: opt_text(row, 4)?,
        responses: opt_text(row, 5)?,
        insights: opt_text(row, 6)?,
        credibility_assessment: opt_text(row, 7)?,
        fake_news_flags: opt_text(row, 8)?,
        status,
        created_at: timestamp(
            row.get::<i64>(10)
                .map_err(|e| AppError::Database(e.to_string()))?,
        ),
        completed_at: opt_timestamp(row, 11)?,
    })
}

fn row_to_source(row: &Row) -> Result<NewsSource> {
    let verified: i64 = row.get(6).map_err(|e| AppError::Database(e.to_string()))?;

    Ok(NewsSource {
        id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
        name: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
        url: opt_text(row, 2)?,
        credibility_rating: row.get(3).map_err(|e| AppError::Database(e.to_string()))?,
        bias_rating: row.get(4).map_err(|e| AppError::Database(e.to_string()))?,
        fact_check_rating: row.get(5).map_err(|e| AppError::Database(e.to_string()))?,
        is_verified: verified != 0,
    })
}
