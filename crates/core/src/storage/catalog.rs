//! Task and project catalog storage

use rusqlite::{params, Connection};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{parse_datetime, parse_uuid};
use crate::error::Result;
use crate::models::{Project, Task};

pub struct CatalogStore<'a> {
    conn: &'a Connection,
}

impl<'a> CatalogStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    #[instrument(skip(self, task), fields(task_id = %task.id))]
    pub fn create_task(&self, task: &Task) -> Result<()> {
        self.conn.execute(
            "INSERT INTO tasks (id, name, description, is_active, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                task.id.to_string(),
                task.name,
                task.description,
                task.is_active,
                task.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Active tasks ordered by name
    pub fn list_active_tasks(&self) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, is_active, created_at FROM tasks
             WHERE is_active = 1 ORDER BY name",
        )?;
        let tasks = stmt
            .query_map([], |row| {
                Ok(Task {
                    id: parse_uuid(&row.get::<_, String>(0)?)?,
                    name: row.get(1)?,
                    description: row.get(2)?,
                    is_active: row.get(3)?,
                    created_at: parse_datetime(&row.get::<_, String>(4)?)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }

    /// Soft delete a task. Returns whether a row matched.
    #[instrument(skip(self))]
    pub fn deactivate_task(&self, id: Uuid) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE tasks SET is_active = 0 WHERE id = ?1",
            params![id.to_string()],
        )?;
        Ok(changed > 0)
    }

    #[instrument(skip(self, project), fields(project_id = %project.id))]
    pub fn create_project(&self, project: &Project) -> Result<()> {
        self.conn.execute(
            "INSERT INTO projects (id, name, description, client, is_active, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                project.id.to_string(),
                project.name,
                project.description,
                project.client,
                project.is_active,
                project.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Active projects ordered by name
    pub fn list_active_projects(&self) -> Result<Vec<Project>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, client, is_active, created_at FROM projects
             WHERE is_active = 1 ORDER BY name",
        )?;
        let projects = stmt
            .query_map([], |row| {
                Ok(Project {
                    id: parse_uuid(&row.get::<_, String>(0)?)?,
                    name: row.get(1)?,
                    description: row.get(2)?,
                    client: row.get(3)?,
                    is_active: row.get(4)?,
                    created_at: parse_datetime(&row.get::<_, String>(5)?)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(projects)
    }

    /// Soft delete a project. Returns whether a row matched.
    #[instrument(skip(self))]
    pub fn deactivate_project(&self, id: Uuid) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE projects SET is_active = 0 WHERE id = ?1",
            params![id.to_string()],
        )?;
        Ok(changed > 0)
    }
}
