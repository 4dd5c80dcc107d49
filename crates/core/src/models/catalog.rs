//! Task and project catalog models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A task employees can log time against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(name: String, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}

/// A client project employees can log time against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub client: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn new(name: String, description: Option<String>, client: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            client,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
